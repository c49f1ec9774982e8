//! Core data types for the Health Coach store
//!
//! - `User`: a registered account
//! - `NewUser`: what registration hands to the store
//! - `HealthProfile` / `ProfileInput`: the per-user fitness profile
//! - `Gender`, `FitnessLevel`, `WorkoutEnvironment`: classification enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A registered user account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// UUID v4, also the JWT subject
    pub id: String,
    pub email: String,
    /// bcrypt hash, never leaves the server
    pub password_hash: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration data after validation and password hashing
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

/// Gender as offered by the registration form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("Invalid gender: {}. Use male or female", other)),
        }
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Get all levels for iteration
    pub fn all() -> &'static [FitnessLevel] {
        &[
            FitnessLevel::Beginner,
            FitnessLevel::Intermediate,
            FitnessLevel::Advanced,
        ]
    }
}

impl std::fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitnessLevel::Beginner => write!(f, "beginner"),
            FitnessLevel::Intermediate => write!(f, "intermediate"),
            FitnessLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(format!(
                "Invalid fitness level: {}. Use beginner, intermediate, or advanced",
                other
            )),
        }
    }
}

/// Where the user usually trains
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutEnvironment {
    Home,
    Gym,
    Outdoor,
}

impl std::fmt::Display for WorkoutEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutEnvironment::Home => write!(f, "home"),
            WorkoutEnvironment::Gym => write!(f, "gym"),
            WorkoutEnvironment::Outdoor => write!(f, "outdoor"),
        }
    }
}

impl FromStr for WorkoutEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(WorkoutEnvironment::Home),
            "gym" => Ok(WorkoutEnvironment::Gym),
            "outdoor" => Ok(WorkoutEnvironment::Outdoor),
            other => Err(format!(
                "Invalid workout environment: {}. Use home, gym, or outdoor",
                other
            )),
        }
    }
}

/// Validated profile fields, as written by an upsert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub body_fat_percentage: Option<f64>,
    pub health_conditions: Vec<String>,
    pub medications: Vec<String>,
    pub fitness_level: FitnessLevel,
    /// Free-form goals such as weight_loss, muscle_gain, endurance
    pub fitness_goals: Vec<String>,
    pub preferred_exercises: Vec<String>,
    pub avoid_exercises: Vec<String>,
    pub available_equipment: Vec<String>,
    pub workout_environment: WorkoutEnvironment,
}

/// A stored health profile, one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub user_id: String,
    #[serde(flatten)]
    pub fields: ProfileInput,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether an upsert inserted a new row or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created,
    Updated,
}

impl std::fmt::Display for UpsertAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertAction::Created => write!(f, "created"),
            UpsertAction::Updated => write!(f, "updated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("FEMALE".parse::<Gender>(), Ok(Gender::Female));
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_fitness_level_display_matches_parse() {
        for level in FitnessLevel::all() {
            assert_eq!(level.to_string().parse::<FitnessLevel>(), Ok(*level));
        }
    }

    #[test]
    fn test_environment_serde_lowercase() {
        let json = serde_json::to_string(&WorkoutEnvironment::Outdoor).unwrap();
        assert_eq!(json, "\"outdoor\"");
    }
}
