//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON, on the server and
//! by the session client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Gender, HealthProfile, User};

// ============================================
// ROOT DTOs
// ============================================

/// GET /api/ response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

// ============================================
// AUTH DTOs
// ============================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    /// Signed so out-of-range input reaches validation instead of a parse error
    pub age: i64,
    pub gender: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            age: user.age,
            gender: user.gender,
            created_at: user.created_at,
        }
    }
}

/// Login and register response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
    pub user: UserResponse,
}

// ============================================
// PROFILE DTOs
// ============================================

/// Create-or-update health profile request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    /// beginner, intermediate, advanced
    pub fitness_level: String,
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    #[serde(default)]
    pub preferred_exercises: Vec<String>,
    #[serde(default)]
    pub avoid_exercises: Vec<String>,
    #[serde(default)]
    pub available_equipment: Vec<String>,
    /// home, gym, outdoor
    pub workout_environment: String,
}

/// POST /api/profile/health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSaveResponse {
    pub message: String,
    pub profile: HealthProfile,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// healthy or unhealthy
    pub status: String,
    /// ok or error
    pub store: String,
    pub users: Option<u64>,
    pub uptime_seconds: u64,
    pub version: String,
}
