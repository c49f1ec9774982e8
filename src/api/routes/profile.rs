//! Health Profile Routes
//!
//! - POST /api/profile/health - Create or replace the caller's profile
//! - GET /api/profile/health - Fetch the caller's profile

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{ProfileRequest, ProfileSaveResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::store::{FitnessLevel, HealthProfile, ProfileInput, WorkoutEnvironment};

/// POST /api/profile/health
pub async fn save_health_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(req): Json<ProfileRequest>,
) -> ApiResult<Json<ProfileSaveResponse>> {
    let input = validate_profile_request(req)?;

    let (profile, action) = state.store.upsert_profile(&user.id, input).await?;

    tracing::info!(user_id = %user.id, action = %action, "Saved health profile");

    Ok(Json(ProfileSaveResponse {
        message: format!("Health profile {}", action),
        profile,
    }))
}

/// GET /api/profile/health
pub async fn get_health_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<HealthProfile>> {
    let profile = state
        .store
        .get_profile(&user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Health profile not found".to_string()))?;

    Ok(Json(profile))
}

/// Validate a profile request and convert it into store input
fn validate_profile_request(req: ProfileRequest) -> ApiResult<ProfileInput> {
    if !(req.height.is_finite() && req.height > 0.0) {
        return Err(ApiError::Validation(
            "Height must be a positive number of centimetres".to_string(),
        ));
    }

    if !(req.weight.is_finite() && req.weight > 0.0) {
        return Err(ApiError::Validation(
            "Weight must be a positive number of kilograms".to_string(),
        ));
    }

    if let Some(bf) = req.body_fat_percentage {
        if !(0.0..=100.0).contains(&bf) {
            return Err(ApiError::Validation(
                "Body fat percentage must be between 0 and 100".to_string(),
            ));
        }
    }

    let fitness_level: FitnessLevel = req.fitness_level.parse().map_err(ApiError::Validation)?;
    let workout_environment: WorkoutEnvironment = req
        .workout_environment
        .parse()
        .map_err(ApiError::Validation)?;

    Ok(ProfileInput {
        height: req.height,
        weight: req.weight,
        body_fat_percentage: req.body_fat_percentage,
        health_conditions: clean_list(req.health_conditions),
        medications: clean_list(req.medications),
        fitness_level,
        fitness_goals: clean_list(req.fitness_goals),
        preferred_exercises: clean_list(req.preferred_exercises),
        avoid_exercises: clean_list(req.avoid_exercises),
        available_equipment: clean_list(req.available_equipment),
        workout_environment,
    })
}

/// Trim entries and drop blanks
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProfileRequest {
        ProfileRequest {
            height: 180.0,
            weight: 80.0,
            body_fat_percentage: None,
            health_conditions: vec![" asthma ".to_string(), "".to_string()],
            medications: vec![],
            fitness_level: "Advanced".to_string(),
            fitness_goals: vec!["muscle_gain".to_string()],
            preferred_exercises: vec![],
            avoid_exercises: vec![],
            available_equipment: vec![],
            workout_environment: "gym".to_string(),
        }
    }

    #[test]
    fn test_validate_profile_request() {
        let input = validate_profile_request(valid()).unwrap();
        assert_eq!(input.fitness_level, FitnessLevel::Advanced);
        assert_eq!(input.workout_environment, WorkoutEnvironment::Gym);
        assert_eq!(input.health_conditions, vec!["asthma"]);
    }

    #[test]
    fn test_validate_profile_rejects_bad_values() {
        assert!(validate_profile_request(ProfileRequest { height: 0.0, ..valid() }).is_err());
        assert!(validate_profile_request(ProfileRequest { weight: f64::NAN, ..valid() }).is_err());
        assert!(validate_profile_request(ProfileRequest {
            body_fat_percentage: Some(140.0),
            ..valid()
        })
        .is_err());
        assert!(validate_profile_request(ProfileRequest {
            workout_environment: "moon".to_string(),
            ..valid()
        })
        .is_err());
    }
}
