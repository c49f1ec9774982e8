//! Root Route
//!
//! - GET /api/ - Service banner

use axum::Json;

use crate::api::dto::RootResponse;

/// GET /api/
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AI Health Coach API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
