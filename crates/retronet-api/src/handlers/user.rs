//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use retronet_service::user::UpdateProfileRequest as SvcUpdateProfile;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;

    Ok(Json(ApiResponse::ok(UserResponse::from_user(&user))))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .update_profile(
            &auth,
            SvcUpdateProfile {
                screen_name: req.screen_name,
                status: req.status,
                away_status: req.away_status,
                away_message: req.away_message,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from_user(&user))))
}
