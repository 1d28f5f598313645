//! Block list handlers.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use retronet_core::error::AppError;

use crate::dto::request::BlockUserRequest;
use crate::dto::response::{ApiResponse, BlockedListResponse, BuddySummaryResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/blocks
pub async fn block(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BlockUserRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.block_service.block(&auth, &req.username).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("'{}' is blocked", req.username),
    })))
}

/// DELETE /api/blocks/{username}
pub async fn unblock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.block_service.unblock(&auth, &username).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("'{username}' is not blocked"),
    })))
}

/// GET /api/blocks
pub async fn list_blocked(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<BlockedListResponse>>, ApiError> {
    let users = state.block_service.list_blocked(&auth).await?;

    Ok(Json(ApiResponse::ok(BlockedListResponse {
        blocked_users: users
            .into_iter()
            .map(|u| BuddySummaryResponse {
                id: u.id,
                username: u.username,
                screen_name: u.screen_name,
            })
            .collect(),
    })))
}
