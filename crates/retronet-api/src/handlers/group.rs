//! Buddy group handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use retronet_core::error::AppError;
use retronet_entity::buddy::UpdateBuddyGroup;

use crate::dto::request::{CreateGroupRequest, UpdateGroupRequest};
use crate::dto::response::{
    ApiResponse, GroupEnvelopeResponse, GroupResponse, GroupsResponse, MessageResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<ApiResponse<GroupEnvelopeResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let group = state
        .group_service
        .create(&auth, &req.name, req.sort_order)
        .await?;

    Ok(Json(ApiResponse::ok(GroupEnvelopeResponse {
        group: GroupResponse::from_group(&group),
    })))
}

/// PUT /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<ApiResponse<GroupEnvelopeResponse>>, ApiError> {
    let group = state
        .group_service
        .update(
            &auth,
            group_id,
            UpdateBuddyGroup {
                name: req.name,
                buddy_ids: req.buddy_ids,
                sort_order: req.sort_order,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(GroupEnvelopeResponse {
        group: GroupResponse::from_group(&group),
    })))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.group_service.delete(&auth, group_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Buddy group deleted".to_string(),
    })))
}

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<GroupsResponse>>, ApiError> {
    let groups = state.group_service.list(&auth).await?;

    Ok(Json(ApiResponse::ok(GroupsResponse {
        groups: groups.iter().map(GroupResponse::from_group).collect(),
    })))
}
