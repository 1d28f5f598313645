//! Buddy request and buddy list handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use retronet_core::error::AppError;
use retronet_entity::buddy::RequestAction;
use retronet_service::buddy::SendOutcome;

use crate::dto::request::{RespondBuddyRequest, SendBuddyRequest};
use crate::dto::response::{
    ApiResponse, BuddyEntryResponse, BuddyListResponse, BuddySummaryResponse, MessageResponse,
    PendingRequestResponse, PendingRequestsResponse, SendBuddyResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/buddies/requests
pub async fn send_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendBuddyRequest>,
) -> Result<Json<ApiResponse<SendBuddyResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.buddy_service.send_request(&auth, &req.username).await?;

    let body = match outcome {
        SendOutcome::Sent { request } => SendBuddyResponse {
            message: "Buddy request sent".to_string(),
            request_id: Some(request.id),
            buddy: None,
        },
        SendOutcome::MutualAccepted { buddy, .. } => SendBuddyResponse {
            message: format!("'{}' had already added you; you are now buddies", buddy.username),
            request_id: None,
            buddy: Some(BuddySummaryResponse {
                id: buddy.id,
                username: buddy.username,
                screen_name: buddy.screen_name,
            }),
        },
    };

    Ok(Json(ApiResponse::ok(body)))
}

/// GET /api/buddies/requests
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<PendingRequestsResponse>>, ApiError> {
    let requests = state.buddy_service.list_pending(&auth).await?;

    Ok(Json(ApiResponse::ok(PendingRequestsResponse {
        requests: requests
            .into_iter()
            .map(|r| PendingRequestResponse {
                id: r.id,
                requester_id: r.requester_id,
                requester_username: r.requester_username,
                requester_screen_name: r.requester_screen_name,
                created_at: r.created_at,
            })
            .collect(),
    })))
}

/// POST /api/buddies/requests/{id}/respond
pub async fn respond_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
    Json(req): Json<RespondBuddyRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let action: RequestAction = req.action.parse()?;

    let updated = state.buddy_service.respond(&auth, request_id, action).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Buddy request {}", updated.status),
    })))
}

/// GET /api/buddies
pub async fn list_buddies(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<BuddyListResponse>>, ApiError> {
    let buddies = state.buddy_service.list_buddies(&auth).await?;

    Ok(Json(ApiResponse::ok(BuddyListResponse {
        buddies: buddies
            .into_iter()
            .map(|b| BuddyEntryResponse {
                id: b.id,
                username: b.username,
                screen_name: b.screen_name,
                status: b.status.to_string(),
                last_seen: b.last_active_at,
            })
            .collect(),
    })))
}

/// DELETE /api/buddies/{username}
pub async fn remove_buddy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.buddy_service.remove_buddy(&auth, &username).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Buddy removed".to_string(),
    })))
}
