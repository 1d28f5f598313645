//! Presence handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, BuddyPresenceResponse, GroupResponse, PingResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/presence/ping
///
/// The polling endpoint: refreshes the caller's heartbeat and returns
/// the consolidated presence snapshot.
pub async fn ping(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<PingResponse>>, ApiError> {
    let snapshot = state.presence_service.ping(&auth).await?;

    Ok(Json(ApiResponse::ok(PingResponse {
        buddies: snapshot
            .buddies
            .iter()
            .map(BuddyPresenceResponse::from_presence)
            .collect(),
        groups: snapshot.groups.iter().map(GroupResponse::from_group).collect(),
    })))
}
