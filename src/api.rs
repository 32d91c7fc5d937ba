//! HTTP query endpoints
//!
//! Read-only views of the engine for displays that poll instead of holding a
//! WebSocket open.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::engine::EngineSnapshot;
use crate::state::AppState;
use crate::types::Player;

/// Current round state, question, feed and standings.
///
/// GET /api/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<EngineSnapshot> {
    Json(state.get_snapshot().await)
}

/// Top players, highest score first.
///
/// GET /api/leaderboard
pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Json<Vec<Player>> {
    Json(state.get_leaderboard().await)
}
