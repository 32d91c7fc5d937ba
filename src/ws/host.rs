//! Host-only command handlers
//!
//! All handlers in this module require the Host role.
//! Authorization is checked in the main dispatch layer before calling these.
//! The resulting state reaches every client (the host included) through the
//! broadcast channel, so successful commands return no direct response.

use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_start_game(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host starting game");
    state.start_game().await;
    None
}

pub async fn handle_stop_game(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host stopping game");
    state.stop_game().await;
    None
}

pub async fn handle_advance_round(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host skipping to next round");
    if state.advance_round().await {
        None
    } else {
        Some(ServerMessage::Error {
            code: "NO_ACTIVE_ROUND".to_string(),
            msg: "There is no running round to advance".to_string(),
        })
    }
}
