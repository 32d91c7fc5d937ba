//! WebSocket message dispatch
//!
//! Authorization is checked here, then host commands are dispatched to the
//! handlers in [`super::host`].

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;
use std::sync::Arc;

use super::host;

/// Macro to check host authorization and return early if unauthorized
macro_rules! check_host {
    ($role:expr, $action:expr) => {
        if *$role != Role::Host {
            tracing::warn!("Rejected host command from {:?}", $role);
            return Some(ServerMessage::Error {
                code: "UNAUTHORIZED".to_string(),
                msg: format!("Only host can {}", $action),
            });
        }
    };
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    role: &Role,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::RequestState => Some(ServerMessage::State {
            snapshot: state.get_snapshot().await,
        }),

        // Host-only commands (authorization checked before dispatch)
        ClientMessage::HostStartGame => {
            check_host!(role, "start games");
            host::handle_start_game(state).await
        }

        ClientMessage::HostStopGame => {
            check_host!(role, "stop games");
            host::handle_stop_game(state).await
        }

        ClientMessage::HostAdvanceRound => {
            check_host!(role, "advance rounds");
            host::handle_advance_round(state).await
        }
    }
}
