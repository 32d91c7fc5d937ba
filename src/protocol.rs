use crate::engine::EngineSnapshot;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask for a fresh snapshot (e.g. after a reconnect)
    RequestState,
    // Host-only messages
    HostStartGame,
    HostStopGame,
    /// Skip to the next question
    HostAdvanceRound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        role: Role,
        server_now: String,
        snapshot: EngineSnapshot,
    },
    /// Sent after every engine mutation
    State { snapshot: EngineSnapshot },
    Error {
        code: String,
        msg: String,
    },
}
