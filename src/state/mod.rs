mod game;
mod round;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::protocol::ServerMessage;
use crate::questions::QuestionSet;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
///
/// All engine mutations go through the write lock, so the clock task, the
/// comment task and operator commands are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<Engine>>,
    /// Broadcast channel for sending snapshots to every connected client
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(questions: QuestionSet, config: EngineConfig) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            engine: Arc::new(RwLock::new(Engine::new(questions, config))),
            broadcast: tx,
        }
    }

    /// Send a message to all connected clients
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // Ignore send errors (no receivers connected is fine)
        let _ = self.broadcast.send(msg);
    }

    /// Broadcast the current snapshot of `engine`
    fn broadcast_engine(&self, engine: &Engine) {
        self.broadcast_to_all(ServerMessage::State {
            snapshot: engine.snapshot(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameStatus, Question};

    pub(super) fn test_state(count: usize) -> AppState {
        let questions = (0..count)
            .map(|i| Question {
                text: format!("Question {}", i + 1),
                answer: "Creeper".to_string(),
                aliases: vec!["creepers".to_string()],
            })
            .collect();
        AppState::new(
            QuestionSet::new(questions).unwrap(),
            EngineConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_new_state_is_waiting() {
        let state = test_state(2);
        let snapshot = state.get_snapshot().await;
        assert_eq!(snapshot.state.status, GameStatus::Waiting);
        assert!(snapshot.question.is_none());
    }

    #[tokio::test]
    async fn test_mutations_are_broadcast() {
        let state = test_state(2);
        let mut rx = state.broadcast.subscribe();

        state.start_game().await;

        match rx.recv().await.unwrap() {
            ServerMessage::State { snapshot } => {
                assert_eq!(snapshot.state.status, GameStatus::Question);
                assert_eq!(snapshot.question.unwrap().number, 1);
            }
            other => panic!("Expected State message, got {:?}", other),
        }
    }
}
