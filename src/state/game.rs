use super::AppState;
use crate::engine::EngineSnapshot;
use crate::types::*;

impl AppState {
    /// Start a new game from the first question
    pub async fn start_game(&self) -> EngineSnapshot {
        let mut engine = self.engine.write().await;
        engine.start_game();
        self.broadcast_engine(&engine);
        engine.snapshot()
    }

    /// Stop the game and clear players and comments
    pub async fn stop_game(&self) -> EngineSnapshot {
        let mut engine = self.engine.write().await;
        engine.stop_game();
        self.broadcast_engine(&engine);
        engine.snapshot()
    }

    /// Skip to the next question (or finish after the last one).
    /// Returns false if no round is running.
    pub async fn advance_round(&self) -> bool {
        let mut engine = self.engine.write().await;
        let advanced = engine.advance_round();
        if advanced {
            self.broadcast_engine(&engine);
        }
        advanced
    }

    pub async fn get_snapshot(&self) -> EngineSnapshot {
        self.engine.read().await.snapshot()
    }

    pub async fn get_leaderboard(&self) -> Vec<Player> {
        self.engine.read().await.leaderboard()
    }

    pub async fn get_status(&self) -> GameStatus {
        self.engine.read().await.status()
    }
}
