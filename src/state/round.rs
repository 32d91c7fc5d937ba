use super::AppState;
use crate::engine::SubmitOutcome;
use crate::simulate::AnswerSource;
use crate::types::GameStatus;

impl AppState {
    /// One beat of the round clock. Broadcasts only if something changed.
    pub async fn step_clock(&self, delta_ms: u64) {
        let mut engine = self.engine.write().await;
        let before = engine.version();
        engine.step(delta_ms);
        if engine.version() != before {
            self.broadcast_engine(&engine);
        }
    }

    /// Feed an audience comment into the engine
    pub async fn submit_answer(&self, user: &str, text: &str) -> SubmitOutcome {
        let mut engine = self.engine.write().await;
        let outcome = engine.submit_answer(user, text);
        self.broadcast_engine(&engine);
        outcome
    }

    /// Ask `source` for a comment about the open question and submit it.
    /// Does nothing unless a question is open, so the audience falls silent
    /// as soon as the round ends.
    pub async fn simulate_comment<S: AnswerSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Option<SubmitOutcome> {
        let mut engine = self.engine.write().await;
        if engine.status() != GameStatus::Question {
            return None;
        }

        let question = engine.current_question()?.clone();
        let answer = source.next_answer(&question)?;
        let outcome = engine.submit_answer(&answer.user, &answer.text);
        self.broadcast_engine(&engine);

        tracing::debug!("Simulated comment {:?}: {:?}", answer, outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::SubmitOutcome;
    use crate::protocol::ServerMessage;
    use crate::simulate::{AudienceAnswer, ScriptedAnswers};
    use crate::state::tests::test_state;
    use crate::types::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_step_clock_broadcasts_only_on_change() {
        let state = test_state(1);
        let mut rx = state.broadcast.subscribe();

        // Waiting: nothing to count down
        state.step_clock(100).await;
        assert!(rx.try_recv().is_err());

        state.start_game().await;
        let _ = rx.recv().await.unwrap();

        state.step_clock(100).await;
        match rx.recv().await.unwrap() {
            ServerMessage::State { snapshot } => {
                assert_eq!(snapshot.state.time_remaining_ms, 24_900);
            }
            other => panic!("Expected State message, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_simulated_comment_scores() {
        let state = test_state(2);
        let mut script = ScriptedAnswers::new(
            vec![
                AudienceAnswer::new("bob", "enderman"),
                AudienceAnswer::new("alice", "Creeper"),
            ],
            Duration::from_millis(10),
        );

        // Silent while waiting; the script is not consumed
        assert!(state.simulate_comment(&mut script).await.is_none());
        assert_eq!(script.remaining(), 2);

        state.start_game().await;
        assert_eq!(
            state.simulate_comment(&mut script).await,
            Some(SubmitOutcome::Incorrect)
        );
        assert!(matches!(
            state.simulate_comment(&mut script).await,
            Some(SubmitOutcome::Correct {
                points_earned: 50,
                ..
            })
        ));

        // Script exhausted
        assert!(state.simulate_comment(&mut script).await.is_none());

        let snapshot = state.get_snapshot().await;
        assert_eq!(snapshot.comments.len(), 2);
        assert_eq!(snapshot.comments[0].user, "alice");
        assert_eq!(
            snapshot.state.round_winner,
            Some(Player::new("alice", 50))
        );
    }

    #[tokio::test]
    async fn test_simulated_comments_stop_outside_question() {
        let state = test_state(2);
        let mut script = ScriptedAnswers::new(
            vec![AudienceAnswer::new("alice", "creeper")],
            Duration::from_millis(10),
        );

        state.start_game().await;
        for _ in 0..251 {
            state.step_clock(100).await;
        }
        assert_eq!(state.get_status().await, GameStatus::Leaderboard);

        assert!(state.simulate_comment(&mut script).await.is_none());
        assert_eq!(script.remaining(), 1);
        assert!(state.get_snapshot().await.comments.is_empty());
    }
}
