use crate::simulate::AnswerSource;
use crate::state::AppState;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn the round clock: steps the engine every tick interval (100 ms).
/// Each step fires due transitions and counts the open question down.
pub fn spawn_round_clock(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = state.engine.read().await.config().tick_interval();
        let delta_ms = period.as_millis() as u64;

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            state.step_clock(delta_ms).await;
        }
    })
}

/// Spawn the audience simulator: after each jittered delay from `source`,
/// submit one comment if a question is open
pub fn spawn_comment_simulator<S>(state: Arc<AppState>, mut source: S) -> JoinHandle<()>
where
    S: AnswerSource + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(source.next_delay()).await;
            state.simulate_comment(&mut source).await;
        }
    })
}
