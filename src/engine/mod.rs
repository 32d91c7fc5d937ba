//! Round engine
//!
//! Owns the round lifecycle, countdown and reveal, answer evaluation, scoring and
//! win detection. Everything here is synchronous and driven from outside:
//! [`Engine::step`] advances the engine clock, [`Engine::submit_answer`] feeds
//! audience comments in. Delayed transitions are queued on a [`Timeline`] so
//! they can be cancelled and are checked against the round they belong to.

pub mod scoring;
pub mod timeline;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::{
    EngineConfig, COMMENT_FEED_SIZE, LEADERBOARD_DELAY_MS, LEADERBOARD_SIZE, WINNER_DELAY_MS,
};
use crate::questions::QuestionSet;
use crate::types::*;

use scoring::{masked_answer, normalize_answer, points_for_elapsed, reveal_percentage};
use timeline::Timeline;

/// Delayed transitions. Round events are tagged with the round they were
/// scheduled in, the winner event with the game.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    ShowLeaderboard { round_epoch: u64 },
    NextRound { round_epoch: u64 },
    /// Applies from `Question` or `Leaderboard`: a round that ends inside the
    /// delay still crowns the winner.
    DeclareWinner { game_epoch: u64, winner: Player },
}

impl TimelineEvent {
    fn is_round_event(&self) -> bool {
        matches!(
            self,
            TimelineEvent::ShowLeaderboard { .. } | TimelineEvent::NextRound { .. }
        )
    }
}

/// What happened to a submitted comment
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Recorded in the feed but not evaluated (no open question, or round already won)
    Ignored,
    Incorrect,
    Correct {
        points_earned: u32,
        total: u32,
        /// The total crossed the win threshold; the winner screen follows shortly
        winner_pending: bool,
    },
}

/// Question as shown to the audience
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionView {
    /// 1-based
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub masked_answer: String,
    /// Only filled in once the round is over
    pub answer: Option<String>,
}

/// Everything the presentation layer needs to render one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSnapshot {
    pub version: u64,
    pub state: RoundState,
    pub round_duration_ms: u64,
    pub seconds_remaining: u64,
    pub question: Option<QuestionView>,
    pub players: Vec<Player>,
    pub leaderboard: Vec<Player>,
    pub comments: Vec<Comment>,
}

pub struct Engine {
    config: EngineConfig,
    questions: QuestionSet,
    state: RoundState,
    /// Insertion order doubles as the leaderboard tie-breaker
    players: Vec<Player>,
    /// Newest first
    comments: VecDeque<Comment>,
    timeline: Timeline<TimelineEvent>,
    game_epoch: u64,
    round_epoch: u64,
    version: u64,
}

impl Engine {
    pub fn new(questions: QuestionSet, config: EngineConfig) -> Self {
        let state = RoundState::initial(GameStatus::Waiting, config.round_duration_ms);
        Self {
            config,
            questions,
            state,
            players: Vec::new(),
            comments: VecDeque::with_capacity(COMMENT_FEED_SIZE),
            timeline: Timeline::new(),
            game_epoch: 0,
            round_epoch: 0,
            version: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Reading of the engine clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    /// Number of delayed transitions still queued
    pub fn pending_events(&self) -> usize {
        self.timeline.len()
    }

    /// Question currently on screen, if a round is running
    pub fn current_question(&self) -> Option<&Question> {
        match self.state.status {
            GameStatus::Question | GameStatus::Leaderboard => {
                self.questions.get(self.state.question_index)
            }
            GameStatus::Waiting | GameStatus::Winner => None,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.config
            .round_duration_ms
            .saturating_sub(self.state.time_remaining_ms)
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Drop all game state and queued transitions, leaving `status`
    fn reset(&mut self, status: GameStatus) {
        self.timeline.clear();
        self.game_epoch += 1;
        self.round_epoch += 1;
        self.state = RoundState::initial(status, self.config.round_duration_ms);
        self.players.clear();
        self.comments.clear();
        self.bump();
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start a fresh game at the first question. Always restarts, from any status.
    pub fn start_game(&mut self) {
        self.reset(GameStatus::Question);
        tracing::info!(
            "Game started with {} questions (game {})",
            self.questions.len(),
            self.game_epoch
        );
    }

    /// Stop the game and clear players and comments
    pub fn stop_game(&mut self) {
        self.reset(GameStatus::Waiting);
        tracing::info!("Game stopped");
    }

    /// Move on to the next question, or back to `Waiting` after the last one.
    /// Scores carry over. Returns false when there is no running round to advance.
    pub fn advance_round(&mut self) -> bool {
        match self.state.status {
            GameStatus::Question | GameStatus::Leaderboard => {}
            GameStatus::Waiting | GameStatus::Winner => {
                tracing::debug!("Ignoring advance_round in {:?}", self.state.status);
                return false;
            }
        }

        self.timeline.cancel_where(TimelineEvent::is_round_event);
        self.round_epoch += 1;

        if self.state.question_index + 1 >= self.questions.len() {
            self.state.status = GameStatus::Waiting;
            self.bump();
            tracing::info!("Last question finished, back to waiting");
            return true;
        }

        self.state.question_index += 1;
        self.state.status = GameStatus::Question;
        self.state.time_remaining_ms = self.config.round_duration_ms;
        self.state.reveal_percentage = 0.0;
        self.state.round_winner = None;
        self.bump();

        tracing::info!(
            "Round {} of {} started",
            self.state.question_index + 1,
            self.questions.len()
        );
        true
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Count the round down by `delta_ms` and update the reveal.
    /// No-op unless a question is open with time left.
    pub fn tick(&mut self, delta_ms: u64) {
        if self.state.status != GameStatus::Question || self.state.time_remaining_ms == 0 {
            return;
        }

        self.state.time_remaining_ms = self.state.time_remaining_ms.saturating_sub(delta_ms);

        if self.state.time_remaining_ms == 0 {
            self.state.reveal_percentage = 100.0;
            self.timeline.schedule(
                LEADERBOARD_DELAY_MS,
                TimelineEvent::ShowLeaderboard {
                    round_epoch: self.round_epoch,
                },
            );
            tracing::debug!(
                "Time is up for question {}",
                self.state.question_index + 1
            );
        } else {
            let pct = reveal_percentage(self.elapsed_ms(), self.config.reveal_interval_ms);
            // Never let the reveal go backwards
            self.state.reveal_percentage = self.state.reveal_percentage.max(pct);
        }
        self.bump();
    }

    /// Advance the engine clock by `delta_ms`, firing every transition that becomes due
    pub fn advance_clock(&mut self, delta_ms: u64) {
        let target = self.timeline.now_ms().saturating_add(delta_ms);
        while let Some(event) = self.timeline.pop_due(target) {
            self.apply_event(event);
        }
        self.timeline.set_now(target);
    }

    /// One beat of the driving clock: fire due transitions, then count down
    pub fn step(&mut self, delta_ms: u64) {
        let round_epoch = self.round_epoch;
        self.advance_clock(delta_ms);
        // A round that opened during this beat has not been running for `delta_ms`
        if self.round_epoch == round_epoch {
            self.tick(delta_ms);
        }
    }

    fn apply_event(&mut self, event: TimelineEvent) {
        match event {
            TimelineEvent::ShowLeaderboard { round_epoch } => {
                if round_epoch != self.round_epoch || self.state.status != GameStatus::Question {
                    tracing::debug!("Dropping stale leaderboard transition");
                    return;
                }
                self.state.status = GameStatus::Leaderboard;
                self.timeline.schedule(
                    self.config.leaderboard_duration_ms,
                    TimelineEvent::NextRound { round_epoch },
                );
                self.bump();
                tracing::info!(
                    "Showing leaderboard after question {}",
                    self.state.question_index + 1
                );
            }
            TimelineEvent::NextRound { round_epoch } => {
                if round_epoch != self.round_epoch
                    || self.state.status != GameStatus::Leaderboard
                {
                    tracing::debug!("Dropping stale next-round transition");
                    return;
                }
                self.advance_round();
            }
            TimelineEvent::DeclareWinner { game_epoch, winner } => {
                let running = matches!(
                    self.state.status,
                    GameStatus::Question | GameStatus::Leaderboard
                );
                if game_epoch != self.game_epoch || !running {
                    tracing::debug!("Dropping stale winner for {}", winner.name);
                    return;
                }
                self.timeline.cancel_where(TimelineEvent::is_round_event);
                self.round_epoch += 1;
                tracing::info!("{} wins the game with {} points", winner.name, winner.points);
                self.state.status = GameStatus::Winner;
                self.state.overall_winner = Some(winner);
                self.bump();
            }
        }
    }

    // =========================================================================
    // Answers
    // =========================================================================

    /// Record an audience comment and, while a question is open and unclaimed,
    /// score it if it matches the answer or one of its aliases
    pub fn submit_answer(&mut self, user: &str, text: &str) -> SubmitOutcome {
        self.push_comment(user, text);

        if self.state.status != GameStatus::Question || self.state.round_winner.is_some() {
            return SubmitOutcome::Ignored;
        }
        let Some(question) = self.questions.get(self.state.question_index) else {
            return SubmitOutcome::Ignored;
        };

        let guess = normalize_answer(text);
        let is_match = std::iter::once(&question.answer)
            .chain(question.aliases.iter())
            .any(|candidate| normalize_answer(candidate) == guess);

        if !is_match {
            tracing::debug!("Incorrect answer from {}: {}", user, text);
            return SubmitOutcome::Incorrect;
        }

        let points_earned = points_for_elapsed(self.elapsed_ms());
        let total = self.award_points(user, points_earned);
        self.state.round_winner = Some(Player::new(user, points_earned));

        let winner_pending = total >= self.config.win_points;
        if winner_pending {
            self.timeline.schedule(
                WINNER_DELAY_MS,
                TimelineEvent::DeclareWinner {
                    game_epoch: self.game_epoch,
                    winner: Player::new(user, total),
                },
            );
        }
        self.bump();

        tracing::info!(
            "{} answered question {} correctly: +{} ({} total)",
            user,
            self.state.question_index + 1,
            points_earned,
            total
        );

        SubmitOutcome::Correct {
            points_earned,
            total,
            winner_pending,
        }
    }

    fn push_comment(&mut self, user: &str, text: &str) {
        let comment = Comment {
            id: ulid::Ulid::new().to_string(),
            user: user.to_string(),
            text: text.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        self.comments.push_front(comment);
        self.comments.truncate(COMMENT_FEED_SIZE);
        self.bump();
    }

    /// Add points to `user`, creating the player on first correct answer.
    /// Returns the new running total.
    fn award_points(&mut self, user: &str, points: u32) -> u32 {
        match self.players.iter_mut().find(|p| p.id == user) {
            Some(player) => {
                player.points = player.points.saturating_add(points);
                player.points
            }
            None => {
                self.players.push(Player::new(user, points));
                points
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Players by points descending, ties in order of first correct answer, top 20
    pub fn leaderboard(&self) -> Vec<Player> {
        let mut ranked = self.players.clone();
        // sort_by is stable, so ties keep insertion order
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked.truncate(LEADERBOARD_SIZE);
        ranked
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let question = self.current_question().map(|q| QuestionView {
            number: self.state.question_index + 1,
            total: self.questions.len(),
            text: q.text.clone(),
            masked_answer: masked_answer(&q.answer, self.state.reveal_percentage),
            answer: (self.state.status == GameStatus::Leaderboard).then(|| q.answer.clone()),
        });

        EngineSnapshot {
            version: self.version,
            state: self.state.clone(),
            round_duration_ms: self.config.round_duration_ms,
            seconds_remaining: self.state.time_remaining_ms.div_ceil(1_000),
            question,
            players: self.players.clone(),
            leaderboard: self.leaderboard(),
            comments: self.comments.iter().cloned().collect(),
        }
    }
}
