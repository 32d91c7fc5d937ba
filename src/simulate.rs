//! Audience comment sources
//!
//! The engine only sees `(user, text)` pairs through [`crate::state::AppState::submit_answer`].
//! Where they come from is pluggable: a random simulated audience for the live
//! show, or a fixed script for tests.

use std::collections::VecDeque;
use std::ops::Range;
use std::time::Duration;

use rand::Rng;

use crate::config::COMMENT_INTERVAL_MS;
use crate::types::Question;

/// Wrong answers the simulated audience throws in
const DISTRACTORS: &[&str] = &["diamond", "creeper", "enderman", "nether", "obsidian"];

/// Used when name generation comes up empty
const FALLBACK_USERNAMES: &[&str] = &[
    "Player1",
    "MinecraftFan",
    "BlockBuilder",
    "CrafterPro",
    "PixelMaster",
    "RedstoneKing",
];

const DEFAULT_AUDIENCE_SIZE: usize = 8;

/// One comment from the audience
#[derive(Debug, Clone, PartialEq)]
pub struct AudienceAnswer {
    pub user: String,
    pub text: String,
}

impl AudienceAnswer {
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            text: text.into(),
        }
    }
}

/// Source of audience comments consumed by the comment task
pub trait AnswerSource: Send {
    /// Next comment for the question on screen, or `None` to stay quiet this time
    fn next_answer(&mut self, question: &Question) -> Option<AudienceAnswer>;

    /// How long to wait before asking for the next comment
    fn next_delay(&mut self) -> Duration;
}

/// Random usernames guessing from a small answer pool that includes the right one
#[derive(Debug, Clone)]
pub struct SimulatedAudience {
    usernames: Vec<String>,
    interval_ms: Range<u64>,
}

impl Default for SimulatedAudience {
    fn default() -> Self {
        Self::generated(DEFAULT_AUDIENCE_SIZE)
    }
}

impl SimulatedAudience {
    pub fn new(usernames: Vec<String>) -> Self {
        let usernames = if usernames.is_empty() {
            FALLBACK_USERNAMES.iter().map(|s| s.to_string()).collect()
        } else {
            usernames
        };
        Self {
            usernames,
            interval_ms: COMMENT_INTERVAL_MS,
        }
    }

    /// Audience of `size` members with friendly generated names
    pub fn generated(size: usize) -> Self {
        let usernames: Vec<String> = (0..size)
            .filter_map(|_| petname::petname(2, "_"))
            .collect();
        tracing::debug!("Simulated audience: {:?}", usernames);
        Self::new(usernames)
    }

    pub fn usernames(&self) -> &[String] {
        &self.usernames
    }
}

impl AnswerSource for SimulatedAudience {
    fn next_answer(&mut self, question: &Question) -> Option<AudienceAnswer> {
        let mut rng = rand::rng();
        let user = &self.usernames[rng.random_range(0..self.usernames.len())];

        // The right answer is one more entry in the pool
        let pick = rng.random_range(0..=DISTRACTORS.len());
        let text = DISTRACTORS
            .get(pick)
            .map(|s| s.to_string())
            .unwrap_or_else(|| question.answer.clone());

        Some(AudienceAnswer::new(user.clone(), text))
    }

    fn next_delay(&mut self) -> Duration {
        let ms = rand::rng().random_range(self.interval_ms.clone());
        Duration::from_millis(ms)
    }
}

/// Plays back a fixed list of comments at a fixed pace
#[derive(Debug, Clone)]
pub struct ScriptedAnswers {
    script: VecDeque<AudienceAnswer>,
    delay: Duration,
}

impl ScriptedAnswers {
    pub fn new(script: impl IntoIterator<Item = AudienceAnswer>, delay: Duration) -> Self {
        Self {
            script: script.into_iter().collect(),
            delay,
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl AnswerSource for ScriptedAnswers {
    fn next_answer(&mut self, _question: &Question) -> Option<AudienceAnswer> {
        self.script.pop_front()
    }

    fn next_delay(&mut self) -> Duration {
        self.delay
    }
}
