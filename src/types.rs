use serde::{Deserialize, Serialize};

/// Opaque ID types for readability
pub type PlayerId = String;
pub type CommentId = String;

/// A trivia question as supplied by the question file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub text: String,
    pub answer: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Audience member who has answered at least one question correctly.
/// Identity is the username the comment arrived with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
}

impl Player {
    pub fn new(user: &str, points: u32) -> Self {
        Self {
            id: user.to_string(),
            name: user.to_string(),
            points,
        }
    }
}

/// A single audience comment shown in the live feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub user: String,
    pub text: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Waiting,
    Question,
    Leaderboard,
    Winner,
}

/// Authoritative state of the current round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundState {
    pub status: GameStatus,
    pub question_index: usize,
    pub time_remaining_ms: u64,
    /// 0..=100
    pub reveal_percentage: f64,
    /// Credited with the per-round delta, not the running total
    pub round_winner: Option<Player>,
    pub overall_winner: Option<Player>,
}

impl RoundState {
    pub fn initial(status: GameStatus, round_duration_ms: u64) -> Self {
        Self {
            status,
            question_index: 0,
            time_remaining_ms: round_duration_ms,
            reveal_percentage: 0.0,
            round_winner: None,
            overall_winner: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Beamer,
}
