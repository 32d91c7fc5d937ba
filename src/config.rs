//! Runtime configuration loaded from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Period of the countdown clock
pub const TICK_INTERVAL_MS: u64 = 100;
/// Delay between the countdown reaching zero and the leaderboard showing
pub const LEADERBOARD_DELAY_MS: u64 = 100;
/// Delay between a threshold-crossing answer and the winner screen
pub const WINNER_DELAY_MS: u64 = 1_000;
/// Number of comments kept in the live feed
pub const COMMENT_FEED_SIZE: usize = 5;
/// Number of players shown on the leaderboard
pub const LEADERBOARD_SIZE: usize = 20;
/// Simulated comments arrive every [min, max) milliseconds
pub const COMMENT_INTERVAL_MS: std::ops::Range<u64> = 2_000..5_000;

/// Timing and scoring knobs of the round engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub round_duration_ms: u64,
    pub leaderboard_duration_ms: u64,
    pub reveal_interval_ms: u64,
    /// Cumulative points that end the game
    pub win_points: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            round_duration_ms: 25_000,
            leaderboard_duration_ms: 10_000,
            reveal_interval_ms: 2_500,
            win_points: 150,
        }
    }
}

impl EngineConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(TICK_INTERVAL_MS)
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub bind_addr: SocketAddr,
    pub questions_path: PathBuf,
    pub static_dir: PathBuf,
    /// Whether operator controls are exposed at all
    pub admin_enabled: bool,
    /// Start a game as soon as the server is up
    pub autostart: bool,
    pub engine: EngineConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 6574)),
            questions_path: PathBuf::from("data/questions.json"),
            static_dir: PathBuf::from("static"),
            admin_enabled: true,
            autostart: false,
            engine: EngineConfig::default(),
        }
    }
}

impl QuizConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = match non_empty_var("QUIZ_BIND") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Invalid QUIZ_BIND '{}': {}, using default", raw, e);
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let engine = EngineConfig {
            round_duration_ms: duration_var("QUIZ_ROUND_MS", defaults.engine.round_duration_ms),
            leaderboard_duration_ms: duration_var(
                "QUIZ_LEADERBOARD_MS",
                defaults.engine.leaderboard_duration_ms,
            ),
            reveal_interval_ms: duration_var(
                "QUIZ_REVEAL_INTERVAL_MS",
                defaults.engine.reveal_interval_ms,
            ),
            win_points: non_empty_var("QUIZ_WIN_POINTS")
                .and_then(|raw| parse_positive(&raw, "QUIZ_WIN_POINTS"))
                .map(|v| v as u32)
                .unwrap_or(defaults.engine.win_points),
        };

        Self {
            bind_addr,
            questions_path: non_empty_var("QUIZ_QUESTIONS")
                .map(PathBuf::from)
                .unwrap_or(defaults.questions_path),
            static_dir: non_empty_var("QUIZ_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            admin_enabled: flag_var("QUIZ_ADMIN", defaults.admin_enabled),
            autostart: flag_var("QUIZ_AUTOSTART", defaults.autostart),
            engine,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn flag_var(name: &str, default: bool) -> bool {
    non_empty_var(name)
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(default)
}

fn duration_var(name: &str, default: u64) -> u64 {
    non_empty_var(name)
        .and_then(|raw| parse_positive(&raw, name))
        .unwrap_or(default)
}

fn parse_positive(raw: &str, name: &str) -> Option<u64> {
    match raw.parse::<u64>() {
        Ok(0) => {
            tracing::warn!("{} must be greater than zero, using default", name);
            None
        }
        Ok(v) if v > u32::MAX as u64 => {
            tracing::warn!("{} is too large, using default", name);
            None
        }
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Invalid {} '{}': {}, using default", name, raw, e);
            None
        }
    }
}
