use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizdash::{
    auth, broadcast, config::QuizConfig, questions::QuestionSet, server,
    simulate::SimulatedAudience, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizdash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QuizDash...");

    let config = QuizConfig::from_env();
    let auth_config = Arc::new(auth::AuthConfig::from_env());

    let questions = match QuestionSet::load(&config.questions_path) {
        Ok(questions) => questions,
        Err(e) => {
            tracing::error!(
                "Cannot load questions from {}: {}",
                config.questions_path.display(),
                e
            );
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(questions, config.engine.clone()));
    if config.autostart {
        state.start_game().await;
    }

    // Background stimuli: the round clock and the simulated audience
    broadcast::spawn_round_clock(state.clone());
    broadcast::spawn_comment_simulator(state.clone(), SimulatedAudience::default());

    let app = server::build_router(state, &config, auth_config);

    tracing::info!("Listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
