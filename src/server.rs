use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{api, auth::AuthConfig, config::QuizConfig, state::AppState, ws};

/// Build the HTTP router: display socket, query API, static assets and
/// (when the admin gate is on) the authenticated operator socket
pub fn build_router(
    state: Arc<AppState>,
    config: &QuizConfig,
    auth_config: Arc<AuthConfig>,
) -> Router {
    let mut app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/state", get(api::get_state))
        .route("/api/leaderboard", get(api::get_leaderboard));

    if config.admin_enabled {
        let host_routes = Router::new()
            .route("/host/ws", get(ws::host_ws_handler))
            .layer(middleware::from_fn_with_state(
                auth_config,
                crate::auth::host_auth_middleware,
            ));
        app = app.merge(host_routes);
    } else {
        tracing::info!("Admin controls disabled, running unattended");
    }

    app.fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
