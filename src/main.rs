mod config;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();

    // Demo mode when the completion API key is missing; never fatal.
    let assistant = services::assistant::from_env();
    let state_mode = assistant.mode();
    let rate_limiter = rate_limit::RateLimiter::new(rate_limit::RateLimitConfig::from_env());
    let general_limiter = rate_limit::RateLimiter::new(rate_limit::RateLimitConfig::general_from_env());
    let state = state::AppState::new(assistant, rate_limiter).with_general_limiter(general_limiter);

    let app = routes::app(state, &config.app_url);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(
        port = config.port,
        app_url = %config.app_url,
        mode = ?state_mode,
        "pythoughts assistant listening"
    );
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
