mod config;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::HostConfig::from_env().expect("invalid host configuration");
    let addr = std::net::SocketAddr::new(config.host, config.port);

    let state = state::AppState::new(config);
    let shutdown = state.shutdown.clone();

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind");

    tracing::info!(%addr, "gistdesk listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                () = shutdown.notified() => tracing::info!("close requested by app"),
                _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
            }
        })
        .await
        .expect("server failed");
}
