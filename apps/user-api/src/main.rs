use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use user_api::config::ServerConfig;
use user_api::constants::{ENV, SERVICE};
use user_api::router::build_router;
use user_api::shutdown::{drain_deadline, shutdown_signal};
use user_api::state::AppState;
use user_api::telemetry::init_tracing;
use user_lib::repository::traits::UserRepositoryTrait;
use user_lib::repository::{MemoryUserRepository, UserRepository};
use user_lib::util::connect_with_retry;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let env = std::env::var(ENV)
        .map_err(|_| format!("{} environment variable must be set", ENV))?;

    init_tracing(&env)?;
    tracing::info!(service = SERVICE, env = %env, "tracing initialized");

    let config = ServerConfig::from_env()?;
    let middleware_config = &config.middleware;
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    let user_repo: Arc<dyn UserRepositoryTrait> = match &config.database_url {
        Some(database_url) => {
            let pool = connect_with_retry(database_url, config.database_connect_retries).await?;
            Arc::new(UserRepository::new(pool))
        }
        None => {
            tracing::warn!("no database configured, users are kept in memory and lost on exit");
            Arc::new(MemoryUserRepository::new())
        }
    };

    let state = AppState::new(user_repo, config.env.clone());
    let mut app = build_router(state, middleware_config);

    // Rate limiting is outermost. 60000ms / requests_per_minute between refills.
    let replenish_interval_ms = 60_000 / u64::from(middleware_config.rate_limit_per_minute);
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_interval_ms.max(1))
            .burst_size(middleware_config.rate_limit_burst)
            .finish()
            .ok_or("failed to build rate limiter configuration")?,
    );
    app = app.layer(GovernorLayer {
        config: governor_conf,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!(
        "user-api is ready to accept requests at: http://127.0.0.1:{}",
        config.port
    );

    let (started_tx, started_rx) = oneshot::channel();
    let server = async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal(started_tx))
        .await
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| format!("Server error: {}", e))?;
            tracing::info!("server stopped");
        }
        _ = drain_deadline(started_rx, middleware_config.shutdown_timeout) => {
            tracing::warn!(
                timeout_secs = middleware_config.shutdown_timeout.as_secs(),
                "shutdown deadline reached, dropping remaining connections"
            );
        }
    }

    Ok(())
}
