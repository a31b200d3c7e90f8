// [library] Error handling crate - `Result<T>` is `Result<T, anyhow::Error>` for startup failures
use anyhow::Result;

// [library] HTTP utilities from axum web framework
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE}, // [business] Headers browsers send with JSON requests
    HeaderValue,
    Method,
};

// [business] Library modules - configuration, pool lifecycle and the router
use agents_api::{
    config::Config,
    db::{close_pool, create_pool},
    web,
};

// [library] Tower ecosystem - middleware for HTTP servers
use tower_http::{
    cors::{AllowOrigin, CorsLayer}, // [security] Cross-Origin Resource Sharing middleware
    trace::TraceLayer,              // [library] HTTP request/response logging middleware
};

// [library] Structured logging framework
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // [library] Initialize structured logging; RUST_LOG overrides the default filter
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("agents_api=info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting agents API");

    // [business] Load application configuration from environment variables
    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // [business] The pool is opened here and owned by main until shutdown
    info!("Connecting to database...");
    let db = create_pool(&config).await?;
    info!(
        "Database pool ready (max {} connections)",
        config.db_max_connections
    );

    let cors = cors_layer(&config);

    let app = web::create_app_router(db.clone(), config)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("Server listening on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // [business] In-flight statements have finished; release every connection
    info!("Shutting down, closing database pool");
    close_pool(&db).await;

    Ok(())
}

// [security] Any origin by default; a configured list restricts it
fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let allowed_origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(allowed_origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ACCEPT, CONTENT_TYPE])
}

// [rust] Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
