// [library] Axum web framework routing components
use axum::{
    extract::FromRef,     // [library] State extraction trait
    http::StatusCode,     // [library] Status for the catch-all route
    routing::{get, put},  // [library] HTTP method routing builders
    Router,               // [library] HTTP request router for URL pattern matching
};

// [business] Import application modules for dependency injection and routing
use crate::{
    config::Config, // [business] Application configuration
    db::Database,   // [business] Database connection pool
    web::{
        create_agent, delete_agent, docs_handler, list_agents, list_customers, list_orders,
        patch_agent, update_agent,
    },
};

// [business] Application state combining the pool and configuration
// The pool is created once at startup and every handler receives a clone of the handle
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }
}

// [library] Implement FromRef to allow Axum to extract Database from AppState
impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

// [library] Implement FromRef to allow Axum to extract Config from AppState
impl FromRef<AppState> for Config {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

// [business] Create the HTTP router for the agents, customers and orders resources
pub fn create_app_router(db: Database, config: Config) -> Router {
    let app_state = AppState::new(db, config);
    Router::new()
        .route("/", get(welcome).fallback(not_found))
        .route("/health", get(health_check).fallback(not_found)) // [business] Health check for load balancers
        .route("/docs", get(docs_handler).fallback(not_found)) // [business] OpenAPI description
        // [business] Agents - the only resource with write operations
        .route(
            "/agents",
            get(list_agents).post(create_agent).fallback(not_found),
        )
        .route(
            "/agents/:code",
            put(update_agent)
                .patch(patch_agent)
                .delete(delete_agent)
                .fallback(not_found),
        )
        // [business] Read-only resources
        .route("/customers", get(list_customers).fallback(not_found))
        .route("/orders", get(list_orders).fallback(not_found))
        // [business] Anything else is a plain-text 404
        .fallback(not_found)
        // [library] Dependency injection - make pool and config available to all handlers
        .with_state(app_state)
}

async fn welcome() -> &'static str {
    "Welcome!"
}

// [business] Returns "OK" while the process is up; does not touch the database
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Error! 404 request not found!")
}
