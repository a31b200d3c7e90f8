// [rust] Module declarations - organize database-related functionality
pub mod models; // Agent write payloads and the read-only table list
pub mod queries; // Mutation builder and statement execution
pub mod rows; // Dynamic row to JSON conversion for read endpoints

// [rust] Re-export so handlers can import from db:: directly
pub use models::*;
pub use queries::*;

use crate::config::Config;

// [library] SQLx - async SQL toolkit; MySqlPoolOptions bounds the pool
use sqlx::{mysql::MySqlPoolOptions, MySql, Pool};
use std::sync::Arc;

// [rust] Shared handle to the connection pool
// Arc lets every handler hold the same pool; the pool itself is the only cross-request state
pub type Database = Arc<Pool<MySql>>;

// [business] Opens the pool at startup and checks one connection out to fail fast
// on bad credentials. The caller owns the pool and closes it on shutdown.
pub async fn create_pool(config: &Config) -> Result<Database, sqlx::Error> {
    let pool = pool_options(config)
        .connect(config.database_url())
        .await?;

    Ok(Arc::new(pool))
}

// [business] Builds the pool without opening any connection until the first statement runs
pub fn create_lazy_pool(config: &Config) -> Result<Database, sqlx::Error> {
    let pool = pool_options(config).connect_lazy(config.database_url())?;
    Ok(Arc::new(pool))
}

// [business] Waits for checked-out connections to come back, then closes them
pub async fn close_pool(db: &Database) {
    db.close().await;
}

fn pool_options(config: &Config) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.acquire_timeout())
}
