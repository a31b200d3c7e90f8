use crate::{
    db::{queries, Database, Table},
    web::response::{ApiError, ApiResult},
};
use axum::{extract::State, response::Json};
use serde_json::{Map, Value};
use tracing::{error, info};

/// GET /customers
pub async fn list_customers(
    State(db): State<Database>,
) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    read_table(&db, Table::Customers).await
}

/// GET /orders
pub async fn list_orders(State(db): State<Database>) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    read_table(&db, Table::Orders).await
}

// Reads skip validation: one statement, rows or a driver error.
pub(crate) async fn read_table(
    db: &Database,
    table: Table,
) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    match queries::fetch_table(db, table).await {
        Ok(rows) => {
            info!("Fetched {} row(s) from {}", rows.len(), table.name());
            Ok(Json(rows))
        }
        Err(e) => {
            error!("Failed to read {}: {}", table.name(), e);
            Err(ApiError::from(e))
        }
    }
}
