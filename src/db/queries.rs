use super::models::*;
use super::rows::row_to_json;
use crate::db::Database;
use serde_json::{Map, Value};
use sqlx::query;

/// A keyed write against the `agents` table.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Insert(NewAgent),
    Update { code: String, agent: AgentUpdate },
    Patch { code: String, patch: AgentPatch },
    Delete { code: String },
}

/// SQL text with `?` placeholders and the values bound to them, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: &'static str,
    pub args: Vec<Option<String>>,
}

const INSERT_AGENT: &str = "INSERT INTO agents \
     (AGENT_CODE, AGENT_NAME, WORKING_AREA, COMMISSION, PHONE_NO, COUNTRY) \
     VALUES (?, ?, ?, ?, ?, ?)";

const UPDATE_AGENT: &str = "UPDATE agents \
     SET AGENT_NAME = ?, WORKING_AREA = ?, COMMISSION = ?, PHONE_NO = ?, COUNTRY = ? \
     WHERE AGENT_CODE = ?";

const PATCH_AGENT: &str = "UPDATE agents SET WORKING_AREA = ?, COMMISSION = ? WHERE AGENT_CODE = ?";

const DELETE_AGENT: &str = "DELETE FROM agents WHERE AGENT_CODE = ?";

impl Mutation {
    pub fn statement(&self) -> Statement {
        match self {
            Mutation::Insert(agent) => Statement {
                sql: INSERT_AGENT,
                args: vec![
                    Some(agent.agent_code.clone()),
                    Some(agent.agent_name.clone()),
                    Some(agent.work_area.clone()),
                    Some(agent.commission.clone()),
                    agent.phone_no.clone(),
                    Some(agent.country.clone()),
                ],
            },
            Mutation::Update { code, agent } => Statement {
                sql: UPDATE_AGENT,
                args: vec![
                    Some(agent.agent_name.clone()),
                    Some(agent.work_area.clone()),
                    Some(agent.commission.clone()),
                    agent.phone_no.clone(),
                    Some(agent.country.clone()),
                    Some(code.clone()),
                ],
            },
            Mutation::Patch { code, patch } => Statement {
                sql: PATCH_AGENT,
                args: vec![
                    Some(patch.work_area.clone()),
                    Some(patch.commission.clone()),
                    Some(code.clone()),
                ],
            },
            Mutation::Delete { code } => Statement {
                sql: DELETE_AGENT,
                args: vec![Some(code.clone())],
            },
        }
    }

    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Insert(_) => "insert",
            Mutation::Update { .. } => "update",
            Mutation::Patch { .. } => "patch",
            Mutation::Delete { .. } => "delete",
        }
    }
}

/// Runs one mutation on one pooled connection and returns the rows affected.
pub async fn execute_mutation(db: &Database, mutation: &Mutation) -> Result<u64, sqlx::Error> {
    let statement = mutation.statement();
    let mut conn = db.acquire().await?;

    let mut prepared = query(statement.sql);
    for arg in statement.args {
        prepared = prepared.bind(arg);
    }

    // conn goes back to the pool when it drops, on success or error
    let result = prepared.execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// Every row of `table`, each as a column-name keyed JSON object.
pub async fn fetch_table(db: &Database, table: Table) -> Result<Vec<Map<String, Value>>, sqlx::Error> {
    let sql = format!("SELECT * FROM {}", table.name());
    let mut conn = db.acquire().await?;

    let rows = query(&sql).fetch_all(&mut *conn).await?;
    rows.iter().map(row_to_json).collect()
}
