use crate::{
    db::{queries, AgentPatch, AgentUpdate, Database, Mutation, NewAgent, Table},
    validation::{
        path_fields, validate, validate_both, CREATE, FULL_UPDATE, PARTIAL_UPDATE, PATH_CODE,
    },
    web::{
        body::RequestFields,
        reads::read_table,
        response::{ApiError, ApiResult, Envelope},
    },
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

const AGENT_NOT_FOUND: &str = "Agent not found in the database";
const AGENT_IS_NOT_FOUND: &str = "Agent is not found in the database";

/// GET /agents
pub async fn list_agents(State(db): State<Database>) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    read_table(&db, Table::Agents).await
}

/// POST /agents - insert a new agent; duplicate codes fail in the database
pub async fn create_agent(
    State(db): State<Database>,
    RequestFields(fields): RequestFields,
) -> ApiResult<Json<Envelope>> {
    let validated = validate(&CREATE, &fields).map_err(rejected)?;
    let agent = NewAgent::from(&validated);

    info!("Creating agent {}", agent.agent_code);

    let affected = run(&db, &Mutation::Insert(agent)).await?;
    if affected == 0 {
        error!("Insert reported no affected rows");
        return Err(ApiError::Database("Error inserting agent".to_string()));
    }

    Ok(Json(Envelope::ok()))
}

/// PUT /agents/{code} - replace every column except the code
pub async fn update_agent(
    State(db): State<Database>,
    code: Result<Path<String>, PathRejection>,
    RequestFields(fields): RequestFields,
) -> ApiResult<Json<Envelope>> {
    let Path(code) = code?;
    let (path, validated) = validate_both(
        validate(&PATH_CODE, &path_fields(&code)),
        validate(&FULL_UPDATE, &fields),
    )
    .map_err(rejected)?;

    let mutation = Mutation::Update {
        code: path.text("code"),
        agent: AgentUpdate::from(&validated),
    };
    keyed_write(&db, mutation, AGENT_NOT_FOUND).await
}

/// PATCH /agents/{code} - work area and commission only
pub async fn patch_agent(
    State(db): State<Database>,
    code: Result<Path<String>, PathRejection>,
    RequestFields(fields): RequestFields,
) -> ApiResult<Json<Envelope>> {
    let Path(code) = code?;
    let (path, validated) = validate_both(
        validate(&PATH_CODE, &path_fields(&code)),
        validate(&PARTIAL_UPDATE, &fields),
    )
    .map_err(rejected)?;

    let mutation = Mutation::Patch {
        code: path.text("code"),
        patch: AgentPatch::from(&validated),
    };
    keyed_write(&db, mutation, AGENT_IS_NOT_FOUND).await
}

/// DELETE /agents/{code}
pub async fn delete_agent(
    State(db): State<Database>,
    code: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope>> {
    let Path(code) = code?;
    let path = validate(&PATH_CODE, &path_fields(&code)).map_err(rejected)?;

    let mutation = Mutation::Delete {
        code: path.text("code"),
    };
    keyed_write(&db, mutation, AGENT_IS_NOT_FOUND).await
}

// Zero rows affected is the only not-found signal, even when the row exists
// and the update changed nothing.
async fn keyed_write(
    db: &Database,
    mutation: Mutation,
    not_found: &'static str,
) -> ApiResult<Json<Envelope>> {
    info!("Agent {} requested", mutation.kind());

    let affected = run(db, &mutation).await?;
    if affected == 0 {
        warn!("Agent {} matched no rows", mutation.kind());
        return Err(ApiError::NotFound(not_found));
    }

    Ok(Json(Envelope::ok()))
}

async fn run(db: &Database, mutation: &Mutation) -> ApiResult<u64> {
    queries::execute_mutation(db, mutation).await.map_err(|e| {
        error!("Agent {} failed: {}", mutation.kind(), e);
        ApiError::from(e)
    })
}

fn rejected(errors: Vec<crate::validation::FieldError>) -> ApiError {
    warn!("Rejected agent request with {} validation error(s)", errors.len());
    ApiError::from(errors)
}
