use crate::config::Config;
use crate::validation::{Rule, RuleSet, CREATE, FULL_UPDATE, PARTIAL_UPDATE};
use axum::{extract::State, response::Json};
use serde_json::{json, Map, Value};
use tracing::info;

/// GET /docs
/// Returns the OpenAPI 3.0 description of the routes
pub async fn docs_handler(State(config): State<Config>) -> Json<Value> {
    info!("API documentation requested");
    Json(create_openapi_document(&config))
}

fn create_openapi_document(config: &Config) -> Value {
    let code_param = json!([{
        "in": "path",
        "name": "code",
        "required": true,
        "description": "Agent Code is required",
        "schema": { "type": "string" }
    }]);

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Agents API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "REST API over the agents, customer and orders tables"
        },
        "servers": [{ "url": format!("http://{}", config.bind_address()) }],
        "components": {
            "schemas": {
                "Agent": schema_for(&CREATE),
                "AgentPut": schema_for(&FULL_UPDATE),
                "AgentPatch": schema_for(&PARTIAL_UPDATE)
            }
        },
        "paths": {
            "/agents": {
                "get": {
                    "description": "return all agents",
                    "responses": {
                        "200": { "description": "array of agent rows" },
                        "500": { "description": "error fetching agents" }
                    }
                },
                "post": {
                    "description": "insert a record into agents",
                    "requestBody": body_ref("Agent"),
                    "responses": {
                        "200": { "description": "agent created" },
                        "422": { "description": "validation error" },
                        "500": { "description": "error inserting the agent" }
                    }
                }
            },
            "/agents/{code}": {
                "put": {
                    "description": "update every column of an agent",
                    "parameters": code_param.clone(),
                    "requestBody": body_ref("AgentPut"),
                    "responses": keyed_responses("agent updated")
                },
                "patch": {
                    "description": "update work area and commission of an agent",
                    "parameters": code_param.clone(),
                    "requestBody": body_ref("AgentPatch"),
                    "responses": keyed_responses("agent updated with commission and work area")
                },
                "delete": {
                    "description": "delete an agent",
                    "parameters": code_param,
                    "responses": keyed_responses("agent deleted")
                }
            },
            "/customers": {
                "get": {
                    "description": "return all customers",
                    "responses": {
                        "200": { "description": "array of customer rows" },
                        "500": { "description": "error in getting customers data" }
                    }
                }
            },
            "/orders": {
                "get": {
                    "description": "return all orders",
                    "responses": {
                        "200": { "description": "array of order rows" },
                        "500": { "description": "error in getting orders data" }
                    }
                }
            }
        }
    })
}

// Schemas come straight from the rule sets so the docs cannot drift from validation.
fn schema_for(set: &RuleSet) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in set.fields {
        let mut property = json!({ "type": "string" });
        if field.rules.contains(&Rule::Numeric) {
            property["pattern"] = json!("^[0-9]+$");
        }
        if let Some(min) = field.rules.iter().find_map(|rule| match rule {
            Rule::MinLength(n) => Some(*n),
            _ => None,
        }) {
            property["minLength"] = json!(min);
        }
        if field.rules.contains(&Rule::Required) {
            required.push(json!(field.field));
        }
        properties.insert(field.field.to_string(), property);
    }

    json!({ "type": "object", "properties": properties, "required": required })
}

fn body_ref(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{}", schema) }
            }
        }
    })
}

fn keyed_responses(success: &str) -> Value {
    json!({
        "200": { "description": success },
        "404": { "description": "agent not found in database" },
        "422": { "description": "validation error" },
        "500": { "description": "database error" }
    })
}
