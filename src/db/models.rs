// [library] Serde - Serialize for logging/echoing payloads, Deserialize for typed test fixtures
use serde::{Deserialize, Serialize};

use crate::validation::Validated;

// [business] Agent row as inserted by POST /agents
// agentCode is supplied by the caller, never generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAgent {
    pub agent_code: String,
    pub agent_name: String,
    pub work_area: String,
    pub commission: String, // [business] Numeric-like text, stored as given
    pub phone_no: Option<String>, // [rust] None binds SQL NULL
    pub country: String,
}

// [business] Columns replaced by PUT /agents/{code} - everything except the code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpdate {
    pub agent_name: String,
    pub work_area: String,
    pub commission: String,
    pub phone_no: Option<String>,
    pub country: String,
}

// [business] Columns touched by PATCH /agents/{code}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPatch {
    pub work_area: String,
    pub commission: String,
}

// [rust] Conversions from a passed rule set; required fields are present by construction
impl From<&Validated> for NewAgent {
    fn from(fields: &Validated) -> Self {
        Self {
            agent_code: fields.text("agentCode"),
            agent_name: fields.text("agentName"),
            work_area: fields.text("workArea"),
            commission: fields.text("commission"),
            phone_no: fields.optional("phoneNo"),
            country: fields.text("country"),
        }
    }
}

impl From<&Validated> for AgentUpdate {
    fn from(fields: &Validated) -> Self {
        Self {
            agent_name: fields.text("agentName"),
            work_area: fields.text("workArea"),
            commission: fields.text("commission"),
            phone_no: fields.optional("phoneNo"),
            country: fields.text("country"),
        }
    }
}

impl From<&Validated> for AgentPatch {
    fn from(fields: &Validated) -> Self {
        Self {
            work_area: fields.text("workArea"),
            commission: fields.text("commission"),
        }
    }
}

// [business] The three tables exposed by the read endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Agents,
    Customers,
    Orders,
}

impl Table {
    // [security] Fixed identifiers only - table names never come from the request
    pub fn name(self) -> &'static str {
        match self {
            Table::Agents => "agents",
            Table::Customers => "customer",
            Table::Orders => "orders",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate, CREATE, PARTIAL_UPDATE};
    use serde_json::json;

    #[test]
    fn test_new_agent_from_validated_fields() {
        let body = json!({
            "agentCode": " A001 ",
            "agentName": "Alice",
            "workArea": "Delhi",
            "commission": "0.10",
            "country": "India"
        });
        let validated = validate(&CREATE, body.as_object().unwrap()).unwrap();
        let agent = NewAgent::from(&validated);

        assert_eq!(agent.agent_code, "A001");
        assert_eq!(agent.phone_no, None);
        assert_eq!(agent.country, "India");
    }

    #[test]
    fn test_patch_from_validated_fields() {
        let body = json!({"workArea": "Mumbai", "commission": "0.12", "agentName": "ignored"});
        let validated = validate(&PARTIAL_UPDATE, body.as_object().unwrap()).unwrap();
        assert_eq!(
            AgentPatch::from(&validated),
            AgentPatch {
                work_area: "Mumbai".to_string(),
                commission: "0.12".to_string(),
            }
        );
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Agents.name(), "agents");
        assert_eq!(Table::Customers.name(), "customer");
        assert_eq!(Table::Orders.name(), "orders");
    }
}
