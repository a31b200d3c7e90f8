use super::rules::{FieldRules, Location, Rule, RuleSet};
use serde_json::{Map, Value};

const REQUIRED: &[Rule] = &[Rule::Required, Rule::Sanitize];
const PHONE_RULES: &[Rule] = &[
    Rule::Optional,
    Rule::Numeric,
    Rule::MinLength(10),
    Rule::Sanitize,
];

pub const AGENT_CODE: FieldRules = FieldRules {
    field: "agentCode",
    message: "Agent Code is required and cannot be empty",
    rules: REQUIRED,
};

pub const AGENT_NAME: FieldRules = FieldRules {
    field: "agentName",
    message: "agentName is missing",
    rules: REQUIRED,
};

pub const WORK_AREA: FieldRules = FieldRules {
    field: "workArea",
    message: "workArea is missing",
    rules: REQUIRED,
};

pub const COMMISSION: FieldRules = FieldRules {
    field: "commission",
    message: "commission is missing",
    rules: REQUIRED,
};

pub const PHONE_NO: FieldRules = FieldRules {
    field: "phoneNo",
    message: "Phone Number should be a number of length 10",
    rules: PHONE_RULES,
};

pub const COUNTRY: FieldRules = FieldRules {
    field: "country",
    message: "country is missing",
    rules: REQUIRED,
};

pub const CODE: FieldRules = FieldRules {
    field: "code",
    message: "Agent Code is required and cannot be empty",
    rules: REQUIRED,
};

/// POST /agents
pub const CREATE: RuleSet = RuleSet {
    name: "create",
    location: Location::Body,
    fields: &[AGENT_CODE, AGENT_NAME, WORK_AREA, COMMISSION, PHONE_NO, COUNTRY],
};

/// PUT /agents/{code}
pub const FULL_UPDATE: RuleSet = RuleSet {
    name: "fullUpdate",
    location: Location::Body,
    fields: &[AGENT_NAME, WORK_AREA, COMMISSION, PHONE_NO, COUNTRY],
};

/// PATCH /agents/{code}
pub const PARTIAL_UPDATE: RuleSet = RuleSet {
    name: "partialUpdate",
    location: Location::Body,
    fields: &[WORK_AREA, COMMISSION],
};

/// The `{code}` segment of every keyed write.
pub const PATH_CODE: RuleSet = RuleSet {
    name: "pathCode",
    location: Location::Params,
    fields: &[CODE],
};

/// Wraps a path segment so it can run through [`PATH_CODE`].
pub fn path_fields(code: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(CODE.field.to_string(), Value::String(code.to_string()));
    fields
}
