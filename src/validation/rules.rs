use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Where a validated field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One failed rule, reported back to the caller in the 422 body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Rule primitives, evaluated in order for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Absent, null or blank after trimming fails.
    Required,
    /// Absent, null or falsy (`""`, `false`, `0`) skips the remaining rules.
    Optional,
    /// Trimmed value must be ASCII digits only.
    Numeric,
    /// Trimmed value must be at least this many characters.
    MinLength(usize),
    /// Trim and HTML-escape the value that is handed downstream.
    Sanitize,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub message: &'static str,
    pub rules: &'static [Rule],
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub name: &'static str,
    pub location: Location,
    pub fields: &'static [FieldRules],
}

/// Field values that passed a rule set, after sanitization.
///
/// Optional fields that were skipped are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    values: BTreeMap<&'static str, String>,
}

impl Validated {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Owned copy of a field the rule set marked required.
    pub fn text(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    pub fn optional(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }
}

/// Runs every field of `set` against `input`, collecting at most one error per field.
pub fn validate(set: &RuleSet, input: &Map<String, Value>) -> Result<Validated, Vec<FieldError>> {
    let mut validated = Validated::default();
    let mut errors = Vec::new();

    for field in set.fields {
        let raw = input.get(field.field);
        match check_field(field, raw) {
            Ok(Some(value)) => {
                validated.values.insert(field.field, value);
            }
            Ok(None) => {}
            Err(()) => errors.push(FieldError {
                field: field.field.to_string(),
                message: field.message.to_string(),
                location: set.location,
                value: raw.cloned(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        tracing::debug!(rule_set = set.name, failures = errors.len(), "validation rejected");
        Err(errors)
    }
}

/// Combines two independent validation passes, keeping errors from both in order.
pub fn validate_both(
    first: Result<Validated, Vec<FieldError>>,
    second: Result<Validated, Vec<FieldError>>,
) -> Result<(Validated, Validated), Vec<FieldError>> {
    match (first, second) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(a), Ok(_)) => Err(a),
        (Ok(_), Err(b)) => Err(b),
        (Err(mut a), Err(b)) => {
            a.extend(b);
            Err(a)
        }
    }
}

fn check_field(field: &FieldRules, raw: Option<&Value>) -> Result<Option<String>, ()> {
    let mut value = match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => return Err(()),
    };

    for rule in field.rules {
        match rule {
            Rule::Optional => {
                if is_falsy(raw) {
                    return Ok(None);
                }
            }
            Rule::Required => {
                if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                    return Err(());
                }
            }
            Rule::Numeric => {
                let trimmed = value.as_deref().unwrap_or_default().trim();
                if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
                    return Err(());
                }
            }
            Rule::MinLength(min) => {
                let trimmed = value.as_deref().unwrap_or_default().trim();
                if trimmed.chars().count() < *min {
                    return Err(());
                }
            }
            Rule::Sanitize => {
                value = value.map(|v| sanitize(&v));
            }
        }
    }

    Ok(value)
}

fn is_falsy(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Trims surrounding whitespace and escapes characters with meaning in HTML.
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
