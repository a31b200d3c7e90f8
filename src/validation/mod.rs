// [rust] Field validation - ordered rule lists checked before any statement is built
pub mod rules; // Rule primitives, evaluation and sanitization
pub mod sets; // The agent rule sets: create, fullUpdate, partialUpdate, pathCode

pub use rules::{
    sanitize, validate, validate_both, FieldError, FieldRules, Location, Rule, RuleSet, Validated,
};
pub use sets::{path_fields, CREATE, FULL_UPDATE, PARTIAL_UPDATE, PATH_CODE};
