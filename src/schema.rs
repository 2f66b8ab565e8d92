// Declaration-ordered rule table for the recipe, plus a JSON-schema-ish view of it.
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::Violation;
use crate::recipe::{BUNS, CHEESE, CUTLETS, EGGS, SAUCE, TOMATOES};
use crate::validator::{BoundedNumber, EnumeratedString, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Rule {
    #[serde(rename = "integer")]
    Bounded(BoundedNumber),
    #[serde(rename = "string")]
    Enumerated(EnumeratedString),
}

impl Rule {
    /// Check a JSON candidate without keeping the narrowed value.
    pub fn check(&self, candidate: &Value) -> Result<(), Violation> {
        match self {
            Rule::Bounded(rule) => rule.accept(candidate).map(drop),
            Rule::Enumerated(rule) => rule.accept(candidate).map(drop),
        }
    }
}

/// Field name → rule, in declaration order.
pub static RULES: Lazy<IndexMap<&'static str, Rule>> = Lazy::new(|| {
    let mut rules = IndexMap::new();
    for field in [&BUNS, &CHEESE, &TOMATOES, &CUTLETS, &EGGS] {
        rules.insert(field.name, Rule::Bounded(field.rule));
    }
    rules.insert(SAUCE.name, Rule::Enumerated(SAUCE.rule));
    rules
});

pub fn emit_schema() -> Value {
    let required: Vec<&str> = RULES.keys().copied().collect();
    json!({
        "title": "Burger",
        "type": "object",
        "properties": &*RULES,
        "required": required,
        "additionalProperties": false,
    })
}
