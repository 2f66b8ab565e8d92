use serde::Serialize;
use serde_json::Value;

use super::{describe, Validator};
use crate::error::Violation;

/// Membership in a fixed, ordered set of strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EnumeratedString {
    #[serde(rename = "enum")]
    pub options: &'static [&'static str],
}

impl EnumeratedString {
    pub const fn new(options: &'static [&'static str]) -> Self {
        assert!(!options.is_empty(), "EnumeratedString: empty option set");
        Self { options }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| *o == value)
    }

    fn not_a_member(&self, value: String) -> Violation {
        Violation::Membership {
            value,
            options: self.options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Validator for EnumeratedString {
    type Value = String;

    fn validate(&self, candidate: &String) -> Result<(), Violation> {
        if self.contains(candidate) {
            Ok(())
        } else {
            Err(self.not_a_member(candidate.clone()))
        }
    }

    fn coerce(&self, candidate: &Value) -> Result<String, Violation> {
        match candidate {
            Value::String(s) => Ok(s.clone()),
            // a non-string is simply not one of the options
            other => Err(self.not_a_member(describe(other))),
        }
    }
}
