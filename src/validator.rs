//! Field rules.
//!
//! A rule only holds its immutable parameters (bounds, option set); it never
//! stores the values it checks, so one rule instance can guard the same field
//! on every record of a type.
//!
//! Two entry points per rule:
//! - [`Validator::validate`] checks an already-typed candidate.
//! - [`Validator::accept`] takes a loosely-typed JSON candidate, rejects the
//!   wrong kinds, then validates.
pub mod num;
pub mod one_of;

use serde_json::Value;

use crate::error::Violation;

pub use num::BoundedNumber;
pub use one_of::EnumeratedString;

pub trait Validator {
    type Value: Clone + PartialEq + std::fmt::Debug;

    fn validate(&self, candidate: &Self::Value) -> Result<(), Violation>;

    /// Narrow a JSON candidate to this rule's value type.
    fn coerce(&self, candidate: &Value) -> Result<Self::Value, Violation>;

    fn accept(&self, candidate: &Value) -> Result<Self::Value, Violation> {
        let value = self.coerce(candidate)?;
        self.validate(&value)?;
        Ok(value)
    }
}

/// Short human description of a JSON value, used in type errors.
pub(crate) fn describe(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
