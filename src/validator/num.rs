use serde::Serialize;
use serde_json::Value;

use super::{describe, Validator};
use crate::error::Violation;

/// Inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoundedNumber {
    #[serde(rename = "minimum")]
    pub min_value: i64,
    #[serde(rename = "maximum")]
    pub max_value: i64,
}

impl BoundedNumber {
    pub const fn new(min_value: i64, max_value: i64) -> Self {
        assert!(min_value <= max_value, "BoundedNumber: min_value > max_value");
        Self { min_value, max_value }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    fn out_of_range(&self, value: i128) -> Violation {
        Violation::Range { min: self.min_value, max: self.max_value, value }
    }
}

impl Validator for BoundedNumber {
    type Value = i64;

    fn validate(&self, candidate: &i64) -> Result<(), Violation> {
        if self.contains(*candidate) {
            Ok(())
        } else {
            Err(self.out_of_range(*candidate as i128))
        }
    }

    fn coerce(&self, candidate: &Value) -> Result<i64, Violation> {
        // `2.0` is a float in JSON terms and stays rejected
        let Value::Number(n) = candidate else {
            return Err(Violation::Type { found: describe(candidate) });
        };
        match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Ok(i),
            // above i64::MAX: still an integer, just never in range
            (None, Some(u)) => Err(self.out_of_range(u as i128)),
            (None, None) => Err(Violation::Type { found: describe(candidate) }),
        }
    }
}
