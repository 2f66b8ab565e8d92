//! Binding of a rule to a named field, and the write/read path through it.
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::validator::Validator;

/// A named field guarded by a rule.
///
/// Fields are meant to live in `static`s: the rule is shared by every record,
/// while the value itself sits in a slot owned by the record.
#[derive(Debug)]
pub struct Field<V> {
    pub name: &'static str,
    pub rule: V,
}

impl<V: Validator> Field<V> {
    pub const fn new(name: &'static str, rule: V) -> Self {
        Self { name, rule }
    }

    /// Validate a typed candidate, tagging failures with this field's name.
    pub fn check(&self, candidate: V::Value) -> Result<V::Value> {
        match self.rule.validate(&candidate) {
            Ok(()) => Ok(candidate),
            Err(violation) => {
                debug!(field = self.name, %violation, "rejected value");
                Err(Error::invalid(self.name, violation))
            }
        }
    }

    /// Validate a JSON candidate and narrow it to the field's value type.
    pub fn check_json(&self, candidate: &Value) -> Result<V::Value> {
        self.rule.accept(candidate).map_err(|violation| {
            debug!(field = self.name, %violation, %candidate, "rejected value");
            Error::invalid(self.name, violation)
        })
    }

    /// Validate, then store. The slot is untouched on failure.
    pub fn write(&self, slot: &mut V::Value, candidate: V::Value) -> Result<()> {
        *slot = self.check(candidate)?;
        trace!(field = self.name, value = ?slot, "stored");
        Ok(())
    }

    /// Same as [`Field::write`] for a slot that may still be empty.
    pub fn write_opt(&self, slot: &mut Option<V::Value>, candidate: V::Value) -> Result<()> {
        *slot = Some(self.check(candidate)?);
        trace!(field = self.name, value = ?slot, "stored");
        Ok(())
    }

    /// Read a slot; never-written slots have no default.
    pub fn read<'a>(&self, slot: &'a Option<V::Value>) -> Result<&'a V::Value> {
        slot.as_ref().ok_or(Error::Unset { field: self.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::validator::{BoundedNumber, EnumeratedString};
    use serde_json::json;

    static EGGS: Field<BoundedNumber> = Field::new("eggs", BoundedNumber::new(0, 2));
    static SAUCE: Field<EnumeratedString> =
        Field::new("sauce", EnumeratedString::new(&["ketchup", "mayo"]));

    #[test]
    fn failed_write_keeps_previous_value() {
        let mut slot = 1;
        let err = EGGS.write(&mut slot, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.field(), Some("eggs"));
        assert_eq!(slot, 1);
        EGGS.write(&mut slot, 2).unwrap();
        assert_eq!(slot, 2);
    }

    #[test]
    fn unset_slot_cannot_be_read() {
        let mut slot: Option<String> = None;
        assert_eq!(SAUCE.read(&slot).unwrap_err().kind(), ErrorKind::Unset);
        assert!(SAUCE.write_opt(&mut slot, "bbq".into()).is_err());
        assert!(slot.is_none());
        SAUCE.write_opt(&mut slot, "mayo".into()).unwrap();
        assert_eq!(SAUCE.read(&slot).unwrap(), "mayo");
    }

    #[test]
    fn json_candidates_are_narrowed() {
        assert_eq!(EGGS.check_json(&json!(0)).unwrap(), 0);
        assert_eq!(EGGS.check_json(&json!(false)).unwrap_err().kind(), ErrorKind::Type);
    }
}
