//! The burger recipe record.
//!
//! Each field is bound to a `static` [`Field`]; the rules are shared by every
//! recipe while the values live in the recipe itself. Construction validates
//! fields in declaration order (buns, cheese, tomatoes, cutlets, eggs, sauce)
//! and stops at the first failure. Nothing is built until all six pass, so a
//! failed constructor leaves no half-filled recipe behind.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::schema::RULES;
use crate::validator::{BoundedNumber, EnumeratedString};

// ————————————————————————————————————————————————————————————————————————————
// RULES
// ————————————————————————————————————————————————————————————————————————————

pub const SAUCES: &[&str] = &["ketchup", "mayo", "burger"];

pub static BUNS: Field<BoundedNumber> = Field::new("buns", BoundedNumber::new(2, 3));
pub static CHEESE: Field<BoundedNumber> = Field::new("cheese", BoundedNumber::new(0, 2));
pub static TOMATOES: Field<BoundedNumber> = Field::new("tomatoes", BoundedNumber::new(0, 3));
pub static CUTLETS: Field<BoundedNumber> = Field::new("cutlets", BoundedNumber::new(1, 3));
pub static EGGS: Field<BoundedNumber> = Field::new("eggs", BoundedNumber::new(0, 2));
pub static SAUCE: Field<EnumeratedString> = Field::new("sauce", EnumeratedString::new(SAUCES));

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct BurgerRecipe {
    buns: i64,
    cheese: i64,
    tomatoes: i64,
    cutlets: i64,
    eggs: i64,
    sauce: String,
}

/// A recipe being filled in one field at a time. Slots start empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    buns: Option<i64>,
    cheese: Option<i64>,
    tomatoes: Option<i64>,
    cutlets: Option<i64>,
    eggs: Option<i64>,
    sauce: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

macro_rules! quantity_accessors {
    ($($name:ident, $setter:ident, $field:ident;)*) => {
        impl BurgerRecipe {
            $(
                pub fn $name(&self) -> i64 { self.$name }

                /// Re-validates; the stored value is kept on failure.
                pub fn $setter(&mut self, value: i64) -> Result<()> {
                    $field.write(&mut self.$name, value)
                }
            )*
        }

        impl RecipeDraft {
            $(
                pub fn $name(&self) -> Result<i64> {
                    $field.read(&self.$name).copied()
                }

                pub fn $setter(&mut self, value: i64) -> Result<()> {
                    $field.write_opt(&mut self.$name, value)
                }
            )*
        }
    };
}

quantity_accessors! {
    buns, set_buns, BUNS;
    cheese, set_cheese, CHEESE;
    tomatoes, set_tomatoes, TOMATOES;
    cutlets, set_cutlets, CUTLETS;
    eggs, set_eggs, EGGS;
}

impl BurgerRecipe {
    pub fn new(
        buns: i64,
        cheese: i64,
        tomatoes: i64,
        cutlets: i64,
        eggs: i64,
        sauce: &str,
    ) -> Result<Self> {
        // struct literal fields evaluate top to bottom: declaration order
        Ok(Self {
            buns: BUNS.check(buns)?,
            cheese: CHEESE.check(cheese)?,
            tomatoes: TOMATOES.check(tomatoes)?,
            cutlets: CUTLETS.check(cutlets)?,
            eggs: EGGS.check(eggs)?,
            sauce: SAUCE.check(sauce.to_owned())?,
        })
    }

    /// Build from a JSON object with exactly the six recipe keys.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(Error::NotAnObject(crate::validator::describe(other))),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self> {
        if let Some(extra) = map.keys().find(|k| !RULES.contains_key(k.as_str())) {
            return Err(Error::UnknownField(extra.clone()));
        }
        let mut draft = RecipeDraft::default();
        for name in RULES.keys() {
            match map.get(*name) {
                Some(candidate) => draft.assign(name, candidate)?,
                None => return Err(Error::Unset { field: *name }),
            }
        }
        draft.finish()
    }

    pub fn sauce(&self) -> &str {
        &self.sauce
    }

    pub fn set_sauce(&mut self, value: &str) -> Result<()> {
        SAUCE.write(&mut self.sauce, value.to_owned())
    }

    /// Assign a loosely-typed value to the field called `name`.
    pub fn assign(&mut self, name: &str, candidate: &Value) -> Result<()> {
        match name {
            "buns" => self.buns = BUNS.check_json(candidate)?,
            "cheese" => self.cheese = CHEESE.check_json(candidate)?,
            "tomatoes" => self.tomatoes = TOMATOES.check_json(candidate)?,
            "cutlets" => self.cutlets = CUTLETS.check_json(candidate)?,
            "eggs" => self.eggs = EGGS.check_json(candidate)?,
            "sauce" => self.sauce = SAUCE.check_json(candidate)?,
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        debug!(field = name, %candidate, "reassigned");
        Ok(())
    }
}

impl TryFrom<Map<String, Value>> for BurgerRecipe {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        Self::from_map(&map)
    }
}

impl fmt::Display for BurgerRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Burger(buns={}, cheese={}, tomatoes={}, cutlets={}, eggs={}, sauce='{}')",
            self.buns, self.cheese, self.tomatoes, self.cutlets, self.eggs, self.sauce
        )
    }
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sauce(&self) -> Result<&str> {
        SAUCE.read(&self.sauce).map(String::as_str)
    }

    pub fn set_sauce(&mut self, value: &str) -> Result<()> {
        SAUCE.write_opt(&mut self.sauce, value.to_owned())
    }

    pub fn assign(&mut self, name: &str, candidate: &Value) -> Result<()> {
        match name {
            "buns" => self.buns = Some(BUNS.check_json(candidate)?),
            "cheese" => self.cheese = Some(CHEESE.check_json(candidate)?),
            "tomatoes" => self.tomatoes = Some(TOMATOES.check_json(candidate)?),
            "cutlets" => self.cutlets = Some(CUTLETS.check_json(candidate)?),
            "eggs" => self.eggs = Some(EGGS.check_json(candidate)?),
            "sauce" => self.sauce = Some(SAUCE.check_json(candidate)?),
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        Ok(())
    }

    /// Every slot must have been written.
    pub fn finish(self) -> Result<BurgerRecipe> {
        Ok(BurgerRecipe {
            buns: self.buns()?,
            cheese: self.cheese()?,
            tomatoes: self.tomatoes()?,
            cutlets: self.cutlets()?,
            eggs: self.eggs()?,
            sauce: self.sauce()?.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use test_case::test_case;

    fn classic() -> BurgerRecipe {
        BurgerRecipe::new(2, 1, 1, 1, 1, "mayo").unwrap()
    }

    #[test]
    fn display_format() {
        assert_eq!(
            classic().to_string(),
            "Burger(buns=2, cheese=1, tomatoes=1, cutlets=1, eggs=1, sauce='mayo')"
        );
    }

    #[test_case(1, 0, 0, 1, 0, "ketchup", "buns" ; "too few buns")]
    #[test_case(2, 3, 0, 1, 0, "ketchup", "cheese" ; "too much cheese")]
    #[test_case(2, 0, 4, 1, 0, "ketchup", "tomatoes" ; "too many tomatoes")]
    #[test_case(2, 0, 0, 0, 0, "ketchup", "cutlets" ; "no cutlet")]
    #[test_case(2, 0, 0, 1, -1, "ketchup", "eggs" ; "negative eggs")]
    fn constructor_range_errors(b: i64, c: i64, t: i64, cu: i64, e: i64, s: &str, field: &str) {
        let err = BurgerRecipe::new(b, c, t, cu, e, s).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn first_failure_wins() {
        // both buns and sauce are bad; buns is declared first
        let err = BurgerRecipe::new(9, 0, 0, 1, 0, "bbq").unwrap_err();
        assert_eq!(err.field(), Some("buns"));
    }

    #[test]
    fn unknown_sauce() {
        let err = BurgerRecipe::new(2, 0, 0, 1, 0, "bbq").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Membership);
    }

    #[test]
    fn setter_rejects_and_keeps_value() {
        let mut r = classic();
        assert_eq!(r.set_cutlets(4).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(r.cutlets(), 1);
        r.set_cutlets(3).unwrap();
        assert_eq!(r.cutlets(), 3);
        assert!(r.set_sauce("bbq").is_err());
        assert_eq!(r.sauce(), "mayo");
    }

    #[test]
    fn assign_by_name() {
        let mut r = classic();
        r.assign("eggs", &json!(2)).unwrap();
        assert_eq!(r.eggs(), 2);
        assert_eq!(r.assign("eggs", &json!(1.0)).unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(r.assign("pickles", &json!(1)).unwrap_err().kind(), ErrorKind::UnknownField);
        assert_eq!(r.eggs(), 2);
    }

    #[test]
    fn from_value_paths() {
        let ok = json!({"buns": 3, "cheese": 0, "tomatoes": 3, "cutlets": 2, "eggs": 0, "sauce": "burger"});
        let r = BurgerRecipe::from_value(&ok).unwrap();
        assert_eq!(r.to_string(), "Burger(buns=3, cheese=0, tomatoes=3, cutlets=2, eggs=0, sauce='burger')");

        let bool_buns = json!({"buns": true, "cheese": 0, "tomatoes": 0, "cutlets": 1, "eggs": 0, "sauce": "mayo"});
        assert_eq!(BurgerRecipe::from_value(&bool_buns).unwrap_err().kind(), ErrorKind::Type);

        let missing = json!({"buns": 2, "cheese": 0, "tomatoes": 0, "cutlets": 1, "sauce": "mayo"});
        let err = BurgerRecipe::from_value(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unset);
        assert_eq!(err.field(), Some("eggs"));

        assert_eq!(BurgerRecipe::from_value(&json!([1, 2])).unwrap_err().kind(), ErrorKind::Decode);
    }

    #[test]
    fn draft_reads_fail_until_written() {
        let mut d = RecipeDraft::new();
        assert_eq!(d.buns().unwrap_err().kind(), ErrorKind::Unset);
        d.set_buns(2).unwrap();
        assert_eq!(d.buns().unwrap(), 2);
        assert!(d.clone().finish().is_err());
        d.set_cheese(0).unwrap();
        d.set_tomatoes(0).unwrap();
        d.set_cutlets(1).unwrap();
        d.set_eggs(0).unwrap();
        d.set_sauce("ketchup").unwrap();
        assert_eq!(d.finish().unwrap(), BurgerRecipe::new(2, 0, 0, 1, 0, "ketchup").unwrap());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let json = serde_json::to_value(classic()).unwrap();
        assert_eq!(json["sauce"], "mayo");
        let bad = json!({"buns": 2, "cheese": 7, "tomatoes": 0, "cutlets": 1, "eggs": 0, "sauce": "mayo"});
        assert!(serde_json::from_value::<BurgerRecipe>(bad).is_err());
    }
}
