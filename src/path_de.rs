//! JSON text → validated values, with the JSON path of the failure in errors.
//!
//! Parsing and validation are kept apart: malformed JSON is reported as
//! [`ErrorKind::Decode`](crate::ErrorKind::Decode), while a rule violation
//! keeps its own kind (`Range`, `Type`, ...) and field name.
use serde_json::Value;

use crate::error::{Error, Result};
use crate::recipe::BurgerRecipe;

/// Types built from an already-parsed JSON document.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self>;
}

impl FromJson for Value {
    fn from_json(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromJson for BurgerRecipe {
    fn from_json(value: &Value) -> Result<Self> {
        BurgerRecipe::from_value(value)
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(Error::Decode {
                path: ".".to_string(),
                message: format!("expected a JSON array, got {}", crate::validator::describe(value)),
            });
        };
        items
            .iter()
            .enumerate()
            .map(|(ix, item)| T::from_json(item).map_err(|e| e.at(format!("[{ix}]"))))
            .collect()
    }
}

/// Parse JSON text, then build `T` from it.
pub fn from_str_with_path<T: FromJson>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, Value>(de).map_err(into_decode_error)?;
    T::from_json(&value)
}

pub fn from_value_with_path<T: FromJson>(value: &Value) -> Result<T> {
    T::from_json(value)
}

fn into_decode_error(err: serde_path_to_error::Error<serde_json::Error>) -> Error {
    let path = err.path().to_string();
    Error::Decode { path, message: err.into_inner().to_string() }
}
