//! Validated burger recipes.
//!
//! Every recipe field is guarded by a rule ([`validator::BoundedNumber`] or
//! [`validator::EnumeratedString`]) bound to it through a `static`
//! [`field::Field`]. Writes go through the rule first; a rejected write never
//! reaches storage.
//!
//! ```
//! use burger_osi::{BurgerRecipe, ErrorKind};
//!
//! let recipe = BurgerRecipe::new(2, 1, 1, 1, 1, "mayo").unwrap();
//! assert_eq!(
//!     recipe.to_string(),
//!     "Burger(buns=2, cheese=1, tomatoes=1, cutlets=1, eggs=1, sauce='mayo')"
//! );
//!
//! let err = BurgerRecipe::new(2, 1, 1, 1, 1, "bbq").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Membership);
//! ```
pub mod error;
pub mod validator;
pub mod field;
pub mod recipe;
pub mod schema;
pub mod path_de;
pub mod jq_exec;
pub mod cli;

pub use error::{Error, ErrorKind, Result, Violation};
pub use recipe::{BurgerRecipe, RecipeDraft};
