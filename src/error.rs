//! Error taxonomy: rule violations and the crate-level error wrapping them.
use thiserror::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// A candidate value broke a field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// runtime kind of the candidate doesn't match the field's semantic type
    #[error("quantity should be integer, got {found}")]
    Type { found: String },
    #[error("quantity should not be less than {min} and greater than {max}, got {value}")]
    Range { min: i64, max: i64, value: i128 },
    #[error("expected {value} to be one of {options:?}")]
    Membership { value: String, options: Vec<String> },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("field `{field}`: {violation}")]
    Invalid {
        field: &'static str,
        #[source]
        violation: Violation,
    },
    #[error("field `{field}` was never assigned")]
    Unset { field: &'static str },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),
    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
    #[error("jq: {0}")]
    Jq(String),
    /// A nested failure inside a larger document.
    #[error("at JSON path {path} → {source}")]
    At {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

/// Flat view of [`Error`] for matching on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Range,
    Membership,
    Unset,
    UnknownField,
    Decode,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Violation {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Violation::Type { .. } => ErrorKind::Type,
            Violation::Range { .. } => ErrorKind::Range,
            Violation::Membership { .. } => ErrorKind::Membership,
        }
    }
}

impl Error {
    pub fn invalid(field: &'static str, violation: Violation) -> Self {
        Error::Invalid { field, violation }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Invalid { violation, .. } => violation.kind(),
            Error::Unset { .. } => ErrorKind::Unset,
            Error::UnknownField(_) => ErrorKind::UnknownField,
            Error::NotAnObject(_) | Error::Decode { .. } | Error::Jq(_) => ErrorKind::Decode,
            Error::At { source, .. } => source.kind(),
        }
    }

    /// Prefix a path segment (e.g. `[3]`) to where this error happened.
    pub fn at(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            Error::At { path, source } => Error::At { path: format!("{segment}{path}"), source },
            other => Error::At { path: segment, source: Box::new(other) },
        }
    }

    /// Name of the offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Invalid { field, .. } | Error::Unset { field } => Some(field),
            Error::UnknownField(name) => Some(name),
            Error::At { source, .. } => source.field(),
            _ => None,
        }
    }
}
