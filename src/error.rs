//! Error handling for facility decoding and index construction.
//!
//! Provides typed errors with context for the decode pipeline (syntax,
//! missing fields, unresolvable categorical values) and for dataset loading.
//! Fatal decode errors abort the entire load: the caller either receives a
//! fully usable index or an error, never a partial dataset.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacilitiesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the source dataset was not valid JSON.
    #[error("malformed facility record: {source}\noffending line: {line}")]
    Syntax {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// A mandatory field was absent, null, or empty.
    #[error("dataset could not resolve value for property '{field}'")]
    MissingField { field: &'static str },

    /// A free-text categorical value did not match any known table entry.
    #[error("unrecognized {field}: '{value}'")]
    UnresolvedEnum { field: &'static str, value: String },

    /// A field was present but carried an out-of-range or unusable value.
    #[error("invalid value for '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// Two records in the dataset share the same facility key.
    #[error("two records cannot use the same key: '{id}'")]
    DuplicateKey { id: String },

    /// The dataset decoded successfully but contained no records.
    #[error("facility dataset is empty")]
    EmptyDataset,
}

impl FacilitiesError {
    /// Create a syntax error citing the offending line content.
    pub fn syntax(line: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Syntax {
            line: line.into(),
            source,
        }
    }

    /// Create a missing-field error naming the mandatory field.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an unresolved-enum error carrying the raw source value.
    pub fn unresolved_enum(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnresolvedEnum {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid-field error with context.
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Create a duplicate-key error.
    pub fn duplicate_key(id: impl Into<String>) -> Self {
        Self::DuplicateKey { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, FacilitiesError>;
