//! Error types for parameter access

use thiserror::Error;

/// Errors raised while reading or writing typed parameters.
///
/// These indicate stored state that does not match the typed schema and are
/// returned straight to the caller of the accessor. Missing mandatory fields
/// are never reported here; see [`ValidationError`](super::ValidationError).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// A stored value could not be decoded by the field's codec
    #[error("Malformed value '{value}' for parameter '{key}': expected {expected}")]
    Malformed {
        /// Bag key holding the value.
        key: String,
        /// Raw stored value.
        value: String,
        /// Description of what the codec accepts.
        expected: String,
    },

    /// A stored enum token has no variant in the field's token table
    #[error("Unknown value '{value}' for parameter '{key}'")]
    UnknownEnumToken {
        /// Bag key holding the token.
        key: String,
        /// Unrecognized token.
        value: String,
    },

    /// A compound discriminator names no registered variant
    #[error("Unknown variant '{token}' stored under '{key}'")]
    UnknownVariant {
        /// Discriminator key.
        key: String,
        /// Unrecognized token.
        token: String,
    },

    /// A variant was assigned to a compound field whose table does not contain it
    #[error("Variant '{token}' cannot be assigned to '{key}'")]
    ForeignVariant {
        /// Discriminator key of the target compound.
        key: String,
        /// Token of the rejected variant.
        token: String,
    },

    /// No schema matches a stored entity type
    #[error("Unknown {category} type '{type_id}' for API version {version}")]
    UnknownEntity {
        /// Entity category name.
        category: String,
        /// Stored type discriminator.
        type_id: String,
        /// Requested API version.
        version: String,
    },

    /// An entity was added to a feature set of a different category
    #[error("Cannot add {actual} '{kind}' to {expected} set")]
    CategoryMismatch {
        /// Kind name of the rejected entity.
        kind: String,
        /// Category of the feature set.
        expected: String,
        /// Category of the entity.
        actual: String,
    },
}

impl ParamError {
    /// Creates a malformed-value error
    pub fn malformed(key: &str, value: &str, expected: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Returns the bag key involved, if the error concerns a single key
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Malformed { key, .. }
            | Self::UnknownEnumToken { key, .. }
            | Self::UnknownVariant { key, .. }
            | Self::ForeignVariant { key, .. } => Some(key),
            Self::UnknownEntity { .. } | Self::CategoryMismatch { .. } => None,
        }
    }
}
