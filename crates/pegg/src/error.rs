//! Error types for building and exporting egg documents.

use std::fmt::Display;

use thiserror::Error;

use crate::kind::EntryKind;

/// Errors that can occur while assembling or exporting a document.
///
/// Every construction error is raised before the tree is touched, so a failed
/// `add_*`/`append_*`/`set_*` call leaves the document exactly as it was.
#[derive(Error, Debug)]
pub enum EggError {
    /// A name-keyed collection already holds an entry under this key.
    #[error("cannot add {kind} {key}: it already exists")]
    DuplicateKey {
        /// Kind of the collection.
        kind: EntryKind,
        /// Offending key, as displayed.
        key: String,
    },

    /// A reference names an entry that cannot be resolved.
    #[error("{kind} {name:?} does not exist")]
    UnknownReference {
        /// Kind of the entry that was looked up.
        kind: EntryKind,
        /// Name or index that failed to resolve.
        name: String,
    },

    /// A value is outside its closed vocabulary or numeric range.
    #[error("invalid value {value:?} for {field}: {reason}")]
    InvalidValue {
        /// Field or scalar being set.
        field: String,
        /// Rejected value.
        value: String,
        /// What would have been accepted.
        reason: String,
    },

    /// Wrong number of values for a fixed-size payload.
    #[error("{kind} expects {expected}, got {actual}")]
    ShapeViolation {
        /// Kind of the entry being built.
        kind: EntryKind,
        /// Accepted arity, in words.
        expected: String,
        /// Number of values supplied.
        actual: usize,
    },

    /// An entry kind was attached under a parent that may not host it.
    #[error("{kind} is only allowed within a {allowed} entry")]
    Misplaced {
        /// Kind of the rejected entry.
        kind: EntryKind,
        /// Parent kind it requires.
        allowed: EntryKind,
    },

    /// I/O error while writing a rendered document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EggError {
    /// Create a duplicate key error.
    pub fn duplicate(kind: EntryKind, key: impl Display) -> Self {
        Self::DuplicateKey {
            kind,
            key: key.to_string(),
        }
    }

    /// Create an unresolved reference error.
    pub fn unknown(kind: EntryKind, name: impl Display) -> Self {
        Self::UnknownReference {
            kind,
            name: name.to_string(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid(
        field: impl Into<String>,
        value: impl Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a shape violation error.
    pub fn shape(kind: EntryKind, expected: impl Into<String>, actual: usize) -> Self {
        Self::ShapeViolation {
            kind,
            expected: expected.into(),
            actual,
        }
    }
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, EggError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EggError::duplicate(EntryKind::Group, "Cube");
        assert_eq!(err.to_string(), "cannot add Group Cube: it already exists");

        let err = EggError::unknown(EntryKind::Material, "steel");
        assert_eq!(err.to_string(), "Material \"steel\" does not exist");

        let err = EggError::shape(EntryKind::Rotate, "1 to 4 values", 5);
        assert_eq!(err.to_string(), "Rotate expects 1 to 4 values, got 5");

        let err = EggError::Misplaced {
            kind: EntryKind::Matrix3,
            allowed: EntryKind::Texture,
        };
        assert_eq!(
            err.to_string(),
            "Matrix3 is only allowed within a Texture entry"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EggError = io.into();
        assert!(matches!(err, EggError::Io(_)));
    }
}
