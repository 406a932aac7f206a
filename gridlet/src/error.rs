//! Error types

/// Error type for table and range construction.
///
/// Configuration problems are fatal: they are reported once, at construction,
/// and nothing else in the engine returns a `Result`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A config option referenced a column that is not in the resolved list.
    #[error("Unknown column '{name}' in {context}")]
    UnknownColumn {
        context: &'static str,
        name: String,
    },

    /// The explicit column list named the same column twice.
    #[error("Duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// A range control was given an inverted interval.
    #[error("Invalid range interval [{min}, {max}]")]
    EmptyRange { min: f64, max: f64 },
}

impl ConfigError {
    /// Creates a new unknown column error.
    pub fn unknown_column(context: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownColumn {
            context,
            name: name.into(),
        }
    }

    /// Creates a new duplicate column error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }

    /// Creates a new empty range error.
    pub fn empty_range(min: f64, max: f64) -> Self {
        Self::EmptyRange { min, max }
    }
}

/// Error type for field access operations on Record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the record.
    #[error("Field '{field}' not found in record")]
    Missing { field: String },

    /// The field exists but has a different type than requested.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}
