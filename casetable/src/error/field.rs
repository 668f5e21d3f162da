//! Errors from the typed getters on [`Row`](crate::Row).

/// A typed field lookup that could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The row has no such field. Distinct from a field holding null.
    #[error("row has no field '{field}'")]
    Missing { field: String },

    /// The field holds a value that cannot be read as `expected`.
    #[error("field '{field}' holds {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

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

    /// Name of the field that was looked up.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}

/// Lookups where an absent field reads the same as a null one.
pub trait MissingAsNull<T> {
    /// Turn [`FieldError::Missing`] into `Ok(None)`, keeping type mismatches.
    fn missing_as_null(self) -> Result<Option<T>, FieldError>;
}

impl<T> MissingAsNull<T> for Result<Option<T>, FieldError> {
    fn missing_as_null(self) -> Result<Option<T>, FieldError> {
        match self {
            Err(FieldError::Missing { .. }) => Ok(None),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_as_null() {
        let missing: Result<Option<i64>, _> = Err(FieldError::missing("paid"));
        assert_eq!(missing.missing_as_null(), Ok(None));

        let mismatch: Result<Option<i64>, _> =
            Err(FieldError::type_mismatch("paid", "decimal", "string"));
        assert_eq!(mismatch.clone().missing_as_null(), mismatch);
        assert_eq!(Ok::<_, FieldError>(Some(3)).missing_as_null(), Ok(Some(3)));
    }

    #[test]
    fn test_field_name() {
        assert_eq!(FieldError::missing("name").field(), "name");
        assert_eq!(
            FieldError::type_mismatch("fee", "decimal", "bool").field(),
            "fee"
        );
    }
}
