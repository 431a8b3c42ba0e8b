//! Error types for the oscillator engine.
//!
//! None of these are fatal: every failing operation leaves the model and the
//! controller exactly as they were.

use thiserror::Error;

use crate::config::FieldDomain;

/// A rejected parameter write.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    /// The value falls outside the field's domain.
    #[error("{field} must be in range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// Inputs are locked between `start()` and `reset()`.
    #[error("{field} cannot be changed while the animation is active")]
    InputLocked { field: &'static str },
}

impl ValidationError {
    pub(crate) fn out_of_range(field: &'static str, domain: FieldDomain) -> Self {
        Self::OutOfRange {
            field,
            min: domain.min,
            max: domain.max,
        }
    }

    /// Name of the field the write was aimed at
    pub fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. } | Self::InputLocked { field } => field,
        }
    }
}

/// Reasons `start()` refuses to leave Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// The spring has no requested stretch, so there is nothing to release.
    #[error("set a stretch before starting the oscillation")]
    NotDisplaced,
}

/// Check `value` against `domain`, producing the field's error on failure.
pub(crate) fn check(
    field: &'static str,
    domain: FieldDomain,
    value: f64,
) -> Result<f64, ValidationError> {
    if domain.contains(value) {
        Ok(value)
    } else {
        Err(ValidationError::out_of_range(field, domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_domain() {
        let domain = FieldDomain::inclusive(-90.0, 90.0);
        assert_eq!(check("angle", domain, 45.0), Ok(45.0));
        assert_eq!(
            check("angle", domain, 91.0),
            Err(ValidationError::OutOfRange {
                field: "angle",
                min: -90.0,
                max: 90.0,
            })
        );
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = ValidationError::InputLocked { field: "mass" };
        assert_eq!(err.field(), "mass");
        assert!(err.to_string().contains("mass"));

        let err = ValidationError::out_of_range("length", FieldDomain::inclusive(1e-5, 1e6));
        assert_eq!(err.to_string(), "length must be in range [0.00001, 1000000]");
    }
}
