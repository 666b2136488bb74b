//! Error types for path traversal.
//!
//! Most traversal irregularities are absorbed inside the engine: absent
//! data propagates as "found nothing", and a wrong-shaped container is
//! repaired to an empty one of the required shape. The errors in this
//! module are the exceptions: genuine caller errors that surface out of
//! [`Path`](crate::Path) operations.

use crate::value::ValueKind;

/// Represents an error when a field or slot accessor was applied to a value
/// that does not support that member.
///
/// This is the one traversal failure that is not recovered: the receiving
/// value either is not a record, or is a record that never declared the
/// requested field.
///
/// # Examples
///
/// ```
/// use lenspath::{MissingCapabilityError, ValueKind};
///
/// let error = MissingCapabilityError {
///     capability: "field \"street\"".to_string(),
///     kind: ValueKind::Int,
/// };
/// assert_eq!(
///     format!("{}", error),
///     "value of kind int does not support field \"street\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCapabilityError {
    /// A description of the attempted capability, e.g. `field "street"`.
    pub capability: String,
    /// The kind of the value that was asked to provide the capability.
    pub kind: ValueKind,
}

impl MissingCapabilityError {
    pub(crate) fn field(name: &str, kind: ValueKind) -> Self {
        Self {
            capability: format!("field \"{name}\""),
            kind,
        }
    }

    pub(crate) fn slot(name: &str, kind: ValueKind) -> Self {
        Self {
            capability: format!("slot \"{name}\""),
            kind,
        }
    }
}

impl std::fmt::Display for MissingCapabilityError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "value of kind {} does not support {}",
            self.kind, self.capability
        )
    }
}

impl std::error::Error for MissingCapabilityError {}

/// Represents errors that can occur while traversing a path.
///
/// This enum provides a unified error type for all traversal errors.
/// Currently, it only contains `MissingCapability`, but it is designed to
/// be extensible for future error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// A field or slot accessor reached a value without that member.
    MissingCapability(MissingCapabilityError),
}

impl std::fmt::Display for TraversalError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCapability(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for TraversalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingCapability(error) => Some(error),
        }
    }
}

impl From<MissingCapabilityError> for TraversalError {
    fn from(error: MissingCapabilityError) -> Self {
        Self::MissingCapability(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_capability_display() {
        let error = MissingCapabilityError::slot("cache", ValueKind::Seq);
        assert_eq!(
            format!("{error}"),
            "value of kind sequence does not support slot \"cache\""
        );
    }

    #[test]
    fn test_traversal_error_wraps_and_sources() {
        use std::error::Error as _;

        let error = TraversalError::from(MissingCapabilityError::field("x", ValueKind::Null));
        assert!(format!("{error}").contains("field \"x\""));
        assert!(error.source().is_some());
    }
}
