use std::fmt;

use thiserror::Error;

/// Why a class was left out of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Abstract descriptors have no instances to tag.
    Abstract,
    /// A different class is already registered under the same path.
    PathConflict,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Abstract => write!(f, "abstract class"),
            SkipReason::PathConflict => {
                write!(f, "another class is already registered under this path")
            }
        }
    }
}

/// A discovered class could not be patched.
///
/// # Examples
/// ```
/// use tlcodec_core::{PatchSkipped, SkipReason};
///
/// let err = PatchSkipped {
///     path: "tl.types.TypePeer".to_string(),
///     reason: SkipReason::Abstract,
/// };
/// assert!(err.to_string().contains("abstract class"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct PatchSkipped {
    pub path: String,
    pub reason: SkipReason,
}
