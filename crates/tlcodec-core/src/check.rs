use std::fmt;

use tracing::{debug, error, info};

use crate::codec::EncodeOptions;
use crate::object::TlObject;
use crate::registry::Registry;

/// Result of encoding an object and decoding it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Ok,
    /// The decoded object has a different class.
    ClassMismatch { expected: String, restored: String },
    /// Same class, different dictionary dumps. Debug dumps of both objects.
    Mismatch { original: String, restored: String },
    /// Encoding or decoding failed.
    Failed(String),
}

impl CheckOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckOutcome::Ok)
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Ok => write!(f, "OK"),
            CheckOutcome::ClassMismatch { expected, restored } => {
                write!(f, "class mismatch: was {expected}, restored {restored}")
            }
            CheckOutcome::Mismatch { original, restored } => write!(
                f,
                "dumps differ\nsource object:\n{original}\nrestored object:\n{restored}"
            ),
            CheckOutcome::Failed(message) => write!(f, "round trip failed: {message}"),
        }
    }
}

/// Encodes `obj`, decodes the text and compares the result with `obj`.
///
/// Mismatches are reported, never raised: defaults filled in during
/// reconstruction can make a mismatch expected.
pub fn check_round_trip(registry: &Registry, obj: &dyn TlObject) -> CheckOutcome {
    debug!("instance to test:\n{:#?}", obj);
    let outcome = round_trip(registry, obj);
    match &outcome {
        CheckOutcome::Ok => info!("round trip: OK"),
        CheckOutcome::Failed(message) => {
            error!("round trip failed: {}", message);
            info!("trouble object:\n{:#?}", obj);
        }
        other => error!("round trip: {}", other),
    }
    outcome
}

fn round_trip(registry: &Registry, obj: &dyn TlObject) -> CheckOutcome {
    let options = EncodeOptions {
        ensure_ascii: false,
        indent: None,
    };
    let dump = match registry.encode_with(obj, &options) {
        Ok(dump) => dump,
        Err(err) => return CheckOutcome::Failed(err.to_string()),
    };
    let restored = match registry.decode(&dump) {
        Ok(restored) => restored,
        Err(err) => return CheckOutcome::Failed(err.to_string()),
    };

    if !restored.class().is(obj.class()) {
        return CheckOutcome::ClassMismatch {
            expected: obj.class().path(),
            restored: restored.class().path(),
        };
    }

    let same = match (registry.to_dict(obj), registry.to_dict(restored.as_ref())) {
        (Ok(original), Ok(decoded)) => original == decoded,
        (Err(err), _) | (_, Err(err)) => return CheckOutcome::Failed(err.to_string()),
    };
    if same && obj.eq_object(restored.as_ref()) {
        CheckOutcome::Ok
    } else {
        CheckOutcome::Mismatch {
            original: format!("{:#?}", obj),
            restored: format!("{:#?}", restored),
        }
    }
}
