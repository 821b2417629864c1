use thiserror::Error;

/// Errors returned while converting or rendering an object.
///
/// # Examples
/// ```
/// use tlcodec_core::EncodeError;
///
/// let err = EncodeError::NameMismatch {
///     dump: "Peer".to_string(),
///     class: "PeerUser".to_string(),
/// };
/// assert!(err.to_string().contains("class name mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("no patched classes found, call patch_classes() first")]
    NotPatched,
    #[error("class name mismatch: dump={dump:?}, class={class:?}")]
    NameMismatch { dump: String, class: String },
    #[error("class {class} is not registered, its dump could not be decoded")]
    Unregistered { class: String },
    #[error("non-finite float {0} has no JSON form")]
    NonFiniteFloat(f64),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned while decoding text back into an object.
///
/// # Examples
/// ```
/// use tlcodec_core::DecodeError;
///
/// let err = DecodeError::UnresolvableClassPath("tl.types.Gone".to_string());
/// assert!(err.to_string().contains("unresolvable class path"));
/// ```
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no patched classes found, call patch_classes() first")]
    NotPatched,
    #[error("malformed text: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),
    #[error("invalid _isoformat value {value:?}: {message}")]
    InvalidDateTime { value: String, message: String },
    #[error("invalid _base64 payload: {0}")]
    InvalidBase64(String),
    #[error("value for \"_\" key should be a string but got {found}")]
    InvalidTag { found: &'static str },
    #[error("unresolvable class path: {0}")]
    UnresolvableClassPath(String),
    #[error("{class}: missing field {field:?}")]
    MissingField { class: String, field: &'static str },
    #[error("{class}: unexpected field {field:?}")]
    UnexpectedField { class: String, field: String },
    #[error("{class}.{field}: expected {expected}, found {found}")]
    FieldType {
        class: String,
        field: String,
        expected: &'static str,
        found: String,
    },
    #[error("restored value is not a protocol object but {found}")]
    NotAnObject { found: String },
    #[error("restored object is {found}, expected {expected}")]
    WrongClass { expected: String, found: String },
}
