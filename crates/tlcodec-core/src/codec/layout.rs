/// Reserved key carrying the class tag of a record.
pub const TYPE_KEY: &str = "_";

/// Key of the wrapper map holding an RFC 3339 date/time.
pub const ISOFORMAT_KEY: &str = "_isoformat";

/// Marker key of the wrapper map holding a byte blob.
pub const BASE64_KEY: &str = "_base64";
/// Payload key of the byte-blob wrapper (standard base64).
pub const BASE64_PAYLOAD_KEY: &str = "encoded";
