use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

use super::DecodeError;
use super::layout::{BASE64_KEY, BASE64_PAYLOAD_KEY, ISOFORMAT_KEY};
use crate::value::{Record, Value};

/// Parses JSON text into a value tree, unwrapping date/time and byte maps.
pub(crate) fn parse_text(text: &str) -> Result<Value, DecodeError> {
    let json: serde_json::Value = serde_json::from_str(text).map_err(DecodeError::Malformed)?;
    from_json(json)
}

fn from_json(json: serde_json::Value) -> Result<Value, DecodeError> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(v) => Value::Bool(v),
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Value::Int(v)
            } else if n.is_f64() {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            } else {
                return Err(DecodeError::UnsupportedNumber(n.to_string()));
            }
        }
        serde_json::Value::String(v) => Value::Str(v),
        serde_json::Value::Array(items) => Value::List(
            items
                .into_iter()
                .map(from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_json::Value::Object(map) => {
            let mut record = Record::new();
            for (key, value) in map {
                record.insert(key, from_json(value)?);
            }
            object_hook(record)?
        }
    })
}

fn object_hook(mut record: Record) -> Result<Value, DecodeError> {
    match record.get(ISOFORMAT_KEY) {
        None | Some(Value::Null) => {}
        Some(Value::Str(text)) => return parse_datetime(text).map(Value::DateTime),
        Some(other) => {
            return Err(DecodeError::InvalidDateTime {
                value: other.kind().to_string(),
                message: "expected a string".to_string(),
            });
        }
    }

    if matches!(record.get(BASE64_KEY), None | Some(Value::Null)) {
        return Ok(Value::Record(record));
    }
    match record.remove(BASE64_PAYLOAD_KEY) {
        Some(Value::Str(encoded)) => decode_base64(&encoded).map(Value::Bytes),
        Some(other) => Err(DecodeError::InvalidBase64(format!(
            "expected a string, found {}",
            other.kind()
        ))),
        None => Err(DecodeError::InvalidBase64(format!(
            "missing {BASE64_PAYLOAD_KEY:?} entry"
        ))),
    }
}

/// Accepts RFC 3339; timestamps without an offset are taken as UTC.
fn parse_datetime(text: &str) -> Result<OffsetDateTime, DecodeError> {
    OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| PrimitiveDateTime::parse(text, &Iso8601::DEFAULT).map(|dt| dt.assume_utc()))
        .map_err(|err| DecodeError::InvalidDateTime {
            value: text.to_string(),
            message: err.to_string(),
        })
}

/// Line breaks are tolerated inside the payload.
fn decode_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|err| DecodeError::InvalidBase64(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn malformed_text_is_reported() {
        let err = parse_text("{\"_\": ").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
        assert!(err.to_string().starts_with("malformed text"));
    }

    #[test]
    fn wrapper_maps_are_unwrapped() {
        let value = parse_text(
            r#"{"blob": {"_base64": true, "encoded": "AkDV\n/w==\n"},
                "date": {"_isoformat": "2025-12-01T01:02:03+00:00"},
                "naive": {"_isoformat": "2025-12-01T01:02:03"}}"#,
        )
        .unwrap();
        let Value::Record(record) = value else {
            panic!("expected a record");
        };
        assert_eq!(record.get("blob"), Some(&Value::Bytes(vec![0x02, 0x40, 0xd5, 0xff])));
        let expected = datetime!(2025-12-01 01:02:03 UTC);
        assert_eq!(record.get("date"), Some(&Value::DateTime(expected)));
        assert_eq!(record.get("naive"), Some(&Value::DateTime(expected)));
    }

    #[test]
    fn null_markers_leave_map_untouched() {
        let value = parse_text(r#"{"_isoformat": null, "_base64": null}"#).unwrap();
        let Value::Record(record) = value else {
            panic!("expected a record");
        };
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn invalid_payloads_are_rejected() {
        let err = parse_text(r#"{"_isoformat": "yesterday"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDateTime { .. }));

        let err = parse_text(r#"{"_base64": true, "encoded": "***"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBase64(_)));

        let err = parse_text(r#"{"_base64": true}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBase64(_)));
    }

    #[test]
    fn numbers_keep_integer_precision() {
        assert_eq!(parse_text("9007199254740993").unwrap(), Value::Int(9_007_199_254_740_993));
        assert_eq!(parse_text("1.5").unwrap(), Value::Float(1.5));
        let err = parse_text("18446744073709551615").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedNumber(_)));
    }
}
