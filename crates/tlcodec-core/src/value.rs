//! Value trees produced by dictionary conversion and consumed by decoding.
//!
//! [`Value`] is what `to_dict` produces and what the text codec reads back.
//! [`Restored`] is the decoded tree, where tagged records have already been
//! rebuilt into protocol objects. The conversion traits ([`IntoValue`],
//! [`FromRestored`], [`Zeroed`]) are implemented for every field type the
//! object library uses.

use std::collections::BTreeMap;
use std::ops::Deref;

use thiserror::Error;
use time::OffsetDateTime;

use crate::codec::layout::TYPE_KEY;
use crate::codec::{DecodeError, EncodeError};
use crate::object::{ClassDescriptor, DictConverter, TlObject};

/// Node of a dictionary-conversion tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    DateTime(OffsetDateTime),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Record(_) => "map",
        }
    }
}

/// Field map of a converted object (or a plain mapping).
///
/// Records built from protocol objects carry the class tag under `"_"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record tagged with `tag` under the reserved key.
    pub fn tagged(tag: &str) -> Self {
        let mut record = Self::new();
        record.set_tag(tag);
        record
    }

    pub fn tag(&self) -> Option<&str> {
        match self.entries.get(TYPE_KEY) {
            Some(Value::Str(tag)) => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Sets the class tag, replacing any previous value.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.entries
            .insert(TYPE_KEY.to_string(), Value::Str(tag.into()));
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Byte-blob field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Bytes(value)
    }
}

impl From<&[u8]> for Bytes {
    fn from(value: &[u8]) -> Self {
        Bytes(value.to_vec())
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

/// Node of a decoded tree.
#[derive(Debug)]
pub enum Restored {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    DateTime(OffsetDateTime),
    List(Vec<Restored>),
    /// Mapping without a class tag.
    Map(BTreeMap<String, Restored>),
    Object(Box<dyn TlObject>),
}

impl Restored {
    pub fn kind(&self) -> String {
        match self {
            Restored::Null => "null".to_string(),
            Restored::Bool(_) => "bool".to_string(),
            Restored::Int(_) => "int".to_string(),
            Restored::Float(_) => "float".to_string(),
            Restored::Str(_) => "str".to_string(),
            Restored::Bytes(_) => "bytes".to_string(),
            Restored::DateTime(_) => "datetime".to_string(),
            Restored::List(_) => "list".to_string(),
            Restored::Map(_) => "map".to_string(),
            Restored::Object(obj) => obj.class().path(),
        }
    }
}

/// A decoded value did not have the type a field expects.
#[derive(Debug, Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub found: String,
}

impl TypeMismatch {
    pub fn new(expected: &'static str, found: &Restored) -> Self {
        Self {
            expected,
            found: found.kind(),
        }
    }
}

/// Decoded entries of one tagged record, consumed by a class constructor.
#[derive(Debug)]
pub struct Fields {
    class: &'static ClassDescriptor,
    entries: BTreeMap<String, Restored>,
}

impl Fields {
    pub fn new(class: &'static ClassDescriptor, entries: BTreeMap<String, Restored>) -> Self {
        Self { class, entries }
    }

    pub fn class(&self) -> &'static ClassDescriptor {
        self.class
    }

    /// Removes and converts one field. Absent fields fall back to
    /// [`FromRestored::missing`].
    pub fn take<T: FromRestored>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        match self.entries.remove(field) {
            Some(value) => convert_field(self.class, field, value),
            None => T::missing().ok_or_else(|| DecodeError::MissingField {
                class: self.class.path(),
                field,
            }),
        }
    }

    /// Fails on the first entry no constructor argument consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.entries.into_keys().next() {
            Some(field) => Err(DecodeError::UnexpectedField {
                class: self.class.path(),
                field,
            }),
            None => Ok(()),
        }
    }

    pub fn into_entries(self) -> BTreeMap<String, Restored> {
        self.entries
    }
}

/// Converts one decoded field, attaching class and field to any mismatch.
pub fn convert_field<T: FromRestored>(
    class: &ClassDescriptor,
    field: &str,
    value: Restored,
) -> Result<T, DecodeError> {
    T::from_restored(value).map_err(|err| DecodeError::FieldType {
        class: class.path(),
        field: field.to_string(),
        expected: err.expected,
        found: err.found,
    })
}

/// Unboxes a decoded object of a concrete class.
pub fn downcast_object<T: TlObject>(
    value: Restored,
    expected: &'static str,
) -> Result<T, TypeMismatch> {
    match value {
        Restored::Object(obj) => {
            let found = obj.class().path();
            obj.into_any()
                .downcast::<T>()
                .map(|obj| *obj)
                .map_err(|_| TypeMismatch { expected, found })
        }
        other => Err(TypeMismatch::new(expected, &other)),
    }
}

/// Field types that take part in dictionary conversion.
pub trait IntoValue {
    fn to_value(&self, conv: &dyn DictConverter) -> Result<Value, EncodeError>;
}

/// Field types that can be rebuilt from a decoded value.
pub trait FromRestored: Sized {
    /// Type name used in mismatch diagnostics.
    const EXPECTED: &'static str;

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch>;

    /// Value used when the field is absent from the record.
    fn missing() -> Option<Self> {
        None
    }
}

/// Zero value of a field type, used for assignment-style construction.
pub trait Zeroed {
    fn zeroed() -> Self;
}

impl IntoValue for bool {
    fn to_value(&self, _conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }
}

impl FromRestored for bool {
    const EXPECTED: &'static str = "bool";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::Bool(v) => Ok(v),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl IntoValue for i32 {
    fn to_value(&self, _conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        Ok(Value::Int(i64::from(*self)))
    }
}

impl FromRestored for i32 {
    const EXPECTED: &'static str = "int32";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::Int(v) => i32::try_from(v).map_err(|_| TypeMismatch {
                expected: Self::EXPECTED,
                found: format!("int {v}"),
            }),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl IntoValue for i64 {
    fn to_value(&self, _conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        Ok(Value::Int(*self))
    }
}

impl FromRestored for i64 {
    const EXPECTED: &'static str = "int64";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::Int(v) => Ok(v),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl IntoValue for f64 {
    fn to_value(&self, _conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        if !self.is_finite() {
            return Err(EncodeError::NonFiniteFloat(*self));
        }
        Ok(Value::Float(*self))
    }
}

impl FromRestored for f64 {
    const EXPECTED: &'static str = "double";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::Float(v) => Ok(v),
            Restored::Int(v) => Ok(v as f64),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl IntoValue for String {
    fn to_value(&self, _conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        Ok(Value::Str(self.clone()))
    }
}

impl FromRestored for String {
    const EXPECTED: &'static str = "string";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::Str(v) => Ok(v),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl IntoValue for Bytes {
    fn to_value(&self, _conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(self.0.clone()))
    }
}

impl FromRestored for Bytes {
    const EXPECTED: &'static str = "bytes";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::Bytes(v) => Ok(Bytes(v)),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl IntoValue for OffsetDateTime {
    fn to_value(&self, _conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        Ok(Value::DateTime(*self))
    }
}

impl FromRestored for OffsetDateTime {
    const EXPECTED: &'static str = "datetime";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::DateTime(v) => Ok(v),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn to_value(&self, conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        match self {
            Some(value) => value.to_value(conv),
            None => Ok(Value::Null),
        }
    }
}

impl<T: FromRestored> FromRestored for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::Null => Ok(None),
            other => T::from_restored(other).map(Some),
        }
    }

    fn missing() -> Option<Self> {
        Some(None)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn to_value(&self, conv: &dyn DictConverter) -> Result<Value, EncodeError> {
        self.iter()
            .map(|item| item.to_value(conv))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }
}

impl<T: FromRestored> FromRestored for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_restored(value: Restored) -> Result<Self, TypeMismatch> {
        match value {
            Restored::List(items) => items.into_iter().map(T::from_restored).collect(),
            other => Err(TypeMismatch::new(Self::EXPECTED, &other)),
        }
    }
}

impl Zeroed for bool {
    fn zeroed() -> Self {
        false
    }
}

impl Zeroed for i32 {
    fn zeroed() -> Self {
        0
    }
}

impl Zeroed for i64 {
    fn zeroed() -> Self {
        0
    }
}

impl Zeroed for f64 {
    fn zeroed() -> Self {
        0.0
    }
}

impl Zeroed for String {
    fn zeroed() -> Self {
        String::new()
    }
}

impl Zeroed for Bytes {
    fn zeroed() -> Self {
        Bytes::default()
    }
}

impl Zeroed for OffsetDateTime {
    fn zeroed() -> Self {
        OffsetDateTime::UNIX_EPOCH
    }
}

impl<T> Zeroed for Option<T> {
    fn zeroed() -> Self {
        None
    }
}

impl<T> Zeroed for Vec<T> {
    fn zeroed() -> Self {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{LibraryConverter, TlClass};
    use crate::tl::types::{PeerChat, PeerUser};

    fn fields(entries: Vec<(&str, Restored)>) -> Fields {
        Fields::new(
            PeerUser::descriptor(),
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn record_tag_overwrites_previous_value() {
        let mut record = Record::tagged("Message");
        record.set_tag("tl.types.Message");
        assert_eq!(record.tag(), Some("tl.types.Message"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn option_missing_is_none_and_required_missing_fails() {
        let mut f = fields(vec![]);
        let opt: Option<i64> = f.take("user_id").unwrap();
        assert_eq!(opt, None);

        let err = f.take::<i64>("user_id").unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "user_id", .. }));
    }

    #[test]
    fn int32_range_is_checked() {
        let mut f = fields(vec![("user_id", Restored::Int(i64::from(i32::MAX) + 1))]);
        let err = f.take::<i32>("user_id").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("tl.types.PeerUser.user_id"));
        assert!(msg.contains("expected int32"));
    }

    #[test]
    fn leftover_entries_are_rejected() {
        let f = fields(vec![("bogus", Restored::Null)]);
        let err = f.finish().unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedField { ref field, .. } if field == "bogus"));
    }

    #[test]
    fn object_field_downcast_reports_found_class() {
        let value = Restored::Object(Box::new(PeerChat { chat_id: 3 }));
        let err = downcast_object::<PeerUser>(value, "PeerUser").unwrap_err();
        assert_eq!(err.found, "tl.types.PeerChat");
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = value.to_value(&LibraryConverter).unwrap_err();
            assert!(matches!(err, EncodeError::NonFiniteFloat(_)));
        }
        assert_eq!(1.5f64.to_value(&LibraryConverter).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn vec_and_option_convert_elementwise() {
        let value = vec![Some(1i64), None].to_value(&LibraryConverter).unwrap();
        assert_eq!(value, Value::List(vec![Value::Int(1), Value::Null]));
    }
}
