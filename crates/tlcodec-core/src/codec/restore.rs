use std::collections::BTreeMap;

use super::DecodeError;
use super::layout::TYPE_KEY;
use crate::object::ClassKind;
use crate::registry::Registry;
use crate::value::{Fields, Restored, Value};

/// Rebuilds protocol objects from a value tree, children first.
///
/// Records carrying a string tag become objects; records without a tag (or
/// with a null tag) stay plain maps.
pub(crate) fn restore(registry: &Registry, value: Value) -> Result<Restored, DecodeError> {
    Ok(match value {
        Value::Null => Restored::Null,
        Value::Bool(v) => Restored::Bool(v),
        Value::Int(v) => Restored::Int(v),
        Value::Float(v) => Restored::Float(v),
        Value::Str(v) => Restored::Str(v),
        Value::Bytes(v) => Restored::Bytes(v),
        Value::DateTime(v) => Restored::DateTime(v),
        Value::List(items) => Restored::List(
            items
                .into_iter()
                .map(|item| restore(registry, item))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Record(record) => {
            let mut tag = None;
            let mut entries = BTreeMap::new();
            for (key, value) in record {
                if key == TYPE_KEY {
                    tag = Some(value);
                } else {
                    entries.insert(key, restore(registry, value)?);
                }
            }
            match tag {
                None | Some(Value::Null) => Restored::Map(entries),
                Some(Value::Str(path)) => {
                    let class = registry.resolve(&path)?;
                    let ClassKind::Concrete(construction) = class.kind else {
                        return Err(DecodeError::UnresolvableClassPath(path));
                    };
                    Restored::Object(construction.build(Fields::new(class, entries))?)
                }
                Some(other) => return Err(DecodeError::InvalidTag { found: other.kind() }),
            }
        }
    })
}
