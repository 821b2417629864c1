//! Text codec for protocol objects.
//!
//! Encoding converts an object through the registry (every record tagged with
//! its fully-qualified class path) and renders the tree as JSON. Decoding
//! parses JSON, unwraps date/time and byte maps, then rebuilds tagged records
//! bottom-up through the registry.
//!
//! Layout:
//! - `layout`: reserved keys of the text form
//! - `writer`: value tree -> JSON text
//! - `reader`: JSON text -> value tree
//! - `restore`: value tree -> protocol objects
//! - `error`: encode/decode errors

pub mod error;
pub mod layout;
mod reader;
mod restore;
mod writer;

pub use error::{DecodeError, EncodeError};

use crate::object::{TlClass, TlObject};
use crate::registry::{Registry, patched_registry};
use crate::value::{Record, Restored};

/// Rendering options for [`encode_with`].
///
/// # Examples
/// ```
/// use tlcodec_core::EncodeOptions;
///
/// let options = EncodeOptions::default();
/// assert!(options.ensure_ascii);
/// assert_eq!(options.indent, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Escape every non-ASCII character as `\uXXXX`.
    pub ensure_ascii: bool,
    /// Pretty-print with this many spaces per level.
    pub indent: Option<usize>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ensure_ascii: true,
            indent: None,
        }
    }
}

impl Registry {
    /// Dictionary conversion with fully-qualified tags on every patched class.
    pub fn to_dict(&self, obj: &dyn TlObject) -> Result<Record, EncodeError> {
        crate::object::DictConverter::convert(self, obj)
    }

    pub fn encode(&self, obj: &dyn TlObject) -> Result<String, EncodeError> {
        self.encode_with(obj, &EncodeOptions::default())
    }

    pub fn encode_with(
        &self,
        obj: &dyn TlObject,
        options: &EncodeOptions,
    ) -> Result<String, EncodeError> {
        let record = self.to_dict(obj)?;
        Ok(writer::render(&record, options)?)
    }

    pub fn decode(&self, text: &str) -> Result<Box<dyn TlObject>, DecodeError> {
        let value = reader::parse_text(text)?;
        match restore::restore(self, value)? {
            Restored::Object(obj) => Ok(obj),
            other => Err(DecodeError::NotAnObject {
                found: other.kind(),
            }),
        }
    }

    pub fn decode_as<T: TlObject + TlClass>(&self, text: &str) -> Result<T, DecodeError> {
        let obj = self.decode(text)?;
        let found = obj.class().path();
        obj.into_any()
            .downcast::<T>()
            .map(|obj| *obj)
            .map_err(|_| DecodeError::WrongClass {
                expected: T::descriptor().path(),
                found,
            })
    }
}

/// Encodes `obj` with the process-wide registry.
///
/// Fails with [`EncodeError::NotPatched`] until [`crate::patch_classes`] ran.
pub fn encode(obj: &dyn TlObject) -> Result<String, EncodeError> {
    encode_with(obj, &EncodeOptions::default())
}

pub fn encode_with(obj: &dyn TlObject, options: &EncodeOptions) -> Result<String, EncodeError> {
    patched_registry()
        .ok_or(EncodeError::NotPatched)?
        .encode_with(obj, options)
}

/// Decodes text produced by [`encode`] with the process-wide registry.
pub fn decode(text: &str) -> Result<Box<dyn TlObject>, DecodeError> {
    patched_registry().ok_or(DecodeError::NotPatched)?.decode(text)
}

pub fn decode_as<T: TlObject + TlClass>(text: &str) -> Result<T, DecodeError> {
    patched_registry()
        .ok_or(DecodeError::NotPatched)?
        .decode_as(text)
}
