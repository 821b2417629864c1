//! Round-trippable text serialization for protocol objects.
//!
//! The object library converts every object into a field map whose `"_"`
//! entry only holds the short class name. Several classes share a short name
//! (`tl.types.Message` and `tl.patched.Message`, `tl.types.StickerSet` and
//! `tl.types.messages.StickerSet`), so such dumps cannot be turned back into
//! the right typed object. This crate adds the missing type identity:
//!
//! - `registry`: walks the class tree once ([`enumerate_classes`]) and builds
//!   an immutable [`Registry`]; converting through it tags every record with
//!   its fully-qualified class path.
//! - `codec`: [`encode`] renders the tagged tree as JSON (date/times and byte
//!   blobs in fixed wrapper maps); [`decode`] parses it and rebuilds objects
//!   bottom-up, resolving each tag through the registry.
//! - `tl`: the object library itself, declared with [`tl_object!`] and
//!   [`tl_union!`].
//!
//! Invariants:
//! - Every record produced from a patched class carries exactly one `"_"`
//!   entry naming exactly one registered class.
//! - The registry is built at most once per process and never changes after.
//! - A tag that does not resolve is an error, never a partial object.
//!
//! Known limitations: a genuine field literally named `"_"` would collide with
//! the tag, and dumps from another library version fail to decode when a
//! class was renamed or removed.
//!
//! # Examples
//! ```
//! use tlcodec_core::tl::types::PeerUser;
//! use tlcodec_core::{decode, encode, patch_classes};
//!
//! patch_classes();
//! let text = encode(&PeerUser { user_id: 7 })?;
//! assert_eq!(text, r#"{"_":"tl.types.PeerUser","user_id":7}"#);
//!
//! let restored = decode(&text)?;
//! assert_eq!(restored.downcast_ref::<PeerUser>(), Some(&PeerUser { user_id: 7 }));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod check;
mod codec;
mod macros;
mod object;
mod registry;
mod sample;
pub mod tl;
mod value;

pub use check::{CheckOutcome, check_round_trip};
pub use codec::layout::TYPE_KEY;
pub use codec::{DecodeError, EncodeError, EncodeOptions, decode, decode_as, encode, encode_with};
pub use object::{
    ClassDescriptor, ClassKind, Construction, DictConverter, LibraryConverter, TlClass, TlObject,
    no_subclasses,
};
pub use registry::{
    PatchOutcome, PatchSkipped, PatchSummary, Patcher, Registry, SkipReason, duplicate_names,
    enumerate_classes, patch_classes, patched_registry,
};
pub use sample::make_test_message;
pub use value::{Bytes, Fields, FromRestored, IntoValue, Record, Restored, TypeMismatch, Value, Zeroed};

#[doc(hidden)]
pub use value::{convert_field, downcast_object};
