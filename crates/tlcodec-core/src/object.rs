use std::any::Any;
use std::fmt;

use crate::codec::{DecodeError, EncodeError};
use crate::value::{Fields, Record, Restored};

/// Strategy used by [`TlObject::to_dict`] to convert nested objects.
///
/// The object library ships [`LibraryConverter`], which tags records with the
/// short class name only. [`crate::Registry`] implements the same seam and
/// rewrites the tag to the fully-qualified class path.
pub trait DictConverter {
    fn convert(&self, obj: &dyn TlObject) -> Result<Record, EncodeError>;
}

/// Dictionary conversion as provided by the object library itself.
///
/// # Examples
/// ```
/// use tlcodec_core::tl::types::PeerUser;
/// use tlcodec_core::{DictConverter, LibraryConverter, Value};
///
/// let record = LibraryConverter.convert(&PeerUser { user_id: 7 }).unwrap();
/// assert_eq!(record.tag(), Some("PeerUser"));
/// assert_eq!(record.get("user_id"), Some(&Value::Int(7)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryConverter;

impl DictConverter for LibraryConverter {
    fn convert(&self, obj: &dyn TlObject) -> Result<Record, EncodeError> {
        obj.to_dict(self)
    }
}

/// A protocol object: an instance of a class known to the object library.
///
/// Implementations are normally generated by [`crate::tl_object!`].
pub trait TlObject: Any + fmt::Debug {
    /// Static identity of the object's class.
    fn class(&self) -> &'static ClassDescriptor;

    /// Field map of the object. `"_"` holds the short class name; nested
    /// objects are converted through `conv`.
    fn to_dict(&self, conv: &dyn DictConverter) -> Result<Record, EncodeError>;

    /// Assigns one decoded field onto an existing instance.
    fn set_field(&mut self, name: &str, value: Restored) -> Result<(), DecodeError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_object(&self) -> Box<dyn TlObject>;

    /// Structural equality against an object of any class.
    fn eq_object(&self, other: &dyn TlObject) -> bool;
}

impl dyn TlObject {
    pub fn downcast_ref<T: TlObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: TlObject>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl Clone for Box<dyn TlObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

impl PartialEq for dyn TlObject {
    fn eq(&self, other: &Self) -> bool {
        self.eq_object(other)
    }
}

/// Static access to a class descriptor.
pub trait TlClass {
    fn descriptor() -> &'static ClassDescriptor;
}

/// How a decoded record is turned back into an instance.
#[derive(Clone, Copy)]
pub enum Construction {
    /// The class accepts a single mapping of fields.
    Direct(fn(Fields) -> Result<Box<dyn TlObject>, DecodeError>),
    /// Zero-initialised instance, then one [`TlObject::set_field`] per entry.
    Assign(fn() -> Box<dyn TlObject>),
}

impl Construction {
    pub fn build(self, fields: Fields) -> Result<Box<dyn TlObject>, DecodeError> {
        match self {
            Construction::Direct(construct) => construct(fields),
            Construction::Assign(zeroed) => {
                let mut obj = zeroed();
                for (name, value) in fields.into_entries() {
                    obj.set_field(&name, value)?;
                }
                Ok(obj)
            }
        }
    }
}

#[derive(Clone, Copy)]
pub enum ClassKind {
    /// Grouping node of the class tree; never instantiated.
    Abstract,
    Concrete(Construction),
}

/// Static metadata describing one class of the object library.
///
/// Identity is the address of the static descriptor: two descriptors with the
/// same path are still different classes.
pub struct ClassDescriptor {
    /// Defining namespace, dot separated (e.g. `tl.types.messages`).
    pub module: &'static str,
    /// Short (unqualified) class name.
    pub name: &'static str,
    pub kind: ClassKind,
    /// Direct subclasses in the class tree.
    pub subclasses: fn() -> Vec<&'static ClassDescriptor>,
}

impl ClassDescriptor {
    /// Fully-qualified class path: module and short name joined by `.`.
    pub fn path(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    pub fn is(&self, other: &ClassDescriptor) -> bool {
        std::ptr::eq(self, other)
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self.kind, ClassKind::Concrete(_))
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ClassKind::Abstract => "abstract",
            ClassKind::Concrete(_) => "concrete",
        };
        write!(f, "ClassDescriptor({} {})", kind, self.path())
    }
}

/// Subclass list of a leaf class.
pub fn no_subclasses() -> Vec<&'static ClassDescriptor> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tl::types::{PeerChannel, PeerUser, TypePeer};

    #[test]
    fn path_joins_module_and_name() {
        assert_eq!(PeerUser::descriptor().path(), "tl.types.PeerUser");
        assert_eq!(TypePeer::descriptor().path(), "tl.types.TypePeer");
    }

    #[test]
    fn descriptor_identity_is_per_class() {
        let user = PeerUser::descriptor();
        assert!(user.is(PeerUser::descriptor()));
        assert!(!user.is(PeerChannel::descriptor()));
        assert!(user.is_concrete());
        assert!(!TypePeer::descriptor().is_concrete());
    }

    #[test]
    fn dyn_object_downcasts_and_compares() {
        let a: Box<dyn TlObject> = Box::new(PeerUser { user_id: 1 });
        let b = a.clone();
        assert!(a.is::<PeerUser>());
        assert_eq!(a.downcast_ref::<PeerUser>().map(|p| p.user_id), Some(1));
        assert!(a.as_ref() == b.as_ref());

        let c: Box<dyn TlObject> = Box::new(PeerChannel { channel_id: 1 });
        assert!(a.as_ref() != c.as_ref());
    }
}
