//! Client-side specialisations of library constructors.
//!
//! These classes are not reachable from the class tree root and are
//! registered from [`super::non_registry_classes`]. They keep the short name
//! and field set of the class they wrap, so only the qualified path
//! distinguishes `tl.patched.Message` from `tl.types.Message`.

use std::any::Any;
use std::ops::{Deref, DerefMut};

use crate::codec::{DecodeError, EncodeError};
use crate::object::{
    ClassDescriptor, ClassKind, Construction, DictConverter, TlClass, TlObject, no_subclasses,
};
use crate::tl::types;
use crate::value::{Record, Restored, Zeroed};

const MODULE: &str = "tl.patched";

macro_rules! patched_class {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(pub $inner);

        impl $name {
            fn zeroed_object() -> Box<dyn TlObject> {
                Box::new($name(<$inner as Zeroed>::zeroed()))
            }
        }

        impl TlClass for $name {
            fn descriptor() -> &'static ClassDescriptor {
                static DESCRIPTOR: ClassDescriptor = ClassDescriptor {
                    module: MODULE,
                    name: stringify!($name),
                    kind: ClassKind::Concrete(Construction::Assign($name::zeroed_object)),
                    subclasses: no_subclasses,
                };
                &DESCRIPTOR
            }
        }

        impl TlObject for $name {
            fn class(&self) -> &'static ClassDescriptor {
                Self::descriptor()
            }

            fn to_dict(&self, conv: &dyn DictConverter) -> Result<Record, EncodeError> {
                self.0.to_dict(conv)
            }

            fn set_field(&mut self, name: &str, value: Restored) -> Result<(), DecodeError> {
                self.0.set_field(name, value).map_err(|err| match err {
                    DecodeError::UnexpectedField { field, .. } => DecodeError::UnexpectedField {
                        class: Self::descriptor().path(),
                        field,
                    },
                    DecodeError::FieldType {
                        field,
                        expected,
                        found,
                        ..
                    } => DecodeError::FieldType {
                        class: Self::descriptor().path(),
                        field,
                        expected,
                        found,
                    },
                    other => other,
                })
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn Any> {
                self
            }

            fn clone_object(&self) -> Box<dyn TlObject> {
                Box::new(self.clone())
            }

            fn eq_object(&self, other: &dyn TlObject) -> bool {
                other.downcast_ref::<Self>().is_some_and(|other| other == self)
            }
        }

        impl Deref for $name {
            type Target = $inner;

            fn deref(&self) -> &$inner {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $inner {
                &mut self.0
            }
        }
    };
}

patched_class! {
    /// Message as handed out by the client, with the library field set.
    Message(types::Message)
}

patched_class! {
    MessageEmpty(types::MessageEmpty)
}
