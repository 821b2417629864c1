//! Declarative class definitions for the object library.
//!
//! `tl_object!` declares one concrete class: the struct, its static
//! descriptor, dictionary conversion, direct construction from decoded fields
//! and field-by-field assignment. `tl_union!` declares an abstract type as an
//! enum over concrete classes; its descriptor is an abstract node of the class
//! tree whose subclasses are the variants.

/// Declares a concrete protocol class.
///
/// A field is written under its Rust name unless renamed with
/// `field as "name"`.
///
/// ```
/// use tlcodec_core::{TlClass, tl_object};
///
/// tl_object! {
///     /// Geographic point.
///     pub struct GeoPoint in "demo.types" {
///         pub lat: f64,
///         pub long: f64,
///     }
/// }
///
/// assert_eq!(GeoPoint::descriptor().path(), "demo.types.GeoPoint");
/// ```
#[macro_export]
macro_rules! tl_object {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident in $module:tt {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident $(as $wire:literal)? : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        impl $name {
            #[allow(unused_mut)]
            fn from_fields(
                mut fields: $crate::Fields,
            ) -> ::std::result::Result<::std::boxed::Box<dyn $crate::TlObject>, $crate::DecodeError> {
                let value = Self {
                    $( $field: fields.take($crate::__tl_wire_name!($field $(as $wire)?))?, )*
                };
                fields.finish()?;
                ::std::result::Result::Ok(::std::boxed::Box::new(value))
            }
        }

        impl $crate::TlClass for $name {
            fn descriptor() -> &'static $crate::ClassDescriptor {
                static DESCRIPTOR: $crate::ClassDescriptor = $crate::ClassDescriptor {
                    module: $module,
                    name: stringify!($name),
                    kind: $crate::ClassKind::Concrete($crate::Construction::Direct($name::from_fields)),
                    subclasses: $crate::no_subclasses,
                };
                &DESCRIPTOR
            }
        }

        impl $crate::TlObject for $name {
            fn class(&self) -> &'static $crate::ClassDescriptor {
                <Self as $crate::TlClass>::descriptor()
            }

            #[allow(unused_mut, unused_variables)]
            fn to_dict(
                &self,
                conv: &dyn $crate::DictConverter,
            ) -> ::std::result::Result<$crate::Record, $crate::EncodeError> {
                let mut record = $crate::Record::tagged(stringify!($name));
                $(
                    record.insert(
                        $crate::__tl_wire_name!($field $(as $wire)?),
                        $crate::IntoValue::to_value(&self.$field, conv)?,
                    );
                )*
                ::std::result::Result::Ok(record)
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                name: &str,
                value: $crate::Restored,
            ) -> ::std::result::Result<(), $crate::DecodeError> {
                let class = <Self as $crate::TlClass>::descriptor();
                match name {
                    $(
                        $crate::__tl_wire_name!($field $(as $wire)?) => {
                            self.$field = $crate::convert_field(class, name, value)?;
                            ::std::result::Result::Ok(())
                        }
                    )*
                    _ => ::std::result::Result::Err($crate::DecodeError::UnexpectedField {
                        class: class.path(),
                        field: name.to_string(),
                    }),
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn clone_object(&self) -> ::std::boxed::Box<dyn $crate::TlObject> {
                ::std::boxed::Box::new(self.clone())
            }

            fn eq_object(&self, other: &dyn $crate::TlObject) -> bool {
                other
                    .as_any()
                    .downcast_ref::<Self>()
                    .is_some_and(|other| other == self)
            }
        }

        impl $crate::IntoValue for $name {
            fn to_value(
                &self,
                conv: &dyn $crate::DictConverter,
            ) -> ::std::result::Result<$crate::Value, $crate::EncodeError> {
                conv.convert(self).map($crate::Value::Record)
            }
        }

        impl $crate::FromRestored for $name {
            const EXPECTED: &'static str = stringify!($name);

            fn from_restored(
                value: $crate::Restored,
            ) -> ::std::result::Result<Self, $crate::TypeMismatch> {
                $crate::downcast_object::<Self>(value, Self::EXPECTED)
            }
        }

        impl $crate::Zeroed for $name {
            fn zeroed() -> Self {
                Self {
                    $( $field: $crate::Zeroed::zeroed(), )*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tl_wire_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident as $wire:literal) => {
        $wire
    };
}

/// Declares an abstract type as an enum over concrete classes.
///
/// The first variant provides the zero value.
#[macro_export]
macro_rules! tl_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $module:tt {
            $first:ident($first_ty:ty)
            $(, $variant:ident($vty:ty))* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $first($first_ty),
            $( $variant($vty), )*
        }

        impl $name {
            /// The wrapped object.
            pub fn as_object(&self) -> &dyn $crate::TlObject {
                match self {
                    Self::$first(obj) => obj as &dyn $crate::TlObject,
                    $( Self::$variant(obj) => obj as &dyn $crate::TlObject, )*
                }
            }
        }

        impl $crate::TlClass for $name {
            fn descriptor() -> &'static $crate::ClassDescriptor {
                fn subclasses() -> ::std::vec::Vec<&'static $crate::ClassDescriptor> {
                    ::std::vec![
                        <$first_ty as $crate::TlClass>::descriptor(),
                        $( <$vty as $crate::TlClass>::descriptor(), )*
                    ]
                }
                static DESCRIPTOR: $crate::ClassDescriptor = $crate::ClassDescriptor {
                    module: $module,
                    name: stringify!($name),
                    kind: $crate::ClassKind::Abstract,
                    subclasses,
                };
                &DESCRIPTOR
            }
        }

        impl $crate::IntoValue for $name {
            fn to_value(
                &self,
                conv: &dyn $crate::DictConverter,
            ) -> ::std::result::Result<$crate::Value, $crate::EncodeError> {
                conv.convert(self.as_object()).map($crate::Value::Record)
            }
        }

        impl $crate::FromRestored for $name {
            const EXPECTED: &'static str = stringify!($name);

            fn from_restored(
                value: $crate::Restored,
            ) -> ::std::result::Result<Self, $crate::TypeMismatch> {
                let obj = match value {
                    $crate::Restored::Object(obj) => obj,
                    other => return ::std::result::Result::Err(
                        $crate::TypeMismatch::new(Self::EXPECTED, &other),
                    ),
                };
                let found = obj.class().path();
                let any = obj.into_any();
                let any = match any.downcast::<$first_ty>() {
                    ::std::result::Result::Ok(obj) => return ::std::result::Result::Ok(Self::$first(*obj)),
                    ::std::result::Result::Err(any) => any,
                };
                $(
                    let any = match any.downcast::<$vty>() {
                        ::std::result::Result::Ok(obj) => return ::std::result::Result::Ok(Self::$variant(*obj)),
                        ::std::result::Result::Err(any) => any,
                    };
                )*
                drop(any);
                ::std::result::Result::Err($crate::TypeMismatch {
                    expected: Self::EXPECTED,
                    found,
                })
            }
        }

        impl $crate::Zeroed for $name {
            fn zeroed() -> Self {
                Self::$first($crate::Zeroed::zeroed())
            }
        }

        $(
            impl ::std::convert::From<$vty> for $name {
                fn from(obj: $vty) -> Self {
                    Self::$variant(obj)
                }
            }
        )*

        impl ::std::convert::From<$first_ty> for $name {
            fn from(obj: $first_ty) -> Self {
                Self::$first(obj)
            }
        }
    };
}
