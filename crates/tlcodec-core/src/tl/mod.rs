//! The protocol-object library.
//!
//! Classes are grouped into namespaces (`tl.types`, `tl.types.messages`,
//! `tl.patched`). [`root`] is the top of the class tree walked at patch time;
//! [`non_registry_classes`] lists classes that live outside it.

pub mod patched;
pub mod types;

use crate::object::{ClassDescriptor, ClassKind, TlClass};

/// Root of the class tree.
pub fn root() -> &'static ClassDescriptor {
    static ROOT: ClassDescriptor = ClassDescriptor {
        module: "tl",
        name: "TLObject",
        kind: ClassKind::Abstract,
        subclasses: root_subclasses,
    };
    &ROOT
}

fn root_subclasses() -> Vec<&'static ClassDescriptor> {
    vec![
        types::TypePeer::descriptor(),
        types::TypeMessageEntity::descriptor(),
        types::TypePhotoSize::descriptor(),
        types::TypePhoto::descriptor(),
        types::TypeMessageMedia::descriptor(),
        types::TypeReaction::descriptor(),
        types::ReactionCount::descriptor(),
        types::MessageReactions::descriptor(),
        types::MessageFwdHeader::descriptor(),
        types::TypeMessage::descriptor(),
        types::StickerSet::descriptor(),
        types::StickerPack::descriptor(),
        types::messages::StickerSet::descriptor(),
        types::messages::Messages::descriptor(),
    ]
}

/// Classes that must be patched explicitly.
pub fn non_registry_classes() -> Vec<&'static ClassDescriptor> {
    vec![
        patched::Message::descriptor(),
        patched::MessageEmpty::descriptor(),
    ]
}
