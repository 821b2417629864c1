//! Constructors of the `tl.types.messages` namespace.
//!
//! Several short names here also exist in `tl.types`; only the qualified path
//! tells them apart.

use super::{StickerPack, TypeMessage};
use crate::tl_object;

const MODULE: &str = "tl.types.messages";

tl_object! {
    /// A sticker set together with its emoji packs.
    pub struct StickerSet in MODULE {
        pub set: super::StickerSet,
        pub packs: Vec<StickerPack>,
    }
}

tl_object! {
    pub struct Messages in MODULE {
        pub messages: Vec<TypeMessage>,
        pub count: Option<i32>,
    }
}
