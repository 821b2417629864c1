//! Constructors of the `tl.types` namespace.

pub mod messages;

use time::OffsetDateTime;

use crate::value::Bytes;
use crate::{tl_object, tl_union};

const MODULE: &str = "tl.types";

tl_object! {
    pub struct PeerUser in MODULE {
        pub user_id: i64,
    }
}

tl_object! {
    pub struct PeerChat in MODULE {
        pub chat_id: i64,
    }
}

tl_object! {
    pub struct PeerChannel in MODULE {
        pub channel_id: i64,
    }
}

tl_union! {
    /// Any peer a message can belong to or come from.
    pub enum TypePeer in MODULE {
        User(PeerUser),
        Chat(PeerChat),
        Channel(PeerChannel),
    }
}

tl_object! {
    pub struct MessageEntityMention in MODULE {
        pub offset: i32,
        pub length: i32,
    }
}

tl_object! {
    pub struct MessageEntityBold in MODULE {
        pub offset: i32,
        pub length: i32,
    }
}

tl_object! {
    pub struct MessageEntityTextUrl in MODULE {
        pub offset: i32,
        pub length: i32,
        pub url: String,
    }
}

tl_union! {
    /// Formatting span inside a message text.
    pub enum TypeMessageEntity in MODULE {
        Mention(MessageEntityMention),
        Bold(MessageEntityBold),
        TextUrl(MessageEntityTextUrl),
    }
}

tl_object! {
    pub struct PhotoSizeEmpty in MODULE {
        pub kind as "type": String,
    }
}

tl_object! {
    pub struct PhotoSize in MODULE {
        pub kind as "type": String,
        pub w: i32,
        pub h: i32,
        pub size: i32,
    }
}

tl_object! {
    /// Inline low-resolution preview.
    pub struct PhotoStrippedSize in MODULE {
        pub kind as "type": String,
        pub bytes: Bytes,
    }
}

tl_object! {
    pub struct PhotoSizeProgressive in MODULE {
        pub kind as "type": String,
        pub w: i32,
        pub h: i32,
        /// Byte offsets of the progressive scans.
        pub sizes: Vec<i32>,
    }
}

tl_union! {
    pub enum TypePhotoSize in MODULE {
        Empty(PhotoSizeEmpty),
        Size(PhotoSize),
        Stripped(PhotoStrippedSize),
        Progressive(PhotoSizeProgressive),
    }
}

tl_object! {
    pub struct PhotoEmpty in MODULE {
        pub id: i64,
    }
}

tl_object! {
    pub struct Photo in MODULE {
        pub id: i64,
        pub access_hash: i64,
        pub file_reference: Bytes,
        pub date: OffsetDateTime,
        pub sizes: Vec<TypePhotoSize>,
        pub dc_id: i32,
        pub has_stickers: bool,
    }
}

tl_union! {
    pub enum TypePhoto in MODULE {
        Empty(PhotoEmpty),
        Photo(Photo),
    }
}

tl_object! {
    pub struct MessageMediaEmpty in MODULE {}
}

tl_object! {
    pub struct MessageMediaPhoto in MODULE {
        pub spoiler: bool,
        pub photo: Option<TypePhoto>,
        pub ttl_seconds: Option<i32>,
    }
}

tl_union! {
    pub enum TypeMessageMedia in MODULE {
        Empty(MessageMediaEmpty),
        Photo(MessageMediaPhoto),
    }
}

tl_object! {
    pub struct ReactionEmpty in MODULE {}
}

tl_object! {
    pub struct ReactionEmoji in MODULE {
        pub emoticon: String,
    }
}

tl_object! {
    pub struct ReactionCustomEmoji in MODULE {
        pub document_id: i64,
    }
}

tl_union! {
    pub enum TypeReaction in MODULE {
        Empty(ReactionEmpty),
        Emoji(ReactionEmoji),
        CustomEmoji(ReactionCustomEmoji),
    }
}

tl_object! {
    pub struct ReactionCount in MODULE {
        pub reaction: TypeReaction,
        pub count: i32,
        pub chosen_order: Option<i32>,
    }
}

tl_object! {
    pub struct MessageReactions in MODULE {
        pub results: Vec<ReactionCount>,
        pub min: bool,
        pub can_see_list: bool,
        pub reactions_as_tags: bool,
    }
}

tl_object! {
    /// Origin of a forwarded message.
    pub struct MessageFwdHeader in MODULE {
        pub date: OffsetDateTime,
        pub imported: bool,
        pub from_id: Option<TypePeer>,
        pub from_name: Option<String>,
        pub channel_post: Option<i32>,
        pub post_author: Option<String>,
    }
}

tl_object! {
    pub struct MessageEmpty in MODULE {
        pub id: i32,
        pub peer_id: Option<TypePeer>,
    }
}

tl_object! {
    pub struct Message in MODULE {
        pub id: i32,
        pub peer_id: TypePeer,
        pub date: OffsetDateTime,
        pub message: String,
        pub out: bool,
        pub mentioned: bool,
        pub silent: bool,
        pub post: bool,
        pub pinned: bool,
        pub from_id: Option<TypePeer>,
        pub fwd_from: Option<MessageFwdHeader>,
        pub media: Option<TypeMessageMedia>,
        pub entities: Option<Vec<TypeMessageEntity>>,
        pub views: Option<i32>,
        pub forwards: Option<i32>,
        pub edit_date: Option<OffsetDateTime>,
        pub grouped_id: Option<i64>,
        pub reactions: Option<MessageReactions>,
    }
}

tl_union! {
    pub enum TypeMessage in MODULE {
        Empty(MessageEmpty),
        Message(Message),
    }
}

tl_object! {
    pub struct StickerSet in MODULE {
        pub id: i64,
        pub access_hash: i64,
        pub title: String,
        pub short_name: String,
        pub count: i32,
        pub archived: bool,
    }
}

tl_object! {
    pub struct StickerPack in MODULE {
        pub emoticon: String,
        pub documents: Vec<i64>,
    }
}
