//! Sample objects used by the self-check.

use time::macros::datetime;

use crate::tl::patched;
use crate::tl::types::{
    Message, MessageEntityMention, MessageEntityTextUrl, MessageFwdHeader, MessageMediaPhoto,
    MessageReactions, Photo, PhotoSize, PhotoSizeProgressive, PhotoStrippedSize, PeerChannel,
    ReactionCount, ReactionEmoji, TypeMessageEntity, TypeMessageMedia, TypePeer, TypePhoto,
    TypePhotoSize, TypeReaction,
};
use crate::value::Bytes;

/// A channel post exercising nested objects, lists, unions, date/times and
/// byte blobs.
pub fn make_test_message() -> patched::Message {
    let reactions = ["🤔", "❤", "👍", "😢", "👎", "🔥", "🤬"]
        .into_iter()
        .zip(1..)
        .map(|(emoticon, count)| ReactionCount {
            reaction: TypeReaction::Emoji(ReactionEmoji {
                emoticon: emoticon.to_string(),
            }),
            count,
            chosen_order: None,
        })
        .collect();

    patched::Message(Message {
        id: 1001,
        peer_id: TypePeer::Channel(PeerChannel { channel_id: 1002 }),
        date: datetime!(2025-12-01 01:02:03 UTC),
        message: "message".to_string(),
        out: false,
        mentioned: false,
        silent: false,
        post: true,
        pinned: false,
        from_id: None,
        fwd_from: Some(MessageFwdHeader {
            date: datetime!(2025-12-01 00:01:02 UTC),
            imported: false,
            from_id: Some(TypePeer::Channel(PeerChannel { channel_id: 1003 })),
            from_name: None,
            channel_post: Some(1004),
            post_author: None,
        }),
        media: Some(TypeMessageMedia::Photo(MessageMediaPhoto {
            spoiler: false,
            photo: Some(TypePhoto::Photo(Photo {
                id: 1005,
                access_hash: 1006,
                file_reference: Bytes(vec![0x02, 0x40, 0xd5, 0xff]),
                date: datetime!(2025-12-01 01:02:03 UTC),
                sizes: vec![
                    TypePhotoSize::Stripped(PhotoStrippedSize {
                        kind: "i".to_string(),
                        bytes: Bytes(vec![0x01, 0x15, 0x28, 0x62, 0x38, 0x89]),
                    }),
                    TypePhotoSize::Size(PhotoSize {
                        kind: "m".to_string(),
                        w: 320,
                        h: 100,
                        size: 1000,
                    }),
                    TypePhotoSize::Size(PhotoSize {
                        kind: "x".to_string(),
                        w: 800,
                        h: 400,
                        size: 2000,
                    }),
                    TypePhotoSize::Progressive(PhotoSizeProgressive {
                        kind: "y".to_string(),
                        w: 1080,
                        h: 500,
                        sizes: vec![10000, 20000, 40000, 50000, 70000],
                    }),
                ],
                dc_id: 100,
                has_stickers: false,
            })),
            ttl_seconds: None,
        })),
        // offsets are arbitrary, the entities only need to be present
        entities: Some(vec![
            TypeMessageEntity::TextUrl(MessageEntityTextUrl {
                offset: 1,
                length: 9,
                url: "URL".to_string(),
            }),
            TypeMessageEntity::Mention(MessageEntityMention {
                offset: 5,
                length: 2,
            }),
        ]),
        views: Some(100),
        forwards: Some(10),
        edit_date: Some(datetime!(2025-12-01 01:02:04 UTC)),
        grouped_id: None,
        reactions: Some(MessageReactions {
            results: reactions,
            min: false,
            can_see_list: false,
            reactions_as_tags: false,
        }),
    })
}
