use std::collections::HashSet;

use time::macros::datetime;
use tlcodec_core::tl::patched;
use tlcodec_core::tl::types::{
    self, MessageEmpty, MessageEntityBold, MessageMediaEmpty, PeerChat, PeerUser,
    ReactionCustomEmoji, StickerPack, TypeMessage, TypeMessageEntity, TypeMessageMedia, TypePeer,
};
use tlcodec_core::{
    DecodeError, DictConverter, EncodeError, EncodeOptions, LibraryConverter, TlClass, TlObject,
    Value, decode, decode_as, encode, encode_with, make_test_message, patch_classes, tl_object,
};

tl_object! {
    /// Declared outside the library tree, so never registered.
    pub struct GeoPoint in "demo.types" {
        pub lat: f64,
        pub long: f64,
    }
}

fn message(id: i32, text: &str, peer: TypePeer) -> types::Message {
    types::Message {
        id,
        peer_id: peer,
        date: datetime!(2025-12-01 01:02:03 UTC),
        message: text.to_string(),
        out: false,
        mentioned: false,
        silent: false,
        post: false,
        pinned: false,
        from_id: None,
        fwd_from: None,
        media: None,
        entities: None,
        views: None,
        forwards: None,
        edit_date: None,
        grouped_id: None,
        reactions: None,
    }
}

fn sticker_set() -> types::StickerSet {
    types::StickerSet {
        id: 11,
        access_hash: -12,
        title: "Cats".to_string(),
        short_name: "cats".to_string(),
        count: 2,
        archived: false,
    }
}

#[test]
fn message_with_nested_peer_round_trips() {
    patch_classes();
    let original = message(42, "hi", TypePeer::User(PeerUser { user_id: 7 }));
    let text = encode(&original).unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["_"], "tl.types.Message");
    assert_eq!(value["peer_id"]["_"], "tl.types.PeerUser");

    let restored: types::Message = decode_as(&text).unwrap();
    assert_eq!(restored.id, 42);
    assert_eq!(restored.message, "hi");
    let TypePeer::User(peer) = &restored.peer_id else {
        panic!("expected a user peer, got {:?}", restored.peer_id);
    };
    assert_eq!(peer.user_id, 7);
    assert_eq!(restored, original);
}

#[test]
fn sample_message_round_trips_as_patched_class() {
    patch_classes();
    let original = make_test_message();
    let text = encode(&original).unwrap();
    assert!(text.is_ascii());

    let restored = decode(&text).unwrap();
    assert!(restored.is::<patched::Message>());
    assert!(restored.as_ref() == &original as &dyn TlObject);
}

#[test]
fn assorted_classes_round_trip() {
    patch_classes();
    let objects: Vec<Box<dyn TlObject>> = vec![
        Box::new(MessageMediaEmpty {}),
        Box::new(ReactionCustomEmoji { document_id: i64::MIN }),
        Box::new(StickerPack {
            emoticon: "😺".to_string(),
            documents: vec![],
        }),
        Box::new(types::messages::StickerSet {
            set: sticker_set(),
            packs: vec![StickerPack {
                emoticon: "😸".to_string(),
                documents: vec![1, 2, 3],
            }],
        }),
        Box::new(types::messages::Messages {
            messages: vec![
                TypeMessage::Empty(MessageEmpty {
                    id: 1,
                    peer_id: Some(TypePeer::Chat(PeerChat { chat_id: 5 })),
                }),
                TypeMessage::Message(types::Message {
                    media: Some(TypeMessageMedia::Empty(MessageMediaEmpty {})),
                    entities: Some(vec![TypeMessageEntity::Bold(MessageEntityBold {
                        offset: 0,
                        length: 3,
                    })]),
                    ..message(2, "two", TypePeer::Chat(PeerChat { chat_id: 5 }))
                }),
            ],
            count: None,
        }),
        Box::new(patched::MessageEmpty(MessageEmpty {
            id: 3,
            peer_id: None,
        })),
    ];

    for original in objects {
        let text = encode(original.as_ref()).unwrap();
        let restored = decode(&text).unwrap();
        assert!(
            restored.class().is(original.class()),
            "class changed for {}",
            original.class().path()
        );
        assert!(restored.as_ref() == original.as_ref(), "mismatch for {text}");
    }
}

#[test]
fn classes_sharing_a_short_name_get_distinct_tags() {
    let registry = patch_classes();
    let library = types::messages::StickerSet {
        set: sticker_set(),
        packs: vec![],
    };

    let plain = LibraryConverter.convert(&library).unwrap();
    let Some(Value::Record(nested)) = plain.get("set") else {
        panic!("expected nested record");
    };
    assert_eq!(plain.tag(), nested.tag(), "library tags are ambiguous");

    let tagged = registry.to_dict(&library).unwrap();
    let Some(Value::Record(nested)) = tagged.get("set") else {
        panic!("expected nested record");
    };
    assert_eq!(tagged.tag(), Some("tl.types.messages.StickerSet"));
    assert_eq!(nested.tag(), Some("tl.types.StickerSet"));

    let mut seen = HashSet::new();
    for class in registry.classes() {
        assert!(seen.insert(class.path()), "duplicate tag {}", class.path());
    }
    assert_eq!(seen.len(), registry.len());
}

#[test]
fn every_patched_class_tags_its_instances() {
    let registry = patch_classes();
    let instances: Vec<Box<dyn TlObject>> = vec![
        Box::new(PeerUser { user_id: 1 }),
        Box::new(message(1, "", TypePeer::User(PeerUser { user_id: 1 }))),
        Box::new(patched::Message(message(
            1,
            "",
            TypePeer::User(PeerUser { user_id: 1 }),
        ))),
    ];
    for obj in instances {
        assert!(registry.is_patched(obj.class()));
        let record = registry.to_dict(obj.as_ref()).unwrap();
        assert_eq!(record.tag(), Some(obj.class().path().as_str()));
    }
}

#[test]
fn unknown_tag_is_rejected() {
    patch_classes();
    let err = decode(r#"{"_": "nonexistent.Class", "id": 1}"#).unwrap_err();
    assert!(matches!(err, DecodeError::UnresolvableClassPath(ref path) if path == "nonexistent.Class"));

    let nested = r#"{"_": "tl.types.MessageEmpty", "id": 1,
                     "peer_id": {"_": "tl.types.PeerGone", "gone_id": 2}}"#;
    let err = decode(nested).unwrap_err();
    assert!(matches!(err, DecodeError::UnresolvableClassPath(ref path) if path == "tl.types.PeerGone"));
}

#[test]
fn unregistered_class_is_refused_at_encode() {
    patch_classes();
    let point = GeoPoint { lat: 1.0, long: 2.0 };
    let err = encode(&point).unwrap_err();
    assert!(matches!(err, EncodeError::Unregistered { ref class } if class == "demo.types.GeoPoint"));

    let record = LibraryConverter.convert(&point).unwrap();
    assert_eq!(record.tag(), Some("GeoPoint"));
}

#[test]
fn non_finite_float_is_refused() {
    let err = LibraryConverter
        .convert(&GeoPoint {
            lat: f64::NAN,
            long: 2.0,
        })
        .unwrap_err();
    assert!(matches!(err, EncodeError::NonFiniteFloat(v) if v.is_nan()));
}

#[test]
fn short_library_tags_do_not_resolve() {
    patch_classes();
    let err = decode(r#"{"_": "PeerUser", "user_id": 1}"#).unwrap_err();
    assert!(matches!(err, DecodeError::UnresolvableClassPath(_)));
}

#[test]
fn malformed_and_untagged_inputs_fail() {
    patch_classes();
    assert!(matches!(decode("not json").unwrap_err(), DecodeError::Malformed(_)));
    assert!(matches!(
        decode(r#"{"_": 5}"#).unwrap_err(),
        DecodeError::InvalidTag { found: "int" }
    ));
    assert!(matches!(
        decode(r#"{"user_id": 1}"#).unwrap_err(),
        DecodeError::NotAnObject { ref found } if found == "map"
    ));
    assert!(matches!(
        decode(r#"{"_": "tl.types.PeerUser", "user_id": "seven"}"#).unwrap_err(),
        DecodeError::FieldType { ref field, .. } if field == "user_id"
    ));
    assert!(matches!(
        decode(r#"{"_": "tl.types.PeerUser"}"#).unwrap_err(),
        DecodeError::MissingField { field: "user_id", .. }
    ));
    assert!(matches!(
        decode(r#"{"_": "tl.types.PeerUser", "user_id": 1, "extra": 2}"#).unwrap_err(),
        DecodeError::UnexpectedField { ref field, .. } if field == "extra"
    ));
}

#[test]
fn decode_as_checks_the_class() {
    patch_classes();
    let text = encode(&PeerChat { chat_id: 4 }).unwrap();
    let err = decode_as::<PeerUser>(&text).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::WrongClass { ref expected, ref found }
            if expected == "tl.types.PeerUser" && found == "tl.types.PeerChat"
    ));
}

#[test]
fn repeated_patching_keeps_output_stable() {
    let first = patch_classes();
    let obj = make_test_message();
    let once = encode(&obj).unwrap();

    let second = patch_classes();
    assert!(std::ptr::eq(first, second));
    assert_eq!(encode(&obj).unwrap(), once);
    assert_eq!(once.matches("\"tl.patched.Message\"").count(), 1);
}

#[test]
fn pretty_output_keeps_unicode_when_asked() {
    patch_classes();
    let options = EncodeOptions {
        ensure_ascii: false,
        indent: Some(2),
    };
    let text = encode_with(&make_test_message(), &options).unwrap();
    assert!(text.contains("🤔"));
    assert!(text.contains("\n  \"_\": \"tl.patched.Message\""));
    let restored: patched::Message = decode_as(&text).unwrap();
    assert_eq!(restored, make_test_message());
}

#[test]
fn patch_summary_counts_explicit_classes() {
    let registry = patch_classes();
    let summary = registry.summary();
    assert_eq!(summary.explicit, 2);
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.total(), registry.len());
    assert!(registry.resolve(&patched::Message::descriptor().path()).is_ok());
}
