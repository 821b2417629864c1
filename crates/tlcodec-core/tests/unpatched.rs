use tlcodec_core::tl::types::PeerUser;
use tlcodec_core::{DecodeError, EncodeError, decode, encode, patch_classes, patched_registry};

// Runs in its own process, so nothing has patched the classes yet.
#[test]
fn codec_refuses_to_run_before_patching() {
    assert!(patched_registry().is_none());

    let err = encode(&PeerUser { user_id: 1 }).unwrap_err();
    assert!(matches!(err, EncodeError::NotPatched));

    let err = decode(r#"{"_": "tl.types.PeerUser", "user_id": 1}"#).unwrap_err();
    assert!(matches!(err, DecodeError::NotPatched));

    patch_classes();
    assert!(patched_registry().is_some());
    assert!(encode(&PeerUser { user_id: 1 }).is_ok());
}
