use serde_json::json;
use sorteiaki_core::{canonical, sha256, sha256_hex};

#[test]
fn equal_records_digest_equally_regardless_of_key_order() {
    let a = json!({"verification_hash": "SAK-00000001", "id": "res-1"});
    let b = json!({"id": "res-1", "verification_hash": "SAK-00000001"});
    assert_eq!(
        canonical::canonical_json_bytes(&a).expect("a"),
        canonical::canonical_json_bytes(&b).expect("b")
    );
    assert_eq!(
        canonical::canonical_digest(&a).expect("a"),
        canonical::canonical_digest(&b).expect("b")
    );
}

#[test]
fn sha256_matches_known_vector() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(sha256(b"abc").to_string(), sha256_hex(b"abc"));
    assert_eq!(sha256(b"").as_bytes()[0], 0xe3);
}

#[test]
fn digest_hex_has_fixed_width() {
    let hex = canonical::canonical_digest_hex(&json!({"winners": []})).expect("digest");
    assert_eq!(hex.len(), canonical::DIGEST_HEX_LEN);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}
