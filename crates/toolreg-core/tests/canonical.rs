use serde_json::json;
use toolreg_core::{canonical, sha256_hex};

#[test]
fn stable_json_bytes_are_key_order_deterministic() {
    let a = json!({"z": 2, "a": 1, "nested": {"y": true, "x": false}});
    let b = json!({"a": 1, "nested": {"x": false, "y": true}, "z": 2});
    let ba = canonical::stable_json_bytes(&a).expect("stable json a");
    let bb = canonical::stable_json_bytes(&b).expect("stable json b");
    assert_eq!(ba, bb);
}

#[test]
fn stable_json_bytes_preserve_array_order() {
    let v = json!({"items": ["b", "a", "c"]});
    let bytes = canonical::stable_json_bytes(&v).expect("stable json");
    let decoded: serde_json::Value = serde_json::from_slice(&bytes).expect("decode");
    assert_eq!(decoded["items"], json!(["b", "a", "c"]));
}

#[test]
fn stable_json_bytes_without_drops_only_named_keys() {
    let v = json!({"generatedAt": 1234, "tools": [], "version": "1.0.0"});
    let bytes = canonical::stable_json_bytes_without(&v, &["generatedAt"]).expect("bytes");
    let decoded: serde_json::Value = serde_json::from_slice(&bytes).expect("decode");
    assert!(decoded.get("generatedAt").is_none());
    assert_eq!(decoded["version"], "1.0.0");
}

#[test]
fn hash_ignores_excluded_key_differences() {
    let a = json!({"generatedAt": 1, "tools": ["t1"]});
    let b = json!({"generatedAt": 99, "tools": ["t1"]});
    let ha = canonical::stable_hash_hex(
        &canonical::stable_json_bytes_without(&a, &["generatedAt"]).expect("a"),
    );
    let hb = canonical::stable_hash_hex(
        &canonical::stable_json_bytes_without(&b, &["generatedAt"]).expect("b"),
    );
    assert_eq!(ha, hb);
}

#[test]
fn sha256_matches_known_vector() {
    assert_eq!(
        sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn stable_json_hash_repeatable_across_invocations() {
    let value = json!({"k2": 2, "k1": 1, "nested": {"b": 2, "a": 1}});
    let h1 = canonical::stable_json_hash_hex(&value).expect("hash1");
    let h2 = canonical::stable_json_hash_hex(&value).expect("hash2");
    assert_eq!(h1, h2);
}
