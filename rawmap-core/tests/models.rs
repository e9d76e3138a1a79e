//! End-to-end tests of `#[raw_model]` structs over the runtime support.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rawmap_core::prelude::*;
use serde_json::{json, Value};

#[derive(RawEnum, Debug, PartialEq)]
enum MessageKind {
    #[raw("text")]
    Text,
    #[raw("email")]
    Email,
}

#[raw_model(hashable)]
#[derive(Debug)]
pub struct Location {
    #[raw(default = 0.0)]
    pub latitude: f64,
    #[raw(default = 0.0)]
    pub longitude: f64,
}

#[raw_model(hashable)]
#[derive(Debug)]
pub struct Device {
    #[raw("type", default = MessageKind::Text)]
    pub kind: MessageKind,

    #[raw(default = 0)]
    pub var: i64,

    pub history: Vec<Location>,

    pub note: Option<String>,

    pub tags: Option<Vec<String>>,

    #[raw(skip)]
    pub cached: u32,
}

fn obj(value: Value) -> RawMap {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn empty_map_reads_defaults() {
    let device = Device::from_raw(RawMap::new());
    assert_eq!(device.kind(), MessageKind::Text);
    assert_eq!(device.var(), 0);
    assert!(device.history().is_empty());
    assert_eq!(device.note(), None);
    assert_eq!(device.tags(), None);
    assert_eq!(device.cached, 0);
}

#[test]
fn typed_reads_from_populated_map() {
    let device = Device::from_raw(obj(json!({
        "type": "email",
        "var": 100,
        "history": [
            {"latitude": 50, "longitude": 60},
            {"latitude": 100, "longitude": 200},
        ],
    })));

    assert_eq!(device.kind(), MessageKind::Email);
    assert_eq!(device.var(), 100);
    let history = device.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].latitude(), 50.0);
    assert_eq!(history[1].longitude(), 200.0);
}

#[test]
fn write_then_read_round_trips() {
    let mut device = Device::from_raw(RawMap::new());

    device.set_var(7);
    assert_eq!(device.var(), 7);

    device.set_kind(MessageKind::Email);
    assert_eq!(device.kind(), MessageKind::Email);
    assert_eq!(device.raw().get("type"), Some(&json!("email")));

    let mut home = Location::from_raw(RawMap::new());
    home.set_latitude(1.5);
    device.set_history(vec![home]);
    assert_eq!(device.history().len(), 1);
    assert_eq!(device.history()[0].latitude(), 1.5);

    device.set_note(Some("hello".to_string()));
    assert_eq!(device.note(), Some("hello".to_string()));
}

#[test]
fn writing_none_stores_the_absent_sentinel() {
    let mut device = Device::from_raw(obj(json!({"note": "x", "tags": ["a"]})));

    device.set_note(None);
    assert_eq!(device.note(), None);
    assert_eq!(device.raw().get("note"), Some(&Value::Null));

    device.set_tags(None);
    assert_eq!(device.tags(), None);
    assert_eq!(device.raw().get("tags"), Some(&Value::Null));
}

#[test]
fn mistyped_entries_fall_back_to_defaults() {
    let device = Device::from_raw(obj(json!({
        "var": "not-a-number",
        "type": 17,
        "history": "not-an-array",
    })));
    assert_eq!(device.var(), 0);
    assert_eq!(device.kind(), MessageKind::Text);
    assert!(device.history().is_empty());
}

#[test]
fn undecodable_array_elements_are_dropped_in_order() {
    let device = Device::from_raw(obj(json!({
        "history": [
            {"latitude": 1, "longitude": 2},
            "garbage",
            {"latitude": 3, "longitude": 4},
            42,
        ],
    })));

    let history = device.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].latitude(), 1.0);
    assert_eq!(history[1].latitude(), 3.0);
}

#[test]
fn unknown_keys_survive_writes() {
    let mut device = Device::from_raw(obj(json!({"unmodeled": {"a": [1, 2]}})));
    device.set_var(5);
    assert_eq!(device.raw().get("unmodeled"), Some(&json!({"a": [1, 2]})));
}

#[test]
fn equality_covers_rewritten_members_only() {
    let map = obj(json!({"var": 3}));
    let mut left = Device::from_raw(map.clone());
    let mut right = Device::from_raw(map);

    // retained field differs, instances still compare equal
    left.cached = 1;
    right.cached = 2;
    assert_eq!(left, right);

    right.set_var(4);
    assert_ne!(left, right);
}

#[test]
fn defaulted_reads_compare_equal_to_explicit_entries() {
    let implicit = Device::from_raw(RawMap::new());
    let explicit = Device::from_raw(obj(json!({
        "type": "text",
        "var": 0,
        "history": [],
    })));
    assert_eq!(implicit, explicit);
    assert_eq!(hash_of(&implicit), hash_of(&explicit));
}

#[test]
fn hash_follows_member_values() {
    let mut left = Device::from_raw(RawMap::new());
    let mut right = Device::from_raw(RawMap::new());
    left.set_var(1);
    right.set_var(1);
    assert_eq!(hash_of(&left), hash_of(&right));

    right.set_var(2);
    assert_ne!(hash_of(&left), hash_of(&right));
}

#[test]
fn models_nest_through_raw_codable() {
    let device = Device::from_raw(obj(json!({"var": 9, "extra": true})));
    let encoded = RawCodable::encode(&device);
    let reborn = Device::decode(&encoded).expect("object should decode");
    assert_eq!(reborn.var(), 9);
    // unknown keys travel with the raw map
    assert_eq!(reborn.raw().get("extra"), Some(&json!(true)));
}

#[test]
fn builds_from_json_text() {
    let device = Device::from_raw(
        from_json_str(r#"{"type": "email", "var": 12}"#).expect("valid object"),
    );
    assert_eq!(device.kind(), MessageKind::Email);
    assert_eq!(device.var(), 12);

    assert!(from_json_str("[1]").is_err());
}

#[test]
fn raw_representable_works_generically() {
    fn rebuild<T: RawRepresentable>(source: &T) -> T {
        T::from_raw(source.raw().clone())
    }

    let mut device = Device::from_raw(RawMap::new());
    device.set_var(21);
    let copy = rebuild(&device);
    assert_eq!(copy.var(), 21);
}
