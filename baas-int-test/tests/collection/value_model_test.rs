use baas::collection::{Array, Document, ARRAY_MAX_SIZE};
use baas::JsonType;

#[test]
fn test_round_trip_of_nested_document() {
    let text = r#"{"name":"Alice","age":30,"score":9.5,"active":true,"tags":["a","b"],"address":{"city":"Oslo","zip":null}}"#;
    let doc = Document::from_json(text);
    assert_eq!(doc.to_json_string(), text);
    assert_eq!(Document::from_json(&doc.to_json_string()), doc);
}

#[test]
fn test_defaults_on_mismatch() {
    let doc = Document::from_json(r#"{"s":"text","n":7,"b":true,"d":{},"a":[]}"#);
    assert_eq!(doc.get_i32("s", -1), -1);
    assert_eq!(doc.get_string("n", "none"), "none");
    assert!(!doc.get_bool("n", false));
    assert_eq!(doc.get_f64("b", 1.5), 1.5);
    assert!(doc.get_document("a").is_empty());
    assert!(doc.get_array("d").is_empty());
    assert_eq!(doc.get_i64("missing", 42), 42);
    assert_eq!(doc.size(), 5);
}

#[test]
fn test_malformed_json_degrades_to_empty() {
    let mut doc = Document::from_json(r#"{"a":1}"#);
    assert!(!doc.put_all("{broken"));
    assert!(doc.is_empty());
    assert!(Array::from_json("[1,").is_empty());
}

#[test]
fn test_document_key_write_asymmetry() {
    let mut doc = Document::new();
    doc.set("", 1);
    doc.put_document("", &Document::new());
    doc.put_null("");
    assert_eq!(doc.to_json_string(), r#"{"":1}"#);
}

#[test]
fn test_array_capacity_boundary() {
    let mut array = Array::new();
    assert!(!array.set(ARRAY_MAX_SIZE, 1));
    assert_eq!(array.size(), 0);

    assert!(array.set(ARRAY_MAX_SIZE - 1, 1));
    assert_eq!(array.size(), ARRAY_MAX_SIZE);
    assert!(!array.append(2));
    assert_eq!(array.size(), ARRAY_MAX_SIZE);
    assert_eq!(array.get_type(0), JsonType::Null);
}

#[test]
fn test_array_batch_reads() {
    let array = Array::from_json(r#"[1,"two",3.9,true,null]"#);
    assert_eq!(array.get_all_i32(0), vec![1, 0, 3, 0, 0]);
    assert_eq!(
        array.get_all_string("-"),
        vec!["-", "two", "-", "-", "-"]
    );
}
