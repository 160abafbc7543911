use baas::collection::{Array, Document};
use baas::query::{Query, ReadPreference};

#[test]
fn test_equal_to_scalar_and_document() {
    assert_eq!(Query::new().equal_to("k", 5).conditions_string(), r#"{"k":5}"#);

    let inner = Document::from_json(r#"{"x":1}"#);
    assert_eq!(
        Query::new().equal_to("k", &inner).conditions_string(),
        r#"{"k":{"$eq":{"x":1}}}"#
    );
}

#[test]
fn test_not_on_scalar() {
    let query = Query::new().equal_to("k", 5).not("k");
    assert_eq!(query.conditions_string(), r#"{"k":{"$not":{"$eq":5}}}"#);
}

#[test]
fn test_combined_conditions() {
    let mut tags = Array::new();
    tags.append("a");
    tags.append("b");
    let query = Query::new()
        .less_than("age", 65)
        .not_equals("status", "banned")
        .in_array("tag", &tags)
        .regex("name", "^J", Some("i"))
        .not_exists("deletedBy");
    assert_eq!(
        query.conditions_string(),
        r#"{"age":{"$lt":65},"status":{"$ne":"banned"},"tag":{"$in":["a","b"]},"name":{"$regex":"^J","$options":"i"},"deletedBy":{"$exists":false}}"#
    );
}

#[test]
fn test_or_of_queries() {
    let query = Query::new()
        .equal_to("a", 1)
        .or(&[Query::new().equal_to("b", 2), Query::new().greater_than("c", 3)]);
    assert_eq!(
        query.conditions_string(),
        r#"{"$or":[{"a":1},{"b":2},{"c":{"$gt":3}}]}"#
    );
}

#[test]
fn test_and_nested_in_or() {
    let adults = Query::new()
        .greater_than_or_equal("age", 18)
        .and(&[Query::new().exists("email")]);
    let query = Query::new().or(&[adults, Query::new().equal_to("vip", true)]);
    assert_eq!(
        query.conditions_string(),
        r#"{"$or":[{"$and":[{"age":{"$gte":18}},{"email":{"$exists":true}}]},{"vip":true}]}"#
    );
}

#[test]
fn test_unset_options_render_empty() {
    let empty: [&str; 0] = [];
    let query = Query::new()
        .limit(100)
        .limit(-2)
        .skip(-1)
        .order_by(&empty)
        .projection(Vec::<(&str, bool)>::new())
        .read_preference(ReadPreference::Primary);
    assert_eq!(query.limit_string(), "");
    assert_eq!(query.skip_string(), "");
    assert_eq!(query.order_string(), "");
    assert_eq!(query.projection_string(), "");
    assert_eq!(query.read_preference_string(), "");
    assert_eq!(query.conditions_string(), "");
}

#[test]
fn test_rendering_twice_is_identical() {
    let query = Query::new()
        .equal_to("a", "b")
        .order_by(&["a", "-b"])
        .skip(2)
        .limit(50)
        .projection([("a", true), ("b", false)])
        .timeout(100);
    for _ in 0..2 {
        assert_eq!(query.conditions_string(), r#"{"a":"b"}"#);
        assert_eq!(query.order_string(), "a,-b");
        assert_eq!(query.skip_string(), "2");
        assert_eq!(query.limit_string(), "50");
        assert_eq!(query.projection_string(), r#"{"a":1,"b":0}"#);
        assert_eq!(query.timeout_string(), "100");
    }
}
