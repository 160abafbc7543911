use baas::errors::ErrorKind;
use baas::http::HttpMethod;
use baas::query::{Query, ReadPreference};
use baas_int_test::test_util::{run_test, tenant_url};

#[test]
fn test_get_object() {
    run_test(|ctx| {
        ctx.server().respond(
            200,
            r#"{"_id":"X","name":"n","createdAt":"2024-01-01T00:00:00.000Z","etag":"E"}"#,
        );
        let bucket = ctx.service().object_bucket("items");
        let item = bucket.get_object("X", false)?;

        let request = ctx.server().last_request().unwrap();
        assert_eq!(request.method(), HttpMethod::Get);
        assert_eq!(request.url(), tenant_url("/objects/items/X"));
        assert_eq!(item.object_id(), "X");
        assert_eq!(item.etag(), "E");
        assert!(item.created_time().is_some());
        assert_eq!(item.to_json_string(), r#"{"name":"n"}"#);
        Ok(())
    });
}

#[test]
fn test_get_missing_object() {
    run_test(|ctx| {
        ctx.server().respond(404, "not found");
        let bucket = ctx.service().object_bucket("items");
        let err = bucket.get_object("nope", false).unwrap_err();
        assert!(err.is_rest_error());
        assert_eq!(err.rest_error().unwrap().status_code(), 404);
        assert_eq!(err.rest_error().unwrap().reason(), "not found");
        Ok(())
    });
}

#[test]
fn test_get_object_requires_id() {
    run_test(|ctx| {
        let bucket = ctx.service().object_bucket("items");
        let err = bucket.get_object("", true).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgument);
        assert_eq!(ctx.server().request_count(), 0);
        Ok(())
    });
}

#[test]
fn test_query_with_all_options() {
    run_test(|ctx| {
        ctx.server().respond(
            200,
            r#"{"results":[{"_id":"A","age":30,"etag":"EA"},{"_id":"B","age":40,"etag":"EB"}],"count":2}"#,
        );
        let bucket = ctx.service().object_bucket("people");
        let query = Query::new()
            .greater_than_or_equal("age", 30)
            .order_by(&["-age"])
            .skip(10)
            .limit(20)
            .delete_mark(true)
            .projection([("age", true)])
            .read_preference(ReadPreference::SecondaryPreferred)
            .timeout(500);
        let result = bucket.query(&query, true)?;

        let request = ctx.server().last_request().unwrap();
        assert_eq!(
            request.url(),
            tenant_url(
                "/objects/people?count=1&deleteMark=1&limit=20&order=-age\
                 &projection=%7B%22age%22%3A1%7D&readPreference=secondaryPreferred\
                 &skip=10&timeout=500&where=%7B%22age%22%3A%7B%22%24gte%22%3A30%7D%7D"
            )
        );
        assert_eq!(result.count(), Some(2));
        let ids: Vec<&str> = result.objects().iter().map(|o| o.object_id()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert_eq!(result.objects()[1].etag(), "EB");
        assert!(!result.objects()[1].contains_key("etag"));
        Ok(())
    });
}

#[test]
fn test_query_results_are_bound_to_bucket() {
    run_test(|ctx| {
        ctx.server().respond(200, r#"{"results":[{"_id":"A","n":1}]}"#);
        ctx.server().respond(200, r#"{"_id":"A","n":2}"#);
        let bucket = ctx.service().object_bucket("items");
        let mut objects = bucket.query(&Query::new(), false)?.into_objects();
        assert_eq!(objects.len(), 1);

        let item = &mut objects[0];
        item.set("n", 2);
        item.save(false)?;
        assert_eq!(
            ctx.server().last_request().unwrap().url(),
            tenant_url("/objects/items/A")
        );
        assert_eq!(item.get_i32("n", 0), 2);
        Ok(())
    });
}

#[test]
fn test_query_with_malformed_response() {
    run_test(|ctx| {
        ctx.server().respond(200, "<html>");
        let bucket = ctx.service().object_bucket("items");
        let result = bucket.query(&Query::new(), true)?;
        assert!(result.is_empty());
        assert_eq!(result.count(), Some(0));
        Ok(())
    });
}
