use baas::acl::{Acl, AclPermission};
use baas::collection::Document;
use baas::errors::ErrorKind;
use baas::http::HttpMethod;
use baas::RESERVED_FIELDS;
use baas_int_test::test_util::{run_test, tenant_url, APP_ID, APP_KEY};
use chrono::{Datelike, TimeZone, Utc};

fn assert_no_reserved_fields(doc: &Document) {
    for key in RESERVED_FIELDS {
        assert!(!doc.contains_key(key), "reserved key {} left in body", key);
    }
}

#[test]
fn test_create_then_overwrite() {
    run_test(|ctx| {
        let server = ctx.server();
        server.respond(
            201,
            r#"{"_id":"X","a":1,"createdAt":"2024-03-01T10:00:00.000Z","updatedAt":"2024-03-01T10:00:00.000Z","etag":"E1","ACL":{"r":["g:anonymous"],"w":["g:anonymous"],"admin":["g:anonymous"]}}"#,
        );
        server.respond(
            200,
            r#"{"_id":"X","a":2,"createdAt":"2024-03-01T10:00:00.000Z","updatedAt":"2024-03-02T10:00:00.000Z","etag":"E2"}"#,
        );

        let bucket = ctx.service().object_bucket("items");
        let mut item = bucket.new_object();
        item.set("a", 1);
        item.set_acl(Acl::for_anonymous());
        item.save(true)?;

        let create = server.last_request().unwrap();
        assert_eq!(create.method(), HttpMethod::Post);
        assert_eq!(create.url(), tenant_url("/objects/items"));
        assert_eq!(create.header("X-Application-Id"), Some(APP_ID));
        assert_eq!(create.header("X-Application-Key"), Some(APP_KEY));
        assert_eq!(create.header("User-Agent"), Some("baas embedded sdk"));
        assert_eq!(item.object_id(), "X");
        assert_eq!(item.etag(), "E1");
        assert_eq!(item.acl(), &Acl::for_anonymous());
        assert_no_reserved_fields(&item);

        item.set("a", 2);
        item.save(false)?;

        let overwrite = server.last_request().unwrap();
        assert_eq!(overwrite.method(), HttpMethod::Put);
        assert_eq!(overwrite.url(), tenant_url("/objects/items/X?etag=E1"));
        let sent = Document::from_json(overwrite.body()).get_document("$full_update");
        assert_eq!(sent.get_i32("a", 0), 2);
        assert_eq!(sent.get_string("createdAt", ""), "2024-03-01T10:00:00.000Z");
        assert_eq!(
            Acl::from_document(&sent.get_document("ACL")),
            Acl::for_anonymous()
        );

        assert_eq!(item.etag(), "E2");
        assert_eq!(item.updated_time().map(|t| t.day()), Some(2));
        assert_eq!(item.acl(), &Acl::default());
        assert_no_reserved_fields(&item);
        Ok(())
    });
}

#[test]
fn test_create_scenario_body() {
    run_test(|ctx| {
        ctx.server().respond(201, r#"{"_id":"X","a":1}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set("a", 1);
        item.save(false)?;

        assert_eq!(ctx.server().last_request().unwrap().body(), r#"{"a":1}"#);
        assert_eq!(item.object_id(), "X");
        assert_eq!(item.to_json_string(), r#"{"a":1}"#);
        Ok(())
    });
}

#[test]
fn test_etag_conflict_surfaces_as_rest_error() {
    run_test(|ctx| {
        ctx.server()
            .respond(412, r#"{"code":412,"message":"etag mismatch"}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set_object_id("X");
        item.set_etag("stale");
        item.set("a", 1);

        let err = item.save(false).unwrap_err();
        let rest_error = err.rest_error().unwrap();
        assert_eq!(rest_error.status_code(), 412);
        assert!(rest_error.reason().contains("etag mismatch"));
        assert_eq!(item.etag(), "stale");
        assert_eq!(item.to_json_string(), r#"{"a":1}"#);
        Ok(())
    });
}

#[test]
fn test_part_update_keeps_acl_and_created_at_in_patch() {
    run_test(|ctx| {
        ctx.server()
            .respond(200, r#"{"_id":"X","title":"new","etag":"E2"}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set_current_param(Document::from_json(r#"{"_id":"X","etag":"E1","title":"old"}"#));

        let mut acl = Acl::new();
        acl.add_entry(AclPermission::Read, "user1");
        let mut patch = Document::new();
        patch.set("title", "new");
        patch.set("_id", "other");
        patch.set("createdAt", "2020-01-01T00:00:00.000Z");
        patch.put_document("ACL", &acl.to_document());
        item.part_update(&patch)?;

        let request = ctx.server().last_request().unwrap();
        assert_eq!(request.url(), tenant_url("/objects/b/X?etag=E1"));
        let sent = Document::from_json(request.body());
        assert!(!sent.contains_key("_id"));
        assert!(sent.contains_key("createdAt"));
        assert_eq!(Acl::from_document(&sent.get_document("ACL")).read(), ["user1"]);

        assert_eq!(item.get_string("title", ""), "new");
        assert_eq!(item.etag(), "E2");
        Ok(())
    });
}

#[test]
fn test_part_update_with_instance_acl() {
    run_test(|ctx| {
        ctx.server().respond(200, r#"{"_id":"X"}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set_object_id("X");
        item.set_acl(Acl::for_authenticated());

        let patch = Document::from_json(r#"{"n":1}"#);
        item.part_update_with_acl(&patch, true)?;
        let sent = Document::from_json(ctx.server().last_request().unwrap().body());
        assert_eq!(Acl::from_document(&sent.get_document("ACL")), Acl::for_authenticated());

        ctx.server().respond(200, r#"{"_id":"X"}"#);
        item.set_no_acl(true);
        item.part_update_with_acl(&patch, true)?;
        let sent = Document::from_json(ctx.server().last_request().unwrap().body());
        assert!(!sent.contains_key("ACL"));
        Ok(())
    });
}

#[test]
fn test_delete_mark_scenario() {
    run_test(|ctx| {
        ctx.server()
            .respond(200, r#"{"_id":"X","a":1,"_deleted":true,"etag":"E2"}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set_object_id("X");
        item.set_etag("E");
        item.delete(true)?;

        assert_eq!(
            ctx.server().last_request().unwrap().url(),
            tenant_url("/objects/b/X?deleteMark=1&etag=E")
        );
        assert!(item.delete_mark());
        assert_eq!(item.etag(), "E2");
        assert_no_reserved_fields(&item);
        Ok(())
    });
}

#[test]
fn test_hard_delete_leaves_instance_unchanged() {
    run_test(|ctx| {
        ctx.server().respond(200, r#"{"_id":"X","_deleted":true}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set_current_param(Document::from_json(r#"{"_id":"X","etag":"E","a":1}"#));
        let removed = item.delete(false)?;

        assert_eq!(
            ctx.server().last_request().unwrap().method(),
            HttpMethod::Delete
        );
        assert_eq!(item.object_id(), "X");
        assert_eq!(item.etag(), "E");
        assert!(!item.delete_mark());
        assert_eq!(removed.bucket_name(), "b");
        assert!(removed.contains_key("_deleted"));
        Ok(())
    });
}

#[test]
fn test_local_validation_sends_nothing() {
    run_test(|ctx| {
        let mut item = ctx.service().object_bucket("").new_object();
        assert_eq!(item.save(true).unwrap_err().kind(), &ErrorKind::BucketNameError);
        assert_eq!(
            item.part_update(&Document::new()).unwrap_err().kind(),
            &ErrorKind::InvalidArgument
        );
        item.set_bucket_name("b");
        assert_eq!(item.delete(true).unwrap_err().kind(), &ErrorKind::ObjectIdError);
        assert_eq!(ctx.server().request_count(), 0);
        Ok(())
    });
}

#[test]
fn test_timeout_forwarded_to_executor() {
    run_test(|ctx| {
        ctx.server().respond(201, r#"{"_id":"X"}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set_timeout(15);
        item.save(false)?;
        assert_eq!(ctx.server().last_timeout(), Some(15));

        ctx.server().respond(200, r#"{"_id":"X"}"#);
        item.set_timeout(0);
        item.save(false)?;
        assert_eq!(ctx.server().last_timeout(), Some(60));
        Ok(())
    });
}

#[test]
fn test_created_time_sent_on_overwrite() {
    run_test(|ctx| {
        ctx.server().respond(200, r#"{"_id":"X"}"#);
        let mut item = ctx.service().object_bucket("b").new_object();
        item.set_object_id("X");
        item.set_no_acl(true);
        item.set_created_time(Utc.with_ymd_and_hms(2021, 6, 7, 8, 9, 10).single());
        item.save(true)?;

        assert_eq!(
            ctx.server().last_request().unwrap().body(),
            r#"{"$full_update":{"createdAt":"2021-06-07T08:09:10.000Z"}}"#
        );
        assert!(item.created_time().is_none());
        Ok(())
    });
}
