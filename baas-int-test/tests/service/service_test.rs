use baas::errors::{BaasResult, ErrorKind};
use baas::service::Service;
use baas_int_test::test_util::{create_test_context_with_pool, MockServer};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_missing_credentials_fail_before_checkout() {
    let server = MockServer::new();
    let factory_server = server.clone();
    let service = Service::builder()
        .endpoint_url("https://api.example.com")
        .tenant_id("tenant")
        .app_id("app")
        .build(move || factory_server.executor());

    let mut item = service.object_bucket("b").new_object();
    let err = item.save(true).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EndpointConfigError);
    assert_eq!(err.message(), "App Key is empty.");
    assert_eq!(server.executors_created(), 0);
}

#[test]
fn test_bucket_checked_before_credentials() {
    let service = Service::builder().build(|| MockServer::new().executor());
    let mut item = service.object_bucket("").new_object();
    assert_eq!(item.save(false).unwrap_err().kind(), &ErrorKind::BucketNameError);
}

#[test]
fn test_pool_exhaustion_fails_immediately() {
    let ctx = create_test_context_with_pool(1);
    let service = ctx.service();
    let held = service.pop_executor().unwrap();

    let bucket = service.object_bucket("b");
    let err = bucket.get_object("X", false).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConnectionOverError);
    assert_eq!(ctx.server().request_count(), 0);

    service.push_executor(held);
    ctx.server().respond(200, r#"{"_id":"X"}"#);
    assert_eq!(bucket.get_object("X", false).unwrap().object_id(), "X");
}

#[test]
fn test_executors_are_reused() {
    let ctx = create_test_context_with_pool(3);
    let bucket = ctx.service().object_bucket("b");
    for _ in 0..5 {
        ctx.server().respond(200, r#"{"_id":"X"}"#);
        bucket.get_object("X", false).unwrap();
    }
    assert_eq!(ctx.server().executors_created(), 1);
    assert_eq!(ctx.server().request_count(), 5);
}

#[test]
fn test_transport_failure_is_fatal() {
    let ctx = create_test_context_with_pool(1);
    let bucket = ctx.service().object_bucket("b");
    let err = bucket.get_object("X", false).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.kind(), &ErrorKind::FatalError);

    ctx.server().respond(0, "");
    let err = bucket.get_object("X", false).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::FatalError);
}

#[test]
fn test_service_shared_across_threads() {
    let ctx = create_test_context_with_pool(4);
    for _ in 0..4 {
        ctx.server().respond(201, r#"{"_id":"X"}"#);
    }
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = ctx.service();
            let barrier = barrier.clone();
            thread::spawn(move || -> BaasResult<String> {
                let mut item = service.object_bucket("b").new_object();
                item.set("worker", i);
                barrier.wait();
                item.save(false)?;
                Ok(item.object_id().to_string())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "X");
    }
    assert_eq!(ctx.server().request_count(), 4);
    assert!(ctx.server().executors_created() <= 4);
}
