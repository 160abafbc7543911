use baas::errors::{BaasError, BaasResult, ErrorKind};
use baas::http::{HttpRequest, HttpResponse, RestExecutor};
use baas::service::Service;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

pub const ENDPOINT_URL: &str = "https://api.example.com";
pub const TENANT_ID: &str = "tenant";
pub const APP_ID: &str = "app-id";
pub const APP_KEY: &str = "app-key";

#[derive(Default)]
struct ServerState {
    responses: VecDeque<HttpResponse>,
    requests: Vec<(HttpRequest, i32)>,
    executors_created: usize,
}

/// In-process stand-in for the object server.
///
/// Replays scripted responses in order and records every request it
/// receives, together with the timeout it was sent with. A request without
/// a scripted response fails as a transport error.
#[derive(Clone, Default)]
pub struct MockServer {
    state: Arc<Mutex<ServerState>>,
}

impl MockServer {
    pub fn new() -> Self {
        MockServer::default()
    }

    /// Queues the response for the next request.
    pub fn respond(&self, status_code: i32, body: &str) -> &Self {
        self.state
            .lock()
            .responses
            .push_back(HttpResponse::with_body(status_code, body));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state
            .lock()
            .requests
            .last()
            .map(|(request, _)| request.clone())
    }

    pub fn last_timeout(&self) -> Option<i32> {
        self.state.lock().requests.last().map(|(_, timeout)| *timeout)
    }

    pub fn executors_created(&self) -> usize {
        self.state.lock().executors_created
    }

    /// A new executor connected to this server.
    pub fn executor(&self) -> Box<dyn RestExecutor> {
        self.state.lock().executors_created += 1;
        Box::new(MockExecutor {
            state: self.state.clone(),
        })
    }
}

struct MockExecutor {
    state: Arc<Mutex<ServerState>>,
}

impl RestExecutor for MockExecutor {
    fn execute(&mut self, request: &HttpRequest, timeout: i32) -> BaasResult<HttpResponse> {
        let mut state = self.state.lock();
        state.requests.push((request.clone(), timeout));
        match state.responses.pop_front() {
            Some(response) => Ok(response),
            None => Err(BaasError::new(
                "No scripted response",
                ErrorKind::FatalError,
            )),
        }
    }
}

#[derive(Clone)]
pub struct TestContext {
    service: Service,
    server: MockServer,
}

impl TestContext {
    pub fn new(service: Service, server: MockServer) -> Self {
        Self { service, server }
    }

    pub fn service(&self) -> Service {
        self.service.clone()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }
}

/// A service with the test credentials, backed by a fresh [MockServer].
pub fn create_test_context() -> TestContext {
    create_test_context_with_pool(baas::HTTP_CONNECTION_MAX)
}

pub fn create_test_context_with_pool(pool_size: usize) -> TestContext {
    let server = MockServer::new();
    let factory_server = server.clone();
    let service = Service::builder()
        .endpoint_url(ENDPOINT_URL)
        .tenant_id(TENANT_ID)
        .app_id(APP_ID)
        .app_key(APP_KEY)
        .pool_size(pool_size)
        .build(move || factory_server.executor());
    TestContext::new(service, server)
}

/// Full URL of `path` below the test tenant.
pub fn tenant_url(path: &str) -> String {
    format!("{}/1/{}{}", ENDPOINT_URL, TENANT_ID, path)
}

/// Runs `test` against a fresh context and panics with the error it returns.
pub fn run_test<T>(test: T)
where
    T: FnOnce(TestContext) -> BaasResult<()>,
{
    let ctx = create_test_context();
    if let Err(err) = test(ctx) {
        panic!("Test failed: {:?}", err);
    }
}
