//! Service handle: configuration, executor pool and request dispatch.

mod service_builder;
mod service_config;

pub use service_builder::*;
pub use service_config::*;

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::errors::{BaasError, BaasResult, ErrorKind};
use crate::http::{
    classify_response, ExecutorFactory, ExecutorPool, HttpResponse, RequestFactory, RestExecutor,
};
use crate::object::ObjectBucket;

/// Entry point of the client.
///
/// A `Service` owns the configuration and the executor pool. It is cheap to
/// clone and every clone shares the same pool, so objects and buckets keep
/// their own copy of the handle.
///
/// Requests go through [Service::execute_request], which builds the request,
/// checks out an executor, runs the request, returns the executor to the
/// pool and classifies the response. An exhausted pool fails at once with
/// [ErrorKind::ConnectionOverError]; nothing is queued.
///
/// # Examples
///
/// ```rust,ignore
/// use baas::service::Service;
///
/// let service = Service::builder()
///     .endpoint_url("https://api.example.com")
///     .tenant_id("tenant")
///     .app_id("app")
///     .app_key("key")
///     .build(|| Box::new(MyExecutor::new()) as Box<dyn RestExecutor>);
///
/// let mut todo = service.object_bucket("todos").new_object();
/// todo.set("title", "write docs");
/// todo.save(true)?;
/// ```
#[derive(Clone)]
pub struct Service {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    config: ServiceConfig,
    pool: ExecutorPool,
}

impl Service {
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    pub(crate) fn new(config: ServiceConfig, factory: ExecutorFactory) -> Self {
        let pool = ExecutorPool::new(config.pool_size(), factory);
        Service {
            inner: Arc::new(ServiceInner { config, pool }),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// A fresh request factory for the configured endpoint.
    ///
    /// # Errors
    ///
    /// [ErrorKind::EndpointConfigError] when the endpoint URL, tenant id,
    /// application id or application key is empty.
    pub fn request_factory(&self) -> BaasResult<RequestFactory> {
        RequestFactory::new(&self.inner.config)
    }

    /// Checks an executor out of the pool, `None` when the pool is exhausted.
    pub fn pop_executor(&self) -> Option<Box<dyn RestExecutor>> {
        self.inner.pool.pop()
    }

    pub fn push_executor(&self, executor: Box<dyn RestExecutor>) {
        self.inner.pool.push(executor)
    }

    /// Builds a request with `build` and sends it.
    ///
    /// The steps run in this order, and the first failure is returned:
    ///
    /// 1. create the request factory ([ErrorKind::EndpointConfigError]);
    /// 2. check out an executor ([ErrorKind::ConnectionOverError]);
    /// 3. execute with `timeout` seconds, then return the executor;
    /// 4. classify the response ([ErrorKind::FatalError] or
    ///    [ErrorKind::RestError]).
    pub fn execute_request<F>(&self, build: F, timeout: i32) -> BaasResult<HttpResponse>
    where
        F: FnOnce(RequestFactory) -> RequestFactory,
    {
        let request = build(self.request_factory()?).build();

        let mut executor = match self.pop_executor() {
            Some(executor) => executor,
            None => {
                log::error!("No executor available for {} {}", request.method(), request.url());
                return Err(BaasError::new(
                    "HTTP Connection Over",
                    ErrorKind::ConnectionOverError,
                ));
            }
        };
        let result = executor.execute(&request, timeout);
        self.push_executor(executor);

        classify_response(result?)
    }

    /// A handle on the object bucket `name`.
    pub fn object_bucket(&self, name: &str) -> ObjectBucket {
        ObjectBucket::new(self.clone(), name)
    }
}

impl Debug for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("config", &self.inner.config)
            .field("idle_executors", &self.inner.pool.idle_count())
            .finish()
    }
}
