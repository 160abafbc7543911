use std::sync::Arc;

use crate::http::RestExecutor;
use crate::service::{Service, ServiceConfig};

/// Fluent builder for a [Service].
///
/// Nothing is validated while building. Missing endpoint settings are
/// reported by the first request the service tries to send.
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
///     .pool_size(4)
///     .build(|| Box::new(MyExecutor::new()) as Box<dyn RestExecutor>);
///
/// let bucket = service.object_bucket("todos");
/// ```
#[derive(Default)]
pub struct ServiceBuilder {
    config: ServiceConfig,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        ServiceBuilder {
            config: ServiceConfig::default(),
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ServiceConfig) -> Self {
        ServiceBuilder { config }
    }

    pub fn endpoint_url(mut self, endpoint_url: &str) -> Self {
        self.config.set_endpoint_url(endpoint_url);
        self
    }

    pub fn tenant_id(mut self, tenant_id: &str) -> Self {
        self.config.set_tenant_id(tenant_id);
        self
    }

    pub fn app_id(mut self, app_id: &str) -> Self {
        self.config.set_app_id(app_id);
        self
    }

    pub fn app_key(mut self, app_key: &str) -> Self {
        self.config.set_app_key(app_key);
        self
    }

    pub fn proxy(mut self, proxy: &str) -> Self {
        self.config = self.config.with_proxy(proxy);
        self
    }

    /// Maximum number of executors alive at once. Defaults to 20.
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.config = self.config.with_pool_size(pool_size);
        self
    }

    /// Timeout in seconds for new objects and buckets. Defaults to 60.
    pub fn default_timeout(mut self, timeout: i32) -> Self {
        self.config = self.config.with_default_timeout(timeout);
        self
    }

    /// Creates the service. `factory` is called whenever the executor pool
    /// needs a new executor.
    pub fn build<F>(self, factory: F) -> Service
    where
        F: Fn() -> Box<dyn RestExecutor> + Send + Sync + 'static,
    {
        log::debug!(
            "Creating service for {} with pool size {}",
            self.config.endpoint_url(),
            self.config.pool_size()
        );
        Service::new(self.config, Arc::new(factory))
    }
}
