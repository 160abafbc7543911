use crate::common::{DEFAULT_REST_TIMEOUT, HTTP_CONNECTION_MAX};

/// Connection settings of a [crate::service::Service].
///
/// Empty credentials are accepted here and reported as
/// [crate::errors::ErrorKind::EndpointConfigError] when the first request is
/// built, before any executor is checked out.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    endpoint_url: String,
    tenant_id: String,
    app_id: String,
    app_key: String,
    proxy: String,
    pool_size: usize,
    default_timeout: i32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig::new("", "", "", "")
    }
}

impl ServiceConfig {
    pub fn new(endpoint_url: &str, tenant_id: &str, app_id: &str, app_key: &str) -> Self {
        ServiceConfig {
            endpoint_url: endpoint_url.to_string(),
            tenant_id: tenant_id.to_string(),
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
            proxy: String::new(),
            pool_size: HTTP_CONNECTION_MAX,
            default_timeout: DEFAULT_REST_TIMEOUT,
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Proxy URL handed to every executor, empty for a direct connection.
    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    /// Maximum number of executors alive at the same time.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Timeout in seconds given to new objects and buckets.
    pub fn default_timeout(&self) -> i32 {
        self.default_timeout
    }

    pub fn with_proxy(mut self, proxy: &str) -> Self {
        self.proxy = proxy.to_string();
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Values `<= 0` restore the 60 second default.
    pub fn with_default_timeout(mut self, timeout: i32) -> Self {
        self.default_timeout = if timeout > 0 {
            timeout
        } else {
            DEFAULT_REST_TIMEOUT
        };
        self
    }

    pub(crate) fn set_endpoint_url(&mut self, endpoint_url: &str) {
        self.endpoint_url = endpoint_url.to_string();
    }

    pub(crate) fn set_tenant_id(&mut self, tenant_id: &str) {
        self.tenant_id = tenant_id.to_string();
    }

    pub(crate) fn set_app_id(&mut self, app_id: &str) {
        self.app_id = app_id.to_string();
    }

    pub(crate) fn set_app_key(&mut self, app_key: &str) {
        self.app_key = app_key.to_string();
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("tenant_id", &self.tenant_id)
            .field("app_id", &self.app_id)
            .field("app_key", &"***")
            .field("proxy", &self.proxy)
            .field("pool_size", &self.pool_size)
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::new("http://localhost", "t", "a", "k");
        assert_eq!(config.pool_size(), 20);
        assert_eq!(config.default_timeout(), 60);
        assert_eq!(config.proxy(), "");
    }

    #[test]
    fn test_default_timeout_reset() {
        let config = ServiceConfig::default().with_default_timeout(15);
        assert_eq!(config.default_timeout(), 15);
        assert_eq!(config.with_default_timeout(0).default_timeout(), 60);
        assert_eq!(
            ServiceConfig::default().with_default_timeout(-3).default_timeout(),
            60
        );
    }

    #[test]
    fn test_debug_hides_app_key() {
        let config = ServiceConfig::new("u", "t", "a", "secret");
        let text = format!("{:?}", config);
        assert!(!text.contains("secret"));
        assert!(text.contains("***"));
    }
}
