use itertools::Itertools;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::common::{
    API_VERSION, HEADER_APP_ID, HEADER_APP_KEY, HEADER_USER_AGENT, HEADER_USER_AGENT_DEFAULT,
};
use crate::errors::{BaasError, BaasResult, ErrorKind};
use crate::http::{HttpMethod, HttpRequest};
use crate::service::ServiceConfig;

// everything except RFC 3986 unreserved characters
const PARAM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(text: &str) -> String {
    utf8_percent_encode(text, PARAM_ENCODE_SET).to_string()
}

/// Builds [HttpRequest]s against the configured endpoint.
///
/// The final URL is `{endpoint}/1/{tenant}{path}?{params}`. Parameters and
/// headers are ordered by name (insertion order among equal names), and
/// parameter names and values are percent-encoded. The application id and
/// key headers are always added, and a default `User-Agent` is added unless
/// one was supplied.
///
/// # Examples
///
/// ```rust,ignore
/// let request = service
///     .request_factory()?
///     .put("/objects")
///     .append_path("/bucket/id1")
///     .append_param("etag", "e1")
///     .body("{}")
///     .build();
/// assert_eq!(request.url(), "https://api.example.com/1/tenant/objects/bucket/id1?etag=e1");
/// ```
#[derive(Debug, Clone)]
pub struct RequestFactory {
    endpoint_url: String,
    tenant_id: String,
    app_id: String,
    app_key: String,
    proxy: String,
    method: HttpMethod,
    path: String,
    params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: String,
}

impl RequestFactory {
    /// Creates a factory for `config`.
    ///
    /// Fails with [ErrorKind::EndpointConfigError] when the endpoint URL,
    /// tenant id, application id or application key is empty, checked in
    /// that order.
    pub fn new(config: &ServiceConfig) -> BaasResult<RequestFactory> {
        let checks = [
            (config.endpoint_url(), "End point URL is empty."),
            (config.tenant_id(), "Tenant ID is empty."),
            (config.app_id(), "App ID is empty."),
            (config.app_key(), "App Key is empty."),
        ];
        for (value, message) in checks {
            if value.is_empty() {
                log::error!("{}", message);
                return Err(BaasError::new(message, ErrorKind::EndpointConfigError));
            }
        }

        Ok(RequestFactory {
            endpoint_url: config.endpoint_url().to_string(),
            tenant_id: config.tenant_id().to_string(),
            app_id: config.app_id().to_string(),
            app_key: config.app_key().to_string(),
            proxy: config.proxy().to_string(),
            method: HttpMethod::Get,
            path: String::new(),
            params: Vec::new(),
            headers: Vec::new(),
            body: String::new(),
        })
    }

    fn method(mut self, method: HttpMethod, path: &str) -> RequestFactory {
        self.method = method;
        self.path = path.to_string();
        self
    }

    pub fn get(self, path: &str) -> RequestFactory {
        self.method(HttpMethod::Get, path)
    }

    pub fn post(self, path: &str) -> RequestFactory {
        self.method(HttpMethod::Post, path)
    }

    pub fn put(self, path: &str) -> RequestFactory {
        self.method(HttpMethod::Put, path)
    }

    pub fn delete(self, path: &str) -> RequestFactory {
        self.method(HttpMethod::Delete, path)
    }

    /// Appends `path` verbatim to the current path.
    pub fn append_path(mut self, path: &str) -> RequestFactory {
        self.path.push_str(path);
        self
    }

    /// Replaces all query parameters.
    pub fn params(mut self, params: Vec<(String, String)>) -> RequestFactory {
        self.params = params;
        self
    }

    /// Adds a query parameter. Ignored when the name or the value is empty.
    pub fn append_param(mut self, key: &str, value: &str) -> RequestFactory {
        if !key.is_empty() && !value.is_empty() {
            self.params.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Adds a header. Ignored when the name or the value is empty.
    pub fn append_header(mut self, key: &str, value: &str) -> RequestFactory {
        if !key.is_empty() && !value.is_empty() {
            self.headers.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn body(mut self, body: &str) -> RequestFactory {
        self.body = body.to_string();
        self
    }

    fn query_string(&self) -> String {
        let mut params: Vec<&(String, String)> = self
            .params
            .iter()
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .collect();
        if params.is_empty() {
            return String::new();
        }
        params.sort_by(|a, b| a.0.cmp(&b.0));
        let joined = params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .join("&");
        format!("?{}", joined)
    }

    /// Assembles the request.
    pub fn build(mut self) -> HttpRequest {
        let mut url = self.endpoint_url.clone();
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(API_VERSION);
        url.push('/');
        url.push_str(&self.tenant_id);
        url.push_str(&self.path);
        url.push_str(&self.query_string());

        self.headers
            .push((HEADER_APP_ID.to_string(), self.app_id.clone()));
        self.headers
            .push((HEADER_APP_KEY.to_string(), self.app_key.clone()));
        if !self.headers.iter().any(|(k, _)| k == HEADER_USER_AGENT) {
            self.headers.push((
                HEADER_USER_AGENT.to_string(),
                HEADER_USER_AGENT_DEFAULT.to_string(),
            ));
        }
        self.headers.sort_by(|a, b| a.0.cmp(&b.0));
        let headers = self
            .headers
            .iter()
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();

        log::debug!("{} {}", self.method, url);
        HttpRequest::new(url, self.method, headers, self.body, self.proxy)
    }
}
