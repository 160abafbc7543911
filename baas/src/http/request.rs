use std::fmt::{Display, Formatter};

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A fully built request, ready for a [crate::http::RestExecutor].
///
/// The URL already contains the encoded query string. Headers are
/// `"Name: value"` lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpRequest {
    url: String,
    method: HttpMethod,
    headers: Vec<String>,
    body: String,
    proxy: String,
}

impl HttpRequest {
    pub fn new(url: String, method: HttpMethod, headers: Vec<String>, body: String, proxy: String) -> Self {
        HttpRequest {
            url,
            method,
            headers,
            body,
            proxy,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Value of the first header named `name` (case-sensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            line.split_once(": ")
                .filter(|(key, _)| *key == name)
                .map(|(_, value)| value)
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Proxy to go through, empty for a direct connection.
    pub fn proxy(&self) -> &str {
        &self.proxy
    }
}
