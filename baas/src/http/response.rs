/// Raw HTTP response as returned by a [crate::http::RestExecutor].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    status_code: i32,
    reason_phrase: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(
        status_code: i32,
        reason_phrase: &str,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Self {
        HttpResponse {
            status_code,
            reason_phrase: reason_phrase.to_string(),
            headers,
            body,
        }
    }

    /// Convenience constructor for a response with a text body and no headers.
    pub fn with_body(status_code: i32, body: &str) -> Self {
        HttpResponse::new(status_code, "", Vec::new(), body.as_bytes().to_vec())
    }

    /// Status code; `0` means the executor received no status line.
    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        self.status_code / 100 == 2
    }
}
