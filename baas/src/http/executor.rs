use crate::errors::{BaasError, BaasResult, ErrorKind, RestError};
use crate::http::{HttpRequest, HttpResponse};

/// Performs HTTP requests on behalf of the crate.
///
/// # Purpose
/// The crate never opens connections itself. An application provides a
/// `RestExecutor` backed by the HTTP client of its choice; executors are
/// pooled by [crate::http::ExecutorPool] and reused across requests.
///
/// # Contract
/// - `execute` blocks until the response is received or `timeout` seconds
///   elapse.
/// - Any response that carries a status line is returned as `Ok`, whatever
///   its status. The crate classifies it with [classify_response].
/// - Connection, TLS or timeout failures are returned as
///   [ErrorKind::FatalError].
///
/// # Thread Safety
/// Executors move between threads with the pool, so they must be `Send`.
/// A single executor is used by one request at a time.
pub trait RestExecutor: Send {
    fn execute(&mut self, request: &HttpRequest, timeout: i32) -> BaasResult<HttpResponse>;
}

/// Maps a raw response to the crate's result model.
///
/// - status `0` (no status line) is a [ErrorKind::FatalError];
/// - any non-2xx status is a [ErrorKind::RestError] whose reason is the
///   response body;
/// - a 2xx status is returned unchanged.
pub fn classify_response(response: HttpResponse) -> BaasResult<HttpResponse> {
    let status = response.status_code();
    if status == 0 {
        log::error!("There is no status code.");
        return Err(BaasError::new(
            "Response carries no status code",
            ErrorKind::FatalError,
        ));
    }
    if !response.is_success() {
        log::error!("Request failed with status {}", status);
        let rest_error = RestError::new(status, &response.body_text());
        return Err(BaasError::from_rest_error(rest_error));
    }
    Ok(response)
}
