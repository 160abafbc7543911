use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Failure reported by the server: a non-2xx status and the raw response body.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RestError {
    status_code: i32,
    reason: String,
}

impl RestError {
    pub fn new(status_code: i32, reason: &str) -> Self {
        RestError {
            status_code,
            reason: reason.to_string(),
        }
    }

    /// HTTP status code returned by the server.
    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    /// Response body of the failed request, as text.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for RestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "status {}: {}", self.status_code, self.reason)
    }
}

/// Error kinds for baas client operations.
///
/// Local validation failures (`InvalidArgument`, `BucketNameError`,
/// `ObjectIdError`) are raised before any request is built. The remaining
/// kinds come from the transport layer.
///
/// # Examples
///
/// ```rust,ignore
/// use baas::errors::{BaasError, ErrorKind, BaasResult};
///
/// fn example() -> BaasResult<()> {
///     Err(BaasError::new("Bucket name is empty.", ErrorKind::BucketNameError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A required argument was empty or malformed
    InvalidArgument,
    /// The bucket name is empty
    BucketNameError,
    /// The object id is empty
    ObjectIdError,
    /// Every executor of the pool is in use
    ConnectionOverError,
    /// Endpoint, tenant or application credentials are missing
    EndpointConfigError,
    /// The server answered with a failure status
    RestError(RestError),
    /// Unclassified transport failure
    FatalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::BucketNameError => write!(f, "Bucket name error"),
            ErrorKind::ObjectIdError => write!(f, "Object id error"),
            ErrorKind::ConnectionOverError => write!(f, "Connection over"),
            ErrorKind::EndpointConfigError => write!(f, "Endpoint configuration error"),
            ErrorKind::RestError(err) => write!(f, "REST error ({})", err),
            ErrorKind::FatalError => write!(f, "Fatal error"),
        }
    }
}

/// Custom baas error type.
///
/// `BaasError` carries a message, an [ErrorKind] and an optional cause, and
/// captures a backtrace at construction time.
///
/// # Examples
///
/// ```rust,ignore
/// use baas::errors::{BaasError, ErrorKind};
///
/// let err = BaasError::new("Object ID is empty.", ErrorKind::ObjectIdError);
///
/// let cause = BaasError::new("socket closed", ErrorKind::FatalError);
/// let err = BaasError::new_with_cause("request failed", ErrorKind::FatalError, cause);
/// ```
#[derive(Clone)]
pub struct BaasError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<BaasError>>,
    backtrace: Atomic<Backtrace>,
}

impl BaasError {
    /// Creates a new `BaasError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        BaasError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `BaasError` that keeps `cause` as its source.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: BaasError) -> Self {
        BaasError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Wraps a server failure into a [ErrorKind::RestError].
    pub fn from_rest_error(rest_error: RestError) -> Self {
        let message = format!("Server responded with {}", rest_error);
        BaasError::new(&message, ErrorKind::RestError(rest_error))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&BaasError> {
        self.cause.as_deref()
    }

    /// Returns the server failure when this error is a [ErrorKind::RestError].
    pub fn rest_error(&self) -> Option<&RestError> {
        match &self.error_kind {
            ErrorKind::RestError(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_rest_error(&self) -> bool {
        matches!(self.error_kind, ErrorKind::RestError(_))
    }

    /// A fatal error is any failure that is not a server REST error.
    pub fn is_fatal(&self) -> bool {
        !self.is_rest_error()
    }
}

impl Display for BaasError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for BaasError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for BaasError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for baas operations.
pub type BaasResult<T> = Result<T, BaasError>;

impl From<serde_json::Error> for BaasError {
    fn from(err: serde_json::Error) -> Self {
        BaasError::new(&format!("JSON error: {}", err), ErrorKind::FatalError)
    }
}

impl From<std::string::FromUtf8Error> for BaasError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        BaasError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::FatalError,
        )
    }
}
