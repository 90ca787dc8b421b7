use serde_json::Value;

pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    /// The structured API failure carried by this error, if any.
    pub fn api(&self) -> Option<&ApiError> {
        match self.inner.as_ref() {
            ErrorKind::ApiError(ref e) => Some(e),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self.api(), Some(e) if e.kind == ApiErrorKind::AuthExpired)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Error {
        Error::new(ErrorKind::ApiError(e))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::ReqwestError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJsonError(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::StdIoError(e))
    }
}

pub enum ErrorKind {
    ReqwestError(reqwest::Error),
    SerdeJsonError(serde_json::Error),
    StdIoError(std::io::Error),
    ParseError(String),
    ApiError(ApiError),
}

impl std::fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e:?}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e:?}"),
            ErrorKind::StdIoError(ref e) => write!(f, "StdIoError: {e:?}"),
            ErrorKind::ParseError(ref e) => write!(f, "ParseError: {e:?}"),
            ErrorKind::ApiError(ref e) => write!(f, "ApiError: {e:?}"),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e:?}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e:?}"),
            ErrorKind::StdIoError(ref e) => write!(f, "StdIoError: {e:?}"),
            ErrorKind::ParseError(ref e) => write!(f, "ParseError: {e:?}"),
            ErrorKind::ApiError(ref e) => write!(f, "{e}"),
        }
    }
}

/// A non-2xx backend response, classified by its actual HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    /// Builds the error from a failed response. The human-readable message is
    /// taken from the body's `detail` field, then `message`, then the HTTP
    /// status text, else a generic fallback. A missing or unparseable body is
    /// treated as empty rather than masking the HTTP failure.
    pub fn from_response(status: u16, status_text: &str, body: Option<&Value>) -> ApiError {
        let mut message = None;
        if let Some(body) = body {
            for key in ["detail", "message"] {
                if let Some(text) = body.get(key).and_then(Value::as_str) {
                    if !text.is_empty() {
                        message = Some(text.to_string());
                        break;
                    }
                }
            }
        }
        let message = message.unwrap_or_else(|| {
            if status_text.is_empty() {
                "API Error".to_string()
            } else {
                status_text.to_string()
            }
        });

        ApiError {
            status,
            kind: ApiErrorKind::from_status(status),
            message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Machine-readable failure class, derived from the HTTP status code rather
/// than from the error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    AuthExpired,
    Forbidden,
    NotFound,
    Validation,
    Server,
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> ApiErrorKind {
        match status {
            401 => ApiErrorKind::AuthExpired,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Validation,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_follows_status_code() {
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::AuthExpired);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Forbidden);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(400), ApiErrorKind::Validation);
        assert_eq!(ApiErrorKind::from_status(422), ApiErrorKind::Validation);
        assert_eq!(ApiErrorKind::from_status(503), ApiErrorKind::Server);
        assert_eq!(ApiErrorKind::from_status(418), ApiErrorKind::Other);
    }

    #[test]
    fn message_prefers_detail_over_message() {
        let body = json!({ "detail": "expired", "message": "other" });
        let e = ApiError::from_response(401, "Unauthorized", Some(&body));
        assert_eq!(e.message, "expired");
        assert_eq!(e.kind, ApiErrorKind::AuthExpired);
    }

    #[test]
    fn empty_detail_falls_through_to_message() {
        let body = json!({ "detail": "", "message": "bad request" });
        let e = ApiError::from_response(400, "Bad Request", Some(&body));
        assert_eq!(e.message, "bad request");
    }

    #[test]
    fn missing_body_uses_status_text() {
        let e = ApiError::from_response(404, "Not Found", None);
        assert_eq!(e.message, "Not Found");
    }

    #[test]
    fn blank_status_text_uses_generic_fallback() {
        let e = ApiError::from_response(404, "", None);
        assert_eq!(e.message, "API Error");
    }
}
