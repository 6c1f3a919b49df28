use {super::*, std::fmt::Write};

#[derive(Debug)]
pub(super) enum ServerError {
    BadRequest(String),
    Internal(Error),
    NotFound(String),
    Upstream(ServiceError),
}

pub(super) type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Internal(error) => {
                let mut message = format!("error serving request: {error}");
                for cause in error.chain().skip(1) {
                    write!(message, "\n  because: {cause}").ok();
                }
                log::error!("{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    StatusCode::INTERNAL_SERVER_ERROR
                        .canonical_reason()
                        .unwrap_or_default(),
                )
                    .into_response()
            }
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
                message,
            )
                .into_response(),
            Self::Upstream(error) => {
                log::error!("data service request failed: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    StatusCode::BAD_GATEWAY
                        .canonical_reason()
                        .unwrap_or_default(),
                )
                    .into_response()
            }
        }
    }
}

pub(super) trait OptionExt<T> {
    fn ok_or_not_found<F: FnOnce() -> S, S: Into<String>>(self, f: F) -> ServerResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found<F: FnOnce() -> S, S: Into<String>>(self, f: F) -> ServerResult<T> {
        match self {
            Some(value) => Ok(value),
            None => Err(ServerError::NotFound(f().into() + " not found")),
        }
    }
}

impl From<Error> for ServerError {
    fn from(error: Error) -> Self {
        Self::Internal(error)
    }
}

impl From<ServiceError> for ServerError {
    fn from(error: ServiceError) -> Self {
        Self::Upstream(error)
    }
}
