use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failures on the decode side of the obfuscation codec.
///
/// Any of these means the payload is discarded whole; a partially parsed
/// table is never handed back.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a lookup table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lookup table is malformed: {0}")]
    InvalidTable(String),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("need an even number of at least 4 participants, got {0}")]
    InvalidParticipantCount(usize),

    #[error("Please enter a name")]
    EmptyName,

    #[error("Please enter your secret code")]
    EmptyCode,

    #[error("{0} is already added")]
    DuplicateParticipant(String),

    #[error("setup must be explicitly confirmed, it cannot be undone")]
    NotConfirmed,

    #[error("the exchange has already been set up")]
    AlreadySetUp,

    #[error("the exchange has not been set up yet")]
    NotSetUp,

    #[error("Invalid secret code. Please check your code and try again.")]
    UnknownCode,

    #[error("The name doesn't match this code. Please check your name and code.")]
    NameMismatch,

    #[error("snapshot source unavailable: {0}")]
    SourceUnavailable(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Template(#[from] minijinja::Error),
}

impl ExchangeError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExchangeError::InvalidParticipantCount(_) => "InvalidParticipantCount",
            ExchangeError::EmptyName => "EmptyName",
            ExchangeError::EmptyCode => "EmptyCode",
            ExchangeError::DuplicateParticipant(_) => "DuplicateParticipant",
            ExchangeError::NotConfirmed => "NotConfirmed",
            ExchangeError::AlreadySetUp => "AlreadySetUp",
            ExchangeError::NotSetUp => "NotSetUp",
            ExchangeError::UnknownCode => "UnknownCode",
            ExchangeError::NameMismatch => "NameMismatch",
            ExchangeError::SourceUnavailable(_) => "SourceUnavailable",
            ExchangeError::Codec(_) => "CodecError",
            ExchangeError::Store(_) => "Store",
            ExchangeError::Template(_) => "Template",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ExchangeError::InvalidParticipantCount(_)
            | ExchangeError::EmptyName
            | ExchangeError::EmptyCode
            | ExchangeError::DuplicateParticipant(_)
            | ExchangeError::NotConfirmed => StatusCode::UNPROCESSABLE_ENTITY,
            ExchangeError::AlreadySetUp => StatusCode::CONFLICT,
            ExchangeError::NotSetUp | ExchangeError::UnknownCode => StatusCode::NOT_FOUND,
            ExchangeError::NameMismatch => StatusCode::FORBIDDEN,
            ExchangeError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
            ExchangeError::Codec(_) | ExchangeError::Store(_) | ExchangeError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}: {}", self.kind(), self);
        }
        let body = ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
