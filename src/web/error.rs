use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::web::models::ErrorBody;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("API key is required")]
    MissingCredential,
    #[error("Invalid request body")]
    InvalidBody,
    /// Upstream could not be reached; the cause is logged, never returned.
    #[error("Internal server error")]
    Transport,
    #[error("{body}")]
    Rejected { status: StatusCode, body: String },
}

impl RelayError {
    pub fn rejected(status: u16, body: String) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
        RelayError::Rejected { status, body }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingCredential | RelayError::InvalidBody => StatusCode::BAD_REQUEST,
            RelayError::Transport => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Rejected { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
