//! Page error handling for the Corkboard web UI.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::template::escape_html;
use crate::CorkboardError;

/// Page error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not found (404).
    NotFound,
    /// Rejected user input (422).
    Validation,
    /// Internal server error (500).
    Internal,
}

impl ErrorKind {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Validation => "Invalid Input",
            ErrorKind::Internal => "Internal Server Error",
        }
    }
}

/// Error answered with a small standalone HTML page.
#[derive(Debug)]
pub struct PageError {
    kind: ErrorKind,
    message: String,
}

impl PageError {
    /// Create a new page error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the message shown on the page.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn to_html(&self) -> String {
        let title = self.kind.title();
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
             <body>\n<h1>{title}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the board list</a></p>\n</body>\n</html>\n",
            escape_html(&self.message)
        )
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.kind.status_code(), Html(self.to_html())).into_response()
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for PageError {}

impl From<CorkboardError> for PageError {
    fn from(err: CorkboardError) -> Self {
        match &err {
            CorkboardError::NotFound(what) => PageError::not_found(format!("The {what} does not exist.")),
            CorkboardError::Validation(msg) => PageError::validation(msg.clone()),
            _ => {
                tracing::error!("Internal error: {}", err);
                PageError::internal("Something went wrong. Please try again later.")
            }
        }
    }
}
