use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use std::fmt;

/// Server codes MongoDB uses for unique-constraint violations
/// (11000 = duplicate key, 11001 = legacy duplicate key on update,
/// 12582 = duplicate key on a legacy index build).
const DUPLICATE_KEY_CODES: [i32; 3] = [11000, 11001, 12582];

#[derive(Debug)]
pub enum AppError {
    ConnectionFailure(String),
    DuplicateKey(String),
    NotFound(String),
    InvalidRequest(String),
    DataIntegrity(String),
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConnectionFailure(msg) => write!(f, "Connection failure: {}", msg),
            AppError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::DataIntegrity(msg) => write!(f, "Data integrity error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

pub fn is_duplicate_key_code(code: i32) -> bool {
    DUPLICATE_KEY_CODES.contains(&code)
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        let message = err.to_string();
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if is_duplicate_key_code(write_error.code) =>
            {
                AppError::DuplicateKey(message)
            }
            ErrorKind::Command(command_error) if is_duplicate_key_code(command_error.code) => {
                AppError::DuplicateKey(message)
            }
            ErrorKind::Io(_)
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Authentication { .. } => AppError::ConnectionFailure(message),
            _ => AppError::DatabaseError(message),
        }
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::DataIntegrity(format!("Malformed document: {}", err))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConnectionFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DataIntegrity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}
