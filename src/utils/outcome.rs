use crate::utils::error::AppError;
use actix_web::{http::StatusCode, ResponseError};
use serde::Serialize;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    DuplicateKey,
    OtherError,
}

/// Tagged result of a write: either the operation's value or the kind of
/// failure it hit. Serialized as `{ success, result }` or
/// `{ success, errorType, error }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    failure_status: Option<StatusCode>,
}

impl<T> OperationOutcome<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error_type: None,
            error: None,
            failure_status: None,
        }
    }

    pub fn failed(err: &AppError) -> Self {
        let error_type = match err {
            AppError::DuplicateKey(_) => ErrorType::DuplicateKey,
            _ => ErrorType::OtherError,
        };
        Self {
            success: false,
            result: None,
            error_type: Some(error_type),
            error: Some(err.to_string()),
            failure_status: Some(err.status_code()),
        }
    }

    /// HTTP status of the failure that produced this outcome, if any.
    pub fn failure_status(&self) -> Option<StatusCode> {
        self.failure_status
    }

    pub fn is_duplicate_key(&self) -> bool {
        self.error_type == Some(ErrorType::DuplicateKey)
    }
}

/// Runs `operation` and folds its error into a tagged outcome instead of
/// propagating it. Only unique-constraint violations are reported as
/// `DUPLICATE_KEY`; everything else is `OTHER_ERROR`.
pub async fn handle_duplicate_key<T, F, Fut>(operation: F) -> OperationOutcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    match operation().await {
        Ok(result) => OperationOutcome::ok(result),
        Err(e) => {
            let outcome = OperationOutcome::failed(&e);
            if outcome.is_duplicate_key() {
                log::warn!("⚠️  Duplicate key: {}", e);
            } else {
                log::error!("❌ Operation failed: {}", e);
            }
            outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_is_wrapped() {
        let outcome = handle_duplicate_key(|| async { Ok::<_, AppError>("abc".to_string()) }).await;
        assert!(outcome.success);
        assert_eq!(outcome.result.as_deref(), Some("abc"));
        assert!(outcome.error_type.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_key_is_classified() {
        let outcome = handle_duplicate_key(|| async {
            Err::<(), _>(AppError::DuplicateKey("E11000 users.email".into()))
        })
        .await;
        assert!(!outcome.success);
        assert!(outcome.is_duplicate_key());
    }

    #[tokio::test]
    async fn test_other_failures_are_other_error() {
        // A message mentioning "duplicate key" is not enough on its own.
        let outcome = handle_duplicate_key(|| async {
            Err::<(), _>(AppError::DatabaseError("duplicate key in message only".into()))
        })
        .await;
        assert_eq!(outcome.error_type, Some(ErrorType::OtherError));

        let outcome = handle_duplicate_key(|| async {
            Err::<(), _>(AppError::ConnectionFailure("timeout".into()))
        })
        .await;
        assert_eq!(outcome.error_type, Some(ErrorType::OtherError));
    }

    #[tokio::test]
    async fn test_failure_keeps_status() {
        let outcome = handle_duplicate_key(|| async {
            Err::<(), _>(AppError::InvalidRequest("bad email".into()))
        })
        .await;
        assert_eq!(outcome.failure_status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(OperationOutcome::ok(1).failure_status(), None);
    }

    #[test]
    fn test_serialized_shape() {
        let ok = serde_json::to_value(OperationOutcome::ok(7)).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true, "result": 7 }));

        let failed = serde_json::to_value(OperationOutcome::<i32>::failed(
            &AppError::DuplicateKey("dup".into()),
        ))
        .unwrap();
        assert_eq!(failed["success"], false);
        assert_eq!(failed["errorType"], "DUPLICATE_KEY");
        assert!(failed.get("result").is_none());
    }
}
