pub mod health;
pub mod users;
pub mod courses;
pub mod enrollments;
pub mod submissions;
pub mod reports;
pub mod admin;
pub mod swagger;

use crate::utils::{ErrorType, OperationOutcome};
use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Answer of an insert endpoint: the `_id` of the new document, or the
/// kind of failure.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 201 on success, otherwise the status of the failure (409 for a
/// duplicate key) with the same tagged body.
pub(crate) fn inserted_response(outcome: OperationOutcome<String>) -> HttpResponse {
    let status = if outcome.success {
        StatusCode::CREATED
    } else {
        outcome
            .failure_status()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    };

    HttpResponse::build(status).json(InsertedResponse {
        success: outcome.success,
        result: outcome.result,
        error_type: outcome.error_type,
        error: outcome.error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AppError;

    #[test]
    fn test_inserted_status_codes() {
        assert_eq!(
            inserted_response(OperationOutcome::ok("id".to_string())).status(),
            StatusCode::CREATED
        );
        assert_eq!(
            inserted_response(OperationOutcome::failed(&AppError::DuplicateKey("dup".into())))
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            inserted_response(OperationOutcome::failed(&AppError::InvalidRequest("bad".into())))
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_rt::test]
    async fn test_app_error_renders_json() {
        use actix_web::{test, web, App};

        async fn missing() -> Result<HttpResponse, AppError> {
            Err(AppError::NotFound("submission SUB404".into()))
        }

        let app = test::init_service(App::new().route("/missing", web::get().to(missing))).await;
        let response = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Not found: submission SUB404");
    }
}
