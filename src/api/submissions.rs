use actix_web::{web, HttpResponse};
use crate::{
    api::{inserted_response, InsertedResponse},
    database::MongoDB,
    models::{Assignment, CreateAssignmentRequest, GradeRequest, GradeResult, Submission, SubmitAssignmentRequest},
    services::assignment_service,
    utils::{handle_duplicate_key, AppError},
};

/// POST /api/v1/assignments
#[utoipa::path(
    post,
    path = "/api/v1/assignments",
    tag = "Assignments",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created", body = InsertedResponse),
        (status = 409, description = "assignmentId already taken", body = InsertedResponse)
    )
)]
pub async fn create_assignment(
    db: web::Data<MongoDB>,
    request: web::Json<CreateAssignmentRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    inserted_response(
        handle_duplicate_key(|| async move {
            let assignment = Assignment::try_from(request)?;
            assignment_service::create_assignment(&db, assignment).await
        })
        .await,
    )
}

/// POST /api/v1/submissions
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    tag = "Assignments",
    request_body = SubmitAssignmentRequest,
    responses(
        (status = 201, description = "Submission stored", body = InsertedResponse),
        (status = 409, description = "submissionId already taken", body = InsertedResponse)
    )
)]
pub async fn submit_assignment(
    db: web::Data<MongoDB>,
    request: web::Json<SubmitAssignmentRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    inserted_response(
        handle_duplicate_key(|| async move {
            let submission = Submission::try_from(request)?;
            assignment_service::submit_assignment(&db, submission).await
        })
        .await,
    )
}

/// PUT /api/v1/submissions/{submission_id}/grade
#[utoipa::path(
    put,
    path = "/api/v1/submissions/{submission_id}/grade",
    tag = "Assignments",
    params(("submission_id" = String, Path, description = "Domain submission id")),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Submission graded", body = GradeResult),
        (status = 400, description = "Grade outside [0, maxPoints]"),
        (status = 404, description = "No such submission"),
        (status = 422, description = "Assignment has no positive maxPoints")
    )
)]
pub async fn grade_submission(
    db: web::Data<MongoDB>,
    submission_id: web::Path<String>,
    request: web::Json<GradeRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 PUT /submissions/{}/grade", submission_id);

    let graded =
        assignment_service::grade_assignment(&db, &submission_id, request.grade, &request.feedback)
            .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "submission": graded
    })))
}
