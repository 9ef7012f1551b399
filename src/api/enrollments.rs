use actix_web::{web, HttpResponse};
use crate::{
    api::{inserted_response, InsertedResponse},
    database::MongoDB,
    models::Enrollment,
    services::enrollment_service,
    utils::handle_duplicate_key,
};

/// POST /api/v1/enrollments
#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    tag = "Courses",
    request_body = Enrollment,
    responses(
        (status = 201, description = "Student enrolled", body = InsertedResponse),
        (status = 400, description = "progress outside 0..=100", body = InsertedResponse)
    )
)]
pub async fn enroll_student(db: web::Data<MongoDB>, request: web::Json<Enrollment>) -> HttpResponse {
    let enrollment = request.into_inner();
    inserted_response(
        handle_duplicate_key(|| enrollment_service::enroll_student(&db, enrollment)).await,
    )
}
