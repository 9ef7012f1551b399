use actix_web::{web, HttpResponse};
use crate::{
    api::{inserted_response, InsertedResponse},
    database::MongoDB,
    models::{Course, CourseWithInstructor},
    services::course_service,
    utils::{handle_duplicate_key, AppError},
};

/// POST /api/v1/courses
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    tag = "Courses",
    request_body = Course,
    responses(
        (status = 201, description = "Course created", body = InsertedResponse),
        (status = 409, description = "courseId already taken", body = InsertedResponse)
    )
)]
pub async fn create_course(db: web::Data<MongoDB>, request: web::Json<Course>) -> HttpResponse {
    let course = request.into_inner();
    inserted_response(handle_duplicate_key(|| course_service::create_course(&db, course)).await)
}

/// GET /api/v1/courses/with-instructors - Courses with a resolved instructor
#[utoipa::path(
    get,
    path = "/api/v1/courses/with-instructors",
    tag = "Courses",
    responses((status = 200, description = "One row per course whose instructor exists", body = [CourseWithInstructor]))
)]
pub async fn get_courses_with_instructors(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let courses = course_service::get_courses_with_instructors(&db).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "courses": courses,
        "count": courses.len()
    })))
}
