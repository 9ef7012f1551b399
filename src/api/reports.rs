use actix_web::{web, HttpResponse};
use crate::{
    database::MongoDB,
    models::{CourseEnrollmentStats, StudentPerformance},
    services::analytics_service,
    utils::AppError,
};

/// GET /api/v1/reports/course-enrollments
#[utoipa::path(
    get,
    path = "/api/v1/reports/course-enrollments",
    tag = "Reports",
    responses((status = 200, description = "Per-course enrollment count and mean progress, most enrolled first", body = [CourseEnrollmentStats]))
)]
pub async fn course_enrollments(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let stats = analytics_service::course_enrollment_stats(&db).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "courses": stats,
        "count": stats.len()
    })))
}

/// GET /api/v1/reports/student-performance
#[utoipa::path(
    get,
    path = "/api/v1/reports/student-performance",
    tag = "Reports",
    responses((status = 200, description = "Per-student average percentage grade, best first", body = [StudentPerformance]))
)]
pub async fn student_performance(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let students = analytics_service::student_performance_analysis(&db).await?;
    let ungradable: i64 = students.iter().map(|s| s.ungradable_submissions).sum();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "students": students,
        "count": students.len(),
        "ungradableSubmissions": ungradable
    })))
}
