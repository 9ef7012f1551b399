use actix_web::{web, HttpResponse};
use crate::{
    database::{indexes::{index_manifest, IndexDefinition, IndexReport}, MongoDB},
    models::IntegrityReport,
    services::integrity_service::{self, IntegrityCheck},
    utils::AppError,
};

/// GET /api/v1/admin/indexes - The index manifest
#[utoipa::path(
    get,
    path = "/api/v1/admin/indexes",
    tag = "Admin",
    responses((status = 200, description = "Indexes the service maintains", body = [IndexDefinition]))
)]
pub async fn list_indexes() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "indexes": index_manifest()
    }))
}

/// POST /api/v1/admin/indexes - Create every index of the manifest
#[utoipa::path(
    post,
    path = "/api/v1/admin/indexes",
    tag = "Admin",
    responses((status = 200, description = "Per-index result", body = IndexReport))
)]
pub async fn ensure_indexes(db: web::Data<MongoDB>) -> HttpResponse {
    let report = db.ensure_indexes().await;
    HttpResponse::Ok().json(report)
}

/// GET /api/v1/admin/integrity/checks - Checks the integrity scan runs
#[utoipa::path(
    get,
    path = "/api/v1/admin/integrity/checks",
    tag = "Admin",
    responses((status = 200, description = "Reference checks", body = [IntegrityCheck]))
)]
pub async fn list_integrity_checks() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "checks": integrity_service::integrity_checks()
    }))
}

/// GET /api/v1/admin/integrity - Scan for orphaned references
#[utoipa::path(
    get,
    path = "/api/v1/admin/integrity",
    tag = "Admin",
    responses((status = 200, description = "Orphaned references per check", body = IntegrityReport))
)]
pub async fn verify_integrity(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let report = integrity_service::verify_data_integrity(&db).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_rt::test]
    async fn test_list_indexes_without_database() {
        let app = test::init_service(
            App::new().route("/indexes", web::get().to(list_indexes)),
        )
        .await;
        let request = test::TestRequest::get().uri("/indexes").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["success"], true);
        let names: Vec<&str> = body["indexes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"user_email_unique"));
        assert!(names.contains(&"submission_grading_workflow"));
    }

    #[actix_rt::test]
    async fn test_list_integrity_checks() {
        let app = test::init_service(
            App::new().route("/checks", web::get().to(list_integrity_checks)),
        )
        .await;
        let request = test::TestRequest::get().uri("/checks").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["checks"].as_array().unwrap().len(), 3);
        assert_eq!(body["checks"][1]["rules"][0]["localField"], "studentId");
    }
}
