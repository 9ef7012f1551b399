use actix_web::{web, HttpResponse};
use crate::{
    api::{inserted_response, InsertedResponse},
    database::MongoDB,
    models::{CreateUserRequest, UpdateUserRequest, User},
    services::{user_service, UpdateOutcome},
    utils::{handle_duplicate_key, AppError},
};

/// POST /api/v1/users - Create a user of any role
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = InsertedResponse),
        (status = 409, description = "userId or email already taken", body = InsertedResponse)
    )
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    inserted_response(handle_duplicate_key(|| user_service::create_user(&db, request)).await)
}

/// POST /api/v1/users/students - Create a student
#[utoipa::path(
    post,
    path = "/api/v1/users/students",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Student created", body = InsertedResponse),
        (status = 409, description = "userId or email already taken", body = InsertedResponse)
    )
)]
pub async fn create_student(
    db: web::Data<MongoDB>,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    inserted_response(handle_duplicate_key(|| user_service::create_student(&db, request)).await)
}

/// GET /api/v1/users/students/active
#[utoipa::path(
    get,
    path = "/api/v1/users/students/active",
    tag = "Users",
    responses((status = 200, description = "Active students", body = [User]))
)]
pub async fn get_active_students(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let students = user_service::find_active_students(&db).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "students": students,
        "count": students.len()
    })))
}

/// GET /api/v1/users/{user_id}
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Domain user id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    db: web::Data<MongoDB>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(&db, &user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "user": user
    })))
}

/// PATCH /api/v1/users/{user_id} - Partial profile update
#[utoipa::path(
    patch,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Domain user id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Update applied", body = UpdateOutcome),
        (status = 400, description = "Empty or invalid update"),
        (status = 404, description = "No such user")
    )
)]
pub async fn update_user(
    db: web::Data<MongoDB>,
    user_id: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /users/{}", user_id);
    let outcome = user_service::update_user_profile(&db, &user_id, &request).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /api/v1/users/{user_id} - Soft delete (isActive = false)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Domain user id")),
    responses(
        (status = 200, description = "User deactivated", body = UpdateOutcome),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    db: web::Data<MongoDB>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outcome = user_service::soft_delete_user(&db, &user_id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
