mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env();

    log::info!("🚀 Starting EduHub Service...");

    let db = match database::MongoDB::try_connect(&config.database).await {
        Some(db) => db,
        None => {
            return Err(std::io::Error::other(format!(
                "could not connect to MongoDB at {}",
                config.database.uri
            )));
        }
    };

    // Collections and indexes are best effort: the service still starts
    if let Err(e) = db.setup_collections().await {
        log::error!("❌ Collection setup failed: {}", e);
    }
    db.ensure_indexes().await;

    run_server(&config, db).await
}

/// Serves the API until shutdown, then releases the pool. The pool is
/// released on every path, including a failed bind.
async fn run_server(config: &config::AppConfig, db: database::MongoDB) -> std::io::Result<()> {
    let db_data = web::Data::new(db.clone());
    let cors_origins = config.cors_allowed_origins.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let server = HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Users
            .service(
                web::scope("/api/v1/users")
                    .route("", web::post().to(api::users::create_user))
                    .route("/students", web::post().to(api::users::create_student))
                    .route("/students/active", web::get().to(api::users::get_active_students))
                    .route("/{user_id}", web::get().to(api::users::get_user))
                    .route("/{user_id}", web::patch().to(api::users::update_user))
                    .route("/{user_id}", web::delete().to(api::users::delete_user))
            )
            // Courses
            .service(
                web::scope("/api/v1/courses")
                    .route("", web::post().to(api::courses::create_course))
                    .route("/with-instructors", web::get().to(api::courses::get_courses_with_instructors))
            )
            .route("/api/v1/enrollments", web::post().to(api::enrollments::enroll_student))
            // Assignments & submissions
            .route("/api/v1/assignments", web::post().to(api::submissions::create_assignment))
            .service(
                web::scope("/api/v1/submissions")
                    .route("", web::post().to(api::submissions::submit_assignment))
                    .route("/{submission_id}/grade", web::put().to(api::submissions::grade_submission))
            )
            // Reports
            .service(
                web::scope("/api/v1/reports")
                    .route("/course-enrollments", web::get().to(api::reports::course_enrollments))
                    .route("/student-performance", web::get().to(api::reports::student_performance))
            )
            // Admin
            .service(
                web::scope("/api/v1/admin")
                    .route("/indexes", web::get().to(api::admin::list_indexes))
                    .route("/indexes", web::post().to(api::admin::ensure_indexes))
                    .route("/integrity", web::get().to(api::admin::verify_integrity))
                    .route("/integrity/checks", web::get().to(api::admin::list_integrity_checks))
            )
    })
    .bind((config.host.as_str(), config.port));

    let result = match server {
        Ok(server) => server.run().await,
        Err(e) => {
            log::error!("❌ Could not bind {}:{}: {}", config.host, config.port, e);
            Err(e)
        }
    };

    db.shutdown().await;

    log::info!("👋 EduHub Service stopped");
    result
}
