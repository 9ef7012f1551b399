use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EduHub Service API",
        version = "1.0.0",
        description = "Data service for the EduHub learning platform.\n\n**Features:**\n- Users, courses, enrollments, assignments and submissions\n- Grading\n- Enrollment and performance reports\n- Index manifest and data integrity scan",
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::create_user,
        crate::api::users::create_student,
        crate::api::users::get_active_students,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Courses
        crate::api::courses::create_course,
        crate::api::courses::get_courses_with_instructors,
        crate::api::enrollments::enroll_student,

        // Assignments
        crate::api::submissions::create_assignment,
        crate::api::submissions::submit_assignment,
        crate::api::submissions::grade_submission,

        // Reports
        crate::api::reports::course_enrollments,
        crate::api::reports::student_performance,

        // Admin
        crate::api::admin::list_indexes,
        crate::api::admin::ensure_indexes,
        crate::api::admin::list_integrity_checks,
        crate::api::admin::verify_integrity,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::InsertedResponse,
            crate::utils::ErrorType,
            crate::services::UpdateOutcome,
            crate::models::User,
            crate::models::Role,
            crate::models::CreateUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::Course,
            crate::models::CourseWithInstructor,
            crate::models::Enrollment,
            crate::models::CourseEnrollmentStats,
            crate::models::CreateAssignmentRequest,
            crate::models::SubmitAssignmentRequest,
            crate::models::GradeRequest,
            crate::models::GradeResult,
            crate::models::SubmissionStatus,
            crate::models::StudentPerformance,
            crate::models::IntegrityReport,
            crate::models::IntegrityCheckResult,
            crate::models::OrphanedReference,
            crate::services::integrity_service::IntegrityCheck,
            crate::services::integrity_service::ReferenceRule,
            crate::database::indexes::IndexDefinition,
            crate::database::indexes::IndexReport,
            crate::database::indexes::IndexFailure,
        )
    ),
    tags(
        (name = "Health", description = "Service and database liveness."),
        (name = "Users", description = "Students, instructors and admins. Deletion is a soft delete."),
        (name = "Courses", description = "Courses, their instructors and enrollments."),
        (name = "Assignments", description = "Assignments, submissions and grading."),
        (name = "Reports", description = "Aggregated enrollment and performance statistics."),
        (name = "Admin", description = "Index manifest and data integrity scan."),
    )
)]
pub struct ApiDoc;
