use crate::{
    database::{MongoDB, ENROLLMENTS},
    models::Enrollment,
    services::inserted_id_string,
    utils::AppError,
};

pub async fn enroll_student(db: &MongoDB, enrollment: Enrollment) -> Result<String, AppError> {
    enrollment.validate()?;
    log::info!(
        "📝 Enrolling {} in {}",
        enrollment.student_id,
        enrollment.course_id
    );

    let result = db
        .collection::<Enrollment>(ENROLLMENTS)
        .insert_one(&enrollment)
        .await?;
    Ok(inserted_id_string(&result.inserted_id))
}
