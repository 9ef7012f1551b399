// ==================== ASSIGNMENTS & SUBMISSIONS ====================
// Grading is a single update_one so the four graded fields land together

use crate::{
    database::{MongoDB, ASSIGNMENTS, SUBMISSIONS},
    models::{Assignment, GradeResult, Submission, SubmissionStatus},
    services::inserted_id_string,
    utils::AppError,
};
use chrono::Utc;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};

pub async fn create_assignment(db: &MongoDB, assignment: Assignment) -> Result<String, AppError> {
    assignment.validate()?;
    log::info!(
        "📝 Creating assignment {} for course {}",
        assignment.assignment_id,
        assignment.course_id
    );

    let result = db
        .collection::<Assignment>(ASSIGNMENTS)
        .insert_one(&assignment)
        .await?;
    Ok(inserted_id_string(&result.inserted_id))
}

pub async fn submit_assignment(db: &MongoDB, submission: Submission) -> Result<String, AppError> {
    submission.validate_new()?;
    log::info!(
        "📝 Submission {} from {} for {}",
        submission.submission_id,
        submission.student_id,
        submission.assignment_id
    );

    let result = db
        .collection::<Submission>(SUBMISSIONS)
        .insert_one(&submission)
        .await?;
    Ok(inserted_id_string(&result.inserted_id))
}

pub fn grade_update(grade: f64, feedback: &str, graded_at: BsonDateTime) -> Document {
    doc! { "$set": {
        "grade": grade,
        "feedback": feedback,
        "status": SubmissionStatus::Graded.as_str(),
        "gradedAt": graded_at,
    }}
}

/// Sets grade, feedback, status and gradedAt on the submission. A missing
/// submission is `NotFound`; a grade outside the assignment's range is
/// rejected before anything is written.
pub async fn grade_assignment(
    db: &MongoDB,
    submission_id: &str,
    grade: f64,
    feedback: &str,
) -> Result<GradeResult, AppError> {
    if !grade.is_finite() || grade < 0.0 {
        return Err(AppError::InvalidRequest(format!("Invalid grade: {}", grade)));
    }

    let submissions = db.collection::<Submission>(SUBMISSIONS);
    let filter = doc! { "submissionId": submission_id };

    let submission = submissions
        .find_one(filter.clone())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("submission {}", submission_id)))?;

    let assignment = db
        .collection::<Assignment>(ASSIGNMENTS)
        .find_one(doc! { "assignmentId": &submission.assignment_id })
        .await?;

    match assignment {
        Some(assignment) => assignment.check_grade(grade)?,
        None => log::warn!(
            "⚠️  Grading {} whose assignment {} does not exist",
            submission_id,
            submission.assignment_id
        ),
    }

    let now = Utc::now();
    let result = submissions
        .update_one(
            filter,
            grade_update(grade, feedback, BsonDateTime::from_millis(now.timestamp_millis())),
        )
        .await?;

    // Deleted between the read and the write
    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("submission {}", submission_id)));
    }

    log::info!("✅ Graded {}: {}", submission_id, grade);

    Ok(GradeResult {
        submission_id: submission_id.to_string(),
        grade,
        feedback: feedback.to_string(),
        status: SubmissionStatus::Graded,
        graded_at: now,
    })
}
