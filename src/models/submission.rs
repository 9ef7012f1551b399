use crate::utils::AppError;
use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Submitted,
    Graded,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
        }
    }
}

/// Document of the `submissions` collection. `grade` and `gradedAt` are
/// stored as explicit nulls until the submission is graded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    pub student_id: String,
    pub assignment_id: String,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub graded_at: Option<BsonDateTime>,
}

impl Submission {
    /// A new submission must reference a student and an assignment and
    /// carry no grading state yet.
    pub fn validate_new(&self) -> Result<(), AppError> {
        if self.submission_id.trim().is_empty()
            || self.student_id.trim().is_empty()
            || self.assignment_id.trim().is_empty()
        {
            return Err(AppError::InvalidRequest(
                "submissionId, studentId and assignmentId are required".into(),
            ));
        }
        if self.status != SubmissionStatus::Submitted
            || self.grade.is_some()
            || self.graded_at.is_some()
        {
            return Err(AppError::InvalidRequest(format!(
                "submission {} must be submitted ungraded",
                self.submission_id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    pub submission_id: String,
    pub student_id: String,
    pub assignment_id: String,
}

impl TryFrom<SubmitAssignmentRequest> for Submission {
    type Error = AppError;

    fn try_from(request: SubmitAssignmentRequest) -> Result<Self, Self::Error> {
        let submission = Submission {
            submission_id: request.submission_id,
            student_id: request.student_id,
            assignment_id: request.assignment_id,
            grade: None,
            feedback: None,
            status: SubmissionStatus::Submitted,
            graded_at: None,
        };
        submission.validate_new()?;
        Ok(submission)
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GradeRequest {
    pub grade: f64,
    #[serde(default)]
    pub feedback: String,
}

/// What a successful grading wrote.
#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub submission_id: String,
    pub grade: f64,
    pub feedback: String,
    pub status: SubmissionStatus,
    pub graded_at: DateTime<Utc>,
}

/// One row of the student performance report. Submissions whose assignment
/// has a non-positive `maxPoints` are left out of the average and counted in
/// `ungradableSubmissions`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentPerformance {
    pub student_id: String,
    pub average_grade: Option<f64>,
    pub total_assignments: i64,
    #[serde(default)]
    pub ungradable_submissions: i64,
}
