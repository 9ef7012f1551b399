use crate::utils::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
    /// Completion percentage, 0 to 100
    #[serde(default)]
    pub progress: f64,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "active".to_string()
}

impl Enrollment {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.student_id.trim().is_empty() || self.course_id.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "studentId and courseId are required".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.progress) {
            return Err(AppError::InvalidRequest(format!(
                "progress must be between 0 and 100, got {}",
                self.progress
            )));
        }
        Ok(())
    }
}

/// One row of the enrollment statistics report.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollmentStats {
    pub course_id: String,
    pub course_title: String,
    pub total_enrollments: i64,
    pub average_progress: Option<f64>,
}
