use crate::utils::AppError;
use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub assignment_id: String,
    pub course_id: String,
    pub due_date: BsonDateTime,
    pub max_points: f64,
}

impl Assignment {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.assignment_id.trim().is_empty() || self.course_id.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "assignmentId and courseId are required".into(),
            ));
        }
        if !(self.max_points > 0.0) {
            return Err(AppError::InvalidRequest(format!(
                "maxPoints must be positive, got {}",
                self.max_points
            )));
        }
        Ok(())
    }

    /// Checks a grade against this assignment's point range.
    pub fn check_grade(&self, grade: f64) -> Result<(), AppError> {
        if self.max_points <= 0.0 {
            return Err(AppError::DataIntegrity(format!(
                "Assignment {} has non-positive maxPoints ({})",
                self.assignment_id, self.max_points
            )));
        }
        if !(0.0..=self.max_points).contains(&grade) {
            return Err(AppError::InvalidRequest(format!(
                "grade {} outside [0, {}] for assignment {}",
                grade, self.max_points, self.assignment_id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub assignment_id: String,
    pub course_id: String,
    pub due_date: DateTime<Utc>,
    pub max_points: f64,
}

impl TryFrom<CreateAssignmentRequest> for Assignment {
    type Error = AppError;

    fn try_from(request: CreateAssignmentRequest) -> Result<Self, Self::Error> {
        let assignment = Assignment {
            assignment_id: request.assignment_id,
            course_id: request.course_id,
            due_date: BsonDateTime::from_millis(request.due_date.timestamp_millis()),
            max_points: request.max_points,
        };
        assignment.validate()?;
        Ok(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(max_points: f64) -> Assignment {
        Assignment {
            assignment_id: "A1".into(),
            course_id: "C1".into(),
            due_date: BsonDateTime::now(),
            max_points,
        }
    }

    #[test]
    fn test_grade_bounds() {
        let a = assignment(100.0);
        assert!(a.check_grade(0.0).is_ok());
        assert!(a.check_grade(100.0).is_ok());
        assert!(matches!(a.check_grade(100.5), Err(AppError::InvalidRequest(_))));
        assert!(matches!(a.check_grade(-3.0), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_zero_max_points_is_data_error() {
        assert!(matches!(
            assignment(0.0).check_grade(0.0),
            Err(AppError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_max_points() {
        assert!(assignment(10.0).validate().is_ok());
        for max_points in [0.0, -5.0, f64::NAN] {
            assert!(matches!(
                assignment(max_points).validate(),
                Err(AppError::InvalidRequest(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_blank_ids() {
        let mut a = assignment(10.0);
        a.course_id = "  ".into();
        assert!(matches!(a.validate(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_request_conversion() {
        let due: DateTime<Utc> = "2026-11-01T12:00:00Z".parse().unwrap();
        let request = CreateAssignmentRequest {
            assignment_id: "A1".into(),
            course_id: "C1".into(),
            due_date: due,
            max_points: 50.0,
        };
        let assignment = Assignment::try_from(request).unwrap();
        assert_eq!(assignment.due_date.timestamp_millis(), due.timestamp_millis());

        let request = CreateAssignmentRequest {
            assignment_id: "A2".into(),
            course_id: "C1".into(),
            due_date: due,
            max_points: 0.0,
        };
        assert!(Assignment::try_from(request).is_err());
    }
}
