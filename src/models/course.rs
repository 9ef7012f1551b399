use crate::utils::AppError;
use serde::{Deserialize, Serialize};

/// Document of the `courses` collection. `instructorId` refers to a
/// `User.userId`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub category: String,
    pub instructor_id: String,
    #[serde(default)]
    pub content: String,
}

impl Course {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.course_id.trim().is_empty() {
            return Err(AppError::InvalidRequest("courseId is required".into()));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidRequest("title is required".into()));
        }
        if self.instructor_id.trim().is_empty() {
            return Err(AppError::InvalidRequest("instructorId is required".into()));
        }
        Ok(())
    }
}

/// A course paired with the name of its resolved instructor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithInstructor {
    pub course_id: String,
    pub title: String,
    pub instructor_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_content_defaults_to_empty() {
        let course: Course = mongodb::bson::from_document(doc! {
            "courseId": "C1",
            "title": "Rust 101",
            "category": "programming",
            "instructorId": "I1",
        })
        .unwrap();
        assert_eq!(course.content, "");
        assert!(course.validate().is_ok());
    }

    #[test]
    fn test_missing_instructor_is_rejected() {
        let course = Course {
            course_id: "C1".into(),
            title: "Rust 101".into(),
            category: "programming".into(),
            instructor_id: "".into(),
            content: String::new(),
        };
        assert!(matches!(course.validate(), Err(AppError::InvalidRequest(_))));
    }
}
