// ==================== COURSES ====================

use crate::{
    database::{MongoDB, COURSES, USERS},
    models::{Course, CourseWithInstructor},
    services::{aggregate_rows, inserted_id_string},
    utils::AppError,
};
use mongodb::bson::{doc, Document};

pub async fn create_course(db: &MongoDB, course: Course) -> Result<String, AppError> {
    course.validate()?;
    log::info!("📝 Creating course {} ({})", course.course_id, course.title);

    let result = db.collection::<Course>(COURSES).insert_one(&course).await?;
    Ok(inserted_id_string(&result.inserted_id))
}

/// Joins each course to its instructor by `instructorId = userId`. The
/// `$unwind` drops courses whose instructor does not exist. Missing name or
/// title fields project as empty strings.
pub fn courses_with_instructors_pipeline() -> Vec<Document> {
    vec![
        doc! { "$lookup": {
            "from": USERS,
            "localField": "instructorId",
            "foreignField": "userId",
            "as": "instructor_info"
        }},
        doc! { "$unwind": "$instructor_info" },
        doc! { "$project": {
            "_id": 0,
            "courseId": 1,
            "title": { "$ifNull": ["$title", ""] },
            "instructorName": {
                "$concat": [
                    { "$ifNull": ["$instructor_info.firstName", ""] },
                    " ",
                    { "$ifNull": ["$instructor_info.lastName", ""] }
                ]
            }
        }},
    ]
}

pub async fn get_courses_with_instructors(db: &MongoDB) -> Result<Vec<CourseWithInstructor>, AppError> {
    aggregate_rows(&db.documents(COURSES), courses_with_instructors_pipeline()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rows_from_documents;
    use mongodb::bson::Bson;

    #[test]
    fn test_pipeline_stages() {
        let pipeline = courses_with_instructors_pipeline();
        let stages: Vec<&str> = pipeline
            .iter()
            .map(|stage| stage.keys().next().unwrap().as_str())
            .collect();
        assert_eq!(stages, vec!["$lookup", "$unwind", "$project"]);

        let lookup = pipeline[0].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "users");
        assert_eq!(lookup.get_str("localField").unwrap(), "instructorId");
        assert_eq!(lookup.get_str("foreignField").unwrap(), "userId");
    }

    #[test]
    fn test_missing_name_parts_default_to_empty() {
        let pipeline = courses_with_instructors_pipeline();
        let project = pipeline[2].get_document("$project").unwrap();
        assert_eq!(
            project.get_document("title").unwrap(),
            &doc! { "$ifNull": ["$title", ""] }
        );

        let parts = project
            .get_document("instructorName")
            .unwrap()
            .get_array("$concat")
            .unwrap();
        assert_eq!(
            parts[0],
            Bson::Document(doc! { "$ifNull": ["$instructor_info.firstName", ""] })
        );
        assert_eq!(
            parts[2],
            Bson::Document(doc! { "$ifNull": ["$instructor_info.lastName", ""] })
        );
    }

    #[test]
    fn test_projected_row_maps_to_record() {
        let rows: Vec<CourseWithInstructor> = rows_from_documents(vec![doc! {
            "courseId": "C1",
            "title": "Rust 101",
            "instructorName": "Ada Lovelace",
        }])
        .unwrap();
        assert_eq!(rows[0].instructor_name, "Ada Lovelace");
    }
}
