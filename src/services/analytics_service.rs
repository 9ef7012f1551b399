// ==================== REPORTS ====================
// Aggregations over enrollments and submissions. All grouping happens in
// MongoDB; these functions only build the pipelines and map the rows.

use crate::{
    database::{MongoDB, ASSIGNMENTS, COURSES, ENROLLMENTS, SUBMISSIONS},
    models::{CourseEnrollmentStats, StudentPerformance, SubmissionStatus},
    services::aggregate_rows,
    utils::AppError,
};
use mongodb::bson::{doc, Bson, Document};

/// Enrollments joined to their course, grouped per course, most enrolled
/// first. Ties are broken by courseId.
pub fn course_enrollment_stats_pipeline() -> Vec<Document> {
    vec![
        doc! { "$lookup": {
            "from": COURSES,
            "localField": "courseId",
            "foreignField": "courseId",
            "as": "course_info"
        }},
        doc! { "$unwind": "$course_info" },
        doc! { "$group": {
            "_id": "$courseId",
            "courseTitle": { "$first": { "$ifNull": ["$course_info.title", ""] } },
            "totalEnrollments": { "$sum": 1 },
            "averageProgress": { "$avg": "$progress" }
        }},
        doc! { "$sort": { "totalEnrollments": -1, "_id": 1 } },
        doc! { "$project": {
            "_id": 0,
            "courseId": "$_id",
            "courseTitle": 1,
            "totalEnrollments": 1,
            "averageProgress": 1
        }},
    ]
}

pub async fn course_enrollment_stats(db: &MongoDB) -> Result<Vec<CourseEnrollmentStats>, AppError> {
    aggregate_rows(&db.documents(ENROLLMENTS), course_enrollment_stats_pipeline()).await
}

/// Graded submissions joined to their assignment, averaged per student as a
/// percentage of maxPoints, best average first.
///
/// `percentageGrade` is null when either side is not a number or maxPoints is
/// not positive. `$avg` skips nulls, so those submissions only show up in
/// `ungradableSubmissions`.
pub fn student_performance_pipeline() -> Vec<Document> {
    let max_points = "$assignment_info.maxPoints";
    let ungradable = doc! { "$eq": ["$percentageGrade", Bson::Null] };

    vec![
        doc! { "$match": {
            "status": SubmissionStatus::Graded.as_str(),
            "grade": { "$ne": Bson::Null }
        }},
        doc! { "$lookup": {
            "from": ASSIGNMENTS,
            "localField": "assignmentId",
            "foreignField": "assignmentId",
            "as": "assignment_info"
        }},
        doc! { "$unwind": "$assignment_info" },
        doc! { "$addFields": {
            "percentageGrade": { "$cond": {
                "if": { "$and": [
                    { "$isNumber": "$grade" },
                    { "$isNumber": max_points },
                    { "$gt": [max_points, 0] }
                ]},
                "then": { "$divide": [{ "$multiply": ["$grade", 100] }, max_points] },
                "else": Bson::Null
            }}
        }},
        doc! { "$group": {
            "_id": "$studentId",
            "averageGrade": { "$avg": "$percentageGrade" },
            "totalAssignments": { "$sum": { "$cond": [ungradable.clone(), 0, 1] } },
            "ungradableSubmissions": { "$sum": { "$cond": [ungradable, 1, 0] } }
        }},
        doc! { "$sort": { "averageGrade": -1, "_id": 1 } },
        doc! { "$project": {
            "_id": 0,
            "studentId": "$_id",
            "averageGrade": 1,
            "totalAssignments": 1,
            "ungradableSubmissions": 1
        }},
    ]
}

pub async fn student_performance_analysis(db: &MongoDB) -> Result<Vec<StudentPerformance>, AppError> {
    let rows: Vec<StudentPerformance> =
        aggregate_rows(&db.documents(SUBMISSIONS), student_performance_pipeline()).await?;

    for row in rows.iter().filter(|r| r.ungradable_submissions > 0) {
        log::warn!(
            "⚠️  Student {}: {} graded submission(s) reference an assignment without positive maxPoints",
            row.student_id,
            row.ungradable_submissions
        );
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rows_from_documents;

    fn stage_names(pipeline: &[Document]) -> Vec<String> {
        pipeline
            .iter()
            .map(|stage| stage.keys().next().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_enrollment_stats_pipeline_shape() {
        let pipeline = course_enrollment_stats_pipeline();
        assert_eq!(
            stage_names(&pipeline),
            vec!["$lookup", "$unwind", "$group", "$sort", "$project"]
        );

        let sort = pipeline[3].get_document("$sort").unwrap();
        assert_eq!(sort.keys().next().unwrap(), "totalEnrollments");
        assert_eq!(sort.get_i32("totalEnrollments").unwrap(), -1);
    }

    #[test]
    fn test_missing_course_title_defaults_to_empty() {
        let pipeline = course_enrollment_stats_pipeline();
        let group = pipeline[2].get_document("$group").unwrap();
        assert_eq!(
            group.get_document("courseTitle").unwrap(),
            &doc! { "$first": { "$ifNull": ["$course_info.title", ""] } }
        );
    }

    #[test]
    fn test_performance_pipeline_filters_graded_first() {
        let pipeline = student_performance_pipeline();
        assert_eq!(
            stage_names(&pipeline),
            vec!["$match", "$lookup", "$unwind", "$addFields", "$group", "$sort", "$project"]
        );

        let filter = pipeline[0].get_document("$match").unwrap();
        assert_eq!(filter.get_str("status").unwrap(), "graded");
        assert_eq!(
            filter.get_document("grade").unwrap(),
            &doc! { "$ne": Bson::Null }
        );
    }

    #[test]
    fn test_percentage_divides_after_scaling() {
        let pipeline = student_performance_pipeline();
        let cond = pipeline[3]
            .get_document("$addFields")
            .and_then(|d| d.get_document("percentageGrade"))
            .and_then(|d| d.get_document("$cond"))
            .unwrap();

        assert_eq!(
            cond.get_document("then").unwrap(),
            &doc! { "$divide": [{ "$multiply": ["$grade", 100] }, "$assignment_info.maxPoints"] }
        );
        assert_eq!(cond.get("else"), Some(&Bson::Null));
    }

    #[test]
    fn test_performance_rows_map() {
        let rows: Vec<StudentPerformance> = rows_from_documents(vec![
            doc! { "studentId": "S1", "averageGrade": 80.0, "totalAssignments": 2, "ungradableSubmissions": 0 },
            doc! { "studentId": "S2", "averageGrade": 55.5, "totalAssignments": 1, "ungradableSubmissions": 1 },
        ])
        .unwrap();
        assert_eq!(rows[0].average_grade, Some(80.0));
        assert_eq!(rows[1].ungradable_submissions, 1);
    }
}
