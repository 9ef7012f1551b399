use super::{MongoDB, ASSIGNMENTS, COURSES, ENROLLMENTS, SUBMISSIONS, USERS};
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::Serialize;

/// One entry of the index manifest.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexDefinition {
    pub collection: &'static str,
    pub name: &'static str,
    #[schema(value_type = Object)]
    pub keys: Document,
    pub unique: bool,
}

impl IndexDefinition {
    fn new(collection: &'static str, name: &'static str, keys: Document) -> Self {
        Self {
            collection,
            name,
            keys,
            unique: false,
        }
    }

    fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[cfg(test)]
    fn is_text(&self) -> bool {
        self.keys
            .values()
            .any(|v| v.as_str().map(|s| s == "text").unwrap_or(false))
    }

    fn to_model(&self) -> IndexModel {
        let options = IndexOptions::builder()
            .name(self.name.to_string())
            .unique(if self.unique { Some(true) } else { None })
            .build();

        IndexModel::builder()
            .keys(self.keys.clone())
            .options(options)
            .build()
    }
}

/// Every index the platform relies on. The `*_id_unique` entries back the
/// uniqueness of the domain keys so inserts can fail with a duplicate key.
pub fn index_manifest() -> Vec<IndexDefinition> {
    vec![
        // users
        IndexDefinition::new(USERS, "user_email_unique", doc! { "email": 1 }).unique(),
        IndexDefinition::new(USERS, "user_role_active", doc! { "role": 1, "isActive": 1 }),
        IndexDefinition::new(USERS, "user_id_unique", doc! { "userId": 1 }).unique(),
        // courses: one text index per collection, so title/category is a plain compound index
        IndexDefinition::new(
            COURSES,
            "course_title_category_search",
            doc! { "title": 1, "category": 1 },
        ),
        IndexDefinition::new(COURSES, "course_content_text_search", doc! { "content": "text" }),
        IndexDefinition::new(COURSES, "course_id_unique", doc! { "courseId": 1 }).unique(),
        // enrollments
        IndexDefinition::new(
            ENROLLMENTS,
            "enrollment_student_course",
            doc! { "studentId": 1, "courseId": 1 },
        ),
        // assignments
        IndexDefinition::new(ASSIGNMENTS, "assignment_due_date", doc! { "dueDate": 1 }),
        IndexDefinition::new(ASSIGNMENTS, "assignment_id_unique", doc! { "assignmentId": 1 })
            .unique(),
        // submissions
        IndexDefinition::new(
            SUBMISSIONS,
            "submission_student_status",
            doc! { "studentId": 1, "status": 1 },
        ),
        IndexDefinition::new(
            SUBMISSIONS,
            "submission_grading_workflow",
            doc! { "status": 1, "gradedAt": 1 },
        ),
        IndexDefinition::new(SUBMISSIONS, "submission_id_unique", doc! { "submissionId": 1 })
            .unique(),
    ]
}

#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport {
    pub created: Vec<String>,
    pub failed: Vec<IndexFailure>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexFailure {
    pub name: String,
    pub error: String,
}

impl MongoDB {
    /// Creates every index of the manifest. A failing index is logged and
    /// reported; the remaining ones are still attempted.
    pub async fn ensure_indexes(&self) -> IndexReport {
        log::info!("🔧 Creating database indexes...");

        let mut report = IndexReport::default();

        for index in index_manifest() {
            let collection = self.documents(index.collection);
            match collection.create_index(index.to_model()).await {
                Ok(_) => {
                    log::info!("   ✅ Index ready: {}.{}", index.collection, index.name);
                    report.created.push(index.name.to_string());
                }
                Err(e) => {
                    log::warn!("   ⚠️  Index {}.{} failed: {}", index.collection, index.name, e);
                    report.failed.push(IndexFailure {
                        name: index.name.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "✅ Database indexes ready ({} ok, {} failed)",
            report.created.len(),
            report.failed.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_manifest_names_are_unique() {
        let manifest = index_manifest();
        let names: HashSet<_> = manifest.iter().map(|i| i.name).collect();
        assert_eq!(names.len(), manifest.len());
    }

    #[test]
    fn test_manifest_contains_named_indexes() {
        let names: Vec<_> = index_manifest().iter().map(|i| i.name).collect();
        for expected in [
            "user_email_unique",
            "user_role_active",
            "course_title_category_search",
            "course_content_text_search",
            "enrollment_student_course",
            "assignment_due_date",
            "submission_student_status",
            "submission_grading_workflow",
        ] {
            assert!(names.contains(&expected), "missing index {}", expected);
        }
    }

    #[test]
    fn test_domain_keys_are_unique() {
        let manifest = index_manifest();
        for (collection, field) in [
            (USERS, "userId"),
            (USERS, "email"),
            (COURSES, "courseId"),
            (ASSIGNMENTS, "assignmentId"),
            (SUBMISSIONS, "submissionId"),
        ] {
            let found = manifest.iter().any(|i| {
                i.collection == collection && i.unique && i.keys.len() == 1 && i.keys.contains_key(field)
            });
            assert!(found, "no unique index on {}.{}", collection, field);
        }
    }

    #[test]
    fn test_at_most_one_text_index_per_collection() {
        let manifest = index_manifest();
        for collection in super::super::COLLECTIONS {
            let text_indexes = manifest
                .iter()
                .filter(|i| i.collection == collection && i.is_text())
                .count();
            assert!(text_indexes <= 1, "{} has {} text indexes", collection, text_indexes);
        }
    }
}
