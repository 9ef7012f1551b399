// ==================== DATA INTEGRITY ====================
// Advisory scan for references that point at nothing. Reports only;
// nothing is repaired or blocked.

use crate::{
    database::{MongoDB, ASSIGNMENTS, COURSES, ENROLLMENTS, SUBMISSIONS, USERS},
    models::{IntegrityCheckResult, IntegrityReport, OrphanedReference},
    services::bson_to_string,
    utils::AppError,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use serde::Serialize;

const SAMPLE_LIMIT: i64 = 20;

/// `collection.local_field` must match some `target_collection.target_field`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRule {
    pub collection: &'static str,
    pub key_field: &'static str,
    pub local_field: &'static str,
    pub target_collection: &'static str,
    pub target_field: &'static str,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityCheck {
    pub name: &'static str,
    pub rules: Vec<ReferenceRule>,
}

/// The reference checks the platform defines.
pub fn integrity_checks() -> Vec<IntegrityCheck> {
    vec![
        IntegrityCheck {
            name: "Course instructor references",
            rules: vec![ReferenceRule {
                collection: COURSES,
                key_field: "courseId",
                local_field: "instructorId",
                target_collection: USERS,
                target_field: "userId",
            }],
        },
        IntegrityCheck {
            name: "Enrollment references",
            rules: vec![
                ReferenceRule {
                    collection: ENROLLMENTS,
                    key_field: "_id",
                    local_field: "studentId",
                    target_collection: USERS,
                    target_field: "userId",
                },
                ReferenceRule {
                    collection: ENROLLMENTS,
                    key_field: "_id",
                    local_field: "courseId",
                    target_collection: COURSES,
                    target_field: "courseId",
                },
            ],
        },
        IntegrityCheck {
            name: "Submission references",
            rules: vec![
                ReferenceRule {
                    collection: SUBMISSIONS,
                    key_field: "submissionId",
                    local_field: "studentId",
                    target_collection: USERS,
                    target_field: "userId",
                },
                ReferenceRule {
                    collection: SUBMISSIONS,
                    key_field: "submissionId",
                    local_field: "assignmentId",
                    target_collection: ASSIGNMENTS,
                    target_field: "assignmentId",
                },
            ],
        },
    ]
}

/// Finds documents whose lookup comes back empty. Emits a single document
/// `{ total: [{ n }], samples: [{ key, value }] }`.
pub fn orphan_pipeline(rule: &ReferenceRule) -> Vec<Document> {
    vec![
        doc! { "$lookup": {
            "from": rule.target_collection,
            "localField": rule.local_field,
            "foreignField": rule.target_field,
            "as": "_ref"
        }},
        doc! { "$match": { "_ref": { "$size": 0 } } },
        doc! { "$facet": {
            "total": [{ "$count": "n" }],
            "samples": [
                { "$limit": SAMPLE_LIMIT },
                { "$project": {
                    "_id": 0,
                    "key": format!("${}", rule.key_field),
                    "value": format!("${}", rule.local_field)
                }}
            ]
        }},
    ]
}

fn parse_orphan_facet(rule: &ReferenceRule, facet: &Document) -> (u64, Vec<OrphanedReference>) {
    let total = facet
        .get_array("total")
        .ok()
        .and_then(|entries| entries.first())
        .and_then(Bson::as_document)
        .and_then(|entry| match entry.get("n") {
            Some(Bson::Int32(n)) => Some(*n as u64),
            Some(Bson::Int64(n)) => Some(*n as u64),
            _ => None,
        })
        .unwrap_or(0);

    let samples = facet
        .get_array("samples")
        .map(|samples| {
            samples
                .iter()
                .filter_map(Bson::as_document)
                .map(|sample| OrphanedReference {
                    collection: rule.collection.to_string(),
                    key: bson_to_string(sample.get("key")),
                    field: rule.local_field.to_string(),
                    missing_value: bson_to_string(sample.get("value")),
                })
                .collect()
        })
        .unwrap_or_default();

    (total, samples)
}

async fn scan_rule(
    db: &MongoDB,
    rule: &ReferenceRule,
) -> Result<(u64, Vec<OrphanedReference>), AppError> {
    let facets: Vec<Document> = db
        .documents(rule.collection)
        .aggregate(orphan_pipeline(rule))
        .await?
        .try_collect()
        .await?;

    Ok(facets
        .first()
        .map(|facet| parse_orphan_facet(rule, facet))
        .unwrap_or((0, Vec::new())))
}

/// Runs every check and reports orphaned references.
pub async fn verify_data_integrity(db: &MongoDB) -> Result<IntegrityReport, AppError> {
    log::info!("🔍 Verifying data integrity...");

    let mut results = Vec::new();
    for check in integrity_checks() {
        let mut orphaned = 0;
        let mut samples = Vec::new();

        for rule in &check.rules {
            let (count, found) = scan_rule(db, rule).await?;
            orphaned += count;
            samples.extend(found);
        }

        if orphaned > 0 {
            log::warn!("   ⚠️  {}: {} orphaned reference(s)", check.name, orphaned);
        } else {
            log::info!("   ✅ {}: ok", check.name);
        }

        results.push(IntegrityCheckResult {
            name: check.name.to_string(),
            orphaned,
            samples,
        });
    }

    Ok(IntegrityReport::from_checks(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_check_manifest() {
        let names: Vec<_> = integrity_checks().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "Course instructor references",
                "Enrollment references",
                "Submission references"
            ]
        );
    }

    #[test]
    fn test_orphan_pipeline_matches_empty_lookup() {
        let rule = integrity_checks()[0].rules[0];
        let pipeline = orphan_pipeline(&rule);

        let lookup = pipeline[0].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "users");
        assert_eq!(lookup.get_str("localField").unwrap(), "instructorId");
        assert_eq!(
            pipeline[1],
            doc! { "$match": { "_ref": { "$size": 0 } } }
        );
    }

    #[test]
    fn test_parse_facet() {
        let rule = integrity_checks()[1].rules[0];
        let oid = ObjectId::new();
        let facet = doc! {
            "total": [{ "n": 2 }],
            "samples": [
                { "key": oid, "value": "S404" },
                { "key": "other", "value": "S405" }
            ]
        };

        let (total, samples) = parse_orphan_facet(&rule, &facet);
        assert_eq!(total, 2);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].collection, "enrollments");
        assert_eq!(samples[0].field, "studentId");
        assert_eq!(samples[0].missing_value, "S404");
    }

    #[test]
    fn test_parse_empty_facet() {
        let rule = integrity_checks()[0].rules[0];
        let facet = doc! { "total": [], "samples": [] };
        assert_eq!(parse_orphan_facet(&rule, &facet), (0, vec![]));
    }
}
