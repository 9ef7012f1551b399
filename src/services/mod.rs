pub mod user_service;
pub mod course_service;
pub mod enrollment_service;
pub mod assignment_service;
pub mod analytics_service;
pub mod integrity_service;


use crate::utils::AppError;
use futures::stream::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::results::UpdateResult;
use mongodb::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Counts reported by a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// Turns a zero-match update into `NotFound`.
    pub(crate) fn require_match(result: UpdateResult, what: &str) -> Result<Self, AppError> {
        if result.matched_count == 0 {
            return Err(AppError::NotFound(what.to_string()));
        }
        Ok(Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }
}

/// Hex string for ObjectId ids, the plain value for anything else.
pub(crate) fn inserted_id_string(id: &Bson) -> String {
    bson_to_string(Some(id))
}

pub(crate) fn bson_to_string(value: Option<&Bson>) -> String {
    match value {
        Some(Bson::String(s)) => s.clone(),
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

pub(crate) fn rows_from_documents<T: DeserializeOwned>(
    documents: Vec<Document>,
) -> Result<Vec<T>, AppError> {
    documents
        .into_iter()
        .map(|document| mongodb::bson::from_document(document).map_err(AppError::from))
        .collect()
}

/// Runs a pipeline and maps every output document to `T`.
pub(crate) async fn aggregate_rows<T: DeserializeOwned>(
    collection: &Collection<Document>,
    pipeline: Vec<Document>,
) -> Result<Vec<T>, AppError> {
    let documents: Vec<Document> = collection.aggregate(pipeline).await?.try_collect().await?;
    rows_from_documents(documents)
}
