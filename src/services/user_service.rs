// ==================== USERS ====================
// Inserts, profile updates and soft deletes on the `users` collection

use crate::{
    database::{MongoDB, USERS},
    models::{CreateUserRequest, Role, UpdateUserRequest, User},
    services::{inserted_id_string, UpdateOutcome},
    utils::AppError,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};

pub fn active_students_filter() -> Document {
    doc! { "role": Role::Student.as_str(), "isActive": true }
}

pub fn user_filter(user_id: &str) -> Document {
    doc! { "userId": user_id }
}

/// Inserts a user of any role. Returns the inserted `_id` as hex.
pub async fn create_user(db: &MongoDB, request: CreateUserRequest) -> Result<String, AppError> {
    let user = request.into_user(None)?;
    insert_user(db, user).await
}

/// Inserts a user with `role` forced to `student`.
pub async fn create_student(db: &MongoDB, request: CreateUserRequest) -> Result<String, AppError> {
    let user = request.into_user(Some(Role::Student))?;
    insert_user(db, user).await
}

async fn insert_user(db: &MongoDB, user: User) -> Result<String, AppError> {
    log::info!("📝 Creating {} {}", user.role, user.user_id);

    let result = db.collection::<User>(USERS).insert_one(&user).await?;
    Ok(inserted_id_string(&result.inserted_id))
}

pub async fn find_active_students(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let students: Vec<User> = db
        .collection::<User>(USERS)
        .find(active_students_filter())
        .await?
        .try_collect()
        .await?;

    log::debug!("📋 Found {} active students", students.len());
    Ok(students)
}

pub async fn get_user(db: &MongoDB, user_id: &str) -> Result<User, AppError> {
    db.collection::<User>(USERS)
        .find_one(user_filter(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
}

/// `$set` of the supplied fields on the user matched by `userId`.
pub async fn update_user_profile(
    db: &MongoDB,
    user_id: &str,
    updates: &UpdateUserRequest,
) -> Result<UpdateOutcome, AppError> {
    let set = updates.to_set_document()?;

    let result = db
        .documents(USERS)
        .update_one(user_filter(user_id), doc! { "$set": set })
        .await?;

    UpdateOutcome::require_match(result, &format!("user {}", user_id))
}

/// Marks the user inactive; the document is kept.
pub async fn soft_delete_user(db: &MongoDB, user_id: &str) -> Result<UpdateOutcome, AppError> {
    log::info!("🗑️  Soft deleting user {}", user_id);
    update_user_profile(db, user_id, &UpdateUserRequest::soft_delete()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_students_filter() {
        assert_eq!(
            active_students_filter(),
            doc! { "role": "student", "isActive": true }
        );
    }
}
