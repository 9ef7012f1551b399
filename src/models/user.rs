use crate::utils::AppError;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document of the `users` collection, identified by `userId`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    // A document without the flag is treated as inactive
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_id: String,
    pub email: String,
    pub role: Option<Role>,
    pub first_name: String,
    pub last_name: String,
    pub is_active: Option<bool>,
}

impl CreateUserRequest {
    /// Validates the request and builds the user document. `role` overrides
    /// whatever the request carried.
    pub fn into_user(self, role: Option<Role>) -> Result<User, AppError> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::InvalidRequest("userId is required".into()));
        }
        validate_email(&self.email)?;

        Ok(User {
            user_id: self.user_id,
            email: self.email,
            role: role.or(self.role).unwrap_or(Role::Student),
            first_name: self.first_name,
            last_name: self.last_name,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Partial profile update. Only the fields present are written; `userId`
/// cannot be changed.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub role: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn soft_delete() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }

    /// Body of the `$set` stage.
    pub fn to_set_document(&self) -> Result<Document, AppError> {
        let mut set = Document::new();

        if let Some(email) = &self.email {
            validate_email(email)?;
            set.insert("email", email.as_str());
        }
        if let Some(role) = self.role {
            set.insert("role", role.as_str());
        }
        if let Some(first_name) = &self.first_name {
            set.insert("firstName", first_name.as_str());
        }
        if let Some(last_name) = &self.last_name {
            set.insert("lastName", last_name.as_str());
        }
        if let Some(is_active) = self.is_active {
            set.insert("isActive", is_active);
        }

        if set.is_empty() {
            return Err(AppError::InvalidRequest("No fields to update".into()));
        }
        Ok(set)
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::InvalidRequest(format!("Invalid email: {}", email))),
    }
}
