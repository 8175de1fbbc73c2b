//! Member model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Member (borrower) record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: i64,
    pub name: String,
    /// Unique across all members
    pub email: String,
    pub phone: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

/// Create / replace member request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MemberRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

/// Partial member update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

impl Member {
    pub fn from_request(id: i64, request: MemberRequest) -> Self {
        Self {
            id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            registration_date: request.registration_date,
        }
    }

    pub fn merged_with(&self, patch: MemberPatch) -> MemberRequest {
        MemberRequest {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            email: patch.email.unwrap_or_else(|| self.email.clone()),
            phone: patch.phone.or_else(|| self.phone.clone()),
            registration_date: patch.registration_date.or(self.registration_date),
        }
    }
}
