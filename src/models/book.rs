//! Book model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// Store-assigned; `0` until first written
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Unique across all books
    pub isbn: String,
    pub publication_date: Option<NaiveDate>,
}

/// Create / replace book request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    pub publication_date: Option<NaiveDate>,
}

/// Partial book update; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<NaiveDate>,
}

impl Book {
    pub fn from_request(id: i64, request: BookRequest) -> Self {
        Self {
            id,
            title: request.title,
            author: request.author,
            isbn: request.isbn,
            publication_date: request.publication_date,
        }
    }

    /// Overlay a patch on the stored book, producing a full request
    pub fn merged_with(&self, patch: BookPatch) -> BookRequest {
        BookRequest {
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            author: patch.author.unwrap_or_else(|| self.author.clone()),
            isbn: patch.isbn.unwrap_or_else(|| self.isbn.clone()),
            publication_date: patch.publication_date.or(self.publication_date),
        }
    }
}
