//! Entity store contracts, one per entity kind.
//!
//! Each single-record `put` or `delete_by_id` is atomic. Nothing here spans
//! several records; callers that chain lookups and writes accept that another
//! writer may interleave between them.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, Loan, LoanRecord, Member},
};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    async fn get_all(&self) -> AppResult<Vec<Book>>;

    /// Insert when `book.id == 0`, otherwise overwrite the record at `book.id`
    async fn put(&self, book: &Book) -> AppResult<Book>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Member>>;

    async fn get_all(&self) -> AppResult<Vec<Member>>;

    /// Insert when `member.id == 0`, otherwise overwrite the record at `member.id`
    async fn put(&self, member: &Member) -> AppResult<Member>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>>;
}

/// Loan storage. Writes take the id form of the loan, reads always come back
/// with book and member attached.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Loan>>;

    /// All loans in insertion order
    async fn get_all(&self) -> AppResult<Vec<Loan>>;

    /// Insert when `loan.id == 0`, otherwise overwrite; returns the stored loan
    async fn put(&self, loan: &LoanRecord) -> AppResult<Loan>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn find_by_book(&self, book_id: i64) -> AppResult<Vec<Loan>>;

    async fn find_by_member(&self, member_id: i64) -> AppResult<Vec<Loan>>;
}
