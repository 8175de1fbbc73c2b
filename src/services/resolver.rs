//! Book/member reference resolution for loans

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Member},
    repository::{BookStore, MemberStore},
};

/// Turns a (book id, member id) pair into the entities they name
#[derive(Clone)]
pub struct ReferenceResolver {
    books: Arc<dyn BookStore>,
    members: Arc<dyn MemberStore>,
}

impl ReferenceResolver {
    pub fn new(books: Arc<dyn BookStore>, members: Arc<dyn MemberStore>) -> Self {
        Self { books, members }
    }

    /// Fetch both entities. The book is looked up first and a missing book
    /// fails before the member store is touched.
    pub async fn resolve(&self, book_id: i64, member_id: i64) -> AppResult<(Book, Member)> {
        let book = self.books.get_by_id(book_id).await?.ok_or_else(|| {
            tracing::warn!("Book not found with id {}", book_id);
            AppError::book_not_found(book_id)
        })?;

        let member = self.members.get_by_id(member_id).await?.ok_or_else(|| {
            tracing::warn!("Member not found with id {}", member_id);
            AppError::member_not_found(member_id)
        })?;

        Ok((book, member))
    }
}
