//! Book management service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPatch, BookRequest},
    repository::BookStore,
};

use super::cascade::CascadePolicy;

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookStore>,
    cascade: CascadePolicy,
}

impl BooksService {
    pub fn new(books: Arc<dyn BookStore>, cascade: CascadePolicy) -> Self {
        Self { books, cascade }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        tracing::info!("Listing all books");
        self.books.get_all().await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.books.get_by_id(id).await?.ok_or_else(|| {
            tracing::warn!("Book not found with id {}", id);
            AppError::book_not_found(id)
        })
    }

    /// Create a book, rejecting an ISBN already in the catalog
    pub async fn create(&self, request: BookRequest) -> AppResult<Book> {
        tracing::info!("Creating book: {:?}", request);
        request.validate()?;
        self.ensure_isbn_free(&request.isbn, None).await?;
        self.books.put(&Book::from_request(0, request)).await
    }

    /// Replace every field of the book at `id`
    pub async fn replace(&self, id: i64, request: BookRequest) -> AppResult<Book> {
        tracing::info!("Replacing book {} with {:?}", id, request);
        if !self.books.exists_by_id(id).await? {
            tracing::warn!("Book not found with id {}", id);
            return Err(AppError::book_not_found(id));
        }
        request.validate()?;
        self.ensure_isbn_free(&request.isbn, Some(id)).await?;
        self.books.put(&Book::from_request(id, request)).await
    }

    /// Update only the fields present in `patch`
    pub async fn update(&self, id: i64, patch: BookPatch) -> AppResult<Book> {
        tracing::info!("Updating book {} with {:?}", id, patch);
        let existing = self.get_by_id(id).await?;
        let request = existing.merged_with(patch);
        request.validate()?;
        self.ensure_isbn_free(&request.isbn, Some(id)).await?;
        self.books.put(&Book::from_request(id, request)).await
    }

    /// Delete a book together with the loans that reference it
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        tracing::info!("Deleting book {}", id);
        if !self.books.exists_by_id(id).await? {
            tracing::warn!("Book not found with id {}", id);
            return Err(AppError::book_not_found(id));
        }
        self.cascade.before_book_delete(id).await?;
        self.books.delete_by_id(id).await
    }

    async fn ensure_isbn_free(&self, isbn: &str, own_id: Option<i64>) -> AppResult<()> {
        if let Some(existing) = self.books.find_by_isbn(isbn).await? {
            if Some(existing.id) != own_id {
                tracing::warn!("ISBN {} already used by book {}", isbn, existing.id);
                return Err(AppError::Conflict(format!(
                    "A book with ISBN {} already exists (id={})",
                    isbn, existing.id
                )));
            }
        }
        Ok(())
    }
}
