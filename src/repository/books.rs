//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

use super::BookStore;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn get_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn put(&self, book: &Book) -> AppResult<Book> {
        if book.id == 0 {
            sqlx::query_as::<_, Book>(
                r#"
                INSERT INTO books (title, author, isbn, publication_date)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.publication_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Book"))
        } else {
            sqlx::query_as::<_, Book>(
                r#"
                UPDATE books SET title = $1, author = $2, isbn = $3, publication_date = $4
                WHERE id = $5
                RETURNING *
                "#,
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.publication_date)
            .bind(book.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Book"))?
            .ok_or_else(|| AppError::book_not_found(book.id))
        }
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }
}
