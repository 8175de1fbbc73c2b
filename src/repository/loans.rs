//! Loans repository for database operations

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{Book, Loan, LoanRecord, Member},
};

use super::LoanStore;

/// Loan columns joined with the book and member they reference
const LOAN_SELECT: &str = r#"
    SELECT l.id, l.loan_date, l.return_date,
           b.id AS book_id, b.title, b.author, b.isbn, b.publication_date,
           m.id AS member_id, m.name, m.email, m.phone, m.registration_date
    FROM loans l
    JOIN books b ON l.book_id = b.id
    JOIN members m ON l.member_id = m.id
"#;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, clause: &str, id: i64) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query(&format!("{} WHERE {} ORDER BY l.id", LOAN_SELECT, clause))
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(loan_from_row).collect())
    }
}

fn loan_from_row(row: &PgRow) -> Loan {
    Loan {
        id: row.get("id"),
        book: Book {
            id: row.get("book_id"),
            title: row.get("title"),
            author: row.get("author"),
            isbn: row.get("isbn"),
            publication_date: row.get("publication_date"),
        },
        member: Member {
            id: row.get("member_id"),
            name: row.get("name"),
            email: row.get("email"),
            phone: row.get("phone"),
            registration_date: row.get("registration_date"),
        },
        loan_date: row.get("loan_date"),
        return_date: row.get("return_date"),
    }
}

#[async_trait]
impl LoanStore for LoansRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Loan>> {
        let row = sqlx::query(&format!("{} WHERE l.id = $1", LOAN_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(loan_from_row))
    }

    async fn get_all(&self) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query(&format!("{} ORDER BY l.id", LOAN_SELECT))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(loan_from_row).collect())
    }

    async fn put(&self, loan: &LoanRecord) -> AppResult<Loan> {
        let loan_id = if loan.id == 0 {
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO loans (book_id, member_id, loan_date, return_date)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(loan.book_id)
            .bind(loan.member_id)
            .bind(loan.loan_date)
            .bind(loan.return_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Loan"))?
        } else {
            sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE loans SET book_id = $1, member_id = $2, loan_date = $3, return_date = $4
                WHERE id = $5
                RETURNING id
                "#,
            )
            .bind(loan.book_id)
            .bind(loan.member_id)
            .bind(loan.loan_date)
            .bind(loan.return_date)
            .bind(loan.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Loan"))?
            .ok_or_else(|| AppError::loan_not_found(loan.id))?
        };

        // A parent deleted after the write cascades the row away with it
        self.get_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::loan_not_found(loan_id))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_book(&self, book_id: i64) -> AppResult<Vec<Loan>> {
        self.fetch_where("l.book_id = $1", book_id).await
    }

    async fn find_by_member(&self, member_id: i64) -> AppResult<Vec<Loan>> {
        self.fetch_where("l.member_id = $1", member_id).await
    }
}
