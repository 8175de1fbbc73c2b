//! Loan lifecycle service
//!
//! The only writer of loan records. Every write resolves the referenced book
//! and member first, so a stored loan always points at entities that existed
//! when it was written. The lookups and the write are separate store calls:
//! a parent deleted in between makes the write fail on the store's foreign
//! key check rather than leave an orphan.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{Loan, LoanRecord, LoanRequest},
    repository::LoanStore,
};

use super::resolver::ReferenceResolver;

/// A `LoanRequest` with every required field present
struct CheckedRequest {
    book_id: i64,
    member_id: i64,
    loan_date: NaiveDate,
    return_date: Option<NaiveDate>,
}

impl CheckedRequest {
    fn from_request(request: &LoanRequest) -> AppResult<Self> {
        let book_id = request
            .book_id
            .ok_or_else(|| AppError::Validation("book_id is required".to_string()))?;
        let member_id = request
            .member_id
            .ok_or_else(|| AppError::Validation("member_id is required".to_string()))?;
        let loan_date = request
            .loan_date
            .ok_or_else(|| AppError::Validation("loan_date is required".to_string()))?;

        if let Some(return_date) = request.return_date {
            if return_date < loan_date {
                return Err(AppError::Validation(format!(
                    "return_date {} is before loan_date {}",
                    return_date, loan_date
                )));
            }
        }

        Ok(Self {
            book_id,
            member_id,
            loan_date,
            return_date: request.return_date,
        })
    }
}

#[derive(Clone)]
pub struct LoansService {
    loans: Arc<dyn LoanStore>,
    resolver: ReferenceResolver,
}

impl LoansService {
    pub fn new(loans: Arc<dyn LoanStore>, resolver: ReferenceResolver) -> Self {
        Self { loans, resolver }
    }

    /// List every loan in store order
    pub async fn list(&self) -> AppResult<Vec<Loan>> {
        tracing::info!("Listing all loans");
        self.loans.get_all().await
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Loan> {
        tracing::info!("Getting loan {}", id);
        self.loans.get_by_id(id).await?.ok_or_else(|| {
            tracing::warn!("Loan not found with id {}", id);
            AppError::loan_not_found(id)
        })
    }

    /// Create a new loan
    pub async fn create(&self, request: LoanRequest) -> AppResult<Loan> {
        tracing::info!("Creating loan: {:?}", request);
        let checked = CheckedRequest::from_request(&request)?;
        self.write(0, checked).await
    }

    /// Replace the loan at `id` with the request. Stored values are discarded,
    /// so every required field must be present.
    pub async fn replace(&self, id: i64, request: LoanRequest) -> AppResult<Loan> {
        tracing::info!("Replacing loan {} with {:?}", id, request);
        self.ensure_exists(id).await?;
        let checked = CheckedRequest::from_request(&request)?;
        self.write(id, checked).await
    }

    /// Partially update the loan at `id`: omitted fields keep their stored value.
    /// The merged loan is then resolved and written like a replace.
    pub async fn update(&self, id: i64, request: LoanRequest) -> AppResult<Loan> {
        tracing::info!("Updating loan {} with {:?}", id, request);
        let existing = self.get_by_id(id).await?;
        let checked = CheckedRequest::from_request(&request.merged_onto(&existing))?;
        self.write(id, checked).await
    }

    /// Delete a loan. Books and members are never touched.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        tracing::info!("Deleting loan {}", id);
        self.ensure_exists(id).await?;
        self.loans.delete_by_id(id).await
    }

    async fn ensure_exists(&self, id: i64) -> AppResult<()> {
        if !self.loans.exists_by_id(id).await? {
            tracing::warn!("Loan not found with id {}", id);
            return Err(AppError::loan_not_found(id));
        }
        Ok(())
    }

    async fn write(&self, id: i64, request: CheckedRequest) -> AppResult<Loan> {
        let (book, member) = self
            .resolver
            .resolve(request.book_id, request.member_id)
            .await?;

        let loan = Loan {
            id,
            book,
            member,
            loan_date: request.loan_date,
            return_date: request.return_date,
        };
        let record: LoanRecord = loan.record();
        let stored = self.loans.put(&record).await?;

        tracing::debug!("Stored loan {}", stored.id);
        Ok(stored)
    }
}
