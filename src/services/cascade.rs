//! Loan cascade on book and member deletion
//!
//! Deleting a parent first sweeps the loans that reference it, then removes
//! the parent. The sweep and the parent delete are separate store calls. A
//! loan written for the parent between the two is removed by the store's own
//! cascade (database foreign keys, or the memory store's equivalent).
//!
//! The same store cascade applies in `restrict` mode: the check only sees the
//! loans present when it runs, so a loan written between the check and the
//! parent delete is removed with the parent instead of blocking it.

use std::sync::Arc;

use crate::{
    config::CascadeMode,
    error::{AppError, AppResult, EntityKind},
    models::Loan,
    repository::LoanStore,
};

#[derive(Clone)]
pub struct CascadePolicy {
    loans: Arc<dyn LoanStore>,
    mode: CascadeMode,
}

impl CascadePolicy {
    pub fn new(loans: Arc<dyn LoanStore>, mode: CascadeMode) -> Self {
        Self { loans, mode }
    }

    /// Clear the way for deleting `book_id`. Returns the number of loans removed.
    pub async fn before_book_delete(&self, book_id: i64) -> AppResult<usize> {
        let dependents = self.loans.find_by_book(book_id).await?;
        self.sweep(EntityKind::Book, book_id, dependents).await
    }

    /// Clear the way for deleting `member_id`. Returns the number of loans removed.
    pub async fn before_member_delete(&self, member_id: i64) -> AppResult<usize> {
        let dependents = self.loans.find_by_member(member_id).await?;
        self.sweep(EntityKind::Member, member_id, dependents).await
    }

    async fn sweep(&self, kind: EntityKind, id: i64, dependents: Vec<Loan>) -> AppResult<usize> {
        if dependents.is_empty() {
            return Ok(0);
        }

        match self.mode {
            CascadeMode::Restrict => {
                tracing::warn!(
                    "Refusing to delete {} {}: {} loan(s) still reference it",
                    kind,
                    id,
                    dependents.len()
                );
                Err(AppError::BusinessRule(format!(
                    "{} {} still has {} loan(s)",
                    kind,
                    id,
                    dependents.len()
                )))
            }
            CascadeMode::Cascade => {
                for loan in &dependents {
                    self.loans.delete_by_id(loan.id).await?;
                }
                tracing::info!(
                    "Deleted {} loan(s) referencing {} {}",
                    dependents.len(),
                    kind,
                    id
                );
                Ok(dependents.len())
            }
        }
    }
}
