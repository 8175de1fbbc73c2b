//! Business logic services

pub mod books;
pub mod cascade;
pub mod loans;
pub mod members;
pub mod resolver;

use crate::{config::LoansConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub members: members::MembersService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository, loans_config: &LoansConfig) -> Self {
        let cascade =
            cascade::CascadePolicy::new(repository.loans.clone(), loans_config.on_parent_delete);
        let resolver =
            resolver::ReferenceResolver::new(repository.books.clone(), repository.members.clone());

        Self {
            books: books::BooksService::new(repository.books.clone(), cascade.clone()),
            members: members::MembersService::new(repository.members.clone(), cascade),
            loans: loans::LoansService::new(repository.loans, resolver),
        }
    }

    /// Counts of books, members, loans and loans not yet returned
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        let loans = self.loans.list().await?;
        Ok(CatalogSummary {
            books: self.books.list().await?.len(),
            members: self.members.list().await?.len(),
            open_loans: loans.iter().filter(|loan| loan.is_open()).count(),
            loans: loans.len(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CatalogSummary {
    pub books: usize,
    pub members: usize,
    pub loans: usize,
    pub open_loans: usize,
}
