//! Repository layer for entity storage

pub mod books;
pub mod loans;
pub mod members;
pub mod memory;
pub mod store;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use store::{BookStore, LoanStore, MemberStore};

/// Main repository struct holding one store per entity kind
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub members: Arc<dyn MemberStore>,
    pub loans: Arc<dyn LoanStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            members: Arc::new(members::MembersRepository::new(pool.clone())),
            loans: Arc::new(loans::LoansRepository::new(pool)),
        }
    }

    /// Create a repository whose three stores share one in-memory state
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::new();
        Self {
            books: Arc::new(store.clone()),
            members: Arc::new(store.clone()),
            loans: Arc::new(store),
        }
    }

    /// Create a repository from explicit store implementations
    pub fn from_stores(
        books: Arc<dyn BookStore>,
        members: Arc<dyn MemberStore>,
        loans: Arc<dyn LoanStore>,
    ) -> Self {
        Self { books, members, loans }
    }
}
