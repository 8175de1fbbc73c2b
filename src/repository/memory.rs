//! In-memory entity store
//!
//! Keeps all three entity kinds behind one lock so loan reads can join against
//! the current books and members. Ids are handed out sequentially per kind and
//! `BTreeMap` ordering therefore matches insertion order.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Loan, LoanRecord, Member},
};

use super::{BookStore, LoanStore, MemberStore};

#[derive(Default)]
struct State {
    books: BTreeMap<i64, Book>,
    members: BTreeMap<i64, Member>,
    loans: BTreeMap<i64, LoanRecord>,
    next_book_id: i64,
    next_member_id: i64,
    next_loan_id: i64,
}

impl State {
    fn materialize(&self, record: &LoanRecord) -> AppResult<Loan> {
        let book = self.books.get(&record.book_id).ok_or_else(|| {
            AppError::Internal(format!("Loan {} references missing book {}", record.id, record.book_id))
        })?;
        let member = self.members.get(&record.member_id).ok_or_else(|| {
            AppError::Internal(format!(
                "Loan {} references missing member {}",
                record.id, record.member_id
            ))
        })?;
        Ok(Loan {
            id: record.id,
            book: book.clone(),
            member: member.clone(),
            loan_date: record.loan_date,
            return_date: record.return_date,
        })
    }

    fn loans_matching(&self, pred: impl Fn(&LoanRecord) -> bool) -> AppResult<Vec<Loan>> {
        self.loans
            .values()
            .filter(|record| pred(record))
            .map(|record| self.materialize(record))
            .collect()
    }

    fn unique_violation<T>(what: &str) -> AppResult<T> {
        Err(AppError::Conflict(format!("{} already exists", what)))
    }
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("Memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.lock()?.books.get(&id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.lock()?.books.values().cloned().collect())
    }

    async fn put(&self, book: &Book) -> AppResult<Book> {
        let mut state = self.lock()?;
        // Same constraint the database schema declares
        if state.books.values().any(|b| b.isbn == book.isbn && b.id != book.id) {
            return State::unique_violation("Book");
        }

        let mut stored = book.clone();
        if stored.id == 0 {
            state.next_book_id += 1;
            stored.id = state.next_book_id;
        } else if !state.books.contains_key(&stored.id) {
            return Err(AppError::book_not_found(stored.id));
        }
        state.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.lock()?.books.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut state = self.lock()?;
        state.books.remove(&id);
        // Mirrors ON DELETE CASCADE
        state.loans.retain(|_, loan| loan.book_id != id);
        Ok(())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self.lock()?.books.values().find(|b| b.isbn == isbn).cloned())
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        Ok(self.lock()?.members.get(&id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Member>> {
        Ok(self.lock()?.members.values().cloned().collect())
    }

    async fn put(&self, member: &Member) -> AppResult<Member> {
        let mut state = self.lock()?;
        if state.members.values().any(|m| m.email == member.email && m.id != member.id) {
            return State::unique_violation("Member");
        }

        let mut stored = member.clone();
        if stored.id == 0 {
            state.next_member_id += 1;
            stored.id = state.next_member_id;
        } else if !state.members.contains_key(&stored.id) {
            return Err(AppError::member_not_found(stored.id));
        }
        state.members.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.lock()?.members.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut state = self.lock()?;
        state.members.remove(&id);
        state.loans.retain(|_, loan| loan.member_id != id);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        Ok(self.lock()?.members.values().find(|m| m.email == email).cloned())
    }
}

#[async_trait]
impl LoanStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Loan>> {
        let state = self.lock()?;
        state.loans.get(&id).map(|record| state.materialize(record)).transpose()
    }

    async fn get_all(&self) -> AppResult<Vec<Loan>> {
        self.lock()?.loans_matching(|_| true)
    }

    async fn put(&self, loan: &LoanRecord) -> AppResult<Loan> {
        let mut state = self.lock()?;
        // Foreign keys
        if !state.books.contains_key(&loan.book_id) || !state.members.contains_key(&loan.member_id) {
            return Err(AppError::Conflict("Loan references a deleted record".to_string()));
        }

        let mut stored = *loan;
        if stored.id == 0 {
            state.next_loan_id += 1;
            stored.id = state.next_loan_id;
        } else if !state.loans.contains_key(&stored.id) {
            return Err(AppError::loan_not_found(stored.id));
        }
        state.loans.insert(stored.id, stored);
        state.materialize(&stored)
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.lock()?.loans.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.lock()?.loans.remove(&id);
        Ok(())
    }

    async fn find_by_book(&self, book_id: i64) -> AppResult<Vec<Loan>> {
        self.lock()?.loans_matching(|loan| loan.book_id == book_id)
    }

    async fn find_by_member(&self, member_id: i64) -> AppResult<Vec<Loan>> {
        self.lock()?.loans_matching(|loan| loan.member_id == member_id)
    }
}
