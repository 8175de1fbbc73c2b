//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::book::Book;
use super::member::Member;

/// Loan with its book and member fully attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub book: Book,
    pub member: Member,
    pub loan_date: NaiveDate,
    /// `None` while the book is still out
    pub return_date: Option<NaiveDate>,
}

/// Loan as written to storage: associations reduced to their ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanRecord {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Flat loan view with bare ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Create / replace / update loan request.
///
/// Every field is optional on the wire; the loans service decides which ones
/// are required for a given operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoanRequest {
    pub book_id: Option<i64>,
    pub member_id: Option<i64>,
    pub loan_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn record(&self) -> LoanRecord {
        LoanRecord {
            id: self.id,
            book_id: self.book.id,
            member_id: self.member.id,
            loan_date: self.loan_date,
            return_date: self.return_date,
        }
    }
}

impl From<&Loan> for LoanSummary {
    fn from(loan: &Loan) -> Self {
        Self {
            id: loan.id,
            book_id: loan.book.id,
            member_id: loan.member.id,
            loan_date: loan.loan_date,
            return_date: loan.return_date,
        }
    }
}

impl LoanRequest {
    /// Fill omitted fields from the stored loan
    pub fn merged_onto(self, existing: &Loan) -> LoanRequest {
        LoanRequest {
            book_id: self.book_id.or(Some(existing.book.id)),
            member_id: self.member_id.or(Some(existing.member.id)),
            loan_date: self.loan_date.or(Some(existing.loan_date)),
            return_date: self.return_date.or(existing.return_date),
        }
    }
}
