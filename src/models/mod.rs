//! Data models for the lending catalog

pub mod book;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, BookPatch, BookRequest};
pub use loan::{Loan, LoanRecord, LoanRequest, LoanSummary};
pub use member::{Member, MemberPatch, MemberRequest};
