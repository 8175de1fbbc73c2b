//! Lending catalog core
//!
//! Books, members and the loans that link them. Loans are written only
//! through [`services::loans::LoansService`], which resolves both references
//! before every write; deleting a book or member sweeps its loans first.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, EntityKind};
pub use repository::Repository;
pub use services::Services;
