//! Cases Domain
//!
//! Case and hearing records for a small legal practice: CRUD with
//! case-number uniqueness, derived fee balances, hearing-driven status
//! write-back, and the dashboard queries (stats, search, upcoming hearings).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Validation, fee recalc, status write-back
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Case, Hearing, DTOs
//! └─────────────┘
//! ```
//!
//! The web layer and the concrete storage engine sit outside this crate; the
//! repository trait is the seam for both.

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CaseError, CaseResult};
pub use models::{
    Case, CaseFilter, CaseStats, CreateCase, CreateHearing, Hearing, UpdateCase, UpdateHearing,
    CLOSED_STATUS,
};
pub use repository::{CaseRepository, InMemoryCaseRepository};
pub use service::CaseService;
