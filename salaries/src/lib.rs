//! # Salaries - validated employee salary datasets
//!
//! Loads a fixed 12-column salary CSV, validates every row against closed
//! enumerations and the bundled ISO country/currency tables, and answers a
//! small set of report queries over the loaded records.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Dataset   │────▶│   Session   │────▶│   Reports   │
//! │ (12 cols)   │     │ (all/none)  │     │ (owned ctx) │     │ (read-only) │
//! └─────────────┘     └──────┬──────┘     └─────────────┘     └─────────────┘
//!                            │
//!                     ┌──────▼──────┐
//!                     │  Reference  │
//!                     │ (ISO codes) │
//!                     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salaries::{ReferenceData, Session, count_by_residence};
//!
//! let mut session = Session::new(ReferenceData::bundled()?);
//! session.load("ds_salaries.csv")?;
//! for bucket in count_by_residence(session.employees()?) {
//!     println!("{}: {}", bucket.residence, bucket.total);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Employee record and its enumerations
//! - [`reference`] - Country and currency tables
//! - [`parser`] - Row validation
//! - [`dataset`] - File loader and writer
//! - [`report`] - Report queries
//! - [`session`] - Loaded dataset context
//! - [`menu`] - Interactive command loop

// Core modules
pub mod error;
pub mod models;

// Validation
pub mod parser;
pub mod reference;

// Files
pub mod dataset;

// Queries
pub mod report;
pub mod session;

// Interactive surface
pub mod menu;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    DatasetError, DatasetResult, QueryError, QueryResult, ReferenceError, ReferenceResult, RowError,
    SessionError, SessionResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CompanySize, Employee, EmploymentType, ExperienceLevel, RemoteRatio};

// =============================================================================
// Re-exports - Parsing and files
// =============================================================================

pub use dataset::{read_dataset, read_records, write_dataset, write_records};
pub use parser::{is_expected_header, parse_employee, DELIMITER, HEADERS};
pub use reference::ReferenceData;

// =============================================================================
// Re-exports - Reports and session
// =============================================================================

pub use report::{
    count_by_residence, count_living_in_working_elsewhere, filter_by_residence, not_full_time,
    sort_by_residence_then_salary, ResidenceCount, SalaryStats,
};
pub use session::Session;

// =============================================================================
// Re-exports - Menu
// =============================================================================

pub use menu::{Config, Menu};
