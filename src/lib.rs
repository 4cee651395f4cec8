//! taxcn - monthly income-tax and take-home-pay projection
//!
//! This library provides:
//! - The persisted user profile (salary, bonus, insurance, special deductions)
//! - Cumulative (year-to-date) withholding over a progressive bracket schedule
//! - A plain-text month-by-month report

pub mod profile;
pub mod projection;
pub mod report;

// Re-export commonly used types
pub use profile::{Profile, ProfileError, ProfileStore, JsonFileStore};
pub use projection::{ProjectionEngine, ProjectionResult, ProjectionRow, BracketSchedule};
