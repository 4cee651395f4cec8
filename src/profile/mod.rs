//! Profile data structures and persistence

mod data;
mod error;
pub mod store;

pub use data::{Profile, Insurance, SpecialDeduction};
pub use error::ProfileError;
pub use store::{ProfileStore, JsonFileStore, load_or_init};
