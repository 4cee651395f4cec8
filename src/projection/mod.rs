//! Monthly tax projection

mod brackets;
mod state;
mod engine;
mod rows;

pub use brackets::{BracketSchedule, TaxBracket, ScheduleError};
pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionRows};
pub use rows::{ProjectionRow, ProjectionResult, ProjectionSummary};
