/*!
 * Core Module
 * Shared types, limits, and error definitions
 */

pub mod errors;
pub mod limits;
pub mod types;

pub use errors::{SchedulerError, SchedulerResult};
pub use types::{Pid, Priority, Tick};
