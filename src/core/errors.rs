/*!
 * Error Types
 * Centralized error handling with thiserror and serde support
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler errors with serialization support
///
/// Every variant is a rejected request: the engine is left in the exact
/// state it was in before the call. An empty dispatch (no process ready to
/// run) is not an error and has no variant here; it is the normal idle tick.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("process table full: capacity {capacity} reached")]
    TableFull { capacity: usize },

    #[error("invalid scheduling policy: {0:?}")]
    InvalidPolicy(String),

    #[error("invalid quantum: {0} (must be a positive 32-bit value)")]
    InvalidQuantum(i64),

    #[error("auto-run already active for this engine")]
    AutoRunActive,
}
