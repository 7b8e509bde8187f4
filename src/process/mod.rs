/*!
 * Process Module
 * Process records and the ready queue
 */

pub mod queue;
pub mod record;

pub use queue::ReadyQueue;
pub use record::{ProcessRecord, ProcessState};
