/*!
 * Simulator Limits
 * Default capacity bounds for the process table and ready queue
 */

/// Maximum number of processes the table accepts
pub const MAX_PROCESSES: usize = 20;

/// Maximum number of entries the ready queue holds
pub const QUEUE_CAPACITY: usize = 50;

/// Default round-robin time quantum (ticks)
pub const DEFAULT_QUANTUM: u32 = 2;

/// Default auto-run cadence in milliseconds
pub const DEFAULT_CADENCE_MS: u64 = 1000;
