/*!
 * Core Types
 * Shared primitive aliases used across the simulator
 */

/// Process identifier, assigned sequentially starting at 1
pub type Pid = u32;

/// Scheduling priority (higher value = more urgent)
pub type Priority = u8;

/// One discrete unit of simulated time
pub type Tick = u64;
