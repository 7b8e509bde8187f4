/*!
 * Simulation Driver
 * Cancellable background task advancing the engine at a fixed cadence
 *
 * One driver per engine instance: a second start while one is active is
 * rejected, not queued. The driver is the only component that sleeps; the
 * engine itself never blocks on time.
 *
 * Shutdown follows a graceful-with-fallback pattern: `stop().await` is the
 * preferred path, `detach()` lets the run finish on its own, and `Drop`
 * aborts a still-live task with a warning so a forgotten handle can never
 * leave a loop running.
 */

use super::Scheduler;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::DEFAULT_CADENCE_MS;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Delay between ticks
    pub cadence: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            cadence: Duration::from_millis(DEFAULT_CADENCE_MS),
        }
    }
}

/// Handle to a running auto-run task
#[derive(Debug)]
pub struct SimulationDriver {
    cancel: Arc<AtomicBool>,
    // engine's auto-run flag; cleared here if the task is aborted
    active: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
    shutdown_initiated: bool,
}

impl SimulationDriver {
    /// Spawn the auto-run loop for `scheduler`. Fails with `AutoRunActive`
    /// if a driver is already running for this engine; the existing run
    /// continues unaffected.
    pub fn spawn(scheduler: Scheduler, config: DriverConfig) -> SchedulerResult<Self> {
        let active = scheduler.auto_run_flag();
        active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SchedulerError::AutoRunActive)?;

        let cancel = Arc::new(AtomicBool::new(false));
        let handle = {
            let cancel = Arc::clone(&cancel);
            let active = Arc::clone(&active);
            tokio::spawn(async move {
                run_loop(scheduler, config, cancel).await;
                active.store(false, Ordering::Release);
            })
        };

        Ok(Self {
            cancel,
            active,
            handle: Some(handle),
            shutdown_initiated: false,
        })
    }

    /// Request cooperative cancellation and wait for the task to exit.
    /// The driver finishes its current cadence interval but never applies
    /// a partial tick.
    pub async fn stop(mut self) {
        self.shutdown_initiated = true;
        self.cancel.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("simulation driver shutdown error: {}", e);
            } else {
                info!("simulation driver stopped");
            }
        }
    }

    /// Wait for the run to end on its own (all processes terminated).
    pub async fn join(mut self) {
        self.shutdown_initiated = true;
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("simulation driver join error: {}", e);
            }
        }
    }

    /// Release the handle and let the run continue to completion.
    pub fn detach(mut self) {
        self.shutdown_initiated = true;
        self.handle.take();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        if self.shutdown_initiated {
            return;
        }
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                warn!("SimulationDriver dropped without stop(), aborting auto-run task");
                handle.abort();
                self.active.store(false, Ordering::Release);
            }
        }
    }
}

async fn run_loop(scheduler: Scheduler, config: DriverConfig, cancel: Arc<AtomicBool>) {
    info!("auto-run started: cadence={:?}", config.cadence);
    let mut interval = tokio::time::interval(config.cadence);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        // cancellation is checked once per cadence interval
        if cancel.load(Ordering::Acquire) {
            info!("auto-run cancelled at tick {}", scheduler.system_time());
            break;
        }
        if scheduler.all_terminated() {
            info!(
                "auto-run complete: all {} processes terminated at tick {}",
                scheduler.process_count(),
                scheduler.system_time()
            );
            break;
        }
        scheduler.step();
    }
}
