/*!
 * Transport Requests
 * Semantic request shapes accepted from operator and transport collaborators
 *
 * Encoded as tagged `type`/`data` JSON objects. Unknown request types or
 * malformed payloads fail deserialization and are rejected before any
 * engine state is touched.
 */

use super::driver::{DriverConfig, SimulationDriver};
use super::Scheduler;
use crate::core::errors::SchedulerResult;
use crate::core::limits::DEFAULT_CADENCE_MS;
use crate::core::types::{Priority, Tick};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_cadence_ms() -> u64 {
    DEFAULT_CADENCE_MS
}

/// One mutation request against the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Request {
    CreateProcess {
        name: String,
        priority: Priority,
        burst_time: u32,
        arrival_time: Tick,
    },
    SetPolicy {
        policy: String,
    },
    SetQuantum {
        quantum: i64,
    },
    Reset,
    Step,
    StartAutoRun {
        #[serde(default = "default_cadence_ms")]
        cadence_ms: u64,
    },
}

impl Request {
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

impl Scheduler {
    /// Route one request to the matching engine operation. Rejected
    /// requests leave the engine exactly as it was.
    ///
    /// `StartAutoRun` spawns a detached driver task and must be called
    /// from within a tokio runtime.
    pub fn apply(&self, request: Request) -> SchedulerResult<()> {
        match request {
            Request::CreateProcess {
                name,
                priority,
                burst_time,
                arrival_time,
            } => {
                self.create_process(name, priority, burst_time, arrival_time)?;
                Ok(())
            }
            Request::SetPolicy { policy } => self.set_policy_name(&policy),
            Request::SetQuantum { quantum } => self.set_quantum(quantum),
            Request::Reset => {
                self.reset();
                Ok(())
            }
            Request::Step => {
                self.step();
                Ok(())
            }
            Request::StartAutoRun { cadence_ms } => {
                let config = DriverConfig {
                    cadence: Duration::from_millis(cadence_ms),
                };
                SimulationDriver::spawn(self.clone(), config)?.detach();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SchedulerError;
    use crate::scheduler::SchedulingPolicy;

    #[test]
    fn test_requests_parse_from_wire_json() {
        let req = Request::from_json(
            r#"{"type":"create_process","data":{"name":"A","priority":5,"burst_time":8,"arrival_time":0}}"#,
        )
        .unwrap();
        assert!(matches!(req, Request::CreateProcess { .. }));

        let req = Request::from_json(r#"{"type":"step"}"#).unwrap();
        assert!(matches!(req, Request::Step));

        let req = Request::from_json(r#"{"type":"start_auto_run","data":{}}"#).unwrap();
        assert!(matches!(
            req,
            Request::StartAutoRun { cadence_ms } if cadence_ms == DEFAULT_CADENCE_MS
        ));
    }

    #[test]
    fn test_unknown_request_type_rejected_at_parse() {
        assert!(Request::from_json(r#"{"type":"terminate_process","data":{"pid":1}}"#).is_err());
        assert!(Request::from_json(r#"{"type":"set_quantum","data":{"quantum":"two"}}"#).is_err());
    }

    #[test]
    fn test_apply_routes_and_validates() {
        let engine = Scheduler::default();
        engine
            .apply(Request::SetPolicy {
                policy: "SJF".into(),
            })
            .unwrap();
        assert_eq!(engine.policy(), SchedulingPolicy::Sjf);

        let err = engine
            .apply(Request::SetQuantum { quantum: -1 })
            .unwrap_err();
        assert_eq!(err, SchedulerError::InvalidQuantum(-1));

        engine.apply(Request::Step).unwrap();
        assert_eq!(engine.system_time(), 1);
    }
}
