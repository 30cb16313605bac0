//! Per-task timing statistics.
//!
//! # Definitions
//!
//! | Field | Definition |
//! |-------|-----------|
//! | Start | `tstart` of the first visible `RAN` slot |
//! | Completion | `task.exited` |
//! | Waiting | count of visible `RUNNABLE` slots × `timer` |
//! | Turnaround | `completion - arrival` |
//!
//! "Visible" means the slot starts before the horizon (`runfor`), the
//! same filter the diagram applies.

use serde::Serialize;

use super::events::{decode_events, SleepWakeups};
use crate::models::{Schedule, SlotEvent, Task};

/// One summary row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummaryData {
    /// 1-based row number, in plan order.
    pub row: usize,
    /// Task name.
    pub name: String,
    /// Arrival time.
    pub arrival: f64,
    /// Demand metric (computation, or final VRT under CFS).
    pub computation: Option<f64>,
    /// First time the task ran.
    pub start: Option<f64>,
    /// Exit time.
    pub completion: Option<f64>,
    /// Time spent runnable but not running.
    pub waiting: Option<f64>,
    /// `completion - arrival`.
    pub turnaround: Option<f64>,
    /// Decoded sleep marks (run time at which each sleep begins).
    pub sleeps: Vec<f64>,
    /// Decoded wakeup offsets (relative to the preceding sleep).
    pub wakeups: Vec<f64>,
}

impl TaskSummaryData {
    /// Builds a row from static task data only.
    ///
    /// The demand metric is the last entry of `events` when present,
    /// otherwise `task.computation`. Dynamic fields are absent.
    pub fn from_task(row: usize, task: &Task) -> Self {
        let computation = task
            .events
            .as_ref()
            .and_then(|e| e.last().copied())
            .or(task.computation);
        Self::with_static(row, task, computation)
    }

    /// Builds a row from a simulated schedule.
    pub fn from_schedule(row: usize, task: &Task, schedule: &Schedule) -> Self {
        let computation = task
            .computation
            .or_else(|| task.events.as_ref().and_then(|e| e.last().copied()));

        let start = schedule.first_run(task.index);
        let completion = task.exited;
        let runnable = schedule.count_events(task.index, SlotEvent::Runnable);
        let waiting = runnable as f64 * schedule.plan.timer;
        let turnaround = completion.map(|c| c - task.arrival);

        Self {
            start,
            completion,
            waiting: Some(waiting),
            turnaround,
            ..Self::with_static(row, task, computation)
        }
    }

    /// Clears every dynamic field, keeping static ones.
    pub fn blanked(self) -> Self {
        Self {
            start: None,
            completion: None,
            waiting: None,
            turnaround: None,
            ..self
        }
    }

    /// Whether any dynamic field is present.
    pub fn has_dynamic(&self) -> bool {
        self.start.is_some()
            || self.completion.is_some()
            || self.waiting.is_some()
            || self.turnaround.is_some()
    }

    fn with_static(row: usize, task: &Task, computation: Option<f64>) -> Self {
        let SleepWakeups { sleeps, wakeups } = task
            .events
            .as_deref()
            .map(decode_events)
            .unwrap_or_default();
        Self {
            row,
            name: task.name.clone(),
            arrival: task.arrival,
            computation,
            start: None,
            completion: None,
            waiting: None,
            turnaround: None,
            sleeps,
            wakeups,
        }
    }
}
