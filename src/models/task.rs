//! Task (process/thread) model.
//!
//! A task is one simulated process. Its `index` is the row it occupies in
//! the diagram and the key that timeline slots use to refer to it.

use serde::{Deserialize, Serialize};

/// A simulated task.
///
/// # Events
/// `events`, when present, alternates sleep and wakeup durations starting
/// with a sleep: `[sleep, wakeup, sleep, wakeup, ...]`.
///
/// # Input keys
/// Besides the field names, decoding accepts the simulator's keys:
/// `start` for `arrival`, `vrt` for `computation`, and
/// `legendBelowTask1`/`legendBelowTask2` for the two description lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TaskInput")]
pub struct Task {
    /// Row index, stable for the task's lifetime.
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Time the task becomes eligible.
    pub arrival: f64,
    /// Exit time. `None` = still alive at the horizon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exited: Option<f64>,
    /// Two-line label printed beside the row.
    pub description: Vec<String>,
    /// Policy-specific demand (computation time, or final VRT under CFS).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computation: Option<f64>,
    /// Alternating sleep/wakeup durations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<f64>>,
}

/// Wire shape of a task as the simulator writes it.
#[derive(Deserialize)]
struct TaskInput {
    index: usize,
    name: String,
    #[serde(alias = "start")]
    arrival: f64,
    #[serde(default)]
    exited: Option<f64>,
    #[serde(default)]
    description: Vec<String>,
    #[serde(rename = "legendBelowTask1", default)]
    legend_below_1: Option<String>,
    #[serde(rename = "legendBelowTask2", default)]
    legend_below_2: Option<String>,
    #[serde(default, alias = "vrt")]
    computation: Option<f64>,
    #[serde(default)]
    events: Option<Vec<f64>>,
}

impl From<TaskInput> for Task {
    fn from(input: TaskInput) -> Self {
        // An explicit `description` wins over the per-line keys.
        let description = if input.description.is_empty()
            && (input.legend_below_1.is_some() || input.legend_below_2.is_some())
        {
            vec![
                input.legend_below_1.unwrap_or_default(),
                input.legend_below_2.unwrap_or_default(),
            ]
        } else {
            input.description
        };

        Self {
            index: input.index,
            name: input.name,
            arrival: input.arrival,
            exited: input.exited,
            description,
            computation: input.computation,
            events: input.events,
        }
    }
}

impl Task {
    /// Creates a task arriving at t=0.
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            arrival: 0.0,
            exited: None,
            description: Vec::new(),
            computation: None,
            events: None,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival: f64) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the exit time.
    pub fn with_exit(mut self, exited: f64) -> Self {
        self.exited = Some(exited);
        self
    }

    /// Sets the two description lines.
    pub fn with_description(mut self, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        self.description = vec![line1.into(), line2.into()];
        self
    }

    /// Sets the demand metric.
    pub fn with_computation(mut self, computation: f64) -> Self {
        self.computation = Some(computation);
        self
    }

    /// Sets the sleep/wakeup event list.
    pub fn with_events(mut self, events: Vec<f64>) -> Self {
        self.events = Some(events);
        self
    }

    /// Description line `n` (0-based), empty when missing.
    pub fn description_line(&self, n: usize) -> &str {
        self.description.get(n).map(String::as_str).unwrap_or("")
    }

    /// Whether the task carries a non-empty event list.
    pub fn has_events(&self) -> bool {
        self.events.as_ref().is_some_and(|e| !e.is_empty())
    }
}
