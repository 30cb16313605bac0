//! Plan (workload + layout) model.
//!
//! A plan is the static half of a simulation: the quantum size, the
//! horizon, the layout scale factors and the tasks being simulated.

use serde::{Deserialize, Serialize};

use super::Task;

/// Policy tag of the completely fair scheduler.
pub const CFS_POLICY: &str = "cfs";

/// Upper bound on the quanta drawn along the time axis.
pub const MAX_QUANTA: usize = 10_000;

/// Static description of a simulated workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Time-quantum size.
    pub timer: f64,
    /// Simulation horizon. Slots starting at or after it are never drawn.
    pub runfor: f64,
    /// Layout scale factors.
    #[serde(default)]
    pub graphics: Graphics,
    /// Simulated tasks, in row order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Scheduling-policy tag.
    #[serde(default)]
    pub class: SchedClass,
}

/// Layout scale factors for the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Graphics {
    /// Horizontal spacing multiplier.
    pub hspace: f64,
    /// Vertical spacing between task rows.
    pub vspace: f64,
    /// Height of a slot bar.
    pub barheight: f64,
}

/// Scheduling-policy descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedClass {
    /// Policy tag, e.g. `"cfs"` or `"rr"`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Default for Graphics {
    fn default() -> Self {
        Self {
            hspace: 1.0,
            vspace: 1.0,
            barheight: 0.5,
        }
    }
}

impl Graphics {
    /// Creates layout factors.
    pub fn new(hspace: f64, vspace: f64, barheight: f64) -> Self {
        Self {
            hspace,
            vspace,
            barheight,
        }
    }
}

impl SchedClass {
    /// Creates a policy descriptor with the given tag.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl Plan {
    /// Creates a plan with default graphics and no tasks.
    pub fn new(timer: f64, runfor: f64) -> Self {
        Self {
            timer,
            runfor,
            graphics: Graphics::default(),
            tasks: Vec::new(),
            class: SchedClass::default(),
        }
    }

    /// Sets the layout scale factors.
    pub fn with_graphics(mut self, graphics: Graphics) -> Self {
        self.graphics = graphics;
        self
    }

    /// Sets the scheduling-policy tag.
    pub fn with_class(mut self, kind: impl Into<String>) -> Self {
        self.class = SchedClass::new(kind);
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Whether the plan runs under the completely fair scheduler.
    ///
    /// Selects the "Final VRT" demand column in summary tables.
    pub fn is_cfs(&self) -> bool {
        self.class.kind == CFS_POLICY
    }

    /// Number of tasks (diagram rows).
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether any task carries a sleep/wakeup event list.
    pub fn has_events(&self) -> bool {
        self.tasks.iter().any(Task::has_events)
    }

    /// The horizon as drawn: `runfor`, or 0 when it is negative or not
    /// finite.
    pub fn horizon(&self) -> f64 {
        if self.runfor.is_finite() && self.runfor > 0.0 {
            self.runfor
        } else {
            0.0
        }
    }

    /// Number of whole quanta inside the horizon, `floor(runfor / timer)`,
    /// capped at [`MAX_QUANTA`].
    ///
    /// Returns 0 for a non-positive or non-finite timer, and for a horizon
    /// that [`horizon`](Self::horizon) drops.
    pub fn quantum_count(&self) -> usize {
        if !self.timer.is_finite() || self.timer <= 0.0 {
            return 0;
        }
        let quanta = (self.horizon() / self.timer).floor();
        if quanta >= MAX_QUANTA as f64 {
            MAX_QUANTA
        } else {
            quanta as usize
        }
    }
}
