//! Schedule (simulation result) model.
//!
//! A schedule pairs the plan with the timeline the simulator produced,
//! plus the caption and pre-rendered data markup that travel with it.

use serde::{Deserialize, Serialize};

use super::{Plan, SlotEvent, TaskSlot};
use crate::error::RenderError;

/// A simulated schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Static workload and layout.
    #[serde(alias = "schedule")]
    pub plan: Plan,
    /// Slots in simulator order.
    #[serde(default)]
    pub timeline: Vec<TaskSlot>,
    /// Caption and pre-rendered data markup.
    #[serde(default)]
    pub scheddata: SchedData,
}

/// Text that accompanies a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedData {
    /// Caption printed above the diagram.
    #[serde(rename = "legendAbove", default)]
    pub legend_above: String,
    /// Pre-rendered data-only markup, passed through verbatim on export.
    #[serde(rename = "blankData", default)]
    pub blank_data: String,
}

impl SchedData {
    /// Creates schedule text.
    pub fn new(legend_above: impl Into<String>, blank_data: impl Into<String>) -> Self {
        Self {
            legend_above: legend_above.into(),
            blank_data: blank_data.into(),
        }
    }
}

impl Schedule {
    /// Creates a schedule with an empty timeline.
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            timeline: Vec::new(),
            scheddata: SchedData::default(),
        }
    }

    /// Parses a schedule from the simulator's JSON output.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends a slot.
    pub fn with_slot(mut self, slot: TaskSlot) -> Self {
        self.timeline.push(slot);
        self
    }

    /// Sets the caption and data markup.
    pub fn with_sched_data(mut self, scheddata: SchedData) -> Self {
        self.scheddata = scheddata;
        self
    }

    /// Slots that start inside the horizon, in timeline order.
    pub fn visible_slots(&self) -> impl Iterator<Item = &TaskSlot> {
        let horizon = self.plan.runfor;
        self.timeline.iter().filter(move |s| s.starts_before(horizon))
    }

    /// Visible slots belonging to one task.
    pub fn slots_for_task(&self, index: usize) -> impl Iterator<Item = &TaskSlot> {
        self.visible_slots().filter(move |s| s.index == index)
    }

    /// Start of the task's first visible `RAN` slot.
    pub fn first_run(&self, index: usize) -> Option<f64> {
        self.slots_for_task(index)
            .find(|s| s.event == SlotEvent::Ran)
            .map(|s| s.tstart)
    }

    /// Number of visible slots of the given kind for one task.
    pub fn count_events(&self, index: usize, event: SlotEvent) -> usize {
        self.slots_for_task(index)
            .filter(|s| s.event == event)
            .count()
    }
}
