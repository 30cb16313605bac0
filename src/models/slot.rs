//! Timeline slot model.

use serde::{Deserialize, Serialize};

/// One timeline entry: a task in a single state over `[tstart, tend)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSlot {
    /// Interval start.
    pub tstart: f64,
    /// Interval end (exclusive).
    pub tend: f64,
    /// Owning task's row index.
    pub index: usize,
    /// Task state during the slot.
    pub event: SlotEvent,
    /// Label printed inside the bar, near its right edge.
    #[serde(rename = "inSlot", default, skip_serializing_if = "Option::is_none")]
    pub in_slot: Option<String>,
    /// Label printed beneath `RAN` bars.
    #[serde(rename = "belowSlot", default, skip_serializing_if = "Option::is_none")]
    pub below_slot: Option<String>,
    /// Colored annotation shown above the slot (inline or via the legend).
    #[serde(rename = "aboveSlot", default, skip_serializing_if = "Option::is_none")]
    pub above_slot: Option<Annotation>,
}

/// Task state tag of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotEvent {
    /// Task held the CPU.
    Ran,
    /// Task waited on I/O or a sleep.
    Blocked,
    /// Task was ready but not running.
    Runnable,
    /// Task terminated.
    Exited,
    /// Unrecognized tag; contributes nothing to the diagram.
    #[serde(other)]
    Other,
}

/// A short colored message attached to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Message text.
    pub message: String,
    /// TikZ color name.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "black".to_string()
}

impl Annotation {
    /// Creates an annotation.
    pub fn new(message: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            color: color.into(),
        }
    }
}

impl TaskSlot {
    /// Creates a slot without labels.
    pub fn new(index: usize, tstart: f64, tend: f64, event: SlotEvent) -> Self {
        Self {
            tstart,
            tend,
            index,
            event,
            in_slot: None,
            below_slot: None,
            above_slot: None,
        }
    }

    /// Creates a `RAN` slot.
    pub fn ran(index: usize, tstart: f64, tend: f64) -> Self {
        Self::new(index, tstart, tend, SlotEvent::Ran)
    }

    /// Creates a `BLOCKED` slot.
    pub fn blocked(index: usize, tstart: f64, tend: f64) -> Self {
        Self::new(index, tstart, tend, SlotEvent::Blocked)
    }

    /// Creates a `RUNNABLE` slot.
    pub fn runnable(index: usize, tstart: f64, tend: f64) -> Self {
        Self::new(index, tstart, tend, SlotEvent::Runnable)
    }

    /// Creates an `EXITED` slot.
    pub fn exited(index: usize, tstart: f64, tend: f64) -> Self {
        Self::new(index, tstart, tend, SlotEvent::Exited)
    }

    /// Sets the in-bar label.
    pub fn with_in_slot(mut self, label: impl Into<String>) -> Self {
        self.in_slot = Some(label.into());
        self
    }

    /// Sets the below-bar label.
    pub fn with_below_slot(mut self, label: impl Into<String>) -> Self {
        self.below_slot = Some(label.into());
        self
    }

    /// Sets the above-slot annotation.
    pub fn with_annotation(mut self, message: impl Into<String>, color: impl Into<String>) -> Self {
        self.above_slot = Some(Annotation::new(message, color));
        self
    }

    /// The annotation, if it carries a non-empty message.
    pub fn annotation(&self) -> Option<&Annotation> {
        self.above_slot.as_ref().filter(|a| !a.message.is_empty())
    }

    /// Whether the slot starts strictly before `horizon`.
    #[inline]
    pub fn starts_before(&self, horizon: f64) -> bool {
        self.tstart < horizon
    }
}
