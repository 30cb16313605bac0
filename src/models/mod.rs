//! Simulation data models.
//!
//! The rendering core consumes these as immutable inputs produced by the
//! scheduling simulator.
//!
//! | Type | Role |
//! |------|------|
//! | `Plan` | Quantum, horizon, layout factors, tasks |
//! | `Task` | One simulated process (one diagram row) |
//! | `TaskSlot` | One timeline interval in a single state |
//! | `Schedule` | Plan + timeline + caption text |

mod plan;
mod schedule;
mod slot;
mod task;

pub use plan::{Graphics, Plan, SchedClass, CFS_POLICY, MAX_QUANTA};
pub use schedule::{SchedData, Schedule};
pub use slot::{Annotation, SlotEvent, TaskSlot};
pub use task::Task;
