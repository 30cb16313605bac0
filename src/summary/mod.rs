//! Per-task summary tables.
//!
//! Derives timing statistics for every task and formats them as a LaTeX
//! table. Works on a simulated `Schedule` or, before any simulation has
//! run, on a bare `Plan`.
//!
//! # Blank tables
//!
//! With `blank` set, start, completion, waiting and turnaround are left
//! empty while arrival, demand and the decoded sleep/wakeup columns stay
//! filled. Row order is the same as the complete table, so the two can be
//! used as a worksheet and its answer key.

mod events;
mod stats;
mod table;

pub use events::{decode_events, SleepWakeups};
pub use stats::TaskSummaryData;
pub use table::{format_table, TableLayout, EVENTS_FOOTNOTE};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Plan, Schedule};

/// Default table caption.
pub const DEFAULT_CAPTION: &str = "Task summary";
/// Default table label.
pub const DEFAULT_LABEL: &str = "tab:task-summary";

/// What a summary is computed from.
#[derive(Debug, Clone, Copy)]
pub enum SummaryInput<'a> {
    /// No simulation yet: static task data only.
    Plan(&'a Plan),
    /// A simulated schedule.
    Simulated(&'a Schedule),
}

impl<'a> SummaryInput<'a> {
    /// The underlying plan.
    pub fn plan(&self) -> &'a Plan {
        match *self {
            SummaryInput::Plan(plan) => plan,
            SummaryInput::Simulated(schedule) => &schedule.plan,
        }
    }
}

impl<'a> From<&'a Plan> for SummaryInput<'a> {
    fn from(plan: &'a Plan) -> Self {
        SummaryInput::Plan(plan)
    }
}

impl<'a> From<&'a Schedule> for SummaryInput<'a> {
    fn from(schedule: &'a Schedule) -> Self {
        SummaryInput::Simulated(schedule)
    }
}

/// Summary switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Leave dynamic fields empty (worksheet variant).
    pub blank: bool,
    /// Table caption; empty to omit.
    pub caption: String,
    /// Table label; empty to omit.
    pub label: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            blank: false,
            caption: DEFAULT_CAPTION.to_string(),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl SummaryOptions {
    /// Complete table with the default caption and label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the blank switch.
    pub fn with_blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    /// Sets the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Builds per-task summary rows and tables.
///
/// # Example
///
/// ```
/// use u_schedtex::models::{Plan, Task};
/// use u_schedtex::summary::{SummaryExtractor, SummaryOptions};
///
/// let plan = Plan::new(1.0, 10.0)
///     .with_task(Task::new(0, "A").with_events(vec![3.0, 2.0, 4.0, 1.0]));
///
/// let rows = SummaryExtractor::new().rows(&plan);
/// assert_eq!(rows[0].sleeps, vec![3.0, 7.0]);
/// assert_eq!(rows[0].start, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SummaryExtractor {
    options: SummaryOptions,
}

impl SummaryExtractor {
    /// Creates an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with the given options.
    pub fn with_options(options: SummaryOptions) -> Self {
        Self { options }
    }

    /// The active options.
    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// One row per task, in plan order, numbered from 1.
    pub fn rows<'a>(&self, input: impl Into<SummaryInput<'a>>) -> Vec<TaskSummaryData> {
        let input: SummaryInput<'a> = input.into();
        let plan = input.plan();
        debug!(
            tasks = plan.task_count(),
            simulated = matches!(input, SummaryInput::Simulated(_)),
            blank = self.options.blank,
            "summarizing tasks"
        );

        plan.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let row = match input {
                    SummaryInput::Plan(_) => TaskSummaryData::from_task(i + 1, task),
                    SummaryInput::Simulated(schedule) => {
                        TaskSummaryData::from_schedule(i + 1, task, schedule)
                    }
                };
                if self.options.blank {
                    row.blanked()
                } else {
                    row
                }
            })
            .collect()
    }

    /// Column layout for the input's plan.
    pub fn layout<'a>(&self, input: impl Into<SummaryInput<'a>>) -> TableLayout {
        let input: SummaryInput<'a> = input.into();
        let plan = input.plan();
        TableLayout {
            vrt: plan.is_cfs(),
            events: plan.has_events(),
        }
    }

    /// Renders the summary table.
    pub fn summarize<'a>(&self, input: impl Into<SummaryInput<'a>>) -> String {
        let input: SummaryInput<'a> = input.into();
        let rows = self.rows(input);
        format_table(
            self.layout(input),
            &rows,
            &self.options.caption,
            &self.options.label,
        )
    }
}
