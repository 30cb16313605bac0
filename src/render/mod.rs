//! TikZ diagram rendering.
//!
//! Turns a `Schedule` into an ordered list of `DrawStatement`s and then
//! into a `tikzpicture` block.
//!
//! # Statement order
//!
//! 1. Background grid and quantum tick labels
//! 2. Task names and two-line descriptions
//! 3. Slot bars, labels and annotations (one left-to-right timeline scan)
//! 4. Arrival arrows, then exit arrows
//! 5. Top caption
//! 6. Legend block (legend mode only)
//!
//! # Annotation modes
//!
//! Inline mode prints each annotation above its slot. Legend mode prints
//! a numbered circle there instead and lists the messages under the
//! diagram, numbered by first occurrence in the scan.

mod geometry;
mod legend;
mod primitives;

pub use geometry::{Layout, Num};
pub use legend::{Legend, LegendEntry};
pub use primitives::{ArrowDirection, BarStyle, DrawStatement, FontSize, TextStyle, ARROW_RISE};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::RenderError;
use crate::models::{Plan, Schedule, SlotEvent, TaskSlot};
use crate::validation::validate_schedule;

/// Column of task names.
const NAME_COLUMN: f64 = -1.0;
/// Column of task descriptions and the top caption.
const DESCRIPTION_COLUMN: f64 = -0.6;
/// Row of the quantum tick labels.
const TICK_ROW: f64 = -0.7;
/// Row offset of annotations above a bar.
const ANNOTATION_ROW: f64 = 0.4;
/// Row offset of the label under a bar.
const BELOW_ROW: f64 = -0.4;
/// Length of the annotation tick above a bar.
const TICK_LENGTH: f64 = 0.25;
/// Row of the "Legend:" header.
const LEGEND_ROW: f64 = -1.5;
/// Vertical pitch of legend entries, in rows.
const LEGEND_PITCH: f64 = 0.4;
/// Column of legend markers.
const LEGEND_MARKER_COLUMN: f64 = -0.8;

/// Diagram rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Omit bars, annotations and the legend (worksheet variant).
    pub blank: bool,
    /// Print annotations above their slots instead of in a legend.
    pub inline: bool,
    /// Omit the label under `RAN` bars.
    pub nobelow: bool,
}

impl RenderOptions {
    /// Full rendering, annotations in a legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the blank switch.
    pub fn with_blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    /// Sets the inline-annotation switch.
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Sets the no-below-label switch.
    pub fn with_nobelow(mut self, nobelow: bool) -> Self {
        self.nobelow = nobelow;
        self
    }
}

/// Renders schedules as TikZ diagrams.
///
/// # Example
///
/// ```
/// use u_schedtex::models::{Plan, Schedule, Task, TaskSlot};
/// use u_schedtex::render::{DiagramRenderer, RenderOptions};
///
/// let plan = Plan::new(1.0, 10.0).with_task(Task::new(0, "T0"));
/// let schedule = Schedule::new(plan).with_slot(TaskSlot::ran(0, 0.0, 5.0));
///
/// let tikz = DiagramRenderer::new().render(&schedule);
/// assert!(tikz.contains("rectangle ++(2.5,0.5)"));
///
/// let blank = DiagramRenderer::with_options(RenderOptions::new().with_blank(true))
///     .render(&schedule);
/// assert!(!blank.contains("rectangle"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramRenderer {
    options: RenderOptions,
}

impl DiagramRenderer {
    /// Creates a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with the given options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The active options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders the diagram.
    ///
    /// Never fails: missing optional data simply produces no markup.
    pub fn render(&self, schedule: &Schedule) -> String {
        let body = self
            .statements(schedule)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        wrap_tikz(&body)
    }

    /// Validates the schedule, then renders it.
    ///
    /// Fails with the first validation problem, attributed to its task
    /// row and/or slot position.
    pub fn try_render(&self, schedule: &Schedule) -> Result<String, RenderError> {
        if let Err(errors) = validate_schedule(schedule) {
            warn!(count = errors.len(), "schedule failed validation");
            if let Some(first) = errors.into_iter().next() {
                return Err(first.into());
            }
        }
        Ok(self.render(schedule))
    }

    /// Computes the drawing statements in emission order.
    pub fn statements(&self, schedule: &Schedule) -> Vec<DrawStatement> {
        let plan = &schedule.plan;
        let layout = Layout::for_plan(plan);
        debug!(
            tasks = plan.task_count(),
            slots = schedule.timeline.len(),
            blank = self.options.blank,
            inline = self.options.inline,
            "rendering diagram"
        );

        let mut out = grid(plan, &layout);
        out.extend(task_labels(plan, &layout));

        let (slots, legend) = if self.options.blank {
            (Vec::new(), Legend::new())
        } else {
            scan_timeline(schedule, &layout, &self.options)
        };
        out.extend(slots);
        out.extend(task_arrows(plan, &layout));

        out.push(DrawStatement::text(
            layout.column(DESCRIPTION_COLUMN),
            layout.label_y(plan.task_count() as f64),
            schedule.scheddata.legend_above.clone(),
            TextStyle::tiny().anchored("west"),
        ));

        if !self.options.blank && !self.options.inline && !legend.is_empty() {
            debug!(entries = legend.len(), "appending legend");
            out.extend(legend_block(&legend, &layout));
        }
        out
    }
}

/// Wraps statements in the `tikzpicture` environment.
pub fn wrap_tikz(body: &str) -> String {
    format!("\n\\begin{{tikzpicture}}\n{body}\n\\end{{tikzpicture}}\n")
}

fn grid(plan: &Plan, layout: &Layout) -> Vec<DrawStatement> {
    let mut out = vec![DrawStatement::Grid {
        step: layout.quantum(),
        width: layout.x(plan.horizon()),
        height: plan.task_count() as f64,
    }];
    let timer = if plan.timer > 0.0 { plan.timer } else { 1.0 };
    for i in 0..=plan.quantum_count() {
        let t = i as f64 * timer;
        out.push(DrawStatement::text(
            layout.x(t),
            layout.label_y(TICK_ROW),
            format!("\\emph{{{}}}", Num(t)),
            TextStyle::tiny().colored("gray"),
        ));
    }
    out
}

fn task_labels(plan: &Plan, layout: &Layout) -> Vec<DrawStatement> {
    let names = plan.tasks.iter().map(|t| {
        DrawStatement::text(
            layout.column(NAME_COLUMN),
            layout.label_y(t.index as f64),
            t.name.clone(),
            TextStyle::default(),
        )
    });
    let descriptions = plan.tasks.iter().flat_map(|t| {
        let row = t.index as f64;
        [
            DrawStatement::text(
                layout.column(DESCRIPTION_COLUMN),
                layout.label_y(row - 0.4),
                t.description_line(0).to_string(),
                TextStyle::tiny(),
            ),
            DrawStatement::text(
                layout.column(DESCRIPTION_COLUMN),
                layout.label_y(row - 0.2),
                t.description_line(1).to_string(),
                TextStyle::tiny(),
            ),
        ]
    });
    names.chain(descriptions).collect()
}

fn task_arrows(plan: &Plan, layout: &Layout) -> Vec<DrawStatement> {
    let arrivals = plan.tasks.iter().map(|t| DrawStatement::Arrow {
        x: layout.x(t.arrival),
        row: t.index,
        direction: ArrowDirection::Down,
    });
    let exits = plan.tasks.iter().filter_map(|t| {
        t.exited.map(|exited| DrawStatement::Arrow {
            x: layout.x(exited),
            row: t.index,
            direction: ArrowDirection::Up,
        })
    });
    arrivals.chain(exits).collect()
}

/// Single left-to-right pass over the timeline, folding slot statements
/// and legend numbering together.
fn scan_timeline(
    schedule: &Schedule,
    layout: &Layout,
    options: &RenderOptions,
) -> (Vec<DrawStatement>, Legend) {
    let horizon = schedule.plan.runfor;
    schedule
        .timeline
        .iter()
        .enumerate()
        .fold((Vec::new(), Legend::new()), |(mut out, mut legend), (pos, slot)| {
            if !slot.starts_before(horizon) {
                trace!(slot = pos, tstart = slot.tstart, "slot outside horizon");
                return (out, legend);
            }
            match slot.event {
                SlotEvent::Ran => {
                    out.push(bar(slot, layout, BarStyle::Outlined));
                    if !options.nobelow {
                        if let Some(below) = &slot.below_slot {
                            out.push(DrawStatement::text(
                                layout.x(slot.tend),
                                layout.label_y(slot.index as f64 + BELOW_ROW),
                                below.clone(),
                                TextStyle::tiny(),
                            ));
                        }
                    }
                    if let Some(label) = &slot.in_slot {
                        out.push(DrawStatement::text(
                            layout.x(slot.tend) - layout.column(0.25),
                            layout.label_y(slot.index as f64),
                            label.clone(),
                            TextStyle::tiny(),
                        ));
                    }
                    annotate(slot, layout, options, &mut legend, &mut out);
                }
                SlotEvent::Blocked => {
                    out.push(bar(slot, layout, BarStyle::Filled));
                    annotate(slot, layout, options, &mut legend, &mut out);
                }
                SlotEvent::Runnable => annotate(slot, layout, options, &mut legend, &mut out),
                SlotEvent::Exited | SlotEvent::Other => {}
            }
            (out, legend)
        })
}

fn bar(slot: &TaskSlot, layout: &Layout, style: BarStyle) -> DrawStatement {
    DrawStatement::Rect {
        x: layout.x(slot.tstart),
        y: layout.bar_y(slot.index),
        width: layout.width(slot.tstart, slot.tend),
        height: layout.barheight,
        style,
    }
}

fn annotate(
    slot: &TaskSlot,
    layout: &Layout,
    options: &RenderOptions,
    legend: &mut Legend,
    out: &mut Vec<DrawStatement>,
) {
    let Some(annotation) = slot.annotation() else {
        return;
    };
    let x = layout.x(slot.tend);
    let y = layout.label_y(slot.index as f64 + ANNOTATION_ROW);
    if options.inline {
        out.push(DrawStatement::text(
            x,
            y,
            annotation.message.clone(),
            TextStyle::tiny()
                .anchored("east")
                .colored(annotation.color.clone()),
        ));
    } else {
        let number = legend.number_for(annotation);
        out.push(DrawStatement::text(
            x,
            y,
            number.to_string(),
            TextStyle::tiny()
                .circled(annotation.color.clone())
                .anchored("east"),
        ));
    }
    let top = layout.bar_top(slot.index);
    out.push(DrawStatement::Tick {
        x: layout.x(slot.tstart),
        from_y: top + TICK_LENGTH,
        to_y: top,
        color: annotation.color.clone(),
    });
}

fn legend_block(legend: &Legend, layout: &Layout) -> Vec<DrawStatement> {
    let mut out = vec![DrawStatement::text(
        layout.column(NAME_COLUMN),
        layout.label_y(LEGEND_ROW),
        "Legend:",
        TextStyle::default().sized(FontSize::Small).anchored("west"),
    )];
    for entry in legend.entries() {
        let y = layout.label_y(LEGEND_ROW - LEGEND_PITCH * entry.number as f64);
        let color = &entry.annotation.color;
        out.push(DrawStatement::text(
            layout.column(LEGEND_MARKER_COLUMN),
            y,
            entry.number.to_string(),
            TextStyle::tiny().circled(color.clone()),
        ));
        out.push(DrawStatement::text(
            layout.column(DESCRIPTION_COLUMN),
            y,
            entry.annotation.message.clone(),
            TextStyle::tiny().anchored("west").colored(color.clone()),
        ));
    }
    out
}
