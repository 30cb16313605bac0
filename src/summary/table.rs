//! LaTeX table formatting for summary rows.

use crate::render::Num;

use super::TaskSummaryData;

/// Footnote explaining the sleep/wakeup columns.
pub const EVENTS_FOOTNOTE: &str = "{\\footnotesize \\emph{Sleeps at}: the task blocks once it has \
run for the listed number of time units. \\emph{Wakeups after}: the task becomes runnable again \
the listed number of time units after the preceding sleep.}\\par";

/// Column layout of a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Use "Final VRT" instead of "Computation" for the demand column.
    pub vrt: bool,
    /// Append the sleep/wakeup columns.
    pub events: bool,
}

impl TableLayout {
    /// Header cells, in column order.
    pub fn headers(&self) -> Vec<&'static str> {
        let demand = if self.vrt { "Final VRT" } else { "Computation" };
        let mut headers = vec![
            "\\#",
            "Task",
            "Arrival",
            demand,
            "Start",
            "Completion",
            "Waiting",
            "Turnaround",
        ];
        if self.events {
            headers.extend(["Sleeps at", "Wakeups after"]);
        }
        headers
    }

    fn column_spec(&self) -> String {
        let columns = self.headers().len();
        // Number and name columns, then one centered column per metric.
        format!("|c|l|{}", "c|".repeat(columns - 2))
    }

    fn cells(&self, row: &TaskSummaryData) -> Vec<String> {
        let mut cells = vec![
            row.row.to_string(),
            row.name.clone(),
            Num(row.arrival).to_string(),
            cell(row.computation),
            cell(row.start),
            cell(row.completion),
            cell(row.waiting),
            cell(row.turnaround),
        ];
        if self.events {
            cells.push(list_cell(&row.sleeps));
            cells.push(list_cell(&row.wakeups));
        }
        cells
    }
}

/// Formats the summary table.
pub fn format_table(
    layout: TableLayout,
    rows: &[TaskSummaryData],
    caption: &str,
    label: &str,
) -> String {
    let mut lines = vec![
        "\\begin{table}[h]".to_string(),
        "\\centering".to_string(),
        format!("\\begin{{tabular}}{{{}}}", layout.column_spec()),
        "\\hline".to_string(),
        format!("{} \\\\", layout.headers().join(" & ")),
        "\\hline".to_string(),
    ];
    for row in rows {
        lines.push(format!("{} \\\\", layout.cells(row).join(" & ")));
    }
    lines.push("\\hline".to_string());
    lines.push("\\end{tabular}".to_string());
    if !caption.is_empty() {
        lines.push(format!("\\caption{{{caption}}}"));
    }
    if !label.is_empty() {
        lines.push(format!("\\label{{{label}}}"));
    }
    lines.push("\\end{table}".to_string());
    if layout.events {
        lines.push(EVENTS_FOOTNOTE.to_string());
    }
    lines.join("\n")
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| Num(v).to_string()).unwrap_or_default()
}

fn list_cell(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| Num(*v).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
