//! Named LaTeX artifacts for downstream compilation.
//!
//! Each export produces a bundle: the `complete` artifact, its `blank`
//! worksheet twin and, for diagrams, the simulator's pre-rendered `data`
//! markup passed through untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ExportConfig;
use crate::models::Schedule;
use crate::render::DiagramRenderer;
use crate::summary::{SummaryExtractor, SummaryInput};

/// Default document class.
pub const DEFAULT_CLASS: &str = "standalone";
/// Default compilation engine.
pub const DEFAULT_ENGINE: &str = "pdflatex";

/// Artifact name of the complete diagram.
pub const DIAGRAM_NAME: &str = "rt diagram";
/// Artifact name of the blank diagram.
pub const DIAGRAM_BLANK_NAME: &str = "rt diagram blank";
/// Artifact name of the pass-through data markup.
pub const DATA_NAME: &str = "data table";
/// Artifact name of the complete summary table.
pub const SUMMARY_NAME: &str = "summary table";
/// Artifact name of the blank summary table.
pub const SUMMARY_BLANK_NAME: &str = "summary table blank";

/// One compilable LaTeX artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatexArtifact {
    /// LaTeX body.
    pub code: String,
    /// Document class.
    pub class: String,
    /// Human-readable name.
    pub name: String,
    /// Kebab-cased `name`, used for file names.
    pub slug: String,
    /// Compilation engine.
    pub engine: String,
    /// Extra options for the build tool.
    pub extra_options: String,
}

impl LatexArtifact {
    /// Creates an artifact with the default class and engine.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: code.into(),
            class: DEFAULT_CLASS.to_string(),
            slug: kebab_case(&name),
            name,
            engine: DEFAULT_ENGINE.to_string(),
            extra_options: String::new(),
        }
    }

    /// Sets the document class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Sets the compilation engine.
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Sets the extra build options.
    pub fn with_extra_options(mut self, options: impl Into<String>) -> Self {
        self.extra_options = options.into();
        self
    }
}

/// Artifacts produced by one export call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactBundle {
    /// Fully rendered artifact.
    pub complete: LatexArtifact,
    /// Worksheet variant.
    pub blank: LatexArtifact,
    /// Pre-rendered data markup (diagram exports only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LatexArtifact>,
}

impl ArtifactBundle {
    /// Looks an artifact up by logical name (`complete`, `blank`, `data`).
    pub fn get(&self, name: &str) -> Option<&LatexArtifact> {
        match name {
            "complete" => Some(&self.complete),
            "blank" => Some(&self.blank),
            "data" => self.data.as_ref(),
            _ => None,
        }
    }

    /// `(logical name, artifact)` pairs in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &LatexArtifact)> {
        [
            ("complete", Some(&self.complete)),
            ("blank", Some(&self.blank)),
            ("data", self.data.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, artifact)| artifact.map(|a| (name, a)))
    }
}

/// Exports a schedule's diagram as `complete`, `blank` and `data`.
///
/// `complete` uses `config.diagram` with `blank` forced off; `blank`
/// forces it on. `data` is `scheddata.blank_data` verbatim.
pub fn export_diagram(schedule: &Schedule, config: &ExportConfig) -> ArtifactBundle {
    debug!(tasks = schedule.plan.task_count(), "exporting diagram");
    let complete = DiagramRenderer::with_options(config.diagram.with_blank(false)).render(schedule);
    let blank = DiagramRenderer::with_options(config.diagram.with_blank(true)).render(schedule);

    ArtifactBundle {
        complete: config.artifact(complete, DIAGRAM_NAME),
        blank: config.artifact(blank, DIAGRAM_BLANK_NAME),
        data: Some(config.artifact(schedule.scheddata.blank_data.clone(), DATA_NAME)),
    }
}

/// Exports a summary table as `complete` and `blank`.
pub fn export_summary<'a>(
    input: impl Into<SummaryInput<'a>>,
    config: &ExportConfig,
) -> ArtifactBundle {
    let input: SummaryInput<'a> = input.into();
    debug!(tasks = input.plan().task_count(), "exporting summary");
    let complete =
        SummaryExtractor::with_options(config.summary.clone().with_blank(false)).summarize(input);
    let blank =
        SummaryExtractor::with_options(config.summary.clone().with_blank(true)).summarize(input);

    ArtifactBundle {
        complete: config.artifact(complete, SUMMARY_NAME),
        blank: config.artifact(blank, SUMMARY_BLANK_NAME),
        data: None,
    }
}

/// Converts a name to kebab case.
///
/// Words break at non-alphanumeric characters, lower-to-upper case
/// changes, letter/digit changes and before the last capital of an
/// acronym followed by lowercase (`XMLHttp` → `xml-http`).
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() != c.is_alphabetic())
                || (prev.is_uppercase() && c.is_uppercase() && next_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plan, SchedData, Task, TaskSlot};
    use crate::render::RenderOptions;

    fn sample_schedule() -> Schedule {
        let plan = Plan::new(1.0, 4.0).with_task(Task::new(0, "A").with_exit(3.0));
        Schedule::new(plan)
            .with_slot(TaskSlot::ran(0, 0.0, 3.0).with_annotation("done", "blue"))
            .with_sched_data(SchedData::new("FIFO", "\\begin{tabular}{c}x\\end{tabular}"))
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("rt diagram blank"), "rt-diagram-blank");
        assert_eq!(kebab_case("dataTable"), "data-table");
        assert_eq!(kebab_case("XMLHttpRequest"), "xml-http-request");
        assert_eq!(kebab_case("  Task__summary 2 "), "task-summary-2");
        assert_eq!(kebab_case("rt2diagram"), "rt-2-diagram");
        assert_eq!(kebab_case(""), "");
    }

    #[test]
    fn test_artifact_defaults() {
        let a = LatexArtifact::new("x", "rt diagram");
        assert_eq!(a.class, "standalone");
        assert_eq!(a.engine, "pdflatex");
        assert_eq!(a.slug, "rt-diagram");
        assert_eq!(a.extra_options, "");

        let b = a.with_class("article").with_engine("lualatex");
        assert_eq!(b.class, "article");
        assert_eq!(b.engine, "lualatex");
    }

    #[test]
    fn test_artifact_json_shape() {
        let a = LatexArtifact::new("x", "data table").with_extra_options("-r varwidth");
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["extraOptions"], "-r varwidth");
        assert_eq!(v["slug"], "data-table");
    }

    #[test]
    fn test_export_diagram_bundle() {
        let s = sample_schedule();
        let bundle = export_diagram(&s, &ExportConfig::default());

        assert_eq!(bundle.complete.name, DIAGRAM_NAME);
        assert!(bundle.complete.code.contains("rectangle"));
        assert!(bundle.complete.code.contains("Legend:"));
        assert!(!bundle.blank.code.contains("rectangle"));
        assert_eq!(bundle.blank.slug, "rt-diagram-blank");

        let data = bundle.get("data").unwrap();
        assert_eq!(data.code, s.scheddata.blank_data);
        assert_eq!(data.slug, "data-table");
        assert_eq!(data.extra_options, "-r varwidth");
    }

    #[test]
    fn test_export_diagram_respects_options() {
        let config = ExportConfig::default()
            .with_diagram(RenderOptions::new().with_inline(true).with_blank(true));
        let bundle = export_diagram(&sample_schedule(), &config);
        // `blank` in the config does not leak into the complete artifact.
        assert!(bundle.complete.code.contains("rectangle"));
        assert!(bundle.complete.code.contains("{\\tiny done}"));
        assert!(!bundle.complete.code.contains("Legend:"));
    }

    #[test]
    fn test_export_summary_bundle() {
        let s = sample_schedule();
        let bundle = export_summary(&s, &ExportConfig::default());
        assert!(bundle.data.is_none());
        assert!(bundle.get("data").is_none());
        assert_eq!(bundle.complete.slug, "summary-table");
        assert_eq!(bundle.blank.slug, "summary-table-blank");
        assert!(bundle.complete.code.contains("1 & A & 0 &  & 0 & 3 & 0 & 3 \\\\"));
        assert!(bundle.blank.code.contains("1 & A & 0 &  &  &  &  &  \\\\"));
    }

    #[test]
    fn test_bundle_iter_order() {
        let bundle = export_diagram(&sample_schedule(), &ExportConfig::default());
        let names: Vec<_> = bundle.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["complete", "blank", "data"]);

        let summary = export_summary(&sample_schedule().plan, &ExportConfig::default());
        assert_eq!(summary.iter().count(), 2);
    }
}
