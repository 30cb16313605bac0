//! Export configuration.
//!
//! Controls the document class, engine and build options stamped on every
//! artifact, plus the diagram and summary options used for exports. All
//! fields have defaults, so a config file only needs the keys it changes:
//!
//! ```json
//! { "engine": "lualatex", "diagram": { "inline": true } }
//! ```

use serde::{Deserialize, Serialize};

use crate::artifact::{LatexArtifact, DEFAULT_CLASS, DEFAULT_ENGINE};
use crate::error::RenderError;
use crate::render::RenderOptions;
use crate::summary::SummaryOptions;

/// Default extra build options.
pub const DEFAULT_EXTRA_OPTIONS: &str = "-r varwidth";

/// Artifact export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// Document class of every artifact.
    pub class: String,
    /// Compilation engine of every artifact.
    pub engine: String,
    /// Extra build options of every artifact.
    pub extra_options: String,
    /// Diagram options (`blank` is overridden per artifact).
    pub diagram: RenderOptions,
    /// Summary options (`blank` is overridden per artifact).
    pub summary: SummaryOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            class: DEFAULT_CLASS.to_string(),
            engine: DEFAULT_ENGINE.to_string(),
            extra_options: DEFAULT_EXTRA_OPTIONS.to_string(),
            diagram: RenderOptions::default(),
            summary: SummaryOptions::default(),
        }
    }
}

impl ExportConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON; missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(RenderError::Config)
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

    /// Sets the diagram options.
    pub fn with_diagram(mut self, diagram: RenderOptions) -> Self {
        self.diagram = diagram;
        self
    }

    /// Sets the summary options.
    pub fn with_summary(mut self, summary: SummaryOptions) -> Self {
        self.summary = summary;
        self
    }

    /// Wraps `code` in an artifact stamped with these settings.
    pub fn artifact(&self, code: impl Into<String>, name: &str) -> LatexArtifact {
        LatexArtifact::new(code, name)
            .with_class(self.class.clone())
            .with_engine(self.engine.clone())
            .with_extra_options(self.extra_options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ExportConfig::default();
        assert_eq!(c.class, "standalone");
        assert_eq!(c.engine, "pdflatex");
        assert_eq!(c.extra_options, "-r varwidth");
        assert!(!c.diagram.inline);
        assert_eq!(c.summary.caption, "Task summary");
    }

    #[test]
    fn test_partial_json() {
        let c = ExportConfig::from_json(
            r#"{"engine": "lualatex", "diagram": {"inline": true}, "summary": {"caption": "Run 1"}}"#,
        )
        .unwrap();
        assert_eq!(c.engine, "lualatex");
        assert_eq!(c.class, "standalone");
        assert!(c.diagram.inline);
        assert!(!c.diagram.nobelow);
        assert_eq!(c.summary.caption, "Run 1");
        assert_eq!(c.summary.label, "tab:task-summary");
    }

    #[test]
    fn test_extra_options_key() {
        let c = ExportConfig::from_json(r#"{"extraOptions": ""}"#).unwrap();
        assert_eq!(c.extra_options, "");
    }

    #[test]
    fn test_bad_json() {
        let err = ExportConfig::from_json("{").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_artifact_stamping() {
        let a = ExportConfig::new()
            .with_class("article")
            .with_extra_options("")
            .artifact("body", "Data Table");
        assert_eq!(a.class, "article");
        assert_eq!(a.engine, "pdflatex");
        assert_eq!(a.slug, "data-table");
        assert_eq!(a.code, "body");
    }
}
