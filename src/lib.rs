//! Rendering of scheduling-simulation timelines for the U-Engine ecosystem.
//!
//! Turns the output of a task-scheduling simulation into LaTeX artifacts
//! for reports and exercise sheets. The simulation itself lives upstream;
//! this crate only consumes its plan and timeline.
//!
//! # Modules
//!
//! - **`models`**: Input types: `Plan`, `Task`, `TaskSlot`, `Schedule`
//! - **`render`**: TikZ diagram of the timeline (`DiagramRenderer`)
//! - **`summary`**: Per-task statistics table (`SummaryExtractor`)
//! - **`artifact`**: Named, compilable artifact bundles (`export_diagram`,
//!   `export_summary`)
//! - **`config`**: Export settings (`ExportConfig`)
//! - **`validation`**: Opt-in input integrity checks
//!
//! # Blank variants
//!
//! Both outputs have a "blank" mode that keeps the frame (grid, names,
//! arrivals; or arrivals and demands) and drops the computed parts, for
//! worksheet-style manual completion.
//!
//! # Determinism
//!
//! Every entry point is a pure function of its inputs: the same schedule
//! always renders to byte-identical markup.

pub mod artifact;
pub mod config;
mod error;
pub mod models;
pub mod render;
pub mod summary;
pub mod validation;

pub use artifact::{export_diagram, export_summary, ArtifactBundle, LatexArtifact};
pub use config::ExportConfig;
pub use error::RenderError;
pub use render::{DiagramRenderer, RenderOptions};
pub use summary::{SummaryExtractor, SummaryOptions, TaskSummaryData};
