//! Legend numbering for out-of-line annotations.

use crate::models::Annotation;

/// One numbered legend entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// 1-based marker number.
    pub number: usize,
    /// The annotation it stands for.
    pub annotation: Annotation,
}

/// Legend entries in first-occurrence order.
///
/// Identical annotations (same message and color) share a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Creates an empty legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the marker number for `annotation`, allocating the next one
    /// on first sight.
    pub fn number_for(&mut self, annotation: &Annotation) -> usize {
        if let Some(entry) = self.entries.iter().find(|e| &e.annotation == annotation) {
            return entry.number;
        }
        let number = self.entries.len() + 1;
        self.entries.push(LegendEntry {
            number,
            annotation: annotation.clone(),
        });
        number
    }

    /// Entries in numbering order.
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Whether no annotation was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct annotations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
