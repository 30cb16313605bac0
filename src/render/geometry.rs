//! Coordinate scaling shared by every diagram statement.
//!
//! Time values are scaled by `0.5 / timer` so that one quantum always
//! spans half a unit, whatever the quantum size, and then by `hspace`.
//! Fixed layout columns (name, description) and label rows are scaled by
//! `hspace` only.

use std::fmt;

use crate::models::Plan;

/// Width of one quantum before `hspace` is applied.
const QUANTUM_WIDTH: f64 = 0.5;

/// Layout scale derived from a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Horizontal spacing multiplier.
    pub hspace: f64,
    /// Vertical spacing between bars.
    pub vspace: f64,
    /// Bar height.
    pub barheight: f64,
    /// Time-to-x factor, `0.5 / timer`.
    pub scale: f64,
}

impl Layout {
    /// Derives the layout for a plan.
    ///
    /// A non-positive quantum is treated as 1 so that rendering stays
    /// best-effort; `validate_plan` reports it.
    pub fn for_plan(plan: &Plan) -> Self {
        let timer = if plan.timer > 0.0 { plan.timer } else { 1.0 };
        Self {
            hspace: plan.graphics.hspace,
            vspace: plan.graphics.vspace,
            barheight: plan.graphics.barheight,
            scale: QUANTUM_WIDTH / timer,
        }
    }

    /// X coordinate of a time value.
    #[inline]
    pub fn x(&self, time: f64) -> f64 {
        time * self.scale * self.hspace
    }

    /// Width of one quantum, the grid step.
    #[inline]
    pub fn quantum(&self) -> f64 {
        QUANTUM_WIDTH * self.hspace
    }

    /// Scaled width of `[tstart, tend]`.
    #[inline]
    pub fn width(&self, tstart: f64, tend: f64) -> f64 {
        (tend - tstart) * self.scale * self.hspace
    }

    /// X coordinate of a fixed layout column (e.g. `-1` for names).
    #[inline]
    pub fn column(&self, column: f64) -> f64 {
        column * self.hspace
    }

    /// Y coordinate of a text label on (possibly fractional) row `row`.
    ///
    /// Uses `hspace` for the row pitch; existing documents are laid out
    /// against this formula.
    #[inline]
    pub fn label_y(&self, row: f64) -> f64 {
        row * self.hspace + 0.5 * self.barheight
    }

    /// Y coordinate of the bottom edge of a bar on row `index`.
    #[inline]
    pub fn bar_y(&self, index: usize) -> f64 {
        index as f64 * self.vspace
    }

    /// Y coordinate of the top edge of a bar on row `index`.
    #[inline]
    pub fn bar_top(&self, index: usize) -> f64 {
        self.bar_y(index) + self.barheight
    }
}

/// Decimal formatting for coordinates.
///
/// Six decimal places with trailing zeros trimmed, so `-0.4 + 0.25`
/// prints as `-0.15`. Negative zero prints as `0`.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.6}", self.0);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "" | "-0" => f.write_str("0"),
            s => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Graphics;

    #[test]
    fn test_scale_is_quantum_independent() {
        let a = Layout::for_plan(&Plan::new(1.0, 10.0));
        let b = Layout::for_plan(&Plan::new(4.0, 40.0));
        // One quantum is always half a unit wide.
        assert_eq!(a.x(1.0), 0.5);
        assert_eq!(b.x(4.0), 0.5);
        assert_eq!(a.x(10.0), b.x(40.0));
    }

    #[test]
    fn test_hspace_multiplies_time_and_columns() {
        let plan = Plan::new(1.0, 10.0).with_graphics(Graphics::new(2.0, 1.0, 0.5));
        let layout = Layout::for_plan(&plan);
        assert_eq!(layout.x(3.0), 3.0);
        assert_eq!(layout.width(1.0, 4.0), 3.0);
        assert_eq!(layout.column(-1.0), -2.0);
    }

    #[test]
    fn test_label_and_bar_rows() {
        let plan = Plan::new(1.0, 10.0).with_graphics(Graphics::new(1.0, 2.0, 0.5));
        let layout = Layout::for_plan(&plan);
        assert_eq!(layout.label_y(1.0), 1.25);
        assert_eq!(layout.bar_y(1), 2.0);
        assert_eq!(layout.bar_top(1), 2.5);
    }

    #[test]
    fn test_non_positive_timer_falls_back() {
        let layout = Layout::for_plan(&Plan::new(0.0, 10.0));
        assert_eq!(layout.scale, 0.5);
    }

    #[test]
    fn test_num_format() {
        assert_eq!(Num(0.0).to_string(), "0");
        assert_eq!(Num(-0.0).to_string(), "0");
        assert_eq!(Num(2.0).to_string(), "2");
        assert_eq!(Num(-0.6).to_string(), "-0.6");
        assert_eq!(Num(1.25).to_string(), "1.25");
        assert_eq!(Num(-0.4 + 0.25).to_string(), "-0.15");
        assert_eq!(Num(-1e-9).to_string(), "0");
        assert_eq!(Num(40.0).to_string(), "40");
    }
}
