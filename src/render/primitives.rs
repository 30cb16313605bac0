//! Drawing statements and their TikZ serialization.
//!
//! Geometry is computed once into these values; `Display` turns each one
//! into a single line of TikZ.

use std::fmt;

use super::geometry::Num;

/// Rise of arrival/exit arrows above the row baseline.
pub const ARROW_RISE: f64 = 0.75;

/// One drawing statement of the diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawStatement {
    /// Background grid from the origin to `(width, height)`.
    Grid {
        /// Horizontal grid step.
        step: f64,
        /// Right edge.
        width: f64,
        /// Top edge (task count).
        height: f64,
    },
    /// A slot bar anchored at its bottom-left corner.
    Rect {
        /// Left edge.
        x: f64,
        /// Bottom edge.
        y: f64,
        /// Bar width.
        width: f64,
        /// Bar height.
        height: f64,
        /// Border/fill style.
        style: BarStyle,
    },
    /// A text node.
    Text {
        /// Node x.
        x: f64,
        /// Node y.
        y: f64,
        /// Content, emitted verbatim (may contain LaTeX).
        text: String,
        /// Placement and color.
        style: TextStyle,
    },
    /// Arrival (down) or exit (up) arrow on a task row.
    Arrow {
        /// Arrow x.
        x: f64,
        /// Task row.
        row: usize,
        /// Arrow head direction.
        direction: ArrowDirection,
    },
    /// Short colored vertical tick pointing down into a slot.
    Tick {
        /// Tick x.
        x: f64,
        /// Upper end.
        from_y: f64,
        /// Lower end (arrow head).
        to_y: f64,
        /// TikZ color name.
        color: String,
    },
}

/// Bar rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// Black border, no fill (`RAN`).
    Outlined,
    /// Gray fill with white interior text (`BLOCKED`).
    Filled,
}

/// Arrow head direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    /// Points down onto the row: arrival.
    Down,
    /// Points up away from the row: exit.
    Up,
}

/// Font size prefix of a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    /// No size command.
    #[default]
    Normal,
    /// `\small`
    Small,
    /// `\tiny`
    Tiny,
}

/// Text node options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    /// Draws a small circle of this color around the text.
    pub circled: Option<String>,
    /// TikZ anchor (`east`, `west`).
    pub anchor: Option<&'static str>,
    /// Text color.
    pub color: Option<String>,
    /// Font size.
    pub size: FontSize,
}

impl TextStyle {
    /// Tiny text, no options.
    pub fn tiny() -> Self {
        Self {
            size: FontSize::Tiny,
            ..Default::default()
        }
    }

    /// Sets the anchor.
    pub fn anchored(mut self, anchor: &'static str) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Sets the text color.
    pub fn colored(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Circles the text in the given color.
    pub fn circled(mut self, color: impl Into<String>) -> Self {
        self.circled = Some(color.into());
        self
    }

    /// Sets the font size.
    pub fn sized(mut self, size: FontSize) -> Self {
        self.size = size;
        self
    }

    fn options(&self) -> Vec<String> {
        let mut opts = Vec::new();
        if let Some(color) = &self.circled {
            opts.push(format!("circle, draw={color}, inner sep=0.5pt"));
        }
        if let Some(anchor) = self.anchor {
            opts.push(format!("anchor={anchor}"));
        }
        if let Some(color) = &self.color {
            opts.push(format!("text={color}"));
        }
        opts
    }
}

impl DrawStatement {
    /// Creates a text node.
    pub fn text(x: f64, y: f64, text: impl Into<String>, style: TextStyle) -> Self {
        Self::Text {
            x,
            y,
            text: text.into(),
            style,
        }
    }

    /// Whether this statement draws a slot bar.
    pub fn is_rect(&self) -> bool {
        matches!(self, Self::Rect { .. })
    }

    /// The text content, for text nodes.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSize::Normal => Ok(()),
            FontSize::Small => f.write_str("\\small "),
            FontSize::Tiny => f.write_str("\\tiny "),
        }
    }
}

impl fmt::Display for DrawStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStatement::Grid {
                step,
                width,
                height,
            } => write!(
                f,
                "\\draw[xstep={},gray!20,thin,shift={{(0,-0.25)}}] (0,0) grid ({},{});",
                Num(*step),
                Num(*width),
                Num(*height)
            ),
            DrawStatement::Rect {
                x,
                y,
                width,
                height,
                style,
            } => {
                let (draw, node) = match style {
                    BarStyle::Outlined => ("draw=black", "pos=.5"),
                    BarStyle::Filled => ("draw=black, fill=gray", "pos=.5, text=white"),
                };
                write!(
                    f,
                    "\\draw[{draw}] ({}, {}) rectangle ++({},{}) node[{node}] {{}};",
                    Num(*x),
                    Num(*y),
                    Num(*width),
                    Num(*height)
                )
            }
            DrawStatement::Text { x, y, text, style } => {
                let opts = style.options();
                if opts.is_empty() {
                    write!(f, "\\node at({}, {}) {{{}{text}}};", Num(*x), Num(*y), style.size)
                } else {
                    write!(
                        f,
                        "\\node [{}] at({}, {}) {{{}{text}}};",
                        opts.join(", "),
                        Num(*x),
                        Num(*y),
                        style.size
                    )
                }
            }
            DrawStatement::Arrow { x, row, direction } => {
                let head = match direction {
                    ArrowDirection::Down => "->",
                    ArrowDirection::Up => "<-",
                };
                write!(
                    f,
                    "\\draw [{head}] ({}, {row} + {ARROW_RISE}) -- ({}, {row});",
                    Num(*x),
                    Num(*x)
                )
            }
            DrawStatement::Tick {
                x,
                from_y,
                to_y,
                color,
            } => write!(
                f,
                "\\draw [->, draw={color}] ({}, {}) -- ({}, {});",
                Num(*x),
                Num(*from_y),
                Num(*x),
                Num(*to_y)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_format() {
        let g = DrawStatement::Grid {
            step: 0.5,
            width: 5.0,
            height: 2.0,
        };
        assert_eq!(
            g.to_string(),
            "\\draw[xstep=0.5,gray!20,thin,shift={(0,-0.25)}] (0,0) grid (5,2);"
        );
    }

    #[test]
    fn test_rect_formats() {
        let ran = DrawStatement::Rect {
            x: 0.0,
            y: 1.0,
            width: 2.5,
            height: 0.5,
            style: BarStyle::Outlined,
        };
        assert_eq!(
            ran.to_string(),
            "\\draw[draw=black] (0, 1) rectangle ++(2.5,0.5) node[pos=.5] {};"
        );
        assert!(ran.is_rect());

        let blocked = DrawStatement::Rect {
            x: 1.0,
            y: 0.0,
            width: 1.0,
            height: 0.5,
            style: BarStyle::Filled,
        };
        assert_eq!(
            blocked.to_string(),
            "\\draw[draw=black, fill=gray] (1, 0) rectangle ++(1,0.5) node[pos=.5, text=white] {};"
        );
    }

    #[test]
    fn test_text_formats() {
        let plain = DrawStatement::text(-1.0, 0.25, "T0", TextStyle::default());
        assert_eq!(plain.to_string(), "\\node at(-1, 0.25) {T0};");

        let tiny = DrawStatement::text(2.0, 0.25, "x", TextStyle::tiny());
        assert_eq!(tiny.to_string(), "\\node at(2, 0.25) {\\tiny x};");

        let styled = DrawStatement::text(
            2.0,
            0.65,
            "3",
            TextStyle::tiny().circled("red").anchored("east"),
        );
        assert_eq!(
            styled.to_string(),
            "\\node [circle, draw=red, inner sep=0.5pt, anchor=east] at(2, 0.65) {\\tiny 3};"
        );
        assert_eq!(styled.text_content(), Some("3"));

        let colored = DrawStatement::text(
            0.0,
            0.0,
            "io",
            TextStyle::tiny().anchored("east").colored("blue"),
        );
        assert_eq!(
            colored.to_string(),
            "\\node [anchor=east, text=blue] at(0, 0) {\\tiny io};"
        );
    }

    #[test]
    fn test_arrow_formats() {
        let down = DrawStatement::Arrow {
            x: 0.0,
            row: 0,
            direction: ArrowDirection::Down,
        };
        assert_eq!(down.to_string(), "\\draw [->] (0, 0 + 0.75) -- (0, 0);");

        let up = DrawStatement::Arrow {
            x: 3.5,
            row: 2,
            direction: ArrowDirection::Up,
        };
        assert_eq!(up.to_string(), "\\draw [<-] (3.5, 2 + 0.75) -- (3.5, 2);");
    }

    #[test]
    fn test_tick_format() {
        let tick = DrawStatement::Tick {
            x: 1.0,
            from_y: 0.75,
            to_y: 0.5,
            color: "red".into(),
        };
        assert_eq!(tick.to_string(), "\\draw [->, draw=red] (1, 0.75) -- (1, 0.5);");
    }
}
