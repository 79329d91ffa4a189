//! The two collaborators table layout is written against: something to measure
//! text with ([FontMetrics]) and something to draw on ([Canvas]).
//!
//! Both are generic over the font handle `F`, so the layout code never needs to know
//! what a font actually is. [FontBook](crate::FontBook) and [Page](crate::Page)
//! implement them for real TrueType/OpenType fonts; tests implement them with simple
//! fixed-advance fonts.

use crate::colour::Colour;
use crate::layout::Margins;
use crate::rect::Rect;
use crate::units::Pt;

/// Measures text set in a given font. Implementations are expected to be pure: the
/// same question always gets the same answer.
pub trait FontMetrics<F> {
    /// The advance width of `text` set on a single line, ignoring any newlines
    fn width_of_text(&self, font: F, text: &str, size: Pt) -> Pt;

    /// How far apart consecutive baselines are for the font at the given size
    fn line_height(&self, font: F, size: Pt) -> Pt;

    /// Distance from the top of a line to its baseline
    fn ascent(&self, font: F, size: Pt) -> Pt;

    /// Whether `font` can be measured at all. Tables check every font they resolve
    /// before measuring anything.
    fn has_font(&self, _font: F) -> bool {
        true
    }
}

/// How a rectangle is painted
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeStyle {
    Fill(Colour),
    Stroke {
        colour: Colour,
        width: Pt,
    },
    FillAndStroke {
        fill: Colour,
        stroke: Colour,
        width: Pt,
    },
}

/// A page that can be drawn on.
///
/// All coordinates are in points with the origin at the top-left corner of the page
/// and y growing downwards, which is the direction tables flow in. Implementations
/// convert to whatever their output needs.
pub trait Canvas<F> {
    /// Full width of the page
    fn width(&self) -> Pt;

    /// Full height of the page
    fn height(&self) -> Pt;

    fn margins(&self) -> &Margins;

    /// Draw a single run of text with its baseline starting at `baseline`
    fn draw_text(&mut self, text: &str, baseline: (Pt, Pt), font: F, size: Pt, colour: Colour);

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), colour: Colour, width: Pt);

    /// Draw a rectangle, with rounded corners if `corner_radius` is positive
    fn draw_rectangle(&mut self, rect: Rect, style: ShapeStyle, corner_radius: Pt);

    /// Create a blank page with the same size and margins as this one
    fn new_page_like(&self) -> Self
    where
        Self: Sized;
}
