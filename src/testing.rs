//! Font metrics for unit tests that make widths easy to work out by hand.

use crate::canvas::FontMetrics;
use crate::units::Pt;

/// Every character is half the font size wide, lines are exactly the font size tall
/// and the baseline sits three quarters of the way down a line. Font handles are
/// ignored.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct FixedMetrics;

impl<F> FontMetrics<F> for FixedMetrics {
    fn width_of_text(&self, _font: F, text: &str, size: Pt) -> Pt {
        size * 0.5 * text.chars().count() as f32
    }

    fn line_height(&self, _font: F, size: Pt) -> Pt {
        size
    }

    fn ascent(&self, _font: F, size: Pt) -> Pt {
        size * 0.75
    }
}
