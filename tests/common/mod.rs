use pdf_table::layout::Margins;
use pdf_table::table::Cell;
use pdf_table::{FontMetrics, Page, PageContents, Pt};

/// A monospaced font: every character is half as wide as the font is tall, lines are
/// as tall as the font and the baseline sits at 80% of the line
pub struct Mono;

impl FontMetrics<u8> for Mono {
    fn width_of_text(&self, _font: u8, text: &str, size: Pt) -> Pt {
        size * 0.5 * text.chars().count() as f32
    }

    fn line_height(&self, _font: u8, size: Pt) -> Pt {
        size
    }

    fn ascent(&self, _font: u8, size: Pt) -> Pt {
        size * 0.8
    }
}

pub fn page(width: f32, height: f32) -> Page<u8> {
    Page::new((Pt(width), Pt(height)), Some(Margins::all(Pt(36.0))))
}

pub fn cells(texts: &[&str]) -> Vec<Cell> {
    texts
        .iter()
        .map(|&t| if t == "<" { Cell::Spanned } else { Cell::from(t) })
        .collect()
}

pub fn texts(page: &Page<u8>) -> Vec<String> {
    page.spans().map(|span| span.text.clone()).collect()
}

/// Vertical lines on the page as (x, top, bottom)
#[allow(dead_code)]
pub fn vertical_lines(page: &Page<u8>) -> Vec<(Pt, Pt, Pt)> {
    page.contents
        .iter()
        .filter_map(|content| match content {
            PageContents::Line { from, to, .. } if from.0 == to.0 => Some((from.0, from.1, to.1)),
            _ => None,
        })
        .collect()
}
