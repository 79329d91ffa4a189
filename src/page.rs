use crate::canvas::{Canvas, ShapeStyle};
use crate::colour::Colour;
use crate::error::TableError;
use crate::font::{FontBook, FontId};
use crate::layout::Margins;
use crate::rect::Rect;
use crate::units::*;
use pdf_writer::{Content, Name, Str};

/// Page dimensions as (width, height) in points
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const A4: PageSize = (Pt(595.0), Pt(842.0));
pub const A5: PageSize = (Pt(420.0), Pt(595.0));

/// A font at a particular size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont<F = FontId> {
    pub id: F,
    pub size: Pt,
}

/// A single run of text placed on a page
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout<F = FontId> {
    pub text: String,
    pub font: SpanFont<F>,
    pub colour: Colour,
    /// Start of the baseline, in canvas space (from the top-left of the page)
    pub coords: (Pt, Pt),
}

/// Everything that can be placed on a [Page]
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents<F = FontId> {
    Text(SpanLayout<F>),
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
        width: Pt,
    },
    Rectangle {
        rect: Rect,
        style: ShapeStyle,
        radius: Pt,
    },
}

/// A single page. Drawing onto it only records what was drawn, in order; the page is
/// turned into a PDF content stream by [Page::render].
#[derive(Clone, Debug)]
pub struct Page<F = FontId> {
    /// The size of the page, in PDF space
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins, in PDF space
    pub content_box: Rect,
    pub margins: Margins,
    /// The laid out contents, in drawing order
    pub contents: Vec<PageContents<F>>,
}

impl<F> Page<F> {
    /// Create a new page with the given size and margins. No margins means the content
    /// box covers the whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page<F> {
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect::new(Pt(0.0), Pt(0.0), size.0, size.1),
            content_box: Rect::new(
                margins.left,
                margins.bottom,
                size.0 - margins.right,
                size.1 - margins.top,
            ),
            margins,
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout<F>) {
        self.contents.push(PageContents::Text(span));
    }

    /// Iterate over the text runs on the page
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout<F>> {
        self.contents.iter().filter_map(|content| match content {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl<F: Copy> Canvas<F> for Page<F> {
    fn width(&self) -> Pt {
        self.media_box.width()
    }

    fn height(&self) -> Pt {
        self.media_box.height()
    }

    fn margins(&self) -> &Margins {
        &self.margins
    }

    fn draw_text(&mut self, text: &str, baseline: (Pt, Pt), font: F, size: Pt, colour: Colour) {
        self.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont { id: font, size },
            colour,
            coords: baseline,
        });
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), colour: Colour, width: Pt) {
        self.contents.push(PageContents::Line {
            from,
            to,
            colour,
            width,
        });
    }

    fn draw_rectangle(&mut self, rect: Rect, style: ShapeStyle, corner_radius: Pt) {
        self.contents.push(PageContents::Rectangle {
            rect,
            style,
            radius: corner_radius,
        });
    }

    fn new_page_like(&self) -> Page<F> {
        Page {
            media_box: self.media_box,
            content_box: self.content_box,
            margins: self.margins.clone(),
            contents: Vec::default(),
        }
    }
}

/// Bezier control point distance for approximating a quarter circle
const KAPPA: f32 = 0.552_284_8;

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

/// Adds a (possibly rounded) rectangle path. Coordinates are in PDF space.
fn rectangle_path(content: &mut Content, left: f32, bottom: f32, width: f32, height: f32, radius: f32) {
    let radius = radius.min(width / 2.0).min(height / 2.0);
    if radius <= 0.0 {
        content.rect(left, bottom, width, height);
        return;
    }

    let (right, top) = (left + width, bottom + height);
    let k = radius * KAPPA;
    content.move_to(left + radius, bottom);
    content.line_to(right - radius, bottom);
    content.cubic_to(right - radius + k, bottom, right, bottom + radius - k, right, bottom + radius);
    content.line_to(right, top - radius);
    content.cubic_to(right, top - radius + k, right - radius + k, top, right - radius, top);
    content.line_to(left + radius, top);
    content.cubic_to(left + radius - k, top, left, top - radius + k, left, top - radius);
    content.line_to(left, bottom + radius);
    content.cubic_to(left, bottom + radius - k, left + radius - k, bottom, left + radius, bottom);
    content.close_path();
}

impl Page<FontId> {
    /// Render the page contents into a PDF content stream. Fonts are referred to by
    /// resource names of the form `/F{index}`, where the index is the font's index in
    /// the font book. Text is written as two byte glyph ids, so fonts should be embedded
    /// with an identity encoding.
    pub fn render(&self, fonts: &FontBook) -> Result<Vec<u8>, TableError> {
        let mut content = Content::new();
        let height = *self.media_box.height();

        for page_content in self.contents.iter() {
            match page_content {
                PageContents::Text(span) => {
                    let font = fonts
                        .get(span.font.id)
                        .ok_or(TableError::UnknownFont(span.font.id.index()))?;
                    let mut glyphs: Vec<u8> = Vec::with_capacity(span.text.len() * 2);
                    for ch in span.text.chars() {
                        // fall back to .notdef when there's no replacement glyph either
                        let gid = font
                            .glyph_id(ch)
                            .or_else(|| font.replacement_glyph_id())
                            .unwrap_or_default();
                        glyphs.extend_from_slice(&gid.to_be_bytes());
                    }

                    let name = format!("F{}", span.font.id.index());
                    content.save_state();
                    set_fill(&mut content, span.colour);
                    content.begin_text();
                    content.set_font(Name(name.as_bytes()), *span.font.size);
                    content.next_line(*span.coords.0, height - *span.coords.1);
                    content.show(Str(&glyphs));
                    content.end_text();
                    content.restore_state();
                }
                PageContents::Line {
                    from,
                    to,
                    colour,
                    width,
                } => {
                    content.save_state();
                    set_stroke(&mut content, *colour);
                    content.set_line_width(**width);
                    content.move_to(*from.0, height - *from.1);
                    content.line_to(*to.0, height - *to.1);
                    content.stroke();
                    content.restore_state();
                }
                PageContents::Rectangle {
                    rect,
                    style,
                    radius,
                } => {
                    let r = rect.normalized();
                    content.save_state();
                    let path = |content: &mut Content| {
                        rectangle_path(
                            content,
                            *r.x1,
                            height - *r.y2,
                            *r.width(),
                            *r.height(),
                            **radius,
                        )
                    };
                    match *style {
                        ShapeStyle::Fill(colour) => {
                            set_fill(&mut content, colour);
                            path(&mut content);
                            content.fill_nonzero();
                        }
                        ShapeStyle::Stroke { colour, width } => {
                            set_stroke(&mut content, colour);
                            content.set_line_width(*width);
                            path(&mut content);
                            content.stroke();
                        }
                        ShapeStyle::FillAndStroke {
                            fill,
                            stroke,
                            width,
                        } => {
                            set_fill(&mut content, fill);
                            set_stroke(&mut content, stroke);
                            content.set_line_width(*width);
                            path(&mut content);
                            content.fill_nonzero_and_stroke();
                        }
                    }
                    content.restore_state();
                }
            }
        }

        Ok(content.finish().to_vec())
    }
}
