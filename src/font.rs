use crate::{canvas::FontMetrics, error::TableError, units::Pt};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};

/// A parsed font object. Fonts can be TTF or OTF fonts. Only their metrics are used
/// here: advance widths to measure text and vertical metrics to space lines.
///
/// Fonts are normally added to a [FontBook] and referred to by their [FontId]
/// everywhere else.
pub struct Font {
    pub face: OwnedFace,
}

/// Handle of a font stored in a [FontBook]
pub type FontId = Id<Font>;

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TableError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / Pt(self.face.as_face_ref().units_per_em() as f32)
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().line_gap() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// Calculate the width of a given string of text at the given font size. Characters
    /// that the font has no glyph for take up no space.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| self.glyph_id(ch))
            .map(|gid| {
                scaling
                    * self
                        .face
                        .as_face_ref()
                        .glyph_hor_advance(GlyphId(gid))
                        .unwrap_or_default() as f32
            })
            .sum()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }
}

/// Owns every [Font] used to lay out and render pages. Fonts are stored "globally"
/// within the book so any table or page can refer to them by [FontId].
#[derive(Default)]
pub struct FontBook {
    pub fonts: Arena<Font>,
}

impl FontBook {
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// Add a font to the book, returning the id to refer to it by
    pub fn add_font(&mut self, font: Font) -> FontId {
        self.fonts.alloc(font)
    }

    pub fn get(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id)
    }
}

/// Measuring with a [FontId] that belongs to another book panics; tables check their
/// fonts with [FontMetrics::has_font] first.
impl FontMetrics<FontId> for FontBook {
    fn has_font(&self, font: FontId) -> bool {
        self.fonts.get(font).is_some()
    }

    fn width_of_text(&self, font: FontId, text: &str, size: Pt) -> Pt {
        self.fonts[font].width_of_text(text, size)
    }

    fn line_height(&self, font: FontId, size: Pt) -> Pt {
        self.fonts[font].line_height(size)
    }

    fn ascent(&self, font: FontId, size: Pt) -> Pt {
        self.fonts[font].ascent(size)
    }
}
