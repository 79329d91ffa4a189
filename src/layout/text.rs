use crate::canvas::{Canvas, FontMetrics};
use crate::colour::Colour;
use crate::error::TableError;
use crate::units::Pt;
use std::str::FromStr;

/// Horizontal alignment of wrapped text within its box
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
    /// Stretch the spaces between words so each line fills the box, except for the
    /// last line of the block and lines with a single word
    Justify,
}

impl FromStr for Align {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            "center" | "centre" | "middle" => Ok(Align::Center),
            "justify" => Ok(Align::Justify),
            _ => Err(TableError::InvalidAlignment(s.to_string())),
        }
    }
}

/// A fully resolved text style: which font, how big, what colour and how lines of it
/// are arranged
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle<F> {
    pub font: F,
    pub size: Pt,
    pub colour: Colour,
    pub align: Align,
    /// Extra space added below every line, on top of the font's own line height
    pub line_spacing: Pt,
}

impl<F: Copy> TextStyle<F> {
    /// Width function for [wrap_text] and [measure_text] that measures in this style
    pub fn measure_with<'m, M: FontMetrics<F>>(&self, metrics: &'m M) -> impl Fn(&str) -> Pt + Clone + 'm
    where
        F: 'm,
    {
        let (font, size) = (self.font, self.size);
        move |text: &str| metrics.width_of_text(font, text, size)
    }

    /// Distance from the top of one line to the top of the next
    pub fn line_advance<M: FontMetrics<F>>(&self, metrics: &M) -> Pt {
        metrics.line_height(self.font, self.size) + self.line_spacing
    }

    /// Height taken up by `line_count` lines of text in this style
    pub fn block_height<M: FontMetrics<F>>(&self, metrics: &M, line_count: usize) -> Pt {
        self.line_advance(metrics) * line_count as f32
    }
}

/// One line of wrapped text. The words are borrowed from the text that was wrapped;
/// joining them with single spaces gives the line as it should be drawn.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WrapLine<'a> {
    pub words: Vec<&'a str>,
    /// Width of each word, in the same order as `words`
    pub word_widths: Vec<Pt>,
    /// Width of the words plus the single spaces between them
    pub width: Pt,
}

impl WrapLine<'_> {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Spaces break words apart, no-break spaces don't
fn is_break(ch: char) -> bool {
    ch.is_whitespace() && ch != '\u{A0}'
}

fn not_empty(word: &&str) -> bool {
    !word.is_empty()
}

type Words<'a> = std::iter::Filter<std::str::Split<'a, fn(char) -> bool>, fn(&&'a str) -> bool>;

fn words_of<'a>(paragraph: &'a str) -> Words<'a> {
    paragraph
        .split(is_break as fn(char) -> bool)
        .filter(not_empty as fn(&&'a str) -> bool)
}

/// Lazily wrapped lines of text, produced by [wrap_text]. Clone it before iterating
/// to walk the same lines more than once.
#[derive(Clone)]
pub struct WrappedLines<'a, W> {
    paragraphs: std::str::Split<'a, char>,
    words: Option<Words<'a>>,
    /// a word that was measured but didn't fit on the previous line
    carry: Option<(&'a str, Pt)>,
    /// whether the current paragraph has produced a line yet
    emitted: bool,
    max_width: Pt,
    space_width: Pt,
    width_of: W,
}

/// Greedily wraps `text` into lines no wider than `max_width`.
///
/// The text is first split into paragraphs at newlines, then into words at
/// whitespace. Words are added to the current line for as long as they fit (counting a
/// single space between words); a word that doesn't fit starts the next line. A word
/// that is wider than `max_width` on its own is never split: it gets a line to itself
/// and overflows. Each empty paragraph produces one empty line so blank lines keep
/// their height.
///
/// `width_of` measures a single word (and a single space), usually through
/// [TextStyle::measure_with].
pub fn wrap_text<'a, W>(text: &'a str, max_width: Pt, width_of: W) -> WrappedLines<'a, W>
where
    W: Fn(&str) -> Pt,
{
    let space_width = width_of(" ");
    WrappedLines {
        paragraphs: text.split('\n'),
        words: None,
        carry: None,
        emitted: false,
        max_width,
        space_width,
        width_of,
    }
}

impl<'a, W> WrappedLines<'a, W>
where
    W: Fn(&str) -> Pt,
{
    fn fill_line(&mut self) -> WrapLine<'a> {
        let mut line = WrapLine::default();
        let Some(words) = self.words.as_mut() else {
            return line;
        };

        // running width includes a trailing space after every placed word
        let mut running = Pt::ZERO;
        loop {
            let next = match self.carry.take() {
                Some(carried) => Some(carried),
                None => words.next().map(|word| (word, (self.width_of)(word))),
            };
            let Some((word, width)) = next else {
                break;
            };

            let overlong = width > self.max_width;
            if !line.is_empty() && (overlong || running + width > self.max_width) {
                self.carry = Some((word, width));
                break;
            }

            line.words.push(word);
            line.word_widths.push(width);
            running += width + self.space_width;

            if overlong {
                break;
            }
        }

        if !line.is_empty() {
            line.width = running - self.space_width;
        }
        line
    }
}

impl<'a, W> Iterator for WrappedLines<'a, W>
where
    W: Fn(&str) -> Pt,
{
    type Item = WrapLine<'a>;

    fn next(&mut self) -> Option<WrapLine<'a>> {
        loop {
            if self.words.is_none() {
                let paragraph = self.paragraphs.next()?;
                let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
                self.words = Some(words_of(paragraph));
                self.emitted = false;
            }

            let line = self.fill_line();
            if !line.is_empty() {
                self.emitted = true;
                return Some(line);
            }

            // out of words for this paragraph
            self.words = None;
            if !self.emitted {
                return Some(line);
            }
        }
    }
}

/// The two widths that bound how narrow or wide a piece of text can sensibly be laid out
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct TextExtents {
    /// Width of the widest paragraph set on a single line
    pub natural: Pt,
    /// Width of the widest single word, in any paragraph. Narrower than this and a
    /// word has to overflow.
    pub narrowest: Pt,
}

/// Measure the [TextExtents] of `text`, with words split the same way [wrap_text]
/// splits them
pub fn measure_text<W>(text: &str, width_of: W) -> TextExtents
where
    W: Fn(&str) -> Pt,
{
    let space_width = width_of(" ");
    let mut extents = TextExtents::default();

    for paragraph in text.split('\n') {
        let mut line = Pt::ZERO;
        let mut count = 0usize;
        for word in words_of(paragraph.strip_suffix('\r').unwrap_or(paragraph)) {
            let width = width_of(word);
            extents.narrowest = extents.narrowest.max(width);
            line += width;
            count += 1;
        }
        if count > 1 {
            line += space_width * (count - 1) as f32;
        }
        extents.natural = extents.natural.max(line);
    }

    extents
}

/// Draws already wrapped lines onto a canvas, top line first.
///
/// `origin` is the top-left corner of the block and `width` the width the lines are
/// aligned within. Each line sits `style.line_advance()` below the previous one with
/// its baseline one ascent below its top. Empty lines are skipped but still take up
/// their space.
pub fn draw_text_block<F, M, C>(
    canvas: &mut C,
    metrics: &M,
    lines: &[WrapLine<'_>],
    origin: (Pt, Pt),
    width: Pt,
    style: &TextStyle<F>,
) where
    F: Copy,
    M: FontMetrics<F>,
    C: Canvas<F>,
{
    let advance = style.line_advance(metrics);
    let ascent = metrics.ascent(style.font, style.size);
    let last = lines.len().saturating_sub(1);

    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = origin.1 + advance * index as f32 + ascent;

        if style.align == Align::Justify && line.words.len() >= 2 && index != last {
            let words_width: Pt = line.word_widths.iter().copied().sum();
            let gap = (width - words_width) / (line.words.len() - 1) as f32;
            let mut x = origin.0;
            for (word, word_width) in line.words.iter().zip(line.word_widths.iter()) {
                canvas.draw_text(word, (x, y), style.font, style.size, style.colour);
                x += *word_width + gap;
            }
            continue;
        }

        let offset = match style.align {
            Align::Right => width - line.width,
            Align::Center => (width - line.width) / 2.0,
            Align::Left | Align::Justify => Pt::ZERO,
        };
        canvas.draw_text(
            &line.text(),
            (origin.0 + offset, y),
            style.font,
            style.size,
            style.colour,
        );
    }
}
