//! Tables that lay themselves out across as many pages as they need.
//!
//! A [Table] is plain data: rows of [Cell]s plus the options that say how to draw
//! them. Column widths are balanced automatically against the available width (see
//! [ColumnWidthSolver]), cell text is wrapped to fit its column, and rows that don't
//! fit at the bottom of a page move to a new page, with the header repeated above
//! them.
//!
//! ```
//! use pdf_table::table::{Cell, Table, TableWidth};
//! use pdf_table::{FontMetrics, Page, Pt};
//!
//! // a monospaced font: every character is half as wide as the font is tall
//! struct Mono;
//! impl FontMetrics<u8> for Mono {
//!     fn width_of_text(&self, _font: u8, text: &str, size: Pt) -> Pt {
//!         size * 0.5 * text.chars().count() as f32
//!     }
//!     fn line_height(&self, _font: u8, size: Pt) -> Pt {
//!         size
//!     }
//!     fn ascent(&self, _font: u8, size: Pt) -> Pt {
//!         size * 0.8
//!     }
//! }
//!
//! let mut table = Table::new(vec![
//!     vec![Cell::from("Item"), Cell::from("Qty")],
//!     vec![Cell::from("Apples"), Cell::from("3")],
//!     vec![Cell::from("Pears"), Cell::from("12")],
//! ]);
//! table.font(0).header_row();
//!
//! let page: Page<u8> = Page::new(pdf_table::A4, None);
//! let result = table
//!     .render(&Mono, page, (Pt(36.0), Pt(36.0)), TableWidth::Auto)
//!     .unwrap();
//! assert!(!result.is_multi_page());
//! assert!(result.total_height > Pt(0.0));
//! ```

mod columns;
mod render;

pub use columns::*;
pub use render::*;

use crate::colour::{colours, Colour};
use crate::error::TableError;
use crate::layout::{Align, TextStyle};
use crate::units::Pt;
use std::collections::{HashMap, HashSet};

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Merges this position into the nearest text cell to its left in the same row.
    /// The first cell of a row can't be spanned.
    Spanned,
}

impl Cell {
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text.as_str()),
            Cell::Spanned => None,
        }
    }

    pub fn is_spanned(&self) -> bool {
        matches!(self, Cell::Spanned)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

/// One cell per column; every row of a table has the same length
pub type Row = Vec<Cell>;

/// The font, size and colour text is drawn with when nothing overrides them
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle<F> {
    /// With no font set, text can't be drawn; the header falls back to the text font
    pub font: Option<F>,
    pub size: Pt,
    pub colour: Colour,
}

impl<F> Default for FontStyle<F> {
    fn default() -> Self {
        FontStyle {
            font: None,
            size: Pt(8.0),
            colour: colours::BLACK,
        }
    }
}

/// Overrides part of the style of a cell, a row or a column. Unset fields fall through
/// to the next, less specific, level: cell, then row, then column, then the table.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOverride<F> {
    pub font: Option<F>,
    pub size: Option<Pt>,
    pub colour: Option<Colour>,
    pub align: Option<Align>,
}

impl<F> Default for StyleOverride<F> {
    fn default() -> Self {
        StyleOverride {
            font: None,
            size: None,
            colour: None,
            align: None,
        }
    }
}

impl<F> StyleOverride<F> {
    pub fn new() -> Self {
        StyleOverride::default()
    }

    pub fn font(mut self, font: F) -> Self {
        self.font = Some(font);
        self
    }

    pub fn size<S: Into<Pt>>(mut self, size: S) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

/// Per-column options
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOptions<F> {
    /// Fixed width of the column's text, excluding padding. The column isn't measured
    /// and never grows or shrinks.
    pub width: Option<Pt>,
    pub style: StyleOverride<F>,
    /// Alignment of the column's header cell. Falls back to the column's alignment.
    pub header_align: Option<Align>,
}

impl<F> Default for ColumnOptions<F> {
    fn default() -> Self {
        ColumnOptions {
            width: None,
            style: StyleOverride::default(),
            header_align: None,
        }
    }
}

/// Row 0 of a table with a header is drawn in the header style, and a header row is
/// drawn again at the top of every continuation page
#[derive(Debug, Clone, PartialEq)]
pub struct Header<F> {
    pub style: FontStyle<F>,
    /// The row redrawn on continuation pages
    pub repeat_row: usize,
}

impl<F> Default for Header<F> {
    fn default() -> Self {
        Header {
            style: FontStyle::default(),
            repeat_row: 0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    pub width: Pt,
    pub colour: Colour,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            width: Pt(1.0),
            colour: colours::BLACK,
        }
    }
}

/// Lines drawn between rows and between columns
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    /// Separators between rows
    pub horizontal: bool,
    /// Lines between columns
    pub vertical: bool,
    pub line: LineStyle,
    /// Rows whose separator does the opposite of `horizontal`
    pub toggled_rows: HashSet<usize>,
}

impl Default for GridLines {
    fn default() -> Self {
        GridLines {
            horizontal: true,
            vertical: false,
            line: LineStyle::default(),
            toggled_rows: HashSet::default(),
        }
    }
}

impl GridLines {
    /// Whether a separator belongs above `row`, assuming there's a row above it
    pub fn separates(&self, row: usize) -> bool {
        self.horizontal ^ self.toggled_rows.contains(&row)
    }
}

/// The box around the whole table
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Border {
    pub line: LineStyle,
    pub radius: Pt,
}

/// Space between cell edges and cell text
#[derive(Debug, Clone, PartialEq)]
pub struct Padding {
    pub horizontal: Pt,
    pub vertical: Pt,
    /// Vertical padding of individual rows
    pub rows: HashMap<usize, Pt>,
}

impl Default for Padding {
    fn default() -> Self {
        Padding {
            horizontal: Pt(3.0),
            vertical: Pt(2.0),
            rows: HashMap::default(),
        }
    }
}

impl Padding {
    pub fn vertical_for(&self, row: usize) -> Pt {
        self.rows.get(&row).copied().unwrap_or(self.vertical)
    }
}

/// What to do when the columns can't shrink to fit the table width
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum OverConstrainedPolicy {
    /// Fail with [TableError::OverConstrainedLayout]
    #[default]
    Error,
    /// Draw the table anyway, wider than requested, and log a warning
    Warn,
}

/// A table and everything about how it's drawn. `F` is the font handle type of the
/// [FontMetrics](crate::FontMetrics) and [Canvas](crate::Canvas) it's rendered with.
#[derive(Debug, Clone)]
pub struct Table<F> {
    pub rows: Vec<Row>,
    /// Options for each column; may be shorter than the number of columns
    pub columns: Vec<ColumnOptions<F>>,
    pub text: FontStyle<F>,
    pub header: Option<Header<F>>,
    pub row_styles: HashMap<usize, StyleOverride<F>>,
    /// Styles of individual cells, keyed by (row, column)
    pub cell_styles: HashMap<(usize, usize), StyleOverride<F>>,
    pub grid: GridLines,
    pub border: Option<Border>,
    pub padding: Padding,
    /// Extra space between lines of text within a cell
    pub line_spacing: Pt,
    /// Where the table starts on continuation pages. Defaults to the page's top margin.
    pub margin_top: Option<Pt>,
    /// How close to the bottom of a page rows may go. Defaults to the page's bottom
    /// margin.
    pub margin_bottom: Option<Pt>,
    pub over_constrained: OverConstrainedPolicy,
}

impl<F> Table<F> {
    pub fn new(rows: Vec<Row>) -> Table<F> {
        Table {
            rows,
            columns: Vec::default(),
            text: FontStyle::default(),
            header: None,
            row_styles: HashMap::default(),
            cell_styles: HashMap::default(),
            grid: GridLines::default(),
            border: Some(Border::default()),
            padding: Padding::default(),
            line_spacing: Pt(1.0),
            margin_top: None,
            margin_bottom: None,
            over_constrained: OverConstrainedPolicy::default(),
        }
    }

    /// Number of columns, taken from the first row
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or_default()
    }

    fn column_mut(&mut self, column: usize) -> &mut ColumnOptions<F> {
        if self.columns.len() <= column {
            self.columns.resize_with(column + 1, ColumnOptions::default);
        }
        &mut self.columns[column]
    }

    /// Set the default font for all text, modifying `self`
    pub fn font(&mut self, font: F) -> &mut Self {
        self.text.font = Some(font);
        self
    }

    /// Set the default text size, modifying `self`
    pub fn text_size<S: Into<Pt>>(&mut self, size: S) -> &mut Self {
        self.text.size = size.into();
        self
    }

    /// Set the default text colour, modifying `self`
    pub fn text_colour(&mut self, colour: Colour) -> &mut Self {
        self.text.colour = colour;
        self
    }

    /// Treat row 0 as a header, drawn in the given style and repeated on every page
    pub fn header(&mut self, header: Header<F>) -> &mut Self {
        self.header = Some(header);
        self
    }

    /// Treat row 0 as a header with the default header style
    pub fn header_row(&mut self) -> &mut Self {
        self.header(Header::default())
    }

    pub fn no_header(&mut self) -> &mut Self {
        self.header = None;
        self
    }

    /// Fix the width of a column's text, excluding its padding
    pub fn column_width<W: Into<Pt>>(&mut self, column: usize, width: W) -> &mut Self {
        self.column_mut(column).width = Some(width.into());
        self
    }

    pub fn column_align(&mut self, column: usize, align: Align) -> &mut Self {
        self.column_mut(column).style.align = Some(align);
        self
    }

    pub fn header_align(&mut self, column: usize, align: Align) -> &mut Self {
        self.column_mut(column).header_align = Some(align);
        self
    }

    pub fn column_style(&mut self, column: usize, style: StyleOverride<F>) -> &mut Self {
        self.column_mut(column).style = style;
        self
    }

    pub fn row_style(&mut self, row: usize, style: StyleOverride<F>) -> &mut Self {
        self.row_styles.insert(row, style);
        self
    }

    pub fn cell_style(&mut self, row: usize, column: usize, style: StyleOverride<F>) -> &mut Self {
        self.cell_styles.insert((row, column), style);
        self
    }

    /// Turn the separators between rows and the lines between columns on or off
    pub fn grid(&mut self, horizontal: bool, vertical: bool) -> &mut Self {
        self.grid.horizontal = horizontal;
        self.grid.vertical = vertical;
        self
    }

    pub fn grid_line(&mut self, line: LineStyle) -> &mut Self {
        self.grid.line = line;
        self
    }

    /// Flip whether a separator is drawn above the given row
    pub fn toggle_separator(&mut self, row: usize) -> &mut Self {
        if !self.grid.toggled_rows.insert(row) {
            self.grid.toggled_rows.remove(&row);
        }
        self
    }

    pub fn border(&mut self, border: Option<Border>) -> &mut Self {
        self.border = border;
        self
    }

    pub fn padding<H: Into<Pt>, V: Into<Pt>>(&mut self, horizontal: H, vertical: V) -> &mut Self {
        self.padding.horizontal = horizontal.into();
        self.padding.vertical = vertical.into();
        self
    }

    pub fn row_padding<V: Into<Pt>>(&mut self, row: usize, vertical: V) -> &mut Self {
        self.padding.rows.insert(row, vertical.into());
        self
    }

    pub fn line_spacing<S: Into<Pt>>(&mut self, spacing: S) -> &mut Self {
        self.line_spacing = spacing.into();
        self
    }

    /// Set where the table starts and stops on continuation pages, instead of the
    /// page margins
    pub fn margins<T: Into<Pt>, B: Into<Pt>>(&mut self, top: T, bottom: B) -> &mut Self {
        self.margin_top = Some(top.into());
        self.margin_bottom = Some(bottom.into());
        self
    }

    pub fn over_constrained_policy(&mut self, policy: OverConstrainedPolicy) -> &mut Self {
        self.over_constrained = policy;
        self
    }

    /// Remove columns from every row, along with their options and any cell styles
    /// that apply to them. Cells of later columns move left. If a row is left starting
    /// with a spanned cell, that cell becomes empty text.
    pub fn remove_columns(&mut self, columns: &[usize]) -> &mut Self {
        let mut removed: Vec<usize> = columns.to_vec();
        removed.sort_unstable();
        removed.dedup();

        for &column in removed.iter().rev() {
            for row in self.rows.iter_mut() {
                if column < row.len() {
                    row.remove(column);
                }
            }
            if column < self.columns.len() {
                self.columns.remove(column);
            }
        }

        let shift = |column: usize| column - removed.iter().take_while(|&&r| r < column).count();
        self.cell_styles = std::mem::take(&mut self.cell_styles)
            .into_iter()
            .filter(|((_, column), _)| removed.binary_search(column).is_err())
            .map(|((row, column), style)| ((row, shift(column)), style))
            .collect();

        for row in self.rows.iter_mut() {
            if let Some(first) = row.first_mut() {
                if first.is_spanned() {
                    *first = Cell::Text(String::new());
                }
            }
        }

        self
    }
}

impl<F: Copy> Table<F> {
    fn column(&self, column: usize) -> Option<&ColumnOptions<F>> {
        self.columns.get(column)
    }

    /// Style of a body cell: cell, then row, then column overrides, then the table
    /// defaults
    pub(crate) fn body_style(&self, row: usize, column: usize) -> Result<TextStyle<F>, TableError> {
        let levels = [
            self.cell_styles.get(&(row, column)),
            self.row_styles.get(&row),
            self.column(column).map(|c| &c.style),
        ];
        let overrides = || levels.iter().flatten();

        let font = overrides()
            .find_map(|s| s.font)
            .or(self.text.font)
            .ok_or(TableError::MissingFont { row, column })?;
        let size = overrides().find_map(|s| s.size).unwrap_or(self.text.size);
        let colour = overrides().find_map(|s| s.colour).unwrap_or(self.text.colour);
        let align = overrides().find_map(|s| s.align).unwrap_or_default();

        checked_style(row, column, font, size, colour, align, self.line_spacing)
    }

    /// Style of a cell drawn as part of the header
    pub(crate) fn header_style(&self, header: &Header<F>, row: usize, column: usize) -> Result<TextStyle<F>, TableError> {
        let font = header
            .style
            .font
            .or(self.text.font)
            .ok_or(TableError::MissingFont { row, column })?;
        let align = self
            .column(column)
            .and_then(|c| c.header_align.or(c.style.align))
            .unwrap_or_default();

        checked_style(
            row,
            column,
            font,
            header.style.size,
            header.style.colour,
            align,
            self.line_spacing,
        )
    }
}

fn checked_style<F>(
    row: usize,
    column: usize,
    font: F,
    size: Pt,
    colour: Colour,
    align: Align,
    line_spacing: Pt,
) -> Result<TextStyle<F>, TableError> {
    if !size.is_finite() || size <= Pt(0.0) {
        return Err(TableError::MissingStyle { row, column, size });
    }
    Ok(TextStyle {
        font,
        size,
        colour,
        align,
        line_spacing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells
            .iter()
            .map(|&c| if c == "<" { Cell::Spanned } else { Cell::from(c) })
            .collect()
    }

    #[test]
    fn test_defaults() {
        let table: Table<u8> = Table::new(vec![row(&["a", "b"])]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.text.size, Pt(8.0));
        assert!(table.grid.horizontal);
        assert!(!table.grid.vertical);
        assert_eq!(table.border.map(|b| b.line.width), Some(Pt(1.0)));
        assert_eq!(table.padding.horizontal, Pt(3.0));
        assert_eq!(table.padding.vertical, Pt(2.0));
        assert_eq!(table.line_spacing, Pt(1.0));
        assert_eq!(table.over_constrained, OverConstrainedPolicy::Error);
        assert!(table.header.is_none());
    }

    #[test]
    fn test_style_resolution_order() {
        let mut table: Table<u8> = Table::new(vec![row(&["a", "b"]), row(&["c", "d"])]);
        table
            .font(1)
            .text_size(Pt(9.0))
            .column_style(1, StyleOverride::new().size(Pt(11.0)).align(Align::Right))
            .row_style(1, StyleOverride::new().font(2).size(Pt(12.0)))
            .cell_style(1, 1, StyleOverride::new().colour(colours::GREY));

        let style = table.body_style(0, 0).unwrap();
        assert_eq!((style.font, style.size, style.align), (1, Pt(9.0), Align::Left));

        let style = table.body_style(0, 1).unwrap();
        assert_eq!((style.font, style.size, style.align), (1, Pt(11.0), Align::Right));

        let style = table.body_style(1, 1).unwrap();
        assert_eq!(style.font, 2);
        assert_eq!(style.size, Pt(12.0));
        assert_eq!(style.colour, colours::GREY);
        assert_eq!(style.align, Align::Right);
        assert_eq!(style.line_spacing, Pt(1.0));
    }

    #[test]
    fn test_header_style_falls_back_to_text_font() {
        let mut table: Table<u8> = Table::new(vec![row(&["a", "b"])]);
        table
            .font(4)
            .header_row()
            .column_align(0, Align::Center)
            .header_align(1, Align::Right);

        let header = Header::default();
        let style = table.header_style(&header, 0, 0).unwrap();
        assert_eq!((style.font, style.align), (4, Align::Center));
        let style = table.header_style(&header, 0, 1).unwrap();
        assert_eq!(style.align, Align::Right);

        let bold = Header {
            style: FontStyle {
                font: Some(7),
                ..FontStyle::default()
            },
            repeat_row: 0,
        };
        assert_eq!(table.header_style(&bold, 0, 0).unwrap().font, 7);
    }

    #[test]
    fn test_missing_font_and_size() {
        let mut table: Table<u8> = Table::new(vec![row(&["a"])]);
        assert!(matches!(
            table.body_style(0, 0),
            Err(TableError::MissingFont { row: 0, column: 0 })
        ));

        table.font(0).cell_style(0, 0, StyleOverride::new().size(Pt(0.0)));
        assert!(matches!(
            table.body_style(0, 0),
            Err(TableError::MissingStyle { row: 0, column: 0, .. })
        ));
    }

    #[test]
    fn test_remove_columns() {
        let mut table: Table<u8> = Table::new(vec![
            row(&["a", "b", "c", "d"]),
            row(&["e", "<", "f", "<"]),
        ]);
        table
            .column_width(2, Pt(40.0))
            .cell_style(1, 2, StyleOverride::new().font(3))
            .cell_style(1, 1, StyleOverride::new().font(9));

        table.remove_columns(&[1, 0, 1]);

        assert_eq!(table.rows[0], row(&["c", "d"]));
        assert_eq!(table.rows[1], row(&["f", "<"]));
        assert_eq!(table.columns[0].width, Some(Pt(40.0)));
        assert_eq!(table.cell_styles.len(), 1);
        assert_eq!(table.cell_styles[&(1, 0)].font, Some(3));

        // a span left at the start of a row has nothing to merge into
        table.remove_columns(&[0]);
        assert_eq!(table.rows[1], vec![Cell::Text(String::new())]);
    }

    #[test]
    fn test_toggle_separator() {
        let mut table: Table<u8> = Table::new(vec![]);
        table.toggle_separator(3);
        assert!(!table.grid.separates(3));
        assert!(table.grid.separates(2));
        table.toggle_separator(3);
        assert!(table.grid.separates(3));
    }
}
