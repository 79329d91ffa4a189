use crate::units::Pt;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TableError {
    #[error("invalid table width {0:?}: expected a number of points, a percentage or `auto`")]
    /// The requested table width could not be understood
    InvalidWidthSpecification(String),

    #[error("no font could be resolved for the cell at row {row}, column {column}")]
    /// A cell that needs drawing has no font, neither from an override nor from the
    /// table defaults
    MissingFont { row: usize, column: usize },

    #[error("the cell at row {row}, column {column} uses a font the metrics don't know")]
    /// A cell resolved to a font handle the [FontMetrics](crate::FontMetrics) can't
    /// measure, such as a [FontId](crate::FontId) from another [FontBook](crate::FontBook)
    UnknownCellFont { row: usize, column: usize },

    #[error("the cell at row {row}, column {column} has an unusable font size ({size})")]
    /// A cell resolved to a font size that can't be laid out
    MissingStyle { row: usize, column: usize, size: Pt },

    #[error("row {row} has {found} cells but the table has {expected} columns")]
    /// Rows must all have the same number of cells
    InconsistentRowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} starts with a spanned cell, which has nothing to merge into")]
    /// [Cell::Spanned](crate::table::Cell::Spanned) merges left, so it can't be first
    SpanWithoutAnchor { row: usize },

    #[error("header row {row} is outside the table, which has {rows} rows")]
    /// The header is set to repeat a row the table doesn't have
    InvalidHeaderRow { row: usize, rows: usize },

    #[error("the columns need at least {required}pt but only {available}pt is available")]
    /// The combined minimum column widths don't fit in the resolved table width
    OverConstrainedLayout { required: Pt, available: Pt },

    #[error("unknown alignment {0:?}")]
    InvalidAlignment(String),

    #[error("invalid colour {0:?}: expected `#rgb` or `#rrggbb`")]
    InvalidColour(String),

    #[error("font {0} is not part of the font book")]
    /// A page referenced a font that the font book used to render it doesn't have
    UnknownFont(usize),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}
