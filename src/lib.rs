//! Lay out tables across pages: column widths balanced against the available width,
//! cell text wrapped and aligned, rows split over as many pages as they need with the
//! header repeated at the top of each.
//!
//! The [table] module holds the layout engine. It draws through the [Canvas] trait and
//! measures text through the [FontMetrics] trait; [Page] and [FontBook] implement
//! those for PDF content streams and TrueType/OpenType fonts.

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod font;
pub use font::*;

/// Utility functions and structures to layout objects (mostly text) on pages
pub mod layout;

mod page;
pub use page::*;

mod rect;
pub use rect::*;

/// Table layout and pagination
pub mod table;

mod units;
pub use units::*;

mod error;
pub use error::*;

#[cfg(test)]
mod testing;

/// Re-export PDF-writer functionality, mostly for embedding rendered pages in documents
pub use pdf_writer;
