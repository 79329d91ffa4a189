//! Text layout utilities for positioning content on pages.
//!
//! [wrap_text] breaks text into lines that fit a given width, [measure_text] works out
//! how wide a piece of text wants to be and how narrow it can get, and
//! [draw_text_block] places wrapped lines onto a [Canvas](crate::Canvas) with the
//! requested [Align]ment. None of these know anything about fonts directly: text is
//! measured through a width function, usually built with [TextStyle::measure_with].
//!
//! # Example
//!
//! ```
//! use pdf_table::Pt;
//! use pdf_table::layout::{measure_text, wrap_text};
//!
//! // a monospaced font where every character is 6pt wide
//! let width_of = |text: &str| Pt(6.0 * text.chars().count() as f32);
//!
//! let lines: Vec<_> = wrap_text("the quick brown fox", Pt(60.0), width_of).collect();
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].text(), "the quick");
//!
//! let extents = measure_text("the quick brown fox", width_of);
//! assert_eq!(extents.narrowest, Pt(30.0));
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
