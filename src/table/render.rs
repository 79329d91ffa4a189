//! Drawing a [Table] across pages.
//!
//! Rendering measures every cell once to work out the column widths, then walks the
//! rows top to bottom. Each row is wrapped at its column widths to find its height; if
//! it doesn't fit above the bottom margin the current page is finished off (vertical
//! grid lines and border) and the row is retried on a fresh page, after the header.

use super::{Cell, ColumnConstraint, ColumnLayout, ColumnWidthSolver, OverConstrainedPolicy, Table, TableWidth};
use crate::canvas::{Canvas, FontMetrics, ShapeStyle};
use crate::error::TableError;
use crate::layout::{draw_text_block, measure_text, wrap_text, TextStyle, WrapLine};
use crate::rect::Rect;
use crate::units::Pt;
use tracing::{debug, trace, warn};

/// What rendering a table produced
#[derive(Debug)]
pub struct RenderResult<C> {
    /// Every page the table was drawn on, starting with the page it was given
    pub pages: Vec<C>,
    /// Height of the table summed over all pages
    pub total_height: Pt,
    /// Height of the table on the last page
    pub last_page_height: Pt,
    /// Where the table ends on the last page
    pub end_y: Pt,
}

impl<C> RenderResult<C> {
    pub fn is_multi_page(&self) -> bool {
        self.pages.len() > 1
    }
}

/// A cell with its style worked out
#[derive(Debug, Clone, Copy)]
enum StyledCell<'a, F> {
    Text(&'a str, TextStyle<F>),
    Spanned,
}

/// A text cell of a row, wrapped at its final width
struct CellLayout<'a, F> {
    x: Pt,
    /// Width of the cell including padding and any columns it spans
    width: Pt,
    lines: Vec<WrapLine<'a>>,
    style: TextStyle<F>,
}

/// Horizontal geometry shared by every row
struct Geometry {
    columns: ColumnLayout,
    /// Left edge of each column
    column_x: Vec<Pt>,
    left: Pt,
    gap: Pt,
    border: Pt,
    padding: Pt,
}

impl Geometry {
    fn new(columns: ColumnLayout, left: Pt, gap: Pt, border: Pt, padding: Pt) -> Geometry {
        let mut column_x = Vec::with_capacity(columns.widths.len());
        let mut x = left + border;
        for width in columns.widths.iter() {
            column_x.push(x);
            x += *width + gap;
        }

        Geometry {
            columns,
            column_x,
            left,
            gap,
            border,
            padding,
        }
    }

    fn right(&self) -> Pt {
        self.left + self.columns.table_width
    }
}

/// Everything drawn on the current page that still needs finishing off
struct PageState<C> {
    page: C,
    /// Top of the table on this page
    top: Pt,
    cursor: Pt,
    /// Vertical grid line runs per column, as (start, end) pairs
    runs: Vec<Vec<(Pt, Pt)>>,
    rows: usize,
    body_rows: usize,
    /// Whether this page continues the table from an earlier page
    continuation: bool,
}

impl<C> PageState<C> {
    fn new(page: C, top: Pt, border: Pt, columns: usize, continuation: bool) -> PageState<C> {
        PageState {
            page,
            top,
            cursor: top + border,
            runs: vec![Vec::new(); columns],
            rows: 0,
            body_rows: 0,
            continuation,
        }
    }

    /// Extend the vertical grid line to the left of `column` down to `end`
    fn extend_run(&mut self, column: usize, start: Pt, end: Pt) {
        let runs = &mut self.runs[column];
        match runs.last_mut() {
            Some(run) if run.1.approx_eq(start) => run.1 = end,
            _ => runs.push((start, end)),
        }
    }
}

fn check_fonts<'r, 'a: 'r, F, M>(
    metrics: &M,
    rows: impl Iterator<Item = (usize, &'r Vec<StyledCell<'a, F>>)>,
) -> Result<(), TableError>
where
    F: Copy + 'r,
    M: FontMetrics<F>,
{
    for (row, cells) in rows {
        for (column, cell) in cells.iter().enumerate() {
            if let StyledCell::Text(_, style) = cell {
                if !metrics.has_font(style.font) {
                    return Err(TableError::UnknownCellFont { row, column });
                }
            }
        }
    }
    Ok(())
}

impl<F: Copy> Table<F> {
    /// Draw the table onto `page` with its top-left corner at `origin`, adding pages as
    /// needed.
    ///
    /// The width of the table is resolved against the width available between
    /// `origin` and the page's right margin. Continuation pages are created with
    /// [Canvas::new_page_like] and start at the table's top margin.
    pub fn render<M, C>(
        &self,
        metrics: &M,
        page: C,
        origin: (Pt, Pt),
        width: TableWidth,
    ) -> Result<RenderResult<C>, TableError>
    where
        M: FontMetrics<F>,
        C: Canvas<F>,
    {
        let (x, y) = origin;
        let rows = self.styled_rows()?;
        let header_rendition = self.header_rendition()?;
        check_fonts(metrics, rows.iter().enumerate())?;
        if let Some((source, cells)) = &header_rendition {
            check_fonts(metrics, std::iter::once((*source, cells)))?;
        }
        let column_count = self.column_count();

        let gap = if self.grid.vertical {
            self.grid.line.width
        } else {
            Pt::ZERO
        };
        let border = self.border.map(|b| b.line.width).unwrap_or_default();
        let overhead = border * 2.0 + gap * column_count.saturating_sub(1) as f32;

        let solver = ColumnWidthSolver::new(self.measure(metrics, &rows), overhead);
        let usable = page.width() - page.margins().right - x;
        let resolved = solver.resolve_width(width, usable);
        let columns = solver.solve(resolved);
        debug!(
            widths = ?columns.widths,
            table_width = %columns.table_width,
            usable = %usable,
            "laid out table columns"
        );

        // a requested width past the margin resolves to the minimum, which the solver
        // then considers satisfied
        let required = solver.minimum_width();
        let available = resolved.min(usable);
        if columns.over_constrained || (required > available && !required.approx_eq(available)) {
            match self.over_constrained {
                OverConstrainedPolicy::Error => {
                    return Err(TableError::OverConstrainedLayout {
                        required,
                        available,
                    })
                }
                OverConstrainedPolicy::Warn => warn!(
                    required = %required,
                    available = %available,
                    "table columns don't fit, drawing the table wider than requested"
                ),
            }
        }

        let geometry = Geometry::new(columns, x, gap, border, self.padding.horizontal);
        let margin_top = self.margin_top.unwrap_or(page.margins().top);
        let page_bottom = page.height() - self.margin_bottom.unwrap_or(page.margins().bottom);

        let mut state = PageState::new(page, y, border, column_count, false);
        let mut pages = Vec::new();
        let mut total_height = Pt::ZERO;

        let mut next_rows = 0..rows.len();
        let mut pending: Option<usize> = None;
        let mut replay_header = false;

        loop {
            let (row, cells, as_header) = match (&header_rendition, replay_header) {
                (Some((source, cells)), true) => (*source, cells, true),
                _ => match pending.take().or_else(|| next_rows.next()) {
                    Some(row) => (row, &rows[row], row == 0 && self.header.is_some()),
                    None => break,
                },
            };

            let layout = self.layout_row(metrics, &geometry, cells);
            let text_height = layout
                .iter()
                .map(|cell| cell.style.block_height(metrics, cell.lines.len()))
                .fold(Pt::ZERO, Pt::max);
            let padding = self.padding.vertical_for(row);
            let separator = !as_header && row != 0 && state.rows > 0 && self.grid.separates(row);
            let separator_width = if separator {
                self.grid.line.width
            } else {
                Pt::ZERO
            };
            let extent = text_height + padding * 2.0 + separator_width;

            if state.cursor + extent >= page_bottom {
                if state.body_rows > 0 || !state.continuation {
                    debug!(row, cursor = %state.cursor, extent = %extent, "table continues on a new page");
                    let next_page = state.page.new_page_like();
                    let (finished, height) = self.finish_page(state, &geometry);
                    pages.push(finished);
                    total_height += height;
                    state = PageState::new(next_page, margin_top, border, column_count, true);

                    // an interrupted header is simply drawn again; body rows wait for the header
                    if !replay_header {
                        pending = Some(row);
                        replay_header = !as_header && header_rendition.is_some();
                    }
                    continue;
                }
                warn!(row, extent = %extent, "row is taller than a page, letting it overflow");
            }

            trace!(row, as_header, height = %extent, "drawing row");
            let row_top = state.cursor;
            if separator {
                let line_y = row_top + separator_width / 2.0;
                state.page.draw_line(
                    (geometry.left + border, line_y),
                    (geometry.right() - border, line_y),
                    self.grid.line.colour,
                    self.grid.line.width,
                );
            }

            let text_top = row_top + separator_width + padding;
            for cell in layout.iter() {
                draw_text_block(
                    &mut state.page,
                    metrics,
                    &cell.lines,
                    (cell.x + geometry.padding, text_top),
                    cell.width - geometry.padding * 2.0,
                    &cell.style,
                );
            }

            if self.grid.vertical {
                let run_start = if state.rows == 0 { state.top } else { row_top };
                for (column, cell) in cells.iter().enumerate().skip(1) {
                    if !matches!(cell, StyledCell::Spanned) {
                        state.extend_run(column, run_start, row_top + extent);
                    }
                }
            }

            state.cursor += extent;
            state.rows += 1;
            if as_header {
                replay_header = false;
            } else {
                state.body_rows += 1;
            }
        }

        let top = state.top;
        let (finished, last_page_height) = self.finish_page(state, &geometry);
        pages.push(finished);
        total_height += last_page_height;

        Ok(RenderResult {
            pages,
            total_height,
            last_page_height,
            end_y: top + last_page_height,
        })
    }

    /// Check the shape of every row and work out the style of every text cell
    fn styled_rows(&self) -> Result<Vec<Vec<StyledCell<'_, F>>>, TableError> {
        let expected = self.column_count();
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                if cells.len() != expected {
                    return Err(TableError::InconsistentRowShape {
                        row,
                        expected,
                        found: cells.len(),
                    });
                }
                if cells.first().is_some_and(Cell::is_spanned) {
                    return Err(TableError::SpanWithoutAnchor { row });
                }

                cells
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| match cell {
                        Cell::Spanned => Ok(StyledCell::Spanned),
                        Cell::Text(text) => {
                            let style = match &self.header {
                                Some(header) if row == 0 => self.header_style(header, row, column)?,
                                _ => self.body_style(row, column)?,
                            };
                            Ok(StyledCell::Text(text.as_str(), style))
                        }
                    })
                    .collect::<Result<Vec<_>, TableError>>()
            })
            .collect()
    }

    /// The row drawn at the top of continuation pages, in the header style
    fn header_rendition(&self) -> Result<Option<(usize, Vec<StyledCell<'_, F>>)>, TableError> {
        let Some(header) = self.header.as_ref().filter(|_| !self.rows.is_empty()) else {
            return Ok(None);
        };
        let source = header.repeat_row;
        let cells = self.rows.get(source).ok_or(TableError::InvalidHeaderRow {
            row: source,
            rows: self.rows.len(),
        })?;

        let styled = cells
            .iter()
            .enumerate()
            .map(|(column, cell)| match cell {
                Cell::Spanned => Ok(StyledCell::Spanned),
                Cell::Text(text) => Ok(StyledCell::Text(
                    text.as_str(),
                    self.header_style(header, source, column)?,
                )),
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Ok(Some((source, styled)))
    }

    /// Minimum and maximum widths of every column. Rows with spanned cells don't count,
    /// since their text doesn't belong to a single column.
    fn measure<M: FontMetrics<F>>(&self, metrics: &M, rows: &[Vec<StyledCell<'_, F>>]) -> Vec<ColumnConstraint> {
        let padding = self.padding.horizontal * 2.0;
        let mut constraints: Vec<ColumnConstraint> = (0..self.column_count())
            .map(|column| match self.columns.get(column).and_then(|c| c.width) {
                Some(width) => ColumnConstraint::fixed(width + padding),
                None => ColumnConstraint::flexible(padding, padding),
            })
            .collect();

        let measurable = rows
            .iter()
            .filter(|cells| !cells.iter().any(|cell| matches!(cell, StyledCell::Spanned)));
        for cells in measurable {
            for (constraint, cell) in constraints.iter_mut().zip(cells.iter()) {
                let StyledCell::Text(text, style) = cell else {
                    continue;
                };
                if constraint.is_fixed() {
                    continue;
                }
                let extents = measure_text(text, style.measure_with(metrics));
                constraint.min = constraint.min.max(extents.narrowest + padding);
                constraint.max = constraint.max.max(extents.natural + padding);
            }
        }

        constraints
    }

    /// Wrap the text cells of a row at their column widths. A spanned cell widens the
    /// text cell to its left by its own width and the gap between them.
    fn layout_row<'a, M: FontMetrics<F>>(
        &self,
        metrics: &M,
        geometry: &Geometry,
        cells: &[StyledCell<'a, F>],
    ) -> Vec<CellLayout<'a, F>> {
        let mut layout: Vec<(Pt, Pt, &'a str, TextStyle<F>)> = Vec::with_capacity(cells.len());
        for (column, cell) in cells.iter().enumerate() {
            let width = geometry.columns.widths[column];
            match *cell {
                StyledCell::Text(text, style) => layout.push((geometry.column_x[column], width, text, style)),
                StyledCell::Spanned => {
                    if let Some(anchor) = layout.last_mut() {
                        anchor.1 += geometry.gap + width;
                    }
                }
            }
        }

        layout
            .into_iter()
            .map(|(x, width, text, style)| CellLayout {
                x,
                width,
                lines: wrap_text(text, width - geometry.padding * 2.0, style.measure_with(metrics)).collect(),
                style,
            })
            .collect()
    }

    /// Draw the vertical grid lines and border of a finished page, returning the page
    /// and the height the table took up on it
    fn finish_page<C: Canvas<F>>(&self, mut state: PageState<C>, geometry: &Geometry) -> (C, Pt) {
        if state.rows == 0 {
            return (state.page, Pt::ZERO);
        }

        let height = state.cursor + geometry.border - state.top;

        if self.grid.vertical {
            let line = self.grid.line;
            for (column, runs) in state.runs.iter().enumerate().skip(1) {
                let x = geometry.column_x[column] - geometry.gap / 2.0;
                for &(start, end) in runs.iter() {
                    if end - start <= line.width {
                        continue;
                    }
                    state.page.draw_line((x, start), (x, end), line.colour, line.width);
                }
            }
        }

        if let Some(border) = self.border {
            let rect = Rect::new(
                geometry.left,
                state.top,
                geometry.right(),
                state.top + height,
            );
            state.page.draw_rectangle(
                rect.inset(border.line.width / 2.0),
                ShapeStyle::Stroke {
                    colour: border.line.colour,
                    width: border.line.width,
                },
                border.radius,
            );
        }

        (state.page, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Align, Margins};
    use crate::page::{Page, PageContents};
    use crate::table::{Border, Header, LineStyle, StyleOverride};
    use crate::testing::FixedMetrics;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells
            .iter()
            .map(|&c| if c == "<" { Cell::Spanned } else { Cell::from(c) })
            .collect()
    }

    fn blank_page(height: f32) -> Page<u8> {
        Page::new((Pt(400.0), Pt(height)), Some(Margins::all(Pt(20.0))))
    }

    fn texts(page: &Page<u8>) -> Vec<&str> {
        page.spans().map(|span| span.text.as_str()).collect()
    }

    fn vertical_lines(page: &Page<u8>) -> Vec<(Pt, Pt, Pt)> {
        page.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Line { from, to, .. } if from.0 == to.0 => Some((from.0, from.1, to.1)),
                _ => None,
            })
            .collect()
    }

    fn horizontal_lines(page: &Page<u8>) -> Vec<Pt> {
        page.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Line { from, to, .. } if from.1 == to.1 => Some(from.1),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_row_geometry() {
        // 8pt text: 4pt per character, 8pt lines plus 1pt spacing, 6pt ascent
        let mut table: Table<u8> = Table::new(vec![row(&["abc"])]);
        table.font(0);

        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(30.0)), TableWidth::Auto)
            .unwrap();
        assert_eq!(result.pages.len(), 1);
        // border 1 + padding 2 + line 9 + padding 2 + border 1
        assert_eq!(result.total_height, Pt(15.0));
        assert_eq!(result.last_page_height, Pt(15.0));
        assert_eq!(result.end_y, Pt(45.0));

        let page = &result.pages[0];
        let span = page.spans().next().unwrap();
        // left 20 + border 1 + padding 3; top 30 + border 1 + padding 2 + ascent 6
        assert_eq!(span.coords, (Pt(24.0), Pt(39.0)));

        // natural width: 12pt of text, 6pt of padding, 2pt of border
        let border = page.contents.iter().find_map(|c| match c {
            PageContents::Rectangle { rect, .. } => Some(*rect),
            _ => None,
        });
        assert_eq!(
            border,
            Some(Rect::new(Pt(20.5), Pt(30.5), Pt(39.5), Pt(44.5)))
        );
    }

    #[test]
    fn test_separators_between_body_rows() {
        let mut table: Table<u8> = Table::new(vec![row(&["a"]), row(&["b"]), row(&["c"])]);
        table.font(0).border(None);

        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        let page = &result.pages[0];
        // rows are 13pt tall, the rows after the first add 1pt for their separator
        assert_eq!(horizontal_lines(page), vec![Pt(33.5), Pt(47.5)]);
        assert_eq!(result.total_height, Pt(41.0));

        table.toggle_separator(2);
        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        assert_eq!(horizontal_lines(&result.pages[0]), vec![Pt(33.5)]);
    }

    #[test]
    fn test_spanned_cell_widens_anchor_and_skips_grid_line() {
        let mut table: Table<u8> = Table::new(vec![
            row(&["aa", "bb", "cc"]),
            row(&["ab cd efgh", "<", "z"]),
        ]);
        table.font(0).grid(false, true).border(None);

        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        let page = &result.pages[0];

        // columns measured from the first row only: 8pt of text plus 6pt of padding
        // each, so 14pt columns with 1pt gaps; the merged cell wraps at 14 + 1 + 14 - 6
        assert_eq!(texts(page)[3..], ["ab cd", "efgh", "z"]);

        let lines = vertical_lines(page);
        // the line between columns 0 and 1 stops after the first row, the line
        // between columns 1 and 2 runs the full height
        let first_boundary: Vec<_> = lines.iter().filter(|l| l.0 == Pt(34.5)).collect();
        let second_boundary: Vec<_> = lines.iter().filter(|l| l.0 == Pt(49.5)).collect();
        assert_eq!(first_boundary.len(), 1);
        assert_eq!(first_boundary[0].2, Pt(33.0));
        assert_eq!(second_boundary.len(), 1);
        assert_eq!(second_boundary[0].2, Pt(20.0) + result.total_height);
    }

    #[test]
    fn test_header_is_replayed_on_continuation_pages() {
        let mut rows = vec![row(&["Header"])];
        rows.extend((0..30).map(|i| vec![Cell::from(format!("row {i}"))]));
        let mut table: Table<u8> = Table::new(rows);
        table.font(0).header_row();

        let result = table
            .render(&FixedMetrics, blank_page(200.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        assert!(result.is_multi_page());

        let mut body = Vec::new();
        for page in result.pages.iter() {
            let texts = texts(page);
            assert_eq!(texts[0], "Header");
            body.extend(texts[1..].iter().map(|t| t.to_string()));
        }
        let expected: Vec<String> = (0..30).map(|i| format!("row {i}")).collect();
        assert_eq!(body, expected);

        assert!(result.total_height > result.last_page_height);
    }

    #[test]
    fn test_table_starting_too_low_moves_to_next_page() {
        let mut table: Table<u8> = Table::new(vec![row(&["only"])]);
        table.font(0);

        let result = table
            .render(&FixedMetrics, blank_page(100.0), (Pt(20.0), Pt(75.0)), TableWidth::Auto)
            .unwrap();
        assert_eq!(result.pages.len(), 2);
        assert!(result.pages[0].is_empty());
        assert_eq!(texts(&result.pages[1]), vec!["only"]);
        assert_eq!(result.total_height, Pt(15.0));
        assert_eq!(result.end_y, Pt(35.0));
    }

    #[test]
    fn test_overlong_row_is_drawn_once() {
        let text = vec!["word"; 40].join("\n");
        let mut table: Table<u8> = Table::new(vec![vec![Cell::from(text)]]);
        table.font(0);

        let result = table
            .render(&FixedMetrics, blank_page(100.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        // the first page is empty so it breaks once, then the row overflows its page
        assert_eq!(result.pages.len(), 2);
        assert_eq!(texts(&result.pages[1]).len(), 40);
    }

    #[test]
    fn test_errors() {
        let mut table: Table<u8> = Table::new(vec![row(&["a", "b"]), row(&["c"])]);
        table.font(0);
        let err = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::InconsistentRowShape { row: 1, expected: 2, found: 1 }
        ));

        let mut table: Table<u8> = Table::new(vec![row(&["a", "b"]), row(&["<", "c"])]);
        table.font(0);
        let err = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap_err();
        assert!(matches!(err, TableError::SpanWithoutAnchor { row: 1 }));

        let table: Table<u8> = Table::new(vec![row(&["a"])]);
        let err = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap_err();
        assert!(matches!(err, TableError::MissingFont { row: 0, column: 0 }));

        let mut table: Table<u8> = Table::new(vec![row(&["a"])]);
        table.font(0).header(Header {
            repeat_row: 4,
            ..Header::default()
        });
        let err = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidHeaderRow { row: 4, rows: 1 }));
    }

    #[test]
    fn test_over_constrained_policy() {
        let mut table: Table<u8> = Table::new(vec![row(&["a", "b", "flexible"])]);
        table
            .font(0)
            .column_width(0, Pt(100.0))
            .column_width(1, Pt(100.0));

        let err = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Fixed(Pt(150.0)))
            .unwrap_err();
        assert!(matches!(err, TableError::OverConstrainedLayout { .. }));

        table.over_constrained_policy(OverConstrainedPolicy::Warn);
        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Fixed(Pt(150.0)))
            .unwrap();
        assert_eq!(texts(&result.pages[0]), vec!["a", "b", "flexible"]);
    }

    #[test]
    fn test_requested_width_past_margin_still_checks_minimums() {
        // one 400pt word against 360pt between the origin and the right margin
        let word = "x".repeat(100);
        let mut table: Table<u8> = Table::new(vec![row(&[word.as_str()])]);
        table.font(0);

        let err = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Fixed(Pt(5000.0)))
            .unwrap_err();
        match err {
            TableError::OverConstrainedLayout { required, available } => {
                assert_eq!(required, Pt(408.0));
                assert_eq!(available, Pt(360.0));
            }
            other => panic!("unexpected error: {other}"),
        }

        table.over_constrained_policy(OverConstrainedPolicy::Warn);
        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Fixed(Pt(5000.0)))
            .unwrap();
        let border = result.pages[0].contents.iter().find_map(|c| match c {
            PageContents::Rectangle { rect, .. } => Some(rect.width()),
            _ => None,
        });
        assert_eq!(border, Some(Pt(407.0)));
    }

    /// [FixedMetrics] that only knows font 0
    struct OneFont;

    impl FontMetrics<u8> for OneFont {
        fn width_of_text(&self, font: u8, text: &str, size: Pt) -> Pt {
            FixedMetrics.width_of_text(font, text, size)
        }

        fn line_height(&self, font: u8, size: Pt) -> Pt {
            FixedMetrics.line_height(font, size)
        }

        fn ascent(&self, font: u8, size: Pt) -> Pt {
            FixedMetrics.ascent(font, size)
        }

        fn has_font(&self, font: u8) -> bool {
            font == 0
        }
    }

    #[test]
    fn test_unknown_fonts_are_rejected_before_layout() {
        let mut table: Table<u8> = Table::new(vec![row(&["a", "b"]), row(&["c", "d"])]);
        table.font(0);
        assert!(table
            .render(&OneFont, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .is_ok());

        table.cell_style(1, 1, StyleOverride::new().font(3));
        let err = table
            .render(&OneFont, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap_err();
        assert!(matches!(err, TableError::UnknownCellFont { row: 1, column: 1 }));
    }

    #[test]
    fn test_row_padding_override() {
        let mut table: Table<u8> = Table::new(vec![row(&["a"]), row(&["b"])]);
        table.font(0).row_padding(1, Pt(10.0));

        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        // border 1, row 0 at 9 + 2 × 2, separator 1, row 1 at 9 + 2 × 10, border 1
        assert_eq!(result.total_height, Pt(45.0));

        let spans: Vec<_> = result.pages[0].spans().collect();
        // row 1 starts at 34: separator 1 + padding 10 + ascent 6
        assert_eq!(spans[0].coords.1, Pt(29.0));
        assert_eq!(spans[1].coords.1, Pt(51.0));
    }

    #[test]
    fn test_empty_table_with_header_draws_nothing() {
        let mut table: Table<u8> = Table::new(Vec::new());
        table.font(0).header_row();

        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        assert_eq!(result.pages.len(), 1);
        assert!(result.pages[0].is_empty());
        assert_eq!(result.total_height, Pt::ZERO);
        assert_eq!(result.end_y, Pt(20.0));
    }

    #[test]
    fn test_rounded_border_and_alignment() {
        let mut table: Table<u8> = Table::new(vec![row(&["ab"]), row(&["abcdef"])]);
        table
            .font(0)
            .column_align(0, Align::Right)
            .border(Some(Border {
                line: LineStyle {
                    width: Pt(2.0),
                    ..LineStyle::default()
                },
                radius: Pt(4.0),
            }));

        let result = table
            .render(&FixedMetrics, blank_page(300.0), (Pt(20.0), Pt(20.0)), TableWidth::Auto)
            .unwrap();
        let page = &result.pages[0];
        let spans: Vec<_> = page.spans().collect();
        // column is 24 + 6 wide; right aligned text ends at 20 + 2 + 3 + 24
        assert_eq!(spans[0].coords.0, Pt(41.0));
        assert_eq!(spans[1].coords.0, Pt(25.0));
        assert!(page.contents.iter().any(|c| matches!(
            c,
            PageContents::Rectangle { radius, .. } if *radius == Pt(4.0)
        )));
    }
}
