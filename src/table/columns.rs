//! Column width distribution.
//!
//! Every column has a minimum width (its widest word, so nothing has to overflow) and
//! a maximum width (its widest cell set on one line, so nothing has to wrap). Both
//! include the column's horizontal padding. Given a table width, the solver shares the
//! width out between columns:
//!
//! 1. columns with a fixed width get exactly that
//! 2. the rest is shared out in proportion to each column's maximum width
//! 3. any column pushed below its minimum is raised to it, and what it took is taken
//!    back evenly from the columns that are still free to shrink; this repeats until
//!    nothing changes
//!
//! When even the minimum widths don't fit, the layout is marked as over-constrained
//! and every column keeps its minimum.

use crate::error::TableError;
use crate::units::Pt;
use std::str::FromStr;

/// Width limits of a single column, padding included
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ColumnConstraint {
    /// The narrowest the column can be without a word overflowing it
    pub min: Pt,
    /// The widest the column needs to be to set every cell on one line
    pub max: Pt,
    /// A width the column always has, regardless of the table width
    pub fixed: Option<Pt>,
}

impl ColumnConstraint {
    pub fn flexible(min: Pt, max: Pt) -> ColumnConstraint {
        ColumnConstraint {
            min,
            max: max.max(min),
            fixed: None,
        }
    }

    pub fn fixed(width: Pt) -> ColumnConstraint {
        ColumnConstraint {
            min: width,
            max: width,
            fixed: Some(width),
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }
}

/// How wide a table should be
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum TableWidth {
    /// As wide as the content wants, up to the usable width
    #[default]
    Auto,
    /// An exact width. A negative width is measured back from the right margin, like
    /// [TableWidth::FromRight].
    Fixed(Pt),
    /// A percentage of the usable width
    Percent(f32),
    /// Fill the usable width, less this much
    FromRight(Pt),
}

/// Parses `auto` (or an empty string), percentages such as `50%` and plain numbers
/// of points such as `300` or `-20`
impl FromStr for TableWidth {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(TableWidth::Auto);
        }

        let invalid = || TableError::InvalidWidthSpecification(s.to_string());
        let number = |text: &str| {
            text.trim()
                .parse::<f32>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(invalid)
        };

        match trimmed.strip_suffix('%') {
            Some(percent) => Ok(TableWidth::Percent(number(percent)?)),
            None => {
                let width = number(trimmed)?;
                if width < 0.0 {
                    Ok(TableWidth::FromRight(Pt(-width)))
                } else {
                    Ok(TableWidth::Fixed(Pt(width)))
                }
            }
        }
    }
}

/// The solved column widths of a table
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Width of each column, padding included
    pub widths: Vec<Pt>,
    /// Overall width of the table: the column widths plus the overhead
    pub table_width: Pt,
    /// Width taken up by the outer border and the gaps between columns
    pub overhead: Pt,
    /// The minimum column widths didn't fit in the requested width
    pub over_constrained: bool,
}

impl ColumnLayout {
    /// Width of the columns alone
    pub fn content_width(&self) -> Pt {
        self.widths.iter().copied().sum()
    }
}

/// Shares a table's width out between its columns
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColumnWidthSolver {
    pub constraints: Vec<ColumnConstraint>,
    /// Width the table needs on top of its columns
    pub overhead: Pt,
}

impl ColumnWidthSolver {
    pub fn new(constraints: Vec<ColumnConstraint>, overhead: Pt) -> ColumnWidthSolver {
        ColumnWidthSolver {
            constraints,
            overhead,
        }
    }

    /// The narrowest the table can be without any column dropping below its minimum
    pub fn minimum_width(&self) -> Pt {
        self.constraints.iter().map(|c| c.min).sum::<Pt>() + self.overhead
    }

    /// The width at which no cell needs to wrap
    pub fn natural_width(&self) -> Pt {
        self.constraints.iter().map(|c| c.max).sum::<Pt>() + self.overhead
    }

    /// Work out the table width to solve for, given how much width is usable from the
    /// table's left edge to the right margin
    pub fn resolve_width(&self, requested: TableWidth, usable: Pt) -> Pt {
        let width = match requested {
            TableWidth::Auto => self.natural_width().min(usable),
            TableWidth::Fixed(width) if width < Pt::ZERO => usable + width,
            TableWidth::Fixed(width) => width,
            TableWidth::FromRight(inset) => usable - inset.abs(),
            TableWidth::Percent(percent) => usable * (percent / 100.0),
        };

        if width > usable {
            self.minimum_width().max(usable)
        } else {
            width
        }
    }

    /// Share `width` out between the columns
    pub fn solve(&self, width: Pt) -> ColumnLayout {
        let minimums: Vec<Pt> = self.constraints.iter().map(|c| c.min).collect();
        let maximums: Vec<Pt> = self.constraints.iter().map(|c| c.max).collect();
        let min_total: Pt = minimums.iter().copied().sum();
        let max_total: Pt = maximums.iter().copied().sum();
        let content = width - self.overhead;

        let widths = if self.constraints.is_empty() {
            Vec::new()
        } else if content.approx_eq(min_total) {
            minimums
        } else if content.approx_eq(max_total) {
            maximums
        } else {
            self.distribute(content)
        };

        let minimum = min_total + self.overhead;
        let over_constrained = minimum > width && !minimum.approx_eq(width);

        // with nothing to stretch, the table is exactly as wide as its fixed columns
        let all_fixed = !self.constraints.is_empty() && self.constraints.iter().all(ColumnConstraint::is_fixed);
        let table_width = if all_fixed || over_constrained {
            widths.iter().copied().sum::<Pt>() + self.overhead
        } else {
            width
        };

        ColumnLayout {
            widths,
            table_width,
            overhead: self.overhead,
            over_constrained,
        }
    }

    fn distribute(&self, content: Pt) -> Vec<Pt> {
        let count = self.constraints.len();
        let mut widths = vec![Pt::ZERO; count];
        let mut locked = vec![false; count];

        let mut remaining = content;
        for (i, constraint) in self.constraints.iter().enumerate() {
            if let Some(fixed) = constraint.fixed {
                widths[i] = fixed;
                locked[i] = true;
                remaining -= fixed;
            }
        }

        let flexible: Vec<usize> = (0..count).filter(|&i| !locked[i]).collect();
        let flexible_max: Pt = flexible.iter().map(|&i| self.constraints[i].max).sum();
        for &i in flexible.iter() {
            widths[i] = if flexible_max > Pt::ZERO {
                remaining * (*self.constraints[i].max / *flexible_max)
            } else {
                remaining / flexible.len() as f32
            };
        }

        loop {
            let mut changed = false;
            for i in 0..count {
                let min = self.constraints[i].min;
                if locked[i] || widths[i] >= min {
                    continue;
                }

                let shortfall = min - widths[i];
                widths[i] = min;
                locked[i] = true;
                changed = true;

                let unlocked = locked.iter().filter(|&&l| !l).count();
                if unlocked == 0 {
                    continue;
                }
                let share = shortfall / unlocked as f32;
                for (width, _) in widths.iter_mut().zip(locked.iter()).filter(|(_, locked)| !**locked) {
                    *width -= share;
                }
            }

            if !changed {
                break;
            }
        }

        widths
    }
}
