use crate::units::Pt;

/// Page margins. A [Canvas](crate::Canvas) reports these so that tables know where a
/// continuation page's content area starts and where the bottom of each page is;
/// [Page]s also derive their content box from them. Nothing stops content from being
/// drawn inside the margins, they are guidelines for layout.
///
/// [Page]: crate::Page
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl<T, R, B, L>(top: T, right: R, bottom: B, left: L) -> Margins
    where
        T: Into<Pt>,
        R: Into<Pt>,
        B: Into<Pt>,
        L: Into<Pt>,
    {
        Margins {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<V: Into<Pt>, H: Into<Pt>>(vertical: V, horizontal: H) -> Margins {
        let (vertical, horizontal): (Pt, Pt) = (vertical.into(), horizontal.into());
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::default()
    }

    /// Left plus right margin
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Top plus bottom margin
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}
