use crate::units::*;

/// A rectangle, specified by two opposite corners.
///
/// Page boxes ([Page::media_box](crate::Page::media_box)) use PDF space, where y grows
/// upwards from the bottom of the page. Rectangles handed to a [Canvas](crate::Canvas)
/// use canvas space, where y grows downwards from the top of the page.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first corner.
    pub x1: Pt,
    /// The y-coordinate of the first corner.
    pub y1: Pt,
    /// The x-coordinate of the second, opposite corner.
    pub x2: Pt,
    /// The y-coordinate of the second, opposite corner.
    pub y2: Pt,
}

impl Rect {
    pub fn new(x1: Pt, y1: Pt, x2: Pt, y2: Pt) -> Rect {
        Rect { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> Pt {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> Pt {
        (self.y2 - self.y1).abs()
    }

    /// The same rectangle with the corners swapped so that `x1 <= x2` and `y1 <= y2`
    pub fn normalized(&self) -> Rect {
        Rect {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Shrink the rectangle by `amount` on every side
    pub fn inset(&self, amount: Pt) -> Rect {
        let r = self.normalized();
        Rect {
            x1: r.x1 + amount,
            y1: r.y1 + amount,
            x2: r.x2 - amount,
            y2: r.y2 - amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_and_inset() {
        let r = Rect::new(Pt(10.0), Pt(50.0), Pt(0.0), Pt(0.0));
        assert_eq!(r.width(), Pt(10.0));
        assert_eq!(r.height(), Pt(50.0));
        assert_eq!(
            r.inset(Pt(1.0)),
            Rect::new(Pt(1.0), Pt(1.0), Pt(9.0), Pt(49.0))
        );
    }
}
