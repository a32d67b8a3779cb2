/// Integer size measured in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Rectangle in cell coordinates.
///
/// Offsets are signed: a foreground placed partially off-screen by an overlay
/// keeps its negative position so callers can still reason about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub top: i64,
    pub left: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub const fn new(top: i64, left: i64, width: i64, height: i64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height)
    }

    pub fn right(&self) -> i64 {
        self.left.saturating_add(self.width)
    }

    pub fn size(&self) -> (i64, i64) {
        (self.width, self.height)
    }

    /// Translate by another rectangle's origin.
    pub fn offset_by(&self, origin: &Rect) -> Rect {
        Rect::new(
            self.top + origin.top,
            self.left + origin.left,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_size() {
        let rect = Rect::new(2, 3, 10, 4);
        assert_eq!(rect.bottom(), 6);
        assert_eq!(rect.right(), 13);
    }

    #[test]
    fn offset_keeps_dimensions() {
        let rect = Rect::new(1, -2, 5, 5).offset_by(&Rect::new(3, 4, 0, 0));
        assert_eq!(rect, Rect::new(4, 2, 5, 5));
    }
}
