/// Marker appended to text that had to be cut.
pub const DEFAULT_ELLIPSIS: &str = "…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    #[default]
    Wrap,
    NoWrap,
}

/// What happens to text that does not fit its box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Clip,
    Ellipsis(String),
}

impl Overflow {
    pub fn ellipsis() -> Self {
        Overflow::Ellipsis(DEFAULT_ELLIPSIS.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Text rules of a style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub wrap: Wrap,
    pub overflow: Overflow,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
}

impl TextStyle {
    pub fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_horizontal_align(mut self, align: HorizontalAlign) -> Self {
        self.horizontal_align = align;
        self
    }

    pub fn with_vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }
}
