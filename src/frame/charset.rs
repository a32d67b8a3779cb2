/// Glyphs used to draw a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderCharset {
    pub top: char,
    pub bottom: char,
    pub left: char,
    pub right: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderCharset {
    pub const SHARP: Self = Self::box_drawing('─', '│', ['┌', '┐', '└', '┘']);
    pub const ROUNDED: Self = Self::box_drawing('─', '│', ['╭', '╮', '╰', '╯']);
    pub const THICK: Self = Self::box_drawing('━', '┃', ['┏', '┓', '┗', '┛']);
    pub const DOUBLE: Self = Self::box_drawing('═', '║', ['╔', '╗', '╚', '╝']);
    pub const BLOCK: Self = Self::box_drawing('█', '█', ['█', '█', '█', '█']);

    /// Charset with one horizontal glyph, one vertical glyph and four corners
    /// in reading order: top left, top right, bottom left, bottom right.
    pub const fn box_drawing(horizontal: char, vertical: char, corners: [char; 4]) -> Self {
        Self {
            top: horizontal,
            bottom: horizontal,
            left: vertical,
            right: vertical,
            top_left: corners[0],
            top_right: corners[1],
            bottom_left: corners[2],
            bottom_right: corners[3],
        }
    }

    pub fn named(name: &str) -> Option<Self> {
        match name {
            "sharp" => Some(Self::SHARP),
            "rounded" => Some(Self::ROUNDED),
            "thick" => Some(Self::THICK),
            "double" => Some(Self::DOUBLE),
            "block" => Some(Self::BLOCK),
            _ => None,
        }
    }
}

impl Default for BorderCharset {
    fn default() -> Self {
        Self::SHARP
    }
}
