use crate::style::StringStyler;
use crate::width::{char_width, spaces};

/// Cell counts on each side of a block, used for both margin and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Spacing {
    pub const fn new(top: usize, right: usize, bottom: usize, left: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub const fn all(cells: usize) -> Self {
        Self::new(cells, cells, cells, cells)
    }

    /// `x` cells left and right, `y` cells top and bottom.
    pub const fn xy(x: usize, y: usize) -> Self {
        Self::new(y, x, y, x)
    }

    pub fn with_top(mut self, cells: usize) -> Self {
        self.top = cells;
        self
    }

    pub fn with_bottom(mut self, cells: usize) -> Self {
        self.bottom = cells;
        self
    }

    pub fn with_left(mut self, cells: usize) -> Self {
        self.left = cells;
        self
    }

    pub fn with_right(mut self, cells: usize) -> Self {
        self.right = cells;
        self
    }

    pub fn horizontal(&self) -> usize {
        self.left + self.right
    }

    pub fn vertical(&self) -> usize {
        self.top + self.bottom
    }
}

fn fill_cells(count: usize, fill: Option<&StringStyler>) -> String {
    match fill {
        Some(styler) if count > 0 => styler.apply(&spaces(count)),
        _ => spaces(count),
    }
}

fn surround(lines: &mut Vec<String>, width: usize, spacing: &Spacing, make: impl Fn(usize) -> String) -> usize {
    let left = make(spacing.left);
    let right = make(spacing.right);
    for line in lines.iter_mut() {
        *line = format!("{left}{line}{right}");
    }

    let full_width = width + spacing.horizontal();
    let row = make(full_width);
    lines.splice(0..0, std::iter::repeat_n(row.clone(), spacing.top));
    lines.extend(std::iter::repeat_n(row, spacing.bottom));
    full_width
}

/// Add blank fill around the block; when `fill` is given every fill run goes
/// through it so padding picks up the content's background.
pub fn apply_padding(
    lines: &mut Vec<String>,
    width: usize,
    padding: &Spacing,
    fill: Option<&StringStyler>,
) -> usize {
    surround(lines, width, padding, |count| fill_cells(count, fill))
}

/// Unstyled fill around the block. Columns a wide fill glyph cannot cover
/// are padded with spaces.
pub fn apply_margin(lines: &mut Vec<String>, width: usize, margin: &Spacing, fill: char) -> usize {
    let glyph_width = char_width(fill).max(1);
    surround(lines, width, margin, |count| {
        let mut run = fill.to_string().repeat(count / glyph_width);
        run.push_str(&spaces(count % glyph_width));
        run
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::display_width;

    #[test]
    fn margin_surrounds_block() {
        let mut lines = vec!["ab".to_string()];
        let width = apply_margin(&mut lines, 2, &Spacing::new(1, 2, 0, 1), ' ');
        assert_eq!(width, 5);
        assert_eq!(lines, vec!["     ", " ab  "]);
    }

    #[test]
    fn wide_margin_fill_keeps_rows_rectangular() {
        let mut lines = vec!["ab".to_string()];
        let width = apply_margin(&mut lines, 2, &Spacing::new(1, 3, 0, 1), '日');
        assert_eq!(width, 6);
        assert_eq!(lines, vec!["日日日", " ab日 "]);
        assert!(lines.iter().all(|line| display_width(line) == width));
    }

    #[test]
    fn padding_runs_fill_through_styler() {
        let styler = StringStyler::new(|text| format!("<{text}>"));
        let mut lines = vec!["x".to_string()];
        let width = apply_padding(&mut lines, 1, &Spacing::xy(1, 1), Some(&styler));
        assert_eq!(width, 3);
        assert_eq!(lines, vec!["<   >", "< >x< >", "<   >"]);
    }

    #[test]
    fn zero_spacing_is_identity() {
        let mut lines = vec!["abc".to_string()];
        let width = apply_padding(&mut lines, 3, &Spacing::default(), None);
        assert_eq!(width, 3);
        assert_eq!(lines, vec!["abc"]);
    }

    #[test]
    fn shorthands() {
        assert_eq!(Spacing::all(2), Spacing::new(2, 2, 2, 2));
        assert_eq!(Spacing::xy(3, 1).horizontal(), 6);
        assert_eq!(Spacing::xy(3, 1).vertical(), 2);
    }
}
