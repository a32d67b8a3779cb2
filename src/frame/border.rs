use crate::style::StringStyler;

use super::charset::BorderCharset;

/// Border definition. A side is drawn when it has a styler; use
/// [`Border::plain`] for an unstyled side.
#[derive(Debug, Clone, Default)]
pub struct Border {
    pub charset: BorderCharset,
    pub top: Option<StringStyler>,
    pub bottom: Option<StringStyler>,
    pub left: Option<StringStyler>,
    pub right: Option<StringStyler>,
}

impl Border {
    /// Pass-through styler for sides that should be drawn without color.
    pub fn plain() -> StringStyler {
        StringStyler::new(str::to_string)
    }

    /// All four sides sharing one styler.
    pub fn all(charset: BorderCharset, styler: StringStyler) -> Self {
        Self {
            charset,
            top: Some(styler.clone()),
            bottom: Some(styler.clone()),
            left: Some(styler.clone()),
            right: Some(styler),
        }
    }

    pub fn with_charset(mut self, charset: BorderCharset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_top(mut self, styler: Option<StringStyler>) -> Self {
        self.top = styler;
        self
    }

    pub fn with_bottom(mut self, styler: Option<StringStyler>) -> Self {
        self.bottom = styler;
        self
    }

    pub fn with_left(mut self, styler: Option<StringStyler>) -> Self {
        self.left = styler;
        self
    }

    pub fn with_right(mut self, styler: Option<StringStyler>) -> Self {
        self.right = styler;
        self
    }

    /// Left and right sides.
    pub fn with_x(self, styler: Option<StringStyler>) -> Self {
        self.with_left(styler.clone()).with_right(styler)
    }

    /// Top and bottom sides.
    pub fn with_y(self, styler: Option<StringStyler>) -> Self {
        self.with_top(styler.clone()).with_bottom(styler)
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }

    /// Columns taken by the vertical sides.
    pub fn horizontal(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Rows taken by the horizontal rules.
    pub fn vertical(&self) -> usize {
        usize::from(self.top.is_some()) + usize::from(self.bottom.is_some())
    }
}

fn rule(border: &Border, glyph: char, left_corner: char, right_corner: char, width: usize) -> String {
    let mut line = String::with_capacity(width + 2);
    if border.left.is_some() {
        line.push(left_corner);
    }
    line.extend(std::iter::repeat_n(glyph, width));
    if border.right.is_some() {
        line.push(right_corner);
    }
    line
}

/// Frame the block and return its new width.
///
/// Corner cells only exist where the adjoining vertical side is drawn, so the
/// result stays rectangular whatever combination of sides is active.
pub fn apply_border(lines: &mut Vec<String>, width: usize, border: &Border) -> usize {
    let charset = &border.charset;

    if border.left.is_some() || border.right.is_some() {
        let left = border
            .left
            .as_ref()
            .map(|styler| styler.apply(&charset.left.to_string()))
            .unwrap_or_default();
        let right = border
            .right
            .as_ref()
            .map(|styler| styler.apply(&charset.right.to_string()))
            .unwrap_or_default();
        for line in lines.iter_mut() {
            *line = format!("{left}{line}{right}");
        }
    }

    if let Some(styler) = &border.top {
        let top = rule(border, charset.top, charset.top_left, charset.top_right, width);
        lines.insert(0, styler.apply(&top));
    }
    if let Some(styler) = &border.bottom {
        let bottom = rule(border, charset.bottom, charset.bottom_left, charset.bottom_right, width);
        lines.push(styler.apply(&bottom));
    }

    width + border.horizontal()
}
