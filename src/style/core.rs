use std::mem;

use crate::frame::{Border, Spacing};
use crate::text::TextStyle;

use super::styler::StringStyler;

/// Everything a styled leaf needs to turn text into a framed block.
///
/// Styles are values: leaves hold them behind an `Rc` and never mutate one in
/// place. Use [`Style::derive`] and the `with_*` builders to make a variant.
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub styler: Option<StringStyler>,
    pub text: TextStyle,
    pub margin: Spacing,
    pub padding: Spacing,
    pub border: Border,
    /// Render as an empty zero-sized block instead of failing when the
    /// content box would go negative.
    pub skip_if_too_small: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this style to build an override from.
    pub fn derive(&self) -> Self {
        self.clone()
    }

    pub fn with_styler(mut self, styler: StringStyler) -> Self {
        self.styler = Some(styler);
        self
    }

    pub fn without_styler(mut self) -> Self {
        self.styler = None;
        self
    }

    pub fn with_text(mut self, text: TextStyle) -> Self {
        self.text = text;
        self
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Override some text settings, keeping the rest of the current ones.
    pub fn with_text_overrides(mut self, merge: impl FnOnce(TextStyle) -> TextStyle) -> Self {
        self.text = merge(mem::take(&mut self.text));
        self
    }

    pub fn with_margin_overrides(mut self, merge: impl FnOnce(Spacing) -> Spacing) -> Self {
        self.margin = merge(mem::take(&mut self.margin));
        self
    }

    pub fn with_padding_overrides(mut self, merge: impl FnOnce(Spacing) -> Spacing) -> Self {
        self.padding = merge(mem::take(&mut self.padding));
        self
    }

    pub fn with_border_overrides(mut self, merge: impl FnOnce(Border) -> Border) -> Self {
        self.border = merge(mem::take(&mut self.border));
        self
    }

    pub fn with_skip_if_too_small(mut self, skip: bool) -> Self {
        self.skip_if_too_small = skip;
        self
    }

    /// Columns consumed around the content box.
    pub fn horizontal_allowance(&self) -> usize {
        self.margin.horizontal() + self.padding.horizontal() + self.border.horizontal()
    }

    /// Rows consumed around the content box.
    pub fn vertical_allowance(&self) -> usize {
        self.margin.vertical() + self.padding.vertical() + self.border.vertical()
    }
}
