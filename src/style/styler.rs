use std::fmt;
use std::rc::Rc;

use crossterm::style::ContentStyle;

/// Maps a plain string to a styled one.
///
/// The engine never builds escape sequences itself; it only runs whole lines
/// or fill cells through one of these.
#[derive(Clone)]
pub struct StringStyler(Rc<dyn Fn(&str) -> String>);

impl StringStyler {
    pub fn new(f: impl Fn(&str) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Styler backed by a crossterm style.
    pub fn from_content_style(style: ContentStyle) -> Self {
        Self::new(move |text| style.apply(text).to_string())
    }

    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }

    pub fn ptr_eq(&self, other: &StringStyler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for StringStyler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StringStyler(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::{Attribute, Color};

    #[test]
    fn applies_closure() {
        let brackets = StringStyler::new(|text| format!("[{text}]"));
        assert_eq!(brackets.apply("x"), "[x]");
    }

    #[test]
    fn crossterm_style_wraps_text() {
        let mut style = ContentStyle::new();
        style.foreground_color = Some(Color::Red);
        style.attributes.set(Attribute::Bold);
        let styled = StringStyler::from_content_style(style).apply("hi");
        assert!(styled.starts_with('\x1b'));
        assert_eq!(crate::width::strip_styles(&styled), "hi");
        assert_eq!(crate::width::display_width(&styled), 2);
    }

    #[test]
    fn clones_share_identity() {
        let styler = StringStyler::new(str::to_uppercase);
        assert!(styler.ptr_eq(&styler.clone()));
        assert!(!styler.ptr_eq(&StringStyler::new(str::to_uppercase)));
    }
}
