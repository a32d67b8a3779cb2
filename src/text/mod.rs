//! Text engine: wrapping, resizing with overflow, and alignment.
//!
//! The steps always run in the same order (wrap, vertical resize/align,
//! horizontal resize/align); [`shape`] strings them together for a content box.

mod align;
mod definition;
mod resize;
mod wrap;

pub use align::{align_horizontal, align_line, align_vertical};
pub use definition::{HorizontalAlign, Overflow, TextStyle, VerticalAlign, Wrap, DEFAULT_ELLIPSIS};
pub use resize::{resize_horizontal, resize_line, resize_vertical};
pub use wrap::{wrap, wrap_lines};

use crate::width::max_width;

/// Split raw content into lines.
pub fn content_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

/// Run the full text pipeline for a `width` x `height` content box.
pub fn shape(content: &str, width: usize, height: usize, text: &TextStyle) -> Vec<String> {
    let mut lines = content_lines(content);
    wrap_lines(&mut lines, width, text.wrap);

    resize_vertical(&mut lines, width, height, &text.overflow);
    align_vertical(&mut lines, height, text.vertical_align);

    resize_horizontal(&mut lines, width, &text.overflow);
    align_horizontal(&mut lines, width, text.horizontal_align);
    lines
}

/// Natural content size: widest raw line, and line count once wrapped at
/// `wrap_width` (or unwrapped when none is given).
pub fn natural_size(content: &str, wrap_width: Option<usize>, text: &TextStyle) -> (usize, usize) {
    let mut lines = content_lines(content);
    let width = max_width(&lines);
    if let Some(wrap_width) = wrap_width {
        wrap_lines(&mut lines, wrap_width, text.wrap);
    }
    (width, lines.len())
}
