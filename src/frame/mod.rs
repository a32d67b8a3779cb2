//! Border, margin and padding compositors.
//!
//! Each function takes a rectangular block of lines plus its current width,
//! adds its frame in place, and returns the new width.

mod border;
mod charset;
mod spacing;

pub use border::{Border, apply_border};
pub use charset::BorderCharset;
pub use spacing::{Spacing, apply_margin, apply_padding};
