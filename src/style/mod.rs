//! Style records shared by styled leaves.

mod core;
mod styler;

pub use core::Style;
pub use styler::StringStyler;
