//! Terminal display width helpers.
//!
//! Every other module measures and cuts text through here so that escape
//! sequences stay zero-width and wide characters never get split in half.

mod ansi;
mod core;

pub use ansi::{ESC, RESET, Segment, Segments, has_escape, is_final_ansi_byte, is_reset, segments};
pub use core::{
    char_width, crop_end, crop_start, display_width, insert, max_width, place, slice_by_width,
    spaces, strip_styles,
};
