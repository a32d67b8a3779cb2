use crate::width::{crop_end, display_width};

use super::definition::Overflow;

/// Cut a single line down to `width` according to `overflow`.
///
/// Lines that already fit are returned unchanged; alignment pads them later.
pub fn resize_line(line: &str, width: usize, overflow: &Overflow) -> String {
    if display_width(line) <= width {
        return line.to_string();
    }

    match overflow {
        Overflow::Clip => crop_end(line, width),
        Overflow::Ellipsis(ellipsis) => with_ellipsis(line, width, ellipsis),
    }
}

pub fn resize_horizontal(lines: &mut [String], width: usize, overflow: &Overflow) {
    for line in lines.iter_mut() {
        if display_width(line) > width {
            *line = resize_line(line, width, overflow);
        }
    }
}

/// Drop rows beyond `height`. With an ellipsis overflow the new last row
/// always gives up its tail to the marker, even when it had room to spare.
/// Padding short blocks is left to vertical alignment.
pub fn resize_vertical(lines: &mut Vec<String>, width: usize, height: usize, overflow: &Overflow) {
    if lines.len() <= height {
        return;
    }

    lines.truncate(height);

    if let (Overflow::Ellipsis(ellipsis), Some(last)) = (overflow, lines.last_mut()) {
        let kept = display_width(last).min(width);
        *last = with_ellipsis(last, kept.max(display_width(ellipsis)).min(width), ellipsis);
    }
}

fn with_ellipsis(line: &str, width: usize, ellipsis: &str) -> String {
    let ellipsis_width = display_width(ellipsis);
    if ellipsis_width > width {
        return crop_end(ellipsis, width);
    }

    let mut cropped = crop_end(line, width - ellipsis_width);
    cropped.push_str(ellipsis);
    cropped
}
