use crate::unit::round_half_up;
use crate::width::{display_width, spaces};

use super::definition::{HorizontalAlign, VerticalAlign};

/// Pad `line` to `width` columns. Lines already at least that wide only get
/// justified (which never widens them) or are returned as-is.
pub fn align_line(line: &str, width: usize, align: HorizontalAlign) -> String {
    let diff = width.saturating_sub(display_width(line));

    match align {
        HorizontalAlign::Left => format!("{line}{}", spaces(diff)),
        HorizontalAlign::Right => format!("{}{line}", spaces(diff)),
        HorizontalAlign::Center => {
            let left = round_half_up(diff as f64 / 2.0) as usize;
            format!("{}{line}{}", spaces(left), spaces(diff - left))
        }
        HorizontalAlign::Justify => justify(line, width),
    }
}

pub fn align_horizontal(lines: &mut [String], width: usize, align: HorizontalAlign) {
    for line in lines.iter_mut() {
        *line = align_line(line, width, align);
    }
}

/// Spread words so the line spans `width`, extra spaces going to the
/// leftmost gaps first. Single words are left-aligned.
fn justify(line: &str, width: usize) -> String {
    let trimmed = line.trim_matches(' ');
    let trimmed_width = display_width(trimmed);
    let words: Vec<&str> = trimmed.split(' ').filter(|word| !word.is_empty()).collect();

    if words.len() < 2 {
        return format!("{trimmed}{}", spaces(width.saturating_sub(trimmed_width)));
    }
    if trimmed_width >= width {
        return trimmed.to_string();
    }

    let gaps = words.len() - 1;
    let words_width: usize = words.iter().map(|word| display_width(word)).sum();
    let total = width.saturating_sub(words_width).max(gaps);
    let (base, extra) = (total / gaps, total % gaps);

    let mut justified = String::with_capacity(line.len() + total);
    for (idx, word) in words.iter().enumerate() {
        if idx > 0 {
            justified.push_str(&spaces(base + usize::from(idx <= extra)));
        }
        justified.push_str(word);
    }
    justified
}

/// Pad a block to `height` rows with blank lines.
///
/// `Middle` puts the smaller half above the content.
pub fn align_vertical(lines: &mut Vec<String>, height: usize, align: VerticalAlign) {
    let diff = height.saturating_sub(lines.len());
    if diff == 0 {
        return;
    }

    let above = match align {
        VerticalAlign::Top => 0,
        VerticalAlign::Middle => diff / 2,
        VerticalAlign::Bottom => diff,
    };

    lines.splice(0..0, std::iter::repeat_n(String::new(), above));
    lines.extend(std::iter::repeat_n(String::new(), diff - above));
}
