use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

use super::ansi::{RESET, Segment, has_escape, is_reset, segments};

/// Display width of a single codepoint: 0 for combining/control, 2 for wide.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Compute the display width of a string, skipping escape sequences.
pub fn display_width(text: &str) -> usize {
    if text.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        return text.len();
    }

    segments(text)
        .map(|segment| match segment {
            Segment::Char(ch) => char_width(ch),
            Segment::Escape(_) => 0,
        })
        .sum()
}

/// Widest line of a block.
pub fn max_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| display_width(line.as_ref()))
        .max()
        .unwrap_or(0)
}

pub fn spaces(count: usize) -> String {
    " ".repeat(count)
}

/// Remove every escape sequence from `text`.
pub fn strip_styles(text: &str) -> String {
    let clean = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&clean).into_owned()
}

/// Longest prefix of `text` that is at most `max_width` columns wide.
///
/// Escape sequences before the cut are kept. A wide character straddling the
/// cut is replaced by a blank so the result still fills `max_width` columns.
pub fn crop_end(text: &str, max_width: usize) -> String {
    let mut cropped = String::with_capacity(text.len());
    let mut used = 0;

    for segment in segments(text) {
        match segment {
            Segment::Escape(sequence) => cropped.push_str(sequence),
            Segment::Char(ch) => {
                let width = char_width(ch);
                if used + width > max_width {
                    cropped.push_str(&spaces(max_width - used));
                    break;
                }
                used += width;
                cropped.push(ch);
            }
        }
    }

    cropped
}

/// Drop the first `skip` columns of `text`.
///
/// Styling active at the cut point is re-emitted in front of the remainder;
/// a reset seen before the cut discards whatever was accumulated up to it.
/// A wide character straddling the cut leaves a blank for its visible half.
pub fn crop_start(text: &str, skip: usize) -> String {
    if skip == 0 {
        return text.to_string();
    }

    let mut preserved = String::new();
    let mut used = 0;
    let mut pad = 0;
    let mut cut = text.len();
    let mut pos = 0;

    for segment in segments(text) {
        match segment {
            Segment::Escape(sequence) => {
                if used >= skip {
                    cut = pos;
                    break;
                }
                if is_reset(sequence) {
                    preserved.clear();
                } else {
                    preserved.push_str(sequence);
                }
            }
            Segment::Char(ch) => {
                let width = char_width(ch);
                if used >= skip && width > 0 {
                    cut = pos;
                    break;
                }
                used += width;
                if used > skip {
                    pad = used - skip;
                    cut = pos + segment.len();
                    break;
                }
            }
        }
        pos += segment.len();
    }

    let mut out = preserved;
    out.push_str(&spaces(pad));
    out.push_str(&text[cut..]);
    out
}

/// Columns `from..to` of `text`.
pub fn slice_by_width(text: &str, from: usize, to: usize) -> String {
    crop_end(&crop_start(text, from), to.saturating_sub(from))
}

/// Overlay `fg` onto `bg` starting at display column `col`.
///
/// When either side carries styling, a reset is placed at both seams so
/// neither side bleeds into the other.
pub fn insert(bg: &str, fg: &str, col: usize) -> String {
    let styled = has_escape(bg) || has_escape(fg);
    let bg_width = display_width(bg);

    let mut out = crop_end(bg, col);
    out.push_str(&spaces(col.saturating_sub(bg_width)));
    if styled {
        out.push_str(RESET);
    }
    out.push_str(fg);
    if styled {
        out.push_str(RESET);
    }
    out.push_str(&crop_start(bg, col + display_width(fg)));
    out
}

/// Render `line` into exactly `width` columns shifted right by `offset`.
///
/// A negative offset crops the line from its start instead of padding it.
pub fn place(line: &str, offset: i64, width: usize) -> String {
    let (lead, source) = if offset >= 0 {
        (offset as usize, Cow::Borrowed(line))
    } else {
        (0, Cow::Owned(crop_start(line, offset.unsigned_abs() as usize)))
    };

    let lead = lead.min(width);
    let body = crop_end(&source, width - lead);
    let body_width = display_width(&body);

    let mut out = spaces(lead);
    out.push_str(&body);
    out.push_str(&spaces(width - lead - body_width));
    out
}
