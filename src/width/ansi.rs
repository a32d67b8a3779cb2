/// Escape character that opens every control sequence.
pub const ESC: char = '\x1b';

/// SGR sequence clearing all styling.
pub const RESET: &str = "\x1b[0m";

/// Whether `ch` terminates a CSI sequence.
///
/// The `p`..`~` range is left out on purpose: those finals are private-use
/// and never emitted by stylers.
pub fn is_final_ansi_byte(ch: char) -> bool {
    ('\u{40}'..'\u{70}').contains(&ch)
}

/// Whether `sequence` clears accumulated styling.
pub fn is_reset(sequence: &str) -> bool {
    sequence == RESET || sequence == "\x1b[m"
}

pub fn has_escape(text: &str) -> bool {
    text.contains(ESC)
}

/// Atomic piece of a styled string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A complete escape sequence, always zero columns wide.
    Escape(&'a str),
    /// A single visible (or zero-width) codepoint.
    Char(char),
}

impl Segment<'_> {
    /// Length in bytes of the segment within its source string.
    pub fn len(&self) -> usize {
        match self {
            Segment::Escape(sequence) => sequence.len(),
            Segment::Char(ch) => ch.len_utf8(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator splitting text into escape sequences and codepoints.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

pub fn segments(text: &str) -> Segments<'_> {
    Segments { text, pos: 0 }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;

        if first != ESC {
            self.pos += first.len_utf8();
            return Some(Segment::Char(first));
        }

        let end = escape_len(rest);
        self.pos += end;
        Some(Segment::Escape(&rest[..end]))
    }
}

/// Byte length of the escape sequence at the start of `rest`.
///
/// `ESC [` runs until a final byte; an unterminated sequence swallows the rest
/// of the input. `ESC` followed by anything else is a two-codepoint sequence
/// (cursor save/restore and friends).
fn escape_len(rest: &str) -> usize {
    let mut chars = rest.char_indices().skip(1);
    match chars.next() {
        None => rest.len(),
        Some((_, '[')) => chars
            .find(|(_, ch)| is_final_ansi_byte(*ch))
            .map(|(idx, ch)| idx + ch.len_utf8())
            .unwrap_or(rest.len()),
        Some((idx, ch)) => idx + ch.len_utf8(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<Segment<'_>> {
        segments(text).collect()
    }

    #[test]
    fn splits_sgr_sequences() {
        assert_eq!(
            collect("\x1b[31ma\x1b[0m"),
            vec![
                Segment::Escape("\x1b[31m"),
                Segment::Char('a'),
                Segment::Escape("\x1b[0m"),
            ]
        );
    }

    #[test]
    fn unterminated_sequence_runs_to_end() {
        assert_eq!(
            collect("a\x1b[38;5"),
            vec![Segment::Char('a'), Segment::Escape("\x1b[38;5")]
        );
    }

    #[test]
    fn short_escapes_are_two_codepoints() {
        assert_eq!(
            collect("\x1b7x\x1b8"),
            vec![
                Segment::Escape("\x1b7"),
                Segment::Char('x'),
                Segment::Escape("\x1b8"),
            ]
        );
    }

    #[test]
    fn lone_escape_is_kept() {
        assert_eq!(collect("\x1b"), vec![Segment::Escape("\x1b")]);
    }

    #[test]
    fn reset_detection() {
        assert!(is_reset("\x1b[0m"));
        assert!(is_reset("\x1b[m"));
        assert!(!is_reset("\x1b[1m"));
    }
}
