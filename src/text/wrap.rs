use std::mem;

use crate::width::display_width;

use super::definition::Wrap;

/// Greedy word wrap.
///
/// Lines already within `width` (blank ones included) pass through untouched.
/// Longer lines are split on spaces; a word wider than `width` keeps a line
/// of its own rather than being cut.
pub fn wrap<S: AsRef<str>>(lines: &[S], width: usize) -> Vec<String> {
    let mut wrapped = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        if display_width(line) <= width {
            wrapped.push(line.to_string());
            continue;
        }

        let start = wrapped.len();
        let mut current = String::new();
        let mut current_width = 0;

        for word in line.split(' ').filter(|word| !word.is_empty()) {
            let word_width = display_width(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                wrapped.push(mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        if !current.is_empty() || wrapped.len() == start {
            wrapped.push(current);
        }
    }

    wrapped
}

/// In-place variant honouring the wrap mode.
pub fn wrap_lines(lines: &mut Vec<String>, width: usize, mode: Wrap) {
    match mode {
        Wrap::Wrap => *lines = wrap(lines.as_slice(), width),
        Wrap::NoWrap => {}
    }
}
