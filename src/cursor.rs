//! Cursor control sequences used when writing frames.
//!
//! Save/restore use the DEC pair (`ESC 7` / `ESC 8`).

const CSI: &str = "\x1b[";

/// Move the cursor to an absolute 1-based `row` and `column`.
pub fn move_to(row: u16, column: u16) -> String {
    format!("{CSI}{row};{column}H")
}

/// Move the cursor down `lines` rows, keeping its column.
pub fn move_down(lines: u16) -> String {
    if lines == 0 {
        String::new()
    } else {
        format!("{CSI}{lines}B")
    }
}

/// Save the cursor position.
pub fn save() -> &'static str {
    "\x1b7"
}

/// Restore the position stored by [`save`].
pub fn restore() -> &'static str {
    "\x1b8"
}

/// Separator placed between rows of a relatively rendered block: go back to
/// where the previous row started, step one row down, and remember that spot.
pub fn next_row() -> String {
    format!("{}{}{}", restore(), move_down(1), save())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_position_is_one_based() {
        assert_eq!(move_to(3, 5), "\x1b[3;5H");
    }

    #[test]
    fn zero_moves_are_empty() {
        assert_eq!(move_down(0), "");
        assert_eq!(move_down(2), "\x1b[2B");
    }

    #[test]
    fn row_separator_restores_then_saves() {
        assert_eq!(next_row(), "\x1b8\x1b[1B\x1b7");
    }
}
