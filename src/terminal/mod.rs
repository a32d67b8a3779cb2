//! Console size sources.
//!
//! The layout tree only needs the number of columns and rows; it polls the
//! terminal on every draw, so resize notifications reduce to "draw again".

use std::cell::Cell;
use std::rc::Rc;

use crate::error::Result;
use crate::geometry::Size;

pub trait Terminal {
    /// Current size in cells (`width` = columns, `height` = rows).
    fn console_size(&self) -> Result<Size>;
}

/// The process's controlling terminal, queried through crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermTerminal;

impl Terminal for CrosstermTerminal {
    fn console_size(&self) -> Result<Size> {
        let (columns, rows) = crossterm::terminal::size()?;
        Ok(Size::new(columns, rows))
    }
}

/// A terminal of a set size. Clones share the size, so a test can keep one
/// handle and resize the terminal the tree is drawing into.
#[derive(Debug, Clone)]
pub struct FixedTerminal {
    size: Rc<Cell<Size>>,
}

impl FixedTerminal {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            size: Rc::new(Cell::new(Size::new(columns, rows))),
        }
    }

    pub fn resize(&self, columns: u16, rows: u16) {
        self.size.set(Size::new(columns, rows));
    }
}

impl Terminal for FixedTerminal {
    fn console_size(&self) -> Result<Size> {
        Ok(self.size.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_terminal_clones_share_size() {
        let terminal = FixedTerminal::new(80, 24);
        let handle = terminal.clone();
        handle.resize(100, 30);
        assert_eq!(terminal.console_size().unwrap(), Size::new(100, 30));
    }
}
