use std::io::Write;

use crate::cursor;
use crate::error::Result;
use crate::layout::{LayoutTree, NodeId};
use crate::width::crop_end;

/// How rows are separated in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Rows joined by newlines; the block must start in the first column.
    #[default]
    Absolute,
    /// Rows joined by cursor save/restore sequences so the block can start
    /// anywhere.
    Relative,
}

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct RendererSettings {
    pub mode: RenderMode,
    /// Zero-based `(row, column)` to park the cursor at after each frame.
    pub restore_cursor: Option<(u16, u16)>,
}

/// Writes drawn trees to a terminal handle.
pub struct AnsiRenderer {
    settings: RendererSettings,
}

impl AnsiRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    /// Draw `id` and write it out.
    pub fn render(&mut self, writer: &mut impl Write, tree: &mut LayoutTree, id: NodeId) -> Result<()> {
        let output = match self.settings.mode {
            RenderMode::Absolute => render(tree, id)?,
            RenderMode::Relative => render_relative(tree, id)?,
        };
        writer.write_all(output.as_bytes())?;

        if let Some((row, column)) = self.settings.restore_cursor {
            let sequence = cursor::move_to(row.saturating_add(1), column.saturating_add(1));
            writer.write_all(sequence.as_bytes())?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// The node's lines cut down to what fits on screen from its absolute
/// position: rows past the bottom are dropped, each row is cropped at the
/// right edge.
pub fn fit_into_console(tree: &LayoutTree, id: NodeId) -> Result<Vec<String>> {
    let size = tree.console_size()?;
    let (columns, rows) = (i64::from(size.width), i64::from(size.height));
    let rect = tree.bounding_rect(id)?;
    let lines = tree.lines(id)?;

    let keep = (rows - rect.top).clamp(0, lines.len() as i64) as usize;
    let lines = &lines[..keep];

    if rect.left + rect.width < columns {
        return Ok(lines.to_vec());
    }
    let available = columns - rect.left;
    if available <= 0 {
        return Ok(Vec::new());
    }
    Ok(lines
        .iter()
        .map(|line| crop_end(line, available as usize))
        .collect())
}

/// Draw `id` and join its fitted lines with newlines.
pub fn render(tree: &mut LayoutTree, id: NodeId) -> Result<String> {
    tree.draw(id)?;
    Ok(fit_into_console(tree, id)?.join("\n"))
}

/// Draw `id` and join its fitted lines with cursor movements, so the block
/// keeps its column wherever the cursor was when it is printed.
pub fn render_relative(tree: &mut LayoutTree, id: NodeId) -> Result<String> {
    tree.draw(id)?;
    let lines = fit_into_console(tree, id)?;
    Ok(format!("{}{}", cursor::save(), lines.join(&cursor::next_row())))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::layout::OverlayProps;
    use crate::style::Style;
    use crate::terminal::FixedTerminal;
    use crate::unit::{Length, Unit};

    fn leaf(tree: &mut LayoutTree, content: &str) -> NodeId {
        tree.text(content, Rc::new(Style::default()))
    }

    #[test]
    fn render_joins_with_newlines() {
        let mut tree = LayoutTree::new(FixedTerminal::new(20, 5));
        let text = leaf(&mut tree, "ab\ncd");
        assert_eq!(render(&mut tree, text).unwrap(), "ab\ncd");
    }

    #[test]
    fn output_is_fitted_to_the_console() {
        let mut tree = LayoutTree::new(FixedTerminal::new(4, 2));
        let text = leaf(&mut tree, "abcdef\nghijkl\nmnopqr");
        assert_eq!(render(&mut tree, text).unwrap(), "abcd\nghij");
    }

    #[test]
    fn fitting_accounts_for_position() {
        let mut tree = LayoutTree::new(FixedTerminal::new(6, 3));
        let bg = leaf(&mut tree, "......\n......\n......");
        let fg = leaf(&mut tree, "abcd\nefgh");
        let overlay = tree
            .overlay(
                Unit::Auto,
                Unit::Auto,
                OverlayProps::new(Length::Cells(4), Length::Cells(2)),
                bg,
                fg,
            )
            .unwrap();
        tree.draw(overlay).unwrap();

        assert_eq!(fit_into_console(&tree, fg).unwrap(), ["ab"]);
    }

    #[test]
    fn relative_render_uses_cursor_moves() {
        let mut tree = LayoutTree::new(FixedTerminal::new(20, 5));
        let text = leaf(&mut tree, "ab\ncd");
        assert_eq!(
            render_relative(&mut tree, text).unwrap(),
            "\x1b7ab\x1b8\x1b[1B\x1b7cd"
        );
    }

    #[test]
    fn renderer_writes_and_restores_cursor() {
        let mut tree = LayoutTree::new(FixedTerminal::new(20, 5));
        let text = leaf(&mut tree, "hi");
        let mut renderer = AnsiRenderer::with_default();
        renderer.settings_mut().restore_cursor = Some((0, 0));

        let mut out = Vec::new();
        renderer.render(&mut out, &mut tree, text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hi\x1b[1;1H");
    }
}
