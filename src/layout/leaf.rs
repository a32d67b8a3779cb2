use crate::error::Result;
use crate::frame::{apply_border, apply_margin, apply_padding};
use crate::text::shape;

use super::core::LayoutTree;
use super::node::{NodeId, NodeKind};

impl LayoutTree {
    /// Shape the text into the content box, then add padding, border and
    /// margin around it.
    pub(crate) fn layout_leaf(&self, id: NodeId) -> Result<Vec<String>> {
        let node = self.node(id)?;
        let NodeKind::StyledLeaf(leaf) = &node.kind else {
            return Ok(Vec::new());
        };
        if leaf.too_small {
            return Ok(Vec::new());
        }

        let style = leaf.style();
        let width = node.computed.width.max(0) as usize;
        let height = node.computed.height.max(0) as usize;
        let content_width = width.saturating_sub(style.horizontal_allowance());
        let content_height = height.saturating_sub(style.vertical_allowance());

        let mut lines = shape(leaf.content(), content_width, content_height, &style.text);
        if let Some(styler) = &style.styler {
            for line in &mut lines {
                *line = styler.apply(line);
            }
        }

        let mut block_width = content_width;
        block_width = apply_padding(&mut lines, block_width, &style.padding, style.styler.as_ref());
        block_width = apply_border(&mut lines, block_width, &style.border);
        apply_margin(&mut lines, block_width, &style.margin, ' ');
        Ok(lines)
    }
}
