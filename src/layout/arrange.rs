//! Layout pass: every node draws its children, then splices their lines into
//! its own block according to its kind.

use crate::error::Result;
use crate::width::{crop_end, insert, place, spaces};

use super::core::LayoutTree;
use super::node::{NodeId, Shape};

impl LayoutTree {
    /// Redraw `id` if anything in its subtree changed; otherwise keep its
    /// previous lines.
    pub(crate) fn layout(&mut self, id: NodeId) -> Result<()> {
        if !self.has_changed(id)? {
            self.stats.skipped += 1;
            return Ok(());
        }
        self.stats.laid_out += 1;

        let shape = self.node(id)?.kind.shape();
        let lines = match shape {
            Shape::Container => self.layout_container(id)?,
            Shape::Row => self.layout_row(id)?,
            Shape::Column => self.layout_column(id)?,
            Shape::Overlay => self.layout_overlay(id)?,
            Shape::Leaf => self.layout_leaf(id)?,
        };

        let node = self.node_mut(id)?;
        node.lines = if node.visible {
            lines
        } else {
            let rect = node.computed;
            vec![spaces(rect.width.max(0) as usize); rect.height.max(0) as usize]
        };
        node.changed = false;
        Ok(())
    }

    /// Children stacked on top of each other at the origin, later ones over
    /// earlier ones.
    fn layout_container(&mut self, id: NodeId) -> Result<Vec<String>> {
        let node = self.node(id)?;
        let (width, height) = (
            node.computed.width.max(0) as usize,
            node.computed.height.max(0) as usize,
        );
        let children = node.children.clone();

        let mut lines = vec![spaces(width); height];
        for child in children {
            self.layout(child)?;
            let child_node = self.node_mut(child)?;
            child_node.computed.top = 0;
            child_node.computed.left = 0;
            if !child_node.visible {
                continue;
            }

            for (row, line) in lines.iter_mut().zip(child_node.lines.iter()) {
                *row = insert(row, &crop_end(line, width), 0);
            }
        }

        Ok(lines
            .into_iter()
            .map(|line| place(&line, 0, width))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::style::Style;
    use crate::terminal::FixedTerminal;
    use crate::unit::Unit;

    #[test]
    fn container_layers_children() {
        let mut tree = LayoutTree::new(FixedTerminal::new(20, 5));
        let back = tree.text("......\n......", Rc::new(Style::default()));
        let front = tree.text("ab", Rc::new(Style::default()));
        let container = tree
            .container(Unit::Auto, Unit::Auto, &[back, front])
            .unwrap();
        tree.draw(container).unwrap();

        assert_eq!(tree.lines(container).unwrap(), ["ab....", "......"]);
    }

    #[test]
    fn invisible_nodes_render_blank() {
        let mut tree = LayoutTree::new(FixedTerminal::new(20, 5));
        let text = tree.text("hidden", Rc::new(Style::default()));
        tree.set_visible(text, false).unwrap();
        tree.draw(text).unwrap();

        assert_eq!(tree.lines(text).unwrap(), ["      "]);
        assert_eq!(tree.node(text).unwrap().computed().width, 6);
    }
}
