use crate::error::{LayoutError, Result};
use crate::width::{crop_end, crop_start, insert, place, spaces};

use super::core::LayoutTree;
use super::node::{NodeId, NodeKind};

impl LayoutTree {
    /// Paint the foreground onto the background at the overlay's offsets.
    /// Whatever falls outside the background is clipped.
    pub(crate) fn layout_overlay(&mut self, id: NodeId) -> Result<Vec<String>> {
        let node = self.node(id)?;
        let [background, foreground] = node.children[..] else {
            return Err(LayoutError::OverlayChildren);
        };
        let NodeKind::Overlay(props) = &node.kind else {
            return Ok(Vec::new());
        };
        let props = props.clone();

        self.layout(background)?;
        self.layout(foreground)?;

        let back = self.node_mut(background)?;
        back.computed.top = 0;
        back.computed.left = 0;
        let (width, height) = (back.computed.width.max(0), back.computed.height.max(0));
        let mut rows: Vec<String> = back
            .lines
            .iter()
            .take(height as usize)
            .map(|line| place(line, 0, width as usize))
            .collect();
        rows.resize(height as usize, spaces(width as usize));

        let front = self.node_mut(foreground)?;
        let x = props.x.resolve(width - front.computed.width, None);
        let y = props.y.resolve(height - front.computed.height, None);
        front.computed.left = x;
        front.computed.top = y;
        if !front.visible || x >= width {
            return Ok(rows);
        }

        let front_width = front.computed.width.max(0) as usize;
        for (index, line) in front.lines.iter().enumerate() {
            let row = y + index as i64;
            if row < 0 || row >= height {
                continue;
            }
            let line = place(line, 0, front_width);
            let target = &rows[row as usize];
            let merged = if x >= 0 {
                insert(target, &crop_end(&line, (width - x) as usize), x as usize)
            } else {
                let visible = crop_start(&line, x.unsigned_abs() as usize);
                insert(target, &crop_end(&visible, width as usize), 0)
            };
            rows[row as usize] = merged;
        }
        Ok(rows)
    }
}
