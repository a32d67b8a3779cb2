//! Horizontal and vertical stacks: children side by side or one below the
//! other, separated by the gap and shifted by the stack's alignment.

use crate::error::Result;
use crate::style::StringStyler;
use crate::width::{place, spaces};

use super::core::LayoutTree;
use super::node::{NodeId, StackProps};

impl LayoutTree {
    fn stack_props(&self, id: NodeId) -> Result<StackProps> {
        let props = self.node(id)?.kind.stack().cloned().unwrap_or_default();
        Ok(props)
    }

    pub(crate) fn layout_row(&mut self, id: NodeId) -> Result<Vec<String>> {
        let props = self.stack_props(id)?;
        let gap = self.stack_gap(id)?;
        let node = self.node(id)?;
        let width = node.computed.width.max(0);
        let height = node.computed.height.max(0);
        let children = node.children.clone();

        let mut rows = vec![String::new(); height as usize];
        let mut x = 0;
        for (index, child) in children.iter().enumerate() {
            if index > 0 && gap > 0 {
                let columns = gap.min(width - x).max(0);
                let fill = spaces(columns as usize);
                rows.iter_mut().for_each(|row| row.push_str(&fill));
                x += columns;
            }

            self.layout(*child)?;
            let child_node = self.node_mut(*child)?;
            let (child_width, child_height) =
                (child_node.computed.width, child_node.computed.height);
            let y = props.align_y.resolve(height - child_height, None);
            child_node.computed.left = x;
            child_node.computed.top = y;

            let visible = child_width.min(width - x).max(0);
            for (index, row) in rows.iter_mut().enumerate() {
                let line = usize::try_from(index as i64 - y)
                    .ok()
                    .and_then(|source| child_node.lines.get(source));
                match line {
                    Some(line) => row.push_str(&place(line, 0, visible as usize)),
                    None => row.push_str(&spaces(visible as usize)),
                }
            }
            x += visible;
        }

        let offset = props.align_x.resolve(width - x, None);
        for child in &children {
            self.node_mut(*child)?.computed.left += offset;
        }
        let node = self.node_mut(id)?;
        node.used_width = x;

        Ok(finish(
            rows.iter().map(|row| place(row, offset, width as usize)),
            props.styler.as_ref(),
        ))
    }

    pub(crate) fn layout_column(&mut self, id: NodeId) -> Result<Vec<String>> {
        let props = self.stack_props(id)?;
        let gap = self.stack_gap(id)?;
        let node = self.node(id)?;
        let width = node.computed.width.max(0);
        let height = node.computed.height.max(0);
        let children = node.children.clone();
        let blank = spaces(width as usize);

        let mut rows = Vec::with_capacity(height as usize);
        let mut y = 0;
        for (index, child) in children.iter().enumerate() {
            if index > 0 && gap > 0 {
                let count = gap.min(height - y).max(0);
                rows.extend((0..count).map(|_| blank.clone()));
                y += count;
            }

            self.layout(*child)?;
            let child_node = self.node_mut(*child)?;
            let (child_width, child_height) =
                (child_node.computed.width, child_node.computed.height);
            let x = props.align_x.resolve(width - child_width, None);
            child_node.computed.left = x;
            child_node.computed.top = y;

            let visible = child_height.min(height - y).max(0) as usize;
            rows.extend(
                child_node
                    .lines
                    .iter()
                    .take(visible)
                    .map(|line| place(line, x, width as usize)),
            );
            let drawn = child_node.lines.len().min(visible);
            rows.extend((drawn..visible).map(|_| blank.clone()));
            y += visible as i64;
        }

        let offset = props.align_y.resolve(height - y, None);
        if offset > 0 {
            rows.splice(0..0, (0..offset).map(|_| blank.clone()));
        } else if offset < 0 {
            let dropped = (offset.unsigned_abs() as usize).min(rows.len());
            rows.drain(..dropped);
        }
        rows.resize(height as usize, blank);

        for child in &children {
            self.node_mut(*child)?.computed.top += offset;
        }
        let node = self.node_mut(id)?;
        node.used_height = y;

        Ok(finish(rows.into_iter(), props.styler.as_ref()))
    }
}

fn finish(rows: impl Iterator<Item = String>, styler: Option<&StringStyler>) -> Vec<String> {
    match styler {
        Some(styler) => rows.map(|row| styler.apply(&row)).collect(),
        None => rows.collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::style::Style;
    use crate::terminal::FixedTerminal;
    use crate::unit::{Length, Unit};

    fn tree() -> LayoutTree {
        LayoutTree::new(FixedTerminal::new(40, 12))
    }

    fn word(tree: &mut LayoutTree, content: &str) -> NodeId {
        tree.text(content, Rc::new(Style::default()))
    }

    #[test]
    fn row_places_children_with_gap() {
        let mut tree = tree();
        let a = word(&mut tree, "aaaa");
        let b = word(&mut tree, "bbbb");
        let row = tree
            .hstack(
                Unit::cells(10),
                Unit::Auto,
                StackProps::new().with_gap(Length::Cells(1)),
                &[a, b],
            )
            .unwrap();
        tree.draw(row).unwrap();

        assert_eq!(tree.lines(row).unwrap(), ["aaaa bbbb "]);
        assert_eq!(tree.node(row).unwrap().used_width(), 9);
        assert_eq!(tree.node(b).unwrap().computed().left, 5);
    }

    #[test]
    fn row_aligns_children_on_both_axes() {
        let mut tree = tree();
        let tall = word(&mut tree, "a\na\na");
        let short = word(&mut tree, "b");
        let props = StackProps::new()
            .with_align_x(Length::END)
            .with_align_y(Length::CENTER);
        let row = tree
            .hstack(Unit::cells(4), Unit::Auto, props, &[tall, short])
            .unwrap();
        tree.draw(row).unwrap();

        assert_eq!(tree.lines(row).unwrap(), ["  a ", "  ab", "  a "]);
        assert_eq!(tree.node(short).unwrap().computed().top, 1);
        assert_eq!(tree.node(short).unwrap().computed().left, 3);
    }

    #[test]
    fn row_clips_overflowing_children() {
        let mut tree = tree();
        let a = word(&mut tree, "aaa");
        let b = word(&mut tree, "bbb");
        let row = tree
            .hstack(Unit::cells(4), Unit::cells(1), StackProps::new(), &[a, b])
            .unwrap();
        tree.draw(row).unwrap();
        assert_eq!(tree.lines(row).unwrap(), ["aaab"]);
    }

    #[test]
    fn column_centers_children() {
        let mut tree = tree();
        let a = word(&mut tree, "abcd");
        let b = word(&mut tree, "xy");
        let props = StackProps::new()
            .with_gap(Length::Cells(1))
            .with_align_x(Length::CENTER);
        let column = tree
            .vstack(Unit::Auto, Unit::Auto, props, &[a, b])
            .unwrap();
        tree.draw(column).unwrap();

        assert_eq!(tree.lines(column).unwrap(), ["abcd", "    ", " xy "]);
        assert_eq!(tree.node(b).unwrap().computed().left, 1);
        assert_eq!(tree.node(b).unwrap().computed().top, 2);
    }

    #[test]
    fn column_aligns_to_bottom() {
        let mut tree = tree();
        let a = word(&mut tree, "ab");
        let props = StackProps::new().with_align_y(Length::END);
        let column = tree
            .vstack(Unit::cells(2), Unit::cells(3), props, &[a])
            .unwrap();
        tree.draw(column).unwrap();

        assert_eq!(tree.lines(column).unwrap(), ["  ", "  ", "ab"]);
        assert_eq!(tree.node(a).unwrap().computed().top, 2);
    }

    #[test]
    fn styler_wraps_whole_rows() {
        let mut tree = tree();
        let a = word(&mut tree, "a");
        let props = StackProps::new().with_styler(StringStyler::new(|row| format!("<{row}>")));
        let row = tree
            .hstack(Unit::cells(3), Unit::Auto, props, &[a])
            .unwrap();
        tree.draw(row).unwrap();
        assert_eq!(tree.lines(row).unwrap(), ["<a  >"]);
    }
}
