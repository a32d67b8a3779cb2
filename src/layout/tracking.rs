//! Change tracking and node lifecycle.
//!
//! `changed` is set by every mutation and cleared once the node is laid out.
//! `has_changed` folds it over the subtree, memoized per draw pass.

use crate::error::{LayoutError, Result};
use crate::logging::{LogLevel, json_kv};
use crate::metrics::RenderMetrics;

use super::core::LayoutTree;
use super::node::{NodeId, Resize};

impl LayoutTree {
    /// Whether the node or anything beneath it changed since it was last
    /// laid out.
    pub fn has_changed(&mut self, id: NodeId) -> Result<bool> {
        let pass = self.pass;
        let node = self.node(id)?;
        if let Some((memo_pass, changed)) = node.memo
            && memo_pass == pass
        {
            return Ok(changed);
        }

        let mut changed = node.changed;
        for child in node.children.clone() {
            // Every child is visited so each gets its memo for this pass.
            if self.has_changed(child)? {
                changed = true;
            }
        }

        self.node_mut(id)?.memo = Some((pass, changed));
        Ok(changed)
    }

    /// Mark the node and its whole subtree changed.
    pub fn force_update(&mut self, id: NodeId) -> Result<()> {
        let pass = self.pass;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current)?;
            node.changed = true;
            node.memo = Some((pass, true));
            stack.extend(node.children.iter().copied());
        }
        Ok(())
    }

    pub fn on_mount(&mut self, id: NodeId, listener: impl FnMut(NodeId) + 'static) -> Result<()> {
        self.node_mut(id)?.listeners.mount.push(Box::new(listener));
        Ok(())
    }

    pub fn on_unmount(
        &mut self,
        id: NodeId,
        listener: impl FnMut(NodeId) + 'static,
    ) -> Result<()> {
        self.node_mut(id)?.listeners.unmount.push(Box::new(listener));
        Ok(())
    }

    /// Called whenever a draw resolves the node to a different size than the
    /// previous draw did, whether or not its content changed.
    pub fn on_resize(&mut self, id: NodeId, listener: impl FnMut(Resize) + 'static) -> Result<()> {
        self.node_mut(id)?.listeners.resize.push(Box::new(listener));
        Ok(())
    }

    /// Mount the subtree: parents before children, already-mounted nodes
    /// skipped. Mounted nodes are marked changed.
    pub(crate) fn mount(&mut self, id: NodeId) -> Result<()> {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current)?;
            if node.mounted {
                continue;
            }
            node.mounted = true;
            node.changed = true;
            for listener in node.listeners.mount.iter_mut() {
                listener(current);
            }
            stack.extend(node.children.iter().rev().copied());
            count += 1;
            self.log_node(LogLevel::Debug, "node.mounted", current);
        }

        if count > 0 {
            self.record_metrics(|metrics| metrics.record_mounts(count));
        }
        Ok(())
    }

    /// Unmount the subtree, children before their parent.
    pub(crate) fn unmount(&mut self, id: NodeId) -> Result<()> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            if !node.mounted {
                continue;
            }
            order.push(current);
            stack.extend(node.children.iter().copied());
        }

        for current in order.iter().rev() {
            let node = self.node_mut(*current)?;
            node.mounted = false;
            for listener in node.listeners.unmount.iter_mut() {
                listener(*current);
            }
            self.log_node(LogLevel::Debug, "node.unmounted", *current);
        }

        let count = order.len();
        if count > 0 {
            self.record_metrics(|metrics| metrics.record_unmounts(count));
        }
        Ok(())
    }

    /// Record the size just computed. A size different from the previous
    /// draw's fires resize listeners and forces the subtree to redraw.
    pub(crate) fn note_size(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        let size = (node.computed.width, node.computed.height);
        let previous = node.last_size.replace(size);
        let Some((previous_width, previous_height)) = previous else {
            return Ok(());
        };
        if previous == Some(size) {
            return Ok(());
        }

        let resize = Resize {
            node: id,
            width: size.0,
            height: size.1,
            previous_width,
            previous_height,
        };
        for listener in node.listeners.resize.iter_mut() {
            listener(resize);
        }
        self.force_update(id)?;

        self.log(
            LogLevel::Debug,
            "node.resized",
            [
                json_kv("node", id.index()),
                json_kv("width", resize.width),
                json_kv("height", resize.height),
                json_kv("previous_width", previous_width),
                json_kv("previous_height", previous_height),
            ],
        );
        self.record_metrics(RenderMetrics::record_resize);
        Ok(())
    }

    /// Structural equivalence: the same node, or nodes sharing a declared
    /// identifier and kind whose children are pairwise equivalent.
    pub fn almost_the_same(&self, a: NodeId, b: NodeId) -> Result<bool> {
        if a == b {
            return Ok(true);
        }

        let (left, right) = (self.node(a)?, self.node(b)?);
        let same_identifier = matches!(
            (left.identifier(), right.identifier()),
            (Some(x), Some(y)) if x == y
        );
        if !same_identifier
            || !left.kind.same_kind(&right.kind)
            || left.children.len() != right.children.len()
        {
            return Ok(false);
        }

        for (x, y) in left.children.iter().zip(right.children.iter()) {
            if !self.almost_the_same(*x, *y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Swap `old` for `new` under `parent`, returning the node that ends up in
    /// the slot.
    ///
    /// When the two are [almost the same](Self::almost_the_same), `old` takes
    /// over `new`'s properties and stays mounted with its listeners, and
    /// `new` is freed. Otherwise `old` is unmounted and freed and `new` is
    /// mounted in its place.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> Result<NodeId> {
        let index = self.child_position(parent, old)?;
        if old == new {
            self.force_update(old)?;
            return Ok(old);
        }
        if self.node(new)?.parent.is_some() {
            return Err(LayoutError::AlreadyAttached(new));
        }

        if self.almost_the_same(old, new)? {
            self.adopt(old, new)?;
            self.force_update(old)?;
            return Ok(old);
        }

        self.unmount(old)?;
        self.free_subtree(old)?;
        let parent_node = self.node_mut(parent)?;
        parent_node.children.remove(index);
        parent_node.changed = true;
        self.insert_child(parent, index, new)?;
        Ok(new)
    }

    /// Move `source`'s properties onto `target` pairwise down both subtrees,
    /// then free `source`'s nodes.
    fn adopt(&mut self, target: NodeId, source: NodeId) -> Result<()> {
        let source_node = self.free_single(source)?;
        let target_node = self.node_mut(target)?;
        target_node.kind = source_node.kind;
        target_node.width = source_node.width;
        target_node.height = source_node.height;
        target_node.visible = source_node.visible;

        let pairs: Vec<_> = target_node
            .children
            .iter()
            .copied()
            .zip(source_node.children)
            .collect();
        for (target_child, source_child) in pairs {
            self.adopt(target_child, source_child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::{NodeKind, StackProps};
    use crate::style::Style;
    use crate::terminal::FixedTerminal;
    use crate::unit::Unit;

    fn tree() -> LayoutTree {
        LayoutTree::new(FixedTerminal::new(30, 10))
    }

    fn named_leaf(tree: &mut LayoutTree, name: &str, content: &str) -> NodeId {
        let id = tree.text(content, Rc::new(Style::default()));
        tree.set_identifier(id, name).unwrap();
        id
    }

    #[test]
    fn unchanged_subtrees_are_skipped() {
        let mut tree = tree();
        let a = named_leaf(&mut tree, "a", "one");
        let b = named_leaf(&mut tree, "b", "two");
        let row = tree
            .hstack(Unit::Auto, Unit::Auto, StackProps::new(), &[a, b])
            .unwrap();

        tree.draw(row).unwrap();
        assert_eq!(tree.last_pass().laid_out, 3);

        tree.draw(row).unwrap();
        assert_eq!(tree.last_pass().laid_out, 0);
        assert_eq!(tree.last_pass().skipped, 1);

        tree.set_content(b, "owt").unwrap();
        tree.draw(row).unwrap();
        assert_eq!(tree.last_pass().laid_out, 2);
        assert_eq!(tree.lines(row).unwrap(), ["oneowt"]);
    }

    #[test]
    fn force_update_marks_subtree() {
        let mut tree = tree();
        let a = named_leaf(&mut tree, "a", "x");
        let row = tree
            .vstack(Unit::Auto, Unit::Auto, StackProps::new(), &[a])
            .unwrap();
        tree.draw(row).unwrap();
        assert!(!tree.node(a).unwrap().is_changed());

        tree.force_update(row).unwrap();
        assert!(tree.node(a).unwrap().is_changed());
        assert!(tree.has_changed(row).unwrap());
    }

    #[test]
    fn mount_and_unmount_fire_listeners() {
        let mut tree = tree();
        let log = Rc::new(RefCell::new(Vec::new()));
        let child = named_leaf(&mut tree, "child", "x");
        let parent = tree
            .vstack(Unit::Auto, Unit::Auto, StackProps::new(), &[child])
            .unwrap();

        for (id, name) in [(parent, "parent"), (child, "child")] {
            let mounted = log.clone();
            tree.on_mount(id, move |_| mounted.borrow_mut().push(format!("mount {name}")))
                .unwrap();
            let unmounted = log.clone();
            tree.on_unmount(id, move |_| {
                unmounted.borrow_mut().push(format!("unmount {name}"))
            })
            .unwrap();
        }

        tree.draw(parent).unwrap();
        let screen = tree.screen().unwrap();
        tree.remove_child(screen, parent).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "mount parent",
                "mount child",
                "unmount child",
                "unmount parent"
            ]
        );
    }

    #[test]
    fn resize_listener_sees_old_and_new_size() {
        let mut tree = tree();
        let text = tree.styled(
            Unit::cells(5),
            Unit::cells(1),
            "hi",
            Rc::new(Style::default()),
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        tree.on_resize(text, move |resize| sink.borrow_mut().push(resize))
            .unwrap();

        tree.draw(text).unwrap();
        tree.set_content(text, "changed").unwrap();
        tree.draw(text).unwrap();
        assert!(seen.borrow().is_empty());

        tree.set_width(text, Unit::cells(8)).unwrap();
        tree.draw(text).unwrap();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!((seen[0].previous_width, seen[0].width), (5, 8));
    }

    #[test]
    fn structural_similarity() {
        let mut tree = tree();
        let a = named_leaf(&mut tree, "label", "one");
        let b = named_leaf(&mut tree, "label", "two");
        let c = named_leaf(&mut tree, "other", "one");
        let anonymous = tree.text("one", Rc::new(Style::default()));

        assert!(tree.almost_the_same(a, a).unwrap());
        assert!(tree.almost_the_same(a, b).unwrap());
        assert!(!tree.almost_the_same(a, c).unwrap());
        assert!(!tree.almost_the_same(a, anonymous).unwrap());

        let row_a = tree
            .hstack(Unit::Auto, Unit::Auto, StackProps::new(), &[a])
            .unwrap();
        let row_b = tree
            .hstack(Unit::Auto, Unit::Auto, StackProps::new(), &[c])
            .unwrap();
        tree.set_identifier(row_a, "row").unwrap();
        tree.set_identifier(row_b, "row").unwrap();
        assert!(!tree.almost_the_same(row_a, row_b).unwrap());
    }

    #[test]
    fn similar_replacement_keeps_the_old_node() {
        let mut tree = tree();
        let old = named_leaf(&mut tree, "label", "before");
        let row = tree
            .vstack(Unit::Auto, Unit::Auto, StackProps::new(), &[old])
            .unwrap();
        let unmounts = Rc::new(RefCell::new(0));
        let counter = unmounts.clone();
        tree.on_unmount(old, move |_| *counter.borrow_mut() += 1)
            .unwrap();
        tree.draw(row).unwrap();

        let new = named_leaf(&mut tree, "label", "after");
        let kept = tree.replace_child(row, old, new).unwrap();

        assert_eq!(kept, old);
        assert!(!tree.contains(new));
        assert_eq!(*unmounts.borrow(), 0);
        assert!(tree.node(old).unwrap().is_mounted());
        tree.draw(row).unwrap();
        assert_eq!(tree.lines(row).unwrap(), ["after"]);
    }

    #[test]
    fn different_replacement_remounts() {
        let mut tree = tree();
        let old = named_leaf(&mut tree, "label", "before");
        let row = tree
            .vstack(Unit::Auto, Unit::Auto, StackProps::new(), &[old])
            .unwrap();
        tree.draw(row).unwrap();

        let new = tree
            .hstack(Unit::Auto, Unit::Auto, StackProps::new(), &[])
            .unwrap();
        let text = tree.text("fresh", Rc::new(Style::default()));
        tree.add_child(new, text).unwrap();

        let placed = tree.replace_child(row, old, new).unwrap();
        assert_eq!(placed, new);
        assert!(!tree.contains(old));
        assert!(tree.node(text).unwrap().is_mounted());
        assert!(matches!(
            tree.node(new).unwrap().kind(),
            NodeKind::HorizontalStack(_)
        ));

        tree.draw(row).unwrap();
        assert_eq!(tree.lines(row).unwrap(), ["fresh"]);
    }
}
