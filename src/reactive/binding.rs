use std::cell::Cell;
use std::mem;
use std::rc::Rc;

use crate::error::Result;
use crate::layout::{LayoutTree, NodeId};
use crate::logging::{LogLevel, json_kv};
use crate::unit::Unit;

use super::signal::MaybeSignal;

type Apply = Box<dyn FnMut(&mut LayoutTree) -> Result<()>>;

/// A source followed by the tree. Polled at the start of every draw.
pub(crate) struct Binding {
    /// Node the binding writes to; the binding is dropped once it is freed.
    owner: Option<NodeId>,
    version: Box<dyn Fn() -> u64>,
    last: u64,
    apply: Apply,
}

impl LayoutTree {
    /// Hand `value` to `apply` now, and again on every draw after a reactive
    /// value changes.
    pub fn maybe_computed<T: 'static>(
        &mut self,
        owner: Option<NodeId>,
        value: MaybeSignal<T>,
        mut apply: impl FnMut(&mut LayoutTree, T) -> Result<()> + 'static,
    ) -> Result<()> {
        match value {
            MaybeSignal::Value(value) => apply(self, value),
            MaybeSignal::Reactive(source) => {
                let last = source.version();
                apply(self, source.get())?;

                let versions = Rc::clone(&source);
                self.bindings.push(Binding {
                    owner,
                    version: Box::new(move || versions.version()),
                    last,
                    apply: Box::new(move |tree| apply(tree, source.get())),
                });
                Ok(())
            }
        }
    }

    pub fn bind_content(&mut self, id: NodeId, content: impl Into<MaybeSignal<String>>) -> Result<()> {
        self.node(id)?;
        self.maybe_computed(Some(id), content.into(), move |tree, content| {
            tree.set_content(id, content)
        })
    }

    pub fn bind_width(&mut self, id: NodeId, width: impl Into<MaybeSignal<Unit>>) -> Result<()> {
        self.node(id)?;
        self.maybe_computed(Some(id), width.into(), move |tree, width| {
            tree.set_width(id, width)
        })
    }

    pub fn bind_height(&mut self, id: NodeId, height: impl Into<MaybeSignal<Unit>>) -> Result<()> {
        self.node(id)?;
        self.maybe_computed(Some(id), height.into(), move |tree, height| {
            tree.set_height(id, height)
        })
    }

    pub fn bind_visible(&mut self, id: NodeId, visible: impl Into<MaybeSignal<bool>>) -> Result<()> {
        self.node(id)?;
        self.maybe_computed(Some(id), visible.into(), move |tree, visible| {
            tree.set_visible(id, visible)
        })
    }

    /// Child slot of `parent` rebuilt from `source`.
    ///
    /// Each new value goes through `build`; the result replaces the previous
    /// child, or only refreshes it when the two are structurally the same.
    pub fn bind_child<T: 'static>(
        &mut self,
        parent: NodeId,
        source: impl Into<MaybeSignal<T>>,
        mut build: impl FnMut(&mut LayoutTree, T) -> Result<NodeId> + 'static,
    ) -> Result<()> {
        self.node(parent)?;
        let slot: Rc<Cell<Option<NodeId>>> = Rc::new(Cell::new(None));
        self.maybe_computed(Some(parent), source.into(), move |tree, value| {
            let fresh = build(tree, value)?;
            let current = match slot.get() {
                Some(old) if tree.contains(old) => tree.replace_child(parent, old, fresh)?,
                _ => {
                    tree.add_child(parent, fresh)?;
                    fresh
                }
            };
            slot.set(Some(current));
            Ok(())
        })
    }

    /// Apply every binding whose source moved since it was last applied.
    /// Returns how many were applied.
    pub fn sync_bindings(&mut self) -> Result<usize> {
        if self.bindings.is_empty() {
            return Ok(0);
        }

        let mut bindings = mem::take(&mut self.bindings);
        bindings.retain(|binding| binding.owner.is_none_or(|owner| self.contains(owner)));

        let mut applied = 0;
        let mut outcome = Ok(());
        for binding in &mut bindings {
            let version = (binding.version)();
            if version == binding.last {
                continue;
            }
            binding.last = version;
            if let Err(err) = (binding.apply)(self) {
                outcome = Err(err);
                break;
            }
            applied += 1;
        }

        // Bindings registered while applying are kept after the existing ones.
        bindings.append(&mut self.bindings);
        self.bindings = bindings;

        if applied > 0 {
            self.log(LogLevel::Trace, "bindings.synced", [json_kv("applied", applied)]);
        }
        outcome.map(|()| applied)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::layout::StackProps;
    use crate::reactive::Signal;
    use crate::style::Style;
    use crate::terminal::FixedTerminal;

    fn tree() -> LayoutTree {
        LayoutTree::new(FixedTerminal::new(20, 5))
    }

    #[test]
    fn plain_values_apply_once() {
        let mut tree = tree();
        let text = tree.text("a", Rc::new(Style::default()));
        tree.bind_content(text, MaybeSignal::Value("b".to_string()))
            .unwrap();
        assert_eq!(tree.node(text).unwrap().content(), Some("b"));
        assert_eq!(tree.sync_bindings().unwrap(), 0);
    }

    #[test]
    fn signal_content_redraws_on_change() {
        let mut tree = tree();
        let label = Signal::new("one".to_string());
        let text = tree.text("", Rc::new(Style::default()));
        tree.bind_content(text, label.clone()).unwrap();

        tree.draw(text).unwrap();
        assert_eq!(tree.lines(text).unwrap(), ["one"]);

        tree.draw(text).unwrap();
        assert_eq!(tree.last_pass().laid_out, 0);

        label.set("three".to_string());
        tree.draw(text).unwrap();
        assert_eq!(tree.lines(text).unwrap(), ["three"]);
    }

    #[test]
    fn derived_width() {
        let mut tree = tree();
        let columns = Signal::new(3_i64);
        let text = tree.text("abcdef", Rc::new(Style::default()));
        tree.bind_width(text, columns.map(|cells| Unit::cells(*cells)))
            .unwrap();
        tree.bind_height(text, MaybeSignal::Value(Unit::cells(1)))
            .unwrap();

        tree.draw(text).unwrap();
        assert_eq!(tree.lines(text).unwrap(), ["abc"]);

        columns.set(5);
        tree.draw(text).unwrap();
        assert_eq!(tree.lines(text).unwrap(), ["abcde"]);
    }

    #[test]
    fn child_slot_swaps_nodes() {
        let mut tree = tree();
        let mode = Signal::new(false);
        let column = tree
            .vstack(Unit::Auto, Unit::Auto, StackProps::new(), &[])
            .unwrap();
        let header = tree.text("head", Rc::new(Style::default()));
        tree.add_child(column, header).unwrap();

        tree.bind_child(column, mode.clone(), |tree, wide| {
            let content = if wide { "wide body" } else { "body" };
            let node = tree.text(content, Rc::new(Style::default()));
            if wide {
                tree.set_identifier(node, "wide")?;
            }
            Ok(node)
        })
        .unwrap();
        tree.draw(column).unwrap();
        assert_eq!(tree.lines(column).unwrap(), ["head", "body"]);

        mode.set(true);
        tree.draw(column).unwrap();
        assert_eq!(tree.lines(column).unwrap(), ["head     ", "wide body"]);
        assert_eq!(tree.node(column).unwrap().children().len(), 2);
    }

    #[test]
    fn bindings_die_with_their_node() {
        let mut tree = tree();
        let text = Signal::new("x".to_string());
        let column = tree
            .vstack(Unit::Auto, Unit::Auto, StackProps::new(), &[])
            .unwrap();
        let leaf = tree.text("", Rc::new(Style::default()));
        tree.add_child(column, leaf).unwrap();
        tree.bind_content(leaf, text.clone()).unwrap();

        tree.remove_child(column, leaf).unwrap();
        text.set("y".to_string());
        assert_eq!(tree.sync_bindings().unwrap(), 0);
        assert!(tree.bindings.is_empty());
    }
}
