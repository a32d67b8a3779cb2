use std::rc::Rc;
use std::time::Instant;

use serde_json::Value;

use crate::error::{LayoutError, Result};
use crate::geometry::{Rect, Size};
use crate::logging::{LogLevel, event_with_fields, json_kv, json_str};
use crate::metrics::{PassStats, RenderMetrics};
use crate::reactive::Binding;
use crate::style::Style;
use crate::terminal::Terminal;
use crate::unit::{Length, Unit};

use super::config::LayoutConfig;
use super::node::{LeafProps, Node, NodeId, NodeKind, OverlayProps, StackProps};

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every node.
///
/// Nodes refer to each other by [`NodeId`]; a child's parent link is a plain
/// handle, so dropping a subtree is just freeing its slots.
pub struct LayoutTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    screen: Option<NodeId>,
    terminal: Box<dyn Terminal>,
    config: LayoutConfig,
    started: Instant,
    pub(crate) pass: u64,
    pub(crate) stats: PassStats,
    pub(crate) bindings: Vec<Binding>,
}

impl LayoutTree {
    pub fn new(terminal: impl Terminal + 'static) -> Self {
        Self::with_config(terminal, LayoutConfig::default())
    }

    pub fn with_config(terminal: impl Terminal + 'static, config: LayoutConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            screen: None,
            terminal: Box::new(terminal),
            config,
            started: Instant::now(),
            pass: 0,
            stats: PassStats::default(),
            bindings: Vec::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LayoutConfig {
        &mut self.config
    }

    /// Number of live nodes, the screen included once it exists.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(LayoutError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(LayoutError::NodeNotFound(id))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Free a node and everything beneath it. Listeners are not invoked.
    pub(crate) fn free_subtree(&mut self, id: NodeId) -> Result<()> {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let children = self.node(current)?.children.clone();
            stack.extend(children);

            let slot = &mut self.slots[current.index()];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
        }
        Ok(())
    }

    /// Free a node that has already been taken out of its parent.
    pub(crate) fn free_single(&mut self, id: NodeId) -> Result<Node> {
        self.node(id)?;
        let slot = &mut self.slots[id.index()];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        slot.node.take().ok_or(LayoutError::NodeNotFound(id))
    }

    /// Add a detached node.
    pub fn insert(&mut self, kind: NodeKind, width: Unit, height: Unit) -> NodeId {
        self.alloc(Node::new(kind, width, height))
    }

    pub fn container(&mut self, width: Unit, height: Unit, children: &[NodeId]) -> Result<NodeId> {
        let id = self.insert(NodeKind::Container, width, height);
        self.add_children(id, children)?;
        Ok(id)
    }

    pub fn hstack(
        &mut self,
        width: Unit,
        height: Unit,
        props: StackProps,
        children: &[NodeId],
    ) -> Result<NodeId> {
        let id = self.insert(NodeKind::HorizontalStack(props), width, height);
        self.add_children(id, children)?;
        Ok(id)
    }

    pub fn vstack(
        &mut self,
        width: Unit,
        height: Unit,
        props: StackProps,
        children: &[NodeId],
    ) -> Result<NodeId> {
        let id = self.insert(NodeKind::VerticalStack(props), width, height);
        self.add_children(id, children)?;
        Ok(id)
    }

    pub fn overlay(
        &mut self,
        width: Unit,
        height: Unit,
        props: OverlayProps,
        background: NodeId,
        foreground: NodeId,
    ) -> Result<NodeId> {
        let id = self.insert(NodeKind::Overlay(props), width, height);
        self.add_children(id, &[background, foreground])?;
        Ok(id)
    }

    pub fn styled(
        &mut self,
        width: Unit,
        height: Unit,
        content: impl Into<String>,
        style: Rc<Style>,
    ) -> NodeId {
        self.insert(
            NodeKind::StyledLeaf(LeafProps::new(content, style)),
            width,
            height,
        )
    }

    /// Auto-sized styled text.
    pub fn text(&mut self, content: impl Into<String>, style: Rc<Style>) -> NodeId {
        self.styled(Unit::Auto, Unit::Auto, content, style)
    }

    fn add_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        children
            .iter()
            .try_for_each(|child| self.add_child(parent, *child))
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self.node(parent)?.children.len();
        self.insert_child(parent, index, child)
    }

    /// Attach `child` at `index` (clamped to the child count).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        match parent_node.kind {
            NodeKind::StyledLeaf(_) => return Err(LayoutError::LeafChildren(parent)),
            NodeKind::Overlay(_) if parent_node.children.len() >= 2 => {
                return Err(LayoutError::OverlayChildren);
            }
            _ => {}
        }
        let mounted = parent_node.mounted;

        if self.node(child)?.parent.is_some() || self.is_ancestor(child, parent)? {
            return Err(LayoutError::AlreadyAttached(child));
        }

        let parent_node = self.node_mut(parent)?;
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        parent_node.changed = true;
        self.node_mut(child)?.parent = Some(parent);

        if mounted {
            self.mount(child)?;
        }
        Ok(())
    }

    /// Detach `child` and drop it with its subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.detach_child(parent, child)?;
        self.free_subtree(child)
    }

    /// Detach `child`, keeping it alive as a new root.
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.child_position(parent, child)?;
        self.node_mut(parent)?.children.retain(|id| *id != child);
        self.node_mut(parent)?.changed = true;
        self.unmount(child)?;
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    pub(crate) fn child_position(&self, parent: NodeId, child: NodeId) -> Result<usize> {
        self.node(parent)?
            .children
            .iter()
            .position(|id| *id == child)
            .ok_or(LayoutError::NotAChild { parent, child })
    }

    /// Whether `ancestor` is `id` or sits above it.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool> {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return Ok(true);
            }
            current = self.node(node)?.parent;
        }
        Ok(false)
    }

    pub fn set_identifier(&mut self, id: NodeId, identifier: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.identifier = Some(identifier.into());
        Ok(())
    }

    pub fn set_width(&mut self, id: NodeId, width: Unit) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.width != width {
            node.width = width;
            node.changed = true;
        }
        Ok(())
    }

    pub fn set_height(&mut self, id: NodeId, height: Unit) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.height != height {
            node.height = height;
            node.changed = true;
        }
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.visible != visible {
            node.visible = visible;
            node.changed = true;
        }
        Ok(())
    }

    /// Replace a leaf's text. Identical content leaves the node untouched.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<String>) -> Result<()> {
        let node = self.node_mut(id)?;
        if let NodeKind::StyledLeaf(leaf) = &mut node.kind
            && leaf.set_content(content.into())
        {
            node.changed = true;
        }
        Ok(())
    }

    pub fn set_style(&mut self, id: NodeId, style: Rc<Style>) -> Result<()> {
        let node = self.node_mut(id)?;
        if let NodeKind::StyledLeaf(leaf) = &mut node.kind
            && leaf.set_style(style)
        {
            node.changed = true;
        }
        Ok(())
    }

    pub fn set_gap(&mut self, id: NodeId, gap: Length) -> Result<()> {
        let node = self.node_mut(id)?;
        if let NodeKind::HorizontalStack(props) | NodeKind::VerticalStack(props) = &mut node.kind {
            props.gap = gap;
            node.changed = true;
        }
        Ok(())
    }

    pub fn set_stack(&mut self, id: NodeId, stack: StackProps) -> Result<()> {
        let node = self.node_mut(id)?;
        if let NodeKind::HorizontalStack(props) | NodeKind::VerticalStack(props) = &mut node.kind {
            *props = stack;
            node.changed = true;
        }
        Ok(())
    }

    pub fn set_overlay(&mut self, id: NodeId, overlay: OverlayProps) -> Result<()> {
        let node = self.node_mut(id)?;
        if let NodeKind::Overlay(props) = &mut node.kind {
            *props = overlay;
            node.changed = true;
        }
        Ok(())
    }

    /// Rendered lines from the last draw.
    pub fn lines(&self, id: NodeId) -> Result<&[String]> {
        Ok(self.node(id)?.lines())
    }

    /// Absolute position: the node's offsets summed up its parent chain.
    pub fn bounding_rect(&self, id: NodeId) -> Result<Rect> {
        let node = self.node(id)?;
        let mut rect = node.computed;
        let mut current = node.parent;
        while let Some(parent) = current {
            let parent_node = self.node(parent)?;
            rect = rect.offset_by(&parent_node.computed);
            current = parent_node.parent;
        }
        Ok(rect)
    }

    pub fn console_size(&self) -> Result<Size> {
        self.terminal.console_size()
    }

    /// The terminal-sized container parentless nodes get attached to on draw.
    pub fn screen(&self) -> Option<NodeId> {
        self.screen.filter(|id| self.contains(*id))
    }

    fn ensure_screen(&mut self) -> Result<NodeId> {
        if let Some(screen) = self.screen() {
            return Ok(screen);
        }

        let size = self.console_size()?;
        let (width, height) = (i64::from(size.width), i64::from(size.height));
        let mut node = Node::new(
            NodeKind::Container,
            Unit::cells(width),
            Unit::cells(height),
        );
        node.computed = Rect::new(0, 0, width, height);
        node.last_size = Some((width, height));
        node.mounted = true;

        let screen = self.alloc(node);
        self.screen = Some(screen);
        Ok(screen)
    }

    /// Poll the terminal and resize the screen if it changed. Returns whether
    /// it did; everything under the screen is then redrawn.
    pub fn handle_resize(&mut self) -> Result<bool> {
        let screen = self.ensure_screen()?;
        let size = self.console_size()?;
        let (width, height) = (i64::from(size.width), i64::from(size.height));

        let node = self.node_mut(screen)?;
        let previous = node.last_size;
        if previous == Some((width, height)) {
            return Ok(false);
        }

        node.width = Unit::cells(width);
        node.height = Unit::cells(height);
        node.computed = Rect::new(0, 0, width, height);
        node.last_size = Some((width, height));
        self.force_update(screen)?;

        let (old_width, old_height) = previous.unwrap_or_default();
        self.log(
            LogLevel::Info,
            "terminal.resized",
            [
                json_kv("width", width),
                json_kv("height", height),
                json_kv("previous_width", old_width),
                json_kv("previous_height", old_height),
            ],
        );
        self.record_metrics(RenderMetrics::record_resize);
        Ok(true)
    }

    fn ensure_parent(&mut self, id: NodeId) -> Result<()> {
        let screen = self.ensure_screen()?;
        if id != screen && self.node(id)?.parent.is_none() {
            self.add_child(screen, id)?;
        }
        Ok(())
    }

    /// Bring `id` and its subtree up to date.
    ///
    /// Parentless nodes are first attached under the screen. Subtrees that
    /// have not changed since the last draw keep their lines.
    pub fn draw(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        self.pass += 1;
        self.stats = PassStats::default();

        self.sync_bindings()?;
        self.ensure_parent(id)?;
        self.handle_resize()?;

        if self.has_changed(id)? {
            self.compute(id)?;
            self.layout(id)?;
        } else {
            self.stats.skipped += 1;
        }

        let stats = self.stats;
        self.record_metrics(|metrics| metrics.record_pass(stats));
        self.log(
            LogLevel::Trace,
            "draw.pass",
            [
                json_kv("pass", self.pass),
                json_kv("node", id.index()),
                json_kv("computed", stats.computed),
                json_kv("laid_out", stats.laid_out),
                json_kv("skipped", stats.skipped),
            ],
        );
        Ok(())
    }

    /// Work counters of the most recent draw.
    pub fn last_pass(&self) -> PassStats {
        self.stats
    }

    pub(crate) fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let Some(logger) = &self.config.logger else {
            return;
        };
        if level < self.config.min_level {
            return;
        }
        let event = event_with_fields(level, &self.config.log_target, message, fields);
        let _ = logger.log_event(event);
    }

    pub(crate) fn log_node(&self, level: LogLevel, message: &str, id: NodeId) {
        if self.config.logger.is_none() {
            return;
        }
        let kind = self
            .node(id)
            .map(|node| node.kind.name())
            .unwrap_or("unknown");
        self.log(
            level,
            message,
            [json_kv("node", id.index()), json_str("kind", kind)],
        );
    }

    pub(crate) fn record_metrics(&self, update: impl FnOnce(&mut RenderMetrics)) {
        if let Some(metrics) = &self.config.metrics
            && let Ok(mut guard) = metrics.lock()
        {
            update(&mut guard);
        }
    }

    /// Log a snapshot of the render counters, if metrics are enabled.
    pub fn emit_metrics(&self) {
        let Some(metrics) = &self.config.metrics else {
            return;
        };
        let Ok(guard) = metrics.lock() else {
            return;
        };
        let snapshot = guard.snapshot(self.started.elapsed());
        drop(guard);

        if let Some(logger) = &self.config.logger {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.log_target));
        }
    }
}
