//! Size resolution.
//!
//! Auto-sized boxes compute their independently sized ("basic") children
//! first, take their own size from those, and only then compute the children
//! that needed that size.

use crate::error::{LayoutError, Result};
use crate::text::natural_size;
use crate::unit::Unit;

use super::core::LayoutTree;
use super::node::{Axis, NodeId, NodeKind, Shape};

/// Parent geometry a node resolves its units against.
#[derive(Debug, Clone, Copy)]
struct Frame {
    width: i64,
    height: i64,
    used_width: Option<i64>,
    used_height: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Packing {
    /// Widths add up, heights take the maximum.
    Row,
    /// Heights add up, widths take the maximum.
    Column,
    /// Both take the maximum.
    Layer,
}

#[derive(Debug, Default)]
struct Accumulator {
    sum_width: i64,
    sum_height: i64,
    max_width: i64,
    max_height: i64,
    count: i64,
}

impl Accumulator {
    fn add(&mut self, width: i64, height: i64) {
        self.sum_width += width;
        self.sum_height += height;
        self.max_width = self.max_width.max(width);
        self.max_height = self.max_height.max(height);
        self.count += 1;
    }

    fn size(&self, packing: Packing, gap: i64) -> (i64, i64) {
        let gaps = gap * (self.count - 1).max(0);
        match packing {
            Packing::Row => (self.sum_width + gaps, self.max_height),
            Packing::Column => (self.max_width, self.sum_height + gaps),
            Packing::Layer => (self.max_width, self.max_height),
        }
    }
}

impl LayoutTree {
    fn frame_for(&self, id: NodeId) -> Result<Frame> {
        let Some(parent) = self.node(id)?.parent else {
            let size = self.console_size()?;
            return Ok(Frame {
                width: i64::from(size.width),
                height: i64::from(size.height),
                used_width: None,
                used_height: None,
            });
        };

        let parent_node = self.node(parent)?;
        // Overlay children resolve against the overlay's own parent.
        if let NodeKind::Overlay(_) = parent_node.kind {
            return self.frame_for(parent);
        }
        let parent = parent_node;
        let (used_width, used_height) = match parent.kind {
            NodeKind::HorizontalStack(_) => (Some(parent.used_width), None),
            NodeKind::VerticalStack(_) => (None, Some(parent.used_height)),
            _ => (None, None),
        };
        Ok(Frame {
            width: parent.computed.width,
            height: parent.computed.height,
            used_width,
            used_height,
        })
    }

    /// Whether the node's size on `axis` needs its parent's size first.
    pub fn depends_on_parent(&self, id: NodeId, axis: Axis) -> Result<bool> {
        let node = self.node(id)?;
        match node.unit(axis) {
            Unit::Length(length) => Ok(length.is_relative()),
            Unit::Auto => match (&node.kind, node.children.first()) {
                (NodeKind::Overlay(_), Some(background)) => {
                    self.depends_on_parent(*background, axis)
                }
                _ => Ok(false),
            },
        }
    }

    /// Whether anything in the node's own geometry reads the parent frame,
    /// including through an overlay's children.
    fn reads_parent(&self, id: NodeId) -> Result<bool> {
        if self.depends_on_parent(id, Axis::Horizontal)?
            || self.depends_on_parent(id, Axis::Vertical)?
        {
            return Ok(true);
        }
        let node = self.node(id)?;
        if !matches!(node.kind, NodeKind::Overlay(_)) {
            return Ok(false);
        }
        for child in node.children.clone() {
            if self.reads_parent(child)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Stack gap resolved against the stack's current cross-axis size.
    pub(crate) fn stack_gap(&self, id: NodeId) -> Result<i64> {
        let node = self.node(id)?;
        let gap = match &node.kind {
            NodeKind::HorizontalStack(props) => props.gap.resolve(node.computed.height, None),
            NodeKind::VerticalStack(props) => props.gap.resolve(node.computed.width, None),
            _ => 0,
        };
        if gap < 0 {
            return Err(LayoutError::NegativeGap(gap));
        }
        Ok(gap)
    }

    /// Resolve the geometry of `id` and of every changed node beneath it.
    pub(crate) fn compute(&mut self, id: NodeId) -> Result<()> {
        let frame = self.frame_for(id)?;
        self.stats.computed += 1;

        let shape = self.node(id)?.kind.shape();
        match shape {
            Shape::Leaf => self.compute_leaf(id, frame),
            Shape::Overlay => self.compute_overlay(id),
            Shape::Row => self.compute_box(id, frame, Packing::Row),
            Shape::Column => self.compute_box(id, frame, Packing::Column),
            Shape::Container => self.compute_box(id, frame, Packing::Layer),
        }
    }

    /// Children whose size reads the parent frame are recomputed with it even
    /// when unchanged: their share depends on what their siblings used.
    fn compute_child(&mut self, child: NodeId) -> Result<()> {
        if self.has_changed(child)? || self.reads_parent(child)? {
            self.compute(child)?;
        }
        Ok(())
    }

    fn accumulate(
        &mut self,
        id: NodeId,
        acc: &mut Accumulator,
        child: NodeId,
        packing: Packing,
        gap: i64,
    ) -> Result<()> {
        let computed = self.node(child)?.computed;
        acc.add(computed.width, computed.height);
        let (used_width, used_height) = acc.size(packing, gap);

        let node = self.node_mut(id)?;
        node.used_width = used_width;
        node.used_height = used_height;
        Ok(())
    }

    fn compute_box(&mut self, id: NodeId, frame: Frame, packing: Packing) -> Result<()> {
        let node = self.node_mut(id)?;
        let width = node.width.resolve(frame.width, frame.used_width);
        let height = node.height.resolve(frame.height, frame.used_height);
        node.computed.width = width.unwrap_or(0);
        node.computed.height = height.unwrap_or(0);
        node.used_width = 0;
        node.used_height = 0;
        let last_size = node.last_size;
        let children = node.children.clone();

        let sized = width.is_some() && height.is_some();
        if sized {
            self.note_size(id)?;
        } else if let Some((last_width, last_height)) = last_size
            && (width.is_some_and(|w| w != last_width) || height.is_some_and(|h| h != last_height))
        {
            self.force_update(id)?;
        }

        let mut basic = Vec::with_capacity(children.len());
        let mut deferred = Vec::new();
        let (mut width_blocked, mut height_blocked) = (false, false);
        for child in children {
            let on_width = width.is_none() && self.depends_on_parent(child, Axis::Horizontal)?;
            let on_height = height.is_none() && self.depends_on_parent(child, Axis::Vertical)?;
            if on_width || on_height {
                deferred.push(child);
                width_blocked |= on_width;
                height_blocked |= on_height;
            } else {
                basic.push(child);
            }
        }

        let cross_known = match packing {
            Packing::Row => height.is_some(),
            Packing::Column => width.is_some(),
            Packing::Layer => true,
        };
        let mut gap = if cross_known { self.stack_gap(id)? } else { 0 };

        let mut acc = Accumulator::default();
        for child in &basic {
            self.compute_child(*child)?;
            self.accumulate(id, &mut acc, *child, packing, gap)?;
        }

        if sized {
            return Ok(());
        }
        if basic.is_empty() {
            return Err(LayoutError::NoPredictableChildren { node: id });
        }

        // Cross axis first: the gap resolves against it.
        let (auto_width, auto_height) = (width.is_none(), height.is_none());
        self.apply_auto_size(id, auto_width, auto_height, acc.size(packing, 0))?;
        gap = self.stack_gap(id)?;
        self.apply_auto_size(id, auto_width, auto_height, acc.size(packing, gap))?;

        for child in &deferred {
            self.compute(*child)?;
            self.accumulate(id, &mut acc, *child, packing, gap)?;
        }

        // Deferred children may still extend an axis none of them depends on.
        if !deferred.is_empty() {
            self.apply_auto_size(
                id,
                auto_width && !width_blocked,
                auto_height && !height_blocked,
                acc.size(packing, gap),
            )?;
        }
        self.note_size(id)
    }

    fn apply_auto_size(
        &mut self,
        id: NodeId,
        auto_width: bool,
        auto_height: bool,
        (width, height): (i64, i64),
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        if auto_width {
            node.computed.width = width;
        }
        if auto_height {
            node.computed.height = height;
        }
        Ok(())
    }

    /// Both children resolve against the overlay's parent; the overlay then
    /// takes the background's size.
    fn compute_overlay(&mut self, id: NodeId) -> Result<()> {
        let [background, foreground] = self.node(id)?.children[..] else {
            return Err(LayoutError::OverlayChildren);
        };

        self.compute_child(background)?;
        self.compute_child(foreground)?;

        let size = self.node(background)?.computed;
        let node = self.node_mut(id)?;
        node.computed.width = size.width;
        node.computed.height = size.height;
        node.used_width = size.width;
        node.used_height = size.height;
        self.note_size(id)
    }

    /// Leaves size themselves from their text when auto, otherwise from the
    /// resolved unit minus margin, padding and border.
    fn compute_leaf(&mut self, id: NodeId, frame: Frame) -> Result<()> {
        let node = self.node(id)?;
        let NodeKind::StyledLeaf(leaf) = &node.kind else {
            return Ok(());
        };
        let style = leaf.style();
        let horizontal = style.horizontal_allowance() as i64;
        let vertical = style.vertical_allowance() as i64;

        let declared_width = node.width.resolve(frame.width, frame.used_width);
        let declared_height = node.height.resolve(frame.height, frame.used_height);

        let content_width = match declared_width {
            Some(width) => width - horizontal,
            None => natural_size(leaf.content(), None, &style.text).0 as i64,
        };
        let content_height = match declared_height {
            Some(height) => height - vertical,
            None => {
                let wrap_width = declared_width.map(|_| content_width.max(0) as usize);
                natural_size(leaf.content(), wrap_width, &style.text).1 as i64
            }
        };

        let too_small = content_width < 0 || content_height < 0;
        if too_small && !style.skip_if_too_small {
            return Err(if content_width < 0 {
                LayoutError::TooNarrow {
                    width: content_width + horizontal,
                    missing: -content_width,
                }
            } else {
                LayoutError::TooShort {
                    height: content_height + vertical,
                    missing: -content_height,
                }
            });
        }

        let node = self.node_mut(id)?;
        if let NodeKind::StyledLeaf(leaf) = &mut node.kind {
            leaf.too_small = too_small;
        }
        if too_small {
            node.computed.width = 0;
            node.computed.height = 0;
        } else {
            node.computed.width = content_width + horizontal;
            node.computed.height = content_height + vertical;
        }
        self.note_size(id)
    }
}
