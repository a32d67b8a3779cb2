use std::fmt;
use std::rc::Rc;

use crate::geometry::Rect;
use crate::style::{StringStyler, Style};
use crate::unit::{Length, Unit};

/// Handle to a node stored in a [`LayoutTree`](super::LayoutTree).
///
/// The generation makes handles to freed slots stale instead of silently
/// pointing at whatever node reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Arrangement settings shared by horizontal and vertical stacks.
///
/// `align_x`/`align_y` are offsets resolved against the free space on that
/// axis, so `Length::CENTER` centers and `Length::END` pushes to the far edge.
#[derive(Debug, Clone)]
pub struct StackProps {
    pub gap: Length,
    pub align_x: Length,
    pub align_y: Length,
    /// Applied to each assembled row, gaps and alignment padding included.
    pub styler: Option<StringStyler>,
}

impl Default for StackProps {
    fn default() -> Self {
        Self {
            gap: Length::Cells(0),
            align_x: Length::START,
            align_y: Length::START,
            styler: None,
        }
    }
}

impl StackProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap(mut self, gap: Length) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_align_x(mut self, align: Length) -> Self {
        self.align_x = align;
        self
    }

    pub fn with_align_y(mut self, align: Length) -> Self {
        self.align_y = align;
        self
    }

    pub fn with_styler(mut self, styler: StringStyler) -> Self {
        self.styler = Some(styler);
        self
    }
}

/// Foreground placement inside an overlay.
#[derive(Debug, Clone)]
pub struct OverlayProps {
    pub x: Length,
    pub y: Length,
}

impl Default for OverlayProps {
    fn default() -> Self {
        Self {
            x: Length::START,
            y: Length::START,
        }
    }
}

impl OverlayProps {
    pub fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    pub fn centered() -> Self {
        Self::new(Length::CENTER, Length::CENTER)
    }
}

/// Text content and style of a styled leaf.
#[derive(Debug, Clone)]
pub struct LeafProps {
    content: String,
    hash: blake3::Hash,
    style: Rc<Style>,
    pub(crate) too_small: bool,
}

impl LeafProps {
    pub fn new(content: impl Into<String>, style: Rc<Style>) -> Self {
        let content = content.into();
        Self {
            hash: blake3::hash(content.as_bytes()),
            content,
            style,
            too_small: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &Rc<Style> {
        &self.style
    }

    /// Replace the content, reporting whether it actually differs.
    pub(crate) fn set_content(&mut self, content: String) -> bool {
        let hash = blake3::hash(content.as_bytes());
        if hash == self.hash {
            return false;
        }
        self.hash = hash;
        self.content = content;
        true
    }

    pub(crate) fn set_style(&mut self, style: Rc<Style>) -> bool {
        if Rc::ptr_eq(&self.style, &style) {
            return false;
        }
        self.style = style;
        true
    }
}

/// Payload-free view of a [`NodeKind`], for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Container,
    Row,
    Column,
    Overlay,
    Leaf,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Children composited at the origin; also the terminal-sized screen.
    Container,
    HorizontalStack(StackProps),
    VerticalStack(StackProps),
    /// Background first, foreground second.
    Overlay(OverlayProps),
    StyledLeaf(LeafProps),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::HorizontalStack(_) => "hstack",
            NodeKind::VerticalStack(_) => "vstack",
            NodeKind::Overlay(_) => "overlay",
            NodeKind::StyledLeaf(_) => "styled",
        }
    }

    pub fn same_kind(&self, other: &NodeKind) -> bool {
        self.shape() == other.shape()
    }

    pub(crate) fn shape(&self) -> Shape {
        match self {
            NodeKind::Container => Shape::Container,
            NodeKind::HorizontalStack(_) => Shape::Row,
            NodeKind::VerticalStack(_) => Shape::Column,
            NodeKind::Overlay(_) => Shape::Overlay,
            NodeKind::StyledLeaf(_) => Shape::Leaf,
        }
    }

    pub(crate) fn stack(&self) -> Option<&StackProps> {
        match self {
            NodeKind::HorizontalStack(props) | NodeKind::VerticalStack(props) => Some(props),
            _ => None,
        }
    }
}

/// Size change reported to resize listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    pub node: NodeId,
    pub width: i64,
    pub height: i64,
    pub previous_width: i64,
    pub previous_height: i64,
}

pub(crate) type Listener = Box<dyn FnMut(NodeId)>;
pub(crate) type ResizeListener = Box<dyn FnMut(Resize)>;

#[derive(Default)]
pub(crate) struct Listeners {
    pub(crate) mount: Vec<Listener>,
    pub(crate) unmount: Vec<Listener>,
    pub(crate) resize: Vec<ResizeListener>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("mount", &self.mount.len())
            .field("unmount", &self.unmount.len())
            .field("resize", &self.resize.len())
            .finish()
    }
}

/// A node and its render state.
#[derive(Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) width: Unit,
    pub(crate) height: Unit,
    pub(crate) identifier: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) computed: Rect,
    pub(crate) used_width: i64,
    pub(crate) used_height: i64,
    pub(crate) lines: Vec<String>,
    pub(crate) changed: bool,
    pub(crate) visible: bool,
    pub(crate) mounted: bool,
    /// `(pass, has_changed)` for the pass it was computed in.
    pub(crate) memo: Option<(u64, bool)>,
    pub(crate) last_size: Option<(i64, i64)>,
    pub(crate) listeners: Listeners,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, width: Unit, height: Unit) -> Self {
        Self {
            kind,
            width,
            height,
            identifier: None,
            parent: None,
            children: Vec::new(),
            computed: Rect::default(),
            used_width: 0,
            used_height: 0,
            lines: Vec::new(),
            changed: true,
            visible: true,
            mounted: false,
            memo: None,
            last_size: None,
            listeners: Listeners::default(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn width(&self) -> &Unit {
        &self.width
    }

    pub fn height(&self) -> &Unit {
        &self.height
    }

    pub fn unit(&self, axis: Axis) -> &Unit {
        match axis {
            Axis::Horizontal => &self.width,
            Axis::Vertical => &self.height,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Resolved geometry, parent-relative. Valid after a draw.
    pub fn computed(&self) -> Rect {
        self.computed
    }

    pub fn used_width(&self) -> i64 {
        self.used_width
    }

    pub fn used_height(&self) -> i64 {
        self.used_height
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::StyledLeaf(leaf) => Some(leaf.content()),
            _ => None,
        }
    }
}
