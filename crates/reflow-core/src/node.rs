//! The canonical node tree consumed and produced by layout inference.
//!
//! Every node is one variant of [`Node`]. Shared fields live in [`NodeBase`];
//! capabilities (owning children, carrying paints, carrying text) are exposed
//! through the [`SceneNode`], [`HasChildren`], [`HasPaints`] and [`HasText`]
//! traits so callers can stay generic over the variants that support them.

use smallvec::SmallVec;

use crate::types::{
    AxisAlignment, CornerRadius, Effect, Geometry, LayoutAlign, LayoutMode, NodeId, Padding,
    Paint, SizingMode, StrokeGeometry,
};

/// Paint layers, bottom first. Most nodes carry one or two.
pub type Paints = SmallVec<[Paint; 2]>;

/// Effect layers.
pub type Effects = SmallVec<[Effect; 2]>;

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum NodeKind {
    Frame,
    Group,
    Rectangle,
    Ellipse,
    Text,
    Vector,
    Line,
}

/// Fields shared by every node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct NodeBase {
    pub id: NodeId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub geometry: Geometry,
    /// Placement inside the parent's stack, once inferred
    pub layout_align: Option<LayoutAlign>,
    pub visible: bool,
    pub opacity: f64,
    pub effects: Effects,
    pub effect_style_id: Option<String>,
}

impl Default for NodeBase {
    fn default() -> Self {
        Self {
            id: NodeId::default(),
            name: String::new(),
            geometry: Geometry::default(),
            layout_align: None,
            visible: true,
            opacity: 1.0,
            effects: Effects::new(),
            effect_style_id: None,
        }
    }
}

impl NodeBase {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry,
            ..Default::default()
        }
    }
}

/// Fill and stroke paints of a shape-like node.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ShapeStyle {
    pub fills: Paints,
    pub fill_style_id: Option<String>,
    pub strokes: Paints,
    pub stroke_style_id: Option<String>,
    pub stroke: StrokeGeometry,
}

/// A container with (possibly inferred) flow layout.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FrameNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: NodeBase,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: ShapeStyle,
    pub corner_radius: CornerRadius,
    pub layout_mode: LayoutMode,
    pub item_spacing: f64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub padding: Padding,
    pub primary_axis_sizing: SizingMode,
    pub counter_axis_sizing: SizingMode,
    pub main_axis_alignment: AxisAlignment,
    pub cross_axis_alignment: AxisAlignment,
    pub clips_content: bool,
    /// No layout could be inferred; children keep explicit coordinates
    pub is_relative: bool,
    pub children: Vec<Node>,
}

impl FrameNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            base: NodeBase::new(id, name, geometry),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }
}

impl From<GroupNode> for FrameNode {
    /// Groups carry no paints of their own, so the frame starts unstyled.
    fn from(group: GroupNode) -> Self {
        Self {
            base: group.base,
            is_relative: group.is_relative,
            children: group.children,
            ..Default::default()
        }
    }
}

/// A layout-less container.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GroupNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: NodeBase,
    pub is_relative: bool,
    pub children: Vec<Node>,
}

impl GroupNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            base: NodeBase::new(id, name, geometry),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RectangleNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: NodeBase,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: ShapeStyle,
    pub corner_radius: CornerRadius,
}

impl RectangleNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            base: NodeBase::new(id, name, geometry),
            ..Default::default()
        }
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.style.fills.push(paint);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.base.visible = visible;
        self
    }
}

impl From<FrameNode> for RectangleNode {
    /// Drops layout fields and children; used for frames with no layout role.
    fn from(frame: FrameNode) -> Self {
        Self {
            base: frame.base,
            style: frame.style,
            corner_radius: frame.corner_radius,
        }
    }
}

/// Ellipses, vectors and lines: paint-bearing leaves with no extra fields.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ShapeNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: NodeBase,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: ShapeStyle,
}

impl ShapeNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            base: NodeBase::new(id, name, geometry),
            ..Default::default()
        }
    }
}

/// How a text box sizes itself around its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TextAutoResize {
    /// Fixed width and height
    #[default]
    None,
    /// Fixed width, height follows content
    Height,
    /// Both follow content, no wrapping
    WidthAndHeight,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TextNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: NodeBase,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: ShapeStyle,
    pub characters: String,
    pub font_size: Option<f64>,
    pub text_auto_resize: TextAutoResize,
}

impl TextNode {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        geometry: Geometry,
        characters: impl Into<String>,
    ) -> Self {
        Self {
            base: NodeBase::new(id, name, geometry),
            characters: characters.into(),
            ..Default::default()
        }
    }
}

/// A node in the design tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Node {
    Frame(FrameNode),
    Group(GroupNode),
    Rectangle(RectangleNode),
    Ellipse(ShapeNode),
    Text(TextNode),
    Vector(ShapeNode),
    Line(ShapeNode),
}

/// Access to the fields every node carries.
pub trait SceneNode {
    fn base(&self) -> &NodeBase;
    fn base_mut(&mut self) -> &mut NodeBase;

    fn id(&self) -> &NodeId {
        &self.base().id
    }

    fn geometry(&self) -> &Geometry {
        &self.base().geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.base_mut().geometry
    }
}

/// Nodes that own an ordered list of children (layer order, bottom first).
pub trait HasChildren: SceneNode {
    fn children(&self) -> &[Node];
    fn children_mut(&mut self) -> &mut Vec<Node>;
    fn is_relative(&self) -> bool;
    fn set_relative(&mut self, relative: bool);
}

/// Nodes that carry fill and stroke paints.
pub trait HasPaints: SceneNode {
    fn style(&self) -> &ShapeStyle;
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Nodes that carry text content.
pub trait HasText: SceneNode {
    fn characters(&self) -> &str;
}

macro_rules! impl_scene_node {
    ($($ty:ty),*) => {
        $(
            impl SceneNode for $ty {
                fn base(&self) -> &NodeBase {
                    &self.base
                }

                fn base_mut(&mut self) -> &mut NodeBase {
                    &mut self.base
                }
            }
        )*
    };
}

macro_rules! impl_has_paints {
    ($($ty:ty),*) => {
        $(
            impl HasPaints for $ty {
                fn style(&self) -> &ShapeStyle {
                    &self.style
                }

                fn style_mut(&mut self) -> &mut ShapeStyle {
                    &mut self.style
                }
            }
        )*
    };
}

macro_rules! impl_has_children {
    ($($ty:ty),*) => {
        $(
            impl HasChildren for $ty {
                fn children(&self) -> &[Node] {
                    &self.children
                }

                fn children_mut(&mut self) -> &mut Vec<Node> {
                    &mut self.children
                }

                fn is_relative(&self) -> bool {
                    self.is_relative
                }

                fn set_relative(&mut self, relative: bool) {
                    self.is_relative = relative;
                }
            }
        )*
    };
}

impl_scene_node!(FrameNode, GroupNode, RectangleNode, ShapeNode, TextNode);
impl_has_paints!(FrameNode, RectangleNode, ShapeNode, TextNode);
impl_has_children!(FrameNode, GroupNode);

impl HasText for TextNode {
    fn characters(&self) -> &str {
        &self.characters
    }
}

impl SceneNode for Node {
    fn base(&self) -> &NodeBase {
        match self {
            Node::Frame(n) => &n.base,
            Node::Group(n) => &n.base,
            Node::Rectangle(n) => &n.base,
            Node::Text(n) => &n.base,
            Node::Ellipse(n) | Node::Vector(n) | Node::Line(n) => &n.base,
        }
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        match self {
            Node::Frame(n) => &mut n.base,
            Node::Group(n) => &mut n.base,
            Node::Rectangle(n) => &mut n.base,
            Node::Text(n) => &mut n.base,
            Node::Ellipse(n) | Node::Vector(n) | Node::Line(n) => &mut n.base,
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Frame(_) => NodeKind::Frame,
            Node::Group(_) => NodeKind::Group,
            Node::Rectangle(_) => NodeKind::Rectangle,
            Node::Ellipse(_) => NodeKind::Ellipse,
            Node::Text(_) => NodeKind::Text,
            Node::Vector(_) => NodeKind::Vector,
            Node::Line(_) => NodeKind::Line,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn is_container(&self) -> bool {
        self.as_container().is_some()
    }

    /// Only rectangles may enclose siblings during containment resolution.
    pub fn is_rectangle_shaped(&self) -> bool {
        matches!(self, Node::Rectangle(_))
    }

    pub fn as_container(&self) -> Option<&dyn HasChildren> {
        match self {
            Node::Frame(n) => Some(n),
            Node::Group(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut dyn HasChildren> {
        match self {
            Node::Frame(n) => Some(n),
            Node::Group(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_painted(&self) -> Option<&dyn HasPaints> {
        match self {
            Node::Frame(n) => Some(n),
            Node::Rectangle(n) => Some(n),
            Node::Text(n) => Some(n),
            Node::Ellipse(n) | Node::Vector(n) | Node::Line(n) => Some(n),
            Node::Group(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&dyn HasText> {
        match self {
            Node::Text(n) => Some(n),
            _ => None,
        }
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[Node] {
        self.as_container().map(|c| c.children()).unwrap_or(&[])
    }

    pub fn as_frame(&self) -> Option<&FrameNode> {
        match self {
            Node::Frame(n) => Some(n),
            _ => None,
        }
    }

    /// Frames pass through, groups are promoted, leaves are handed back.
    pub fn into_frame(self) -> Result<FrameNode, Node> {
        match self {
            Node::Frame(frame) => Ok(frame),
            Node::Group(group) => Ok(group.into()),
            other => Err(other),
        }
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// All nodes in the subtree (this one included) whose kind is listed.
    pub fn find_all(&self, kinds: &[NodeKind]) -> Vec<&Node> {
        self.descendants()
            .filter(|node| kinds.contains(&node.kind()))
            .collect()
    }

    /// Look up a node in the subtree by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.descendants().find(|node| node.id().as_str() == id)
    }
}

impl From<FrameNode> for Node {
    fn from(n: FrameNode) -> Self {
        Node::Frame(n)
    }
}

impl From<GroupNode> for Node {
    fn from(n: GroupNode) -> Self {
        Node::Group(n)
    }
}

impl From<RectangleNode> for Node {
    fn from(n: RectangleNode) -> Self {
        Node::Rectangle(n)
    }
}

impl From<TextNode> for Node {
    fn from(n: TextNode) -> Self {
        Node::Text(n)
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is visited first.
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let header = GroupNode::new("2", "header", Geometry::new(0.0, 0.0, 100.0, 20.0))
            .with_children(vec![
                TextNode::new("3", "title", Geometry::new(0.0, 0.0, 80.0, 20.0), "Hello").into(),
                Node::Ellipse(ShapeNode::new("4", "dot", Geometry::new(90.0, 5.0, 10.0, 10.0))),
            ]);
        FrameNode::new("1", "root", Geometry::new(0.0, 0.0, 100.0, 100.0))
            .with_children(vec![
                header.into(),
                RectangleNode::new("5", "card", Geometry::new(0.0, 30.0, 100.0, 70.0)).into(),
            ])
            .into()
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = sample_tree();
        let ids: Vec<&str> = tree.descendants().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_find_all_by_kind() {
        let tree = sample_tree();
        let found: Vec<&str> = tree
            .find_all(&[NodeKind::Text, NodeKind::Rectangle])
            .into_iter()
            .map(|n| n.name())
            .collect();
        assert_eq!(found, vec!["title", "card"]);
        assert!(tree.find_all(&[NodeKind::Line]).is_empty());
    }

    #[test]
    fn test_capabilities() {
        let tree = sample_tree();
        assert!(tree.is_container());
        assert!(tree.as_painted().is_some());

        let group = tree.find("2").unwrap();
        assert!(group.is_container());
        assert!(group.as_painted().is_none());

        let text = tree.find("3").unwrap();
        assert_eq!(text.as_text().unwrap().characters(), "Hello");
        assert!(text.children().is_empty());

        assert!(tree.find("5").unwrap().is_rectangle_shaped());
        assert!(!tree.find("4").unwrap().is_rectangle_shaped());
    }

    #[test]
    fn test_group_into_frame_keeps_identity() {
        let mut group = GroupNode::new("g", "buttons", Geometry::new(5.0, 6.0, 7.0, 8.0))
            .with_children(vec![
                RectangleNode::new("r", "r", Geometry::new(0.0, 0.0, 1.0, 1.0)).into(),
            ]);
        group.base.opacity = 0.5;
        group.is_relative = true;

        let frame = FrameNode::from(group);
        assert_eq!(frame.base.id.as_str(), "g");
        assert_eq!(frame.base.name, "buttons");
        assert_eq!(frame.base.geometry, Geometry::new(5.0, 6.0, 7.0, 8.0));
        assert_eq!(frame.base.opacity, 0.5);
        assert!(frame.is_relative);
        assert_eq!(frame.layout_mode, LayoutMode::None);
        assert!(frame.style.fills.is_empty());
        assert_eq!(frame.children.len(), 1);
    }

    #[test]
    fn test_empty_frame_into_rectangle() {
        let mut frame = FrameNode::new("f", "spacer", Geometry::new(1.0, 2.0, 3.0, 4.0));
        frame.corner_radius = CornerRadius::uniform(4.0);
        let rect = RectangleNode::from(frame);
        assert_eq!(rect.base.id.as_str(), "f");
        assert_eq!(rect.corner_radius.as_uniform(), Some(4.0));
    }
}
