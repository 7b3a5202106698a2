//! Whole-tree layout inference.

use reflow_core::{FrameNode, InferenceError, LayoutMode, Node, RectangleNode, Result, SceneNode};
use tracing::debug;

use crate::alignment::AlignmentClassifier;
use crate::axis::AxisClassifier;
use crate::containment::resolve_container;

/// Default limit on tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for layout inference.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InferenceOptions {
    /// Stacking-axis detection
    pub axis: AxisClassifier,
    /// Cross-axis alignment of children
    pub alignment: AlignmentClassifier,
    /// Deepest nesting accepted before giving up
    pub max_depth: usize,
    /// Resolve containment again inside newly promoted containers
    pub nested_containment: bool,
    /// Treat childless frames without a layout as rectangles
    pub collapse_empty_frames: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            axis: AxisClassifier::default(),
            alignment: AlignmentClassifier::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            nested_containment: false,
            collapse_empty_frames: false,
        }
    }
}

impl InferenceOptions {
    pub fn with_overlap_threshold(mut self, threshold: f64) -> Self {
        self.axis = AxisClassifier::new(threshold);
        self
    }

    pub fn with_alignment_tolerance(mut self, tolerance: f64) -> Self {
        self.alignment = AlignmentClassifier::new(tolerance);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_nested_containment(mut self, enabled: bool) -> Self {
        self.nested_containment = enabled;
        self
    }

    pub fn with_collapse_empty_frames(mut self, enabled: bool) -> Self {
        self.collapse_empty_frames = enabled;
        self
    }
}

/// A container waiting for its children to be resolved.
struct PendingContainer {
    node: Node,
    remaining: std::vec::IntoIter<Node>,
    resolved: Vec<Node>,
    depth: usize,
}

impl PendingContainer {
    fn new(mut node: Node, depth: usize, max_depth: usize) -> Result<Self> {
        if depth > max_depth {
            return Err(InferenceError::MaxDepthExceeded {
                depth: max_depth,
                id: node.id().to_string(),
            });
        }
        let children = node
            .as_container_mut()
            .map(|container| std::mem::take(container.children_mut()))
            .unwrap_or_default();
        let resolved = Vec::with_capacity(children.len());
        Ok(Self {
            node,
            remaining: children.into_iter(),
            resolved,
            depth,
        })
    }

    /// Put the resolved children back and resolve this container.
    fn finish(mut self, options: &InferenceOptions) -> Result<Node> {
        if let Some(container) = self.node.as_container_mut() {
            *container.children_mut() = self.resolved;
        }
        resolve_container(self.node, options, self.depth)
    }
}

/// Infer flow layout and containment for every container in `root`.
///
/// Containers are processed depth first, children before parents, so a
/// parent always classifies fully resolved children. Each container is
/// resolved once; containers promoted from rectangles get one extra layout
/// pass when they are created. The walk uses an explicit stack, bounded by
/// [`InferenceOptions::max_depth`].
pub fn infer_layout(root: Node, options: &InferenceOptions) -> Result<Node> {
    if !root.is_container() {
        return Ok(root);
    }

    let mut current = PendingContainer::new(root, 0, options.max_depth)?;
    let mut ancestors: Vec<PendingContainer> = Vec::new();
    let mut containers = 0usize;

    loop {
        if let Some(child) = current.remaining.next() {
            if child.is_container() {
                let pending = PendingContainer::new(child, current.depth + 1, options.max_depth)?;
                ancestors.push(std::mem::replace(&mut current, pending));
            } else {
                current.resolved.push(child);
            }
            continue;
        }

        let node = current.finish(options)?;
        containers += 1;

        match ancestors.pop() {
            Some(parent) => {
                current = parent;
                let node = if options.collapse_empty_frames {
                    collapse_empty_frame(node)
                } else {
                    node
                };
                current.resolved.push(node);
            }
            None => {
                debug!(id = %node.id(), containers, "layout inference complete");
                return Ok(node);
            }
        }
    }
}

/// A childless frame with no layout has no structural role and behaves like
/// a plain rectangle, which makes it eligible to enclose its siblings.
fn collapse_empty_frame(node: Node) -> Node {
    match node {
        Node::Frame(frame) if is_empty_frame(&frame) => Node::Rectangle(RectangleNode::from(frame)),
        other => other,
    }
}

fn is_empty_frame(frame: &FrameNode) -> bool {
    frame.children.is_empty() && frame.layout_mode == LayoutMode::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_core::{Geometry, GroupNode, LayoutAlign, NodeKind, Padding, TextNode};

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Node {
        RectangleNode::new(id, id, Geometry::new(x, y, w, h)).into()
    }

    fn text(id: &str, x: f64, y: f64, w: f64, h: f64) -> Node {
        TextNode::new(id, id, Geometry::new(x, y, w, h), id).into()
    }

    #[test]
    fn test_leaf_root_is_unchanged() {
        let leaf = rect("r", 0.0, 0.0, 10.0, 10.0);
        assert_eq!(infer_layout(leaf.clone(), &InferenceOptions::default()).unwrap(), leaf);
    }

    #[test]
    fn test_children_resolved_before_parent() {
        // Two groups side by side, each a vertical stack.
        let left = GroupNode::new("left", "left", Geometry::new(0.0, 0.0, 100.0, 100.0)).with_children(vec![
            text("l1", 0.0, 0.0, 100.0, 40.0),
            text("l2", 0.0, 60.0, 100.0, 40.0),
        ]);
        let right = GroupNode::new("right", "right", Geometry::new(120.0, 0.0, 100.0, 100.0)).with_children(vec![
            text("r1", 0.0, 0.0, 100.0, 40.0),
            text("r2", 0.0, 60.0, 100.0, 40.0),
        ]);
        let root: Node = FrameNode::new("root", "root", Geometry::new(0.0, 0.0, 220.0, 100.0))
            .with_children(vec![right.into(), left.into()])
            .into();

        let result = infer_layout(root, &InferenceOptions::default()).unwrap();
        let root = result.as_frame().unwrap();
        assert_eq!(root.layout_mode, LayoutMode::Horizontal);
        assert_eq!(root.item_spacing, 20.0);
        assert_eq!(root.padding, Padding::default());

        for child in &root.children {
            let column = child.as_frame().expect("groups are promoted");
            assert_eq!(column.layout_mode, LayoutMode::Vertical);
            assert_eq!(column.item_spacing, 20.0);
            assert_eq!(column.base.layout_align, Some(LayoutAlign::Center));
        }
        assert_eq!(root.children[0].id().as_str(), "left");
    }

    #[test]
    fn test_depth_limit() {
        let mut node: Node = FrameNode::new("leaf-frame", "f", Geometry::new(0.0, 0.0, 10.0, 10.0))
            .with_children(vec![rect("r", 0.0, 0.0, 1.0, 1.0)])
            .into();
        for depth in 0..5 {
            node = FrameNode::new(format!("f{depth}"), "f", Geometry::new(0.0, 0.0, 10.0, 10.0))
                .with_children(vec![node])
                .into();
        }

        let options = InferenceOptions::default().with_max_depth(3);
        let err = infer_layout(node.clone(), &options).unwrap_err();
        assert!(matches!(err, InferenceError::MaxDepthExceeded { depth: 3, .. }));

        assert!(infer_layout(node, &InferenceOptions::default()).is_ok());
    }

    #[test]
    fn test_depth_limit_covers_nested_containment() {
        // Each rectangle encloses the next, so nested promotion adds a level
        // per rectangle below the group at depth 1.
        let mut layers: Vec<Node> = (0..6)
            .map(|i| {
                let inset = i as f64 * 10.0;
                rect(&format!("layer{i}"), inset, inset, 200.0 - 2.0 * inset, 200.0 - 2.0 * inset)
            })
            .collect();
        layers.push(text("label", 95.0, 95.0, 10.0, 10.0));
        let stack = GroupNode::new("stack", "stack", Geometry::new(0.0, 0.0, 200.0, 200.0)).with_children(layers);
        let root: Node = FrameNode::new("root", "root", Geometry::new(0.0, 0.0, 400.0, 400.0))
            .with_children(vec![stack.into()])
            .into();

        let options = InferenceOptions::default()
            .with_nested_containment(true)
            .with_max_depth(4);
        let err = infer_layout(root.clone(), &options).unwrap_err();
        assert_eq!(
            err,
            InferenceError::MaxDepthExceeded {
                depth: 4,
                id: "layer3".into()
            }
        );

        let options = InferenceOptions::default()
            .with_nested_containment(true)
            .with_max_depth(7);
        assert!(infer_layout(root, &options).is_ok());
    }

    #[test]
    fn test_missing_id_deep_in_tree_is_reported() {
        let nameless = GroupNode::new("", "nameless", Geometry::new(0.0, 0.0, 50.0, 50.0)).with_children(vec![
            rect("a", 0.0, 0.0, 10.0, 10.0),
            rect("b", 20.0, 0.0, 10.0, 10.0),
        ]);
        let root: Node = FrameNode::new("root", "root", Geometry::new(0.0, 0.0, 100.0, 100.0))
            .with_children(vec![nameless.into()])
            .into();
        let err = infer_layout(root, &InferenceOptions::default()).unwrap_err();
        assert!(matches!(err, InferenceError::MissingId { .. }));
    }

    #[test]
    fn test_collapse_empty_frames_enables_containment() {
        let card = FrameNode::new("card", "card", Geometry::new(0.0, 0.0, 100.0, 100.0));
        let children = vec![card.into(), text("label", 10.0, 10.0, 50.0, 20.0)];
        let root = || -> Node {
            FrameNode::new("root", "root", Geometry::new(0.0, 0.0, 200.0, 200.0))
                .with_children(children.clone())
                .into()
        };

        let kept = infer_layout(root(), &InferenceOptions::default()).unwrap();
        assert_eq!(kept.children().len(), 2);
        assert!(kept.as_frame().unwrap().is_relative);

        let options = InferenceOptions::default().with_collapse_empty_frames(true);
        let collapsed = infer_layout(root(), &options).unwrap();
        assert_eq!(collapsed.children().len(), 1);
        let card = collapsed.children()[0].as_frame().unwrap();
        assert_eq!(card.base.id.as_str(), "card");
        assert_eq!(card.children[0].kind(), NodeKind::Text);
    }
}
