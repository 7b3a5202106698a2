//! Flow-layout inference for a single container.
//!
//! Classifies the container's direct children, then fills in the derived
//! layout fields: direction, item spacing, padding and each child's cross-axis
//! alignment. Groups have no layout fields, so a group is promoted to a frame
//! before any of them is written.

use reflow_core::{FrameNode, LayoutMode, Node, SceneNode};
use tracing::debug;

use crate::compute::InferenceOptions;
use crate::padding::infer_padding;

/// Whether [`apply_auto_layout`] will touch `node`.
///
/// Frames qualify only while their layout is unset and they have children;
/// groups always qualify.
pub fn needs_auto_layout(node: &Node) -> bool {
    match node {
        Node::Frame(frame) => frame.layout_mode == LayoutMode::None && !frame.children.is_empty(),
        Node::Group(_) => true,
        _ => false,
    }
}

/// Infer a flow layout for `node` from its direct children.
///
/// Outcomes:
/// - no axis, two or more children: marked relative, otherwise unchanged
/// - no axis, one child: horizontal with zero spacing so padding is meaningful
/// - an axis: that direction with the clamped average gap as spacing
///
/// Nodes that do not qualify (see [`needs_auto_layout`]) and childless groups
/// are returned as they are.
pub fn apply_auto_layout(mut node: Node, options: &InferenceOptions) -> Node {
    if !needs_auto_layout(&node) {
        return node;
    }
    let Some(container) = node.as_container_mut() else {
        return node;
    };

    let classification = options.axis.classify(std::mem::take(container.children_mut()));
    *container.children_mut() = classification.children;

    let mode = match (classification.direction, container.children().len()) {
        (LayoutMode::None, 0) => return node,
        (LayoutMode::None, 1) => LayoutMode::Horizontal,
        (LayoutMode::None, count) => {
            container.set_relative(true);
            debug!(id = %container.id(), count, "no stacking axis, keeping children free-positioned");
            return node;
        }
        (direction, _) => direction,
    };

    match node.into_frame() {
        Ok(frame) => Node::Frame(finish_frame(frame, mode, classification.spacing, options)),
        Err(leaf) => leaf,
    }
}

/// Write the derived layout fields onto a frame whose children are ordered.
fn finish_frame(mut frame: FrameNode, mode: LayoutMode, spacing: f64, options: &InferenceOptions) -> FrameNode {
    let bounds = frame.base.geometry;

    frame.layout_mode = mode;
    frame.item_spacing = spacing.max(0.0);
    frame.padding = infer_padding(&bounds, mode, &frame.children);

    for child in &mut frame.children {
        let align = options.alignment.classify(child.geometry(), &bounds, mode);
        child.base_mut().layout_align = Some(align);
    }

    debug!(
        id = %frame.base.id,
        ?mode,
        spacing = frame.item_spacing,
        padding = ?frame.padding,
        "inferred auto layout"
    );
    frame
}
