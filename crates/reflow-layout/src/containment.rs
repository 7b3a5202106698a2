//! Containment resolution: rectangles that enclose later siblings become
//! containers for them.
//!
//! Designers often draw a background rectangle and place content on top of it
//! instead of using a real container. Such a rectangle is promoted into a
//! frame carrying its identity and (when visible) its paints, the enclosed
//! siblings are moved into it, and the new frame gets its own layout pass.
//!
//! Tie-break: siblings are scanned in layer order (bottom first) and every
//! sibling belongs to at most one container. When several rectangles enclose
//! the same sibling, the one lowest in layer order claims it.

use indexmap::IndexMap;
use reflow_core::{
    AxisAlignment, FrameNode, InferenceError, LayoutMode, Node, NodeBase, RectangleNode, Result,
    SceneNode, ShapeStyle, SizingMode,
};
use tracing::{debug, trace};

use crate::compute::InferenceOptions;
use crate::transform::apply_auto_layout;

/// Promote enclosing rectangles among `node`'s children into containers, then
/// infer `node`'s own layout.
///
/// Containers with fewer than two children and leaves pass through unchanged.
/// A container without an id is a contract violation by the producer of the
/// tree and fails with [`InferenceError::MissingId`].
///
/// With [`InferenceOptions::nested_containment`], each level of nested
/// promotion counts against [`InferenceOptions::max_depth`], starting from
/// `node` at depth zero.
pub fn resolve_containment(node: Node, options: &InferenceOptions) -> Result<Node> {
    resolve_containment_at(node, options, 0)
}

/// [`resolve_containment`] for a container sitting at `depth` in the tree.
pub(crate) fn resolve_containment_at(mut node: Node, options: &InferenceOptions, depth: usize) -> Result<Node> {
    let Some(container) = node.as_container_mut() else {
        return Ok(node);
    };
    if container.children().len() < 2 {
        return Ok(node);
    }
    if container.id().is_empty() {
        return Err(InferenceError::MissingId {
            name: container.base().name.clone(),
        });
    }

    let children = std::mem::take(container.children_mut());
    *container.children_mut() = promote_enclosing(children, options, depth)?;

    Ok(apply_auto_layout(node, options))
}

/// Containment for containers with two or more children, plain layout
/// inference for the rest.
pub(crate) fn resolve_container(node: Node, options: &InferenceOptions, depth: usize) -> Result<Node> {
    if node.children().len() < 2 {
        return Ok(apply_auto_layout(node, options));
    }
    resolve_containment_at(node, options, depth)
}

/// For each rectangle candidate (by index), the indices of the siblings it
/// encloses, in candidate order.
///
/// Only rectangles are candidates. A rectangle already claimed by an earlier
/// candidate is not considered: anything it encloses later in layer order is
/// enclosed by the earlier one too and has been claimed already.
pub fn collect_enclosed(children: &[Node]) -> IndexMap<usize, Vec<usize>> {
    let mut claimed = vec![false; children.len()];
    let mut groups: IndexMap<usize, Vec<usize>> = IndexMap::new();

    for (i, candidate) in children.iter().enumerate().take(children.len().saturating_sub(1)) {
        if !candidate.is_rectangle_shaped() {
            trace!(id = %candidate.id(), kind = ?candidate.kind(), "not a containment candidate");
            continue;
        }
        if claimed[i] {
            trace!(id = %candidate.id(), "candidate already enclosed by an earlier rectangle");
            continue;
        }

        let bounds = candidate.geometry();
        for (j, sibling) in children.iter().enumerate().skip(i + 1) {
            if !claimed[j] && bounds.encloses(sibling.geometry()) {
                groups.entry(i).or_default().push(j);
                claimed[j] = true;
            }
        }
    }

    groups
}

/// Replace every enclosing rectangle with a container holding its siblings,
/// at the rectangle's original position in `children`.
///
/// `depth` is the depth of the parent holding `children`; promoted
/// containers sit one level below it.
fn promote_enclosing(children: Vec<Node>, options: &InferenceOptions, depth: usize) -> Result<Vec<Node>> {
    let groups = collect_enclosed(&children);
    if groups.is_empty() {
        return Ok(children);
    }

    let mut slots: Vec<Option<Node>> = children.into_iter().map(Some).collect();

    for (rect_index, members) in groups {
        let rect = match slots[rect_index].take() {
            Some(Node::Rectangle(rect)) => rect,
            other => {
                slots[rect_index] = other;
                continue;
            }
        };
        if options.nested_containment && depth + 1 > options.max_depth {
            return Err(InferenceError::MaxDepthExceeded {
                depth: options.max_depth,
                id: rect.base.id.to_string(),
            });
        }
        let enclosed: Vec<Node> = members.iter().filter_map(|&j| slots[j].take()).collect();

        debug!(id = %rect.base.id, enclosed = enclosed.len(), "promoting rectangle to container");
        let container = Node::Frame(promote_rectangle(rect, enclosed));

        // Enclosed siblings were resolved before their parent; the new
        // container only needs its own pass.
        let container = if options.nested_containment {
            resolve_container(container, options, depth + 1)?
        } else {
            apply_auto_layout(container, options)
        };
        slots[rect_index] = Some(container);
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Build a frame from `rect` and move `children` into its coordinate space.
///
/// An invisible rectangle still provides structure but drops its paints and
/// effects so it does not reappear. Opacity is never carried over since it
/// would dim the new children.
pub fn promote_rectangle(rect: RectangleNode, children: Vec<Node>) -> FrameNode {
    let RectangleNode {
        base,
        style,
        corner_radius,
    } = rect;
    let origin = base.geometry.position();

    let mut frame_base = NodeBase::new(base.id, base.name, base.geometry);
    let frame_style = if base.visible {
        frame_base.effects = base.effects;
        frame_base.effect_style_id = base.effect_style_id;
        style
    } else {
        ShapeStyle {
            stroke: style.stroke,
            ..Default::default()
        }
    };

    // TODO: enclosers larger than their own parent end up with negative
    // padding in the parent; clamp or re-anchor once a policy is agreed.
    let children = children
        .into_iter()
        .map(|mut child| {
            let local = child.geometry().relative_to(origin);
            *child.geometry_mut() = local;
            child
        })
        .collect();

    FrameNode {
        base: frame_base,
        style: frame_style,
        corner_radius,
        layout_mode: LayoutMode::None,
        primary_axis_sizing: SizingMode::Fixed,
        counter_axis_sizing: SizingMode::Fixed,
        main_axis_alignment: AxisAlignment::Start,
        cross_axis_alignment: AxisAlignment::Start,
        children,
        ..Default::default()
    }
}
