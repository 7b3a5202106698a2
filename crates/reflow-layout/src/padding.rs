//! Padding inference for a container whose children are already ordered.

use reflow_core::{Geometry, LayoutMode, Padding, SceneNode};

/// Compute the four-sided inset of `container` from its children.
///
/// `children` must already be in stacking order for `mode`. The leading and
/// trailing edges on the main axis come from the first and last child; on the
/// cross axis each side is the tightest gap over all children, since they
/// need not be aligned. A lone child uses its own four edge gaps. `None` is
/// treated as horizontal.
pub fn infer_padding<T: SceneNode>(container: &Geometry, mode: LayoutMode, children: &[T]) -> Padding {
    let (Some(first), Some(last)) = (children.first(), children.last()) else {
        return Padding::default();
    };
    let (first, last) = (first.geometry(), last.geometry());

    if children.len() == 1 {
        return Padding {
            top: first.y,
            right: container.width - first.right(),
            bottom: container.height - first.bottom(),
            left: first.x,
        };
    }

    let tightest = |gap: fn(&Geometry, &Geometry) -> f64| {
        children
            .iter()
            .map(|child| gap(container, child.geometry()))
            .fold(f64::INFINITY, f64::min)
    };

    match mode {
        LayoutMode::Vertical => Padding {
            top: first.y,
            bottom: container.height - last.bottom(),
            left: tightest(|_, c| c.x),
            right: tightest(|p, c| p.width - c.right()),
        },
        LayoutMode::Horizontal | LayoutMode::None => Padding {
            left: first.x,
            right: container.width - last.right(),
            top: tightest(|_, c| c.y),
            bottom: tightest(|p, c| p.height - c.bottom()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_core::{Node, RectangleNode};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Node {
        RectangleNode::new("r", "r", Geometry::new(x, y, w, h)).into()
    }

    #[test]
    fn test_single_child_padding() {
        let container = Geometry::new(0.0, 0.0, 100.0, 100.0);
        let padding = infer_padding(&container, LayoutMode::Horizontal, &[rect(10.0, 20.0, 30.0, 40.0)]);
        assert_eq!(padding, Padding::new(20.0, 60.0, 40.0, 10.0));
    }

    #[test]
    fn test_single_child_ignores_mode() {
        let container = Geometry::new(0.0, 0.0, 100.0, 100.0);
        let child = [rect(10.0, 20.0, 30.0, 40.0)];
        assert_eq!(
            infer_padding(&container, LayoutMode::Vertical, &child),
            infer_padding(&container, LayoutMode::Horizontal, &child)
        );
    }

    #[test]
    fn test_horizontal_padding() {
        let container = Geometry::new(40.0, 40.0, 200.0, 60.0);
        let children = [
            rect(0.0, 0.0, 50.0, 50.0),
            rect(60.0, 0.0, 50.0, 50.0),
            rect(120.0, 0.0, 50.0, 50.0),
        ];
        let padding = infer_padding(&container, LayoutMode::Horizontal, &children);
        assert_eq!(padding, Padding::new(0.0, 30.0, 10.0, 0.0));
    }

    #[test]
    fn test_vertical_padding_uses_tightest_cross_gap() {
        let container = Geometry::new(0.0, 0.0, 100.0, 200.0);
        let children = [
            rect(10.0, 5.0, 50.0, 40.0),
            rect(30.0, 60.0, 60.0, 40.0),
            rect(20.0, 120.0, 20.0, 40.0),
        ];
        let padding = infer_padding(&container, LayoutMode::Vertical, &children);
        assert_eq!(padding.top, 5.0);
        assert_eq!(padding.bottom, 40.0);
        assert_eq!(padding.left, 10.0);
        assert_eq!(padding.right, 10.0);
    }

    #[test]
    fn test_no_children() {
        let container = Geometry::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            infer_padding::<Node>(&container, LayoutMode::Vertical, &[]),
            Padding::default()
        );
    }
}
