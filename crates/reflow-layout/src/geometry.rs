//! Interval and average computations over sibling geometry.

use glam::DVec2;
use reflow_core::{Geometry, SceneNode};

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component of `v` along this axis.
    pub fn component(self, v: DVec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Leading edge of `geometry` along this axis.
    pub fn position(self, geometry: &Geometry) -> f64 {
        self.component(geometry.position())
    }

    /// Extent of `geometry` along this axis.
    pub fn size(self, geometry: &Geometry) -> f64 {
        self.component(geometry.size())
    }

    /// Center of `geometry` along this axis.
    pub fn center(self, geometry: &Geometry) -> f64 {
        self.position(geometry) + self.size(geometry) / 2.0
    }
}

/// Arithmetic mean. `None` for an empty slice.
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Stable ascending sort of `nodes` by their leading edge on `axis`.
pub fn sort_along<T: SceneNode>(nodes: &mut [T], axis: Axis) {
    nodes.sort_by(|a, b| axis.position(a.geometry()).total_cmp(&axis.position(b.geometry())));
}

/// Gaps between consecutive siblings once ordered along `axis`.
///
/// For `[item]--8--[item]--8--[item]` the result is `[8, 8]`. Overlapping
/// siblings produce negative gaps. The input order is left untouched.
pub fn interval<T: SceneNode>(siblings: &[T], axis: Axis) -> Vec<f64> {
    let mut sorted: Vec<&Geometry> = siblings.iter().map(|s| s.geometry()).collect();
    sorted.sort_by(|a, b| axis.position(a).total_cmp(&axis.position(b)));

    sorted
        .windows(2)
        .map(|pair| axis.position(pair[1]) - (axis.position(pair[0]) + axis.size(pair[0])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_core::{Node, RectangleNode};

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Node {
        RectangleNode::new(id, id, Geometry::new(x, y, w, h)).into()
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[8.0, 8.0]), Some(8.0));
        assert_eq!(average(&[-4.0, 2.0, 5.0]), Some(1.0));
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn test_interval_sorts_a_copy() {
        let siblings = vec![
            rect("c", 120.0, 0.0, 50.0, 50.0),
            rect("a", 0.0, 0.0, 50.0, 50.0),
            rect("b", 60.0, 0.0, 50.0, 50.0),
        ];
        assert_eq!(interval(&siblings, Axis::X), vec![10.0, 10.0]);
        assert_eq!(interval(&siblings, Axis::Y), vec![-50.0, -50.0]);
        assert_eq!(siblings[0].id().as_str(), "c");
    }

    #[test]
    fn test_interval_single_sibling_is_empty() {
        let siblings = vec![rect("a", 0.0, 0.0, 10.0, 10.0)];
        assert!(interval(&siblings, Axis::X).is_empty());
    }

    #[test]
    fn test_sort_along_is_stable() {
        let mut nodes = vec![
            rect("b", 0.0, 20.0, 10.0, 10.0),
            rect("a1", 0.0, 0.0, 10.0, 10.0),
            rect("a2", 5.0, 0.0, 10.0, 10.0),
        ];
        sort_along(&mut nodes, Axis::Y);
        let ids: Vec<&str> = nodes.iter().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b"]);
    }

    #[test]
    fn test_axis_accessors() {
        let g = Geometry::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(Axis::X.position(&g), 10.0);
        assert_eq!(Axis::Y.size(&g), 40.0);
        assert_eq!(Axis::X.center(&g), 25.0);
        assert_eq!(Axis::Y.center(&g), 40.0);
    }
}
