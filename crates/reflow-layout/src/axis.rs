//! Stacking-axis classification for a set of siblings.
//!
//! A set of siblings reads as a stack along an axis when they do not overlap
//! on that axis. A small negative tolerance absorbs near-touching edges. When
//! neither axis is clean, the axis whose average gap is less negative wins.

use reflow_core::{LayoutMode, SceneNode};
use tracing::{debug, trace};

use crate::geometry::{average, interval, sort_along, Axis};

/// Default tolerance for overlap between consecutive siblings.
///
/// Lowering it makes layouts more responsive at the cost of visual fidelity.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = -2.0;

/// Decides whether siblings stack horizontally, vertically or not at all.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisClassifier {
    /// Smallest gap (usually negative) still counted as "not overlapping"
    pub overlap_threshold: f64,
}

impl Default for AxisClassifier {
    fn default() -> Self {
        Self {
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

/// Result of [`AxisClassifier::classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<T> {
    /// Siblings ordered along the detected axis, or in layer order for `None`
    pub children: Vec<T>,
    pub direction: LayoutMode,
    /// Average gap along the detected axis, clamped to zero
    pub spacing: f64,
}

impl AxisClassifier {
    pub fn new(overlap_threshold: f64) -> Self {
        Self { overlap_threshold }
    }

    /// Pick a direction and the raw (possibly negative) average gap.
    ///
    /// Fewer than two siblings have no pair to measure and yield `None`.
    pub fn detect<T: SceneNode>(&self, siblings: &[T]) -> (LayoutMode, f64) {
        if siblings.len() < 2 {
            return (LayoutMode::None, 0.0);
        }

        let threshold = self.overlap_threshold;
        let interval_x = interval(siblings, Axis::X);
        let interval_y = interval(siblings, Axis::Y);
        let avg_x = average(&interval_x).unwrap_or(0.0);
        let avg_y = average(&interval_y).unwrap_or(0.0);

        trace!(?interval_x, ?interval_y, avg_x, avg_y, "sibling intervals");

        if interval_y.iter().all(|&gap| gap >= threshold) {
            return (LayoutMode::Vertical, avg_y);
        }
        if interval_x.iter().all(|&gap| gap >= threshold) {
            return (LayoutMode::Horizontal, avg_x);
        }

        // Neither axis is clean; fall back to the averages.
        match (avg_y <= threshold, avg_x <= threshold) {
            (true, true) => (LayoutMode::None, 0.0),
            (true, false) => (LayoutMode::Horizontal, avg_x),
            (false, _) => (LayoutMode::Vertical, avg_y),
        }
    }

    /// Classify `siblings` and reorder them along the chosen axis.
    ///
    /// Reordering is a stable sort on the axis coordinate only, so siblings
    /// sharing a coordinate keep their layer order. With no axis the layer
    /// order is returned unchanged.
    pub fn classify<T: SceneNode>(&self, mut siblings: Vec<T>) -> Classification<T> {
        let (direction, raw_spacing) = self.detect(&siblings);

        match direction {
            LayoutMode::Vertical => sort_along(&mut siblings, Axis::Y),
            LayoutMode::Horizontal => sort_along(&mut siblings, Axis::X),
            LayoutMode::None => {}
        }

        let spacing = raw_spacing.max(0.0);
        debug!(?direction, spacing, count = siblings.len(), "classified siblings");

        Classification {
            children: siblings,
            direction,
            spacing,
        }
    }
}
