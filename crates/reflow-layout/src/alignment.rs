//! Cross-axis alignment of a child inside a stacked container.

use reflow_core::{Geometry, LayoutAlign, LayoutMode};

use crate::geometry::Axis;

/// Default distance from the container's center still read as centered.
pub const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 4.0;

/// Classifies a child as sitting at the start, center or end of the cross axis.
///
/// Never produces [`LayoutAlign::Stretch`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentClassifier {
    pub tolerance: f64,
}

impl Default for AlignmentClassifier {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_ALIGNMENT_TOLERANCE,
        }
    }
}

impl AlignmentClassifier {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// `child` is in `container`'s local space; `mode` is the container's
    /// stacking direction (`None` is read as horizontal).
    pub fn classify(&self, child: &Geometry, container: &Geometry, mode: LayoutMode) -> LayoutAlign {
        let cross = match mode.cross() {
            LayoutMode::Horizontal => Axis::X,
            LayoutMode::Vertical | LayoutMode::None => Axis::Y,
        };
        let offset = cross.center(child) - cross.size(container) / 2.0;

        if offset < -self.tolerance {
            LayoutAlign::Min
        } else if offset > self.tolerance {
            LayoutAlign::Max
        } else {
            LayoutAlign::Center
        }
    }
}
