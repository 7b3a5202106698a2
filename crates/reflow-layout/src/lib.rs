//! Flow-layout inference for absolutely positioned design trees.
//!
//! This crate reads a tree whose children carry only absolute positions and
//! infers the stacking structure a designer most likely meant: direction,
//! item spacing, padding and cross-axis alignment.
//!
//! # Architecture
//!
//! 1. **Axis classification**: decides whether siblings stack horizontally, vertically or not at all
//! 2. **Padding and alignment**: derived from the children's bounds inside their container
//! 3. **Containment**: rectangles that enclose siblings become frames holding them
//! 4. **Tree driver**: applies the above bottom-up over a whole tree
//!
//! # Example
//!
//! ```ignore
//! use reflow_layout::{infer_layout, InferenceOptions};
//!
//! let tree: reflow_core::Node = serde_json::from_str(source)?;
//! let inferred = infer_layout(tree, &InferenceOptions::default())?;
//!
//! if let Some(frame) = inferred.as_frame() {
//!     println!("{:?} spacing {}", frame.layout_mode, frame.item_spacing);
//! }
//! ```

mod alignment;
mod axis;
mod compute;
mod containment;
mod geometry;
mod padding;
mod transform;

pub use alignment::{AlignmentClassifier, DEFAULT_ALIGNMENT_TOLERANCE};
pub use axis::{AxisClassifier, Classification, DEFAULT_OVERLAP_THRESHOLD};
pub use compute::{infer_layout, InferenceOptions, DEFAULT_MAX_DEPTH};
pub use containment::{collect_enclosed, promote_rectangle, resolve_containment};
pub use geometry::{average, interval, sort_along, Axis};
pub use padding::infer_padding;
pub use transform::{apply_auto_layout, needs_auto_layout};
