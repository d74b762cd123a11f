//! Integration module for connecting blob detection stages and renderers with the tracker.
//!
//! This module provides the supplier trait, a JSON-lines replay supplier, a
//! frame-loop pipeline and the render-ready overlay data.

mod builder;
mod detector;
mod overlay;
mod pipeline;
mod replay;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use overlay::{OverlayText, TraceMarker, trace_markers};
pub use pipeline::TrackerPipeline;
pub use replay::{ReplayError, ReplaySource};
