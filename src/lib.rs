//! Single-object blob tracking across a video's frames.
//!
//! A [`ContinuityTracker`] consumes each frame's blob detections (sorted by
//! area, largest first), gates them against the previous selection, bridges
//! short gaps by extrapolating the last velocity, and keeps a short trace of
//! accepted positions for rendering.
//!
//! ```
//! use blobtrack_rs::{ContinuityTracker, Detection, TrackerConfig};
//!
//! let mut tracker = ContinuityTracker::new(TrackerConfig::default()).unwrap();
//! let out = tracker.advance(&[Detection::new(90, 90, 110, 110, 400.0)]);
//! assert!(out.found);
//! ```

pub mod integration;
pub mod tracker;

pub use integration::{
    DetectionBuilder, DetectionSource, IntoDetections, OverlayText, ReplayError, ReplaySource,
    TraceMarker, TrackerPipeline, trace_markers,
};
pub use tracker::{
    ConfigError, ContinuityTracker, Detection, FrameSize, GatingReference, Point, Rect,
    TrackState, TrackerConfig, TrackerOutput, Velocity,
};
