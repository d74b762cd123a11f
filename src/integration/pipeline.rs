//! TrackerPipeline for combining a detection supplier with tracking.

use std::ops::ControlFlow;

use tracing::debug;

use crate::tracker::{ConfigError, ContinuityTracker, TrackerConfig, TrackerOutput};

use super::DetectionSource;

/// A combined tracker that bundles a detection supplier with the ContinuityTracker.
///
/// This struct provides a convenient way to run end-to-end tracking
/// by combining any `DetectionSource` with the `ContinuityTracker`.
pub struct TrackerPipeline<D: DetectionSource> {
    source: D,
    tracker: ContinuityTracker,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given source and tracker config.
    pub fn new(source: D, config: TrackerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            source,
            tracker: ContinuityTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(source: D) -> Self {
        Self {
            source,
            tracker: ContinuityTracker::default(),
        }
    }

    /// Pull one frame from the source and advance the tracker.
    ///
    /// # Returns
    /// The tracker output, `None` at end of stream, or a supplier error.
    pub fn process_frame(&mut self) -> Result<Option<TrackerOutput>, D::Error> {
        let Some(detections) = self.source.next_detections()? else {
            return Ok(None);
        };
        Ok(Some(self.tracker.advance(&detections)))
    }

    /// Process frames until the source is exhausted or `on_frame` breaks.
    ///
    /// `on_frame` sees each output together with the tracker, so it can read
    /// the trace for drawing. Returns the number of frames processed.
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<u64, D::Error>
    where
        F: FnMut(&TrackerOutput, &ContinuityTracker) -> ControlFlow<()>,
    {
        let mut frames = 0;
        while let Some(output) = self.process_frame()? {
            frames += 1;
            if on_frame(&output, &self.tracker).is_break() {
                debug!(frame = output.frame_index, "pipeline stopped by caller");
                break;
            }
        }
        Ok(frames)
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &ContinuityTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut ContinuityTracker {
        &mut self.tracker
    }
}
