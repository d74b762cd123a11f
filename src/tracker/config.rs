use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tracker::gating::GatingReference;
use crate::tracker::rect::FrameSize;

/// Configuration for the ContinuityTracker.
///
/// Deserializes with per-field defaults, so a partial JSON object only
/// overrides the keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum blob area; smaller blobs are noise
    pub area_threshold: f64,
    /// Maximum frame-to-frame centroid distance in pixels
    pub max_gate_distance: u32,
    /// Consecutive failed frames tolerated before gating is relaxed and
    /// extrapolation is abandoned
    pub gating_grace: u32,
    /// Trace buffer capacity (the buffer may briefly hold one more)
    pub trace_capacity: usize,
    /// Smooth-frame threshold for switching to hard tracking. No switch
    /// currently reads it.
    pub min_smooth_frames: u32,
    pub gating_reference: GatingReference,
    /// Bounds for extrapolated positions
    pub frame_size: FrameSize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            area_threshold: 200.0,
            max_gate_distance: 150,
            gating_grace: 10,
            trace_capacity: 6,
            min_smooth_frames: 10,
            gating_reference: GatingReference::LastSingle,
            frame_size: FrameSize::default(),
        }
    }
}

impl TrackerConfig {
    /// Squared gate distance compared against squared centroid distances.
    pub fn gate_dist_sq(&self) -> i64 {
        let d = self.max_gate_distance as i64;
        d * d
    }

    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = FrameSize::new(width, height);
        self
    }

    pub fn with_gating_reference(mut self, reference: GatingReference) -> Self {
        self.gating_reference = reference;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.area_threshold.is_finite() || self.area_threshold < 0.0 {
            return Err(ConfigError::AreaThreshold(self.area_threshold));
        }
        if self.max_gate_distance == 0 {
            return Err(ConfigError::Zero("max_gate_distance"));
        }
        if self.gating_grace == 0 {
            return Err(ConfigError::Zero("gating_grace"));
        }
        if self.trace_capacity == 0 {
            return Err(ConfigError::Zero("trace_capacity"));
        }
        if self.frame_size.width == 0 || self.frame_size.height == 0 {
            return Err(ConfigError::FrameSize {
                width: self.frame_size.width,
                height: self.frame_size.height,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("area threshold must be a finite, non-negative number, got {0}")]
    AreaThreshold(f64),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("frame size must be non-empty, got {width}x{height}")]
    FrameSize { width: u32, height: u32 },
}
