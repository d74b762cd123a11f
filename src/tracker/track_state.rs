use crate::tracker::rect::{Point, Rect, Velocity};
use crate::tracker::trace_buffer::TraceBuffer;

/// Everything the tracker carries from one frame to the next.
///
/// Positions that have not been observed yet are `None`.
#[derive(Debug, Clone)]
pub struct TrackState {
    /// Centroid selected by the previous frame's gating pass, accepted or not
    pub last_pos: Option<Point>,
    /// Most recent accepted centroid
    pub last_known_pos: Option<Point>,
    /// Most recent accepted bounding box
    pub last_known_rect: Option<Rect>,
    /// Displacement between the two most recent accepted centroids
    pub velocity: Velocity,
    /// Trailing accepted positions, oldest first
    pub trace: TraceBuffer,
    /// Frames seen so far; the first frame is 1
    pub frame_index: u64,
    /// Frames with an accepted detection
    pub smooth_frame_count: u64,
    /// Consecutive frames since the last acceptance
    pub failed_frame_count: u32,
    /// Consecutive frames with no detections at all
    pub blind_frame_count: u32,
    /// Position handed to the renderer this frame
    pub plot_position: Option<Point>,
}

impl TrackState {
    pub fn new(trace_capacity: usize) -> Self {
        Self {
            last_pos: None,
            last_known_pos: None,
            last_known_rect: None,
            velocity: Velocity::zeros(),
            trace: TraceBuffer::new(trace_capacity),
            frame_index: 0,
            smooth_frame_count: 0,
            failed_frame_count: 0,
            blind_frame_count: 0,
            plot_position: None,
        }
    }

    /// Percentage of frames with an accepted detection; 0 before the first frame.
    pub fn smooth_rate_percent(&self) -> f64 {
        if self.frame_index == 0 {
            return 0.0;
        }
        100.0 * self.smooth_frame_count as f64 / self.frame_index as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = TrackState::new(6);
        assert_eq!(state.frame_index, 0);
        assert_eq!(state.velocity, Velocity::new(0, 0));
        assert!(state.trace.is_empty());
        assert_eq!(state.trace.capacity(), 6);
        assert!(state.last_pos.is_none());
        assert!(state.plot_position.is_none());
        assert_eq!(state.smooth_rate_percent(), 0.0);
    }

    #[test]
    fn test_smooth_rate() {
        let mut state = TrackState::new(6);
        state.frame_index = 3;
        state.smooth_frame_count = 2;
        assert!((state.smooth_rate_percent() - 66.666_666).abs() < 1e-4);
    }
}
