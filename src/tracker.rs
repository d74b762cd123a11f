mod config;
mod continuity_tracker;
mod detection;
mod gating;
mod rect;
mod trace_buffer;
mod track_state;

pub use config::{ConfigError, TrackerConfig};
pub use continuity_tracker::{ContinuityTracker, TrackerOutput};
pub use detection::{Detection, is_sorted_by_area, sort_by_area};
pub use gating::{GateDecision, GatingReference, gate};
pub use rect::{FrameSize, Point, Rect, Velocity, displacement, distance_sq};
pub use trace_buffer::TraceBuffer;
pub use track_state::TrackState;
