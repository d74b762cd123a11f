//! Render-ready overlay data: status text lines and trace markers.

use serde::Serialize;

use crate::tracker::{ContinuityTracker, Point, TrackerOutput};

/// The text block drawn in the corner of each output frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayText {
    pub lines: [String; 4],
}

impl OverlayText {
    /// Build the overlay for `output`. Coordinates are the most recent selected
    /// centroid, accepted or not.
    pub fn new(output: &TrackerOutput, tracker: &ContinuityTracker) -> Self {
        let coord = |f: fn(&Point) -> i32| {
            tracker
                .state()
                .last_pos
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| f(p).to_string())
        };
        Self {
            lines: [
                format!("Frame: {}", output.frame_index),
                format!("Object X: {}", coord(|p| p.x)),
                format!("Object Y: {}", coord(|p| p.y)),
                format!(
                    "Smooth rate: {}%",
                    format_significant(output.smooth_rate_percent, 3)
                ),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// One trace point in drawing order; later markers are drawn heavier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceMarker {
    pub position: Point,
    /// 0 for the oldest point
    pub index: usize,
}

/// Trace markers from oldest to newest.
pub fn trace_markers(tracker: &ContinuityTracker) -> Vec<TraceMarker> {
    tracker
        .trace()
        .enumerate()
        .map(|(index, p)| TraceMarker {
            position: *p,
            index,
        })
        .collect()
}

/// Format with `digits` significant digits, dropping trailing zeros.
fn format_significant(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let magnitude = value.abs().log10().floor() as i32 + 1;
    let decimals = (digits - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
