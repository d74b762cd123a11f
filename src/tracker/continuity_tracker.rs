//! Single-object continuity tracker: selection, gating, acceptance and gap extrapolation.

use serde::Serialize;
use tracing::{debug, trace};

use crate::tracker::config::{ConfigError, TrackerConfig};
use crate::tracker::detection::{Detection, is_sorted_by_area};
use crate::tracker::gating::gate;
use crate::tracker::rect::{Point, Rect, Velocity, displacement};
use crate::tracker::track_state::TrackState;

/// What the renderer needs after one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerOutput {
    pub frame_index: u64,
    /// Accepted centroid, an extrapolated guess, or the last known position
    pub plot_position: Option<Point>,
    pub last_known_rect: Option<Rect>,
    /// Centroid selected this frame, whether or not it passed the gate
    pub selected_pos: Option<Point>,
    /// An accepted detection was found this frame
    pub found: bool,
    /// The frame had no detections at all
    pub blind: bool,
    pub smooth_rate_percent: f64,
}

/// Result of the per-frame selection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Selection {
    /// A candidate passed the gate
    Accepted { rect: Rect, pos: Point },
    /// Every usable candidate was gated out; the largest one is kept as a best effort
    Fallback { rect: Rect, pos: Point },
    /// No candidate reached the noise floor
    Nothing,
}

impl Selection {
    fn pos(&self) -> Option<Point> {
        match self {
            Selection::Accepted { pos, .. } | Selection::Fallback { pos, .. } => Some(*pos),
            Selection::Nothing => None,
        }
    }
}

pub struct ContinuityTracker {
    state: TrackState,
    config: TrackerConfig,
}

impl Default for ContinuityTracker {
    fn default() -> Self {
        let config = TrackerConfig::default();
        Self {
            state: TrackState::new(config.trace_capacity),
            config,
        }
    }
}

impl ContinuityTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: TrackState::new(config.trace_capacity),
            config,
        })
    }

    /// Process one frame. `detections` must be sorted by area, largest first.
    pub fn advance(&mut self, detections: &[Detection]) -> TrackerOutput {
        debug_assert!(
            is_sorted_by_area(detections),
            "detections must be sorted by area, largest first"
        );
        self.state.frame_index += 1;

        let blind = detections.is_empty();
        if blind {
            self.state.blind_frame_count = self.state.blind_frame_count.saturating_add(1);
        } else {
            self.state.blind_frame_count = 0;
        }

        let selection = self.select(detections);

        let found = match selection {
            Selection::Accepted { rect, pos } => {
                self.accept(rect, pos);
                true
            }
            Selection::Fallback { .. } | Selection::Nothing => {
                self.extrapolate();
                false
            }
        };

        if let Some(pos) = selection.pos() {
            self.state.last_pos = Some(pos);
        }

        let output = TrackerOutput {
            frame_index: self.state.frame_index,
            plot_position: self.state.plot_position,
            last_known_rect: self.state.last_known_rect,
            selected_pos: selection.pos(),
            found,
            blind,
            smooth_rate_percent: self.state.smooth_rate_percent(),
        };

        trace!(
            frame = output.frame_index,
            found,
            blind,
            failed = self.state.failed_frame_count,
            plot = ?output.plot_position.map(|p| (p.x, p.y)),
            "frame tracked"
        );

        output
    }

    fn select(&self, detections: &[Detection]) -> Selection {
        let state = &self.state;
        let gating = state.frame_index > 1 && state.failed_frame_count < self.config.gating_grace;
        let reference = if gating {
            self.config
                .gating_reference
                .resolve(state.last_pos, &state.trace)
        } else {
            None
        };
        let max_dist_sq = self.config.gate_dist_sq();

        let mut selection = Selection::Nothing;
        for (i, det) in detections.iter().enumerate() {
            if det.area < self.config.area_threshold {
                break;
            }

            if i == 0 {
                selection = Selection::Fallback {
                    rect: det.bbox,
                    pos: det.centroid,
                };
            }

            let decision = gate(&det.centroid, reference.as_ref(), max_dist_sq);
            if !decision.passed() {
                debug!(
                    frame = state.frame_index,
                    candidate = i,
                    ?decision,
                    "candidate gated out"
                );
                continue;
            }

            return Selection::Accepted {
                rect: det.bbox,
                pos: det.centroid,
            };
        }

        if let Selection::Fallback { pos, .. } = selection {
            debug!(
                frame = state.frame_index,
                x = pos.x,
                y = pos.y,
                "no candidate passed the gate, keeping largest as fallback"
            );
        }
        selection
    }

    fn accept(&mut self, rect: Rect, pos: Point) {
        let state = &mut self.state;
        state.smooth_frame_count += 1;
        state.failed_frame_count = 0;
        state.velocity = match state.last_known_pos {
            Some(prev) => displacement(&prev, &pos),
            None => Velocity::zeros(),
        };
        state.last_known_rect = Some(rect);
        state.last_known_pos = Some(pos);
        state.plot_position = Some(pos);
        state.trace.push(pos);
    }

    fn extrapolate(&mut self) {
        let grace = self.config.gating_grace;
        let frame = self.config.frame_size;
        let state = &mut self.state;
        state.failed_frame_count += 1;

        let Some(known) = state.last_known_pos else {
            // Nothing accepted yet, so there is nothing to extrapolate from.
            if state.failed_frame_count >= grace {
                state.failed_frame_count = 0;
            }
            state.plot_position = None;
            return;
        };

        let estimate = project(known, state.velocity, state.failed_frame_count);
        let in_bounds = estimate.as_ref().is_some_and(|p| frame.contains(p));

        if in_bounds && state.failed_frame_count < grace {
            state.plot_position = estimate;
        } else {
            debug!(
                frame = state.frame_index,
                failed = state.failed_frame_count,
                in_bounds,
                "abandoning extrapolation, snapping to last known position"
            );
            state.failed_frame_count = 0;
            state.plot_position = Some(known);
        }
    }

    /// Drop all track state and start over with the same configuration.
    pub fn reset(&mut self) {
        self.state = TrackState::new(self.config.trace_capacity);
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Accepted positions, oldest first.
    pub fn trace(&self) -> impl Iterator<Item = &Point> + '_ {
        self.state.trace.iter()
    }
}

/// `origin + steps * velocity`, or `None` if it leaves the `i32` range.
fn project(origin: Point, velocity: Velocity, steps: u32) -> Option<Point> {
    let x = origin.x as i64 + velocity.x as i64 * steps as i64;
    let y = origin.y as i64 + velocity.y as i64 * steps as i64;
    Some(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}
