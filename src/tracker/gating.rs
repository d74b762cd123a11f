//! Distance gating between consecutive frames.

use serde::{Deserialize, Serialize};

use crate::tracker::rect::{Point, distance_sq};
use crate::tracker::trace_buffer::TraceBuffer;

/// Which point candidates are gated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatingReference {
    /// The centroid selected in the previous frame
    #[default]
    LastSingle,
    /// Integer mean of the trace buffer ("hard tracking"); falls back to the
    /// previous selection while the trace is empty
    TrailingAverage,
}

impl GatingReference {
    /// Resolve the reference point for this frame, if any exists yet.
    pub fn resolve(&self, last_pos: Option<Point>, trace: &TraceBuffer) -> Option<Point> {
        match self {
            GatingReference::LastSingle => last_pos,
            GatingReference::TrailingAverage => trace.mean().or(last_pos),
        }
    }
}

/// Outcome of gating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Gating does not apply this frame
    Open,
    /// Within the gate; carries the squared distance
    Pass(i64),
    /// Too far from the reference; carries the squared distance
    Reject(i64),
}

impl GateDecision {
    pub fn passed(&self) -> bool {
        !matches!(self, GateDecision::Reject(_))
    }
}

/// Gate `candidate` against `reference`. A `None` reference leaves the gate open.
pub fn gate(candidate: &Point, reference: Option<&Point>, max_dist_sq: i64) -> GateDecision {
    match reference {
        None => GateDecision::Open,
        Some(reference) => {
            let d2 = distance_sq(candidate, reference);
            if d2 > max_dist_sq {
                GateDecision::Reject(d2)
            } else {
                GateDecision::Pass(d2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate() {
        let reference = Point::new(100, 100);
        assert_eq!(gate(&Point::new(110, 105), Some(&reference), 22500), GateDecision::Pass(125));
        // boundary is inclusive
        assert_eq!(gate(&Point::new(250, 100), Some(&reference), 22500), GateDecision::Pass(22500));
        assert_eq!(gate(&Point::new(251, 100), Some(&reference), 22500), GateDecision::Reject(22801));
        assert_eq!(gate(&Point::new(9000, 9000), None, 22500), GateDecision::Open);
        assert!(GateDecision::Open.passed());
        assert!(!GateDecision::Reject(1).passed());
    }

    #[test]
    fn test_resolve_reference() {
        let mut trace = TraceBuffer::new(6);
        let last = Some(Point::new(50, 50));

        assert_eq!(GatingReference::LastSingle.resolve(last, &trace), last);
        assert_eq!(GatingReference::TrailingAverage.resolve(last, &trace), last);
        assert_eq!(GatingReference::TrailingAverage.resolve(None, &trace), None);

        trace.push(Point::new(0, 0));
        trace.push(Point::new(10, 20));
        assert_eq!(GatingReference::LastSingle.resolve(last, &trace), last);
        assert_eq!(
            GatingReference::TrailingAverage.resolve(last, &trace),
            Some(Point::new(5, 10))
        );
    }
}
