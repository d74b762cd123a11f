//! Per-frame detection input for the tracker.

use std::cmp::Ordering;

use serde::Serialize;

use crate::tracker::rect::{Point, Rect};

/// Candidate object region for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Bounding box of the blob
    pub bbox: Rect,
    /// Blob area in square pixels (contour area, not necessarily the box area)
    pub area: f64,
    /// Reference point used for gating and tracing
    pub centroid: Point,
}

impl Detection {
    /// Detection from a TLBR box; the centroid is the box midpoint.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, area: f64) -> Self {
        Self::from_rect(Rect::from_tlbr(x1, y1, x2, y2), area)
    }

    pub fn from_rect(bbox: Rect, area: f64) -> Self {
        Self {
            bbox,
            area,
            centroid: bbox.center(),
        }
    }

    /// Override the centroid, e.g. with a contour moment centroid.
    pub fn with_centroid(mut self, centroid: Point) -> Self {
        self.centroid = centroid;
        self
    }
}

/// Sort detections by area, largest first.
///
/// The sort is stable, so equal-area blobs keep the supplier's order.
pub fn sort_by_area(detections: &mut [Detection]) {
    detections.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(Ordering::Equal));
}

/// Whether `detections` already satisfies the tracker's area-descending input contract.
pub fn is_sorted_by_area(detections: &[Detection]) -> bool {
    detections.windows(2).all(|w| w[0].area >= w[1].area)
}
