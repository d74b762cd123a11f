//! Builder for creating Detection objects from various input formats.

use crate::tracker::{Detection, Point, Rect};

/// Builder for creating `Detection` objects from various input formats.
///
/// Area defaults to the box area and the centroid to the box midpoint.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    bbox: Rect,
    area: Option<f64>,
    centroid: Option<Point>,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        self.bbox = Rect::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: i32, cy: i32, w: i32, h: i32) -> Self {
        self.bbox = Rect::from_xywh(cx, cy, w, h);
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.bbox = Rect::new(x, y, w, h);
        self
    }

    pub fn rect(mut self, bbox: Rect) -> Self {
        self.bbox = bbox;
        self
    }

    /// Set the blob area, e.g. a contour area smaller than its box.
    pub fn area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    pub fn centroid(mut self, centroid: Point) -> Self {
        self.centroid = Some(centroid);
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        let det = Detection::from_rect(self.bbox, self.area.unwrap_or_else(|| self.bbox.area()));
        match self.centroid {
            Some(c) => det.with_centroid(c),
            None => det,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_builder() {
        let det = DetectionBuilder::new()
            .tlbr(10, 20, 50, 80)
            .area(1500.0)
            .build();

        assert_eq!(det.area, 1500.0);
        assert_eq!(det.bbox.to_tlwh(), [10, 20, 40, 60]);
        assert_eq!(det.centroid, Point::new(30, 50));
    }

    #[test]
    fn test_defaults_from_box() {
        let det = DetectionBuilder::new().xywh(100, 100, 20, 10).build();
        assert_eq!(det.area, 200.0);
        assert_eq!(det.centroid, Point::new(100, 100));

        let det = DetectionBuilder::new()
            .tlwh(0, 0, 10, 10)
            .centroid(Point::new(2, 3))
            .build();
        assert_eq!(det.area, 100.0);
        assert_eq!(det.centroid, Point::new(2, 3));
    }
}
