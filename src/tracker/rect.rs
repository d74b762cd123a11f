use serde::{Deserialize, Serialize};

/// Integer pixel position.
pub type Point = nalgebra::Point2<i32>;

/// Per-frame displacement between two positions.
pub type Velocity = nalgebra::Vector2<i32>;

/// Axis-aligned bounding box in integer pixels.
///
/// Supports the common bounding box formats:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
/// - XYWH: Center X, Center Y, Width, Height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub width: i32,
    /// Height of the bounding box
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }

    /// Create a Rect from XYWH format (center x, center y, width, height).
    #[inline]
    pub fn from_xywh(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self {
            x: cx.saturating_sub(width / 2),
            y: cy.saturating_sub(height / 2),
            width,
            height,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2). The bottom-right corner
    /// saturates at the `i32` range.
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [
            self.x,
            self.y,
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        ]
    }

    /// TLBR corners, or `None` if the bottom-right corner is not representable.
    #[inline]
    pub fn checked_tlbr(&self) -> Option<[i32; 4]> {
        Some([
            self.x,
            self.y,
            self.x.checked_add(self.width)?,
            self.y.checked_add(self.height)?,
        ])
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        let [_, _, x2, y2] = self.to_tlbr();
        Point::new(x2, y2)
    }

    /// Midpoint of the top-left and bottom-right corners, truncated to whole pixels.
    #[inline]
    pub fn center(&self) -> Point {
        let [x1, y1, x2, y2] = self.to_tlbr();
        // the sum of two i32 always fits in i64, and half of it fits back in i32
        Point::new(
            ((x1 as i64 + x2 as i64) / 2) as i32,
            ((y1 as i64 + y2 as i64) / 2) as i32,
        )
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

/// Spatial extent of a video frame, used to bound extrapolated positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether `p` lies in `[0, width) x [0, height)`.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= 0
            && p.y >= 0
            && (p.x as i64) < self.width as i64
            && (p.y as i64) < self.height as i64
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Squared Euclidean distance between two points, saturating at `i64::MAX`.
#[inline]
pub fn distance_sq(a: &Point, b: &Point) -> i64 {
    let dx = a.x as i64 - b.x as i64;
    let dy = a.y as i64 - b.y as i64;
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

/// `to - from`, saturating each component at the `i32` range.
#[inline]
pub fn displacement(from: &Point, to: &Point) -> Velocity {
    Velocity::new(to.x.saturating_sub(from.x), to.y.saturating_sub(from.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10, 20, 30, 40);

        // TLWH
        assert_eq!(rect.to_tlwh(), [10, 20, 30, 40]);

        // TLBR
        assert_eq!(rect.to_tlbr(), [10, 20, 40, 60]);

        assert_eq!(rect.top_left(), Point::new(10, 20));
        assert_eq!(rect.bottom_right(), Point::new(40, 60));
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10, 20, 40, 60);
        assert_eq!(rect.to_tlwh(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_from_xywh() {
        let rect = Rect::from_xywh(25, 40, 30, 40);
        assert_eq!(rect.to_tlwh(), [10, 20, 30, 40]);
        assert_eq!(rect.center(), Point::new(25, 40));
    }

    #[test]
    fn test_center_truncates() {
        // (3 + 8) / 2 = 5, (0 + 5) / 2 = 2
        let rect = Rect::from_tlbr(3, 0, 8, 5);
        assert_eq!(rect.center(), Point::new(5, 2));
    }

    #[test]
    fn test_area() {
        assert_eq!(Rect::new(0, 0, 25, 20).area(), 500.0);
        assert_eq!(Rect::default().area(), 0.0);
    }

    #[test]
    fn test_frame_contains() {
        let frame = FrameSize::new(640, 480);
        assert!(frame.contains(&Point::new(0, 0)));
        assert!(frame.contains(&Point::new(639, 479)));
        assert!(!frame.contains(&Point::new(640, 10)));
        assert!(!frame.contains(&Point::new(10, 480)));
        assert!(!frame.contains(&Point::new(-1, 10)));
        assert!(!frame.contains(&Point::new(10, -1)));
    }

    #[test]
    fn test_distance_sq() {
        let a = Point::new(100, 100);
        let b = Point::new(110, 105);
        assert_eq!(distance_sq(&a, &b), 125);
        assert_eq!(distance_sq(&b, &a), 125);

        let far = Point::new(i32::MAX / 2, 0);
        assert!(distance_sq(&Point::origin(), &far) > i32::MAX as i64);
    }

    #[test]
    fn test_distance_sq_saturates() {
        let a = Point::new(i32::MIN, i32::MIN);
        let b = Point::new(i32::MAX, i32::MAX);
        assert_eq!(distance_sq(&a, &b), i64::MAX);
        assert_eq!(distance_sq(&b, &a), i64::MAX);
    }

    #[test]
    fn test_displacement_saturates() {
        let a = Point::new(i32::MIN, 0);
        let b = Point::new(i32::MAX, 5);
        assert_eq!(displacement(&a, &b), Velocity::new(i32::MAX, 5));
        assert_eq!(displacement(&b, &a), Velocity::new(i32::MIN, -5));
        assert_eq!(displacement(&Point::new(100, 100), &Point::new(110, 105)), Velocity::new(10, 5));
    }

    #[test]
    fn test_huge_box_does_not_overflow() {
        let rect = Rect::new(2147483000, 0, 1000, 10);
        assert_eq!(rect.checked_tlbr(), None);
        assert_eq!(rect.to_tlbr(), [2147483000, 0, i32::MAX, 10]);
        assert_eq!(rect.bottom_right(), Point::new(i32::MAX, 10));
        assert_eq!(rect.center(), Point::new(2147483323, 5));

        let rect = Rect::new(i32::MAX - 2, i32::MIN, 2, 10);
        assert_eq!(rect.checked_tlbr(), Some([i32::MAX - 2, i32::MIN, i32::MAX, i32::MIN + 10]));
        assert_eq!(rect.center(), Point::new(i32::MAX - 1, i32::MIN + 5));

        let rect = Rect::from_tlbr(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(rect.width, i32::MAX);
    }
}
