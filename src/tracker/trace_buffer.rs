//! Bounded trail of accepted positions, kept for trace rendering.

use std::collections::VecDeque;

use crate::tracker::rect::Point;

/// Capacity-checked FIFO of accepted positions.
///
/// The front is trimmed only once the length *exceeds* the capacity, and only
/// before the next push, so the buffer holds up to `capacity + 1` points.
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    points: VecDeque<Point>,
    capacity: usize,
}

impl TraceBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Trim the oldest point if over capacity, then append `point`.
    pub fn push(&mut self, point: Point) {
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn newest(&self) -> Option<&Point> {
        self.points.back()
    }

    /// Integer mean of the buffered points, or `None` when empty.
    pub fn mean(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as i64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
        Some(Point::new((sx / n) as i32, (sy / n) as i32))
    }
}
