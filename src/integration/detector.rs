//! Trait for upstream detection suppliers.

use crate::tracker::{Detection, sort_by_area};

/// Trait for upstream blob detection stages.
///
/// Implement this trait to connect a segmentation stage (background
/// subtraction, contour extraction, ...) to the tracker.
///
/// # Example
///
/// ```ignore
/// use blobtrack_rs::{DetectionSource, Detection};
///
/// struct MySegmenter {
///     // Your video reader and foreground model here
/// }
///
/// impl DetectionSource for MySegmenter {
///     type Error = std::io::Error;
///
///     fn next_detections(&mut self) -> Result<Option<Vec<Detection>>, Self::Error> {
///         // Read a frame, extract blobs, sort them by area
///         Ok(None)
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for supplier failures.
    type Error;

    /// Detections for the next frame, sorted by area, largest first.
    ///
    /// # Returns
    /// `Ok(None)` at end of stream. `Ok(Some(vec![]))` is a frame where
    /// nothing was seen.
    fn next_detections(&mut self) -> Result<Option<Vec<Detection>>, Self::Error>;
}

/// Helper trait for converting supplier-specific outputs to `Detection`.
///
/// Implementations must return detections sorted by area, largest first.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(mut self) -> Vec<Detection> {
        sort_by_area(&mut self);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::is_sorted_by_area;

    #[test]
    fn test_vec_into_detections_sorts() {
        let dets = vec![
            Detection::new(0, 0, 10, 10, 100.0),
            Detection::new(0, 0, 30, 30, 900.0),
        ]
        .into_detections();
        assert!(is_sorted_by_area(&dets));
        assert_eq!(dets[0].area, 900.0);
    }
}
