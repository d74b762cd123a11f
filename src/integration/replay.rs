//! JSON-lines detection supplier for replaying recorded blob detections.
//!
//! Each non-blank line holds one frame as a JSON array:
//!
//! ```text
//! [{"bbox": {"x": 90, "y": 90, "width": 20, "height": 20}, "area": 380.5}]
//! []
//! [{"bbox": {"x": 95, "y": 92, "width": 20, "height": 20}, "centroid": [104, 101]}]
//! ```
//!
//! `area` defaults to the box area and `centroid` to the box midpoint.

use std::io::BufRead;

use serde::Deserialize;
use thiserror::Error;

use super::{DetectionBuilder, DetectionSource};
use crate::tracker::{Detection, Point, Rect, sort_by_area};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read detections: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed detections on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("bounding box {bbox:?} on line {line} exceeds the pixel coordinate range")]
    OutOfRange { line: usize, bbox: Rect },
}

/// One recorded detection as it appears on disk.
#[derive(Debug, Deserialize)]
struct RecordedDetection {
    bbox: Rect,
    area: Option<f64>,
    centroid: Option<Point>,
}

impl TryFrom<RecordedDetection> for Detection {
    /// The offending box.
    type Error = Rect;

    fn try_from(rec: RecordedDetection) -> Result<Self, Self::Error> {
        if rec.bbox.checked_tlbr().is_none() {
            return Err(rec.bbox);
        }
        let mut builder = DetectionBuilder::new().rect(rec.bbox);
        if let Some(area) = rec.area {
            builder = builder.area(area);
        }
        if let Some(centroid) = rec.centroid {
            builder = builder.centroid(centroid);
        }
        Ok(builder.build())
    }
}

/// Reads one frame of detections per line and hands them out area-sorted.
pub struct ReplaySource<R: BufRead> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> DetectionSource for ReplaySource<R> {
    type Error = ReplayError;

    fn next_detections(&mut self) -> Result<Option<Vec<Detection>>, Self::Error> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let recorded: Vec<RecordedDetection> =
                serde_json::from_str(text).map_err(|source| ReplayError::Parse {
                    line: self.line,
                    source,
                })?;
            let line = self.line;
            let mut detections = recorded
                .into_iter()
                .map(|rec| {
                    Detection::try_from(rec).map_err(|bbox| ReplayError::OutOfRange { line, bbox })
                })
                .collect::<Result<Vec<_>, _>>()?;
            sort_by_area(&mut detections);
            return Ok(Some(detections));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_replay_frames() {
        let input = r#"[{"bbox": {"x": 90, "y": 90, "width": 20, "height": 20}, "area": 380.5}]

[]
[{"bbox": {"x": 0, "y": 0, "width": 10, "height": 10}}, {"bbox": {"x": 50, "y": 50, "width": 30, "height": 30}, "centroid": [60, 61]}]
"#;
        let mut source = ReplaySource::new(Cursor::new(input));

        let frame = source.next_detections().unwrap().unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].area, 380.5);
        assert_eq!(frame[0].centroid, Point::new(100, 100));

        // blank line skipped, empty array is a blind frame
        let frame = source.next_detections().unwrap().unwrap();
        assert!(frame.is_empty());
        assert_eq!(source.line(), 3);

        let frame = source.next_detections().unwrap().unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0].area, 900.0);
        assert_eq!(frame[0].centroid, Point::new(60, 61));
        assert_eq!(frame[1].area, 100.0);

        assert!(source.next_detections().unwrap().is_none());
    }

    #[test]
    fn test_parse_error_reports_line() {
        let input = "[]\n[{\"bbox\": 12}]\n";
        let mut source = ReplaySource::new(Cursor::new(input));
        assert!(source.next_detections().unwrap().is_some());

        let err = source.next_detections().unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
        assert!(err.to_string().starts_with("malformed detections on line 2"));
    }

    #[test]
    fn test_out_of_range_box_is_an_error() {
        let input = r#"[{"bbox": {"x": 2147483000, "y": 0, "width": 1000, "height": 10}, "area": 500.0}]
[{"bbox": {"x": 2147483000, "y": 0, "width": 600, "height": 10}, "area": 500.0}]
"#;
        let mut source = ReplaySource::new(Cursor::new(input));

        let err = source.next_detections().unwrap_err();
        match err {
            ReplayError::OutOfRange { line, bbox } => {
                assert_eq!(line, 1);
                assert_eq!(bbox, Rect::new(2147483000, 0, 1000, 10));
            }
            other => panic!("unexpected error: {other}"),
        }

        // the next line still fits
        let frame = source.next_detections().unwrap().unwrap();
        assert_eq!(frame[0].centroid, Point::new(2147483300, 5));
    }
}
