//! Fragment and line types.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::Rect;

/// A single recognized text unit as produced by the recognizer.
///
/// The polygon is stored as interleaved `x, y` coordinates. Four values
/// describe an axis-aligned box, eight values a general quadrilateral.
/// Fragments are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    text: String,
    polygon: Vec<f64>,
    confidence: Option<f64>,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, polygon: Vec<f64>, confidence: Option<f64>) -> Self {
        Self {
            text: text.into(),
            polygon,
            confidence,
        }
    }

    /// Create a fragment without a confidence score.
    pub fn unscored(text: impl Into<String>, polygon: Vec<f64>) -> Self {
        Self::new(text, polygon, None)
    }

    /// The recognized text, exactly as produced.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Interleaved polygon coordinates.
    pub fn polygon(&self) -> &[f64] {
        &self.polygon
    }

    /// Recognition confidence in `[0, 1]`, if the recognizer reported one.
    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    /// Check if the fragment has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A fragment with its bounding rectangle attached.
///
/// Lines are the atomic unit consumed by the reading-order assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The source fragment
    pub fragment: Fragment,

    /// Axis-aligned bounding rectangle of the fragment polygon
    pub rect: Rect,

    /// Position of the fragment in the original input sequence
    pub index: usize,
}

impl Line {
    /// Normalize a fragment's polygon and wrap it as a line.
    ///
    /// Fails with [`Error::MalformedGeometry`](crate::Error::MalformedGeometry)
    /// when the polygon has the wrong arity.
    pub fn from_fragment(fragment: Fragment, index: usize) -> Result<Self> {
        let rect = Rect::from_polygon(fragment.polygon())?;
        Ok(Self {
            fragment,
            rect,
            index,
        })
    }

    /// Trimmed text of the line.
    pub fn text(&self) -> &str {
        self.fragment.text().trim()
    }

    /// Top edge of the line.
    pub fn y_min(&self) -> f64 {
        self.rect.y_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_fragment_accessors() {
        let fragment = Fragment::new("Hello", vec![0.0, 0.0, 10.0, 5.0], Some(0.9));
        assert_eq!(fragment.text(), "Hello");
        assert_eq!(fragment.polygon(), &[0.0, 0.0, 10.0, 5.0]);
        assert_eq!(fragment.confidence(), Some(0.9));
        assert!(!fragment.is_blank());
        assert!(Fragment::unscored("  \t", vec![]).is_blank());
    }

    #[test]
    fn test_line_from_fragment() {
        let fragment = Fragment::unscored(
            "  padded  ",
            vec![34.0, 42.0, 525.0, 22.0, 526.0, 42.0, 34.0, 64.0],
        );
        let line = Line::from_fragment(fragment, 7).unwrap();
        assert_eq!(line.text(), "padded");
        assert_eq!(line.index, 7);
        assert_eq!(line.y_min(), 22.0);
        assert_eq!(line.rect.x_max, 526.0);
    }

    #[test]
    fn test_line_rejects_bad_polygon() {
        let fragment = Fragment::unscored("x", vec![1.0, 2.0, 3.0]);
        let err = Line::from_fragment(fragment, 0).unwrap_err();
        assert!(matches!(err, Error::MalformedGeometry { coordinates: 3 }));
    }
}
