//! Polygon normalization.
//!
//! Recognizers report text locations as polygons: either an axis-aligned box
//! (`[x_min, y_min, x_max, y_max]`) or a general quadrilateral with eight
//! interleaved coordinates. Both reduce to the same minimal enclosing
//! [`Rect`], which is all the layout stages need.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An axis-aligned rectangle. Always satisfies `x_min <= x_max` and
/// `y_min <= y_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x_min: f64,
    /// Top edge
    pub y_min: f64,
    /// Right edge
    pub x_max: f64,
    /// Bottom edge
    pub y_max: f64,
}

impl Rect {
    /// Create a rectangle from two corners in any order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x_min: x0.min(x1),
            y_min: y0.min(y1),
            x_max: x0.max(x1),
            y_max: y0.max(y1),
        }
    }

    /// Compute the minimal enclosing rectangle of a polygon.
    ///
    /// Even-indexed values are x coordinates, odd-indexed values are y. Point
    /// order and winding are irrelevant. Fails with
    /// [`Error::MalformedGeometry`] if the coordinate count is odd or fewer
    /// than four values are present. Non-finite coordinates are rejected the
    /// same way.
    pub fn from_polygon(coords: &[f64]) -> Result<Self> {
        if coords.len() < 4 || coords.len() % 2 != 0 || coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::MalformedGeometry {
                coordinates: coords.len(),
            });
        }

        let mut rect = Rect {
            x_min: f64::INFINITY,
            y_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for point in coords.chunks_exact(2) {
            rect.x_min = rect.x_min.min(point[0]);
            rect.x_max = rect.x_max.max(point[0]);
            rect.y_min = rect.y_min.min(point[1]);
            rect.y_max = rect.y_max.max(point[1]);
        }

        Ok(rect)
    }

    /// The rectangle as a 4-value polygon `[x_min, y_min, x_max, y_max]`.
    pub fn to_polygon(&self) -> Vec<f64> {
        vec![self.x_min, self.y_min, self.x_max, self.y_max]
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
