//! Reading-order assembly.
//!
//! Lines are sorted top to bottom and clustered greedily by vertical
//! position: a line joins the current paragraph when its top edge is within
//! the threshold of the previous line's top edge. There is no column
//! detection and no horizontal reordering, since each fragment already
//! carries line-level text.

use crate::model::{Line, Paragraph};

use super::options::{ReconstructOptions, ThresholdBoundary, DEFAULT_Y_THRESHOLD};

/// Groups lines into paragraphs in reading order.
#[derive(Debug, Clone, Copy)]
pub struct ReadingOrderAssembler {
    y_threshold: f64,
    boundary: ThresholdBoundary,
}

impl ReadingOrderAssembler {
    /// Create an assembler with the given threshold and inclusive boundary.
    pub fn new(y_threshold: f64) -> Self {
        Self {
            y_threshold,
            boundary: ThresholdBoundary::Inclusive,
        }
    }

    /// Create an assembler from reconstruction options.
    pub fn from_options(options: &ReconstructOptions) -> Self {
        Self {
            y_threshold: options.y_threshold,
            boundary: options.threshold_boundary,
        }
    }

    /// Set the threshold boundary and return self.
    pub fn with_boundary(mut self, boundary: ThresholdBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// The configured threshold.
    pub fn y_threshold(&self) -> f64 {
        self.y_threshold
    }

    /// Assemble lines into paragraphs.
    ///
    /// Blank lines are dropped before clustering and never move the anchor.
    /// Ties on `y_min` keep input order.
    pub fn assemble(&self, lines: Vec<Line>) -> Vec<Paragraph> {
        let mut lines: Vec<Line> = lines.into_iter().filter(|l| !l.text().is_empty()).collect();
        // Stable: equal y_min keeps input order
        lines.sort_by(|a, b| a.y_min().total_cmp(&b.y_min()));

        let mut paragraphs = Vec::new();
        let mut current: Vec<Line> = Vec::new();
        let mut anchor: Option<f64> = None;

        for line in lines {
            let y = line.y_min();
            let joins = anchor
                .map(|a| self.boundary.within((y - a).abs(), self.y_threshold))
                .unwrap_or(true);

            if !joins && !current.is_empty() {
                paragraphs.push(Paragraph::from_lines(std::mem::take(&mut current)));
            }
            current.push(line);
            anchor = Some(y);
        }

        if !current.is_empty() {
            paragraphs.push(Paragraph::from_lines(current));
        }

        log::debug!(
            "ReadingOrderAssembler: {} paragraphs (threshold {})",
            paragraphs.len(),
            self.y_threshold
        );
        paragraphs
    }
}

impl Default for ReadingOrderAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_Y_THRESHOLD)
    }
}
