//! Reconstruction options and configuration.

use super::classifier::{ClassificationPolicy, RuleSet};

/// Default vertical clustering threshold, in input coordinate units.
pub const DEFAULT_Y_THRESHOLD: f64 = 20.0;

/// Options for reconstructing documents.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Maximum vertical distance between consecutive lines of one paragraph
    pub y_threshold: f64,

    /// Whether a distance exactly equal to the threshold still merges
    pub threshold_boundary: ThresholdBoundary,

    /// Classifier rule subset; `None` picks the subset matching the input shape
    pub rule_set: Option<RuleSet>,

    /// Custom classification policy; takes precedence over `rule_set`
    pub policy: Option<ClassificationPolicy>,

    /// Heading heuristic parameters
    pub heading: HeadingConfig,

    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Drop fragments whose confidence is below this floor
    pub min_confidence: Option<f64>,

    /// Normalize fragment text to Unicode NFC before layout
    pub normalize_unicode: bool,
}

impl ReconstructOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertical clustering threshold.
    pub fn with_y_threshold(mut self, threshold: f64) -> Self {
        self.y_threshold = threshold.max(0.0);
        self
    }

    /// Set the threshold boundary behavior.
    pub fn with_threshold_boundary(mut self, boundary: ThresholdBoundary) -> Self {
        self.threshold_boundary = boundary;
        self
    }

    /// Only merge lines strictly closer than the threshold.
    pub fn exclusive_threshold(mut self) -> Self {
        self.threshold_boundary = ThresholdBoundary::Exclusive;
        self
    }

    /// Force a classifier rule subset regardless of input shape.
    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_set = Some(rule_set);
        self
    }

    /// Use a custom classification policy.
    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set heading heuristic parameters.
    pub fn with_heading_config(mut self, heading: HeadingConfig) -> Self {
        self.heading = heading;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip invalid content and report it).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (any invalid content fails the whole document).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set a minimum fragment confidence.
    pub fn with_min_confidence(mut self, floor: f64) -> Self {
        self.min_confidence = Some(floor.clamp(0.0, 1.0));
        self
    }

    /// Enable or disable Unicode normalization of fragment text.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Resolve the policy for an input whose natural rule subset is `default`.
    pub fn resolve_policy(&self, default: RuleSet) -> ClassificationPolicy {
        if let Some(ref policy) = self.policy {
            return policy.clone();
        }
        ClassificationPolicy::for_rule_set(self.rule_set.unwrap_or(default), &self.heading)
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            y_threshold: DEFAULT_Y_THRESHOLD,
            threshold_boundary: ThresholdBoundary::Inclusive,
            rule_set: None,
            policy: None,
            heading: HeadingConfig::default(),
            error_mode: ErrorMode::Lenient,
            min_confidence: None,
            normalize_unicode: true,
        }
    }
}

/// Error handling mode during reconstruction.
///
/// Neither mode lets an error escape the pipeline; they differ in how much of
/// the document survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Skip invalid fragments and tables, then append one error node
    /// describing what was skipped
    #[default]
    Lenient,
    /// Replace the whole document with a single error node
    Strict,
}

/// How the clustering threshold treats a distance equal to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdBoundary {
    /// Merge when `|dy| <= threshold`
    #[default]
    Inclusive,
    /// Merge when `|dy| < threshold`
    Exclusive,
}

impl ThresholdBoundary {
    /// Check whether a vertical distance is within the threshold.
    pub fn within(&self, distance: f64, threshold: f64) -> bool {
        match self {
            ThresholdBoundary::Inclusive => distance <= threshold,
            ThresholdBoundary::Exclusive => distance < threshold,
        }
    }
}

/// Heading heuristic configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingConfig {
    /// Treat the first paragraph of the document as a heading
    pub first_paragraph_is_heading: bool,

    /// Colon-terminated paragraphs shorter than this (in characters) are headings
    pub max_len: usize,

    /// Spans with a font size above this are headings
    pub font_size_threshold: f64,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            first_paragraph_is_heading: true,
            max_len: 100,
            font_size_threshold: 12.0,
        }
    }
}
