//! Layout reconstruction pipeline.

use serde_json::Value;

use crate::error::Error;
use crate::ingest::{normalize_text, source_positions, AnalysisResult, Input, OcrRecord};
use crate::model::{Document, Fragment, Line, Paragraph};

use super::assembler::{DocumentAssembler, DocumentParts};
use super::classifier::{RuleSet, StructuralClassifier};
use super::options::ReconstructOptions;
use super::reading_order::ReadingOrderAssembler;
use super::table_extractor::TableExtractor;

/// Reconstructs documents from OCR input.
///
/// Both input shapes share the same back half of the pipeline: paragraphs
/// go through the structural classifier and the document assembler. Only
/// flat input runs geometry normalization and reading-order assembly, and
/// each shape picks its own classifier rule subset unless the options
/// override it.
///
/// Holds no state between calls, so one parser may be shared freely.
#[derive(Debug, Clone, Default)]
pub struct LayoutParser {
    options: ReconstructOptions,
}

impl LayoutParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ReconstructOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Reconstruct a typed input.
    pub fn parse(&self, input: Input) -> Document {
        let raw = input.to_raw();
        self.run(input, Vec::new(), raw)
    }

    /// Reconstruct a JSON value of either shape.
    ///
    /// An unrecognizable value yields a document holding a single `Error`
    /// node; this never fails.
    pub fn parse_value(&self, value: &Value) -> Document {
        match Input::from_value(value) {
            Ok(decoded) => self.run(decoded.input, decoded.issues, value.clone()),
            Err(e) => {
                log::warn!("rejecting input: {}", e);
                Document::from_error(e.to_string(), value.clone())
            }
        }
    }

    /// Reconstruct from already-built fragments.
    pub fn parse_fragments(&self, fragments: Vec<Fragment>) -> Document {
        let records: Vec<OcrRecord> = fragments.iter().map(OcrRecord::from).collect();
        let raw = serde_json::to_value(&records).unwrap_or(Value::Null);
        self.run_flat(fragments.into_iter().enumerate().collect(), Vec::new(), raw)
    }

    /// Reconstruct a structured analysis result.
    pub fn parse_structured(&self, result: AnalysisResult) -> Document {
        self.parse(Input::Structured(result))
    }

    fn run(&self, input: Input, issues: Vec<Error>, raw: Value) -> Document {
        match input {
            Input::Structured(result) => self.run_structured(result, issues, raw),
            Input::Flat(records) => {
                // Records that failed to decode are gone; keep source positions for the rest
                let positions = source_positions(&issues, "fragment", records.len());
                let fragments = positions
                    .into_iter()
                    .zip(records.into_iter().map(Fragment::from))
                    .collect();
                self.run_flat(fragments, issues, raw)
            }
        }
    }

    fn run_flat(
        &self,
        fragments: Vec<(usize, Fragment)>,
        mut issues: Vec<Error>,
        raw: Value,
    ) -> Document {
        let total = fragments.len();
        let mut lines = Vec::with_capacity(total);

        for (index, fragment) in fragments {
            if !self.meets_confidence(&fragment) {
                log::debug!(
                    "dropping fragment {} below confidence floor: {:?}",
                    index,
                    fragment.confidence()
                );
                continue;
            }

            let fragment = if self.options.normalize_unicode {
                Fragment::new(
                    normalize_text(fragment.text(), true),
                    fragment.polygon().to_vec(),
                    fragment.confidence(),
                )
            } else {
                fragment
            };

            match Line::from_fragment(fragment, index) {
                Ok(line) => lines.push(line),
                Err(e) => issues.push(Error::invalid_record("fragment", index, e)),
            }
        }

        log::debug!("LayoutParser: {} of {} fragments usable", lines.len(), total);

        let paragraphs = ReadingOrderAssembler::from_options(&self.options).assemble(lines);
        let classifier = StructuralClassifier::new(self.options.resolve_policy(RuleSet::Flat));
        let nodes = classifier.classify(&paragraphs);

        DocumentAssembler::new(self.options.error_mode).assemble(DocumentParts {
            nodes,
            paragraphs,
            issues,
            raw,
            ..Default::default()
        })
    }

    fn run_structured(
        &self,
        result: AnalysisResult,
        mut issues: Vec<Error>,
        raw: Value,
    ) -> Document {
        let paragraphs: Vec<Paragraph> = result
            .paragraphs
            .iter()
            .map(|p| {
                let mut paragraph = p.to_paragraph();
                paragraph.content = normalize_text(&paragraph.content, self.options.normalize_unicode);
                paragraph
            })
            .filter(|p| !p.is_empty())
            .collect();

        let positions = source_positions(&issues, "table", result.tables.len());
        let (tables, table_issues) =
            TableExtractor::new().extract_at(positions.into_iter().zip(&result.tables));
        issues.extend(table_issues);

        log::debug!(
            "LayoutParser: {} paragraphs, {} tables",
            paragraphs.len(),
            tables.len()
        );

        let classifier =
            StructuralClassifier::new(self.options.resolve_policy(RuleSet::Structured));
        let nodes = classifier.classify(&paragraphs);

        DocumentAssembler::new(self.options.error_mode).assemble(DocumentParts {
            nodes,
            paragraphs,
            tables,
            issues,
            raw,
        })
    }

    fn meets_confidence(&self, fragment: &Fragment) -> bool {
        match (self.options.min_confidence, fragment.confidence()) {
            (Some(floor), Some(confidence)) => confidence >= floor,
            _ => true,
        }
    }
}
