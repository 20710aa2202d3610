//! Layout reconstruction pipeline.

mod assembler;
mod classifier;
mod geometry;
mod layout_parser;
mod options;
mod reading_order;
mod table_extractor;

pub use assembler::{summarize_issues, DocumentAssembler, DocumentParts};
pub(crate) use classifier::is_numbered_item;
pub use classifier::{
    ClassificationPolicy, ClassificationRule, HeadingRule, ListMarkerRule, ParagraphContext,
    QuestionRule, RuleSet, StructuralClassifier, BULLET_MARKERS, DEFAULT_LIST_HEADER,
};
pub use geometry::Rect;
pub use layout_parser::LayoutParser;
pub use options::{
    ErrorMode, HeadingConfig, ReconstructOptions, ThresholdBoundary, DEFAULT_Y_THRESHOLD,
};
pub use reading_order::ReadingOrderAssembler;
pub use table_extractor::{TableExtractor, MAX_TABLE_CELLS};
