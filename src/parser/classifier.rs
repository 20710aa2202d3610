//! Structural classification of paragraphs.
//!
//! Each paragraph is run through an ordered chain of [`ClassificationRule`]s;
//! the first rule that returns a kind wins, and paragraphs no rule claims
//! become [`NodeKind::Text`]. The chain is a plain value
//! ([`ClassificationPolicy`]), so alternative heuristics can be swapped in
//! without touching the assembler or the table extractor.
//!
//! Classification also threads a "current section" through the pass: a
//! heading opens a section, list items attach to the open section as
//! `items`, and text closes it.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::model::{DocumentNode, NodeKind, Paragraph};

use super::options::HeadingConfig;

/// Content of the section synthesized for list items with no open heading.
pub const DEFAULT_LIST_HEADER: &str = "List items:";

/// Characters that mark a bulleted list item.
pub const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

/// Predefined rule subsets, one per ingestion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSet {
    /// Full rule set for structured analysis results: numbered and bulleted
    /// lists, then headings
    Structured,
    /// Reduced rule set for flat OCR lines: bulleted lists, then questions
    Flat,
}

/// What a rule sees about the paragraph being classified.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphContext<'a> {
    /// The paragraph itself
    pub paragraph: &'a Paragraph,

    /// Zero-based position of the paragraph in the document
    pub position: usize,

    /// Trimmed paragraph text
    pub text: &'a str,
}

impl<'a> ParagraphContext<'a> {
    /// Build the context for a paragraph at a given position.
    pub fn new(paragraph: &'a Paragraph, position: usize) -> Self {
        Self {
            paragraph,
            position,
            text: paragraph.trimmed(),
        }
    }
}

/// A single classification predicate.
pub trait ClassificationRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Return the kind for this paragraph, or `None` to defer to the next rule.
    fn classify(&self, ctx: &ParagraphContext<'_>) -> Option<NodeKind>;
}

fn numbered_list_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[.)]").expect("numbered list pattern is valid"))
}

/// Check for a leading `digits.` or `digits)` list marker.
pub(crate) fn is_numbered_item(text: &str) -> bool {
    numbered_list_regex().is_match(text)
}

fn question_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").expect("question pattern is valid"))
}

/// Classifies bulleted (and optionally numbered) paragraphs as list items.
#[derive(Debug, Clone, Copy)]
pub struct ListMarkerRule {
    /// Also accept "digits followed by `.` or `)`"
    pub numbered: bool,
}

impl ListMarkerRule {
    /// Bullets and numbers.
    pub fn numbered() -> Self {
        Self { numbered: true }
    }

    /// Bullets only.
    pub fn bullets() -> Self {
        Self { numbered: false }
    }
}

impl ClassificationRule for ListMarkerRule {
    fn name(&self) -> &str {
        if self.numbered {
            "list-marker"
        } else {
            "bullet-marker"
        }
    }

    fn classify(&self, ctx: &ParagraphContext<'_>) -> Option<NodeKind> {
        let bulleted = ctx.text.starts_with(&BULLET_MARKERS[..]);
        let numbered = self.numbered && is_numbered_item(ctx.text);
        (bulleted || numbered).then_some(NodeKind::List)
    }
}

/// Classifies "digits followed by `.`" paragraphs as questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionRule;

impl ClassificationRule for QuestionRule {
    fn name(&self) -> &str {
        "question"
    }

    fn classify(&self, ctx: &ParagraphContext<'_>) -> Option<NodeKind> {
        question_regex()
            .is_match(ctx.text)
            .then_some(NodeKind::Question)
    }
}

/// Positional, lexical and style heading heuristic.
///
/// A paragraph is a heading if any of these hold: it is the first paragraph,
/// it is short and ends with a colon, or its style metadata marks it bold or
/// larger than the size threshold.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    config: HeadingConfig,
}

impl HeadingRule {
    /// Create a heading rule with the given parameters.
    pub fn new(config: HeadingConfig) -> Self {
        Self { config }
    }

    fn styled(&self, paragraph: &Paragraph) -> bool {
        paragraph.styles.iter().any(|s| {
            s.is_bold
                || s.font_size
                    .map(|size| size > self.config.font_size_threshold)
                    .unwrap_or(false)
        })
    }
}

impl Default for HeadingRule {
    fn default() -> Self {
        Self::new(HeadingConfig::default())
    }
}

impl ClassificationRule for HeadingRule {
    fn name(&self) -> &str {
        "heading"
    }

    fn classify(&self, ctx: &ParagraphContext<'_>) -> Option<NodeKind> {
        let first = self.config.first_paragraph_is_heading && ctx.position == 0;
        let label = ctx.paragraph.content.chars().count() < self.config.max_len
            && ctx.text.ends_with(':');
        (first || label || self.styled(ctx.paragraph)).then_some(NodeKind::Heading)
    }
}

/// An ordered chain of classification rules.
#[derive(Clone, Default)]
pub struct ClassificationPolicy {
    rules: Vec<Arc<dyn ClassificationRule>>,
    rule_set: Option<RuleSet>,
}

impl ClassificationPolicy {
    /// Create an empty policy (everything classifies as text).
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy for a predefined rule subset.
    pub fn for_rule_set(rule_set: RuleSet, heading: &HeadingConfig) -> Self {
        let policy = match rule_set {
            RuleSet::Structured => Self::new()
                .with_rule(ListMarkerRule::numbered())
                .with_rule(HeadingRule::new(heading.clone())),
            RuleSet::Flat => Self::new()
                .with_rule(ListMarkerRule::bullets())
                .with_rule(QuestionRule),
        };
        Self {
            rule_set: Some(rule_set),
            ..policy
        }
    }

    /// Structured rule set with default heading parameters.
    pub fn structured() -> Self {
        Self::for_rule_set(RuleSet::Structured, &HeadingConfig::default())
    }

    /// Flat rule set.
    pub fn flat() -> Self {
        Self::for_rule_set(RuleSet::Flat, &HeadingConfig::default())
    }

    /// Append a rule to the end of the chain.
    pub fn with_rule(mut self, rule: impl ClassificationRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self.rule_set = None;
        self
    }

    /// Insert a rule at the front of the chain, so it is tried first.
    pub fn with_leading_rule(mut self, rule: impl ClassificationRule + 'static) -> Self {
        self.rules.insert(0, Arc::new(rule));
        self.rule_set = None;
        self
    }

    /// The predefined subset this policy was built from, if unmodified.
    pub fn rule_set(&self) -> Option<RuleSet> {
        self.rule_set
    }

    /// Names of the rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classify one paragraph. First match wins; the fallback is `Text`.
    pub fn classify(&self, ctx: &ParagraphContext<'_>) -> NodeKind {
        self.rules
            .iter()
            .find_map(|rule| rule.classify(ctx))
            .unwrap_or(NodeKind::Text)
    }
}

impl fmt::Debug for ClassificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationPolicy")
            .field("rules", &self.rule_names())
            .field("rule_set", &self.rule_set)
            .finish()
    }
}

/// Turns paragraphs into document nodes using a classification policy.
#[derive(Debug, Clone)]
pub struct StructuralClassifier {
    policy: ClassificationPolicy,
}

impl StructuralClassifier {
    /// Create a classifier with the given policy.
    pub fn new(policy: ClassificationPolicy) -> Self {
        Self { policy }
    }

    /// The active policy.
    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    /// Classify paragraphs into nodes, attaching list items to the open
    /// section.
    pub fn classify(&self, paragraphs: &[Paragraph]) -> Vec<DocumentNode> {
        let mut nodes: Vec<DocumentNode> = Vec::new();
        // Index into `nodes` of the open section
        let mut section: Option<usize> = None;

        for (position, paragraph) in paragraphs.iter().enumerate() {
            let ctx = ParagraphContext::new(paragraph, position);
            let kind = self.policy.classify(&ctx);

            match kind {
                NodeKind::List => match section {
                    Some(idx) => nodes[idx].items.push(paragraph.content.clone()),
                    None => {
                        nodes.push(DocumentNode::list(
                            DEFAULT_LIST_HEADER,
                            vec![paragraph.content.clone()],
                        ));
                        section = Some(nodes.len() - 1);
                    }
                },
                NodeKind::Heading => {
                    nodes.push(DocumentNode::heading(paragraph.content.clone()));
                    section = Some(nodes.len() - 1);
                }
                other => {
                    nodes.push(DocumentNode::new(other, paragraph.content.clone()));
                    section = None;
                }
            }
        }

        log::debug!(
            "StructuralClassifier: {} paragraphs -> {} nodes",
            paragraphs.len(),
            nodes.len()
        );
        nodes
    }
}

impl Default for StructuralClassifier {
    fn default() -> Self {
        Self::new(ClassificationPolicy::structured())
    }
}
