//! Integration tests for the reconstruction pipeline.

use ocrlayout::parser::{ParagraphContext, ReadingOrderAssembler, TableExtractor};
use ocrlayout::{
    reconstruct, reconstruct_value, reconstruct_value_with_options, reconstruct_with_options,
    AnalysisResult, AnalyzedParagraph, AnalyzedTable, ClassificationPolicy, ClassificationRule,
    Document, DocumentNode, Fragment, Input, Line, NodeKind, OcrRecord, Rect, ReconstructOptions,
    RuleSet, TextStyle,
};
use serde_json::json;

fn record(text: &str, y: f64) -> OcrRecord {
    OcrRecord::new(text, vec![0.0, y, 60.0, y, 60.0, y + 10.0, 0.0, y + 10.0], Some(0.99))
}

fn kinds(doc: &Document) -> Vec<NodeKind> {
    doc.nodes.iter().map(|n| n.kind).collect()
}

// ==================== Geometry ====================

#[test]
fn test_eight_point_polygon_uses_parity() {
    let coords = [34.0, 42.0, 525.0, 22.0, 526.0, 42.0, 34.0, 64.0];
    let rect = Rect::from_polygon(&coords).unwrap();

    let xs: Vec<f64> = coords.iter().step_by(2).copied().collect();
    let ys: Vec<f64> = coords.iter().skip(1).step_by(2).copied().collect();
    assert_eq!(rect.x_min, xs.iter().copied().fold(f64::INFINITY, f64::min));
    assert_eq!(rect.x_max, xs.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    assert_eq!(rect.y_min, ys.iter().copied().fold(f64::INFINITY, f64::min));
    assert_eq!(rect.y_max, ys.iter().copied().fold(f64::NEG_INFINITY, f64::max));
}

#[test]
fn test_four_point_box_is_idempotent() {
    let rect = Rect::from_polygon(&[10.0, 20.0, 30.0, 40.0]).unwrap();
    assert_eq!(Rect::from_polygon(&rect.to_polygon()).unwrap(), rect);
}

#[test]
fn test_four_and_eight_point_agree() {
    let four = Rect::from_polygon(&[0.0, 0.0, 50.0, 10.0]).unwrap();
    let eight = Rect::from_polygon(&[0.0, 0.0, 50.0, 0.0, 50.0, 10.0, 0.0, 10.0]).unwrap();
    assert_eq!(four, eight);
}

// ==================== Reading order ====================

#[test]
fn test_zero_threshold_one_paragraph_per_line() {
    let lines: Vec<Line> = [40.0, 0.0, 25.0, 10.0]
        .iter()
        .enumerate()
        .map(|(i, y)| {
            Line::from_fragment(Fragment::unscored(format!("y{}", y), vec![0.0, *y, 1.0, *y + 1.0]), i)
                .unwrap()
        })
        .collect();

    let paragraphs = ReadingOrderAssembler::new(0.0).assemble(lines);
    let contents: Vec<&str> = paragraphs.iter().map(|p| p.content.as_str()).collect();
    assert_eq!(contents, vec!["y0", "y10", "y25", "y40"]);
}

#[test]
fn test_close_lines_merge_distant_lines_split() {
    let doc = reconstruct(Input::Flat(vec![
        record("world", 105.0),
        record("hello", 100.0),
        record("later", 200.0),
    ]));
    assert_eq!(doc.paragraphs, vec!["hello world", "later"]);
}

// ==================== Classification ====================

#[test]
fn test_numbered_line_is_question_under_flat_rules() {
    let doc = reconstruct(Input::Flat(vec![record("  1. First item  ", 0.0)]));
    assert_eq!(doc.nodes, vec![DocumentNode::question("1. First item")]);
}

#[test]
fn test_bullet_is_list_under_both_rule_sets() {
    let flat = reconstruct(Input::Flat(vec![record("- buy milk", 0.0)]));
    assert_eq!(flat.nodes[0].kind, NodeKind::List);

    let structured = reconstruct(Input::Structured(
        AnalysisResult::new()
            .with_paragraph(AnalyzedParagraph::new("Groceries"))
            .with_paragraph(AnalyzedParagraph::new("- buy milk")),
    ));
    assert_eq!(kinds(&structured), vec![NodeKind::Heading]);
    assert_eq!(structured.nodes[0].items, vec!["- buy milk"]);
}

#[test]
fn test_orphan_list_section_stays_open() {
    let doc = reconstruct(Input::Flat(vec![
        record("- one", 0.0),
        record("- two", 100.0),
        record("plain", 200.0),
        record("- three", 300.0),
    ]));

    assert_eq!(kinds(&doc), vec![NodeKind::List, NodeKind::Text, NodeKind::List]);
    assert_eq!(doc.nodes[0].content, "List items:");
    assert_eq!(doc.nodes[0].items, vec!["- one", "- two"]);
    assert_eq!(doc.nodes[2].items, vec!["- three"]);
}

#[test]
fn test_text_closes_heading_section() {
    let doc = reconstruct(Input::Structured(
        AnalysisResult::new()
            .with_paragraph(AnalyzedParagraph::new("Ingredients:"))
            .with_paragraph(AnalyzedParagraph::new("Mix everything well."))
            .with_paragraph(AnalyzedParagraph::new("1) flour")),
    ));

    assert_eq!(kinds(&doc), vec![NodeKind::Heading, NodeKind::Text, NodeKind::List]);
    assert!(doc.nodes[0].items.is_empty());
    assert_eq!(doc.nodes[2].items, vec!["1) flour"]);
}

#[test]
fn test_style_driven_headings() {
    let doc = reconstruct(Input::Structured(
        AnalysisResult::new()
            .with_paragraph(AnalyzedParagraph::new("Cover"))
            .with_paragraph(AnalyzedParagraph::new("body"))
            .with_paragraph(AnalyzedParagraph::new("Bold one").with_style(TextStyle::bold()))
            .with_paragraph(AnalyzedParagraph::new("body"))
            .with_paragraph(AnalyzedParagraph::new("Small").with_style(TextStyle::sized(12.0)))
            .with_paragraph(AnalyzedParagraph::new("Large").with_style(TextStyle::sized(12.5))),
    ));

    assert_eq!(
        kinds(&doc),
        vec![
            NodeKind::Heading,
            NodeKind::Text,
            NodeKind::Heading,
            NodeKind::Text,
            NodeKind::Text,
            NodeKind::Heading
        ]
    );
}

#[test]
fn test_long_colon_paragraph_is_not_heading() {
    let long = format!("{}:", "x".repeat(120));
    let doc = reconstruct(Input::Structured(
        AnalysisResult::new()
            .with_paragraph(AnalyzedParagraph::new("Title"))
            .with_paragraph(AnalyzedParagraph::new(long)),
    ));
    assert_eq!(kinds(&doc), vec![NodeKind::Heading, NodeKind::Text]);
}

struct ShoutingRule;

impl ClassificationRule for ShoutingRule {
    fn name(&self) -> &str {
        "shouting"
    }

    fn classify(&self, ctx: &ParagraphContext<'_>) -> Option<NodeKind> {
        let letters: Vec<char> = ctx.text.chars().filter(|c| c.is_alphabetic()).collect();
        (!letters.is_empty() && letters.iter().all(|c| c.is_uppercase())).then_some(NodeKind::Heading)
    }
}

#[test]
fn test_custom_policy_replaces_rules() {
    let policy = ClassificationPolicy::flat().with_leading_rule(ShoutingRule);
    assert_eq!(policy.rule_names()[0], "shouting");

    let options = ReconstructOptions::new().with_policy(policy);
    let doc = reconstruct_with_options(
        Input::Flat(vec![
            record("CHAPTER ONE", 0.0),
            record("- first point", 100.0),
            record("2. question", 200.0),
        ]),
        &options,
    );

    assert_eq!(kinds(&doc), vec![NodeKind::Heading, NodeKind::Question]);
    assert_eq!(doc.nodes[0].items, vec!["- first point"]);
}

// ==================== Tables ====================

#[test]
fn test_sparse_table_grid() {
    let grid = TableExtractor::new()
        .extract(&AnalyzedTable::new(2, 2).with_cell(0, 0, "X"))
        .unwrap();
    assert_eq!(
        grid.rows(),
        &[
            vec!["X".to_string(), String::new()],
            vec![String::new(), String::new()]
        ]
    );
}

#[test]
fn test_tables_numbered_from_one() {
    let doc = reconstruct(Input::Structured(
        AnalysisResult::new()
            .with_table(AnalyzedTable::new(1, 1).with_cell(0, 0, "first"))
            .with_table(AnalyzedTable::new(1, 1).with_cell(0, 0, "second")),
    ));

    assert_eq!(doc.tables.len(), 2);
    assert_eq!(doc.table(1).unwrap().cell(0, 0), Some("first"));
    assert_eq!(doc.table(2).unwrap().cell(0, 0), Some("second"));
    assert!(doc.nodes.is_empty());
}

// ==================== Whole documents ====================

#[test]
fn test_end_to_end_report() {
    let input = json!([
        {"text": "Report", "boundingBox": [0, 0, 50, 0, 50, 10, 0, 10]},
        {"text": "Summary:", "boundingBox": [0, 20, 60, 20, 60, 30, 0, 30]},
        {"text": "- item one", "boundingBox": [0, 40, 70, 40, 70, 50, 0, 50]}
    ]);
    let options = ReconstructOptions::new()
        .with_y_threshold(20.0)
        .exclusive_threshold()
        .with_rule_set(RuleSet::Structured);

    let doc = reconstruct_value_with_options(&input, &options);

    assert_eq!(doc.paragraphs, vec!["Report", "Summary:", "- item one"]);
    assert_eq!(
        doc.nodes,
        vec![
            DocumentNode::heading("Report"),
            DocumentNode {
                kind: NodeKind::Heading,
                content: "Summary:".to_string(),
                items: vec!["- item one".to_string()],
            },
        ]
    );
    assert_eq!(doc.raw, input);
}

#[test]
fn test_inclusive_threshold_merges_equal_gaps() {
    let input = json!([
        {"text": "Report", "boundingBox": [0, 0, 50, 0, 50, 10, 0, 10]},
        {"text": "Summary:", "boundingBox": [0, 20, 60, 20, 60, 30, 0, 30]}
    ]);
    let doc = reconstruct_value(&input);
    assert_eq!(doc.paragraphs, vec!["Report Summary:"]);
}

#[test]
fn test_reconstruction_is_idempotent() {
    let input = json!({"extracted_text": [
        {"text": "b", "boundingBox": [0, 50, 5, 50, 5, 60, 0, 60], "confidence": 0.7},
        {"text": "a", "boundingBox": [0, 0, 5, 0, 5, 10, 0, 10], "confidence": 0.9},
        {"text": "bad", "boundingBox": [1, 2, 3]}
    ]});

    let first = reconstruct_value(&input);
    let second = reconstruct_value(&input);
    assert_eq!(first, second);
}

#[test]
fn test_empty_input_is_empty_document() {
    for input in [json!([]), json!({"extracted_text": []}), json!({"paragraphs": [], "tables": []})] {
        let doc = reconstruct_value(&input);
        assert!(doc.is_empty(), "not empty for {}", input);
        assert!(!doc.has_errors());
    }
}

#[test]
fn test_bad_fragment_degrades_gracefully() {
    let doc = reconstruct_value(&json!([
        {"text": "kept", "boundingBox": [0, 0, 10, 10]},
        {"text": "odd", "boundingBox": [0, 0, 10]},
        {"text": "missing box"}
    ]));

    assert_eq!(doc.paragraphs, vec!["kept"]);
    assert_eq!(kinds(&doc), vec![NodeKind::Text, NodeKind::Error]);
    let error = &doc.nodes[1];
    assert!(error.content.contains("Skipped 2"));
    assert!(error.items.is_empty());
}

#[test]
fn test_skipped_fragments_keep_source_indices() {
    let doc = reconstruct_value(&json!([
        {"text": "kept", "boundingBox": [0, 0, 10, 10]},
        {"text": "no box"},
        {"text": "odd", "boundingBox": [1, 2, 3]}
    ]));

    let error = &doc.nodes[1];
    assert!(error.content.contains("Invalid fragment at index 1"));
    assert!(error.content.contains("Invalid fragment at index 2"));
}

#[test]
fn test_zero_width_huge_table_is_skipped() {
    let doc = reconstruct_value(&json!({
        "paragraphs": [{"content": "Title"}],
        "tables": [
            {"rowCount": 4000000000000000000u64, "columnCount": 0, "cells": []},
            {"rowCount": 1, "columnCount": 1, "cells": [{"rowIndex": 0, "columnIndex": 0, "content": "x"}]}
        ]
    }));

    assert_eq!(kinds(&doc), vec![NodeKind::Heading, NodeKind::Error]);
    assert!(doc.nodes[1].content.contains("Invalid table at index 0"));
    assert!(doc.table(1).is_none());
    assert_eq!(doc.table(2).unwrap().cell(0, 0), Some("x"));
}

#[test]
fn test_strict_mode_single_error_node() {
    let options = ReconstructOptions::new().strict();
    let doc = reconstruct_value_with_options(
        &json!([
            {"text": "kept", "boundingBox": [0, 0, 10, 10]},
            {"text": "odd", "boundingBox": [0, 0, 10]}
        ]),
        &options,
    );

    assert_eq!(kinds(&doc), vec![NodeKind::Error]);
    assert!(doc.paragraphs.is_empty());
}

#[test]
fn test_invalid_shape_is_error_node() {
    for input in [json!("text"), json!({"pages": []}), json!({"paragraphs": {}})] {
        let doc = reconstruct_value(&input);
        assert_eq!(kinds(&doc), vec![NodeKind::Error], "for {}", input);
        assert!(doc.nodes[0].items.is_empty());
        assert!(doc.paragraphs.is_empty());
        assert!(doc.tables.is_empty());
    }
}

#[test]
fn test_typed_input_raw_echo() {
    let doc = reconstruct(Input::Flat(vec![record("x", 0.0)]));
    assert_eq!(doc.raw[0]["text"], "x");
    assert_eq!(doc.raw[0]["confidence"], 0.99);
}
