//! Document model types for reconstructed OCR content.
//!
//! This module defines the intermediate representation that bridges the raw
//! recognizer output (fragments) and the rendered document. Fragments are
//! immutable inputs; every other type here is derived once per
//! reconstruction and owned by the caller afterwards.

mod document;
mod fragment;
mod paragraph;
mod table;

pub use document::{Document, DocumentNode, NodeKind};
pub use fragment::{Fragment, Line};
pub use paragraph::{Paragraph, TextStyle};
pub use table::{Table, TableMap};
