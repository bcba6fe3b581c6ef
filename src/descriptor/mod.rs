//! Module descriptor documents: parsing, merging, and serialization.

pub mod element;
pub mod merger;
pub mod reader;
pub mod template;
pub mod web;
pub mod writer;

pub use element::Element;
pub use merger::merge_descriptor;
pub use reader::{parse_document, ParseError};
pub use template::blank_module;
pub use writer::write_document;
