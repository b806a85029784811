//! A JSON parser built on the lexer and parser frameworks.

pub mod grammar;
pub mod tree;

pub use grammar::{parse_document, start, DocumentError};
pub use tree::{Container, JsonNode, JsonTree, Member};
