pub mod ast;
pub mod context;
pub mod error;
pub mod parser;
pub mod traits;

pub use ast::{Node, Tree};
pub use common_framework::{Token, TokenType};
pub use context::ParseContext;
pub use error::ParseError;
pub use parser::Parser;
pub use traits::Rule;
