//! Common Framework
//!
//! Shared pieces between lexer-framework and parser-framework: the token
//! model and the bounded token stream that connects a lexer thread to a
//! parser.

pub mod position;
pub mod stream;
pub mod token;

pub use position::Position;
pub use stream::{channel, TokenSink, TokenStream, DEFAULT_CAPACITY};
pub use token::{Token, TokenType};
