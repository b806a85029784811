pub mod char_class;
pub mod cursor;
pub mod lexer;
pub mod traits;

pub use char_class::{CharacterClass, FnCharacterClass, NotStringCharacterClass, StringCharacterClass};
pub use common_framework::{Token, TokenStream, TokenType, DEFAULT_CAPACITY};
pub use cursor::Cursor;
pub use lexer::Lexer;
pub use traits::{LexContext, State};
