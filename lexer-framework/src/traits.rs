use crate::char_class::CharacterClass;
use crate::cursor::Cursor;
use common_framework::TokenType;
use std::fmt;

/// Context for lexing operations.
///
/// Lexer states receive the lexer as `&mut dyn LexContext<T>`. Every
/// primitive except `emit`/`emit_error` has a default implementation on top
/// of the [`Cursor`].
pub trait LexContext<T: TokenType> {
    /// Returns a reference to the cursor.
    fn cursor(&self) -> &Cursor;

    /// Returns a mutable reference to the cursor.
    fn cursor_mut(&mut self) -> &mut Cursor;

    /// Pushes the pending lexeme as a token of type `ty` and starts a new
    /// lexeme.
    fn emit(&mut self, ty: T);

    /// Pushes a token of type `ty` carrying `message` instead of a lexeme,
    /// positioned at the current offset. The calling state must return
    /// `None` afterwards to stop lexing.
    fn emit_error(&mut self, ty: T, message: String);

    /// Returns true if all input has been read.
    fn is_eof(&self) -> bool {
        self.cursor().is_eof()
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.cursor_mut().peek()
    }

    /// Consumes and returns the next character.
    fn next(&mut self) -> Option<char> {
        self.cursor_mut().next()
    }

    /// Un-reads the last consumed character. Only one level is tracked.
    fn backup(&mut self) {
        self.cursor_mut().backup();
    }

    /// Discards the pending lexeme without emitting it.
    fn ignore(&mut self) {
        self.cursor_mut().ignore();
    }

    /// Consumes the next character if and only if it matches `class`.
    fn accept(&mut self, class: &dyn CharacterClass) -> bool {
        match self.next() {
            Some(ch) if class.matches(ch) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    /// Consumes the longest run of characters matching `class` and returns
    /// how many were consumed. The end of input never matches.
    fn accept_multiple(&mut self, class: &dyn CharacterClass) -> usize {
        let mut matched = 0;
        while self.accept(class) {
            matched += 1;
        }
        matched
    }
}

type Transition<T> = dyn FnOnce(&mut dyn LexContext<T>) -> Option<State<T>> + Send;

/// A lexer state: runs once against the lexer and returns the state to run
/// next, or `None` to stop.
///
/// States never call each other; the lexer drives them in a loop, so long
/// chains of states do not grow the call stack.
///
/// ```
/// use lexer_framework::{LexContext, State, StringCharacterClass, TokenType};
///
/// #[derive(Debug, Clone, Copy)]
/// struct Digits;
///
/// impl TokenType for Digits {
///     fn name(&self) -> &'static str {
///         "Digits"
///     }
///     fn value(&self) -> u64 {
///         0
///     }
/// }
///
/// const DIGIT: StringCharacterClass = StringCharacterClass::new("0123456789");
///
/// fn lex_digits(l: &mut dyn LexContext<Digits>) -> Option<State<Digits>> {
///     l.accept_multiple(&DIGIT);
///     l.emit(Digits);
///     None
/// }
///
/// let start = State::new(lex_digits);
/// # let _ = start;
/// ```
pub struct State<T: TokenType>(Box<Transition<T>>);

impl<T: TokenType> State<T> {
    /// Wraps a transition function or closure as a state.
    pub fn new<F>(transition: F) -> Self
    where
        F: FnOnce(&mut dyn LexContext<T>) -> Option<State<T>> + Send + 'static,
    {
        Self(Box::new(transition))
    }

    /// Runs this state against `ctx`, returning the next state.
    pub fn run(self, ctx: &mut dyn LexContext<T>) -> Option<State<T>> {
        (self.0)(ctx)
    }
}

impl<T: TokenType> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("State(..)")
    }
}
