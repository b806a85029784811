use crate::cursor::Cursor;
use crate::traits::{LexContext, State};
use common_framework::{channel, Token, TokenSink, TokenStream, TokenType, DEFAULT_CAPACITY};
use tracing::{debug, debug_span, trace};

/// A lexer that drives a chain of [`State`]s over its input and pushes the
/// emitted tokens onto a bounded [`TokenStream`].
///
/// [`Lexer::start_lexing`] blocks until the input is consumed or a state
/// returns `None`, and the stream only buffers a few tokens, so the lexer is
/// meant to run on its own thread while the stream is consumed elsewhere:
///
/// ```
/// use lexer_framework::{LexContext, Lexer, State, StringCharacterClass, TokenType};
///
/// #[derive(Debug, Clone, Copy)]
/// enum Tok {
///     Digits,
///     Other,
/// }
///
/// impl TokenType for Tok {
///     fn name(&self) -> &'static str {
///         match self {
///             Tok::Digits => "Digits",
///             Tok::Other => "Other",
///         }
///     }
///     fn value(&self) -> u64 {
///         *self as u64
///     }
/// }
///
/// const DIGIT: StringCharacterClass = StringCharacterClass::new("0123456789");
///
/// fn lex_any(l: &mut dyn LexContext<Tok>) -> Option<State<Tok>> {
///     if l.accept_multiple(&DIGIT) > 0 {
///         l.emit(Tok::Digits);
///     } else {
///         l.next();
///         l.emit(Tok::Other);
///     }
///     Some(State::new(lex_any))
/// }
///
/// let lexer = Lexer::new("12+3", State::new(lex_any));
/// let stream = lexer.token_stream();
/// let handle = std::thread::spawn(move || lexer.start_lexing());
///
/// let texts: Vec<String> = stream.tokens().map(|t| t.text).collect();
/// assert_eq!(texts, ["12", "+", "3"]);
/// handle.join().unwrap();
/// ```
#[derive(Debug)]
pub struct Lexer<T: TokenType> {
    scanner: Scanner<T>,
    start: State<T>,
    stream: TokenStream<T>,
}

impl<T: TokenType> Lexer<T> {
    /// Creates a new lexer over `input` starting in state `start`, with a
    /// stream of [`DEFAULT_CAPACITY`] tokens.
    pub fn new(input: impl Into<Vec<u8>>, start: State<T>) -> Self {
        Self::with_capacity(input, start, DEFAULT_CAPACITY)
    }

    /// Creates a new lexer whose token stream buffers `capacity` tokens.
    pub fn with_capacity(input: impl Into<Vec<u8>>, start: State<T>, capacity: usize) -> Self {
        let (sink, stream) = channel(capacity);
        Self {
            scanner: Scanner {
                cursor: Cursor::new(input),
                sink,
                emitted: 0,
            },
            start,
            stream,
        }
    }

    /// Returns the stream all tokens will be pushed onto.
    pub fn token_stream(&self) -> TokenStream<T> {
        self.stream.clone()
    }

    /// Runs the state machine until the input is consumed or a state
    /// returns `None`, then closes the token stream.
    ///
    /// Blocks while the token stream is full.
    pub fn start_lexing(self) {
        let Lexer {
            mut scanner,
            start,
            stream,
        } = self;
        // Only consumers obtained from `token_stream` keep the stream open.
        drop(stream);
        scanner.run(start);
    }
}

/// The lexer's working state, handed to states as `&mut dyn LexContext`.
#[derive(Debug)]
struct Scanner<T: TokenType> {
    cursor: Cursor,
    sink: TokenSink<T>,
    emitted: usize,
}

impl<T: TokenType> Scanner<T> {
    fn run(&mut self, start: State<T>) {
        let _span = debug_span!("lex", len = self.cursor.input().len()).entered();

        let mut current = Some(start);
        while let Some(state) = current.take() {
            if self.is_eof() {
                break;
            }
            current = state.run(self);
        }

        self.sink.close();
        debug!(
            tokens = self.emitted,
            offset = self.cursor.offset(),
            "lexing finished"
        );
    }

    fn push(&mut self, token: Token<T>) {
        trace!(%token, "emit");
        self.sink.push(token);
        self.emitted += 1;
    }
}

impl<T: TokenType> LexContext<T> for Scanner<T> {
    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn emit(&mut self, ty: T) {
        let (text, offset) = self.cursor.take_lexeme();
        self.push(Token::new(ty, text, offset));
    }

    fn emit_error(&mut self, ty: T, message: String) {
        let offset = self.cursor.offset();
        debug!(ty = ty.name(), offset, %message, "lexical error");
        self.push(Token::new(ty, message, offset));
        self.cursor.ignore();
    }
}
