use std::fmt;

/// Identity of a token kind, defined by the user of the framework.
///
/// Equality between token types is always decided on [`TokenType::value`],
/// never on the Rust type or its `Debug` form, so any `Copy` enum with a
/// stable numbering works:
///
/// ```
/// use common_framework::TokenType;
///
/// #[derive(Debug, Clone, Copy)]
/// enum Calc {
///     Number,
///     Plus,
/// }
///
/// impl TokenType for Calc {
///     fn name(&self) -> &'static str {
///         match self {
///             Calc::Number => "Number",
///             Calc::Plus => "Plus",
///         }
///     }
///
///     fn value(&self) -> u64 {
///         *self as u64
///     }
/// }
/// ```
pub trait TokenType: Copy + fmt::Debug + Send + Sync + 'static {
    /// Human readable name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Stable numeric identity of this token type.
    fn value(&self) -> u64;

    /// Returns true if `other` denotes the same token type.
    #[inline]
    fn is(&self, other: Self) -> bool {
        self.value() == other.value()
    }
}

/// A token produced by the lexer.
///
/// `text` holds the matched lexeme, or the diagnostic message for error
/// tokens. `offset` is the byte offset in the input where the lexeme starts;
/// for error tokens it is the offset at which the error was detected.
#[derive(Debug, Clone)]
pub struct Token<T: TokenType> {
    pub ty: T,
    pub text: String,
    pub offset: usize,
}

impl<T: TokenType> Token<T> {
    /// Creates a new token.
    pub fn new(ty: T, text: impl Into<String>, offset: usize) -> Self {
        Self {
            ty,
            text: text.into(),
            offset,
        }
    }

    /// Returns true if this token's type is one of `types`.
    pub fn is_one_of(&self, types: &[T]) -> bool {
        types.iter().any(|t| t.is(self.ty))
    }
}

impl<T: TokenType> PartialEq for Token<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ty.is(other.ty) && self.text == other.text && self.offset == other.offset
    }
}

impl<T: TokenType> Eq for Token<T> {}

/// Renders as `Name(text), pos N`, e.g. `Number(7.5), pos 9`.
impl<T: TokenType> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}), pos {}", self.ty.name(), self.text, self.offset)
    }
}
