use std::borrow::Cow;
use std::fmt;

/// A predicate over a single decoded character.
///
/// Lexer states use character classes to decide what to consume. The
/// framework ships two set-based classes, which can be declared as
/// constants:
///
/// ```
/// use lexer_framework::{CharacterClass, NotStringCharacterClass, StringCharacterClass};
///
/// const WHITESPACE_NO_LINEFEED: StringCharacterClass = StringCharacterClass::new(" \t");
/// const NOT_QUOTE: NotStringCharacterClass = NotStringCharacterClass::new("\"");
///
/// assert!(WHITESPACE_NO_LINEFEED.matches('\t'));
/// assert!(NOT_QUOTE.matches('a'));
/// assert!(!NOT_QUOTE.matches('"'));
/// ```
pub trait CharacterClass {
    /// Returns whether `ch` belongs to this class.
    fn matches(&self, ch: char) -> bool;

    /// Text used to render this class in diagnostics.
    fn describe(&self) -> &str;
}

/// Matches every character contained in the defining string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringCharacterClass(Cow<'static, str>);

impl StringCharacterClass {
    pub const fn new(set: &'static str) -> Self {
        Self(Cow::Borrowed(set))
    }

    /// The defining set of characters.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CharacterClass for StringCharacterClass {
    #[inline]
    fn matches(&self, ch: char) -> bool {
        self.0.contains(ch)
    }

    fn describe(&self) -> &str {
        &self.0
    }
}

impl From<String> for StringCharacterClass {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl fmt::Display for StringCharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Matches every character NOT contained in the defining string.
///
/// `describe()` renders the defining set itself, not its negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotStringCharacterClass(Cow<'static, str>);

impl NotStringCharacterClass {
    pub const fn new(set: &'static str) -> Self {
        Self(Cow::Borrowed(set))
    }

    /// The excluded set of characters.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CharacterClass for NotStringCharacterClass {
    #[inline]
    fn matches(&self, ch: char) -> bool {
        !self.0.contains(ch)
    }

    fn describe(&self) -> &str {
        &self.0
    }
}

impl From<String> for NotStringCharacterClass {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl fmt::Display for NotStringCharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A class backed by a plain predicate, for classes that are not small sets.
///
/// ```
/// use lexer_framework::{CharacterClass, FnCharacterClass};
///
/// const ALPHABETIC: FnCharacterClass = FnCharacterClass::new("alphabetic", char::is_alphabetic);
/// assert!(ALPHABETIC.matches('\u{4f60}'));
/// ```
#[derive(Clone, Copy)]
pub struct FnCharacterClass {
    name: &'static str,
    predicate: fn(char) -> bool,
}

impl FnCharacterClass {
    pub const fn new(name: &'static str, predicate: fn(char) -> bool) -> Self {
        Self { name, predicate }
    }
}

impl CharacterClass for FnCharacterClass {
    #[inline]
    fn matches(&self, ch: char) -> bool {
        (self.predicate)(ch)
    }

    fn describe(&self) -> &str {
        self.name
    }
}

impl fmt::Debug for FnCharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnCharacterClass").field(&self.name).finish()
    }
}

impl fmt::Display for FnCharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
