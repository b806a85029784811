use crate::context::ParseContext;
use common_framework::TokenType;
use std::fmt;

type Transition<T, A> = dyn FnOnce(&mut dyn ParseContext<T, A>) -> Option<Rule<T, A>> + Send;

/// A parser rule: runs once against the parser and returns the rule to run
/// next, or `None` to finish.
///
/// Like lexer states, rules are driven in a loop by the parser and never
/// call each other.
///
/// ```
/// use common_framework::TokenType;
/// use parser_framework::{ParseContext, Rule};
///
/// #[derive(Debug, Clone, Copy)]
/// enum Kind {
///     Word,
/// }
///
/// impl TokenType for Kind {
///     fn name(&self) -> &'static str {
///         "Word"
///     }
///     fn value(&self) -> u64 {
///         0
///     }
/// }
///
/// fn words(p: &mut dyn ParseContext<Kind>) -> Option<Rule<Kind>> {
///     p.accept(&[Kind::Word])?;
///     Some(Rule::new(words))
/// }
///
/// let start = Rule::new(words);
/// # let _ = start;
/// ```
pub struct Rule<T: TokenType, A = ()>(Box<Transition<T, A>>);

impl<T: TokenType, A> Rule<T, A> {
    /// Wraps a rule function or closure.
    pub fn new<F>(transition: F) -> Self
    where
        F: FnOnce(&mut dyn ParseContext<T, A>) -> Option<Rule<T, A>> + Send + 'static,
    {
        Self(Box::new(transition))
    }

    /// Runs this rule against `ctx`, returning the next rule.
    pub fn run(self, ctx: &mut dyn ParseContext<T, A>) -> Option<Rule<T, A>> {
        (self.0)(ctx)
    }
}

impl<T: TokenType, A> fmt::Debug for Rule<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rule(..)")
    }
}
