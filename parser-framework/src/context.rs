use crate::error::ParseError;
use crate::traits::Rule;
use common_framework::{Token, TokenType};
use crossbeam::channel::Sender;
use tracing::{debug, trace};

/// Context for parsing operations.
///
/// Rules receive the parser as `&mut dyn ParseContext<T, A>`. Only the
/// buffer access, `abort` and `tree` are required; token matching and error
/// reporting are built on top of them.
pub trait ParseContext<T: TokenType, A = ()> {
    /// Returns true while unconsumed tokens remain in the buffer.
    fn has_more(&self) -> bool;

    /// Returns the token at the cursor without consuming it.
    fn peek(&self) -> Option<&Token<T>>;

    /// Returns the token `offset` positions past the cursor without consuming it.
    fn peek_at(&self, offset: usize) -> Option<&Token<T>>;

    /// Consumes and returns the token at the cursor.
    fn next(&mut self) -> Option<Token<T>>;

    /// Returns the cursor position in the token buffer.
    fn token_index(&self) -> usize;

    /// Returns true once an error has been signalled.
    fn is_aborted(&self) -> bool;

    /// Signals `error` and stops the rule chain. Only the first error of a
    /// run is delivered; later calls are ignored.
    fn abort(&mut self, error: ParseError);

    /// The syntax tree under construction.
    fn tree(&mut self) -> &mut A;

    /// Signals a rule-defined error with `message`.
    fn error(&mut self, message: String) {
        self.abort(ParseError::Custom(message));
    }

    /// Consumes the next token and returns it if its type is one of
    /// `expected`. Otherwise signals a syntax error and returns `None`; the
    /// mismatching token is consumed as well.
    fn accept(&mut self, expected: &[T]) -> Option<Token<T>> {
        let names = || expected.iter().map(|ty| ty.name()).collect();
        match self.next() {
            Some(token) if token.is_one_of(expected) => Some(token),
            Some(token) => {
                self.abort(ParseError::UnexpectedToken {
                    expected: names(),
                    found: token.ty.name(),
                    offset: token.offset,
                });
                None
            }
            None => {
                self.abort(ParseError::UnexpectedEnd { expected: names() });
                None
            }
        }
    }
}

/// The context rules run against: the drained token buffer, the tree and the
/// sending half of the outcome slot.
pub(crate) struct DefaultContext<T: TokenType, A> {
    tokens: Vec<Token<T>>,
    current: usize,
    tree: A,
    outcome: Sender<Result<(), ParseError>>,
    aborted: bool,
}

impl<T: TokenType, A: Send + 'static> DefaultContext<T, A> {
    pub(crate) fn new(
        tokens: Vec<Token<T>>,
        tree: A,
        outcome: Sender<Result<(), ParseError>>,
    ) -> Self {
        Self {
            tokens,
            current: 0,
            tree,
            outcome,
            aborted: false,
        }
    }

    /// Runs the rule chain starting at `start` until a rule returns `None`,
    /// the buffer is exhausted or an error has been signalled, then reports
    /// completion.
    pub(crate) fn run(mut self, start: Rule<T, A>) -> Self {
        let mut current = Some(start);
        let mut steps = 0usize;
        while let Some(rule) = current.take() {
            if !self.has_more() || self.aborted {
                break;
            }
            trace!(index = self.current, "running rule");
            current = rule.run(&mut self);
            steps += 1;
        }
        debug!(
            steps,
            consumed = self.current,
            aborted = self.aborted,
            "rule chain finished"
        );
        // no-op when an error already occupies the slot
        let _ = self.outcome.try_send(Ok(()));
        self
    }

    pub(crate) fn into_tree(self) -> A {
        self.tree
    }
}

impl<T: TokenType, A> ParseContext<T, A> for DefaultContext<T, A> {
    fn has_more(&self) -> bool {
        self.current < self.tokens.len()
    }

    fn peek(&self) -> Option<&Token<T>> {
        self.tokens.get(self.current)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token<T>> {
        self.tokens.get(self.current + offset)
    }

    fn next(&mut self) -> Option<Token<T>> {
        let token = self.tokens.get(self.current).cloned()?;
        self.current += 1;
        Some(token)
    }

    fn token_index(&self) -> usize {
        self.current
    }

    fn is_aborted(&self) -> bool {
        self.aborted
    }

    fn abort(&mut self, error: ParseError) {
        if self.aborted {
            trace!(%error, "parse already aborted, dropping error");
            return;
        }
        debug!(%error, "aborting parse");
        self.aborted = true;
        let _ = self.outcome.try_send(Err(error));
    }

    fn tree(&mut self) -> &mut A {
        &mut self.tree
    }
}
