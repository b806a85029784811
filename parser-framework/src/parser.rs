use crate::ast::Tree;
use crate::context::DefaultContext;
use crate::error::ParseError;
use crate::traits::Rule;
use common_framework::{Token, TokenType};
use crossbeam::channel::bounded;
use std::{fmt, mem, thread};
use tracing::{debug, debug_span, warn};

type TokenSource<T> = Box<dyn Iterator<Item = Token<T>> + Send>;

/// Rule-chaining parser over a token source.
///
/// `parse` first drains the whole source into a buffer, failing on the first
/// token whose type is one of the configured error types. The rule chain then
/// runs on its own thread while the caller waits for whichever comes first:
/// an error signalled by a rule, or completion of the chain.
pub struct Parser<T: TokenType, A: Tree + Default = ()> {
    source: Option<TokenSource<T>>,
    start: Option<Rule<T, A>>,
    error_types: Vec<T>,
    tree: A,
    aborted: bool,
}

impl<T: TokenType, A: Tree + Default> Parser<T, A> {
    /// Creates a parser reading `source`, starting at `start`, that treats
    /// tokens of any of `error_types` as lexical errors.
    pub fn new<I>(source: I, start: Rule<T, A>, error_types: impl IntoIterator<Item = T>) -> Self
    where
        I: IntoIterator<Item = Token<T>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            source: Some(Box::new(source.into_iter())),
            start: Some(start),
            error_types: error_types.into_iter().collect(),
            tree: A::default(),
            aborted: false,
        }
    }

    /// Replaces the tree rules build into.
    pub fn with_tree(mut self, tree: A) -> Self {
        self.tree = tree;
        self
    }

    pub fn tree(&self) -> &A {
        &self.tree
    }

    pub fn into_tree(self) -> A {
        self.tree
    }

    /// Returns true if the last `parse` ended in an error.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Runs the parser to completion. A parser runs once; later calls return
    /// [`ParseError::AlreadyRun`].
    pub fn parse(&mut self) -> Result<(), ParseError> {
        let (Some(source), Some(start)) = (self.source.take(), self.start.take()) else {
            return Err(ParseError::AlreadyRun);
        };
        let result = self.run(source, start);
        self.aborted = result.is_err();
        result
    }

    fn run(&mut self, source: TokenSource<T>, start: Rule<T, A>) -> Result<(), ParseError> {
        let _span = debug_span!("parse").entered();

        let tokens = self.drain(source)?;
        debug!(tokens = tokens.len(), "drained token source");

        let (outcome_tx, outcome_rx) = bounded(1);
        let ctx = DefaultContext::new(tokens, mem::take(&mut self.tree), outcome_tx);
        let handle = thread::Builder::new()
            .name("parser-rules".into())
            .spawn(move || ctx.run(start))
            .map_err(|err| ParseError::Spawn(err.to_string()))?;

        // The sender is dropped without a value only if the rule thread dies.
        let outcome = outcome_rx
            .recv()
            .unwrap_or(Err(ParseError::RulePanicked));

        match handle.join() {
            Ok(ctx) => self.tree = ctx.into_tree(),
            Err(_) => {
                warn!("rule thread panicked");
                return outcome.and(Err(ParseError::RulePanicked));
            }
        }
        debug!(ok = outcome.is_ok(), "parse finished");
        outcome
    }

    fn drain(&self, source: TokenSource<T>) -> Result<Vec<Token<T>>, ParseError> {
        let mut tokens = Vec::new();
        for token in source {
            if token.is_one_of(&self.error_types) {
                debug!(%token, "error token in source");
                return Err(ParseError::Lexical {
                    message: token.text,
                    offset: token.offset,
                });
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}

impl<T: TokenType, A: Tree + Default> fmt::Debug for Parser<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("error_types", &self.error_types)
            .field("started", &self.start.is_none())
            .field("aborted", &self.aborted)
            .finish_non_exhaustive()
    }
}
