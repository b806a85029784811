use common_framework::TokenType;
use lexer_framework::Lexer;
use parser_framework::{ParseError, Parser, Rule, Tree};
use std::thread;
use thiserror::Error;
use tracing::{debug, debug_span, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to spawn lexer thread: {0}")]
    Spawn(String),

    #[error("lexer thread panicked")]
    LexerPanicked,
}

/// Drives a lexer and a parser over the same input: the lexer runs on its
/// own thread and feeds the parser through the bounded token stream.
///
/// Token types passed to [`Pipeline::skip`] are dropped between the two, so
/// grammars never see whitespace or comments.
pub struct Pipeline<T: TokenType, A: Tree + Default = ()> {
    lexer: Lexer<T>,
    start: Rule<T, A>,
    error_types: Vec<T>,
    skip: Vec<T>,
    tree: A,
}

impl<T: TokenType, A: Tree + Default> Pipeline<T, A> {
    pub fn new(lexer: Lexer<T>, start: Rule<T, A>, error_types: impl IntoIterator<Item = T>) -> Self {
        Self {
            lexer,
            start,
            error_types: error_types.into_iter().collect(),
            skip: Vec::new(),
            tree: A::default(),
        }
    }

    pub fn with_tree(mut self, tree: A) -> Self {
        self.tree = tree;
        self
    }

    /// Drops tokens of the given types before they reach the parser.
    pub fn skip(mut self, types: impl IntoIterator<Item = T>) -> Self {
        self.skip.extend(types);
        self
    }

    /// Runs the pipeline to completion and returns the tree the rules built.
    pub fn run(self) -> Result<A, PipelineError> {
        let _span = debug_span!("pipeline").entered();
        let Pipeline {
            lexer,
            start,
            error_types,
            skip,
            tree,
        } = self;

        let stream = lexer.token_stream();
        let handle = thread::Builder::new()
            .name("lexer".into())
            .spawn(move || lexer.start_lexing())
            .map_err(|err| PipelineError::Spawn(err.to_string()))?;

        let tokens = stream
            .into_iter()
            .filter(move |token| !token.is_one_of(&skip));
        let mut parser = Parser::new(tokens, start, error_types).with_tree(tree);
        let parsed = parser.parse();

        if handle.join().is_err() {
            warn!("lexer thread panicked");
            return Err(PipelineError::LexerPanicked);
        }
        parsed?;
        debug!("pipeline finished");
        Ok(parser.into_tree())
    }
}
