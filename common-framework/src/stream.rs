use crate::token::{Token, TokenType};
use crossbeam::channel::{bounded, IntoIter, Iter, Receiver, SendError, Sender};
use tracing::debug;

/// Number of tokens the stream buffers before `push` blocks.
pub const DEFAULT_CAPACITY: usize = 5;

/// Creates a bounded token stream, returning the producer and consumer halves.
///
/// The stream preserves push order. Once the queue holds `capacity` tokens,
/// [`TokenSink::push`] blocks until the consumer catches up, so a fast lexer
/// cannot run arbitrarily far ahead of a slow parser.
pub fn channel<T: TokenType>(capacity: usize) -> (TokenSink<T>, TokenStream<T>) {
    let (tx, rx) = bounded(capacity);
    (TokenSink { tx: Some(tx) }, TokenStream { rx })
}

/// Producer half of a token stream. Owned by exactly one lexer.
#[derive(Debug)]
pub struct TokenSink<T: TokenType> {
    tx: Option<Sender<Token<T>>>,
}

impl<T: TokenType> TokenSink<T> {
    /// Pushes a token onto the stream, blocking while the stream is full.
    ///
    /// If every consumer has been dropped the token is discarded.
    ///
    /// # Panics
    ///
    /// Panics if the stream has already been closed.
    pub fn push(&self, token: Token<T>) {
        let Some(tx) = &self.tx else {
            panic!("push on a closed token stream: {token}");
        };
        if let Err(SendError(token)) = tx.send(token) {
            debug!(%token, "token stream has no consumer, discarding token");
        }
    }

    /// Closes the stream. Consumers see end-of-stream once they have drained
    /// the tokens pushed before this call.
    ///
    /// # Panics
    ///
    /// Panics if the stream has already been closed.
    pub fn close(&mut self) {
        assert!(self.tx.take().is_some(), "token stream closed twice");
    }

    /// Returns true once [`TokenSink::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.tx.is_none()
    }
}

/// Consumer half of a token stream.
#[derive(Debug, Clone)]
pub struct TokenStream<T: TokenType> {
    rx: Receiver<Token<T>>,
}

impl<T: TokenType> TokenStream<T> {
    /// Returns a blocking iterator over the tokens in push order. The
    /// iterator ends when the stream is closed and fully drained.
    pub fn tokens(&self) -> Iter<'_, Token<T>> {
        self.rx.iter()
    }

    /// Number of tokens currently buffered.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns true if no token is currently buffered.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Maximum number of buffered tokens.
    pub fn capacity(&self) -> Option<usize> {
        self.rx.capacity()
    }
}

impl<T: TokenType> IntoIterator for TokenStream<T> {
    type Item = Token<T>;
    type IntoIter = IntoIter<Token<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rx.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy)]
    struct Word;

    impl TokenType for Word {
        fn name(&self) -> &'static str {
            "Word"
        }

        fn value(&self) -> u64 {
            0
        }
    }

    #[test]
    fn test_close_ends_stream() {
        let (mut sink, stream) = channel::<Word>(DEFAULT_CAPACITY);
        sink.push(Token::new(Word, "a", 0));
        sink.close();
        assert!(sink.is_closed());

        let tokens: Vec<_> = stream.tokens().collect();
        assert_eq!(tokens, vec![Token::new(Word, "a", 0)]);
        assert_eq!(stream.tokens().next(), None);
    }

    #[test]
    fn test_drain_preserves_push_order() {
        let pushed: Vec<_> = (0..DEFAULT_CAPACITY)
            .map(|i| Token::new(Word, format!("t{i}"), i))
            .collect();
        let (mut sink, stream) = channel::<Word>(DEFAULT_CAPACITY);
        for token in &pushed {
            sink.push(token.clone());
        }
        sink.close();

        let mut drained = stream.tokens();
        let received: Vec<_> = drained.by_ref().take(pushed.len()).collect();
        assert_eq!(received, pushed);
        assert_eq!(drained.next(), None);
    }

    #[test]
    fn test_drain_order_across_threads() {
        let (mut sink, stream) = channel::<Word>(2);
        let producer = std::thread::spawn(move || {
            for i in 0..100 {
                sink.push(Token::new(Word, i.to_string(), i));
            }
            sink.close();
        });

        let offsets: Vec<_> = stream.into_iter().map(|t| t.offset).collect();
        producer.join().expect("producer thread");
        assert_eq!(offsets, (0..100).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "closed token stream")]
    fn test_push_after_close_panics() {
        let (mut sink, _stream) = channel::<Word>(DEFAULT_CAPACITY);
        sink.close();
        sink.push(Token::new(Word, "late", 0));
    }

    #[test]
    #[should_panic(expected = "closed twice")]
    fn test_double_close_panics() {
        let (mut sink, _stream) = channel::<Word>(DEFAULT_CAPACITY);
        sink.close();
        sink.close();
    }

    #[test]
    fn test_push_without_consumer_does_not_block() {
        let (mut sink, stream) = channel::<Word>(1);
        drop(stream);
        for i in 0..4 {
            sink.push(Token::new(Word, "x", i));
        }
        sink.close();
    }

    #[test]
    fn test_capacity() {
        let (_sink, stream) = channel::<Word>(3);
        assert_eq!(stream.capacity(), Some(3));
        assert!(stream.is_empty());
    }
}
