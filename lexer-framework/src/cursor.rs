/// A cursor over raw input bytes, decoding one UTF-8 character at a time.
///
/// The cursor tracks three offsets: `start`, where the pending (not yet
/// emitted) lexeme begins, `pos`, the next byte to decode, and `width`, the
/// byte length of the most recently decoded character. `width` allows
/// exactly one step of [`Cursor::backup`].
///
/// Invariant: `start <= pos <= input.len()`.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: Vec<u8>,
    start: usize,
    pos: usize,
    width: usize,
}

impl Cursor {
    /// Creates a new cursor over the given input.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into(),
            start: 0,
            pos: 0,
            width: 0,
        }
    }

    /// Returns the whole input.
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// Returns the offset where the pending lexeme starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns true if the cursor is at the end of the input.
    ///
    /// This is purely byte based: once it returns true, [`Cursor::next`]
    /// yields `None`.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Decodes and consumes the next character.
    ///
    /// Invalid UTF-8 decodes to `U+FFFD` and consumes a single byte. At the
    /// end of input this returns `None` and records a width of zero, so a
    /// following [`Cursor::backup`] does nothing.
    pub fn next(&mut self) -> Option<char> {
        match decode(&self.input[self.pos..]) {
            Some((ch, width)) => {
                self.width = width;
                self.pos += width;
                Some(ch)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Returns the next character without consuming it.
    ///
    /// Implemented as `next` followed by `backup`, so it replaces the width
    /// remembered for backup.
    pub fn peek(&mut self) -> Option<char> {
        let ch = self.next();
        self.backup();
        ch
    }

    /// Un-reads the most recently decoded character.
    ///
    /// Only one level is tracked: the remembered width is cleared, so a
    /// second `backup` without an intervening `next` is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the character was already part of an emitted or ignored
    /// lexeme, i.e. if the cursor would move before the lexeme start.
    pub fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
        assert!(
            self.start <= self.pos,
            "backup moved before lexeme start ({} < {})",
            self.pos,
            self.start
        );
    }

    /// Discards the pending lexeme.
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Returns the bytes of the pending lexeme.
    pub fn lexeme(&self) -> &[u8] {
        &self.input[self.start..self.pos]
    }

    /// Takes the pending lexeme as text together with its start offset and
    /// begins a new lexeme at the current offset.
    pub fn take_lexeme(&mut self) -> (String, usize) {
        let offset = self.start;
        let text = String::from_utf8_lossy(self.lexeme()).into_owned();
        self.start = self.pos;
        (text, offset)
    }
}

/// Decodes the first character of `bytes`, returning it with its encoded
/// width, or `None` if `bytes` is empty.
fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let lead = *bytes.first()?;
    let width = match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    };
    let decoded = bytes
        .get(..width)
        .and_then(|seq| std::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next());
    Some(decoded.map_or((char::REPLACEMENT_CHARACTER, 1), |ch| (ch, width)))
}
