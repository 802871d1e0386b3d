//! Byte cursor over one statement.
//!
//! `current()` returns `0` past the end of the statement, so scanner
//! dispatch needs no separate bounds check. An interior NUL byte is
//! distinguished from the end by comparing the position.

pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, start: usize, end: usize) -> Self {
        let end = end.min(source.len());
        Cursor {
            bytes: source.as_bytes(),
            pos: start.min(end),
            end,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.peek(0)
    }

    #[inline]
    pub(crate) fn peek(&self, offset: usize) -> u8 {
        let at = self.pos + offset;
        if at < self.end {
            self.bytes[at]
        } else {
            0
        }
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.advance_n(1);
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.end);
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// Advance while `pred` holds for the current byte.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Remaining bytes of the statement.
    #[inline]
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..self.end]
    }
}
