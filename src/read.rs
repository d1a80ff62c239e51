//! Buffered character cursor over a byte stream.
//!
//! [`Cursor`] decodes UTF-8 from any [`io::Read`] one character at a time,
//! pulling fixed-size blocks from the reader as needed. It exposes exactly one
//! character of lookahead: [`Cursor::current`] is the character the parser is
//! looking at, and [`Cursor::advance`] moves past it. Refills are invisible to
//! the caller, and a multi-byte sequence may straddle two blocks.
//!
//! The cursor also tracks the 1-based line and column of the current
//! character so every parse error can point at the offending spot. At the end
//! of input the position is one column past the last character.
//!
//! ```rust
//! use strict_json::read::Cursor;
//!
//! let mut cursor = Cursor::new("a\nb".as_bytes()).unwrap();
//! assert_eq!(cursor.current(), Some('a'));
//! assert_eq!(cursor.advance().unwrap(), Some('\n'));
//! assert_eq!(cursor.advance().unwrap(), Some('b'));
//! assert_eq!(cursor.position(), (2, 1));
//! assert_eq!(cursor.advance().unwrap(), None);
//! assert_eq!(cursor.position(), (2, 2));
//! ```

use crate::options::DEFAULT_BUFFER_SIZE;
use std::io::{self, Read};

/// Single-lookahead character reader with transparent block refills.
pub struct Cursor<R> {
    reader: R,
    buf: Box<[u8]>,
    pos: usize,
    len: usize,
    current: Option<char>,
    line: usize,
    col: usize,
}

impl<R: Read> Cursor<R> {
    /// Creates a cursor reading [`DEFAULT_BUFFER_SIZE`] bytes per refill and
    /// positions it on the first character.
    pub fn new(reader: R) -> io::Result<Self> {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Creates a cursor with a custom refill block size (at least one byte).
    pub fn with_capacity(reader: R, capacity: usize) -> io::Result<Self> {
        let mut cursor = Cursor {
            reader,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            len: 0,
            current: None,
            line: 1,
            col: 1,
        };
        cursor.current = cursor.decode_char()?;
        Ok(cursor)
    }

    /// The character under the cursor, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Line and column of the current character, both 1-based.
    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    /// Moves past the current character and returns the new one.
    ///
    /// Advancing at end of input is a no-op that keeps returning `None`.
    pub fn advance(&mut self) -> io::Result<Option<char>> {
        match self.current {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => return Ok(None),
        }
        self.current = self.decode_char()?;
        Ok(self.current)
    }

    /// Consumes the cursor, returning the underlying reader.
    ///
    /// Bytes already buffered but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pos == self.len && !self.refill()? {
            return Ok(None);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    fn refill(&mut self) -> io::Result<bool> {
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let lead = match self.next_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        if lead < 0x80 {
            return Ok(Some(lead as char));
        }

        let (width, mut code) = match lead {
            0xC2..=0xDF => (2, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
            0xF0..=0xF4 => (4, u32::from(lead & 0x07)),
            _ => return Err(invalid_utf8()),
        };
        for _ in 1..width {
            match self.next_byte()? {
                Some(byte) if byte & 0xC0 == 0x80 => code = (code << 6) | u32::from(byte & 0x3F),
                _ => return Err(invalid_utf8()),
            }
        }

        let min = match width {
            2 => 0x80,
            3 => 0x800,
            _ => 0x1_0000,
        };
        if code < min {
            return Err(invalid_utf8());
        }
        // rejects surrogates and anything past U+10FFFF
        char::from_u32(code).map(Some).ok_or_else(invalid_utf8)
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        "stream did not contain valid UTF-8",
    )
}
