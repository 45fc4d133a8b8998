use std::io::{Bytes, Read};

use unicode_reader::CodePoints;

use crate::{Error, Result};

/// Forward-only character reader with a one-slot pushback buffer.
///
/// Positions count decoded characters, so a node offset recorded by one scan
/// can be reached by a later scan simply by discarding that many characters.
/// End-of-input is sticky: once the underlying reader is exhausted the scanner
/// keeps returning `None` without advancing.
pub struct Scanner<R: Read> {
    source: CodePoints<Bytes<R>>,
    pushback: Option<char>,
    consumed: u64,
    eof: bool,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            source: CodePoints::from(reader),
            pushback: None,
            consumed: 0,
            eof: false,
        }
    }

    /// Opens a scanner positioned `offset` characters into the document.
    ///
    /// The transport has no true seek, so the prefix is read and discarded.
    pub fn open_at(reader: R, offset: u64) -> Result<Self> {
        let mut scanner = Self::new(reader);
        for _ in 0..offset {
            if scanner.read_raw()?.is_none() {
                return Err(Error::syntax(
                    "source ended before requested offset",
                    scanner.position(),
                ));
            }
        }
        Ok(scanner)
    }

    /// Returns the next character, whitespace included, advancing the
    /// position. Returns `None` at end-of-input.
    pub fn read_raw(&mut self) -> Result<Option<char>> {
        if let Some(c) = self.pushback.take() {
            return Ok(Some(c));
        }
        if self.eof {
            return Ok(None);
        }
        match self.source.next() {
            None => {
                self.eof = true;
                Ok(None)
            }
            Some(Err(err)) => Err(Error::Io(err)),
            Some(Ok(c)) => {
                self.consumed += 1;
                Ok(Some(c))
            }
        }
    }

    /// Returns the next character without consuming it. Repeated peeks return
    /// the same character.
    pub fn peek_raw(&mut self) -> Result<Option<char>> {
        if self.pushback.is_none() {
            self.pushback = self.read_raw()?;
        }
        Ok(self.pushback)
    }

    /// Returns the next non-whitespace character, consuming it.
    pub fn read_clean(&mut self) -> Result<Option<char>> {
        loop {
            match self.read_raw()? {
                Some(c) if c.is_whitespace() => continue,
                other => return Ok(other),
            }
        }
    }

    /// Returns the next non-whitespace character without consuming it.
    /// Advances past whitespace only if the buffered character is whitespace.
    pub fn peek_clean(&mut self) -> Result<Option<char>> {
        match self.pushback {
            Some(c) if !c.is_whitespace() => Ok(Some(c)),
            _ => {
                let next = self.read_clean()?;
                self.pushback = next;
                Ok(next)
            }
        }
    }

    /// Offset of the next character the caller will consume.
    pub fn position(&self) -> u64 {
        if self.pushback.is_some() {
            self.consumed - 1
        } else {
            self.consumed
        }
    }
}
