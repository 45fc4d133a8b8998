use std::io::Read;

use super::{is_terminator, Scanner};
use crate::{Error, Result};

impl<R: Read> Scanner<R> {
    /// Reads the next key of the object being scanned, leaving the scanner on
    /// the first character of its value.
    ///
    /// An opening `{` is consumed if the scanner has not entered the object
    /// yet. `Ok(None)` means the closing `}` was reached and consumed; there
    /// are no more keys at this level.
    pub fn next_key(&mut self) -> Result<Option<String>> {
        if self.peek_clean()? == Some('{') {
            self.read_clean()?;
        }
        let key = match self.peek_clean()? {
            None => {
                return Err(Error::syntax(
                    "reached end of input before closing object",
                    self.position(),
                ))
            }
            Some('}') => {
                self.read_clean()?;
                return Ok(None);
            }
            Some(c @ (':' | ',' | ';' | '[' | ']' | '{')) => {
                return Err(Error::syntax(
                    format!("unexpected formatting character '{c}', expected a key"),
                    self.position(),
                ))
            }
            Some('"' | '\'') => self.read_quoted_string()?,
            Some(_) => self.read_unquoted_string()?,
        };
        if self.read_clean()? != Some(':') {
            return Err(Error::syntax("expected ':' after key", self.position()));
        }
        Ok(Some(key))
    }

    /// Reads a quoted string, decoding escapes. The opening quote character
    /// (`"` or `'`) determines the closing one; neither is part of the result.
    pub fn read_quoted_string(&mut self) -> Result<String> {
        let quote = match self.read_clean()? {
            Some(c @ ('"' | '\'')) => c,
            _ => {
                return Err(Error::syntax(
                    "expected a quoted string",
                    self.position(),
                ))
            }
        };
        let mut out = String::new();
        loop {
            match self.read_raw()? {
                None => {
                    return Err(Error::syntax(
                        "reached end of input before closing quoted string",
                        self.position(),
                    ))
                }
                Some('\\') => match self.read_raw()? {
                    None => {
                        return Err(Error::syntax(
                            "reached end of input before closing quoted string",
                            self.position(),
                        ))
                    }
                    Some('b') => out.push('\u{0008}'),
                    Some('t') => out.push('\t'),
                    Some('n') => out.push('\n'),
                    Some('f') => out.push('\u{000C}'),
                    Some('r') => out.push('\r'),
                    Some(c @ ('"' | '\'' | '\\' | '/')) => out.push(c),
                    Some(c) => {
                        return Err(Error::syntax(
                            format!("unknown escape sequence '\\{c}'"),
                            self.position(),
                        ))
                    }
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    /// Reads an unquoted token, stopping before whitespace or a terminator so
    /// the caller can inspect what ended it.
    pub fn read_unquoted_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.peek_raw()? {
                None => {
                    return Err(Error::syntax(
                        "reached end of input inside unquoted token",
                        self.position(),
                    ))
                }
                Some(c) if c.is_whitespace() || is_terminator(c) => return Ok(out),
                Some(c @ ('"' | '\'' | '[' | '{' | '\\')) => {
                    return Err(Error::syntax(
                        format!("unexpected formatting character '{c}' in unquoted token"),
                        self.position(),
                    ))
                }
                Some(c) => {
                    self.read_raw()?;
                    out.push(c);
                }
            }
        }
    }
}
