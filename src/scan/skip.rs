use std::io::Read;

use super::{is_terminator, Scanner};
use crate::{Error, Result};

/// Structural skipping: each routine advances the scanner past exactly one
/// syntactic unit without building a representation of it. Rejection of
/// malformed input is best-effort, just strict enough that the offsets
/// recorded around a skip stay correct.
impl<R: Read> Scanner<R> {
    /// Skips one value of any kind, then consumes a trailing `,` if present.
    /// A following `}` or `]` is left for the caller.
    pub fn skip_value(&mut self) -> Result<()> {
        match self.peek_clean()? {
            None => {
                return Err(Error::syntax(
                    "expected value but reached end of input",
                    self.position(),
                ))
            }
            Some('{') => self.skip_object()?,
            Some('[') => self.skip_array()?,
            Some(quote @ ('"' | '\'')) => self.skip_quoted_string(quote)?,
            Some(_) => self.skip_unquoted_string()?,
        }
        match self.peek_clean()? {
            Some('}' | ']') => Ok(()),
            Some(',') => {
                self.read_clean()?;
                Ok(())
            }
            Some(c) => Err(Error::syntax(
                format!("expected ',', '}}', or ']' after value, found '{c}'"),
                self.position(),
            )),
            None => Err(Error::syntax(
                "expected ',', '}', or ']' after value but reached end of input",
                self.position(),
            )),
        }
    }

    pub fn skip_object(&mut self) -> Result<()> {
        match self.read_clean()? {
            Some('{') => {}
            Some(c) => {
                return Err(Error::syntax(
                    format!("expected '{{' but found '{c}'"),
                    self.position(),
                ))
            }
            None => {
                return Err(Error::syntax(
                    "expected '{' but reached end of input",
                    self.position(),
                ))
            }
        }
        loop {
            match self.peek_clean()? {
                None => {
                    return Err(Error::syntax(
                        "reached end of input before closing object",
                        self.position(),
                    ))
                }
                Some('}') => {
                    self.read_clean()?;
                    return Ok(());
                }
                Some(c @ (':' | ',' | ';' | '[' | ']' | '{')) => {
                    return Err(Error::syntax(
                        format!("unexpected formatting character '{c}', expected a key"),
                        self.position(),
                    ))
                }
                Some(quote @ ('"' | '\'')) => self.skip_quoted_string(quote)?,
                Some(_) => self.skip_unquoted_string()?,
            }
            if self.read_clean()? != Some(':') {
                return Err(Error::syntax("expected ':' after key", self.position()));
            }
            self.skip_value()?;
        }
    }

    pub fn skip_array(&mut self) -> Result<()> {
        match self.read_clean()? {
            Some('[') => {}
            Some(c) => {
                return Err(Error::syntax(
                    format!("expected '[' but found '{c}'"),
                    self.position(),
                ))
            }
            None => {
                return Err(Error::syntax(
                    "expected '[' but reached end of input",
                    self.position(),
                ))
            }
        }
        loop {
            match self.peek_clean()? {
                None => {
                    return Err(Error::syntax(
                        "reached end of input before closing array",
                        self.position(),
                    ))
                }
                Some(']') => {
                    self.read_clean()?;
                    return Ok(());
                }
                Some(_) => self.skip_value()?,
            }
        }
    }

    /// Skips a string delimited by `quote`. A backslash unconditionally
    /// consumes and ignores the character after it.
    pub fn skip_quoted_string(&mut self, quote: char) -> Result<()> {
        if self.read_clean()? != Some(quote) {
            return Err(Error::syntax(
                format!("expected '{quote}' at the start of a quoted string"),
                self.position(),
            ));
        }
        loop {
            match self.read_raw()? {
                None => {
                    return Err(Error::syntax(
                        "reached end of input before closing quoted string",
                        self.position(),
                    ))
                }
                Some('\\') => {
                    self.read_raw()?;
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Skips an unquoted token, stopping before whitespace or a terminator.
    pub fn skip_unquoted_string(&mut self) -> Result<()> {
        loop {
            match self.peek_raw()? {
                None => {
                    return Err(Error::syntax(
                        "reached end of input inside unquoted token",
                        self.position(),
                    ))
                }
                Some(c) if c.is_whitespace() || is_terminator(c) => return Ok(()),
                Some(c @ ('"' | '\'' | '[' | '{' | '\\')) => {
                    return Err(Error::syntax(
                        format!("unexpected formatting character '{c}' in unquoted token"),
                        self.position(),
                    ))
                }
                Some(_) => {
                    self.read_raw()?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn skip_one(input: &str) -> (Scanner<&[u8]>, Result<()>) {
        let mut scanner = Scanner::new(input.as_bytes());
        let outcome = scanner.skip_value();
        (scanner, outcome)
    }

    #[rstest]
    #[case::number("1 ,x", 'x')]
    #[case::string("\"a{b]c\" ,x", 'x')]
    #[case::single_quoted("'a\"b' ,x", 'x')]
    #[case::escaped_quote(r#""a\"b" ,x"#, 'x')]
    #[case::object(r#"{"a": 1, "b": [2, 3]} ,x"#, 'x')]
    #[case::array("[1, {\"a\": true}, null] ,x", 'x')]
    #[case::unquoted("bare ,x", 'x')]
    fn skip_value_consumes_trailing_comma(#[case] input: &str, #[case] next: char) {
        let (mut scanner, outcome) = skip_one(input);
        outcome.unwrap();
        assert_eq!(scanner.peek_clean().unwrap(), Some(next));
    }

    #[test]
    fn skip_value_leaves_closing_brace() {
        let (mut scanner, outcome) = skip_one("1}");
        outcome.unwrap();
        assert_eq!(scanner.peek_clean().unwrap(), Some('}'));
    }

    #[test]
    fn skip_value_leaves_closing_bracket() {
        let (mut scanner, outcome) = skip_one("1]");
        outcome.unwrap();
        assert_eq!(scanner.peek_clean().unwrap(), Some(']'));
    }

    #[rstest]
    #[case::eof("")]
    #[case::unterminated_object("{\"a\": 1")]
    #[case::unterminated_array("[1, 2")]
    #[case::unterminated_string("\"abc")]
    #[case::key_expected("{,}")]
    #[case::value_then_garbage("1 1}")]
    #[case::quote_in_unquoted("ab\"cd ,")]
    fn skip_value_rejects(#[case] input: &str) {
        let (_, outcome) = skip_one(input);
        assert!(matches!(outcome.unwrap_err(), Error::Syntax { .. }));
    }

    #[test]
    fn skip_object_handles_unquoted_keys() {
        let (mut scanner, outcome) = skip_one("{foo: bar, baz: 1},x");
        outcome.unwrap();
        assert_eq!(scanner.peek_clean().unwrap(), Some('x'));
    }

    #[test]
    fn skip_tracks_position_for_siblings() {
        // After skipping the value of "a", the scanner should sit on "b"'s key.
        let input = r#"{"a": [1, 2], "b": 3}"#;
        let mut scanner = Scanner::new(input.as_bytes());
        scanner.read_clean().unwrap(); // {
        scanner.skip_quoted_string('"').unwrap(); // "a"
        scanner.read_clean().unwrap(); // :
        scanner.skip_value().unwrap(); // [1, 2] and the comma
        assert_eq!(scanner.peek_clean().unwrap(), Some('"'));
        assert_eq!(scanner.position(), input.find("\"b\"").unwrap() as u64);
    }
}
