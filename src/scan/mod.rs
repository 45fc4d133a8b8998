//! Streaming scan layer: a pushback character scanner plus the skip, key
//! extraction, and value materialization routines built on it.

mod scanner;
mod skip;
mod strings;
mod value;

pub use scanner::Scanner;

/// Characters that end an unquoted token without being part of it.
pub(crate) fn is_terminator(c: char) -> bool {
    matches!(c, ']' | '}' | ':' | ',' | ';')
}
