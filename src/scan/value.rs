use std::io::Read;

use serde_json::{Map, Number, Value};

use super::Scanner;
use crate::{Error, Result};

/// Full-value materialization: reads exactly one value off the scanner and
/// returns it as a [`serde_json::Value`]. Accepts the same lenient dialect as
/// the skip-parser (single quotes, unquoted keys and tokens), so strict JSON
/// materializes exactly as `serde_json` would parse it.
impl<R: Read> Scanner<R> {
    pub fn read_value(&mut self) -> Result<Value> {
        match self.peek_clean()? {
            None => Err(Error::syntax(
                "expected value but reached end of input",
                self.position(),
            )),
            Some('{') => self.read_object_value(),
            Some('[') => self.read_array_value(),
            Some('"' | '\'') => Ok(Value::String(self.read_quoted_string()?)),
            Some(_) => {
                let token = self.read_unquoted_string()?;
                parse_scalar_token(&token, self.position())
            }
        }
    }

    fn read_object_value(&mut self) -> Result<Value> {
        let mut map = Map::new();
        while let Some(key) = self.next_key()? {
            let value = self.read_value()?;
            map.insert(key, value);
            match self.peek_clean()? {
                Some(',') => {
                    self.read_clean()?;
                }
                Some('}') => {}
                Some(c) => {
                    return Err(Error::syntax(
                        format!("expected ',' or '}}' after value, found '{c}'"),
                        self.position(),
                    ))
                }
                None => {
                    return Err(Error::syntax(
                        "reached end of input before closing object",
                        self.position(),
                    ))
                }
            }
        }
        Ok(Value::Object(map))
    }

    fn read_array_value(&mut self) -> Result<Value> {
        if self.read_clean()? != Some('[') {
            return Err(Error::syntax("expected '['", self.position()));
        }
        let mut items = Vec::new();
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
                    return Ok(Value::Array(items));
                }
                Some(_) => {
                    items.push(self.read_value()?);
                    match self.peek_clean()? {
                        Some(',') => {
                            self.read_clean()?;
                        }
                        Some(']') => {}
                        Some(c) => {
                            return Err(Error::syntax(
                                format!("expected ',' or ']' after array element, found '{c}'"),
                                self.position(),
                            ))
                        }
                        None => {
                            return Err(Error::syntax(
                                "reached end of input before closing array",
                                self.position(),
                            ))
                        }
                    }
                }
            }
        }
    }
}

/// Classifies an unquoted token: null, booleans and numbers get their JSON
/// type, everything else stays a string.
fn parse_scalar_token(token: &str, offset: u64) -> Result<Value> {
    if token.is_empty() {
        return Err(Error::syntax("expected value but found none", offset));
    }
    match token {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Some(number) = parse_number(token) {
        return Ok(Value::Number(number));
    }
    Ok(Value::String(token.to_string()))
}

fn parse_number(token: &str) -> Option<Number> {
    let has_float = token
        .as_bytes()
        .iter()
        .any(|byte| matches!(byte, b'.' | b'e' | b'E'));
    if !has_float {
        if let Ok(value) = token.parse::<i64>() {
            return Some(Number::from(value));
        }
        if let Ok(value) = token.parse::<u64>() {
            return Some(Number::from(value));
        }
        return None;
    }
    let float: f64 = token.parse().ok()?;
    Number::from_f64(float)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn read_one(input: &str) -> Result<Value> {
        Scanner::new(input.as_bytes()).read_value()
    }

    #[rstest]
    #[case::null("null,", json!(null))]
    #[case::boolean("true,", json!(true))]
    #[case::integer("42,", json!(42))]
    #[case::negative("-7,", json!(-7))]
    #[case::big_unsigned("18446744073709551615,", json!(18_446_744_073_709_551_615u64))]
    #[case::float("3.5,", json!(3.5))]
    #[case::exponent("1e3,", json!(1000.0))]
    #[case::string(r#""hi","#, json!("hi"))]
    #[case::unquoted_word("bar,", json!("bar"))]
    #[case::empty_object("{},", json!({}))]
    #[case::empty_array("[],", json!([]))]
    #[case::array("[1, 2, 3],", json!([1, 2, 3]))]
    #[case::object(r#"{"a": 1, "b": [true, null]},"#, json!({"a": 1, "b": [true, null]}))]
    #[case::nested(r#"{"a": {"b": {"c": "d"}}},"#, json!({"a": {"b": {"c": "d"}}}))]
    fn read_value_matches_reference(#[case] input: &str, #[case] expected: Value) {
        assert_eq!(read_one(input).unwrap(), expected);
    }

    #[test]
    fn read_value_accepts_lenient_dialect() {
        let value = read_one("{foo: bar, 'n': 1},").unwrap();
        assert_eq!(value, json!({"foo": "bar", "n": 1}));
    }

    #[test]
    fn read_value_stops_after_one_value() {
        let mut scanner = Scanner::new(r#"{"a": 1} trailing"#.as_bytes());
        let value = scanner.read_value().unwrap();
        assert_eq!(value, json!({"a": 1}));
        assert_eq!(scanner.peek_clean().unwrap(), Some('t'));
    }

    #[test]
    fn strict_json_matches_serde_json() {
        let doc = r#"{"a": {"b": [1, 2.5, "x"], "c": false}, "d": null},"#;
        let reference: Value = serde_json::from_str(doc.trim_end_matches(',')).unwrap();
        assert_eq!(read_one(doc).unwrap(), reference);
    }

    #[rstest]
    #[case::eof("")]
    #[case::unterminated_object(r#"{"a": 1"#)]
    #[case::unterminated_array("[1, 2")]
    #[case::missing_colon(r#"{"a" 1}"#)]
    #[case::garbage_separator(r#"{"a": 1 "b": 2}"#)]
    fn read_value_rejects(#[case] input: &str) {
        assert!(matches!(
            read_one(input).unwrap_err(),
            Error::Syntax { .. }
        ));
    }

    #[test]
    fn numbers_with_leading_plus_stay_numbers() {
        assert_eq!(read_one("+5,").unwrap(), json!(5));
    }

    #[test]
    fn non_numeric_token_falls_back_to_string() {
        assert_eq!(read_one("1.2.3,").unwrap(), json!("1.2.3"));
    }
}
