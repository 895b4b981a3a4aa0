//! The Knot grammar.
//!
//! This module provides the [`Parser`], a single-pass cursor over the input
//! that implements every grammar rule:
//!
//! ```text
//! Document   := Datum*
//! Datum      := Key Value
//! Key        := Segment ('.' Segment)*
//! Segment    := [A-Za-z0-9_]*
//! Value      := String | Number | Boolean | Collection
//! String     := '"' ( '\' Any | [^"\] )* '"'
//! Number     := '-'? Digit+ ('.' Digit+)? ('e' '-'? Digit+)?
//! Boolean    := 'true' | 'false'   (case-insensitive)
//! Collection := '[' ( Value (Sep Value)* )? ']'
//! Sep        := ',' | whitespace+
//! Enum       := Key ('|' Key)*     (extended grammar only)
//! ```
//!
//! Each `parse_*` method parses one production at the current position and
//! skips leading whitespace first. Call [`Parser::finish`] to require that
//! nothing but whitespace remains.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use serde_knot::{parse_document, Value};
//!
//! let doc = parse_document("user.name \"Cansu\"\nuser.age 25").unwrap();
//! assert_eq!(doc.datums()[1].value(), &Value::Number(25.0));
//! ```
//!
//! The parser can also be driven rule by rule:
//!
//! ```rust
//! use serde_knot::Parser;
//!
//! let mut parser = Parser::new("  -1.5e-3  ");
//! assert_eq!(parser.parse_number().unwrap(), -0.0015);
//! parser.finish().unwrap();
//! ```

use crate::options::{GrammarVariant, ParseOptions, SeparatorPolicy};
use crate::{Datum, Document, Error, Result, Value};
use log::{debug, trace};

/// A saved cursor position.
#[derive(Clone, Copy)]
struct Mark {
    position: usize,
    line: usize,
    column: usize,
}

#[derive(Clone, Copy, PartialEq)]
enum Separator {
    Comma,
    Whitespace,
}

/// The Knot parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`].
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Creates a parser with the default, strict options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    #[must_use]
    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    fn rest(&self) -> &'a str {
        let input = self.input;
        &input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn reset(&mut self, mark: Mark) {
        self.position = mark.position;
        self.line = mark.line;
        self.column = mark.column;
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Skips all whitespace, newlines included.
    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    /// Skips whitespace on the current line only.
    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(ch) if ch.is_whitespace() && ch != '\n') {
            self.next_char();
        }
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.position;
        while self.peek_char().is_some_and(&pred) {
            self.next_char();
        }
        &input[start..self.position]
    }

    /// The source line containing `position`, for error context.
    fn line_at(&self, position: usize) -> &'a str {
        let input = self.input;
        let start = input[..position].rfind('\n').map_or(0, |i| i + 1);
        let end = input[position..]
            .find('\n')
            .map_or(input.len(), |i| position + i);
        input[start..end].trim_end_matches('\r')
    }

    fn error_at(&self, mark: Mark, msg: &str) -> Error {
        Error::syntax(mark.line, mark.column, msg, self.line_at(mark.position))
    }

    fn error(&self, msg: &str) -> Error {
        self.error_at(self.mark(), msg)
    }

    fn trailing_input(&self) -> Error {
        let found = self.rest().lines().next().unwrap_or_default().trim_end();
        Error::trailing_input(self.line, self.column, found)
    }

    /// Requires that only whitespace remains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrailingInput`] at the first non-whitespace character.
    pub fn finish(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.at_end() {
            Ok(())
        } else {
            Err(self.trailing_input())
        }
    }

    /// Parses a whole document: datums until the end of input.
    ///
    /// # Errors
    ///
    /// Fails on the first datum that does not parse. With
    /// [`ParseOptions::require_line_breaks`] set, anything but whitespace
    /// after a value on the same line is an [`Error::TrailingInput`].
    pub fn parse_document(&mut self) -> Result<Document> {
        let mut doc = Document::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }
            let datum = self.parse_datum()?;
            trace!("datum at line {}: {}", self.line, datum.key());
            doc.push(datum);

            if self.options.require_line_breaks {
                self.skip_inline_whitespace();
                if !matches!(self.peek_char(), None | Some('\n')) {
                    return Err(self.trailing_input());
                }
            }
        }
        debug!("parsed document with {} datums", doc.len());
        Ok(doc)
    }

    /// Parses one key followed by one value.
    ///
    /// # Errors
    ///
    /// Fails if the key is malformed or no value follows it.
    pub fn parse_datum(&mut self) -> Result<Datum> {
        let key = self.parse_key()?;
        if self.options.require_line_breaks {
            self.skip_inline_whitespace();
            if matches!(self.peek_char(), None | Some('\n')) {
                return Err(self.error(&format!("expected a value after key '{}'", key)));
            }
        }
        let value = self.parse_value()?;
        Ok(Datum::new(key, value))
    }

    /// Parses a dotted key and returns it unsplit.
    ///
    /// # Errors
    ///
    /// Unless [`ParseOptions::allow_empty_segments`] is set, an empty key or
    /// a key with an empty segment (`a..b`, `a.`, `.a`) is a syntax error.
    ///
    /// ```rust
    /// use serde_knot::Parser;
    ///
    /// assert_eq!(Parser::new(" a.b.c.d ").parse_key().unwrap(), "a.b.c.d");
    /// assert!(Parser::new("a..b").parse_key().is_err());
    /// ```
    pub fn parse_key(&mut self) -> Result<String> {
        self.skip_whitespace();
        let start = self.mark();
        let key = self.consume_while(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.');

        if !self.options.allow_empty_segments {
            if key.is_empty() {
                return Err(self.error_at(start, "expected a key"));
            }
            if key.split('.').any(str::is_empty) {
                return Err(self.error_at(start, &format!("empty segment in key '{}'", key)));
            }
        }
        Ok(key.to_string())
    }

    /// Parses any value: string, number, boolean or collection.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if no value starts at the current position.
    pub fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek_char() {
            Some('[') => Ok(Value::Collection(self.parse_collection()?)),
            _ => self.parse_scalar(),
        }
    }

    fn parse_scalar(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek_char() {
            Some('"') => Ok(Value::String(self.parse_string()?)),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => Ok(Value::Number(self.parse_number()?)),
            Some('t' | 'T' | 'f' | 'F') => Ok(Value::Boolean(self.parse_bool()?)),
            Some('[') => Err(self.error("nested collections are not supported")),
            None => Err(self.error("expected a value, found end of input")),
            Some(_) => Err(self.error(
                "expected a value (quoted string, number, true/false or [collection])",
            )),
        }
    }

    /// Parses a double-quoted string.
    ///
    /// A backslash includes the next character verbatim; no escape codes are
    /// interpreted.
    ///
    /// ```rust
    /// use serde_knot::Parser;
    ///
    /// let parsed = Parser::new(r#" "hello \"world\" \n" "#).parse_string().unwrap();
    /// assert_eq!(parsed, r#"hello "world" n"#);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if there is no opening quote or the closing quote is missing.
    pub fn parse_string(&mut self) -> Result<String> {
        self.skip_whitespace();
        let start = self.mark();
        if self.peek_char() != Some('"') {
            return Err(self.error("expected a quoted string"));
        }
        self.next_char();

        let mut result = String::new();
        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.next_char() {
                    Some(escaped) => result.push(escaped),
                    None => break,
                },
                other => result.push(other),
            }
        }
        Err(self.error_at(start, "unterminated string"))
    }

    /// Parses a number. The result is always `f64`.
    ///
    /// A fraction or exponent is only consumed when complete, so `1.` stops
    /// before the dot.
    ///
    /// # Errors
    ///
    /// Fails if no digit follows the optional minus sign.
    pub fn parse_number(&mut self) -> Result<f64> {
        self.skip_whitespace();
        let start = self.mark();

        if self.peek_char() == Some('-') {
            self.next_char();
        }
        if self.consume_while(|ch| ch.is_ascii_digit()).is_empty() {
            let err = self.error_at(start, "expected a number");
            self.reset(start);
            return Err(err);
        }
        if self.peek_char() == Some('.') && self.peek_nth(1).is_some_and(|ch| ch.is_ascii_digit())
        {
            self.next_char();
            self.consume_while(|ch| ch.is_ascii_digit());
        }
        if self.peek_char() == Some('e') {
            let digits_at = if self.peek_nth(1) == Some('-') { 2 } else { 1 };
            if self.peek_nth(digits_at).is_some_and(|ch| ch.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.next_char();
                }
                self.consume_while(|ch| ch.is_ascii_digit());
            }
        }

        let literal = &self.input[start.position..self.position];
        match literal.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            Ok(_) => Err(self.error_at(start, "number out of range")),
            Err(_) => Err(self.error_at(start, &format!("invalid number '{}'", literal))),
        }
    }

    /// Parses `true` or `false`, ignoring case.
    ///
    /// # Errors
    ///
    /// Fails if neither literal is at the current position.
    pub fn parse_bool(&mut self) -> Result<bool> {
        self.skip_whitespace();
        for (literal, value) in [("true", true), ("false", false)] {
            let matched = self
                .rest()
                .get(..literal.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(literal));
            if matched {
                for _ in 0..literal.len() {
                    self.next_char();
                }
                return Ok(value);
            }
        }
        Err(self.error("expected true or false"))
    }

    /// Parses a bracketed collection of scalars.
    ///
    /// ```rust
    /// use serde_knot::{Parser, Value};
    ///
    /// let items = Parser::new(r#"[1 "a" true]"#).parse_collection().unwrap();
    /// assert_eq!(items, vec![Value::Number(1.0), Value::from("a"), Value::Boolean(true)]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnterminatedCollection`] if the input ends before
    /// `]`, and a syntax error for nested collections, bare words, trailing
    /// commas, or separators mixed against [`SeparatorPolicy::Consistent`].
    pub fn parse_collection(&mut self) -> Result<Vec<Value>> {
        self.skip_whitespace();
        let open = self.mark();
        if self.peek_char() != Some('[') {
            return Err(self.error("expected '['"));
        }
        self.next_char();

        let unterminated = || Error::unterminated_collection(open.line, open.column);
        let mut items = Vec::new();
        let mut style: Option<Separator> = None;

        self.skip_whitespace();
        if self.peek_char() == Some(']') {
            self.next_char();
            return Ok(items);
        }

        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Err(unterminated());
            }
            items.push(self.parse_scalar()?);

            let before = self.position;
            let sep_at = self.mark();
            self.skip_whitespace();
            let separator = match self.peek_char() {
                None => return Err(unterminated()),
                Some(']') => {
                    self.next_char();
                    return Ok(items);
                }
                Some(',') => {
                    self.next_char();
                    self.skip_whitespace();
                    match self.peek_char() {
                        None => return Err(unterminated()),
                        Some(']') => return Err(self.error("expected a value after ','")),
                        Some(_) => Separator::Comma,
                    }
                }
                Some(_) if self.position > before => Separator::Whitespace,
                Some(_) => {
                    return Err(self.error("expected ',', whitespace or ']' after a value"));
                }
            };

            if self.options.separators == SeparatorPolicy::Consistent {
                match style {
                    None => style = Some(separator),
                    Some(first) if first != separator => {
                        return Err(self.error_at(
                            sep_at,
                            "mixed ',' and whitespace separators in one collection",
                        ));
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Parses a `|`-separated list of keys (extended grammar).
    ///
    /// Keys keep their dots.
    ///
    /// ```rust
    /// use serde_knot::{ParseOptions, Parser};
    ///
    /// let mut parser = Parser::with_options("light.sunrise | dark", ParseOptions::extended());
    /// assert_eq!(parser.parse_enum().unwrap(), vec!["light.sunrise", "dark"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when the parser uses [`GrammarVariant::Standard`], or when a key
    /// is malformed.
    pub fn parse_enum(&mut self) -> Result<Vec<String>> {
        if self.options.variant != GrammarVariant::Extended {
            return Err(self.error("the enum rule requires the extended grammar"));
        }
        let mut keys = vec![self.parse_key()?];
        loop {
            self.skip_whitespace();
            if self.peek_char() != Some('|') {
                break;
            }
            self.next_char();
            keys.push(self.parse_key()?);
        }
        Ok(keys)
    }
}
