//! Reader for the JavaScript array literal that carries search data.
//!
//! Generated search files look like `var searchData=\n[ ... ];`: a single
//! assignment of nested arrays holding single-quoted strings and integers.
//! The literal is read into a [`serde_json::Value`] so the table loader can
//! walk it the same way whether the input was JavaScript or plain JSON.

use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

/// Deepest array nesting accepted, matching serde_json's recursion limit.
const MAX_DEPTH: usize = 128;

/// Leading `var name =` of a generated file.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+[A-Za-z_$][\w$]*\s*=").expect("assignment regex")
});

/// A position-tagged failure while reading the literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    /// Byte offset into the original text.
    pub(crate) offset: usize,
    pub(crate) message: String,
}

impl SyntaxError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Reads a whole search-data document.
///
/// Accepts an optional `var <name> =` prefix and a trailing `;`; anything
/// after the literal other than whitespace is an error.
pub(crate) fn parse_document(text: &str) -> Result<Value, SyntaxError> {
    let start = ASSIGNMENT.find(text).map_or(0, |m| m.end());
    let mut reader = Reader {
        text,
        pos: start,
        depth: 0,
    };

    reader.skip_whitespace();
    let value = reader.value()?;
    reader.skip_whitespace();
    if reader.peek() == Some(';') {
        reader.pos += 1;
        reader.skip_whitespace();
    }
    if reader.pos < text.len() {
        return Err(SyntaxError::new(
            reader.pos,
            "unexpected trailing content after literal",
        ));
    }
    Ok(value)
}

struct Reader<'a> {
    text: &'a str,
    pos: usize,
    /// Arrays currently open.
    depth: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn value(&mut self) -> Result<Value, SyntaxError> {
        match self.peek() {
            Some('[') => self.array(),
            Some(q @ ('\'' | '"')) => self.string(q).map(Value::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some('t') if self.keyword("true") => Ok(Value::Bool(true)),
            Some('f') if self.keyword("false") => Ok(Value::Bool(false)),
            Some(c) => Err(SyntaxError::new(
                self.pos,
                format!("expected a string, number, boolean or array, found '{}'", c),
            )),
            None => Err(SyntaxError::new(self.pos, "unexpected end of input")),
        }
    }

    /// Consumes `word` if it stands alone at the cursor.
    fn keyword(&mut self, word: &str) -> bool {
        let rest = &self.text[self.pos..];
        let standalone = rest.strip_prefix(word).is_some_and(|after| {
            !after
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });
        if standalone {
            self.pos += word.len();
        }
        standalone
    }

    fn array(&mut self) -> Result<Value, SyntaxError> {
        let open = self.pos;
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::new(open, "nesting too deep"));
        }
        self.depth += 1;
        let items = self.array_items(open);
        self.depth -= 1;
        items
    }

    fn array_items(&mut self, open: usize) -> Result<Value, SyntaxError> {
        self.pos += 1;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.value()?);
            self.skip_whitespace();

            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(Value::Array(items)),
                Some(c) => {
                    return Err(SyntaxError::new(
                        self.pos - c.len_utf8(),
                        format!("expected ',' or ']', found '{}'", c),
                    ));
                }
                None => return Err(SyntaxError::new(open, "unterminated array")),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, SyntaxError> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();

        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escape_at = self.pos - 1;
                    match self.bump() {
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        Some('r') => out.push('\r'),
                        Some('b') => out.push('\u{8}'),
                        Some('f') => out.push('\u{c}'),
                        Some('0') => out.push('\0'),
                        Some('u') => out.push(self.unicode_escape(escape_at)?),
                        // \\ \' \" \/ and any other escaped character stand for themselves
                        Some(c) => out.push(c),
                        None => return Err(SyntaxError::new(open, "unterminated string")),
                    }
                }
                Some(c) => out.push(c),
                None => return Err(SyntaxError::new(open, "unterminated string")),
            }
        }
    }

    /// Reads the code unit after `\u`, joining a UTF-16 surrogate pair
    /// written as two consecutive escapes.
    fn unicode_escape(&mut self, escape_at: usize) -> Result<char, SyntaxError> {
        let mut code = self.hex_unit(escape_at)?;

        if (0xD800..=0xDBFF).contains(&code) {
            let low_at = self.pos;
            if !self.text[self.pos..].starts_with("\\u") {
                return Err(SyntaxError::new(escape_at, "unpaired surrogate escape"));
            }
            self.pos += 2;
            let low = self.hex_unit(low_at)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(SyntaxError::new(escape_at, "unpaired surrogate escape"));
            }
            code = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
        }

        char::from_u32(code)
            .ok_or_else(|| SyntaxError::new(escape_at, "escape is not a scalar value"))
    }

    fn hex_unit(&mut self, escape_at: usize) -> Result<u32, SyntaxError> {
        let digits = self
            .text
            .get(self.pos..self.pos + 4)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| SyntaxError::new(escape_at, "expected four hex digits after \\u"))?;
        self.pos += 4;
        u32::from_str_radix(digits, 16)
            .map_err(|_| SyntaxError::new(escape_at, "expected four hex digits after \\u"))
    }

    fn number(&mut self) -> Result<Value, SyntaxError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(SyntaxError::new(start, "expected digits"));
        }

        let mut fractional = false;
        if self.peek() == Some('.') {
            fractional = true;
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        let literal = &self.text[start..self.pos];
        let number = if fractional {
            literal.parse::<f64>().ok().and_then(Number::from_f64)
        } else {
            literal.parse::<i64>().ok().map(Number::from)
        };
        number
            .map(Value::Number)
            .ok_or_else(|| SyntaxError::new(start, format!("invalid number '{}'", literal)))
    }
}
