//! Reductions from matched productions to tree values.
//!
//! The parser calls exactly one of these per production it recognizes, bottom
//! up, so a value is complete by the time it's handed to its parent.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::{Atom, Document, Span, SyntaxError, Tag, Value};

type Result<T> = std::result::Result<T, SyntaxError>;

/// `SIGNED_NUMBER`. Integral or not, every number becomes an `f64`.
///
/// Literals too large for an `f64` are rejected rather than becoming infinity,
/// which has no literal form to print back.
pub fn number(lexeme: &str, span: Span) -> Result<Value> {
  match lexeme.parse::<f64>() {
    Ok(val) if val.is_finite() => Ok(Value::Num(val)),
    _ => Err(SyntaxError::InvalidNumber { text: lexeme.to_string(), span }),
  }
}

/// `ESCAPED_STRING`, decoded. `literal` still has its surrounding quotes.
pub fn string(literal: &str, span: Span) -> Result<Value> {
  let inner = &literal[1..literal.len() - 1];
  unescape(inner, span.start + 1).map(Value::Str)
}

pub fn atom(ident: &str) -> Value {
  Value::Atom(Atom::new(ident))
}

/// `expr "=" expr`
pub fn pair(key: Value, value: Value) -> Value {
  Value::Tag(Tag::pair(key, value))
}

/// `"<" expr+ "/>"`
pub fn list(props: Vec<Value>, span: Span) -> Result<Value> {
  if props.is_empty() {
    return Err(SyntaxError::EmptyList { span });
  }
  Ok(Value::Tag(Tag::list(props)))
}

/// `"<" expr* ">" document closeMarker`. The closing marker never gets here.
pub fn tag(props: Vec<Value>, body: Document) -> Value {
  Value::Tag(Tag::new(props, body))
}

pub fn document(values: Vec<Value>) -> Document {
  values
}

/// Decode backslash escapes. `offset` is where `inner` starts in the source,
/// for error spans.
fn unescape(inner: &str, offset: usize) -> Result<String> {
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.char_indices().peekable();

  while let Some((ind, c)) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    let invalid = |end: usize| SyntaxError::InvalidEscape {
      escape: inner[ind..end].to_string(),
      span: Span::new(offset + ind, offset + end),
    };
    let Some((esc_ind, esc)) = chars.next() else {
      return Err(invalid(inner.len()));
    };
    let esc_end = esc_ind + esc.len_utf8();
    match esc {
      '\\' => out.push('\\'),
      '"' => out.push('"'),
      '\'' => out.push('\''),
      'n' => out.push('\n'),
      'r' => out.push('\r'),
      't' => out.push('\t'),
      'a' => out.push('\x07'),
      'b' => out.push('\x08'),
      'f' => out.push('\x0c'),
      'v' => out.push('\x0b'),
      '0'..='7' => {
        let mut code = esc.to_digit(8).unwrap_or_default();
        for _ in 0..2 {
          match chars.peek().and_then(|(_, c)| c.to_digit(8)) {
            Some(digit) => {
              code = code * 8 + digit;
              let _ = chars.next();
            }
            None => break,
          }
        }
        let end = chars.peek().map(|(i, _)| *i).unwrap_or(inner.len());
        out.push(char::from_u32(code).ok_or_else(|| invalid(end))?);
      }
      'x' | 'u' | 'U' => {
        let len = match esc {
          'x' => 2,
          'u' => 4,
          _ => 8,
        };
        let (code, end) = hex_code(&mut chars, esc_end, len);
        out.push(code.and_then(char::from_u32).ok_or_else(|| invalid(end))?);
      }
      // Unknown escapes are kept as written
      other => {
        out.push('\\');
        out.push(other);
      }
    }
  }

  Ok(out)
}

/// Read exactly `len` hex digits. Also returns where the digits stopped, for
/// error reporting.
fn hex_code(chars: &mut Peekable<CharIndices>, start: usize, len: usize) -> (Option<u32>, usize) {
  let mut code = 0;
  let mut end = start;
  for _ in 0..len {
    match chars.peek().and_then(|(ind, c)| c.to_digit(16).map(|digit| (*ind, digit))) {
      Some((ind, digit)) => {
        code = code * 16 + digit;
        end = ind + 1;
        let _ = chars.next();
      }
      None => return (None, end),
    }
  }
  (Some(code), end)
}
