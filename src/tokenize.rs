use std::{iter::Peekable, str::CharIndices};

use crate::error::{Span, SyntaxError};

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
  pub token_type: TokenType,
  pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
  /// `<`
  Lt,
  /// `>`
  Gt,
  /// `/>`
  SlashGt,
  /// `</` through the next `>`, whatever is in between
  Close,
  /// `=`
  Equals,
  /// Optionally signed decimal, e.g. `-1.5e3`
  Num,
  /// Double-quoted, still escaped
  Str,
  Ident,
}

impl TokenType {
  /// How the token is named in error messages
  pub fn describe(self) -> &'static str {
    match self {
      TokenType::Lt => "`<`",
      TokenType::Gt => "`>`",
      TokenType::SlashGt => "`/>`",
      TokenType::Close => "closing tag",
      TokenType::Equals => "`=`",
      TokenType::Num => "number",
      TokenType::Str => "string",
      TokenType::Ident => "identifier",
    }
  }
}

pub type TokenizeResult<T> = Result<T, SyntaxError>;

/// Split `text` into tokens. Whitespace and `<!-- ... -->` comments are dropped.
pub fn tokenize(text: &str) -> TokenizeResult<Vec<Token>> {
  let mut toks = Vec::new();

  let mut chars = text.char_indices().peekable();
  while let Some((ind, c)) = chars.next() {
    let rest = &text[ind..];
    let (token_type, end) = match c {
      ' ' | '\t' | '\n' | '\r' | '\x0c' => continue,
      '<' if rest.starts_with("<!--") => {
        let end = comment_end(text, ind)?;
        skip_to(&mut chars, end);
        continue;
      }
      '<' if rest.starts_with("</") => match rest.find('>') {
        Some(gt) => (TokenType::Close, ind + gt + 1),
        None => {
          return Err(SyntaxError::UnterminatedCloseTag { span: Span::new(ind, text.len()) });
        }
      },
      '<' => (TokenType::Lt, ind + 1),
      '>' => (TokenType::Gt, ind + 1),
      '/' if rest.starts_with("/>") => (TokenType::SlashGt, ind + 2),
      '=' => (TokenType::Equals, ind + 1),
      '"' => (TokenType::Str, string_end(text, ind)?),
      '+' | '-' | '.' | '0'..='9' => match number_end(text, ind) {
        Some(end) => (TokenType::Num, end),
        None => return Err(unexpected_char(c, ind)),
      },
      c if c == '_' || c.is_ascii_alphabetic() => (TokenType::Ident, ident_end(text, ind)),
      _ => return Err(unexpected_char(c, ind)),
    };
    toks.push(Token { token_type, span: Span::new(ind, end) });
    skip_to(&mut chars, end);
  }

  Ok(toks)
}

fn unexpected_char(found: char, ind: usize) -> SyntaxError {
  SyntaxError::UnexpectedChar { found, span: Span::new(ind, ind + found.len_utf8()) }
}

/// Advance past every char that starts before byte offset `end`
fn skip_to(chars: &mut Peekable<CharIndices>, end: usize) {
  while chars.peek().is_some_and(|(ind, _)| *ind < end) {
    let _ = chars.next();
  }
}

/// A comment runs from `<!--` to the last `-->` on the same line
fn comment_end(text: &str, start: usize) -> TokenizeResult<usize> {
  let line = text[start..].split('\n').next().unwrap_or_default();
  match line["<!--".len()..].rfind("-->") {
    Some(ind) => Ok(start + "<!--".len() + ind + "-->".len()),
    None => Err(SyntaxError::UnterminatedComment { span: Span::new(start, start + line.len()) }),
  }
}

/// A string must close on the line it starts on
fn string_end(text: &str, start: usize) -> TokenizeResult<usize> {
  let unterminated = |end: usize| SyntaxError::UnterminatedString { span: Span::new(start, end) };
  let mut chars = text[start + 1..].char_indices();
  while let Some((ind, c)) = chars.next() {
    match c {
      '\\' => {
        if let Some((esc_ind, '\n')) = chars.next() {
          return Err(unterminated(start + 1 + esc_ind));
        }
      }
      '\n' => return Err(unterminated(start + 1 + ind)),
      '"' => return Ok(start + 1 + ind + 1),
      _ => {}
    }
  }
  Err(unterminated(text.len()))
}

/// `[+-]? (digits "." digits? | "." digits | digits) ([eE] [+-]? digits)?`
///
/// Returns `None` if there is no number at `start` (e.g. a lone `-`).
fn number_end(text: &str, start: usize) -> Option<usize> {
  let bytes = text.as_bytes();
  let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

  let mut pos = start;
  if matches!(bytes.get(pos), Some(b'+' | b'-')) {
    pos += 1;
  }
  let int_len = digits(pos);
  pos += int_len;
  if bytes.get(pos) == Some(&b'.') {
    let frac_len = digits(pos + 1);
    if int_len == 0 && frac_len == 0 {
      return None;
    }
    pos += 1 + frac_len;
  } else if int_len == 0 {
    return None;
  }

  // An exponent marker without digits belongs to whatever comes next
  if matches!(bytes.get(pos), Some(b'e' | b'E')) {
    let mut exp = pos + 1;
    if matches!(bytes.get(exp), Some(b'+' | b'-')) {
      exp += 1;
    }
    let exp_len = digits(exp);
    if exp_len > 0 {
      pos = exp + exp_len;
    }
  }
  Some(pos)
}

fn ident_end(text: &str, start: usize) -> usize {
  text[start..]
    .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
    .map(|len| start + len)
    .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;
  use super::TokenType::*;

  fn lex(text: &str) -> Vec<(TokenType, &str)> {
    tokenize(text)
      .unwrap()
      .into_iter()
      .map(|tok| (tok.token_type, &text[tok.span.start..tok.span.end]))
      .collect()
  }

  #[rstest]
  #[case("", vec![])]
  #[case("  \t\n \r\n\x0c", vec![])]
  #[case("foo_1 _x", vec![(Ident, "foo_1"), (Ident, "_x")])]
  #[case("1 -2 +3.5 .5 6. 1e10 2.5E-3", vec![
    (Num, "1"), (Num, "-2"), (Num, "+3.5"), (Num, ".5"), (Num, "6."), (Num, "1e10"), (Num, "2.5E-3"),
  ])]
  #[case("1e", vec![(Num, "1"), (Ident, "e")])]
  #[case("12abc", vec![(Num, "12"), (Ident, "abc")])]
  #[case(r#""a\"b" "c""#, vec![(Str, r#""a\"b""#), (Str, r#""c""#)])]
  #[case("<a/>", vec![(Lt, "<"), (Ident, "a"), (SlashGt, "/>")])]
  #[case("<a>x</a>", vec![(Lt, "<"), (Ident, "a"), (Gt, ">"), (Ident, "x"), (Close, "</a>")])]
  #[case("</ whatever \n at all>", vec![(Close, "</ whatever \n at all>")])]
  #[case("k=v", vec![(Ident, "k"), (Equals, "="), (Ident, "v")])]
  #[case("<!--c--><a/>", vec![(Lt, "<"), (Ident, "a"), (SlashGt, "/>")])]
  #[case("<!-- a --> b -->\nc", vec![(Ident, "c")])]
  #[case(r#""<!-- not a comment -->""#, vec![(Str, r#""<!-- not a comment -->""#)])]
  fn test_tokenize_happy(#[case] text: &str, #[case] expected: Vec<(TokenType, &str)>) {
    assert_eq!(lex(text), expected);
  }

  #[rstest]
  #[case("\"abc", SyntaxError::UnterminatedString { span: Span::new(0, 4) })]
  #[case("\"abc\\\"", SyntaxError::UnterminatedString { span: Span::new(0, 6) })]
  #[case("a <!-- oops\nb", SyntaxError::UnterminatedComment { span: Span::new(2, 11) })]
  #[case("<a></a", SyntaxError::UnterminatedCloseTag { span: Span::new(3, 6) })]
  #[case("a - b", SyntaxError::UnexpectedChar { found: '-', span: Span::new(2, 3) })]
  #[case("a / b", SyntaxError::UnexpectedChar { found: '/', span: Span::new(2, 3) })]
  #[case("é", SyntaxError::UnexpectedChar { found: 'é', span: Span::new(0, 2) })]
  #[case("a\u{a0}b", SyntaxError::UnexpectedChar { found: '\u{a0}', span: Span::new(1, 3) })]
  #[case("a\u{2028}b", SyntaxError::UnexpectedChar { found: '\u{2028}', span: Span::new(1, 4) })]
  #[case("\"ab\ncd\"", SyntaxError::UnterminatedString { span: Span::new(0, 3) })]
  #[case("\"ab\\\ncd\"", SyntaxError::UnterminatedString { span: Span::new(0, 4) })]
  fn test_tokenize_error(#[case] text: &str, #[case] expected: SyntaxError) {
    assert_eq!(tokenize(text), Err(expected));
  }
}
