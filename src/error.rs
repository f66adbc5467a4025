use thiserror::Error;

/// Byte range of a token or failure site in the source text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
  pub start: usize,
  pub end: usize,
}

impl Span {
  pub fn new(start: usize, end: usize) -> Self {
    Span { start, end }
  }
}

/// 1-based line and column (in chars) of a byte offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

/// The only way a parse can fail. No partial tree is ever returned alongside it.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SyntaxError {
  #[error("unexpected character {found:?}")]
  UnexpectedChar { found: char, span: Span },
  #[error("string literal is missing its closing quote")]
  UnterminatedString { span: Span },
  #[error("invalid escape sequence {escape:?} in string literal")]
  InvalidEscape { escape: String, span: Span },
  #[error("comment is missing its closing `-->` on the same line")]
  UnterminatedComment { span: Span },
  #[error("closing tag is missing its `>`")]
  UnterminatedCloseTag { span: Span },
  #[error("invalid number literal {text:?}")]
  InvalidNumber { text: String, span: Span },
  #[error("unexpected {found}, expected {expected}")]
  UnexpectedToken { found: String, expected: String, span: Span },
  #[error("unexpected end of input, expected {expected}")]
  UnexpectedEof { expected: String, span: Span },
  #[error("list `< ... />` needs at least one element")]
  EmptyList { span: Span },
  #[error("closing tag `</{found}>` does not match `</{expected}>`")]
  MismatchedCloseTag { expected: String, found: String, span: Span },
  #[error("nesting is deeper than the limit of {limit}")]
  TooDeep { limit: usize, span: Span },
}

impl SyntaxError {
  pub fn span(&self) -> Span {
    match self {
      SyntaxError::UnexpectedChar { span, .. }
      | SyntaxError::UnterminatedString { span }
      | SyntaxError::InvalidEscape { span, .. }
      | SyntaxError::UnterminatedComment { span }
      | SyntaxError::UnterminatedCloseTag { span }
      | SyntaxError::InvalidNumber { span, .. }
      | SyntaxError::UnexpectedToken { span, .. }
      | SyntaxError::UnexpectedEof { span, .. }
      | SyntaxError::EmptyList { span }
      | SyntaxError::MismatchedCloseTag { span, .. }
      | SyntaxError::TooDeep { span, .. } => *span,
    }
  }

  /// Where in `text` (the text that was parsed) this error starts
  pub fn position(&self, text: &str) -> Position {
    let offset = self.span().start.min(text.len());
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position { line, column: before[line_start..].chars().count() + 1 }
  }
}
