use std::iter::Peekable;

use tracing::{debug, trace};

use crate::{Atom, Document, Span, SyntaxError, Token, TokenType, Value, build, tokenize};

type Result<T> = std::result::Result<T, SyntaxError>;

/// How deeply `<...>` brackets and `=` pairs may nest by default
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for [parse_with]. The default is what [parse] uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
  /// Require `</name>` to repeat the tag's leading atom (or be `</>` if the
  /// tag doesn't start with one). Off by default: closing tags are
  /// otherwise not looked at.
  pub strict_close_tags: bool,
  /// Each `<` and each `=` inside another one counts as a level. Going past
  /// this fails with [SyntaxError::TooDeep] instead of exhausting the stack.
  pub max_depth: usize,
}

impl Default for ParseOptions {
  fn default() -> Self {
    ParseOptions { strict_close_tags: false, max_depth: DEFAULT_MAX_DEPTH }
  }
}

impl ParseOptions {
  pub fn strict_close_tags(mut self, strict: bool) -> Self {
    self.strict_close_tags = strict;
    self
  }

  pub fn max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }
}

/// Parse a whole input into its top-level values
pub fn parse(text: &str) -> Result<Document> {
  parse_with(text, &ParseOptions::default())
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Document> {
  debug!(len = text.len(), ?options, "parsing");
  let tokens = tokenize(text)?;
  trace!(tokens = tokens.len(), "tokenized");

  let mut parser = Parser { text, tokens: tokens.into_iter().peekable(), options, depth: 0 };
  let doc = parser.parse_document()?;

  debug!(values = doc.len(), "parsed");
  Ok(doc)
}

struct Parser<'a, I>
where
  I: Iterator<Item = Token>,
{
  text: &'a str,
  tokens: Peekable<I>,
  options: &'a ParseOptions,
  /// Brackets and pairs currently open
  depth: usize,
}

impl<'a, I> Parser<'a, I>
where
  I: Iterator<Item = Token>,
{
  /// `document` at the top level, which ends at EOF rather than a closing tag
  fn parse_document(&mut self) -> Result<Document> {
    let mut values = Vec::new();
    while self.tokens.peek().is_some() {
      values.push(self.parse_expr()?);
    }
    Ok(build::document(values))
  }

  /// `document` inside a tag body. Also returns the closing marker's span.
  fn parse_body(&mut self, opener: Span) -> Result<(Document, Span)> {
    let mut values = Vec::new();
    loop {
      if let Some(close) = self.consume_if(|tok| tok.token_type == TokenType::Close) {
        return Ok((build::document(values), close.span));
      }
      if self.tokens.peek().is_none() {
        return Err(SyntaxError::UnexpectedEof {
          expected: "closing tag".to_string(),
          span: opener,
        });
      }
      values.push(self.parse_expr()?);
    }
  }

  fn parse_expr(&mut self) -> Result<Value> {
    let left = self.parse_primary()?;
    if let Some(eq) = self.consume_if(|tok| tok.token_type == TokenType::Equals) {
      // Right associative: a=b=c is a=(b=c)
      let right = self.nested(eq.span, Self::parse_expr)?;
      return Ok(build::pair(left, right));
    }
    Ok(left)
  }

  fn parse_primary(&mut self) -> Result<Value> {
    let Some(tok) = self.tokens.next() else {
      return Err(self.unexpected_eof("expression"));
    };
    let contents = self.get_span_contents(tok.span);
    match tok.token_type {
      TokenType::Num => build::number(contents, tok.span),
      TokenType::Str => build::string(contents, tok.span),
      TokenType::Ident => Ok(build::atom(contents)),
      TokenType::Lt => self.nested(tok.span, |parser| parser.parse_bracketed(tok.span)),
      _ => Err(self.unexpected(&tok, "expression")),
    }
  }

  /// Everything after a `<`: a list if it ends in `/>`, a tag if it ends in `>`
  fn parse_bracketed(&mut self, opener: Span) -> Result<Value> {
    let mut props = Vec::new();
    loop {
      match self.tokens.peek().map(|tok| tok.token_type) {
        Some(TokenType::SlashGt) => {
          let end = self.tokens.next().map(|tok| tok.span.end).unwrap_or(opener.end);
          return build::list(props, Span::new(opener.start, end));
        }
        Some(TokenType::Gt) => {
          let _ = self.tokens.next();
          let (body, close) = self.parse_body(opener)?;
          if self.options.strict_close_tags {
            self.check_close_tag(&props, close)?;
          }
          return Ok(build::tag(props, body));
        }
        Some(_) => props.push(self.parse_expr()?),
        None => return Err(self.unexpected_eof("`>` or `/>`")),
      }
    }
  }

  /// Run `parse` one level deeper, failing at `span` if that's past the limit
  fn nested<T>(&mut self, span: Span, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
    if self.depth >= self.options.max_depth {
      return Err(SyntaxError::TooDeep { limit: self.options.max_depth, span });
    }
    self.depth += 1;
    let res = parse(self);
    self.depth -= 1;
    res
  }

  fn check_close_tag(&self, props: &[Value], close: Span) -> Result<()> {
    let found = self.text[close.start + "</".len()..close.end - ">".len()].trim();
    let expected = props.first().and_then(Value::as_atom).map(Atom::name).unwrap_or_default();
    if found == expected {
      Ok(())
    } else {
      Err(SyntaxError::MismatchedCloseTag {
        expected: expected.to_string(),
        found: found.to_string(),
        span: close,
      })
    }
  }

  /// Consume and return the next token if it matches the given predicate
  fn consume_if(&mut self, pred: impl FnOnce(&Token) -> bool) -> Option<Token> {
    self.tokens.next_if(pred)
  }

  fn unexpected(&self, tok: &Token, expected: &str) -> SyntaxError {
    let found = match tok.token_type {
      TokenType::Lt | TokenType::Gt | TokenType::SlashGt | TokenType::Equals => {
        tok.token_type.describe().to_string()
      }
      _ => format!("{} `{}`", tok.token_type.describe(), self.get_span_contents(tok.span)),
    };
    SyntaxError::UnexpectedToken { found, expected: expected.to_string(), span: tok.span }
  }

  fn unexpected_eof(&self, expected: &str) -> SyntaxError {
    let end = self.text.len();
    SyntaxError::UnexpectedEof { expected: expected.to_string(), span: Span::new(end, end) }
  }

  fn get_span_contents(&self, span: Span) -> &'a str {
    &self.text[span.start..span.end]
  }
}
