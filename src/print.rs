use std::fmt;

use crate::{Atom, Tag, Value};

const INDENT: &str = "    ";

/// Render a value in canonical form. Parsing the result gives back an equal value.
pub fn print(val: &Value) -> String {
  let mut buf = String::new();
  print_impl(val, 0, &mut buf);
  buf
}

/// Render top-level values one after another, separated by newlines
pub fn print_document(doc: &[Value]) -> String {
  doc.iter().map(print).collect::<Vec<_>>().join("\n")
}

/// `depth` is how far lines after the first one must be indented. The first
/// line is placed by the caller.
fn print_impl(val: &Value, depth: usize, buf: &mut String) {
  match val {
    // Debug keeps a `.0` on integral values and never loses precision
    Value::Num(val) => buf.push_str(&format!("{val:?}")),
    Value::Str(val) => print_str(val, buf),
    Value::Atom(atom) => buf.push_str(atom.name()),
    Value::Tag(tag) => print_tag(tag, depth, buf),
  }
}

fn print_str(val: &str, buf: &mut String) {
  buf.push('"');
  for c in val.chars() {
    match c {
      '\\' => buf.push_str("\\\\"),
      '\n' => buf.push_str("\\n"),
      '\r' => buf.push_str("\\r"),
      '\t' => buf.push_str("\\t"),
      '"' => buf.push_str("\\\""),
      // Control characters are all below U+00A0
      c if c.is_control() => buf.push_str(&format!("\\x{:02x}", u32::from(c))),
      _ => buf.push(c),
    }
  }
  buf.push('"');
}

fn print_tag(tag: &Tag, depth: usize, buf: &mut String) {
  if tag.is_empty() {
    buf.push_str("<></>");
    return;
  }

  buf.push('<');
  for (i, prop) in tag.props().iter().enumerate() {
    if i > 0 {
      buf.push(' ');
    }
    print_impl(prop, depth, buf);
  }

  if tag.children().is_empty() {
    buf.push_str(" />");
    return;
  }

  buf.push('>');
  for child in tag.children() {
    newline(depth + 1, buf);
    print_impl(child, depth + 1, buf);
  }
  newline(depth, buf);
  buf.push_str("</");
  if let Some(head) = tag.head() {
    buf.push_str(head.name());
  }
  buf.push('>');
}

fn newline(depth: usize, buf: &mut String) {
  buf.push('\n');
  for _ in 0..depth {
    buf.push_str(INDENT);
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&print(self))
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut buf = String::new();
    print_tag(self, 0, &mut buf);
    f.write_str(&buf)
  }
}

impl fmt::Display for Atom {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
