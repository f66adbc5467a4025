use serde::{Deserialize, Serialize};

/// A bare identifier such as `foo` in `<foo/>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atom(String);

impl Atom {
  pub fn new(name: impl Into<String>) -> Self {
    Atom(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

/// Every bracketed construct: lists (`<a b/>`), tags (`<a>...</a>`) and
/// pairs (`k=v`).
///
/// Equality is structural over both sequences, in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
  props: Vec<Value>,
  children: Vec<Value>,
}

impl Tag {
  pub fn new(props: Vec<Value>, children: Vec<Value>) -> Self {
    Tag { props, children }
  }

  /// `<></>`
  pub fn empty() -> Self {
    Tag::default()
  }

  /// A tag with no body, as produced by `<a b c/>`
  pub fn list(props: Vec<Value>) -> Self {
    Tag::new(props, Vec::new())
  }

  /// `key=value` is stored as the list `<pair key value/>`
  pub fn pair(key: Value, value: Value) -> Self {
    Tag::list(vec![Value::Atom(Atom::new(PAIR)), key, value])
  }

  /// Everything between `<` and `>` (or `/>`)
  pub fn props(&self) -> &[Value] {
    &self.props
  }

  /// Everything between `>` and the closing tag
  pub fn children(&self) -> &[Value] {
    &self.children
  }

  pub fn is_empty(&self) -> bool {
    self.props.is_empty() && self.children.is_empty()
  }

  /// The tag's name, if its first prop is an atom
  pub fn head(&self) -> Option<&Atom> {
    self.props.first().and_then(Value::as_atom)
  }

  /// The key and value if this has the shape built by [Tag::pair]
  pub fn as_pair(&self) -> Option<(&Value, &Value)> {
    match (self.props.as_slice(), self.children.is_empty()) {
      ([Value::Atom(head), key, value], true) if head.name() == PAIR => Some((key, value)),
      _ => None,
    }
  }

  pub fn into_parts(self) -> (Vec<Value>, Vec<Value>) {
    (self.props, self.children)
  }
}

const PAIR: &str = "pair";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
  Num(f64),
  Str(String),
  Atom(Atom),
  Tag(Tag),
}

impl Value {
  pub fn as_num(&self) -> Option<f64> {
    match self {
      Value::Num(val) => Some(*val),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::Str(val) => Some(val),
      _ => None,
    }
  }

  pub fn as_atom(&self) -> Option<&Atom> {
    match self {
      Value::Atom(atom) => Some(atom),
      _ => None,
    }
  }

  pub fn as_tag(&self) -> Option<&Tag> {
    match self {
      Value::Tag(tag) => Some(tag),
      _ => None,
    }
  }
}

impl From<f64> for Value {
  fn from(val: f64) -> Self {
    Value::Num(val)
  }
}

impl From<String> for Value {
  fn from(val: String) -> Self {
    Value::Str(val)
  }
}

impl From<&str> for Value {
  fn from(val: &str) -> Self {
    Value::Str(val.to_string())
  }
}

impl From<Atom> for Value {
  fn from(atom: Atom) -> Self {
    Value::Atom(atom)
  }
}

impl From<Tag> for Value {
  fn from(tag: Tag) -> Self {
    Value::Tag(tag)
  }
}

/// The values of a whole input, or of one tag body
pub type Document = Vec<Value>;
