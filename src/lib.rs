//! Parser and canonical printer for a small language that mixes XML-style
//! tags with Lisp-style atoms:
//!
//! ```text
//! <!-- comments run to the end of the line -->
//! <point x=1 y=2.5 />
//! <note "hello" lang=en>
//!     <b "world"/> 42
//! </note>
//! ```
//!
//! Lists, tags and `key=value` pairs all parse to a [Tag]. [print] turns any
//! [Value] back into text that parses to an equal value.

mod build;
mod error;
mod parse;
mod print;
pub mod tokenize;
mod tree;

pub use error::{Position, Span, SyntaxError};
pub use parse::{DEFAULT_MAX_DEPTH, ParseOptions, parse, parse_with};
pub use print::{print, print_document};
pub use tokenize::{Token, TokenType, tokenize};
pub use tree::{Atom, Document, Tag, Value};
