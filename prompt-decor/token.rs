use std::fmt;

use crate::position::Range;

/// Kinds of prompt syntax recognized by the external parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TokenKind {
  /// A `---` delimited front matter header block at the top of the file.
  FrontMatterHeader,
  /// An inline `@mention` reference.
  AtMention,
}

/// A parsed, range-tagged unit of recognized prompt syntax.
///
/// Tokens are produced by the parser and owned by its latest parse result;
/// decorations only ever hold copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptToken {
  pub kind:  TokenKind,
  pub range: Range,
  /// Raw source text covered by the token.
  pub text:  String,
}

impl PromptToken {
  pub fn new(kind: TokenKind, range: Range, text: impl Into<String>) -> Self {
    Self {
      kind,
      range,
      text: text.into(),
    }
  }
}

impl fmt::Display for PromptToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}{}", self.kind, self.range)
  }
}
