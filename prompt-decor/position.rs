use std::fmt;

/// This is a single point in a text buffer.
/// 0-indexed as all things should be.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl Position {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn is_zero(&self) -> bool {
    self.row == 0 && self.col == 0
  }
}

impl From<(usize, usize)> for Position {
  fn from(value: (usize, usize)) -> Self {
    Position::new(value.0, value.1)
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.row, self.col)
  }
}

/// A span of text between two positions, inclusive on both ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub start: Position,
  pub end:   Position,
}

impl Range {
  pub fn new(start: impl Into<Position>, end: impl Into<Position>) -> Self {
    let start = start.into();
    let end = end.into();
    debug_assert!(start <= end, "range start must not come after its end");
    Self { start, end }
  }

  /// Whether `pos` falls within this range. Both endpoints are included,
  /// so a cursor sitting exactly on the first or last character counts.
  pub fn contains_position(&self, pos: Position) -> bool {
    self.start <= pos && pos <= self.end
  }
}

impl fmt::Display for Range {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}-{}]", self.start, self.end)
  }
}
