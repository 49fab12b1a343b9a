//! Contracts of the host editor this crate decorates.
//!
//! The decoration engine never talks to a concrete editor, parser, or theme
//! implementation. Everything it consumes arrives through the traits below,
//! which the embedding host implements.

use std::{
  fmt,
  sync::Arc,
};

use futures_util::future::BoxFuture;
use tokio::sync::mpsc;
use url::Url;

use crate::{
  position::{
    Position,
    Range,
  },
  token::PromptToken,
};

/// Identifier the host assigns to a registered decoration.
///
/// Opaque: the engine stores and hands these back verbatim, it never
/// constructs or inspects them beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationId(u64);

impl DecorationId {
  pub const fn new(raw: u64) -> Self {
    Self(raw)
  }

  pub const fn raw(&self) -> u64 {
    self.0
  }
}

/// Host-assigned identifier of one live editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(u64);

impl EditorId {
  pub const fn new(raw: u64) -> Self {
    Self(raw)
  }
}

impl fmt::Display for EditorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "editor-{}", self.0)
  }
}

/// Style payload attached to a decoration when it is registered or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationOptions {
  pub description:       &'static str,
  pub class_name:        &'static str,
  pub inline_class_name: &'static str,
  pub hover_message:     Option<&'static str>,
  pub whole_line:        bool,
}

/// Accessor handed out by [`HostEditor::change_decorations`]. All decoration
/// mutations for an editor go through one of these, inside one transaction.
pub trait DecorationAccessor {
  fn add_decoration(&mut self, range: Range, options: DecorationOptions) -> DecorationId;
  fn change_decoration_options(&mut self, id: DecorationId, options: DecorationOptions);
  fn remove_decoration(&mut self, id: DecorationId);
}

/// A plain text document model.
pub trait TextModel: Send + Sync {
  fn uri(&self) -> &Url;
}

/// The model backing an editor. Diff editors carry a composite model and are
/// never decorated.
#[derive(Clone)]
pub enum EditorModel {
  Text(Arc<dyn TextModel>),
  Diff {
    original: Arc<dyn TextModel>,
    modified: Arc<dyn TextModel>,
  },
}

impl EditorModel {
  pub fn as_text(&self) -> Option<&Arc<dyn TextModel>> {
    match self {
      EditorModel::Text(model) => Some(model),
      EditorModel::Diff { .. } => None,
    }
  }
}

/// One editor instance of the host.
pub trait HostEditor: Send + Sync {
  fn id(&self) -> EditorId;

  fn model(&self) -> Option<EditorModel>;

  /// Current primary cursor position, `None` when the editor has no cursor
  /// (e.g. it lost focus before ever placing one).
  fn cursor_position(&self) -> Option<Position>;

  /// Run `change` inside a scoped decoration transaction. Additions, removals
  /// and option changes performed through the accessor become visible to
  /// renderers atomically when the closure returns.
  fn change_decorations(&self, change: &mut dyn FnMut(&mut dyn DecorationAccessor));
}

/// Notifications about the host's editor set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
  ActiveEditorChanged,
}

/// The host's view over its open editors.
pub trait EditorService: Send + Sync {
  fn active_editor(&self) -> Option<Arc<dyn HostEditor>>;

  fn visible_editors(&self) -> Vec<Arc<dyn HostEditor>>;

  /// Subscribe to editor set changes. Each call returns a fresh channel.
  fn subscribe(&self) -> mpsc::Receiver<EditorEvent>;
}

/// Notifications emitted by a running prompt parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserEvent {
  /// A re-parse produced a new token stream.
  Updated,
  /// The parser shut down; dependents should tear themselves down too.
  Disposed,
}

/// A prompt syntax parser attached to one document model.
pub trait PromptParser: Send + Sync {
  fn uri(&self) -> &Url;

  /// Tokens of the latest parse result, in source order.
  fn tokens(&self) -> Vec<PromptToken>;

  /// Subscribe to parser notifications. Each call returns a fresh channel.
  fn subscribe(&self) -> mpsc::Receiver<ParserEvent>;

  /// Resolves once all parse work in flight for the current update cycle has
  /// completed, so callers never observe a partially updated token stream.
  fn settled(&self) -> BoxFuture<'_, ()>;

  fn start(&self);
}

/// Hands out (possibly shared) parser instances per document model.
pub trait ParserService: Send + Sync {
  fn parser_for(&self, model: &Arc<dyn TextModel>) -> Arc<dyn PromptParser>;
}
