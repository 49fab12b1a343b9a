//! Per-editor prompt decorator.
//!
//! A [`PromptDecorator`] keeps one editor's decoration set consistent with
//! the latest parse result and the current cursor position. It runs two
//! background tasks: a cursor poll that propagates position changes to every
//! decoration, and an update loop that fully regenerates the decoration set
//! after each parser update has settled.

use std::{
  mem,
  sync::{
    Arc,
    Weak,
    atomic::{
      AtomicBool,
      Ordering,
    },
  },
};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::{
  sync::{
    mpsc,
    oneshot,
  },
  task::JoinHandle,
  time::{
    self,
    Duration,
    MissedTickBehavior,
  },
};

use crate::{
  decorations::{
    ReactiveDecoration,
    variant_for,
  },
  host::{
    HostEditor,
    ParserEvent,
    ParserService,
    PromptParser,
  },
  position::Position,
};

/// Period of the cursor position poll. The host offers no push notification
/// for cursor movement, so the decorator samples the position instead.
pub const CURSOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecoratorError {
  #[error("editor has no model")]
  MissingModel,
  #[error("editor model is not a plain text model")]
  NotATextModel,
}

/// Prompt syntax decorator for a single editor.
///
/// Must be constructed inside a tokio runtime. The decorator stays `active`
/// until [`dispose`](Self::dispose) is called, the parser announces its own
/// disposal, or the last reference is dropped; disposal is terminal and
/// removes every decoration this instance ever registered.
pub struct PromptDecorator {
  editor:             Arc<dyn HostEditor>,
  parser:             Arc<dyn PromptParser>,
  decorations:        Arc<Mutex<Vec<ReactiveDecoration>>>,
  disposed:           Arc<AtomicBool>,
  disposal_listeners: Mutex<Vec<oneshot::Sender<()>>>,
  tasks:              Mutex<Vec<JoinHandle<()>>>,
}

impl PromptDecorator {
  pub fn new(
    editor: Arc<dyn HostEditor>,
    parsers: &dyn ParserService,
  ) -> Result<Arc<Self>, DecoratorError> {
    let model = editor.model().ok_or(DecoratorError::MissingModel)?;
    // Diff editors carry a composite model and are filtered out before this
    // point; reaching one here is a caller bug.
    let text_model = model.as_text().ok_or(DecoratorError::NotATextModel)?;

    let parser = parsers.parser_for(text_model);
    let events = parser.subscribe();

    let decorator = Arc::new(Self {
      editor,
      parser,
      decorations: Arc::new(Mutex::new(Vec::new())),
      disposed: Arc::new(AtomicBool::new(false)),
      disposal_listeners: Mutex::new(Vec::new()),
      tasks: Mutex::new(Vec::new()),
    });

    decorator.parser.start();

    let poll = tokio::spawn(cursor_poll(
      decorator.editor.clone(),
      decorator.decorations.clone(),
      decorator.disposed.clone(),
    ));
    let update = tokio::spawn(update_loop(Arc::downgrade(&decorator), events));
    *decorator.tasks.lock() = vec![poll, update];

    log::debug!(
      "{}: prompt decorator attached to {}",
      decorator.editor.id(),
      decorator.parser.uri()
    );

    Ok(decorator)
  }

  pub fn is_disposed(&self) -> bool {
    self.disposed.load(Ordering::Acquire)
  }

  /// Resolves once this decorator has been disposed. Resolves immediately if
  /// disposal already happened.
  pub fn on_dispose(&self) -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    if self.is_disposed() {
      let _ = tx.send(());
    } else {
      self.disposal_listeners.lock().push(tx);
    }
    rx
  }

  /// Tear down: stop both tasks, remove every registered decoration, and
  /// notify disposal listeners. Idempotent.
  pub fn dispose(&self) {
    if self.disposed.swap(true, Ordering::AcqRel) {
      return;
    }

    for task in self.tasks.lock().drain(..) {
      task.abort();
    }

    self.remove_all_decorations();

    for listener in self.disposal_listeners.lock().drain(..) {
      let _ = listener.send(());
    }

    log::debug!("{}: prompt decorator disposed", self.editor.id());
  }

  /// Wait for in-flight parse work, then regenerate the full decoration set.
  async fn settle_and_rebuild(&self) {
    self.parser.settled().await;

    // The decorator may have been disposed while we were waiting; stale
    // continuations must not touch the host.
    if self.is_disposed() {
      return;
    }

    self.editor.change_decorations(&mut |accessor| {
      let mut decorations = self.decorations.lock();

      for decoration in mem::take(&mut *decorations) {
        decoration.remove(accessor);
      }

      let cursor = self.editor.cursor_position();
      for token in self.parser.tokens() {
        let Some(variant) = variant_for(token.kind) else {
          continue;
        };
        decorations.push(ReactiveDecoration::new(
          token,
          cursor,
          &variant.style,
          accessor,
        ));
      }

      log::debug!(
        "{}: rebuilt {} prompt decorations",
        self.editor.id(),
        decorations.len()
      );
    });
  }

  fn remove_all_decorations(&self) {
    self.editor.change_decorations(&mut |accessor| {
      let mut decorations = self.decorations.lock();
      for decoration in mem::take(&mut *decorations) {
        decoration.remove(accessor);
      }
    });
  }

  #[cfg(test)]
  pub(crate) fn decoration_count(&self) -> usize {
    self.decorations.lock().len()
  }
}

impl Drop for PromptDecorator {
  fn drop(&mut self) {
    self.dispose();
  }
}

/// Sample the cursor position on a fixed interval and propagate changes to
/// the decorations. When a propagation made any decoration dirty, render all
/// of them inside one decoration transaction.
async fn cursor_poll(
  editor: Arc<dyn HostEditor>,
  decorations: Arc<Mutex<Vec<ReactiveDecoration>>>,
  disposed: Arc<AtomicBool>,
) {
  let mut interval = time::interval(CURSOR_POLL_INTERVAL);
  interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

  let mut last = editor.cursor_position();
  loop {
    interval.tick().await;
    if disposed.load(Ordering::Acquire) {
      break;
    }

    let current = editor.cursor_position();
    if current == last {
      continue;
    }
    last = current;

    if propagate_cursor(&decorations, current) {
      editor.change_decorations(&mut |accessor| {
        for decoration in decorations.lock().iter_mut() {
          decoration.render(accessor);
        }
      });
    }
  }
}

/// Push the new position into every decoration. Returns whether any of them
/// became dirty and needs a render pass.
fn propagate_cursor(
  decorations: &Mutex<Vec<ReactiveDecoration>>,
  position: Option<Position>,
) -> bool {
  let mut dirty = false;
  for decoration in decorations.lock().iter_mut() {
    decoration.set_cursor_position(position);
    dirty |= decoration.is_dirty();
  }
  dirty
}

/// React to parser notifications. Builds the initial decoration set, then
/// regenerates it on every update and shuts the decorator down when the
/// parser goes away.
async fn update_loop(decorator: Weak<PromptDecorator>, mut events: mpsc::Receiver<ParserEvent>) {
  if let Some(decorator) = decorator.upgrade() {
    decorator.settle_and_rebuild().await;
  }

  loop {
    let event = events.recv().await;
    let Some(strong) = decorator.upgrade() else {
      break;
    };

    match event {
      Some(ParserEvent::Updated) => strong.settle_and_rebuild().await,
      Some(ParserEvent::Disposed) => {
        strong.dispose();
        break;
      },
      None => {
        // Parser dropped its end without announcing disposal.
        log::warn!("{}: parser event channel closed", strong.editor.id());
        strong.dispose();
        break;
      },
    }
  }
}
