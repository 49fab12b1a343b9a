//! Maps live editors to their prompt decorators.
//!
//! The manager owns at most one [`PromptDecorator`] per editor. Decorators
//! are created lazily when a qualifying editor becomes active (plus one
//! sweep over the editors already visible at startup) and removed as soon as
//! they dispose themselves, e.g. because their editor closed.

use std::{
  collections::HashMap,
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
use tokio::{
  sync::mpsc,
  task::JoinHandle,
};

use crate::{
  classifier::PromptFileClassifier,
  decorator::PromptDecorator,
  host::{
    EditorEvent,
    EditorId,
    EditorService,
    HostEditor,
    ParserService,
  },
};

pub struct DecoratorInstanceManager {
  editors:    Arc<dyn EditorService>,
  parsers:    Arc<dyn ParserService>,
  classifier: Arc<dyn PromptFileClassifier>,
  decorators: Mutex<HashMap<EditorId, Arc<PromptDecorator>>>,
  disposed:   AtomicBool,
  tasks:      Mutex<Vec<JoinHandle<()>>>,
}

impl DecoratorInstanceManager {
  /// Start the manager: sweep the currently visible editors, then keep
  /// reacting to active editor changes until disposed.
  pub fn new(
    editors: Arc<dyn EditorService>,
    parsers: Arc<dyn ParserService>,
    classifier: Arc<dyn PromptFileClassifier>,
  ) -> Arc<Self> {
    let events = editors.subscribe();

    let manager = Arc::new(Self {
      editors,
      parsers,
      classifier,
      decorators: Mutex::new(HashMap::new()),
      disposed: AtomicBool::new(false),
      tasks: Mutex::new(Vec::new()),
    });

    for editor in manager.editors.visible_editors() {
      manager.evaluate_editor(editor);
    }

    let task = tokio::spawn(watch_editor_set(Arc::downgrade(&manager), events));
    manager.tasks.lock().push(task);

    manager
  }

  /// Qualification rule: the editor must have a plain text model whose
  /// resource is a prompt file. Anything else is left undecorated.
  fn evaluate_editor(self: &Arc<Self>, editor: Arc<dyn HostEditor>) {
    if self.is_disposed() {
      return;
    }

    let Some(model) = editor.model() else {
      return;
    };
    let Some(text_model) = model.as_text() else {
      return;
    };
    if !self.classifier.is_prompt_file(text_model.uri()) {
      return;
    }

    self.attach(editor);
  }

  fn attach(self: &Arc<Self>, editor: Arc<dyn HostEditor>) {
    let id = editor.id();

    {
      let mut decorators = self.decorators.lock();
      match decorators.get(&id) {
        // A live decorator already covers this editor.
        Some(existing) if !existing.is_disposed() => return,
        // Stale entry from a decorator that disposed itself.
        Some(_) => {
          decorators.remove(&id);
        },
        None => {},
      }
    }

    match PromptDecorator::new(editor, self.parsers.as_ref()) {
      Ok(decorator) => {
        let on_dispose = decorator.on_dispose();
        self.decorators.lock().insert(id, decorator);

        // Drop the map entry once the decorator disposes itself.
        let weak = Arc::downgrade(self);
        let watcher = tokio::spawn(async move {
          let _ = on_dispose.await;
          if let Some(manager) = weak.upgrade() {
            manager.release(id);
          }
        });
        self.tasks.lock().push(watcher);

        log::debug!("{id}: prompt decorator created");
      },
      Err(err) => {
        // Qualification should have caught this already.
        log::warn!("{id}: failed to create prompt decorator: {err}");
      },
    }
  }

  fn release(&self, id: EditorId) {
    if let Some(decorator) = self.decorators.lock().remove(&id) {
      decorator.dispose();
      log::debug!("{id}: prompt decorator released");
    }
  }

  pub fn is_disposed(&self) -> bool {
    self.disposed.load(Ordering::Acquire)
  }

  /// Stop watching the editor set and dispose every managed decorator.
  /// Idempotent.
  pub fn dispose(&self) {
    if self.disposed.swap(true, Ordering::AcqRel) {
      return;
    }

    for task in self.tasks.lock().drain(..) {
      task.abort();
    }

    let decorators: Vec<_> = self.decorators.lock().drain().collect();
    for (_, decorator) in decorators {
      decorator.dispose();
    }
  }

  pub fn decorator_for(&self, id: EditorId) -> Option<Arc<PromptDecorator>> {
    self.decorators.lock().get(&id).cloned()
  }

  pub fn decorator_count(&self) -> usize {
    self.decorators.lock().len()
  }
}

impl Drop for DecoratorInstanceManager {
  fn drop(&mut self) {
    self.dispose();
  }
}

async fn watch_editor_set(
  manager: Weak<DecoratorInstanceManager>,
  mut events: mpsc::Receiver<EditorEvent>,
) {
  while let Some(event) = events.recv().await {
    let Some(manager) = manager.upgrade() else {
      break;
    };

    match event {
      EditorEvent::ActiveEditorChanged => {
        let Some(editor) = manager.editors.active_editor() else {
          continue;
        };
        manager.evaluate_editor(editor);
      },
    }
  }
}
