//! Host fakes shared by the unit tests.

use std::sync::{
  Arc,
  atomic::{
    AtomicBool,
    Ordering,
  },
};

use futures_util::{
  FutureExt,
  future::BoxFuture,
};
use parking_lot::Mutex;
use slotmap::{
  DefaultKey,
  Key,
  KeyData,
  SlotMap,
};
use tokio::sync::mpsc;
use url::Url;

use crate::{
  host::{
    DecorationAccessor,
    DecorationId,
    DecorationOptions,
    EditorEvent,
    EditorId,
    EditorModel,
    EditorService,
    HostEditor,
    ParserEvent,
    ParserService,
    PromptParser,
    TextModel,
  },
  position::{
    Position,
    Range,
  },
  token::PromptToken,
};

/// Minimal accessor that records mutations without any backing store.
#[derive(Default)]
pub struct CountingAccessor {
  next_id:     u64,
  pub adds:    usize,
  pub changes: usize,
  pub removes: usize,
  last:        Option<DecorationOptions>,
}

impl CountingAccessor {
  pub fn last_options(&self) -> Option<DecorationOptions> {
    self.last
  }
}

impl DecorationAccessor for CountingAccessor {
  fn add_decoration(&mut self, _range: Range, options: DecorationOptions) -> DecorationId {
    self.next_id += 1;
    self.adds += 1;
    self.last = Some(options);
    DecorationId::new(self.next_id)
  }

  fn change_decoration_options(&mut self, _id: DecorationId, options: DecorationOptions) {
    self.changes += 1;
    self.last = Some(options);
  }

  fn remove_decoration(&mut self, _id: DecorationId) {
    self.removes += 1;
  }
}

/// Host-side decoration store of a [`FakeEditor`]. Ids are slotmap keys, so
/// stale removals would panic the test instead of passing silently.
#[derive(Default)]
pub struct DecorationStore {
  slots:            SlotMap<DefaultKey, (Range, DecorationOptions)>,
  pub transactions: usize,
  pub mutations:    usize,
}

impl DecorationStore {
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn snapshot(&self) -> Vec<(Range, DecorationOptions)> {
    self.slots.values().copied().collect()
  }
}

impl DecorationAccessor for DecorationStore {
  fn add_decoration(&mut self, range: Range, options: DecorationOptions) -> DecorationId {
    self.mutations += 1;
    let key = self.slots.insert((range, options));
    DecorationId::new(key.data().as_ffi())
  }

  fn change_decoration_options(&mut self, id: DecorationId, options: DecorationOptions) {
    self.mutations += 1;
    let key = DefaultKey::from(KeyData::from_ffi(id.raw()));
    let slot = self.slots.get_mut(key).expect("unknown decoration id");
    slot.1 = options;
  }

  fn remove_decoration(&mut self, id: DecorationId) {
    self.mutations += 1;
    let key = DefaultKey::from(KeyData::from_ffi(id.raw()));
    assert!(
      self.slots.remove(key).is_some(),
      "removed decoration twice: {id:?}"
    );
  }
}

pub struct FakeModel {
  uri: Url,
}

impl FakeModel {
  pub fn new(path: &str) -> Arc<Self> {
    Arc::new(Self {
      uri: Url::parse(&format!("file://{path}")).unwrap(),
    })
  }
}

impl TextModel for FakeModel {
  fn uri(&self) -> &Url {
    &self.uri
  }
}

pub struct FakeEditor {
  id:        EditorId,
  model:     Option<EditorModel>,
  cursor:    Mutex<Option<Position>>,
  pub store: Mutex<DecorationStore>,
}

impl FakeEditor {
  pub fn new(id: u64, path: &str) -> Arc<Self> {
    Arc::new(Self {
      id:     EditorId::new(id),
      model:  Some(EditorModel::Text(FakeModel::new(path))),
      cursor: Mutex::new(None),
      store:  Mutex::new(DecorationStore::default()),
    })
  }

  pub fn without_model(id: u64) -> Arc<Self> {
    Arc::new(Self {
      id:     EditorId::new(id),
      model:  None,
      cursor: Mutex::new(None),
      store:  Mutex::new(DecorationStore::default()),
    })
  }

  pub fn with_diff_model(id: u64, path: &str) -> Arc<Self> {
    Arc::new(Self {
      id:     EditorId::new(id),
      model:  Some(EditorModel::Diff {
        original: FakeModel::new(path),
        modified: FakeModel::new(path),
      }),
      cursor: Mutex::new(None),
      store:  Mutex::new(DecorationStore::default()),
    })
  }

  pub fn set_cursor(&self, position: Option<Position>) {
    *self.cursor.lock() = position;
  }

  pub fn decoration_count(&self) -> usize {
    self.store.lock().len()
  }

  pub fn decorations(&self) -> Vec<(Range, DecorationOptions)> {
    self.store.lock().snapshot()
  }

  pub fn mutation_count(&self) -> usize {
    self.store.lock().mutations
  }
}

impl HostEditor for FakeEditor {
  fn id(&self) -> EditorId {
    self.id
  }

  fn model(&self) -> Option<EditorModel> {
    self.model.clone()
  }

  fn cursor_position(&self) -> Option<Position> {
    *self.cursor.lock()
  }

  fn change_decorations(&self, change: &mut dyn FnMut(&mut dyn DecorationAccessor)) {
    let mut store = self.store.lock();
    store.transactions += 1;
    change(&mut *store);
  }
}

pub struct FakeParser {
  uri:     Url,
  tokens:  Mutex<Vec<PromptToken>>,
  senders: Mutex<Vec<mpsc::Sender<ParserEvent>>>,
  started: AtomicBool,
}

impl FakeParser {
  pub fn new(path: &str) -> Arc<Self> {
    Arc::new(Self {
      uri:     Url::parse(&format!("file://{path}")).unwrap(),
      tokens:  Mutex::new(Vec::new()),
      senders: Mutex::new(Vec::new()),
      started: AtomicBool::new(false),
    })
  }

  pub fn set_tokens(&self, tokens: Vec<PromptToken>) {
    *self.tokens.lock() = tokens;
  }

  pub fn emit(&self, event: ParserEvent) {
    // Subscribers that already went away are fine to miss events.
    for sender in self.senders.lock().iter() {
      let _ = sender.try_send(event);
    }
  }

  pub fn is_started(&self) -> bool {
    self.started.load(Ordering::Acquire)
  }

  /// Drop all event senders, closing subscriber channels without a
  /// `Disposed` event.
  pub fn close_channels(&self) {
    self.senders.lock().clear();
  }
}

impl PromptParser for FakeParser {
  fn uri(&self) -> &Url {
    &self.uri
  }

  fn tokens(&self) -> Vec<PromptToken> {
    self.tokens.lock().clone()
  }

  fn subscribe(&self) -> mpsc::Receiver<ParserEvent> {
    let (tx, rx) = mpsc::channel(16);
    self.senders.lock().push(tx);
    rx
  }

  fn settled(&self) -> BoxFuture<'_, ()> {
    async {}.boxed()
  }

  fn start(&self) {
    self.started.store(true, Ordering::Release);
  }
}

/// Parser service handing out one fake parser per model path.
#[derive(Default)]
pub struct FakeParserService {
  parsers: Mutex<Vec<Arc<FakeParser>>>,
}

impl FakeParserService {
  pub fn with_parser(parser: Arc<FakeParser>) -> Arc<Self> {
    Arc::new(Self {
      parsers: Mutex::new(vec![parser]),
    })
  }

  pub fn add(&self, parser: Arc<FakeParser>) {
    self.parsers.lock().push(parser);
  }
}

impl ParserService for FakeParserService {
  fn parser_for(&self, model: &Arc<dyn TextModel>) -> Arc<dyn PromptParser> {
    let parsers = self.parsers.lock();
    let parser = parsers
      .iter()
      .find(|parser| parser.uri() == model.uri())
      .expect("no fake parser registered for model");
    parser.clone()
  }
}

#[derive(Default)]
pub struct FakeEditorService {
  active:  Mutex<Option<Arc<dyn HostEditor>>>,
  visible: Mutex<Vec<Arc<dyn HostEditor>>>,
  senders: Mutex<Vec<mpsc::Sender<EditorEvent>>>,
}

impl FakeEditorService {
  pub fn add_visible(&self, editor: Arc<dyn HostEditor>) {
    self.visible.lock().push(editor);
  }

  pub fn activate(&self, editor: Arc<dyn HostEditor>) {
    *self.active.lock() = Some(editor);
    for sender in self.senders.lock().iter() {
      let _ = sender.try_send(EditorEvent::ActiveEditorChanged);
    }
  }
}

impl EditorService for FakeEditorService {
  fn active_editor(&self) -> Option<Arc<dyn HostEditor>> {
    self.active.lock().clone()
  }

  fn visible_editors(&self) -> Vec<Arc<dyn HostEditor>> {
    self.visible.lock().clone()
  }

  fn subscribe(&self) -> mpsc::Receiver<EditorEvent> {
    let (tx, rx) = mpsc::channel(16);
    self.senders.lock().push(tx);
    rx
  }
}

/// Let spawned tasks make progress on the current-thread test runtime.
pub async fn drain_tasks() {
  for _ in 0..32 {
    tokio::task::yield_now().await;
  }
}
