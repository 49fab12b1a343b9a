//! Reactive decorations over prompt syntax tokens.
//!
//! A [`ReactiveDecoration`] wraps one parsed token and keeps a host-side
//! decoration in sync with the cursor: whenever the cursor enters or leaves
//! the token's range the decoration swaps between its active and inactive
//! CSS classes. The host only gets touched inside [`ReactiveDecoration::render`],
//! which must run within a decoration transaction.

use crate::{
  host::{
    DecorationAccessor,
    DecorationId,
    DecorationOptions,
  },
  position::Position,
  theme::{
    ColorTheme,
    EDITOR_SELECTOR,
    StyleCollector,
    colors,
    resolve,
  },
  token::{
    PromptToken,
    TokenKind,
  },
};

pub mod at_mention;
pub mod front_matter;

/// CSS class pair applied to a decoration: `normal` styles the whole
/// decorated range, `inline` styles the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssClassNames {
  pub normal: &'static str,
  pub inline: &'static str,
}

/// Static style bundle of one decoration variant.
#[derive(Debug, Clone, Copy)]
pub struct DecorationStyle {
  pub description:   &'static str,
  pub hover_message: Option<&'static str>,
  pub whole_line:    bool,
  pub active:        CssClassNames,
  pub inactive:      CssClassNames,
}

/// One decoration variant: which token kind it decorates, how it looks, and
/// the theme-derived rules it contributes to the generated stylesheet.
pub struct DecorationVariant {
  pub kind:         TokenKind,
  pub style:        DecorationStyle,
  pub register_css: fn(&dyn ColorTheme, &mut dyn StyleCollector),
}

/// Registry of all known variants. Dispatch from token kind to decoration
/// goes through this table, so adding a variant does not touch any call site.
static VARIANTS: &[&DecorationVariant] = &[&front_matter::VARIANT, &at_mention::VARIANT];

/// Look up the decoration variant for a token kind. Unrecognized kinds get no
/// decoration.
pub fn variant_for(kind: TokenKind) -> Option<&'static DecorationVariant> {
  VARIANTS.iter().copied().find(|variant| variant.kind == kind)
}

/// CSS class name shared by every prompt syntax decoration.
pub const DEFAULT_CLASS_NAME: &str = "prompt-decoration";

/// Emit the full generated stylesheet for the current theme.
///
/// Call once at startup and again after every theme change; the collector
/// receives the default rule followed by each variant's rules.
pub fn register_css_styles(theme: &dyn ColorTheme, collector: &mut dyn StyleCollector) {
  let background = resolve(
    theme,
    colors::SLASH_COMMAND_BACKGROUND,
    colors::DEFAULT_SLASH_COMMAND_BACKGROUND,
  );
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{DEFAULT_CLASS_NAME} {{ border-radius: 3px; background-color: \
     {background}; }}"
  ));

  for variant in VARIANTS {
    (variant.register_css)(theme, collector);
  }
}

/// A host decoration whose styling reacts to cursor movement.
pub struct ReactiveDecoration {
  token:  PromptToken,
  style:  &'static DecorationStyle,
  id:     DecorationId,
  cursor: Option<Position>,
  /// Activation state as last pushed to the host.
  active: bool,
  /// Whether the computed activation diverged from the rendered one.
  dirty:  bool,
}

impl ReactiveDecoration {
  /// Register a decoration for `token` with the host. The initial style
  /// matches the activation computed from `cursor`.
  pub fn new(
    token: PromptToken,
    cursor: Option<Position>,
    style: &'static DecorationStyle,
    accessor: &mut dyn DecorationAccessor,
  ) -> Self {
    let active = activation(&token, cursor);
    let id = accessor.add_decoration(token.range, options_for(style, active));

    Self {
      token,
      style,
      id,
      cursor,
      active,
      dirty: false,
    }
  }

  /// Update the cursor snapshot and recompute activation. Never touches the
  /// host; a diverging activation only marks the decoration dirty for the
  /// next [`render`](Self::render).
  pub fn set_cursor_position(&mut self, position: Option<Position>) {
    self.cursor = position;
    self.dirty = self.computed_active() != self.active;
  }

  /// Push the current style to the host if the activation changed since the
  /// last render. Must be called inside a decoration transaction.
  pub fn render(&mut self, accessor: &mut dyn DecorationAccessor) {
    if !self.dirty {
      return;
    }

    self.active = self.computed_active();
    self.dirty = false;
    accessor.change_decoration_options(self.id, options_for(self.style, self.active));
  }

  /// Unregister the decoration from the host. Called once, during teardown.
  pub fn remove(self, accessor: &mut dyn DecorationAccessor) {
    accessor.remove_decoration(self.id);
  }

  pub fn token(&self) -> &PromptToken {
    &self.token
  }

  pub fn id(&self) -> DecorationId {
    self.id
  }

  /// Activation state as currently rendered by the host.
  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn is_dirty(&self) -> bool {
    self.dirty
  }

  fn computed_active(&self) -> bool {
    activation(&self.token, self.cursor)
  }
}

/// A decoration is active exactly when the cursor exists and falls within its
/// token's range.
fn activation(token: &PromptToken, cursor: Option<Position>) -> bool {
  cursor.is_some_and(|pos| token.range.contains_position(pos))
}

fn options_for(style: &DecorationStyle, active: bool) -> DecorationOptions {
  let classes = if active { style.active } else { style.inactive };

  DecorationOptions {
    description:       style.description,
    class_name:        classes.normal,
    inline_class_name: classes.inline,
    hover_message:     style.hover_message,
    whole_line:        style.whole_line,
  }
}
