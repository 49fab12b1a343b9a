//! Theme colors and generated style rules.
//!
//! Rule registration is an explicit step: the embedder calls
//! [`crate::decorations::register_css_styles`] with the active theme and a
//! collector once at startup and again on every theme change. Nothing here
//! runs as a module initialization side effect.

use std::fmt;

/// An RGBA color resolved from the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Color {
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 0xff }
  }

  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// CSS literal for this color: `#rrggbb` when opaque, `rgba(...)` otherwise.
  pub fn css(&self) -> String {
    if self.a == 0xff {
      format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    } else {
      format!(
        "rgba({}, {}, {}, {:.2})",
        self.r,
        self.g,
        self.b,
        f32::from(self.a) / 255.0
      )
    }
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.css())
  }
}

/// Resolves named color tokens against the active theme.
pub trait ColorTheme {
  fn color(&self, token: &str) -> Option<Color>;
}

/// Receives generated stylesheet rules.
pub trait StyleCollector {
  fn add_rule(&mut self, rule: String);
}

/// CSS selector scoping every generated rule to the host's editor widget.
pub const EDITOR_SELECTOR: &str = ".prompt-editor";

/// Named color tokens the decorations resolve, with their fallback values.
pub mod colors {
  use super::Color;

  pub const FRONT_MATTER_BACKGROUND: &str = "chat.prompt.frontMatterBackground";
  pub const AT_MENTION_FOREGROUND: &str = "chat.prompt.atMentionForeground";
  pub const AT_MENTION_FOREGROUND_ACTIVE: &str = "chat.prompt.atMentionForeground.active";
  pub const SLASH_COMMAND_BACKGROUND: &str = "chat.slashCommandBackground";
  pub const REQUEST_BORDER: &str = "chat.requestBorder";
  pub const FOREGROUND: &str = "foreground";
  pub const DISABLED_FOREGROUND: &str = "disabledForeground";

  pub const DEFAULT_FRONT_MATTER_BACKGROUND: Color = Color::rgba(0, 0, 0, 51);
  pub const DEFAULT_AT_MENTION_FOREGROUND: Color = Color::rgb(0x40, 0xa6, 0xff);
  pub const DEFAULT_AT_MENTION_FOREGROUND_ACTIVE: Color = Color::rgb(0x5d, 0xb4, 0xff);
  pub const DEFAULT_SLASH_COMMAND_BACKGROUND: Color = Color::rgba(0xff, 0xff, 0xff, 20);
  pub const DEFAULT_REQUEST_BORDER: Color = Color::rgba(0xff, 0xff, 0xff, 25);
  pub const DEFAULT_FOREGROUND: Color = Color::rgb(0xcc, 0xcc, 0xcc);
  pub const DEFAULT_DISABLED_FOREGROUND: Color = Color::rgba(0xcc, 0xcc, 0xcc, 128);
}

/// Theme lookup with a fixed fallback for themes that do not define `token`.
pub fn resolve(theme: &dyn ColorTheme, token: &str, fallback: Color) -> Color {
  theme.color(token).unwrap_or(fallback)
}
