//! Whole-line decoration for the front matter header block.

use crate::{
  decorations::{
    CssClassNames,
    DecorationStyle,
    DecorationVariant,
  },
  theme::{
    ColorTheme,
    EDITOR_SELECTOR,
    StyleCollector,
    colors,
    resolve,
  },
  token::TokenKind,
};

pub const FRONT_MATTER_HEADER: &str = "prompt-front-matter-header";
pub const FRONT_MATTER_HEADER_INLINE_ACTIVE: &str = "prompt-front-matter-header-inline-active";
pub const FRONT_MATTER_HEADER_INLINE_INACTIVE: &str = "prompt-front-matter-header-inline-inactive";

/// The header block keeps its background in both states; only the inline
/// text color reacts to the cursor (dimmed while the cursor is elsewhere).
pub static VARIANT: DecorationVariant = DecorationVariant {
  kind:         TokenKind::FrontMatterHeader,
  style:        DecorationStyle {
    description:   "front matter header decoration",
    hover_message: Some("Front Matter header"),
    whole_line:    true,
    active:        CssClassNames {
      normal: FRONT_MATTER_HEADER,
      inline: FRONT_MATTER_HEADER_INLINE_ACTIVE,
    },
    inactive:      CssClassNames {
      normal: FRONT_MATTER_HEADER,
      inline: FRONT_MATTER_HEADER_INLINE_INACTIVE,
    },
  },
  register_css,
};

fn register_css(theme: &dyn ColorTheme, collector: &mut dyn StyleCollector) {
  let background = resolve(
    theme,
    colors::FRONT_MATTER_BACKGROUND,
    colors::DEFAULT_FRONT_MATTER_BACKGROUND,
  );
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{FRONT_MATTER_HEADER} {{ background-color: {background}; }}"
  ));

  let active_foreground = resolve(theme, colors::FOREGROUND, colors::DEFAULT_FOREGROUND);
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{FRONT_MATTER_HEADER_INLINE_ACTIVE} {{ color: {active_foreground}; }}"
  ));

  let inactive_foreground = resolve(
    theme,
    colors::DISABLED_FOREGROUND,
    colors::DEFAULT_DISABLED_FOREGROUND,
  );
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{FRONT_MATTER_HEADER_INLINE_INACTIVE} {{ color: {inactive_foreground}; }}"
  ));
}
