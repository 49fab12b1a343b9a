//! Inline pill decoration for `@mention` tokens.

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

pub const AT_MENTION_ACTIVE: &str = "prompt-at-mention-active";
pub const AT_MENTION_INACTIVE: &str = "prompt-at-mention-inactive";
pub const AT_MENTION_INLINE_ACTIVE: &str = "prompt-at-mention-inline-active";
pub const AT_MENTION_INLINE_INACTIVE: &str = "prompt-at-mention-inline-inactive";

pub static VARIANT: DecorationVariant = DecorationVariant {
  kind:         TokenKind::AtMention,
  style:        DecorationStyle {
    description:   "at mention decoration",
    hover_message: Some("At Mention"),
    whole_line:    false,
    active:        CssClassNames {
      normal: AT_MENTION_ACTIVE,
      inline: AT_MENTION_INLINE_ACTIVE,
    },
    inactive:      CssClassNames {
      normal: AT_MENTION_INACTIVE,
      inline: AT_MENTION_INLINE_INACTIVE,
    },
  },
  register_css,
};

fn register_css(theme: &dyn ColorTheme, collector: &mut dyn StyleCollector) {
  let background = resolve(
    theme,
    colors::SLASH_COMMAND_BACKGROUND,
    colors::DEFAULT_SLASH_COMMAND_BACKGROUND,
  );
  let common = format!(
    "border-radius: 3px; box-sizing: border-box; padding: 0 4px; border: 1px solid transparent; \
     background-color: {background};"
  );

  // The active pill additionally gets a visible border.
  let border = resolve(theme, colors::REQUEST_BORDER, colors::DEFAULT_REQUEST_BORDER);
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{AT_MENTION_ACTIVE} {{ {common} border-color: {border}; }}"
  ));
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{AT_MENTION_INACTIVE} {{ {common} }}"
  ));

  let active_foreground = resolve(
    theme,
    colors::AT_MENTION_FOREGROUND_ACTIVE,
    colors::DEFAULT_AT_MENTION_FOREGROUND_ACTIVE,
  );
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{AT_MENTION_INLINE_ACTIVE} {{ color: {active_foreground}; }}"
  ));

  let foreground = resolve(
    theme,
    colors::AT_MENTION_FOREGROUND,
    colors::DEFAULT_AT_MENTION_FOREGROUND,
  );
  collector.add_rule(format!(
    "{EDITOR_SELECTOR} .{AT_MENTION_INLINE_INACTIVE} {{ color: {foreground}; }}"
  ));
}
