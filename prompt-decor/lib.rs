//! Reactive decorations for prompt file syntax.
//!
//! Prompt files (`*.prompt.md`) carry a front matter header and inline
//! `@mention` tokens. This crate highlights both inside a host editor: each
//! recognized token gets a decoration whose CSS classes toggle between an
//! active and an inactive look depending on whether the cursor sits inside
//! the token's range.
//!
//! The crate is host-agnostic. The editor, its decoration registry, the
//! prompt parser, the theme, and the file classifier are all consumed
//! through the traits in [`host`], [`theme`], and [`classifier`]; an
//! embedder implements those, constructs a [`DecoratorInstanceManager`], and
//! calls [`decorations::register_css_styles`] on every theme change.

pub mod classifier;
pub mod decorations;
pub mod decorator;
pub mod host;
pub mod instances;
pub mod position;
pub mod theme;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::{
  classifier::{
    PromptFileClassifier,
    SuffixClassifier,
  },
  decorations::ReactiveDecoration,
  decorator::{
    DecoratorError,
    PromptDecorator,
  },
  instances::DecoratorInstanceManager,
  position::{
    Position,
    Range,
  },
  token::{
    PromptToken,
    TokenKind,
  },
};
