// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute-diff modifiers and deferred text styles.
//!
//! - [`bag`] holds modification requests with explicit *unset / clear / set* semantics.
//! - [`FontModifier`] derives a new [`ExtendedFont`] from an old one and a bag of font facets.
//! - [`BasicStyleModifier`] also replaces the font and the clickable action of a [`TextStyle`].
//! - [`TextStyle::Deferred`] styles carry a pending modifier that is only applied when the style
//!   is based on another one ([`TextStyle::based_on`], [`resolve`]).
//! - [`ClickableTextAction`] attaches a command and its listeners to styled text.
//!
//! ## Identity
//!
//! Fonts and styles are immutable and handled through `Arc`. A derivation that changes nothing
//! returns its input (`Arc::ptr_eq` holds), so callers can detect no-ops cheaply.
//!
//! ## Features
//!
//! - `serde` (enabled by default): persisted state for clickable actions, see [`persist`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use text_modifier::{
//!     BasicStyleModifier, Font, FontFlags, FontModifier, TextStyle, TextStyleModifier, resolve,
//! };
//!
//! let paragraph = Arc::new(TextStyle::resolved(Font::new("Sans", FontFlags::Plain, 12)));
//!
//! // A span that will be bold and two points larger than whatever it ends up on.
//! let span = Arc::new(TextStyle::deferred(
//!     Font::new("Sans", FontFlags::Plain, 12),
//!     Some(FontModifier::new().bold(true)),
//! ));
//! let span = BasicStyleModifier::new().size_delta(2).modify(&span);
//!
//! let run = resolve(&span, &paragraph);
//! assert!(!run.is_deferred());
//! assert_eq!(run.font().font().flags(), FontFlags::Bold);
//! assert_eq!(run.font().font().size(), 14);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bag;
pub mod modifier;
#[cfg(feature = "serde")]
pub mod persist;

mod action;
mod error;
mod font;
mod style;


pub use action::{ActionEvent, ActionListener, ClickableTextAction, ListenerHandle, same_listener};
pub use bag::{AttributeBag, AttributeKey, AttributeValue, Setting};
pub use error::{Error, Result};
pub use font::{ExtendedFont, Font, FontFlags, FontSource, MIN_FONT_SIZE, SizeDelta};
pub use modifier::{BasicStyleModifier, FontModifier, TextStyleModifier};
pub use style::{DeferredStyle, ResolvedStyle, TextStyle, resolve};
