// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text styles: resolved, or carrying a deferred font modifier.
//!
//! A [`TextStyle::Deferred`] style keeps a pending [`FontModifier`] next to its font. The modifier
//! is applied when the style is based on another style (typically a paragraph default), see
//! [`TextStyle::based_on`] and [`resolve`].

use core::fmt;
use std::sync::Arc;

use crate::action::ClickableTextAction;
use crate::font::ExtendedFont;
use crate::modifier::FontModifier;

/// A style with a concrete font and nothing pending.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    font: Arc<ExtendedFont>,
    action: Option<Arc<ClickableTextAction>>,
}

impl ResolvedStyle {
    /// Creates a style with no action.
    pub fn new(font: Arc<ExtendedFont>) -> Self {
        Self { font, action: None }
    }

    /// Returns this style with the action replaced.
    #[must_use]
    pub fn with_action(mut self, action: Option<Arc<ClickableTextAction>>) -> Self {
        self.action = action;
        self
    }

    /// Returns the font.
    pub fn font(&self) -> &Arc<ExtendedFont> {
        &self.font
    }

    /// Returns the clickable action, if any.
    pub fn action(&self) -> Option<&Arc<ClickableTextAction>> {
        self.action.as_ref()
    }
}

/// A style whose font modifier is applied only when it is based on another style.
///
/// The modifier is never stored empty: an empty modifier is stored as `None`, and only its font
/// facets are kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredStyle {
    font: Arc<ExtendedFont>,
    action: Option<Arc<ClickableTextAction>>,
    modifier: Option<Box<FontModifier>>,
}

impl DeferredStyle {
    /// Creates a style with no action.
    pub fn new(font: Arc<ExtendedFont>, modifier: Option<FontModifier>) -> Self {
        Self {
            font,
            action: None,
            modifier: normalize(modifier),
        }
    }

    /// Returns this style with the action replaced.
    #[must_use]
    pub fn with_action(mut self, action: Option<Arc<ClickableTextAction>>) -> Self {
        self.action = action;
        self
    }

    /// Returns the font.
    pub fn font(&self) -> &Arc<ExtendedFont> {
        &self.font
    }

    /// Returns the clickable action, if any.
    pub fn action(&self) -> Option<&Arc<ClickableTextAction>> {
        self.action.as_ref()
    }

    /// Returns the pending modifier, if any.
    pub fn modifier(&self) -> Option<&FontModifier> {
        self.modifier.as_deref()
    }
}

fn normalize(modifier: Option<FontModifier>) -> Option<Box<FontModifier>> {
    modifier
        .filter(|modifier| !modifier.is_empty())
        .map(|modifier| Box::new(modifier.facets()))
}

/// A text style.
///
/// Styles are immutable values handled through `Arc`; derivations return a new `Arc`, or the
/// original one when nothing changes. Cloning deep-copies the pending modifier and shares the
/// action.
#[derive(Clone, Debug, PartialEq)]
pub enum TextStyle {
    /// Concrete font and action.
    Resolved(ResolvedStyle),
    /// Font and action plus a pending modifier.
    Deferred(DeferredStyle),
}

impl TextStyle {
    /// Creates a resolved style with no action.
    pub fn resolved(font: impl Into<ExtendedFont>) -> Self {
        Self::Resolved(ResolvedStyle::new(Arc::new(font.into())))
    }

    /// Creates a deferred style with no action. An empty `modifier` is stored as `None`.
    pub fn deferred(font: impl Into<ExtendedFont>, modifier: Option<FontModifier>) -> Self {
        Self::Deferred(DeferredStyle::new(Arc::new(font.into()), modifier))
    }

    /// Returns this style with the action replaced.
    #[must_use]
    pub fn with_action(self, action: Option<Arc<ClickableTextAction>>) -> Self {
        match self {
            Self::Resolved(style) => Self::Resolved(style.with_action(action)),
            Self::Deferred(style) => Self::Deferred(style.with_action(action)),
        }
    }

    /// Returns the font.
    pub fn font(&self) -> &Arc<ExtendedFont> {
        match self {
            Self::Resolved(style) => style.font(),
            Self::Deferred(style) => style.font(),
        }
    }

    /// Returns the clickable action, if any.
    pub fn action(&self) -> Option<&Arc<ClickableTextAction>> {
        match self {
            Self::Resolved(style) => style.action(),
            Self::Deferred(style) => style.action(),
        }
    }

    /// Returns the pending modifier of a deferred style.
    pub fn modifier(&self) -> Option<&FontModifier> {
        match self {
            Self::Resolved(_) => None,
            Self::Deferred(style) => style.modifier(),
        }
    }

    /// Returns `true` for [`TextStyle::Deferred`].
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Returns a deferred style with the given font and modifier, keeping this style's action.
    #[must_use]
    pub fn derive_style(&self, font: Arc<ExtendedFont>, modifier: Option<FontModifier>) -> Self {
        Self::Deferred(DeferredStyle::new(font, modifier).with_action(self.action().cloned()))
    }

    /// Bases this style on `base`.
    ///
    /// A resolved style is complete and is returned as is. For a deferred style:
    /// - if neither this style nor `base` carries an action or a modifier, and `base` is itself
    ///   deferred, `base` is returned
    /// - otherwise the pending modifier (if any) is applied to the base's font, and the result is
    ///   a deferred style with that font, the *same* modifier and this style's action
    ///
    /// Keeping the modifier lets the result be based on yet another style later.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use text_modifier::{Font, FontFlags, FontModifier, TextStyle};
    ///
    /// let paragraph = Arc::new(TextStyle::resolved(Font::new("Serif", FontFlags::Plain, 11)));
    /// let emphasis = Arc::new(TextStyle::deferred(
    ///     Font::new("Serif", FontFlags::Plain, 11),
    ///     Some(FontModifier::new().italic(true)),
    /// ));
    ///
    /// let run = emphasis.based_on(&paragraph);
    /// assert_eq!(run.font().font().flags(), FontFlags::Italic);
    /// assert!(run.modifier().is_some());
    /// ```
    pub fn based_on(self: &Arc<Self>, base: &Arc<Self>) -> Arc<Self> {
        let Self::Deferred(this) = &**self else {
            return Arc::clone(self);
        };

        if this.action.is_none() && this.modifier.is_none() {
            if let Self::Deferred(other) = &**base {
                if other.action.is_none() && other.modifier.is_none() {
                    return Arc::clone(base);
                }
            }
        }

        let font = match &this.modifier {
            Some(modifier) => modifier.derive(base.font()),
            None => Arc::clone(base.font()),
        };
        Arc::new(Self::Deferred(DeferredStyle {
            font,
            action: this.action.clone(),
            modifier: this.modifier.clone(),
        }))
    }

    /// Returns the resolved form of this style: same font and action, no pending modifier.
    pub fn concrete(self: &Arc<Self>) -> Arc<Self> {
        match &**self {
            Self::Resolved(_) => Arc::clone(self),
            Self::Deferred(style) => Arc::new(Self::Resolved(ResolvedStyle {
                font: Arc::clone(&style.font),
                action: style.action.clone(),
            })),
        }
    }
}

/// Bases `style` on `base` and drops the pending modifier.
///
/// Equivalent to `style.based_on(base).concrete()`.
pub fn resolve(style: &Arc<TextStyle>, base: &Arc<TextStyle>) -> Arc<TextStyle> {
    style.based_on(base).concrete()
}

impl From<ResolvedStyle> for TextStyle {
    fn from(style: ResolvedStyle) -> Self {
        Self::Resolved(style)
    }
}

impl From<DeferredStyle> for TextStyle {
    fn from(style: DeferredStyle) -> Self {
        Self::Deferred(style)
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(style) => write!(f, "resolved({}", style.font)?,
            Self::Deferred(style) => {
                write!(f, "deferred({}", style.font)?;
                if let Some(modifier) = &style.modifier {
                    write!(f, ", {} pending", modifier.bag().len())?;
                }
            }
        }
        if let Some(action) = self.action() {
            write!(f, ", {action}")?;
        }
        f.write_str(")")
    }
}
