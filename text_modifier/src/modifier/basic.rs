// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use peniko::Color;

use super::{FontModifier, TextStyleModifier};
use crate::action::ClickableTextAction;
use crate::bag::{AttributeBag, AttributeKey, AttributeValue, Setting};
use crate::error::Result;
use crate::font::FontSource;
use crate::style::{DeferredStyle, ResolvedStyle, TextStyle};

/// A [`FontModifier`] that can also replace the font and the clickable action of a style.
///
/// On top of the font facets it recognizes two reserved attributes:
/// - [`AttributeKey::Font`]: a [`FontSource::Plain`] font keeps the style's color and underline,
///   a [`FontSource::Extended`] font is used as is.
/// - [`AttributeKey::Clickable`]: [`Setting::Clear`] removes the action, [`Setting::Set`] installs
///   a new one unless an equal action is already present.
///
/// Resolved styles get the font facets applied right away. Deferred styles get them merged into
/// their pending modifier instead, while the reserved attributes still apply immediately.
///
/// ```
/// use std::sync::Arc;
/// use text_modifier::{
///     BasicStyleModifier, ExtendedFont, Font, FontFlags, TextStyle, TextStyleModifier,
/// };
///
/// let style = Arc::new(TextStyle::resolved(Font::new("Sans", FontFlags::Bold, 12)));
/// let modifier = BasicStyleModifier::new().italic(true).size_delta(-2);
///
/// let modified = modifier.modify(&style);
/// assert_eq!(modified.font().font().size(), 10);
/// assert_eq!(modified.font().font().flags(), FontFlags::BoldItalic);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasicStyleModifier {
    modifier: FontModifier,
}

impl BasicStyleModifier {
    /// Creates a modifier with no entries.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing bag.
    #[inline]
    pub fn from_bag(bag: AttributeBag) -> Self {
        Self {
            modifier: FontModifier::from_bag(bag),
        }
    }

    /// Returns the underlying bag.
    #[inline]
    pub fn bag(&self) -> &AttributeBag {
        self.modifier.bag()
    }

    /// Returns the font modifier view of this modifier.
    #[inline]
    pub fn font_modifier(&self) -> &FontModifier {
        &self.modifier
    }

    /// Returns `true` if no recognized attribute has an entry.
    pub fn is_empty(&self) -> bool {
        self.modifier.bag().is_empty()
    }

    /// See [`AttributeBag::put`].
    pub fn put(&mut self, value: AttributeValue) {
        self.modifier.put(value);
    }

    /// See [`AttributeBag::put_clear`].
    pub fn put_clear(&mut self, key: AttributeKey) -> Result<()> {
        self.modifier.put_clear(key)
    }

    /// See [`AttributeBag::remove`].
    pub fn remove(&mut self, key: AttributeKey) -> Setting<AttributeValue> {
        self.modifier.remove(key)
    }

    /// See [`AttributeBag::clear`].
    pub fn clear(&mut self) {
        self.modifier.clear();
    }

    /// Replaces the family.
    #[must_use]
    pub fn family(self, family: impl Into<Arc<str>>) -> Self {
        self.map(|m| m.family(family))
    }

    /// Sets the bold facet.
    #[must_use]
    pub fn bold(self, bold: bool) -> Self {
        self.map(|m| m.bold(bold))
    }

    /// Sets the italic facet.
    #[must_use]
    pub fn italic(self, italic: bool) -> Self {
        self.map(|m| m.italic(italic))
    }

    /// Sets the point size.
    #[must_use]
    pub fn size(self, size: u32) -> Self {
        self.map(|m| m.size(size))
    }

    /// Offsets the point size.
    #[must_use]
    pub fn size_delta(self, delta: i32) -> Self {
        self.map(|m| m.size_delta(delta))
    }

    /// Replaces the color.
    #[must_use]
    pub fn color(self, color: Color) -> Self {
        self.map(|m| m.color(color))
    }

    /// Removes the color.
    #[must_use]
    pub fn clear_color(self) -> Self {
        self.map(FontModifier::clear_color)
    }

    /// Sets the underline facet.
    #[must_use]
    pub fn underline(self, underline: bool) -> Self {
        self.map(|m| m.underline(underline))
    }

    /// Replaces the font.
    #[must_use]
    pub fn font(mut self, font: impl Into<FontSource>) -> Self {
        self.modifier.put(AttributeValue::Font(font.into()));
        self
    }

    /// Installs a clickable action.
    #[must_use]
    pub fn clickable(mut self, action: Arc<ClickableTextAction>) -> Self {
        self.modifier.put(AttributeValue::Clickable(action));
        self
    }

    /// Removes the clickable action.
    #[must_use]
    pub fn clear_clickable(mut self) -> Self {
        self.modifier
            .bag_mut()
            .put_clear_unchecked(AttributeKey::Clickable);
        self
    }

    fn map(self, f: impl FnOnce(FontModifier) -> FontModifier) -> Self {
        Self {
            modifier: f(self.modifier),
        }
    }
}

impl From<AttributeBag> for BasicStyleModifier {
    fn from(bag: AttributeBag) -> Self {
        Self::from_bag(bag)
    }
}

impl TextStyleModifier for BasicStyleModifier {
    fn modify(&self, style: &Arc<TextStyle>) -> Arc<TextStyle> {
        let bag = self.modifier.bag();
        modify_style(&self.modifier, bag.font(), bag.clickable(), style)
    }
}

/// The shared modification algorithm.
///
/// `facets` supplies the font facets; `font` and `clickable` are the reserved attributes (or
/// `Unset` when the caller does not recognize them).
pub(super) fn modify_style(
    facets: &FontModifier,
    font: Setting<&FontSource>,
    clickable: Setting<&Arc<ClickableTextAction>>,
    style: &Arc<TextStyle>,
) -> Arc<TextStyle> {
    let current_font = style.font();
    let current_action = style.action();
    let mut changed = false;

    let mut new_font = Arc::clone(current_font);
    if let Setting::Set(source) = font {
        let candidate = source.merge_onto(current_font);
        if candidate != **current_font {
            new_font = Arc::new(candidate);
            changed = true;
        }
    }

    let mut new_action = current_action.cloned();
    match clickable {
        Setting::Unset => {}
        Setting::Clear => {
            if current_action.is_some() {
                new_action = None;
                changed = true;
            }
        }
        Setting::Set(action) => {
            if current_action.map(|current| &**current) != Some(&**action) {
                new_action = Some(Arc::clone(action));
                changed = true;
            }
        }
    }

    let modified = match &**style {
        TextStyle::Deferred(deferred) => {
            let pending = facets.facets();
            let merged = match deferred.modifier() {
                Some(existing) => existing.compose(&pending),
                None => pending,
            };
            let merged = (!merged.is_empty()).then_some(merged);
            if !changed && merged.as_ref() == deferred.modifier() {
                return Arc::clone(style);
            }
            TextStyle::Deferred(DeferredStyle::new(new_font, merged).with_action(new_action))
        }
        TextStyle::Resolved(_) => {
            let derived = facets.derive(&new_font);
            if !changed && Arc::ptr_eq(&derived, current_font) {
                return Arc::clone(style);
            }
            TextStyle::Resolved(ResolvedStyle::new(derived).with_action(new_action))
        }
    };

    log::trace!(target: "text_modifier::modify", "{style} -> {modified}");
    Arc::new(modified)
}
