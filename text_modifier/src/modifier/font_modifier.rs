// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use peniko::Color;

use super::{TextStyleModifier, basic};
use crate::bag::{AttributeBag, AttributeKey, AttributeValue, Setting};
use crate::error::Result;
use crate::font::{ExtendedFont, Font, SizeDelta};
use crate::style::TextStyle;

/// Derives new fonts from an [`AttributeBag`] of font facets.
///
/// The recognized facets are applied in a fixed order:
/// 1. family
/// 2. bold
/// 3. italic
/// 4. absolute size
/// 5. size delta, on top of the (possibly replaced) size, floored at [`MIN_FONT_SIZE`]
/// 6. color, or no color for [`Setting::Clear`]
/// 7. underline
///
/// Entries for the reserved [`AttributeKey::Font`] and [`AttributeKey::Clickable`] keys are kept
/// in the bag but ignored here; see [`BasicStyleModifier`](super::BasicStyleModifier).
///
/// [`MIN_FONT_SIZE`]: crate::MIN_FONT_SIZE
///
/// ```
/// use std::sync::Arc;
/// use text_modifier::{ExtendedFont, Font, FontFlags, FontModifier};
///
/// let font = Arc::new(ExtendedFont::new(Font::new("Sans", FontFlags::Plain, 12)));
/// let modifier = FontModifier::new().bold(true).size(14);
///
/// let derived = modifier.derive(&font);
/// assert_eq!(derived.font().flags(), FontFlags::Bold);
/// assert_eq!(derived.font().size(), 14);
///
/// // Nothing to change: the same allocation comes back.
/// assert!(Arc::ptr_eq(&FontModifier::new().derive(&font), &font));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontModifier {
    bag: AttributeBag,
}

impl FontModifier {
    /// Creates a modifier with no entries.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing bag.
    #[inline]
    pub fn from_bag(bag: AttributeBag) -> Self {
        Self { bag }
    }

    /// Returns the underlying bag.
    #[inline]
    pub fn bag(&self) -> &AttributeBag {
        &self.bag
    }

    pub(crate) fn bag_mut(&mut self) -> &mut AttributeBag {
        &mut self.bag
    }

    /// Consumes the modifier, returning the underlying bag.
    #[inline]
    pub fn into_bag(self) -> AttributeBag {
        self.bag
    }

    /// Returns `true` if no font facet has an entry.
    pub fn is_empty(&self) -> bool {
        !self.bag.iter().any(|(key, _)| key.is_font_facet())
    }

    /// See [`AttributeBag::put`].
    pub fn put(&mut self, value: AttributeValue) {
        self.bag.put(value);
    }

    /// See [`AttributeBag::put_clear`].
    pub fn put_clear(&mut self, key: AttributeKey) -> Result<()> {
        self.bag.put_clear(key)
    }

    /// See [`AttributeBag::remove`].
    pub fn remove(&mut self, key: AttributeKey) -> Setting<AttributeValue> {
        self.bag.remove(key)
    }

    /// See [`AttributeBag::clear`].
    pub fn clear(&mut self) {
        self.bag.clear();
    }

    /// Replaces the family.
    #[must_use]
    pub fn family(mut self, family: impl Into<Arc<str>>) -> Self {
        self.bag.put(AttributeValue::Family(family.into()));
        self
    }

    /// Sets the bold facet.
    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.bag.put(AttributeValue::Bold(bold));
        self
    }

    /// Sets the italic facet.
    #[must_use]
    pub fn italic(mut self, italic: bool) -> Self {
        self.bag.put(AttributeValue::Italic(italic));
        self
    }

    /// Sets the point size.
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.bag.put(AttributeValue::Size(size));
        self
    }

    /// Offsets the point size by `delta`.
    #[must_use]
    pub fn size_delta(mut self, delta: i32) -> Self {
        let delta = SizeDelta::by(delta);
        self.bag.put(AttributeValue::SizeDelta(delta));
        self
    }

    /// Replaces the color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.bag.put(AttributeValue::Color(color));
        self
    }

    /// Removes the color.
    #[must_use]
    pub fn clear_color(mut self) -> Self {
        self.bag.put_clear_unchecked(AttributeKey::Color);
        self
    }

    /// Sets the underline facet.
    #[must_use]
    pub fn underline(mut self, underline: bool) -> Self {
        self.bag.put(AttributeValue::Underline(underline));
        self
    }

    /// Returns a modifier holding only the font facets of this one.
    #[must_use]
    pub fn facets(&self) -> Self {
        Self {
            bag: self.bag.without(&AttributeKey::RESERVED),
        }
    }

    /// Returns the modifier equivalent to applying `self` and then `later`.
    ///
    /// Composition is associative, and `a.compose(&b).derive(f)` equals
    /// `b.derive(&a.derive(f))` in value.
    #[must_use]
    pub fn compose(&self, later: &Self) -> Self {
        Self {
            bag: self.bag.merge(&later.bag),
        }
    }

    /// Applies the font facets to `font`.
    ///
    /// Returns `font` itself (the same allocation) when no facet changes its value.
    pub fn derive(&self, font: &Arc<ExtendedFont>) -> Arc<ExtendedFont> {
        let bag = &self.bag;
        let current = font.font();

        let family = match bag.family() {
            Setting::Set(family) => family,
            _ => &current.family,
        };

        let mut flags = current.flags;
        if let Setting::Set(bold) = bag.bold() {
            flags = flags.with_bold(bold);
        }
        if let Setting::Set(italic) = bag.italic() {
            flags = flags.with_italic(italic);
        }

        let mut size = current.size;
        if let Setting::Set(absolute) = bag.size() {
            size = absolute;
        }
        if let Setting::Set(delta) = bag.size_delta() {
            size = delta.apply(size);
        }

        let color = match bag.color() {
            Setting::Set(color) => Some(color),
            Setting::Clear => None,
            Setting::Unset => font.color,
        };

        let underline = bag.underline().value().unwrap_or(font.underline);

        if **family == *current.family
            && flags == current.flags
            && size == current.size
            && color == font.color
            && underline == font.underline
        {
            return Arc::clone(font);
        }

        Arc::new(ExtendedFont {
            font: Font {
                family: Arc::clone(family),
                flags,
                size,
            },
            color,
            underline,
        })
    }
}

impl From<AttributeBag> for FontModifier {
    fn from(bag: AttributeBag) -> Self {
        Self::from_bag(bag)
    }
}

impl TextStyleModifier for FontModifier {
    /// Applies the font facets only; reserved keys in the bag are ignored.
    fn modify(&self, style: &Arc<TextStyle>) -> Arc<TextStyle> {
        basic::modify_style(self, Setting::Unset, Setting::Unset, style)
    }
}
