// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute bags: per-attribute modification requests.
//!
//! Every attribute of a bag is in one of three states, modelled by [`Setting`]:
//! - [`Setting::Unset`]: no opinion, the facet is left as it is
//! - [`Setting::Clear`]: remove the facet (only for facets that can be absent)
//! - [`Setting::Set`]: replace the facet with a value

use core::fmt;
use std::sync::Arc;

use peniko::Color;
use smallvec::SmallVec;

use crate::action::ClickableTextAction;
use crate::error::{Error, Result};
use crate::font::{FontSource, SizeDelta};

/// The state of a single attribute in an [`AttributeBag`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Setting<T> {
    /// No entry: leave the facet unchanged.
    #[default]
    Unset,
    /// Explicitly remove the facet.
    Clear,
    /// Replace the facet.
    Set(T),
}

impl<T> Setting<T> {
    /// Returns `true` for [`Setting::Unset`].
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns `true` for [`Setting::Clear`].
    pub const fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }

    /// Converts from `&Setting<T>` to `Setting<&T>`.
    pub const fn as_ref(&self) -> Setting<&T> {
        match self {
            Self::Unset => Setting::Unset,
            Self::Clear => Setting::Clear,
            Self::Set(value) => Setting::Set(value),
        }
    }

    /// Maps the contained value, keeping `Unset` and `Clear` as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Setting<U> {
        match self {
            Self::Unset => Setting::Unset,
            Self::Clear => Setting::Clear,
            Self::Set(value) => Setting::Set(f(value)),
        }
    }

    /// Returns `later` unless it is `Unset`, in which case `self` is kept.
    #[must_use]
    pub fn or(self, later: Self) -> Self {
        match later {
            Self::Unset => self,
            other => other,
        }
    }

    /// Returns the set value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }
}

/// Names of the attributes a bag can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKey {
    /// Font family name.
    Family,
    /// Bold facet.
    Bold,
    /// Italic facet.
    Italic,
    /// Absolute point size.
    Size,
    /// Signed point size offset, applied after [`AttributeKey::Size`].
    SizeDelta,
    /// Text color.
    Color,
    /// Underline facet.
    Underline,
    /// Replacement font (reserved for style modifiers).
    Font,
    /// Clickable action (reserved for style modifiers).
    Clickable,
}

impl AttributeKey {
    /// The keys a font modifier recognizes, in application order.
    pub const FONT_FACETS: [Self; 7] = [
        Self::Family,
        Self::Bold,
        Self::Italic,
        Self::Size,
        Self::SizeDelta,
        Self::Color,
        Self::Underline,
    ];

    /// The keys only a style modifier recognizes.
    pub const RESERVED: [Self; 2] = [Self::Font, Self::Clickable];

    /// Returns whether [`AttributeBag::put_clear`] accepts this key.
    pub const fn is_clearable(self) -> bool {
        matches!(self, Self::Color | Self::Clickable)
    }

    /// Returns whether this is one of [`AttributeKey::FONT_FACETS`].
    pub const fn is_font_facet(self) -> bool {
        !matches!(self, Self::Font | Self::Clickable)
    }

    /// Returns the attribute's name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Size => "size",
            Self::SizeDelta => "size-delta",
            Self::Color => "color",
            Self::Underline => "underline",
            Self::Font => "font",
            Self::Clickable => "clickable",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// Replace the family name.
    Family(Arc<str>),
    /// Set the bold facet.
    Bold(bool),
    /// Set the italic facet.
    Italic(bool),
    /// Set the point size.
    Size(u32),
    /// Offset the point size.
    SizeDelta(SizeDelta),
    /// Replace the color.
    Color(Color),
    /// Set the underline facet.
    Underline(bool),
    /// Replace the font.
    Font(FontSource),
    /// Install a clickable action.
    Clickable(Arc<ClickableTextAction>),
}

impl AttributeValue {
    /// Returns the attribute this value belongs to.
    pub const fn key(&self) -> AttributeKey {
        match self {
            Self::Family(_) => AttributeKey::Family,
            Self::Bold(_) => AttributeKey::Bold,
            Self::Italic(_) => AttributeKey::Italic,
            Self::Size(_) => AttributeKey::Size,
            Self::SizeDelta(_) => AttributeKey::SizeDelta,
            Self::Color(_) => AttributeKey::Color,
            Self::Underline(_) => AttributeKey::Underline,
            Self::Font(_) => AttributeKey::Font,
            Self::Clickable(_) => AttributeKey::Clickable,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    key: AttributeKey,
    // Never `Unset`: an unset attribute has no entry.
    setting: Setting<AttributeValue>,
}

/// A mapping from attribute to [`Setting`], at most one entry per attribute.
///
/// Writing an attribute that already has an entry replaces it (last write wins).
///
/// ```
/// use text_modifier::{AttributeBag, AttributeKey, AttributeValue, Setting};
///
/// let mut bag = AttributeBag::new();
/// bag.put(AttributeValue::Size(12));
/// bag.put(AttributeValue::Size(14));
/// bag.put_clear(AttributeKey::Color).unwrap();
///
/// assert_eq!(bag.len(), 2);
/// assert_eq!(bag.size(), Setting::Set(14));
/// assert!(bag.get(AttributeKey::Color).is_clear());
/// assert!(bag.get(AttributeKey::Bold).is_unset());
/// ```
///
/// Equality ignores the order in which attributes were written.
#[derive(Clone, Debug, Default)]
pub struct AttributeBag {
    entries: SmallVec<[Entry; 4]>,
}

impl AttributeBag {
    /// Creates an empty bag.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of attributes with an entry.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attribute has an entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` has an entry (set or cleared).
    pub fn contains(&self, key: AttributeKey) -> bool {
        self.position(key).is_some()
    }

    /// Sets an attribute, replacing any previous entry for it.
    pub fn put(&mut self, value: AttributeValue) {
        let key = value.key();
        self.write(key, Setting::Set(value));
    }

    /// Records an explicit request to remove the facet named by `key`.
    ///
    /// Only facets that can be absent ([`AttributeKey::is_clearable`]) accept this.
    pub fn put_clear(&mut self, key: AttributeKey) -> Result<()> {
        if !key.is_clearable() {
            return Err(Error::NotClearable(key));
        }
        self.write(key, Setting::Clear);
        Ok(())
    }

    /// Removes the entry for `key`, returning it to "no opinion".
    pub fn remove(&mut self, key: AttributeKey) -> Setting<AttributeValue> {
        match self.position(key) {
            Some(index) => self.entries.remove(index).setting,
            None => Setting::Unset,
        }
    }

    /// Returns the setting for `key`.
    pub fn get(&self, key: AttributeKey) -> Setting<&AttributeValue> {
        self.position(key)
            .map_or(Setting::Unset, |index| self.entries[index].setting.as_ref())
    }

    /// Removes every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over the entries in the order they were first written.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, Setting<&AttributeValue>)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.key, entry.setting.as_ref()))
    }

    /// Returns a copy of this bag without the entries for `keys`.
    #[must_use]
    pub fn without(&self, keys: &[AttributeKey]) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| !keys.contains(&entry.key))
                .cloned()
                .collect(),
        }
    }

    /// Returns the bag equivalent to applying `self` and then `later`.
    ///
    /// Entries of `later` replace entries of `self`. Size is the exception: a later size delta is
    /// composed with an earlier one, and a later absolute size discards an earlier delta.
    #[must_use]
    pub fn merge(&self, later: &Self) -> Self {
        let mut out = self.clone();
        for entry in &later.entries {
            if matches!(entry.key, AttributeKey::Size | AttributeKey::SizeDelta) {
                continue;
            }
            out.write(entry.key, entry.setting.clone());
        }

        if let Setting::Set(size) = later.size() {
            out.put(AttributeValue::Size(size));
            match later.size_delta() {
                Setting::Set(delta) => out.put(AttributeValue::SizeDelta(delta)),
                _ => {
                    out.remove(AttributeKey::SizeDelta);
                }
            }
        } else if let Setting::Set(delta) = later.size_delta() {
            let composed = match out.size_delta() {
                Setting::Set(earlier) => earlier.then(delta),
                _ => delta,
            };
            out.put(AttributeValue::SizeDelta(composed));
        }
        out
    }

    /// Returns the family setting.
    pub fn family(&self) -> Setting<&Arc<str>> {
        self.typed(AttributeKey::Family, |value| match value {
            AttributeValue::Family(family) => Some(family),
            _ => None,
        })
    }

    /// Returns the bold setting.
    pub fn bold(&self) -> Setting<bool> {
        self.typed(AttributeKey::Bold, |value| match value {
            AttributeValue::Bold(bold) => Some(*bold),
            _ => None,
        })
    }

    /// Returns the italic setting.
    pub fn italic(&self) -> Setting<bool> {
        self.typed(AttributeKey::Italic, |value| match value {
            AttributeValue::Italic(italic) => Some(*italic),
            _ => None,
        })
    }

    /// Returns the absolute size setting.
    pub fn size(&self) -> Setting<u32> {
        self.typed(AttributeKey::Size, |value| match value {
            AttributeValue::Size(size) => Some(*size),
            _ => None,
        })
    }

    /// Returns the size delta setting.
    pub fn size_delta(&self) -> Setting<SizeDelta> {
        self.typed(AttributeKey::SizeDelta, |value| match value {
            AttributeValue::SizeDelta(delta) => Some(*delta),
            _ => None,
        })
    }

    /// Returns the color setting.
    pub fn color(&self) -> Setting<Color> {
        self.typed(AttributeKey::Color, |value| match value {
            AttributeValue::Color(color) => Some(*color),
            _ => None,
        })
    }

    /// Returns the underline setting.
    pub fn underline(&self) -> Setting<bool> {
        self.typed(AttributeKey::Underline, |value| match value {
            AttributeValue::Underline(underline) => Some(*underline),
            _ => None,
        })
    }

    /// Returns the replacement font setting.
    pub fn font(&self) -> Setting<&FontSource> {
        self.typed(AttributeKey::Font, |value| match value {
            AttributeValue::Font(font) => Some(font),
            _ => None,
        })
    }

    /// Returns the clickable action setting.
    pub fn clickable(&self) -> Setting<&Arc<ClickableTextAction>> {
        self.typed(AttributeKey::Clickable, |value| match value {
            AttributeValue::Clickable(action) => Some(action),
            _ => None,
        })
    }

    /// Records a clear for a key the caller knows to be clearable.
    pub(crate) fn put_clear_unchecked(&mut self, key: AttributeKey) {
        debug_assert!(key.is_clearable(), "`{key}` cannot be cleared");
        self.write(key, Setting::Clear);
    }

    fn position(&self, key: AttributeKey) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    fn write(&mut self, key: AttributeKey, setting: Setting<AttributeValue>) {
        debug_assert!(!setting.is_unset(), "bag entries are never unset");
        match self.position(key) {
            Some(index) => self.entries[index].setting = setting,
            None => self.entries.push(Entry { key, setting }),
        }
    }

    fn typed<'a, T>(
        &'a self,
        key: AttributeKey,
        pick: impl FnOnce(&'a AttributeValue) -> Option<T>,
    ) -> Setting<T> {
        match self.get(key) {
            Setting::Unset => Setting::Unset,
            Setting::Clear => Setting::Clear,
            Setting::Set(value) => pick(value).map_or(Setting::Unset, Setting::Set),
        }
    }
}

impl PartialEq for AttributeBag {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|entry| other.get(entry.key) == entry.setting.as_ref())
    }
}

impl Extend<AttributeValue> for AttributeBag {
    fn extend<I: IntoIterator<Item = AttributeValue>>(&mut self, iter: I) {
        for value in iter {
            self.put(value);
        }
    }
}

impl FromIterator<AttributeValue> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = AttributeValue>>(iter: I) -> Self {
        let mut bag = Self::new();
        bag.extend(iter);
        bag
    }
}
