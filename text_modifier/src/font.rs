// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable font descriptors.

use core::fmt;
use std::sync::Arc;

use peniko::Color;

use crate::error::{Error, Result};

/// The smallest point size a derived font can have.
pub const MIN_FONT_SIZE: u32 = 1;

/// Style flags of a font: the combination of bold and italic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFlags {
    /// Neither bold nor italic.
    #[default]
    Plain,
    /// Bold.
    Bold,
    /// Italic.
    Italic,
    /// Bold and italic.
    BoldItalic,
}

impl FontFlags {
    /// Builds flags from the two independent facets.
    pub const fn from_parts(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Plain,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }

    /// Decodes the conventional bit encoding: `PLAIN = 0`, `BOLD = 1`, `ITALIC = 2`.
    ///
    /// ```
    /// use text_modifier::FontFlags;
    ///
    /// assert_eq!(FontFlags::from_bits(3).unwrap(), FontFlags::BoldItalic);
    /// assert!(FontFlags::from_bits(4).is_err());
    /// ```
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(Self::Plain),
            1 => Ok(Self::Bold),
            2 => Ok(Self::Italic),
            3 => Ok(Self::BoldItalic),
            _ => Err(Error::InvalidFontFlags(bits)),
        }
    }

    /// Returns the bit encoding accepted by [`FontFlags::from_bits`].
    pub const fn bits(self) -> u8 {
        match self {
            Self::Plain => 0,
            Self::Bold => 1,
            Self::Italic => 2,
            Self::BoldItalic => 3,
        }
    }

    /// Returns whether the bold facet is set.
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    /// Returns whether the italic facet is set.
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }

    /// Returns these flags with the bold facet replaced.
    #[must_use]
    pub const fn with_bold(self, bold: bool) -> Self {
        Self::from_parts(bold, self.is_italic())
    }

    /// Returns these flags with the italic facet replaced.
    #[must_use]
    pub const fn with_italic(self, italic: bool) -> Self {
        Self::from_parts(self.is_bold(), italic)
    }
}

impl fmt::Display for FontFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BoldItalic => "bold italic",
        })
    }
}

/// A host font: family, style flags and point size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    pub(crate) family: Arc<str>,
    pub(crate) flags: FontFlags,
    pub(crate) size: u32,
}

impl Font {
    /// Creates a font descriptor.
    pub fn new(family: impl Into<Arc<str>>, flags: FontFlags, size: u32) -> Self {
        Self {
            family: family.into(),
            flags,
            size,
        }
    }

    /// Returns the family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the style flags.
    pub const fn flags(&self) -> FontFlags {
        self.flags
    }

    /// Returns the point size.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns a copy with the family replaced.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<Arc<str>>) -> Self {
        self.family = family.into();
        self
    }

    /// Returns a copy with the style flags replaced.
    #[must_use]
    pub fn with_flags(mut self, flags: FontFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns a copy with the point size replaced.
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}pt", self.family, self.flags, self.size)
    }
}

/// A [`Font`] with the color and underline facets a text run also needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedFont {
    pub(crate) font: Font,
    pub(crate) color: Option<Color>,
    pub(crate) underline: bool,
}

impl ExtendedFont {
    /// Creates an extended font with no color and no underline.
    pub fn new(font: Font) -> Self {
        Self {
            font,
            color: None,
            underline: false,
        }
    }

    /// Returns the plain font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Returns the color, if any.
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns whether text is underlined.
    pub const fn underline(&self) -> bool {
        self.underline
    }

    /// Returns a copy with the plain font replaced, keeping color and underline.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Returns a copy with the color replaced.
    #[must_use]
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Returns a copy with the underline facet replaced.
    #[must_use]
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }
}

impl From<Font> for ExtendedFont {
    fn from(font: Font) -> Self {
        Self::new(font)
    }
}

impl fmt::Display for ExtendedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.font)?;
        if let Some(color) = self.color {
            let c = color.to_rgba8();
            write!(f, " #{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)?;
        }
        if self.underline {
            f.write_str(" underline")?;
        }
        Ok(())
    }
}

/// A signed point-size offset with bounds on the result.
///
/// Applying a delta computes `size + delta`, clamped to `floor..=ceiling`. Deltas compose exactly
/// with [`SizeDelta::then`], so a chain of deltas can be stored as one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizeDelta {
    delta: i64,
    floor: u32,
    ceiling: u32,
}

impl SizeDelta {
    /// Creates a delta floored at [`MIN_FONT_SIZE`].
    pub const fn by(delta: i32) -> Self {
        Self {
            delta: delta as i64,
            floor: MIN_FONT_SIZE,
            ceiling: u32::MAX,
        }
    }

    /// Returns the signed offset.
    pub const fn delta(self) -> i64 {
        self.delta
    }

    /// Returns the lower bound of the result.
    pub const fn floor(self) -> u32 {
        self.floor
    }

    /// Returns the upper bound of the result.
    pub const fn ceiling(self) -> u32 {
        self.ceiling
    }

    /// Applies the delta to `size`.
    pub fn apply(self, size: u32) -> u32 {
        clamp_size(
            i64::from(size).saturating_add(self.delta),
            self.floor,
            self.ceiling,
        )
    }

    /// Returns the delta equivalent to applying `self` and then `later`.
    ///
    /// ```
    /// use text_modifier::SizeDelta;
    ///
    /// let a = SizeDelta::by(-5);
    /// let b = SizeDelta::by(3);
    /// for size in [1, 2, 6, 12] {
    ///     assert_eq!(a.then(b).apply(size), b.apply(a.apply(size)));
    /// }
    /// ```
    #[must_use]
    pub fn then(self, later: Self) -> Self {
        // Shifting then clamping a clamped value is a clamp to the shifted, re-clamped bounds.
        let shift = |bound: u32| {
            clamp_size(
                i64::from(bound).saturating_add(later.delta),
                later.floor,
                later.ceiling,
            )
        };
        Self {
            delta: self.delta.saturating_add(later.delta),
            floor: shift(self.floor),
            ceiling: shift(self.ceiling),
        }
    }
}

fn clamp_size(value: i64, floor: u32, ceiling: u32) -> u32 {
    let clamped = value.clamp(i64::from(floor), i64::from(ceiling));
    u32::try_from(clamped).unwrap_or(ceiling)
}

/// Payload of the reserved font attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum FontSource {
    /// A plain font; the current color and underline are kept.
    Plain(Font),
    /// A full replacement, used as is.
    Extended(ExtendedFont),
}

impl FontSource {
    /// Computes the extended font this source yields on top of `current`.
    pub fn merge_onto(&self, current: &ExtendedFont) -> ExtendedFont {
        match self {
            Self::Plain(font) => current.clone().with_font(font.clone()),
            Self::Extended(ext) => ext.clone(),
        }
    }
}

impl From<Font> for FontSource {
    fn from(font: Font) -> Self {
        Self::Plain(font)
    }
}

impl From<ExtendedFont> for FontSource {
    fn from(font: ExtendedFont) -> Self {
        Self::Extended(font)
    }
}
