// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style modifiers.
//!
//! A modifier turns a [`TextStyle`] into a new one. Modifiers never touch their input: the result
//! is either the input itself (same `Arc`) when nothing applies, or a freshly built style.
//!
//! - [`FontModifier`] changes font facets (family, bold, italic, size, color, underline).
//! - [`BasicStyleModifier`] additionally replaces the whole font and the clickable action.

mod basic;
mod font_modifier;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use basic::BasicStyleModifier;
pub use font_modifier::FontModifier;

use crate::style::TextStyle;

/// Something that derives a new style from an existing one.
pub trait TextStyleModifier {
    /// Returns the modified style.
    ///
    /// Implementations return `style` itself (`Arc::ptr_eq` holds) when no change applies.
    fn modify(&self, style: &Arc<TextStyle>) -> Arc<TextStyle>;
}

impl<M: TextStyleModifier + ?Sized> TextStyleModifier for &M {
    #[inline]
    fn modify(&self, style: &Arc<TextStyle>) -> Arc<TextStyle> {
        (**self).modify(style)
    }
}

impl<M: TextStyleModifier + ?Sized> TextStyleModifier for Box<M> {
    #[inline]
    fn modify(&self, style: &Arc<TextStyle>) -> Arc<TextStyle> {
        (**self).modify(style)
    }
}

/// Applies each modifier in turn. Identity is preserved when every step is a no-op.
impl<M: TextStyleModifier> TextStyleModifier for [M] {
    fn modify(&self, style: &Arc<TextStyle>) -> Arc<TextStyle> {
        let mut current = Arc::clone(style);
        for modifier in self {
            current = modifier.modify(&current);
        }
        current
    }
}
