// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use peniko::color::palette::css;
use rstest::rstest;

use super::{BasicStyleModifier, FontModifier, TextStyleModifier};
use crate::action::ClickableTextAction;
use crate::font::{ExtendedFont, Font, FontFlags};
use crate::style::TextStyle;

fn sans(flags: FontFlags, size: u32) -> Font {
    Font::new("Sans", flags, size)
}

fn ext(flags: FontFlags, size: u32) -> Arc<ExtendedFont> {
    Arc::new(ExtendedFont::new(sans(flags, size)))
}

fn resolved(flags: FontFlags, size: u32) -> Arc<TextStyle> {
    Arc::new(TextStyle::resolved(sans(flags, size)))
}

#[rstest]
#[case(12, 14, -2, 12)]
#[case(12, 3, -5, 1)]
#[case(12, 10, 4, 14)]
#[case(8, 1, -1, 1)]
fn absolute_size_applies_before_delta(
    #[case] start: u32,
    #[case] absolute: u32,
    #[case] delta: i32,
    #[case] expected: u32,
) {
    let modifier = FontModifier::new().size_delta(delta).size(absolute);
    let derived = modifier.derive(&ext(FontFlags::Plain, start));
    assert_eq!(derived.font().size(), expected);
}

#[test]
fn size_delta_is_floored() {
    let derived = FontModifier::new()
        .size_delta(-40)
        .derive(&ext(FontFlags::Plain, 12));
    assert_eq!(derived.font().size(), 1);
}

#[test]
fn unchanged_facets_return_the_same_font() {
    let font = ext(FontFlags::Bold, 12);
    let modifier = FontModifier::new()
        .family("Sans")
        .bold(true)
        .italic(false)
        .size(12)
        .underline(false);
    assert!(
        Arc::ptr_eq(&modifier.derive(&font), &font),
        "no facet changed value, the input must come back"
    );
    assert!(Arc::ptr_eq(&FontModifier::new().derive(&font), &font));
}

#[test]
fn clear_color_always_removes_color() {
    let colored =
        Arc::new(ExtendedFont::new(sans(FontFlags::Plain, 12)).with_color(Some(css::RED)));
    let modifier = FontModifier::new().clear_color();

    let derived = modifier.derive(&colored);
    assert_eq!(derived.color(), None);
    assert_eq!(derived.font(), colored.font());

    let plain = ext(FontFlags::Plain, 12);
    assert!(Arc::ptr_eq(&modifier.derive(&plain), &plain));
}

#[test]
fn color_family_and_underline_are_replaced() {
    let modifier = FontModifier::new()
        .family("Serif")
        .color(css::BLUE)
        .underline(true);
    let derived = modifier.derive(&ext(FontFlags::Italic, 9));
    assert_eq!(derived.font().family(), "Serif");
    assert_eq!(derived.font().flags(), FontFlags::Italic);
    assert_eq!(derived.color(), Some(css::BLUE));
    assert!(derived.underline());
}

#[test]
fn derive_leaves_input_untouched() {
    let font = ext(FontFlags::Plain, 12);
    let before = (*font).clone();
    let _ = FontModifier::new().bold(true).size(20).derive(&font);
    assert_eq!(*font, before);
}

#[test]
fn reserved_keys_do_not_count_as_font_facets() {
    let action = Arc::new(ClickableTextAction::new("open"));
    let modifier = BasicStyleModifier::new()
        .clickable(action)
        .font(sans(FontFlags::Bold, 10));
    assert!(!modifier.is_empty());
    assert!(modifier.font_modifier().is_empty());
    assert!(modifier.font_modifier().facets().bag().is_empty());
}

#[test]
fn compose_matches_sequential_derivation() {
    let pairs = [
        (
            FontModifier::new().size_delta(-2),
            FontModifier::new().size(14),
        ),
        (
            FontModifier::new().size(14),
            FontModifier::new().size_delta(2),
        ),
        (
            FontModifier::new().size_delta(-5),
            FontModifier::new().size_delta(3),
        ),
        (
            FontModifier::new().size(4).size_delta(-10),
            FontModifier::new().size_delta(6),
        ),
        (
            FontModifier::new().bold(true).color(css::RED),
            FontModifier::new().bold(false).clear_color(),
        ),
        (
            FontModifier::new().clear_color(),
            FontModifier::new().color(css::GREEN),
        ),
        (
            FontModifier::new().family("Mono"),
            FontModifier::new().italic(true),
        ),
    ];
    for (first, second) in &pairs {
        let composed = first.compose(second);
        for size in [1, 2, 3, 6, 12, 30] {
            let font = Arc::new(
                ExtendedFont::new(sans(FontFlags::Plain, size)).with_color(Some(css::BLACK)),
            );
            assert_eq!(
                *composed.derive(&font),
                *second.derive(&first.derive(&font)),
                "composition of {first:?} and {second:?} diverged at size {size}"
            );
        }
    }
}

#[test]
fn compose_is_associative() {
    let a = FontModifier::new().size_delta(-3).bold(true);
    let b = FontModifier::new().size_delta(5).clear_color();
    let c = FontModifier::new().size_delta(-4).color(css::RED);
    assert_eq!(a.compose(&b).compose(&c), a.compose(&b.compose(&c)));
}

#[test]
fn bold_and_size_scenario() {
    let style = resolved(FontFlags::Plain, 12);
    let modifier = BasicStyleModifier::new().bold(true).size(14);

    let result = modifier.modify(&style);
    assert!(!result.is_deferred());
    assert_eq!(result.font().font(), &sans(FontFlags::Bold, 14));
}

#[test]
fn italic_and_size_delta_scenario() {
    let style = resolved(FontFlags::Bold, 12);
    let modifier = BasicStyleModifier::new().italic(true).size_delta(-2);

    let result = modifier.modify(&style);
    assert_eq!(result.font().font().size(), 10);
    assert_eq!(result.font().font().flags(), FontFlags::BoldItalic);
}

#[test]
fn clearing_clickable_removes_action_once() {
    let action = Arc::new(ClickableTextAction::new("follow"));
    let style = Arc::new(TextStyle::resolved(sans(FontFlags::Plain, 12)).with_action(Some(action)));
    let modifier = BasicStyleModifier::new().clear_clickable();

    let cleared = modifier.modify(&style);
    assert!(cleared.action().is_none());
    assert_eq!(cleared.font(), style.font());

    let again = modifier.modify(&cleared);
    assert!(Arc::ptr_eq(&again, &cleared), "second clear is a no-op");
}

#[test]
fn empty_modifier_returns_the_same_style() {
    let modifier = BasicStyleModifier::new();
    let concrete = resolved(FontFlags::Italic, 10);
    assert!(Arc::ptr_eq(&modifier.modify(&concrete), &concrete));

    let deferred = Arc::new(TextStyle::deferred(
        sans(FontFlags::Plain, 10),
        Some(FontModifier::new().bold(true)),
    ));
    assert!(Arc::ptr_eq(&modifier.modify(&deferred), &deferred));
    assert!(Arc::ptr_eq(&FontModifier::new().modify(&deferred), &deferred));
}

#[test]
fn absolute_modifier_is_idempotent() {
    let action = Arc::new(ClickableTextAction::new("x"));
    let modifier = BasicStyleModifier::new()
        .bold(true)
        .size(18)
        .color(css::NAVY)
        .underline(true)
        .clickable(action);
    let style = resolved(FontFlags::Italic, 12);

    let once = modifier.modify(&style);
    let twice = modifier.modify(&once);
    assert_eq!(*twice, *once);
    assert!(Arc::ptr_eq(&twice, &once));
}

#[test]
fn plain_font_replacement_keeps_color_and_underline() {
    let font = ExtendedFont::new(sans(FontFlags::Plain, 12))
        .with_color(Some(css::RED))
        .with_underline(true);
    let style = Arc::new(TextStyle::resolved(font));
    let modifier = BasicStyleModifier::new().font(Font::new("Mono", FontFlags::Bold, 9));

    let result = modifier.modify(&style);
    assert_eq!(result.font().font(), &Font::new("Mono", FontFlags::Bold, 9));
    assert_eq!(result.font().color(), Some(css::RED));
    assert!(result.font().underline());
}

#[test]
fn extended_font_replacement_is_used_as_is() {
    let style = Arc::new(TextStyle::resolved(
        ExtendedFont::new(sans(FontFlags::Plain, 12)).with_color(Some(css::RED)),
    ));
    let replacement = ExtendedFont::new(Font::new("Mono", FontFlags::Plain, 9));
    let modifier = BasicStyleModifier::new().font(replacement.clone());

    let result = modifier.modify(&style);
    assert_eq!(**result.font(), replacement);

    // Replacing with an equal font changes nothing.
    let same = BasicStyleModifier::new().font(sans(FontFlags::Plain, 12));
    assert!(Arc::ptr_eq(&same.modify(&style), &style));
}

#[test]
fn font_replacement_then_facets_on_resolved_style() {
    let style = resolved(FontFlags::Plain, 12);
    let modifier = BasicStyleModifier::new()
        .font(Font::new("Mono", FontFlags::Plain, 9))
        .size_delta(1);
    let result = modifier.modify(&style);
    assert_eq!(result.font().font(), &Font::new("Mono", FontFlags::Plain, 10));
}

#[test]
fn equal_action_is_not_reinstalled() {
    let first = Arc::new(ClickableTextAction::new("open"));
    let style = Arc::new(TextStyle::resolved(sans(FontFlags::Plain, 12)).with_action(Some(first)));

    let equal = Arc::new(ClickableTextAction::new("open"));
    let result = BasicStyleModifier::new().clickable(equal).modify(&style);
    assert!(Arc::ptr_eq(&result, &style));

    let other = Arc::new(ClickableTextAction::new("close"));
    let result = BasicStyleModifier::new()
        .clickable(Arc::clone(&other))
        .modify(&style);
    assert!(Arc::ptr_eq(result.action().unwrap(), &other));
}

#[test]
fn deferred_style_collects_facets_and_applies_reserved_keys() {
    let style = Arc::new(TextStyle::deferred(sans(FontFlags::Plain, 12), None));
    let action = Arc::new(ClickableTextAction::new("go"));
    let modifier = BasicStyleModifier::new()
        .bold(true)
        .font(Font::new("Mono", FontFlags::Plain, 9))
        .clickable(Arc::clone(&action));

    let result = modifier.modify(&style);
    assert!(result.is_deferred());
    // The font facet is pending, the replacement font is applied right away.
    assert_eq!(result.font().font(), &Font::new("Mono", FontFlags::Plain, 9));
    assert_eq!(result.modifier(), Some(&FontModifier::new().bold(true)));
    assert!(Arc::ptr_eq(result.action().unwrap(), &action));

    // Nothing new to merge: same style back.
    let again = BasicStyleModifier::new().bold(true).modify(&result);
    assert!(Arc::ptr_eq(&again, &result));
}

#[test]
fn deferred_composition_matches_eager_composition() {
    let initial = Some(FontModifier::new().italic(true).size_delta(-1));
    let style = Arc::new(TextStyle::deferred(sans(FontFlags::Plain, 12), initial.clone()));
    let m1 = BasicStyleModifier::new().size(10).bold(true);
    let m2 = BasicStyleModifier::new().size_delta(-12).clear_color();

    let deferred = m2.modify(&m1.modify(&style));

    for base_font in [
        ExtendedFont::new(Font::new("Serif", FontFlags::Plain, 16)),
        ExtendedFont::new(Font::new("Mono", FontFlags::Bold, 3)).with_color(Some(css::RED)),
    ] {
        let base = Arc::new(TextStyle::resolved(base_font));
        let lazy = crate::style::resolve(&deferred, &base);

        let resolved_first = style.based_on(&base).concrete();
        let eager = m2.modify(&m1.modify(&resolved_first));

        assert_eq!(lazy.font(), eager.font());
    }
}

#[test]
fn modifier_slices_apply_in_order() {
    let chain = [
        BasicStyleModifier::new().size(20),
        BasicStyleModifier::new().size_delta(-5),
    ];
    let style = resolved(FontFlags::Plain, 12);
    assert_eq!(chain.modify(&style).font().font().size(), 15);

    let empty = [BasicStyleModifier::new(), BasicStyleModifier::new()];
    assert!(Arc::ptr_eq(&empty.modify(&style), &style));
}

#[test]
fn font_modifier_keeps_action_on_resolved_style() {
    let action = Arc::new(ClickableTextAction::new("keep"));
    let style = Arc::new(
        TextStyle::resolved(sans(FontFlags::Plain, 12)).with_action(Some(Arc::clone(&action))),
    );
    let result = FontModifier::new().underline(true).modify(&style);
    assert!(result.font().underline());
    assert!(Arc::ptr_eq(result.action().unwrap(), &action));
}
