//! Property-based invariants for background resolution.
//!
//! 1. Weak color layers never force a text color.
//! 2. Strong color layers always force text matching the fill's darkness.
//! 3. A bare `dark: true` forces dark-contrast text.
//! 4. Resolution is deterministic.
//! 5. Token darkness agrees with the resolved text color.
//! 6. Arbitrary token names never panic.

use dropmenu_style::{
    BackgroundSpec, OpacityLevel, Rgb, StyledBackground, TextColor, Theme, ThemeMode,
    background_is_dark, resolve_background, themes,
};
use proptest::prelude::*;

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn mode_strategy() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark)]
}

fn level_strategy() -> impl Strategy<Value = OpacityLevel> {
    prop_oneof![
        Just(OpacityLevel::Weak),
        Just(OpacityLevel::Medium),
        Just(OpacityLevel::Strong),
    ]
}

fn theme_with(color: Rgb, mode: ThemeMode) -> Theme {
    Theme::builder().mode(mode).color("brand", color).build()
}

fn styled_strategy() -> impl Strategy<Value = BackgroundSpec> {
    (
        proptest::option::of(prop_oneof![
            Just("brand".to_owned()),
            Just("light-1".to_owned()),
            Just("nope".to_owned()),
            Just("#123456".to_owned()),
        ]),
        proptest::option::of(Just("url(img.png)".to_owned())),
        proptest::option::of(level_strategy()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(color, image, opacity, dark)| {
            BackgroundSpec::Styled(StyledBackground {
                color,
                image,
                opacity,
                dark,
                ..StyledBackground::default()
            })
        })
}

proptest! {
    #[test]
    fn weak_opacity_never_forces_text(color in rgb_strategy(), mode in mode_strategy()) {
        let theme = theme_with(color, mode);
        let spec = StyledBackground::new().color("brand").opacity(OpacityLevel::Weak).into();
        let paint = resolve_background(&spec, &theme).unwrap();
        prop_assert_eq!(paint.text, TextColor::Inherit);
        prop_assert!(paint.fill.is_some());
    }

    #[test]
    fn strong_opacity_forces_matching_text(color in rgb_strategy(), mode in mode_strategy()) {
        let theme = theme_with(color, mode);
        let spec = StyledBackground::new().color("brand").opacity(OpacityLevel::Strong).into();
        let paint = resolve_background(&spec, &theme).unwrap();
        let fill = paint.fill.unwrap();
        let expected = theme.text.for_background(theme.is_dark_color(fill.rgb()));
        prop_assert_eq!(paint.text, TextColor::Forced(expected));
    }

    #[test]
    fn bare_dark_hint_forces_dark_text(mode in mode_strategy()) {
        let theme = themes::base(mode);
        let spec = StyledBackground::new().dark(true).into();
        let paint = resolve_background(&spec, &theme).unwrap();
        prop_assert_eq!(paint.text, TextColor::Forced(theme.text.on_dark));
    }

    #[test]
    fn explicit_hint_always_wins(spec in styled_strategy(), mode in mode_strategy()) {
        let theme = themes::base(mode);
        let BackgroundSpec::Styled(styled) = &spec else {
            unreachable!();
        };
        let paint = resolve_background(&spec, &theme).unwrap();
        if let Some(dark) = styled.dark {
            prop_assert_eq!(paint.text, TextColor::Forced(theme.text.for_background(dark)));
            prop_assert_eq!(background_is_dark(&spec, &theme), Some(dark));
        }
    }

    #[test]
    fn resolution_is_deterministic(spec in styled_strategy(), mode in mode_strategy()) {
        let theme = themes::base(mode);
        prop_assert_eq!(resolve_background(&spec, &theme), resolve_background(&spec, &theme));
        prop_assert_eq!(background_is_dark(&spec, &theme), background_is_dark(&spec, &theme));
    }

    #[test]
    fn token_darkness_matches_text(color in rgb_strategy(), mode in mode_strategy()) {
        let theme = theme_with(color, mode);
        let spec = BackgroundSpec::token("brand");
        let paint = resolve_background(&spec, &theme).unwrap();
        let dark = background_is_dark(&spec, &theme).unwrap();
        prop_assert_eq!(paint.text, TextColor::Forced(theme.text.for_background(dark)));
        prop_assert_eq!(paint.fill, Some(color.opaque()));
    }

    #[test]
    fn arbitrary_tokens_do_not_panic(name in ".{0,24}", mode in mode_strategy()) {
        let theme = themes::base(mode);
        let spec = BackgroundSpec::token(name);
        let _ = resolve_background(&spec, &theme);
        let _ = background_is_dark(&spec, &theme);
    }
}
