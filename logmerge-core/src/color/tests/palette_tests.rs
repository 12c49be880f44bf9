use crate::color::{ColorScheme, Palette};

#[test]
fn plain_palette_is_identity() {
    // Arrange
    let palette = Palette::plain();

    // Act / Assert
    assert_eq!((palette.normal)("text"), "text");
    assert_eq!((palette.grep)("text"), "text");
    assert_eq!((palette.highlight)("text"), "text");
}

#[test]
fn xterm_palette_wraps_text_in_escape_codes() {
    // Arrange
    let palette = Palette::xterm(64);

    // Act
    let normal = (palette.normal)("text");
    let grep = (palette.grep)("text");

    // Assert
    assert!(normal.starts_with('\u{1b}'));
    assert!(normal.contains("text"));
    assert_ne!(normal, grep);
}

#[test]
fn off_scheme_has_a_single_plain_palette() {
    // Act
    let palettes = ColorScheme::Off.palettes();

    // Assert
    assert_eq!(palettes.len(), 1);
    assert_eq!((palettes[0].normal)("x"), "x");
}

#[test]
fn dark_and_light_cycle_eight_colors() {
    // Act
    let dark = ColorScheme::Dark.palettes();
    let light = ColorScheme::Light.palettes();

    // Assert
    assert_eq!(dark.len(), 8);
    assert_eq!(light.len(), 8);
    assert_ne!((dark[0].normal)("x"), (light[0].normal)("x"));
    assert_eq!((dark[1].normal)("x"), (light[1].normal)("x"));
}
