use super::*;

// =============================================================================
// Theme
// =============================================================================

#[test]
fn theme_names_match_stylesheet_selectors() {
    assert_eq!(Theme::Dark.as_str(), "dark");
    assert_eq!(Theme::Light.as_str(), "light");
}

#[test]
fn stored_values_parse_including_legacy_flags() {
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse(" light "), Some(Theme::Light));
    assert_eq!(Theme::parse("true"), Some(Theme::Dark));
    assert_eq!(Theme::parse("false"), Some(Theme::Light));
    assert_eq!(Theme::parse("sepia"), None);
}

#[test]
fn toggled_flips_theme() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn stored_choice_beats_system_preference() {
    assert_eq!(resolve(Some("light"), true), Theme::Light);
    assert_eq!(resolve(Some("dark"), false), Theme::Dark);
}

#[test]
fn missing_or_unknown_choice_follows_system() {
    assert_eq!(resolve(None, true), Theme::Dark);
    assert_eq!(resolve(Some("sepia"), false), Theme::Light);
}

#[cfg(not(feature = "csr"))]
#[test]
fn without_a_browser_preference_is_light_and_toggle_still_flips() {
    assert!(!read_preference());
    assert!(toggle(false));
    assert!(!toggle(true));
}
