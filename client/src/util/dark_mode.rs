//! Light/dark theme preference.
//!
//! A stored choice (`localStorage["helpdesk_theme"]`) wins over the system
//! `prefers-color-scheme`. The result lands on `<html data-theme="...">`,
//! which `style/main.css` keys its palette on. Without a browser nothing is
//! stored and the light theme is used.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

pub const THEME_KEY: &str = "helpdesk_theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Value for both the `data-theme` attribute and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. `"true"`/`"false"` from older builds are accepted.
    pub fn parse(stored: &str) -> Option<Self> {
        match stored.trim() {
            "dark" | "true" => Some(Self::Dark),
            "light" | "false" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }
}

/// Stored choice first, then the system preference.
pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Theme {
    stored
        .and_then(Theme::parse)
        .unwrap_or(Theme::from_dark(system_prefers_dark))
}

/// Whether the page should start dark.
pub fn read_preference() -> bool {
    resolve(stored_theme().as_deref(), system_prefers_dark()).is_dark()
}

/// Set `data-theme` on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            let _ = el.set_attribute("data-theme", Theme::from_dark(enabled).as_str());
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = enabled;
    }
}

/// Flip the theme, apply it, and remember the choice. Returns the new dark flag.
pub fn toggle(current: bool) -> bool {
    let next = Theme::from_dark(current).toggled();
    apply(next.is_dark());
    persist(next);
    next.is_dark()
}

fn stored_theme() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        crate::util::browser::local_storage()?
            .get_item(THEME_KEY)
            .ok()
            .flatten()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

fn persist(theme: Theme) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = crate::util::browser::local_storage() {
            let _ = storage.set_item(THEME_KEY, theme.as_str());
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = theme;
    }
}
