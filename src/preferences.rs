// Dark mode preference.
use crate::storage::KeyValueStore;
use anyhow::Result;
use strum::{Display, EnumIter};

pub const DARK_MODE_KEY: &str = "darkMode";

/// Class added to the page body while dark mode is on.
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the toggle button: it offers the other theme.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    /// Body class for this theme, if any.
    pub fn body_class(self) -> Option<&'static str> {
        self.is_dark().then_some(DARK_MODE_CLASS)
    }
}

/// Only the exact value `"true"` selects dark mode.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Result<Theme> {
    let dark = store.get(DARK_MODE_KEY)?.as_deref() == Some("true");
    Ok(if dark { Theme::Dark } else { Theme::Light })
}

/// Flips the stored theme and returns the new one.
pub fn toggle_theme<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Theme> {
    let theme = load_theme(store)?.toggled();
    store.set(DARK_MODE_KEY, if theme.is_dark() { "true" } else { "false" })?;
    log::info!("Theme switched to {}", theme);
    Ok(theme)
}
