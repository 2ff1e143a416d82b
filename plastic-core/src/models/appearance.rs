use serde::{Deserialize, Serialize};

/// Light or dark window appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppearanceMode {
    #[default]
    Dark,
    Light,
}

impl AppearanceMode {
    pub fn all() -> &'static [AppearanceMode] {
        &[AppearanceMode::Dark, AppearanceMode::Light]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Dark" => Some(Self::Dark),
            "Light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Name understood by the UI toolkit.
    ///
    /// Matching is case-insensitive; anything unrecognised (including no value
    /// at all) follows the operating system.
    pub fn toolkit_name(value: Option<&str>) -> &'static str {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("dark") => "dark",
            Some("light") => "light",
            _ => "system",
        }
    }
}

/// Accent colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTheme {
    #[default]
    Blue,
    Green,
    #[serde(rename = "Dark Blue")]
    DarkBlue,
}

impl ColorTheme {
    pub fn all() -> &'static [ColorTheme] {
        &[ColorTheme::Blue, ColorTheme::Green, ColorTheme::DarkBlue]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::DarkBlue => "Dark Blue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Blue" => Some(Self::Blue),
            "Green" => Some(Self::Green),
            "Dark Blue" => Some(Self::DarkBlue),
            _ => None,
        }
    }

    /// Theme file name understood by the UI toolkit. Falls back to `"blue"`.
    pub fn toolkit_name(value: Option<&str>) -> &'static str {
        match value.and_then(Self::parse) {
            Some(Self::Green) => "green",
            Some(Self::DarkBlue) => "dark-blue",
            Some(Self::Blue) | None => "blue",
        }
    }
}
