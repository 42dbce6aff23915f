mod detect;
pub mod gsettings;
pub mod macos;
pub mod windows;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

pub use detect::{
    SystemSource, ThemeSource, UnsupportedSource, is_dark, is_light, resolve_theme, system_source,
};

/// The OS-wide appearance setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    Unknown,
}

impl Theme {
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    /// Parse `dark` or `light` in any case; an empty value is `Unknown`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Ok(Self::Unknown);
        }
        if value.eq_ignore_ascii_case("dark") {
            Ok(Self::Dark)
        } else if value.eq_ignore_ascii_case("light") {
            Ok(Self::Light)
        } else {
            Err(ThemeError::InvalidTheme {
                value: value.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("".parse::<Theme>().unwrap(), Theme::Unknown);
    }

    #[test]
    fn rejects_other_names() {
        let err = "sepia".parse::<Theme>().unwrap_err();
        assert!(matches!(err, ThemeError::InvalidTheme { ref value } if value == "sepia"));
    }

    #[test]
    fn display_round_trips_for_known_variants() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
        assert_eq!(Theme::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"unknown\"").unwrap(),
            Theme::Unknown
        );
    }

    #[test]
    fn predicates_match_variants() {
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Dark.is_light());
        assert!(Theme::Light.is_light());
        assert!(!Theme::Unknown.is_dark());
        assert!(!Theme::Unknown.is_light());
    }
}
