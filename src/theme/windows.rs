//! Theme resolution from the Windows personalization settings.

use tracing::{debug, warn};

use super::{Theme, ThemeSource};
use crate::color::Rgb;
use crate::error::ThemeError;

/// Windows version as read from the configuration store.
///
/// Field order is significant: the derived ordering compares fields
/// lexicographically, so it matches tuple comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub platform: u32,
    pub service_pack_major: u32,
    pub service_pack_minor: u32,
}

impl OsVersion {
    pub const fn new(
        major: u32,
        minor: u32,
        build: u32,
        platform: u32,
        service_pack_major: u32,
        service_pack_minor: u32,
    ) -> Self {
        Self {
            major,
            minor,
            build,
            platform,
            service_pack_major,
            service_pack_minor,
        }
    }
}

/// First release that signals a theme preference (Windows 10, build 10240).
pub const MIN_THEME_VERSION: OsVersion = OsVersion::new(10, 0, 10240, 0, 0, 0);

/// Raw reads the Windows resolver depends on.
pub trait WindowsSettings {
    /// The `AppsUseLightTheme` personalization flag.
    fn apps_use_light_theme(&self) -> Result<u32, ThemeError>;
    fn os_version(&self) -> Result<OsVersion, ThemeError>;
    /// Current UI foreground color from the native UI settings API.
    fn foreground_color(&self) -> Result<Rgb, ThemeError>;
}

pub struct WindowsSource<S> {
    settings: S,
}

impl<S: WindowsSettings> WindowsSource<S> {
    pub const fn new(settings: S) -> Self {
        Self { settings }
    }

    fn from_flag(flag: u32) -> Theme {
        match flag {
            0 => Theme::Dark,
            1 => Theme::Light,
            other => {
                warn!(flag = other, "unexpected AppsUseLightTheme value");
                Theme::Unknown
            }
        }
    }

    /// Used when the personalization flag is absent, e.g. on headless hosts
    /// or installs where the user never picked a theme.
    fn from_foreground(&self) -> Result<Theme, ThemeError> {
        let version = self.settings.os_version()?;
        if version < MIN_THEME_VERSION {
            debug!(?version, "windows release predates theme support");
            return Ok(Theme::Unknown);
        }

        match self.settings.foreground_color() {
            // A light foreground is drawn on a dark background.
            Ok(color) if color.is_light() => Ok(Theme::Dark),
            Ok(_) => Ok(Theme::Light),
            Err(error) => {
                warn!(%error, "ui settings foreground color unavailable");
                Ok(Theme::Unknown)
            }
        }
    }
}

impl<S: WindowsSettings> ThemeSource for WindowsSource<S> {
    fn theme(&self) -> Result<Theme, ThemeError> {
        match self.settings.apps_use_light_theme() {
            Ok(flag) => Ok(Self::from_flag(flag)),
            Err(error) => {
                debug!(%error, "personalization flag missing, using foreground color");
                self.from_foreground()
            }
        }
    }
}
