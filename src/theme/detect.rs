use tracing::debug;

use super::Theme;
use crate::error::ThemeError;

/// A platform backend able to report the current system theme.
///
/// Every call queries the host again; nothing is cached between calls.
pub trait ThemeSource {
    fn theme(&self) -> Result<Theme, ThemeError>;
}

/// Backend for platforms with no known theme signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedSource;

impl ThemeSource for UnsupportedSource {
    fn theme(&self) -> Result<Theme, ThemeError> {
        Ok(Theme::Unknown)
    }
}

#[cfg(windows)]
pub type SystemSource = super::windows::WindowsSource<crate::registry::RegistrySettings>;

#[cfg(target_os = "linux")]
pub type SystemSource = super::gsettings::GsettingsSource;

#[cfg(target_os = "macos")]
pub type SystemSource = super::macos::MacosSource;

#[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
pub type SystemSource = UnsupportedSource;

/// The backend compiled for this target.
#[cfg(windows)]
pub const fn system_source() -> SystemSource {
    super::windows::WindowsSource::new(crate::registry::RegistrySettings)
}

/// The backend compiled for this target.
#[cfg(not(windows))]
pub fn system_source() -> SystemSource {
    SystemSource::default()
}

/// Detect the current system theme.
///
/// `Theme::Unknown` is only produced where the OS has no theme concept;
/// hosts missing the expected tooling report an error instead.
pub fn resolve_theme() -> Result<Theme, ThemeError> {
    let theme = system_source().theme()?;
    debug!(%theme, "resolved system theme");
    Ok(theme)
}

pub fn is_dark() -> Result<bool, ThemeError> {
    resolve_theme().map(Theme::is_dark)
}

pub fn is_light() -> Result<bool, ThemeError> {
    resolve_theme().map(Theme::is_light)
}
