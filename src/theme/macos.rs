//! Theme resolution from the macOS user defaults.

use tracing::debug;

use super::{Theme, ThemeSource};
use crate::error::ThemeError;
use crate::process::{CommandRunner, SystemShell};

const VERSION_COMMAND: &str = "sw_vers -productVersion";
const STYLE_COMMAND: &str = "defaults read -globalDomain AppleInterfaceStyle";

pub struct MacosSource<R = SystemShell> {
    runner: R,
}

impl Default for MacosSource {
    fn default() -> Self {
        Self::new(SystemShell)
    }
}

impl<R: CommandRunner> MacosSource<R> {
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Dark mode arrived in 10.14. Anything we cannot parse is assumed newer.
    fn supports_dark_mode(&self) -> Result<bool, ThemeError> {
        let result = self.runner.run(VERSION_COMMAND)?;
        let version = match result.stdout {
            Some(ref stdout) if result.code == Some(0) => stdout.trim(),
            _ => return Ok(true),
        };
        Ok(parse_major_minor(version).is_none_or(|release| release >= (10, 14)))
    }
}

fn parse_major_minor(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |minor| minor.parse().ok())?;
    Some((major, minor))
}

impl<R: CommandRunner> ThemeSource for MacosSource<R> {
    fn theme(&self) -> Result<Theme, ThemeError> {
        if !self.supports_dark_mode()? {
            debug!("macOS release predates dark mode");
            return Ok(Theme::Light);
        }

        // The key only exists while dark mode is on, so a failed read means light.
        let result = self.runner.run(STYLE_COMMAND)?;
        let theme = match result.stdout {
            Some(ref style)
                if result.code == Some(0) && style.trim().eq_ignore_ascii_case("dark") =>
            {
                Theme::Dark
            }
            _ => Theme::Light,
        };
        Ok(theme)
    }
}
