//! Theme resolution through the GNOME desktop settings tool.

use tracing::debug;

use super::{Theme, ThemeSource};
use crate::error::ThemeError;
use crate::process::{CommandRunner, SystemShell};

pub const DEFAULT_TOOL: &str = "gsettings";

const SCHEMA: &str = "org.gnome.desktop.interface";
/// Freedesktop preference: `default`, `prefer-dark` or `prefer-light`.
const COLOR_SCHEME_KEY: &str = "color-scheme";
/// Older desktops only expose the theme name, dark variants end in `-dark`.
const GTK_THEME_KEY: &str = "gtk-theme";
const DARK_MARKER: &str = "-dark";

pub struct GsettingsSource<R = SystemShell> {
    runner: R,
    tool: String,
}

impl Default for GsettingsSource {
    fn default() -> Self {
        Self::new(SystemShell)
    }
}

impl<R: CommandRunner> GsettingsSource<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            tool: DEFAULT_TOOL.to_string(),
        }
    }

    /// Query a different settings tool, by name or path.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    fn query(&self, key: &str) -> String {
        format!("{} get {SCHEMA} {key}", shell_quote(&self.tool))
    }
}

/// Single-quote `word` for `sh -c` unless it is made only of safe characters.
fn shell_quote(word: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '+');
    if !word.is_empty() && word.chars().all(safe) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

impl<R: CommandRunner> ThemeSource for GsettingsSource<R> {
    fn theme(&self) -> Result<Theme, ThemeError> {
        if self.runner.locate(&self.tool).is_none() {
            return Err(ThemeError::ToolNotFound {
                tool: self.tool.clone(),
            });
        }

        let mut command = self.query(COLOR_SCHEME_KEY);
        let mut result = self.runner.run(&command)?;
        if !result.success() {
            debug!(code = ?result.code, "color-scheme key unavailable, falling back to gtk-theme");
            command = self.query(GTK_THEME_KEY);
            result = self.runner.run(&command)?;
        }

        match result.stdout {
            Some(value) if result.code == Some(0) => Ok(classify(&value)),
            _ => Err(ThemeError::NoThemeResponse { command }),
        }
    }
}

/// Any value containing `-dark`, in any ASCII case, is dark.
///
/// A visually dark theme without that marker is reported as light.
pub fn classify(value: &str) -> Theme {
    if value.to_ascii_lowercase().contains(DARK_MARKER) {
        Theme::Dark
    } else {
        Theme::Light
    }
}
