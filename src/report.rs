use anyhow::{Context, Result};
use appearance::Theme;
use serde::Serialize;

use crate::config::OutputFormat;

/// What `appearance show` prints for one detection.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Report {
    pub theme: Theme,
    pub is_dark: bool,
    pub is_light: bool,
}

impl Report {
    pub const fn new(theme: Theme) -> Self {
        Self {
            theme,
            is_dark: theme.is_dark(),
            is_light: theme.is_light(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(format!(
                "Theme: {}\nIs Dark: {}\nIs Light: {}",
                self.theme, self.is_dark, self.is_light
            )),
            OutputFormat::Json => {
                serde_json::to_string(self).context("Failed to serialize report to JSON")
            }
        }
    }
}
