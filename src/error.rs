//! Error types for appearance probing.

use thiserror::Error;

/// Errors that can occur while probing the host appearance.
#[derive(Debug, Error)]
pub enum ThemeError {
    // === Environment Errors ===
    /// The desktop settings tool is not on the search path.
    #[error("unable to find {tool} on the search path to determine the system theme")]
    ToolNotFound { tool: String },

    /// The shell could not create the child process at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // === Response Errors ===
    /// Every query ran but none produced a usable answer.
    #[error("unable to get a response for the current system theme from `{command}`")]
    NoThemeResponse { command: String },

    /// An OS configuration store call failed.
    #[error("{context}: {message} (os error {code})")]
    Os {
        context: String,
        code: u32,
        message: String,
    },

    /// A stored value could not be interpreted.
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },

    /// A theme name could not be parsed.
    #[error("got an invalid theme value of '{value}'")]
    InvalidTheme { value: String },
}

impl ThemeError {
    /// Whether the host is missing the infrastructure needed to query the theme at all,
    /// as opposed to the setting simply being absent.
    pub const fn is_environment(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. } | Self::Spawn { .. })
    }
}
