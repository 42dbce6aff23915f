//! Detect whether the operating system is set to a light or dark theme.
//!
//! No GUI toolkit is needed: Windows is read through the registry and the
//! UI settings API, Linux through `gsettings`, and macOS through `defaults`.
//!
//! ```no_run
//! match appearance::resolve_theme() {
//!     Ok(theme) => println!("system theme: {theme}"),
//!     Err(error) => eprintln!("cannot tell: {error}"),
//! }
//! ```

pub mod color;
pub mod error;
pub mod process;
#[cfg(windows)]
pub mod registry;
pub mod theme;

pub use color::{Rgb, is_light_color};
pub use error::ThemeError;
pub use theme::windows::OsVersion;
pub use theme::{
    SystemSource, Theme, ThemeSource, UnsupportedSource, is_dark, is_light, resolve_theme,
    system_source,
};
