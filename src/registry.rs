//! Windows configuration store and UI settings reads.

use tracing::debug;
use windows::UI::ViewManagement::{UIColorType, UISettings};
use windows::Win32::Foundation::{ERROR_SUCCESS, WIN32_ERROR};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, RegCloseKey, RegOpenKeyExW,
    RegQueryValueExW,
};
use windows::core::PCWSTR;

use crate::color::Rgb;
use crate::error::ThemeError;
use crate::theme::windows::{OsVersion, WindowsSettings};

/// Longest string value read, in UTF-16 units including the terminator.
const MAX_STRING_UNITS: usize = 512;

const PERSONALIZE_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize";
const CURRENT_VERSION_PATH: &str = r"Software\Microsoft\Windows NT\CurrentVersion";
const PROCESSOR_PATH: &str = r"HARDWARE\DESCRIPTION\System\CentralProcessor\0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryRoot {
    CurrentUser,
    LocalMachine,
}

impl RegistryRoot {
    const fn hkey(self) -> HKEY {
        match self {
            Self::CurrentUser => HKEY_CURRENT_USER,
            Self::LocalMachine => HKEY_LOCAL_MACHINE,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
        }
    }
}

/// A read-only registry key, closed on drop.
#[derive(Debug)]
pub struct RegistryKey {
    handle: HKEY,
    path: String,
}

impl Drop for RegistryKey {
    fn drop(&mut self) {
        // SAFETY: `handle` came from a successful RegOpenKeyExW and is closed once.
        let status = unsafe { RegCloseKey(self.handle) };
        if status != ERROR_SUCCESS {
            debug!(path = %self.path, code = status.0, "failed to close registry key");
        }
    }
}

fn wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

fn os_error(context: String, status: WIN32_ERROR) -> ThemeError {
    let message = windows::core::Error::from_hresult(status.to_hresult()).message();
    ThemeError::Os {
        context,
        code: status.0,
        message: message.trim_end().to_string(),
    }
}

/// Open `subpath` under `root` for reading.
pub fn open_key(root: RegistryRoot, subpath: &str) -> Result<RegistryKey, ThemeError> {
    let path = format!(r"{}\{subpath}", root.name());
    let subpath = wide(subpath);
    let mut handle = HKEY::default();
    // SAFETY: `subpath` is NUL-terminated and outlives the call.
    let status = unsafe {
        RegOpenKeyExW(
            root.hkey(),
            PCWSTR(subpath.as_ptr()),
            None,
            KEY_READ,
            &raw mut handle,
        )
    };
    if status != ERROR_SUCCESS {
        return Err(os_error(format!("opening {path}"), status));
    }
    Ok(RegistryKey { handle, path })
}

impl RegistryKey {
    fn query(&self, name: &str, data: *mut u8, size: &mut u32) -> Result<(), ThemeError> {
        let value_name = wide(name);
        // SAFETY: `data` points to at least `*size` writable bytes.
        let status = unsafe {
            RegQueryValueExW(
                self.handle,
                PCWSTR(value_name.as_ptr()),
                None,
                None,
                Some(data),
                Some(std::ptr::from_mut(size)),
            )
        };
        if status != ERROR_SUCCESS {
            return Err(os_error(format!("reading {}\\{name}", self.path), status));
        }
        Ok(())
    }

    pub fn read_dword(&self, name: &str) -> Result<u32, ThemeError> {
        let mut value = 0u32;
        let mut size = u32::try_from(size_of::<u32>()).unwrap_or(4);
        self.query(name, (&raw mut value).cast(), &mut size)?;
        debug!(path = %self.path, name, value, "read registry dword");
        Ok(value)
    }

    /// Values longer than 512 UTF-16 units are not supported.
    pub fn read_string(&self, name: &str) -> Result<String, ThemeError> {
        let mut buffer = [0u16; MAX_STRING_UNITS];
        let mut size = u32::try_from(size_of_val(&buffer)).unwrap_or(u32::MAX);
        self.query(name, buffer.as_mut_ptr().cast(), &mut size)?;

        let units = (size as usize / 2).min(MAX_STRING_UNITS);
        let written = &buffer[..units];
        let end = written.iter().position(|&unit| unit == 0).unwrap_or(units);
        let value = String::from_utf16_lossy(&written[..end]);
        debug!(path = %self.path, name, value, "read registry string");
        Ok(value)
    }
}

/// Windows version read from the registry.
///
/// Version APIs are subject to compatibility shims that can misreport the
/// release, the registry is not. Service pack fields are always zero.
pub fn query_os_version() -> Result<OsVersion, ThemeError> {
    let current = open_key(RegistryRoot::LocalMachine, CURRENT_VERSION_PATH)?;
    let processor = open_key(RegistryRoot::LocalMachine, PROCESSOR_PATH)?;

    let major = current.read_dword("CurrentMajorVersionNumber")?;
    let minor = current.read_dword("CurrentMinorVersionNumber")?;
    let build_text = current.read_string("CurrentBuildNumber")?;
    let build = build_text
        .trim()
        .parse()
        .map_err(|_| ThemeError::InvalidValue {
            name: "CurrentBuildNumber".to_string(),
            value: build_text.clone(),
        })?;
    let platform = processor.read_dword("Platform Specific Field 1")?;

    Ok(OsVersion::new(major, minor, build, platform, 0, 0))
}

#[allow(clippy::cast_sign_loss)] // HRESULTs are reported in their unsigned form
fn winrt_error(context: &str, error: &windows::core::Error) -> ThemeError {
    ThemeError::Os {
        context: context.to_string(),
        code: error.code().0 as u32,
        message: error.message(),
    }
}

/// The UI foreground color. Requires Windows 10 or later.
pub fn query_ui_foreground_color() -> Result<Rgb, ThemeError> {
    let settings = UISettings::new().map_err(|error| winrt_error("creating UISettings", &error))?;
    let color = settings
        .GetColorValue(UIColorType::Foreground)
        .map_err(|error| winrt_error("reading the foreground color", &error))?;
    Ok(Rgb::new(color.R, color.G, color.B))
}

/// Reads theme signals from the live registry and UI settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrySettings;

impl WindowsSettings for RegistrySettings {
    fn apps_use_light_theme(&self) -> Result<u32, ThemeError> {
        open_key(RegistryRoot::CurrentUser, PERSONALIZE_PATH)?.read_dword("AppsUseLightTheme")
    }

    fn os_version(&self) -> Result<OsVersion, ThemeError> {
        query_os_version()
    }

    fn foreground_color(&self) -> Result<Rgb, ThemeError> {
        query_ui_foreground_color()
    }
}
