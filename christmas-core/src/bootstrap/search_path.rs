//! Dynamic library search path of the running process

use std::ffi::OsStr;
use std::fmt;

/// Environment variable the platform loader consults for libraries.
#[cfg(target_os = "macos")]
pub const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(windows)]
pub const LIBRARY_PATH_VAR: &str = "PATH";
#[cfg(not(any(target_os = "macos", windows)))]
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Ordered, read-only list of search directories.
///
/// Renders as a quoted list, e.g. `["/usr/lib", "/opt/lib"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath(Vec<String>);

impl SearchPath {
    /// Read the search path from the host environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(std::env::var_os(LIBRARY_PATH_VAR).as_deref())
    }

    /// Split a raw variable value on the platform separator.
    ///
    /// An unset or empty value is an empty path. Empty segments inside a
    /// non-empty value are kept, since loaders treat them as the working
    /// directory.
    #[must_use]
    pub fn parse(value: Option<&OsStr>) -> Self {
        match value {
            Some(raw) if !raw.is_empty() => Self(
                std::env::split_paths(raw)
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect(),
            ),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for SearchPath {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
