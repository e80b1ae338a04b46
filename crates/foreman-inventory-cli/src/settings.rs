//! Settings loading from `foreman.ini`
//!
//! ```ini
//! [foreman]
//! base_url = https://foreman.example.com
//! username = admin
//! password = changeme
//! ; optional
//! verify_ssl = true
//! per_page = 250
//! timeout = 30
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use foreman_client::ClientConfig;
use ini::{Ini, ParseOption};
use thiserror::Error;
use tracing::debug;

/// Environment variable pointing at an alternate settings file
pub const INI_PATH_ENV: &str = "FOREMAN_INI_PATH";

/// Settings file name looked up beside the executable
pub const DEFAULT_INI_NAME: &str = "foreman.ini";

const SECTION: &str = "foreman";
const REQUIRED: [&str; 3] = ["base_url", "username", "password"];

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Required keys are absent
    #[error(
        "could not find values for Foreman {}. They must be specified via ini file.",
        .0.join(", ")
    )]
    Missing(Vec<&'static str>),

    /// File exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is not valid ini
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Optional key has a value of the wrong type
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    /// Default location could not be determined
    #[error("cannot locate foreman.ini: {0}")]
    Locate(String),
}

/// Foreman connection settings
#[derive(Clone)]
pub struct Settings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub verify_ssl: bool,
    pub per_page: Option<u64>,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("verify_ssl", &self.verify_ssl)
            .field("per_page", &self.per_page)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Load settings from the file named by `FOREMAN_INI_PATH`, or from
    /// `foreman.ini` beside the executable
    ///
    /// # Errors
    /// Returns error if the file cannot be located, read or parsed, or if
    /// required keys are missing.
    pub fn load_default() -> Result<Self, SettingsError> {
        let path = settings_path()?;
        Self::load(&path)
    }

    /// Load settings from a file
    ///
    /// A missing file is treated like an empty one, so the error names every
    /// required key.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, or if required
    /// keys are missing.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        debug!(path = %path.display(), "loading settings");
        let ini = match std::fs::read_to_string(path) {
            Ok(content) => parse_ini(&content).map_err(|e| SettingsError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "settings file not found");
                Ini::new()
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_ini(&ini)
    }

    /// Read settings from the `[foreman]` section of a parsed ini document
    ///
    /// # Errors
    /// Returns error if required keys are missing or optional keys are invalid.
    pub fn from_ini(ini: &Ini) -> Result<Self, SettingsError> {
        let section = ini.section(Some(SECTION));
        // key names are case-insensitive, values are taken verbatim
        let get = |key: &str| {
            section
                .and_then(|props| {
                    props
                        .iter()
                        .find(|(name, _)| name.trim().eq_ignore_ascii_case(key))
                        .map(|(_, value)| value)
                })
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let missing: Vec<&'static str> = REQUIRED
            .into_iter()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SettingsError::Missing(missing));
        }

        let required = |key: &str| get(key).unwrap_or_default().to_string();

        let verify_ssl = match get("verify_ssl") {
            Some(value) => parse_bool(value).ok_or_else(|| SettingsError::Invalid {
                key: "verify_ssl",
                value: value.to_string(),
            })?,
            None => true,
        };

        let per_page = get("per_page")
            .map(|value| {
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| SettingsError::Invalid {
                        key: "per_page",
                        value: value.to_string(),
                    })
            })
            .transpose()?;

        let timeout = get("timeout")
            .map(|value| {
                value
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| SettingsError::Invalid {
                        key: "timeout",
                        value: value.to_string(),
                    })
            })
            .transpose()?;

        Ok(Self {
            base_url: required("base_url"),
            username: required("username"),
            password: required("password"),
            verify_ssl,
            per_page,
            timeout,
        })
    }

    /// Client configuration for these settings
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.base_url, &self.username, &self.password);
        config.verify_ssl = self.verify_ssl;
        config.per_page = self.per_page;
        config.timeout = self.timeout;
        config
    }
}

/// Parse ini text without quote stripping or escape processing
///
/// # Errors
/// Returns error if the text is not valid ini.
pub fn parse_ini(content: &str) -> Result<Ini, ini::ParseError> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_str_opt(content, options)
}

/// Path of the settings file: `FOREMAN_INI_PATH` if set, else beside the
/// executable
///
/// # Errors
/// Returns error if the executable location cannot be determined.
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    if let Some(path) = std::env::var_os(INI_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let exe = std::env::current_exe().map_err(|e| SettingsError::Locate(e.to_string()))?;
    let exe = exe.canonicalize().unwrap_or(exe);
    let dir = exe
        .parent()
        .ok_or_else(|| SettingsError::Locate("executable has no parent directory".to_string()))?;
    Ok(dir.join(DEFAULT_INI_NAME))
}

/// Boolean spellings accepted in the settings file
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
