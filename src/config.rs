//! Server configuration.
//!
//! [`FileConfig`] mirrors the JSON file on disk. [`ServerConfig`] is the
//! validated runtime value built from it once at startup and never mutated
//! afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::http::mime::MimeTable;
use crate::resolve::guard::resolve_entries;
use crate::resolve::outcome::DEFAULT_NOT_FOUND_PAGE;
use crate::resolve::path::PathResolver;

pub const CONFIG_FILE: &str = "ServerConfig.json";
pub const CONFIG_ENV: &str = "FILEWARD_CONFIG";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6432;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write default config: {0}")]
    Write(#[source] io::Error),

    #[error("invalid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("config root must be a JSON object")]
    NotAnObject,

    #[error("invalid value for `{field}`: {reason}")]
    Field { field: &'static str, reason: String },
}

/// The on-disk JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub host_name: String,
    pub port: u16,
    pub black_listed_paths: Vec<String>,
    #[serde(rename = "custom404Path")]
    pub custom_404_path: String,
    /// Extension → content type, merged over the built-in table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_mime_types: BTreeMap<String, String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            host_name: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            black_listed_paths: Vec::new(),
            custom_404_path: String::new(),
            custom_mime_types: BTreeMap::new(),
        }
    }
}

impl FileConfig {
    /// Parses `content` field by field.
    ///
    /// Never fails outright: anything that cannot be parsed keeps its
    /// default and is reported in the returned error list.
    pub fn from_json(content: &str) -> (Self, Vec<ConfigError>) {
        let mut cfg = Self::default();
        let mut errors = Vec::new();

        let value: Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                errors.push(ConfigError::Malformed(e));
                return (cfg, errors);
            }
        };

        let Some(map) = value.as_object() else {
            errors.push(ConfigError::NotAnObject);
            return (cfg, errors);
        };

        take_field(map, "hostName", &mut cfg.host_name, &mut errors);
        take_field(map, "port", &mut cfg.port, &mut errors);
        take_field(map, "blackListedPaths", &mut cfg.black_listed_paths, &mut errors);
        take_field(map, "custom404Path", &mut cfg.custom_404_path, &mut errors);
        take_field(map, "customMimeTypes", &mut cfg.custom_mime_types, &mut errors);

        if cfg.host_name.trim().is_empty() {
            errors.push(ConfigError::Field {
                field: "hostName",
                reason: "must not be empty".to_string(),
            });
            cfg.host_name = DEFAULT_HOST.to_string();
        }

        if cfg.port == 0 {
            errors.push(ConfigError::Field {
                field: "port",
                reason: "must be between 1 and 65535".to_string(),
            });
            cfg.port = DEFAULT_PORT;
        }

        (cfg, errors)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?).map_err(ConfigError::Write)
    }
}

fn take_field<T: DeserializeOwned>(
    map: &Map<String, Value>,
    field: &'static str,
    slot: &mut T,
    errors: &mut Vec<ConfigError>,
) {
    let Some(raw) = map.get(field) else {
        return;
    };
    if raw.is_null() {
        return;
    }

    match T::deserialize(raw) {
        Ok(value) => *slot = value,
        Err(e) => errors.push(ConfigError::Field {
            field,
            reason: e.to_string(),
        }),
    }
}

/// Validated, immutable runtime configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Resolver over the canonical serving root.
    pub paths: PathResolver,
    /// Canonical blacklist prefixes, in configured order.
    pub blacklist: Vec<PathBuf>,
    /// Body of every 404 response.
    pub not_found_page: Vec<u8>,
    pub mime: MimeTable,
}

impl ServerConfig {
    /// Config file location: `$FILEWARD_CONFIG` if set, else
    /// `ServerConfig.json` under `root`.
    pub fn default_path(root: &Path) -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| root.join(CONFIG_FILE))
    }

    /// Loads the config at `config_path`, serving files from `root`.
    ///
    /// A missing file is replaced by a freshly written default. Read and
    /// parse problems are logged and fall back to defaults. The only error
    /// is a serving root that cannot be made absolute.
    pub fn load(config_path: &Path, root: &Path) -> io::Result<Self> {
        let file_cfg = match fs::read_to_string(config_path) {
            Ok(content) => {
                info!("Config found at {}", config_path.display());
                let (cfg, errors) = FileConfig::from_json(&content);
                for e in &errors {
                    warn!("Failed to parse config: {}", e);
                }
                cfg
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "No configuration file found, writing defaults to {}",
                    config_path.display()
                );
                let cfg = FileConfig::default();
                if let Err(e) = cfg.write(config_path) {
                    warn!("{}", e);
                }
                cfg
            }
            Err(e) => {
                warn!("{}", ConfigError::Read(e));
                FileConfig::default()
            }
        };

        Self::from_file_config(file_cfg, root)
    }

    /// Validates `file` against `root`: canonicalizes the root and the
    /// blacklist, loads the custom 404 page, builds the MIME table.
    ///
    /// Fails only if `root` cannot be made absolute.
    pub fn from_file_config(file: FileConfig, root: &Path) -> io::Result<Self> {
        let paths = PathResolver::new(root)?;
        let blacklist = resolve_entries(paths.root(), &file.black_listed_paths);
        let not_found_page = load_not_found_page(paths.root(), &file.custom_404_path);
        let mime = MimeTable::with_overrides(file.custom_mime_types);

        Ok(Self {
            host: file.host_name,
            port: file.port,
            paths,
            blacklist,
            not_found_page,
            mime,
        })
    }

    pub fn root(&self) -> &Path {
        self.paths.root()
    }
}

fn load_not_found_page(root: &Path, custom_404_path: &str) -> Vec<u8> {
    let custom_404_path = custom_404_path.trim();
    if custom_404_path.is_empty() {
        return DEFAULT_NOT_FOUND_PAGE.as_bytes().to_vec();
    }

    let path = root.join(custom_404_path);
    match fs::read(&path) {
        Ok(page) => {
            info!("Custom 404 page loaded from {}", path.display());
            page
        }
        Err(e) => {
            warn!(
                "Custom 404 page {} could not be loaded ({}), using the default page",
                path.display(),
                e
            );
            DEFAULT_NOT_FOUND_PAGE.as_bytes().to_vec()
        }
    }
}
