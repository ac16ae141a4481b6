use serde::Deserialize;
use std::{env, path::PathBuf};

use roster_types::{ApiToken, UiOptions};
use url::Url;

/// Base URL used when neither config nor environment provides one. This is
/// the default origin of the backend the viewer was written against.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG";
const TOKEN_ENV: &str = "ROSTER_API_TOKEN";
const BASE_URL_ENV: &str = "ROSTER_BASE_URL";

/// On-disk configuration, loaded from `~/.roster/config.toml`.
///
/// ```toml
/// [api]
/// token = "${ITEMS_API_TOKEN}"
/// base_url = "http://127.0.0.1:8000"
///
/// [app]
/// ascii_only = false
/// high_contrast = false
/// reduced_motion = false
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RosterConfig {
    pub api: Option<ApiSection>,
    pub app: Option<AppSection>,
}

#[derive(Default, Deserialize)]
pub struct ApiSection {
    /// Bearer token for the items endpoint. `${VAR}` references are
    /// expanded from the environment.
    pub token: Option<String>,
    pub base_url: Option<String>,
}

// Manual Debug impl to prevent leaking the token in logs.
impl std::fmt::Debug for ApiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.token.is_some() {
            "[REDACTED]"
        } else {
            "None"
        };
        f.debug_struct("ApiSection")
            .field("token", &token)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppSection {
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable spinner animation.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".roster").join("config.toml"))
}

impl RosterConfig {
    /// Load the config file, if one exists. A missing file is `Ok(None)`,
    /// not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

/// Expand `${VAR}` references from the environment. Unset variables expand
/// to the empty string.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    let replacement = env::var(var).unwrap_or_default();
                    out.push_str(&replacement);
                }
                i = end + 1;
                continue;
            }
        }

        let ch = value[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(
        "no API token configured: set {TOKEN_ENV} or add an [api] token entry to the config file"
    )]
    MissingToken,
    #[error("API token is empty after expansion")]
    EmptyToken,
    #[error("invalid base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

/// Resolved runtime settings: config file merged with environment
/// overrides. The environment wins over the file; the token is required,
/// the rest has defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub token: ApiToken,
    pub ui_options: UiOptions,
}

impl Settings {
    pub fn resolve(config: Option<&RosterConfig>) -> Result<Self, SettingsError> {
        Self::resolve_with_env(config, |var| env::var(var).ok())
    }

    fn resolve_with_env(
        config: Option<&RosterConfig>,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let api = config.and_then(|cfg| cfg.api.as_ref());

        let raw_token = env_var(TOKEN_ENV)
            .or_else(|| {
                api.and_then(|api| api.token.as_deref())
                    .map(expand_env_vars)
            })
            .ok_or(SettingsError::MissingToken)?;
        let token = ApiToken::new(raw_token).map_err(|_| SettingsError::EmptyToken)?;

        let raw_base = env_var(BASE_URL_ENV)
            .or_else(|| api.and_then(|api| api.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_base).map_err(|source| SettingsError::InvalidBaseUrl {
            value: raw_base,
            source,
        })?;

        let ui_options = config
            .and_then(|cfg| cfg.app.as_ref())
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default();

        Ok(Self {
            base_url,
            token,
            ui_options,
        })
    }
}
