//! Reading `config.toml` and resolving the active profile.

use std::env::{self, VarError};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::{ConfigFile, LoggingConfig, Profile, ResolvedConfig};

/// Placeholder for the profile's notes root inside other configured paths.
const NOTES_ROOT_VAR: &str = "{{notes_root}}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("cannot expand path '{input}': {source}")]
    Expand {
        input: String,
        #[source]
        source: shellexpand::LookupError<VarError>,
    },
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `config_path`, or from [`default_config_path`] when `None`.
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
        let origin = path.display().to_string();

        let s = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(origin.clone()),
            _ => ConfigError::ReadError(origin.clone(), e),
        })?;

        Self::load_str(&s, &origin, profile_override)
    }

    /// Resolve configuration from TOML text; `origin` labels parse errors.
    pub fn load_str(
        s: &str,
        origin: &str,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile =
            toml::from_str(s).map_err(|e| ConfigError::ParseError(origin.to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override.or(cf.profile.as_deref()).unwrap_or("default");
        let prof = cf
            .profiles
            .get(active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.to_string()))?;

        resolve_profile(active, prof, cf.logging)
    }
}

fn resolve_profile(
    active: &str,
    prof: &Profile,
    logging: LoggingConfig,
) -> Result<ResolvedConfig, ConfigError> {
    let notes_root = expand_path(&prof.notes_root)?;

    let file = match logging.file {
        Some(ref file) => {
            let root = notes_root.to_string_lossy();
            let raw = file.to_string_lossy().replace(NOTES_ROOT_VAR, &root);
            Some(expand_path(&raw)?)
        }
        None => None,
    };

    Ok(ResolvedConfig {
        active_profile: active.to_string(),
        notes_root,
        max_depth: prof.max_depth.into(),
        logging: LoggingConfig { file, ..logging },
    })
}

/// `$XDG_CONFIG_HOME/notegraph/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_default();
    base.join("notegraph").join("config.toml")
}

/// Expand `~` and `$VAR` references.
fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(input)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|source| ConfigError::Expand { input: input.to_string(), source })
}
