use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::schema::{Config, ConfigFile, Endpoint};
use crate::error::ConfigError;
use crate::sanitize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "JOBCARD_CONFIG";

/// Overrides both HTTP timeouts (seconds).
pub const TIMEOUT_ENV_VAR: &str = "JOBCARD_HTTP_TIMEOUT_SECS";

/// `<platform config dir>/jobcard/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jobcard").join("config.json"))
}

/// Loads configuration from defaults, the config file and the process environment.
///
/// An explicitly named file (argument or `JOBCARD_CONFIG`) must exist; the
/// default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(explicit, |name| std::env::var(name).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with_env<F>(explicit: Option<&Path>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_ENV_VAR).filter(|v| !v.trim().is_empty()).map(PathBuf::from));

    let mut file = match explicit {
        Some(path) => load_config_file(&path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => load_config_file(&path)?,
            _ => {
                debug!("No config file found, using defaults and environment");
                ConfigFile::default()
            }
        },
    };

    apply_env_overrides(&mut file, &env)?;
    validate_config(&file)?;

    for endpoint in Endpoint::ALL {
        match file.endpoints.get(endpoint) {
            Some(url) => debug!(
                "{} endpoint: {}",
                endpoint.operation(),
                sanitize::redact_flow_url(url)
            ),
            None => debug!("{} endpoint not configured", endpoint.operation()),
        }
    }

    Ok(Config::from(file))
}

pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Loading config from {}", path.display());
    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ConfigFile, ConfigError> {
    let file: ConfigFile = serde_json::from_str(content)?;
    validate_config(&file)?;
    Ok(file)
}

/// Environment values win over the file. Empty values count as unset.
pub fn apply_env_overrides<F>(file: &mut ConfigFile, env: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for endpoint in Endpoint::ALL {
        if let Some(url) = env(endpoint.env_var()) {
            let url = url.trim();
            if !url.is_empty() {
                file.endpoints.set(endpoint, url.to_string());
            }
        }
    }

    if let Some(raw) = env(TIMEOUT_ENV_VAR) {
        let raw = raw.trim();
        if !raw.is_empty() {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::Validation {
                message: format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV_VAR, raw),
            })?;
            file.http.connect_timeout_secs = secs;
            file.http.request_timeout_secs = secs;
        }
    }

    Ok(())
}

fn validate_config(file: &ConfigFile) -> Result<(), ConfigError> {
    for endpoint in Endpoint::ALL {
        if let Some(url) = file.endpoints.get(endpoint) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation {
                    message: format!(
                        "{} URL must start with http:// or https:// (got '{}')",
                        endpoint.operation(),
                        sanitize::redact_flow_url(url)
                    ),
                });
            }
        }
    }

    if file.http.connect_timeout_secs == 0 || file.http.request_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "HTTP timeouts must be greater than zero".to_string(),
        });
    }

    Ok(())
}
