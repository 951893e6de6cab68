use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub roster: RosterSettings,
}

#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_assets_directory")]
    pub assets_directory: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the local provider's collection files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Endpoint of the hosted table store. Absent or empty falls back to
    /// the local provider.
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default)]
    pub remote_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterSettings {
    /// Access code gating the roster view and member deletion.
    #[serde(default = "default_access_code")]
    pub access_code: String,
}

impl StorageSettings {
    /// Remote endpoint and key, only when both are present and non-empty.
    pub fn remote(&self) -> Option<(&str, &str)> {
        match (self.remote_url.as_deref(), self.remote_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Some((url, key)),
            _ => None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    8090
}

fn default_assets_directory() -> String {
    "assets".to_owned()
}

fn default_data_dir() -> String {
    "data".to_owned()
}

fn default_access_code() -> String {
    "folia2024".to_owned()
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_directory: default_assets_directory(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            remote_url: None,
            remote_key: None,
        }
    }
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            access_code: default_access_code(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_base = std::env::var("FOLIA_CONFIG_DIR").unwrap_or_else(|_| "./config".into());
        let mode = std::env::var("FOLIA_ENV").unwrap_or_else(|_| "dev".into());
        let config = Config::builder()
            .add_source(File::with_name(&format!("{}/{}.toml", config_base, mode)).required(false))
            .add_source(config::Environment::with_prefix("FOLIA").separator("__"))
            .build()?;
        return config.try_deserialize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(url: Option<&str>, key: Option<&str>) -> StorageSettings {
        StorageSettings {
            data_dir: "data".to_owned(),
            remote_url: url.map(str::to_owned),
            remote_key: key.map(str::to_owned),
        }
    }

    #[test]
    fn remote_requires_both_values() {
        assert!(storage(None, None).remote().is_none());
        assert!(storage(Some("https://x.example"), None).remote().is_none());
        assert!(storage(None, Some("secret")).remote().is_none());
        let both = storage(Some("https://x.example"), Some("secret"));
        assert_eq!(both.remote(), Some(("https://x.example", "secret")));
    }

    #[test]
    fn boots_with_defaults_when_no_config_file_exists() {
        std::env::set_var("FOLIA_CONFIG_DIR", "/nonexistent/folia-config");
        let settings = Settings::new().unwrap();
        std::env::remove_var("FOLIA_CONFIG_DIR");
        assert_eq!(settings.http.port, default_port());
        assert_eq!(settings.storage.data_dir, default_data_dir());
        assert!(settings.storage.remote().is_none());
        assert_eq!(settings.roster.access_code, default_access_code());
    }

    #[test]
    fn empty_values_count_as_absent() {
        assert!(storage(Some(""), Some("secret")).remote().is_none());
        assert!(storage(Some("https://x.example"), Some("")).remote().is_none());
    }
}
