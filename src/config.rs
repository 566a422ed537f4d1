//! Configuration Module
//!
//! Loads server configuration by merging, per field: environment variables,
//! then `config/config.json`, then built-in defaults. A missing or malformed
//! config file is logged and never fatal.

use std::env;
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use crate::paths::PathResolver;

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_PDFS_DIR: &str = "./data/pdfs";
const DEFAULT_JSONS_DIR: &str = "./data/jsons";
const DEFAULT_MDS_DIR: &str = "./data/mds";
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_SERVER_PORT: u16 = 8000;

// == App Config ==
/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Chat-completion API settings
    pub openai: OpenAiConfig,
    /// Asset directory locations, relative to the project root
    pub directories: Directories,
    /// Generation settings passed to the chat API
    pub settings: Settings,
    /// HTTP server port
    pub server_port: u16,
}

/// Chat-completion API settings.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key; empty when unconfigured
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Base URL of the chat-completion API
    pub base_url: String,
}

/// Asset directory locations.
#[derive(Debug, Clone)]
pub struct Directories {
    pub pdfs: String,
    pub jsons: String,
    pub mds: String,
}

/// Generation settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl AppConfig {
    /// Loads configuration for the given project root.
    ///
    /// # Environment Variables
    /// - `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_BASE_URL`
    /// - `PDFS_DIR`, `JSONS_DIR`, `MDS_DIR`
    /// - `MAX_TOKENS`, `TEMPERATURE`, `SERVER_PORT`
    pub fn load(resolver: &PathResolver) -> Self {
        let file = read_file_config(resolver);

        Self {
            openai: OpenAiConfig {
                api_key: env_or("OPENAI_API_KEY", file.openai.api_key, ""),
                model: env_or("OPENAI_MODEL", file.openai.model, DEFAULT_MODEL),
                base_url: env_or("OPENAI_BASE_URL", file.openai.base_url, DEFAULT_BASE_URL),
            },
            directories: Directories {
                pdfs: env_or("PDFS_DIR", file.directories.pdfs, DEFAULT_PDFS_DIR),
                jsons: env_or("JSONS_DIR", file.directories.jsons, DEFAULT_JSONS_DIR),
                mds: env_or("MDS_DIR", file.directories.mds, DEFAULT_MDS_DIR),
            },
            settings: Settings {
                max_tokens: env_or_parse("MAX_TOKENS", file.settings.max_tokens, DEFAULT_MAX_TOKENS),
                temperature: env_or_parse(
                    "TEMPERATURE",
                    file.settings.temperature,
                    DEFAULT_TEMPERATURE,
                ),
            },
            server_port: env_or_parse("SERVER_PORT", None, DEFAULT_SERVER_PORT),
        }
    }
}

// == File Config ==
// Shape of config/config.json; every field is optional.

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileConfig {
    openai: FileOpenAi,
    directories: FileDirectories,
    settings: FileSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileOpenAi {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileDirectories {
    pdfs: Option<String>,
    jsons: Option<String>,
    mds: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileSettings {
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

fn read_file_config(resolver: &PathResolver) -> FileConfig {
    let path = resolver.config_file("config.json");
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => return FileConfig::default(),
    };

    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), %err, "error reading config file, using defaults");
            FileConfig::default()
        }
    }
}

// == Merge Helpers ==

fn env_or(var: &str, file_value: Option<String>, default: &str) -> String {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .or(file_value)
        .unwrap_or_else(|| default.to_string())
}

fn env_or_parse<T: FromStr>(var: &str, file_value: Option<T>, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .or(file_value)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults_without_file() {
        let tmp = TempDir::new().unwrap();
        env::remove_var("OPENAI_MODEL");
        env::remove_var("MAX_TOKENS");
        env::remove_var("TEMPERATURE");

        let config = AppConfig::load(&PathResolver::with_root(tmp.path()));
        assert_eq!(config.openai.model, DEFAULT_MODEL);
        assert_eq!(config.directories.mds, DEFAULT_MDS_DIR);
        assert_eq!(config.settings.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
    }

    #[test]
    fn test_config_file_merge() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("config")).unwrap();
        std::fs::write(
            tmp.path().join("config/config.json"),
            r#"{
                "openai": {"apiKey": "sk-test", "model": "gpt-4o"},
                "directories": {"mds": "./docs/mds"},
                "settings": {"maxTokens": 512}
            }"#,
        )
        .unwrap();
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("OPENAI_MODEL");
        env::remove_var("MDS_DIR");
        env::remove_var("MAX_TOKENS");

        let config = AppConfig::load(&PathResolver::with_root(tmp.path()));
        assert_eq!(config.openai.api_key, "sk-test");
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.directories.mds, "./docs/mds");
        assert_eq!(config.settings.max_tokens, 512);
        // Unset file fields fall through to defaults
        assert_eq!(config.directories.pdfs, DEFAULT_PDFS_DIR);
        assert!((config.settings.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_malformed_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("config")).unwrap();
        std::fs::write(tmp.path().join("config/config.json"), "{not json").unwrap();
        env::remove_var("OPENAI_MODEL");

        let config = AppConfig::load(&PathResolver::with_root(tmp.path()));
        assert_eq!(config.openai.model, DEFAULT_MODEL);
    }
}
