// TOML config adapter - Defaults loaded from a TOML file

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::errors::*;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "ffmpeg-cut.toml";

/// Values a config file may provide; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub encoder: Option<String>,
    pub quality: Option<u32>,
    pub ffmpeg: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    ffmpeg_cut: FileConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse the `[ffmpeg_cut]` table of a TOML document
    pub fn parse(toml_content: &str) -> DomainResult<FileConfig> {
        let document: ConfigDocument = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(document.ffmpeg_cut)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> DomainResult<FileConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else the default file if present
    pub fn discover(explicit: Option<&Path>) -> DomainResult<FileConfig> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            debug!("No {} in working directory", DEFAULT_CONFIG_FILE);
            Ok(FileConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_table() {
        let config = TomlConfigAdapter::parse(
            r#"
            [ffmpeg_cut]
            encoder = "libx265"
            quality = 20
            ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.encoder.as_deref(), Some("libx265"));
        assert_eq!(config.quality, Some(20));
        assert_eq!(config.ffmpeg.as_deref(), Some("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_missing_table_is_empty() {
        assert_eq!(TomlConfigAdapter::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys_and_bad_types() {
        assert!(TomlConfigAdapter::parse("[ffmpeg_cut]\ncrf = 3\n").is_err());
        assert!(TomlConfigAdapter::parse("[ffmpeg_cut]\nquality = \"high\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cut.toml");
        std::fs::write(&path, "[ffmpeg_cut]\nencoder = \"libx265\"\n").unwrap();
        let config = TomlConfigAdapter::discover(Some(&path)).unwrap();
        assert_eq!(config.encoder.as_deref(), Some("libx265"));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            TomlConfigAdapter::discover(Some(&missing)),
            Err(DomainError::Config(_))
        ));
    }
}
