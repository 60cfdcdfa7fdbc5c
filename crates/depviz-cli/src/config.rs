//! Configuration file discovery and loading.
//!
//! Configuration documents are TOML unless the file name ends in `.json`,
//! the format the filter files of earlier FBX tooling used.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use depviz::{DepvizError, config::AppConfig};

/// Configuration-related errors for the CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl From<ConfigError> for DepvizError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Parse { path, message } => DepvizError::Config { path, message },
            ConfigError::UnsupportedFormat(path) => DepvizError::Config {
                path,
                message: "unsupported configuration format, expected `.toml` or `.json`"
                    .to_string(),
            },
            err @ ConfigError::MissingFile(_) => {
                DepvizError::Io(io::Error::new(io::ErrorKind::NotFound, err))
            }
        }
    }
}

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None | Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(_) => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`depviz/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file has an unsupported extension
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DepvizError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("depviz/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "depviz", "depviz") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML or JSON file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - Parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, DepvizError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let format = Format::of(path)?;
    let content = fs::read_to_string(path)?;

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };
    let config = match format {
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
    };

    debug!(path:% = path.display(), format:?; "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_toml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.toml");
        fs::write(
            &path,
            r#"
[decode]
pose_links = false

[filter]
class_pattern = "Model"
show_implicit_nodes = true
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.decode().pose_links());
        assert_eq!(config.filter().class_pattern(), "Model");
        assert!(config.filter().show_implicit_nodes());
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.json");
        fs::write(
            &path,
            r#"{ "filter": { "class_pattern": "Geometry", "subclass_pattern": "Mesh" } }"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.filter().class_pattern(), "Geometry");
        assert_eq!(config.filter().subclass_pattern(), "Mesh");
        assert!(config.decode().pose_links());
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, DepvizError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.yaml");
        fs::write(&path, "filter: {}").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, DepvizError::Config { .. }));
        assert!(err.to_string().contains("unsupported configuration format"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.toml");
        fs::write(&path, "[filter]\nclass_patern = \"Model\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, DepvizError::Config { .. }));
        assert!(err.to_string().contains("class_patern"));
    }

    #[test]
    fn test_bad_predicate_kind_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.toml");
        fs::write(
            &path,
            r#"
[[filter.style_rules]]
applies_to = "edge"
when = { kind = "bogus" }
attributes = { color = "red" }
"#,
        )
        .unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        let (reported, message) = match err {
            DepvizError::Config { path, message } => (path, message),
            other => panic!("expected a configuration error, got {other:?}"),
        };
        assert_eq!(reported, path);
        assert!(message.contains("bogus"));
    }
}
