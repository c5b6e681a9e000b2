//! Blog configuration module.
//!
//! Handles loading and validating `config.toml`. Any key the optional
//! `config.toml` in the source directory leaves out keeps its stock default.
//!
//! ## Config File Location
//!
//! ```text
//! blog/
//! ├── config.toml              # Optional, overrides stock defaults
//! ├── hello-world.md
//! └── second-post.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "Blog"          # Listing page heading and <title>
//! extension = "md"             # Source file extension (without dot)
//! index_file = "index.html"    # Listing page filename
//! excerpt_length = 220         # Excerpt budget in characters
//!
//! [processing]
//! max_processes = 4            # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want:
//!
//! ```toml
//! site_title = "Field Notes"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::metadata::EXCERPT_LENGTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Blog configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Heading and `<title>` of the listing page.
    pub site_title: String,
    /// Extension of source documents, without the dot.
    pub extension: String,
    /// Filename of the listing page inside the output directory.
    pub index_file: String,
    /// Excerpt budget in characters.
    pub excerpt_length: usize,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            site_title: "Blog".to_string(),
            extension: "md".to_string(),
            index_file: "index.html".to_string(),
            excerpt_length: EXCERPT_LENGTH,
            processing: ProcessingConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(ConfigError::Validation(
                "extension must be non-empty and must not contain '.'".into(),
            ));
        }
        if !self.index_file.ends_with(".html") || self.index_file.len() == ".html".len() {
            return Err(ConfigError::Validation(
                "index_file must be a file name ending in .html".into(),
            ));
        }
        if self.index_file.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "index_file must not contain path separators".into(),
            ));
        }
        if self.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "excerpt_length must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel build workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse `config.toml` contents and validate them.
///
/// Keys left out keep their stock defaults.
pub fn parse_config(content: &str) -> Result<BlogConfig, ConfigError> {
    let config: BlogConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file gives the stock defaults; a present one is parsed with
/// unknown keys rejected and then validated.
pub fn load_config(root: &Path) -> Result<BlogConfig, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(BlogConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config = parse_config(&content)?;
    log::debug!("loaded {}", config_path.display());
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Quillpress Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as config.toml in the blog source directory.
# Unknown keys will cause an error.

# Heading and <title> of the listing page.
site_title = "Blog"

# Extension of source documents, without the dot.
extension = "md"

# Filename of the listing page, written to the output directory.
index_file = "index.html"

# Excerpt length in characters. Longer first paragraphs are cut at the
# last word boundary and end with an ellipsis.
excerpt_length = 220

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers. Omit for auto (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = BlogConfig::default();
        assert_eq!(config.site_title, "Blog");
        assert_eq!(config.extension, "md");
        assert_eq!(config.index_file, "index.html");
        assert_eq!(config.excerpt_length, 220);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn parse_partial_config() {
        let config: BlogConfig = toml::from_str(r#"site_title = "Field Notes""#).unwrap();
        // Overridden value
        assert_eq!(config.site_title, "Field Notes");
        // Default values preserved
        assert_eq!(config.extension, "md");
        assert_eq!(config.excerpt_length, 220);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<BlogConfig, _> = toml::from_str("sitetitle = \"typo\"");
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, BlogConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
site_title = "Notes"
extension = "txt"

[processing]
max_processes = 2
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site_title, "Notes");
        assert_eq!(config.extension, "txt");
        assert_eq!(config.processing.max_processes, Some(2));
        // Unspecified values should be defaults
        assert_eq!(config.index_file, "index.html");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_unknown_key_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "colour = \"red\"").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_accepts_defaults() {
        assert!(BlogConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_dotted_extension() {
        let config = BlogConfig {
            extension: ".md".to_string(),
            ..BlogConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_extension() {
        let config = BlogConfig {
            extension: String::new(),
            ..BlogConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_bad_index_file() {
        for index_file in ["index.htm", ".html", "posts/index.html"] {
            let config = BlogConfig {
                index_file: index_file.to_string(),
                ..BlogConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{index_file} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_zero_excerpt_length() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "excerpt_length = 0").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn parse_config_validates_after_defaults() {
        let config = parse_config("excerpt_length = 80").unwrap();
        assert_eq!(config.excerpt_length, 80);
        assert_eq!(config.site_title, "Blog");

        let result = parse_config("index_file = \"home.htm\"");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn parse_config_nested_processing_table() {
        let config = parse_config("[processing]\nmax_processes = 3").unwrap();
        assert_eq!(config.processing.max_processes, Some(3));
        assert_eq!(config.extension, "md");

        let result = parse_config("[processing]\nworkers = 3");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Stock config and threads
    // =========================================================================

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: BlogConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, BlogConfig::default());
    }

    #[test]
    fn effective_threads_caps_at_cores() {
        let cores = effective_threads(&ProcessingConfig::default());
        assert!(cores >= 1);
        let capped = effective_threads(&ProcessingConfig {
            max_processes: Some(usize::MAX),
        });
        assert_eq!(capped, cores);
        let one = effective_threads(&ProcessingConfig {
            max_processes: Some(1),
        });
        assert_eq!(one, 1);
    }
}
