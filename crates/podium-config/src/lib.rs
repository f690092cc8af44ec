//! Configuration for podium.
//!
//! Reads `podium.toml`, either from an explicit path or by searching the
//! current directory and its parents. Relative paths resolve against the
//! directory holding the file. [`CliSettings`] are applied last.
//!
//! ```toml
//! [slides]
//! source_dir = "${TALK_DIR:-slides}"
//! extension = "md"
//!
//! [render]
//! line_separator = "lf"
//! ```
//!
//! `slides.source_dir` supports `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use std::path::{Path, PathBuf};

use podium_renderer::LineSeparator;
use serde::Deserialize;

const CONFIG_FILENAME: &str = "podium.toml";
const DEFAULT_SOURCE_DIR: &str = "slides";
const DEFAULT_EXTENSION: &str = "md";

/// Command line overrides. Only `Some` values replace loaded settings.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Slide directory.
    pub source_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    slides: SlidesConfigRaw,
    /// Rendering options.
    pub render: RenderConfig,

    /// Slide settings with paths resolved (set after loading).
    #[serde(skip)]
    pub slides_resolved: SlidesConfig,
    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// `[slides]` as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlidesConfigRaw {
    source_dir: Option<String>,
    extension: Option<String>,
}

/// Resolved `[slides]` section.
#[derive(Debug, Default)]
pub struct SlidesConfig {
    /// Directory holding the numbered slide files.
    pub source_dir: PathBuf,
    /// Slide file extension, without the dot.
    pub extension: String,
}

/// `[render]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Separator used when joining lines of a slide file.
    pub line_separator: LineSeparator,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Dotted field name, e.g. `slides.source_dir`.
        field: String,
        message: String,
    },
}

impl Config {
    /// Load the configuration.
    ///
    /// With `config_path`, that file must exist. Without it, `podium.toml`
    /// is searched upwards from the current directory; if none is found the
    /// defaults apply relative to the current directory.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            tracing::info!(path = %discovered.display(), "Discovered configuration");
            Self::load_from_file(&discovered)?
        } else {
            let cwd = std::env::current_dir().unwrap_or_default();
            Self::default_with_base(&cwd)
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = &self.slides_resolved.extension;
        if extension.is_empty() {
            return Err(ConfigError::Validation(
                "slides.extension cannot be empty".to_owned(),
            ));
        }
        if extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "slides.extension must not start with a dot (got \"{extension}\")"
            )));
        }
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.slides_resolved.source_dir.clone_from(source_dir);
        }
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            slides: SlidesConfigRaw::default(),
            render: RenderConfig::default(),
            slides_resolved: SlidesConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                extension: DEFAULT_EXTENSION.to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.resolve_paths(path.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(source_dir) = &self.slides.source_dir {
            self.slides.source_dir = Some(expand::expand_env(source_dir, "slides.source_dir")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.slides_resolved = SlidesConfig {
            source_dir: config_dir.join(
                self.slides
                    .source_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_SOURCE_DIR),
            ),
            extension: self
                .slides
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
        };
    }
}

/// Search `start` and its parents for `podium.toml`.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
