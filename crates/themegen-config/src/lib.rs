//! Configuration management for themegen.
//!
//! Parses `themegen.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Without a config file
//! the built-in layout is used: `template.css` rendered into a light and a dark
//! variant next to the base directory.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Paths
//!
//! `themes.base_dir` is relative to the directory containing the config file.
//! The template and every variant path are relative to the base directory.
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `themes.base_dir`
//! - `themes.template`
//! - `variant.substitutions`
//! - `variant.output`

mod expand;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the base directory; variant paths are re-resolved against it.
    pub base_dir: Option<PathBuf>,
    /// Override the template path.
    pub template: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "themegen.toml";

/// Template filename used when none is configured.
const DEFAULT_TEMPLATE: &str = "template.css";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template configuration (paths are relative strings from TOML).
    themes: ThemesConfigRaw,
    /// `[[variant]]` entries. `None` selects the built-in light and dark variants.
    #[serde(rename = "variant")]
    variants: Option<Vec<VariantConfigRaw>>,

    /// Resolved themes configuration (set after loading).
    #[serde(skip)]
    pub themes_resolved: ThemesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw themes configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemesConfigRaw {
    base_dir: Option<String>,
    template: Option<String>,
}

/// Raw variant entry as parsed from TOML.
#[derive(Debug, Deserialize, Clone)]
struct VariantConfigRaw {
    name: String,
    substitutions: String,
    output: String,
}

impl VariantConfigRaw {
    fn new(name: &str, substitutions: &str, output: &str) -> Self {
        Self {
            name: name.to_owned(),
            substitutions: substitutions.to_owned(),
            output: output.to_owned(),
        }
    }
}

/// The light and dark variants rendered when no `[[variant]]` is configured.
fn default_variants() -> Vec<VariantConfigRaw> {
    vec![
        VariantConfigRaw::new("light", "colorsLight.txt", "../light.qss"),
        VariantConfigRaw::new("dark", "colorsDark.txt", "../dark.qss"),
    ]
}

/// Resolved themes configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThemesConfig {
    /// Directory every other path is resolved against.
    pub base_dir: PathBuf,
    /// Template file shared by all variants.
    pub template: PathBuf,
    /// Variants in configured order.
    pub variants: Vec<Variant>,
}

/// One themed output: a substitution list applied to the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Variant name, unique within a config.
    pub name: String,
    /// Substitution list file.
    pub substitutions: PathBuf,
    /// Output file.
    pub output: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`themes.base_dir`").
        field: String,
        /// Error message (e.g., "${`THEME_DIR`} environment variable not found").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Fold `.` and `..` components without touching the filesystem.
fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `themegen.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_dir) = &settings.base_dir {
            self.themes_resolved = self.resolve_themes(base_dir.clone());
        }
        if let Some(template) = &settings.template {
            self.themes_resolved.template.clone_from(template);
        }
    }

    /// Select variants by name, keeping configured order.
    ///
    /// An empty `names` slice selects every variant.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a name matches no variant.
    pub fn select(&self, names: &[String]) -> Result<Vec<&Variant>, ConfigError> {
        let variants = &self.themes_resolved.variants;
        if names.is_empty() {
            return Ok(variants.iter().collect());
        }

        if let Some(unknown) = names.iter().find(|name| self.variant(name).is_none()) {
            let available: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
            return Err(ConfigError::Validation(format!(
                "unknown variant '{unknown}' (available: {})",
                available.join(", ")
            )));
        }

        Ok(variants
            .iter()
            .filter(|v| names.contains(&v.name))
            .collect())
    }

    /// Look up a variant by name.
    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.themes_resolved.variants.iter().find(|v| v.name == name)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            themes: ThemesConfigRaw::default(),
            variants: None,
            themes_resolved: ThemesConfig::default(),
            config_path: None,
        };
        config.themes_resolved = config.resolve_themes(base.to_path_buf());
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that at least one variant exists, that variant names are unique
    /// and that no two renders write to the same file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let themes = &self.themes_resolved;

        if themes.variants.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[variant]] is required".to_owned(),
            ));
        }

        let template = lexical(&themes.template);
        let mut names = HashSet::new();
        let mut outputs = HashSet::new();

        for variant in &themes.variants {
            require_non_empty(&variant.name, "variant.name")?;
            if !names.insert(variant.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate variant name '{}'",
                    variant.name
                )));
            }

            let output = lexical(&variant.output);
            if output == template {
                return Err(ConfigError::Validation(format!(
                    "variant '{}' would overwrite the template {}",
                    variant.name,
                    themes.template.display()
                )));
            }
            if !outputs.insert(output) {
                return Err(ConfigError::Validation(format!(
                    "variant '{}' writes to {} which another variant also writes",
                    variant.name,
                    variant.output.display()
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref base_dir) = self.themes.base_dir {
            self.themes.base_dir = Some(expand::expand_env(base_dir, "themes.base_dir")?);
        }
        if let Some(ref template) = self.themes.template {
            self.themes.template = Some(expand::expand_env(template, "themes.template")?);
        }

        if let Some(ref mut variants) = self.variants {
            for variant in variants {
                variant.substitutions =
                    expand::expand_env(&variant.substitutions, "variant.substitutions")?;
                variant.output = expand::expand_env(&variant.output, "variant.output")?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let base_dir = match &self.themes.base_dir {
            Some(dir) => config_dir.join(dir),
            None => config_dir.to_path_buf(),
        };
        self.themes_resolved = self.resolve_themes(base_dir);
    }

    /// Resolve template and variant paths against `base_dir`.
    fn resolve_themes(&self, base_dir: PathBuf) -> ThemesConfig {
        let template = base_dir.join(self.themes.template.as_deref().unwrap_or(DEFAULT_TEMPLATE));

        let variants = self
            .variants
            .clone()
            .unwrap_or_else(default_variants)
            .into_iter()
            .map(|raw| Variant {
                substitutions: base_dir.join(&raw.substitutions),
                output: base_dir.join(&raw.output),
                name: raw.name,
            })
            .collect();

        ThemesConfig {
            base_dir,
            template,
            variants,
        }
    }
}
