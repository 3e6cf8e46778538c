//! Configuration management for readme2confluence.
//!
//! Parses `readme2confluence.toml` with serde and provides auto-discovery of
//! the config file in the current directory and its parents.
//!
//! Settings arrive from three places, in increasing precedence:
//! the config file, environment variables, and command-line flags. The CLI
//! merges the last two (clap reads the `RTC_*` variables) into a
//! [`CliSettings`] that is applied on top of the loaded file.
//!
//! ## Environment Variable Expansion
//!
//! String values in the config file support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: every string in `[confluence]`, plus `project.title`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "readme2confluence.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override wiki base URL.
    pub base_url: Option<String>,
    /// Override Atlassian Cloud site slug.
    pub company: Option<String>,
    /// Override account user name.
    pub username: Option<String>,
    /// Override API token.
    pub api_key: Option<String>,
    /// Override space key.
    pub space: Option<String>,
    /// Override parent page ID.
    pub ancestor: Option<String>,
    /// Override body representation.
    pub representation: Option<Representation>,
    /// Override project directory.
    pub project_dir: Option<PathBuf>,
    /// Override readme path.
    pub readme: Option<PathBuf>,
    /// Override manifest path.
    pub manifest: Option<PathBuf>,
    /// Override page title.
    pub title: Option<String>,
}

/// Body representation sent to the content API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Confluence XHTML storage format.
    #[default]
    Storage,
    /// Plain HTML, converted server-side by the Confluence editor.
    Editor,
}

impl Representation {
    /// Name used in the `body` object of the API payload.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "storage" => Ok(Self::Storage),
            "editor" => Ok(Self::Editor),
            other => Err(ConfigError::Validation(format!(
                "unknown representation '{other}' (expected 'storage' or 'editor')"
            ))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence connection settings (all optional until validated).
    pub confluence: ConfluenceConfig,
    /// Project file settings (paths are relative strings from TOML).
    project: ProjectConfigRaw,

    /// Resolved project configuration (set after loading).
    #[serde(skip)]
    pub project_resolved: ProjectConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Confluence configuration as parsed from TOML.
///
/// Every credential is optional here because it may also come from the
/// command line or environment. Use [`Config::require_confluence`] to obtain
/// validated [`ConfluenceSettings`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Full wiki base URL, e.g. `https://acme.atlassian.net/wiki`.
    pub base_url: Option<String>,
    /// Atlassian Cloud site slug, used when `base_url` is not set.
    pub company: Option<String>,
    /// Account user name (usually an e-mail address).
    pub username: Option<String>,
    /// API token.
    pub api_key: Option<String>,
    /// Space key.
    pub space: Option<String>,
    /// Parent page ID for the published page.
    pub ancestor: Option<String>,
    /// Body representation.
    pub representation: Representation,
    /// Prepend a table of contents macro (storage representation only).
    pub toc: bool,
}

/// Validated Confluence settings with all required values present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfluenceSettings {
    /// Wiki base URL without trailing slash.
    pub base_url: String,
    /// Account user name.
    pub username: String,
    /// API token.
    pub api_key: String,
    /// Space key.
    pub space: String,
    /// Parent page ID.
    pub ancestor: Option<String>,
    /// Body representation.
    pub representation: Representation,
    /// Prepend a table of contents macro.
    pub toc: bool,
}

/// Raw project configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfigRaw {
    dir: Option<String>,
    readme: Option<String>,
    manifest: Option<String>,
    title: Option<String>,
}

/// Resolved project configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Directory containing the manifest and readme.
    pub dir: PathBuf,
    /// Explicit readme path (auto-discovered in `dir` when `None`).
    pub readme: Option<PathBuf>,
    /// Explicit manifest path (auto-discovered in `dir` when `None`).
    pub manifest: Option<PathBuf>,
    /// Page title override.
    pub title: Option<String>,
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
    /// Required setting absent from every source.
    #[error("Missing required setting {field} (set {hint})")]
    Missing {
        /// Config field path (e.g., "`confluence.space`").
        field: &'static str,
        /// Where the user can provide the value.
        hint: &'static str,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.api_key`").
        field: String,
        /// Error message (e.g., "${`RTC_APIKEY`} not set").
        message: String,
    },
}

/// Require an optional string to be present and non-empty.
fn require(
    value: Option<&String>,
    field: &'static str,
    hint: &'static str,
) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ConfigError::Missing { field, hint }),
    }
}

/// Directory containing a config file.
///
/// A bare file name has an empty parent, which is not a readable directory.
fn config_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl ConfluenceConfig {
    /// Wiki base URL derived from `base_url` or, failing that, `company`.
    fn resolve_base_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.base_url.as_ref().filter(|u| !u.is_empty()) {
            require_http_url(url, "confluence.base_url")?;
            return Ok(url.trim_end_matches('/').to_owned());
        }

        let company = require(
            self.company.as_ref(),
            "confluence.company",
            "--company, RTC_COMPANY, --base-url or RTC_BASE_URL",
        )?;
        if !company
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "confluence.company '{company}' is not a valid site slug"
            )));
        }
        Ok(format!("https://{company}.atlassian.net/wiki"))
    }

    /// Validate and return settings with all required values present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for the first absent required value and
    /// `ConfigError::Validation` for malformed ones.
    pub fn validate(&self) -> Result<ConfluenceSettings, ConfigError> {
        let username = require(
            self.username.as_ref(),
            "confluence.username",
            "--username or RTC_USERNAME",
        )?;
        let api_key = require(
            self.api_key.as_ref(),
            "confluence.api_key",
            "--apikey or RTC_APIKEY",
        )?;
        let space = require(self.space.as_ref(), "confluence.space", "--space or RTC_SPACE")?;
        let base_url = self.resolve_base_url()?;

        Ok(ConfluenceSettings {
            base_url,
            username,
            api_key,
            space,
            ancestor: self.ancestor.clone().filter(|a| !a.is_empty()),
            representation: self.representation,
            toc: self.toc,
        })
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `readme2confluence.toml` in the current
    /// directory and parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let conf = &mut self.confluence;
        let overrides = [
            (&mut conf.base_url, &settings.base_url),
            (&mut conf.company, &settings.company),
            (&mut conf.username, &settings.username),
            (&mut conf.api_key, &settings.api_key),
            (&mut conf.space, &settings.space),
            (&mut conf.ancestor, &settings.ancestor),
        ];
        for (target, value) in overrides {
            if value.is_some() {
                target.clone_from(value);
            }
        }
        if let Some(representation) = settings.representation {
            conf.representation = representation;
        }

        let project = &mut self.project_resolved;
        if let Some(dir) = &settings.project_dir {
            project.dir.clone_from(dir);
        }
        if settings.readme.is_some() {
            project.readme.clone_from(&settings.readme);
        }
        if settings.manifest.is_some() {
            project.manifest.clone_from(&settings.manifest);
        }
        if settings.title.is_some() {
            project.title.clone_from(&settings.title);
        }
    }

    /// Get validated Confluence settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` or `ConfigError::Validation` if any
    /// required value is absent or malformed.
    pub fn require_confluence(&self) -> Result<ConfluenceSettings, ConfigError> {
        self.confluence.validate()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file starting at `start` and walking up.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Create default config with the project rooted at the current directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with the project rooted at `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            confluence: ConfluenceConfig::default(),
            project: ProjectConfigRaw::default(),
            project_resolved: ProjectConfig {
                dir: base.to_path_buf(),
                ..ProjectConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        config.resolve_paths(config_dir(path));
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let conf = &mut self.confluence;
        expand::expand_opt(&mut conf.base_url, "confluence.base_url")?;
        expand::expand_opt(&mut conf.company, "confluence.company")?;
        expand::expand_opt(&mut conf.username, "confluence.username")?;
        expand::expand_opt(&mut conf.api_key, "confluence.api_key")?;
        expand::expand_opt(&mut conf.space, "confluence.space")?;
        expand::expand_opt(&mut conf.ancestor, "confluence.ancestor")?;
        expand::expand_opt(&mut self.project.title, "project.title")?;
        Ok(())
    }

    /// Resolve relative project paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let dir = self
            .project
            .dir
            .as_deref()
            .map_or_else(|| config_dir.to_path_buf(), |d| config_dir.join(d));

        self.project_resolved = ProjectConfig {
            readme: self.project.readme.as_deref().map(|p| dir.join(p)),
            manifest: self.project.manifest.as_deref().map(|p| dir.join(p)),
            title: self.project.title.clone(),
            dir,
        };
    }
}
