//! Run settings
//!
//! Resolved lowest to highest precedence from built-in defaults, the user
//! config file, the project's `ghup.toml`, the `GHUP_GIT` environment
//! variable, and command-line flags.
//!
//! Both config files share one layout:
//!
//! ```toml
//! [upload]
//! host = "github.com"
//! branch = "main"
//! remote = "origin"
//! commit_message = "Initial commit"
//! default_repo_name = "distributed-softbus"
//! git = "/usr/bin/git"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";
pub const DEFAULT_REPO_NAME: &str = "distributed-softbus";
pub const DEFAULT_GIT: &str = "git";

/// Project-level config file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "ghup.toml";

/// Environment variable overriding the git program
pub const GIT_ENV_VAR: &str = "GHUP_GIT";

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory that gets committed and pushed
    pub root: PathBuf,
    /// Git program name or path
    pub git: String,
    /// Hosting service host name
    pub host: String,
    /// Primary branch
    pub branch: String,
    /// Remote alias
    pub remote: String,
    pub commit_message: String,
    /// Repository name used when the operator leaves the prompt blank
    pub default_repo_name: String,
}

/// The `[upload]` table of a config file. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub host: Option<String>,
    pub branch: Option<String>,
    pub remote: Option<String>,
    pub commit_message: Option<String>,
    pub default_repo_name: Option<String>,
    pub git: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    upload: FileSettings,
}

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub host: Option<String>,
    pub branch: Option<String>,
    pub remote: Option<String>,
    pub commit_message: Option<String>,
    pub default_repo_name: Option<String>,
}

impl Settings {
    /// Built-in defaults for a project root
    pub fn defaults(root: PathBuf) -> Self {
        Self {
            root,
            git: DEFAULT_GIT.to_string(),
            host: DEFAULT_HOST.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            default_repo_name: DEFAULT_REPO_NAME.to_string(),
        }
    }

    /// Resolve settings from every source
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let user_config = user_config_path();
        let env_git = std::env::var(GIT_ENV_VAR).ok().filter(|v| !v.is_empty());
        Self::resolve_from(overrides, user_config.as_deref(), env_git)
    }

    /// Resolve settings with the user config path and environment given explicitly
    pub fn resolve_from(
        overrides: &Overrides,
        user_config: Option<&Path>,
        env_git: Option<String>,
    ) -> Result<Self> {
        let root = match &overrides.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("Project directory not found: {}", root.display()))?;

        let mut settings = Self::defaults(root);

        if let Some(path) = user_config {
            if let Some(file) = load_file(path)? {
                settings.apply_file(file);
            }
        }

        let project_config = settings.root.join(PROJECT_CONFIG_FILE);
        if let Some(file) = load_file(&project_config)? {
            settings.apply_file(file);
        }

        if let Some(git) = env_git {
            settings.git = git;
        }

        settings.apply_overrides(overrides);
        settings.validate()?;

        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }

    /// Overlay the values present in a config file
    pub fn apply_file(&mut self, file: FileSettings) {
        let FileSettings {
            host,
            branch,
            remote,
            commit_message,
            default_repo_name,
            git,
        } = file;

        replace_if_some(&mut self.host, host);
        replace_if_some(&mut self.branch, branch);
        replace_if_some(&mut self.remote, remote);
        replace_if_some(&mut self.commit_message, commit_message);
        replace_if_some(&mut self.default_repo_name, default_repo_name);
        replace_if_some(&mut self.git, git);
    }

    /// Overlay command-line values. The root is handled by `resolve_from`.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        replace_if_some(&mut self.host, overrides.host.clone());
        replace_if_some(&mut self.branch, overrides.branch.clone());
        replace_if_some(&mut self.remote, overrides.remote.clone());
        replace_if_some(&mut self.commit_message, overrides.commit_message.clone());
        replace_if_some(&mut self.default_repo_name, overrides.default_repo_name.clone());
    }

    /// Reject blank values, which would produce broken git commands
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("git", &self.git),
            ("host", &self.host),
            ("branch", &self.branch),
            ("remote", &self.remote),
            ("commit_message", &self.commit_message),
            ("default_repo_name", &self.default_repo_name),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                bail!("Setting '{name}' must not be empty");
            }
        }

        if self.host.contains('/') || self.host.contains('@') {
            bail!("Setting 'host' must be a bare host name, got '{}'", self.host);
        }

        Ok(())
    }
}

fn replace_if_some(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Location of the per-user config file, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghup").join("config.toml"))
}

/// Load the `[upload]` table of a config file
///
/// # Returns
/// * `Ok(Some(FileSettings))` - File loaded and parsed successfully
/// * `Ok(None)` - File doesn't exist
/// * `Err(_)` - Failed to read or parse the file
pub fn load_file(path: &Path) -> Result<Option<FileSettings>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(Some(file.upload))
}
