//! Site configuration management for `doclayer.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[base]`     | Site header of the manifest                    |
//! | `[repo]`     | Source repository (edit and source links)      |
//! | `[registry]` | Package registry and visualizer links          |
//! | `[build]`    | Content root, output, packages, file extension |
//! | `[extra]`    | Free fields copied into the site header        |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Zag"
//!
//! [repo]
//! url = "https://github.com/chakra-ui/zag"
//! edit_url = "https://github.com/chakra-ui/zag/edit/main/website/data"
//! source_dir = "packages/machines"
//!
//! [registry]
//! visualize_url = "https://state-machine-viz.vercel.app"
//!
//! [build]
//! content = "website/data"
//! packages = "website/node_modules"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod repo;

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use repo::{RegistryConfig, RepoConfig};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing doclayer.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub repo: RepoConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub build: BuildConfig,

    /// User-defined fields, passed through to the manifest header
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.update_path_with_root(&root, cli);

        if let Commands::Build { clean: true } = cli.command {
            self.build.clean = true;
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.packages = Self::normalize_path(&root.join(&self.build.packages));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    pub fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration after CLI overrides are applied
    pub fn validate(&self) -> Result<()> {
        let content = &self.build.content;
        if !content.exists() {
            bail!(ConfigError::Validation(format!(
                "[build.content] `{}` not found",
                content.display()
            )));
        }
        if !content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.content] `{}` is not a directory",
                content.display()
            )));
        }

        // `--clean` removes the output directory
        if content.starts_with(&self.build.output) {
            bail!(ConfigError::Validation(
                "[build.output] must not contain [build.content]".into()
            ));
        }

        let extension = &self.build.extension;
        if extension.is_empty() || extension.contains(['.', '/', '*']) {
            bail!(ConfigError::Validation(
                "[build.extension] must be a bare extension like `mdx`".into()
            ));
        }

        let urls = [
            ("[base.url]", self.base.url.as_deref().unwrap_or_default()),
            ("[repo.url]", self.repo.url.as_str()),
            ("[repo.edit_url]", self.repo.edit_url.as_str()),
            ("[registry.package_url]", self.registry.package_url.as_str()),
            ("[registry.visualize_url]", self.registry.visualize_url.as_str()),
        ];
        for (field, url) in urls {
            if !url.is_empty() && !url.starts_with("http") {
                bail!(ConfigError::Validation(format!(
                    "{field} must start with http:// or https://"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
