//! `[build]` section configuration.
//!
//! Paths are relative to the project root until
//! [`SiteConfig::update_with_cli`](super::SiteConfig::update_with_cli)
//! normalizes them.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in doclayer.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "data"           # Content tree
/// output = ".doclayer"       # Manifest output
/// packages = "node_modules"  # Installed packages, for component versions
/// extension = "mdx"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content root holding one directory per document category.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Manifest output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Directory of installed packages (`<packages>/<name>/package.json`).
    #[serde(default = "defaults::build::packages")]
    #[educe(Default = defaults::build::packages())]
    pub packages: PathBuf,

    /// Extension of document files, without the dot.
    #[serde(default = "defaults::build::extension")]
    #[educe(Default = defaults::build::extension())]
    pub extension: String,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}
