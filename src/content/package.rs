//! Installed package version lookup.
//!
//! The lookup is best-effort: any failure resolves to an empty version
//! string and never reaches the build.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Source of installed package versions.
pub trait PackageMetadata: Send + Sync {
    /// Version of `package`, or an error if it cannot be determined.
    fn version(&self, package: &str) -> Result<String>;
}

/// Reads `<dir>/<package>/package.json`, like a `node_modules` tree.
#[derive(Debug, Clone)]
pub struct NodeModules {
    dir: PathBuf,
}

#[derive(Deserialize)]
struct PackageJson {
    version: String,
}

impl NodeModules {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PackageMetadata for NodeModules {
    fn version(&self, package: &str) -> Result<String> {
        // scoped names (`@scope/name`) are nested directories
        if package.is_empty() || package.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(anyhow!("invalid package name `{package}`"));
        }

        let path = self.dir.join(package).join("package.json");
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let meta: PackageJson = serde_json::from_str(&content)
            .with_context(|| format!("malformed `{}`", path.display()))?;

        let version = semver::Version::parse(meta.version.trim())
            .with_context(|| format!("invalid version `{}` in `{}`", meta.version, path.display()))?;
        Ok(version.to_string())
    }
}

/// Provider that knows no packages; every lookup falls back.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPackages;

#[cfg(test)]
impl PackageMetadata for NoPackages {
    fn version(&self, package: &str) -> Result<String> {
        Err(anyhow!("no package metadata for `{package}`"))
    }
}

/// Version of `package`, or `""` when the lookup fails for any reason.
pub fn lookup_version(provider: &dyn PackageMetadata, package: Option<&str>) -> String {
    package
        .and_then(|name| provider.version(name).ok())
        .unwrap_or_default()
}
