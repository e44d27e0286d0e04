//! `[repo]` and `[registry]` sections: where documents and packages live
//! outside the content tree. Every URL computed for a document is built from
//! these values.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[repo]` section in doclayer.toml - the source repository.
///
/// # Example
/// ```toml
/// [repo]
/// url = "https://github.com/chakra-ui/zag"
/// edit_url = "https://github.com/chakra-ui/zag/edit/main/website/data"
/// branch = "main"
/// source_dir = "packages/machines"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RepoConfig {
    /// Repository home, base of `sourceUrl`.
    #[serde(default)]
    pub url: String,

    /// Base of `editUrl`; the document id is appended.
    #[serde(default)]
    pub edit_url: String,

    #[serde(default = "defaults::repo::branch")]
    #[educe(Default = defaults::repo::branch())]
    pub branch: String,

    /// Directory holding one package per component, relative to the repo root.
    #[serde(default)]
    pub source_dir: String,
}

/// `[registry]` section in doclayer.toml - package registry links.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Base of `npmUrl`; the package name is appended.
    #[serde(default = "defaults::registry::package_url")]
    #[educe(Default = defaults::registry::package_url())]
    pub package_url: String,

    /// Base of `visualizeUrl`; the component slug is appended.
    #[serde(default)]
    pub visualize_url: String,
}
