//! `[base]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in doclayer.toml - documentation site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Zag"
/// description = "UI components powered by finite state machines"
/// url = "https://zagjs.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, written into the manifest header.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Absolute URL of the deployed site.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,
}
