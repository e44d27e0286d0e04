//! Closed set of document categories.
//!
//! | Kind        | Directory     | Routable | Framework-partitioned |
//! |-------------|---------------|----------|-----------------------|
//! | `Overview`  | `overview/`   | yes      | no                    |
//! | `Guide`     | `guides/`     | yes      | no                    |
//! | `Snippet`   | `snippets/`   | no       | yes (`snippets/<fw>`) |
//! | `Component` | `components/` | yes      | no                    |
//! | `Changelog` | `changelogs/` | yes      | no                    |
//! | `Android`.. | `<platform>/` | yes      | yes (`params[0]`)     |
//! | `Resources` | `resources/`  | yes      | no                    |

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Category a document belongs to.
///
/// Declaration order is the manifest's listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Overview,
    Guide,
    Snippet,
    Component,
    Changelog,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Rust,
    Web,
    Node,
    Unity,
    Resources,
}

impl DocumentKind {
    pub const ALL: [Self; 12] = [
        Self::Overview,
        Self::Guide,
        Self::Snippet,
        Self::Component,
        Self::Changelog,
        Self::Android,
        Self::Ios,
        Self::Rust,
        Self::Web,
        Self::Node,
        Self::Unity,
        Self::Resources,
    ];

    /// Category tag as it appears in the manifest.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Guide => "Guide",
            Self::Snippet => "Snippet",
            Self::Component => "Component",
            Self::Changelog => "Changelog",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Rust => "Rust",
            Self::Web => "Web",
            Self::Node => "Node",
            Self::Unity => "Unity",
            Self::Resources => "Resources",
        }
    }

    /// Content subdirectory holding this category.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Guide => "guides",
            Self::Snippet => "snippets",
            Self::Component => "components",
            Self::Changelog => "changelogs",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Rust => "rust",
            Self::Web => "web",
            Self::Node => "node",
            Self::Unity => "unity",
            Self::Resources => "resources",
        }
    }

    /// Dynamic route template rendering this category, if it has one.
    pub const fn pathname(self) -> Option<&'static str> {
        match self {
            Self::Overview => Some("/overview/[slug]"),
            Self::Component => Some("/components/[...slug]"),
            Self::Android => Some("/android/[slug]"),
            Self::Ios => Some("/ios/[slug]"),
            Self::Rust => Some("/rust/[slug]"),
            Self::Web => Some("/web/[slug]"),
            Self::Node => Some("/node/[slug]"),
            Self::Unity => Some("/unity/[slug]"),
            Self::Resources => Some("/resources/[slug]"),
            Self::Guide | Self::Snippet | Self::Changelog => None,
        }
    }

    /// One category per supported platform.
    pub const fn is_platform(self) -> bool {
        matches!(
            self,
            Self::Android | Self::Ios | Self::Rust | Self::Web | Self::Node | Self::Unity
        )
    }

    /// Documents of this kind carry a framework tag that must be validated.
    pub const fn is_framework_partitioned(self) -> bool {
        self.is_platform() || matches!(self, Self::Snippet)
    }

    /// Snippets are embedded into other pages and never get a route.
    pub const fn is_routable(self) -> bool {
        !matches!(self, Self::Snippet)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    /// Accepts either the category tag (`iOS`) or its directory (`ios`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s) || kind.dir() == s)
            .ok_or_else(|| format!("unknown document kind `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_name_and_dir() {
        assert_eq!("iOS".parse::<DocumentKind>(), Ok(DocumentKind::Ios));
        assert_eq!("ios".parse::<DocumentKind>(), Ok(DocumentKind::Ios));
        assert_eq!("guides".parse::<DocumentKind>(), Ok(DocumentKind::Guide));
        assert_eq!("Guide".parse::<DocumentKind>(), Ok(DocumentKind::Guide));
        assert!("kotlin".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_platform_kinds_are_framework_partitioned() {
        for kind in DocumentKind::ALL {
            if kind.is_platform() {
                assert!(kind.is_framework_partitioned());
                assert!(kind.pathname().is_some());
            }
        }
        assert!(DocumentKind::Snippet.is_framework_partitioned());
        assert!(!DocumentKind::Snippet.is_routable());
        assert!(!DocumentKind::Guide.is_framework_partitioned());
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("{:<6}|", DocumentKind::Ios), "iOS   |");
    }

    #[test]
    fn test_serde_uses_category_tag() {
        let json = serde_json::to_string(&DocumentKind::Ios).unwrap();
        assert_eq!(json, "\"iOS\"");
        let kind: DocumentKind = serde_json::from_str("\"Resources\"").unwrap();
        assert_eq!(kind, DocumentKind::Resources);
    }
}
