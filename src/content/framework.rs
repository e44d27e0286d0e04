//! Framework/platform tags and route parameter extraction.
//!
//! Framework-scoped routes have the shape `[framework, ...slug]`. The first
//! segment is always the framework; it is never inferred from content.
//!
//! ```text
//! ["web", "buttons", "primary"]
//!    │        └────────┴──────► slug: ["buttons", "primary"]
//!    └─────────────────────────► framework: Framework::Web
//! ```

use super::error::RouteError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Closed enumeration of supported platforms.
///
/// The declaration order is the display order. [`Framework::index`] is stable
/// and used to sort navigation menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Android,
    Ios,
    Unity,
    Web,
    Node,
    Rust,
}

/// Presentation data for a framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameworkInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub index: usize,
}

/// Frozen lookup table, indexed by ordinal.
static FRAMEWORK_TABLE: [FrameworkInfo; 6] = [
    FrameworkInfo { id: "android", label: "Android", icon: "AiOutlineAndroid", index: 0 },
    FrameworkInfo { id: "ios", label: "iOS (Swift)", icon: "SiSwift", index: 1 },
    FrameworkInfo { id: "unity", label: "Unity", icon: "SiUnity", index: 2 },
    FrameworkInfo { id: "web", label: "JavaScript", icon: "SiJavascript", index: 3 },
    FrameworkInfo { id: "node", label: "Node.js", icon: "SiNodedotjs", index: 4 },
    FrameworkInfo { id: "rust", label: "Rust", icon: "SiRust", index: 5 },
];

impl Framework {
    pub const ALL: [Self; 6] = [
        Self::Android,
        Self::Ios,
        Self::Unity,
        Self::Web,
        Self::Node,
        Self::Rust,
    ];

    /// Ordinal position in [`Framework::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static FrameworkInfo {
        &FRAMEWORK_TABLE[self.index()]
    }

    pub fn as_str(self) -> &'static str {
        self.info().id
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// The whole presentation table, in display order. Written to the manifest.
    pub fn table() -> &'static [FrameworkInfo] {
        &FRAMEWORK_TABLE
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|fw| fw.as_str() == s)
            .ok_or_else(|| RouteError::UnknownFramework(s.to_owned()))
    }
}

/// Result of splitting a framework-scoped route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkParams {
    pub framework: Framework,
    pub slug: Vec<String>,
}

/// Split `[framework, ...slug]` into its framework and slug path.
///
/// The slug segments are returned verbatim; whether they name an existing
/// document is decided by the manifest lookup.
pub fn extract_params<S: AsRef<str>>(segments: &[S]) -> Result<FrameworkParams, RouteError> {
    let (first, rest) = segments.split_first().ok_or(RouteError::Empty)?;
    let framework = first.as_ref().parse()?;

    Ok(FrameworkParams {
        framework,
        slug: rest.iter().map(|s| s.as_ref().to_owned()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_params_web() {
        let params = extract_params(&["web", "buttons", "primary"]).unwrap();
        assert_eq!(params.framework, Framework::Web);
        assert_eq!(params.slug, vec!["buttons", "primary"]);
    }

    #[test]
    fn test_extract_params_framework_only() {
        let params = extract_params(&["rust"]).unwrap();
        assert_eq!(params.framework, Framework::Rust);
        assert!(params.slug.is_empty());
    }

    #[test]
    fn test_extract_params_unknown_framework() {
        let err = extract_params(&["kotlin", "x"]).unwrap_err();
        assert_eq!(err, RouteError::UnknownFramework("kotlin".into()));
    }

    #[test]
    fn test_extract_params_rejects_every_non_member() {
        for segment in ["", "Web", "WEB", "flutter", "javascript", "swift", " web"] {
            assert!(
                extract_params(&[segment, "page"]).is_err(),
                "{segment:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_extract_params_empty() {
        let segments: [&str; 0] = [];
        assert_eq!(extract_params(&segments), Err(RouteError::Empty));
    }

    #[test]
    fn test_extract_params_round_trip() {
        for fw in Framework::ALL {
            let route = vec![fw.as_str().to_owned(), "getting-started".into(), "install".into()];
            let params = extract_params(&route).unwrap();
            assert_eq!(params.framework, fw);
            let mut rebuilt = vec![params.framework.to_string()];
            rebuilt.extend(params.slug);
            assert_eq!(rebuilt, route);
        }
    }

    #[test]
    fn test_ordinals_follow_declaration_order() {
        let ids: Vec<_> = Framework::ALL.iter().map(|fw| fw.as_str()).collect();
        assert_eq!(ids, ["android", "ios", "unity", "web", "node", "rust"]);
        for (i, fw) in Framework::ALL.iter().enumerate() {
            assert_eq!(fw.index(), i);
            assert_eq!(fw.info().index, i);
            assert_eq!(fw.as_str().parse::<Framework>().map(Framework::index), Ok(i));
        }
    }

    #[test]
    fn test_labels_and_icons() {
        assert_eq!(Framework::Ios.label(), "iOS (Swift)");
        assert_eq!(Framework::Web.label(), "JavaScript");
        assert_eq!(Framework::Node.info().icon, "SiNodedotjs");
        assert_eq!(Framework::table().len(), Framework::ALL.len());
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("unity".parse::<Framework>(), Ok(Framework::Unity));
        assert!("Unity".parse::<Framework>().is_err());
        assert!("kotlin".parse::<Framework>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Framework::Ios).unwrap(), "\"ios\"");
        let fw: Framework = serde_json::from_str("\"node\"").unwrap();
        assert_eq!(fw, Framework::Node);
    }
}
