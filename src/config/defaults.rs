//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Documentation".into()
    }

    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [repo] Section Defaults
// ============================================================================

pub mod repo {
    pub fn branch() -> String {
        "main".into()
    }
}

// ============================================================================
// [registry] Section Defaults
// ============================================================================

pub mod registry {
    pub fn package_url() -> String {
        "https://www.npmjs.com/package".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "data".into()
    }

    pub fn output() -> PathBuf {
        ".doclayer".into()
    }

    pub fn packages() -> PathBuf {
        "node_modules".into()
    }

    pub fn extension() -> String {
        crate::content::DEFAULT_EXTENSION.into()
    }
}
