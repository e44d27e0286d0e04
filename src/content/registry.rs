//! Document type registry.
//!
//! Each category is a [`DocumentTypeSpec`]: a directory-prefix file pattern,
//! the declared fields it requires, and its resolver table. Classification
//! looks up every ancestor directory of a document in a prefix index instead
//! of testing each pattern, so its cost depends on path depth only.
//!
//! ```text
//! guides/setup/intro.mdx
//!   ancestors: ""  "guides"  "guides/setup"
//!                     │
//!                     └── by_prefix["guides"] = [1] ──► Guide
//! ```
//!
//! When several patterns select the same document (a nested prefix, or a
//! wildcard extension next to a specific one) the earliest registered spec
//! wins. Identical patterns are rejected at registration.

use super::{
    error::ConfigurationError,
    fields::{ResolverTable, required_fields, resolvers_for},
    kind::DocumentKind,
    source::RawDocument,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::{fmt, path::Path};

/// Extension of the standard content files.
pub const DEFAULT_EXTENSION: &str = "mdx";

// ============================================================================
// File Pattern
// ============================================================================

/// `<dir>[/<dir>...]/**/*.<ext>` or `<dir>/**/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    raw: String,
    /// Directory prefix, `/`-separated, empty for the content root
    prefix: String,
    /// `None` accepts any extension
    extension: Option<String>,
}

impl FilePattern {
    /// Parse a glob-style pattern.
    pub fn parse(kind: DocumentKind, pattern: &str) -> Result<Self, ConfigurationError> {
        let raw = pattern.trim();
        if raw.is_empty() {
            return Err(ConfigurationError::EmptyPattern(kind));
        }
        let malformed = |reason| ConfigurationError::MalformedPattern {
            kind,
            pattern: raw.to_owned(),
            reason,
        };

        let (prefix, file_glob) = match raw.rsplit_once("/**/") {
            Some(split) => split,
            None => (
                "",
                raw.strip_prefix("**/")
                    .ok_or_else(|| malformed("expected `<dir>/**/<file glob>`"))?,
            ),
        };

        if prefix.contains(['*', '?', '[', ']', '{', '}']) {
            return Err(malformed("wildcards are only allowed in the file glob"));
        }
        if !prefix.is_empty() && prefix.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(malformed("directory prefix must be a plain relative path"));
        }

        let extension = match file_glob {
            "*" => None,
            glob => match glob.strip_prefix("*.") {
                Some(ext) if !ext.is_empty() && !ext.contains(['*', '?', '/', '.']) => {
                    Some(ext.to_owned())
                }
                _ => return Err(malformed("file glob must be `*` or `*.<ext>`")),
            },
        };

        Ok(Self {
            raw: raw.to_owned(),
            prefix: prefix.to_owned(),
            extension,
        })
    }

    fn accepts_extension(&self, ext: Option<&str>) -> bool {
        match &self.extension {
            None => true,
            Some(want) => ext == Some(want.as_str()),
        }
    }

    /// Full match, independent of the registry index.
    #[cfg(test)]
    fn matches(&self, id: &str) -> bool {
        let under_prefix = self.prefix.is_empty()
            || id
                .strip_prefix(self.prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'));
        under_prefix && self.accepts_extension(extension_of(id))
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn extension_of(id: &str) -> Option<&str> {
    Path::new(id).extension().and_then(|ext| ext.to_str())
}

// ============================================================================
// Document Type Spec
// ============================================================================

/// One registered category.
#[derive(Debug, Clone)]
pub struct DocumentTypeSpec {
    pub kind: DocumentKind,
    pub pattern: FilePattern,
    pub required_fields: Vec<String>,
    pub resolvers: ResolverTable,
}

impl DocumentTypeSpec {
    pub fn new(
        kind: DocumentKind,
        pattern: &str,
        required_fields: Vec<String>,
        resolvers: ResolverTable,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            kind,
            pattern: FilePattern::parse(kind, pattern)?,
            required_fields,
            resolvers,
        })
    }

    /// The built-in definition of `kind`: `<kind dir>/**/*.<extension>`.
    ///
    /// Fails when `extension` does not form a valid file glob.
    pub fn standard(kind: DocumentKind, extension: &str) -> Result<Self, ConfigurationError> {
        Self::new(
            kind,
            &format!("{}/**/*.{extension}", kind.dir()),
            required_fields(kind),
            resolvers_for(kind),
        )
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered set of document type specs with a directory-prefix index.
#[derive(Debug, Default)]
pub struct Registry {
    specs: Vec<DocumentTypeSpec>,
    by_prefix: FxHashMap<String, SmallVec<[usize; 2]>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in category, in listing order.
    pub fn standard(extension: &str) -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();
        for kind in DocumentKind::ALL {
            registry.register(DocumentTypeSpec::standard(kind, extension)?)?;
        }
        Ok(registry)
    }

    /// Add a category. Registration order decides overlapping matches.
    pub fn register(&mut self, spec: DocumentTypeSpec) -> Result<(), ConfigurationError> {
        if self.specs.iter().any(|s| s.kind == spec.kind) {
            return Err(ConfigurationError::DuplicateKind(spec.kind));
        }
        if let Some(existing) = self.specs.iter().find(|s| {
            s.pattern.prefix == spec.pattern.prefix && s.pattern.extension == spec.pattern.extension
        }) {
            return Err(ConfigurationError::DuplicatePattern {
                kind: spec.kind,
                existing: existing.kind,
                pattern: spec.pattern.to_string(),
            });
        }
        for field in ["slug", "params"] {
            if !spec.resolvers.contains_key(field) {
                return Err(ConfigurationError::MissingResolver { kind: spec.kind, field });
            }
        }
        if spec.required_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigurationError::EmptyRequiredField(spec.kind));
        }

        let index = self.specs.len();
        self.by_prefix
            .entry(spec.pattern.prefix.clone())
            .or_default()
            .push(index);
        self.specs.push(spec);
        Ok(())
    }

    /// The first registered spec whose pattern selects `raw`.
    pub fn classify(&self, raw: &RawDocument) -> Option<&DocumentTypeSpec> {
        let ext = extension_of(&raw.source_file_name);

        ancestors(&raw.source_file_dir)
            .filter_map(|prefix| self.by_prefix.get(prefix))
            .flatten()
            .copied()
            .filter(|&index| self.specs[index].pattern.accepts_extension(ext))
            .min()
            .map(|index| &self.specs[index])
    }

    pub fn specs(&self) -> &[DocumentTypeSpec] {
        &self.specs
    }

    /// Whether any registered pattern could select `path`, judged by extension.
    pub fn accepts(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str());
        self.specs.iter().any(|s| s.pattern.accepts_extension(ext))
    }
}

/// `""`, `a`, `a/b`, ... `dir`.
fn ancestors(dir: &str) -> impl Iterator<Item = &str> {
    let inner = dir
        .match_indices('/')
        .map(move |(i, _)| &dir[..i])
        .chain((!dir.is_empty()).then_some(dir));
    std::iter::once("").chain(inner)
}
