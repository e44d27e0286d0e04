//! Source document reader.
//!
//! Enumerates document files under the content root and turns each one into
//! a [`RawDocument`]. Path facets follow one convention everywhere:
//!
//! | Facet              | `<root>/guides/setup/intro.mdx` |
//! |--------------------|---------------------------------|
//! | `id`               | `guides/setup/intro.mdx`        |
//! | `source_file_name` | `intro.mdx`                     |
//! | `source_file_dir`  | `guides/setup`                  |
//! | `flattened_path`   | `guides/setup/intro`            |

use super::{
    error::SourceError,
    frontmatter::{Fields, parse_frontmatter},
};
use crate::utils::slug::strip_extension;
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files never treated as documents.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// One source file, immutable once read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Path relative to the content root, `/`-separated.
    pub id: String,
    pub source_file_name: String,
    pub source_file_dir: String,
    pub flattened_path: String,
    #[serde(skip)]
    pub fields: Fields,
    #[serde(skip)]
    pub body: String,
}

impl RawDocument {
    /// Build a document from its content-relative path and full text.
    pub fn from_source(id: &str, text: &str) -> Result<Self, SourceError> {
        let id = id.replace('\\', "/").trim_start_matches('/').to_owned();
        let (fields, body) = parse_frontmatter(&id, text)?;

        let (source_file_dir, source_file_name) = match id.rsplit_once('/') {
            Some((dir, name)) => (dir.to_owned(), name.to_owned()),
            None => (String::new(), id.clone()),
        };
        let flattened_path = flatten_path(&source_file_dir, &source_file_name);

        Ok(Self {
            fields,
            body: body.to_owned(),
            source_file_dir,
            source_file_name,
            flattened_path,
            id,
        })
    }

    /// Read `path`, which must live under `root`.
    pub fn read(root: &Path, path: &Path) -> Result<Self, SourceError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| SourceError::OutsideRoot(path.to_path_buf()))?;
        let id = relative
            .to_str()
            .ok_or_else(|| SourceError::InvalidPath(path.to_path_buf()))?;
        let text =
            fs::read_to_string(path).map_err(|err| SourceError::Io(path.to_path_buf(), err))?;
        Self::from_source(id, &text)
    }

    /// Same as `id`; kept as its own name because resolvers address it so.
    pub fn source_file_path(&self) -> &str {
        &self.id
    }

    /// Path segments of `source_file_path`.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.source_file_path().split('/')
    }

    /// A declared string field, if present.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}

/// `dir` + file stem, with a trailing `index` dropped.
fn flatten_path(dir: &str, file_name: &str) -> String {
    let stem = strip_extension(file_name);
    match (dir.is_empty(), stem == "index") {
        (true, _) => stem.to_owned(),
        (false, true) => dir.to_owned(),
        (false, false) => format!("{dir}/{stem}"),
    }
}

/// Collect files under `root` accepted by `accept`.
///
/// The result is sorted so downstream output does not depend on walk order.
pub fn collect_document_files(root: &Path, accept: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .filter(|e| accept(e.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Read every accepted document under `root` in parallel.
pub fn read_documents(
    root: &Path,
    accept: impl Fn(&Path) -> bool,
) -> Result<Vec<RawDocument>, SourceError> {
    collect_document_files(root, accept)
        .par_iter()
        .map(|path| RawDocument::read(root, path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn has_extension(ext: &str) -> impl Fn(&Path) -> bool + '_ {
        move |path| path.extension().is_some_and(|e| e == ext)
    }

    #[test]
    fn test_path_facets() {
        let doc = RawDocument::from_source("guides/setup/intro.mdx", "# Intro").unwrap();
        assert_eq!(doc.id, "guides/setup/intro.mdx");
        assert_eq!(doc.source_file_path(), "guides/setup/intro.mdx");
        assert_eq!(doc.source_file_name, "intro.mdx");
        assert_eq!(doc.source_file_dir, "guides/setup");
        assert_eq!(doc.flattened_path, "guides/setup/intro");
        assert_eq!(doc.body, "# Intro");
    }

    #[test]
    fn test_index_is_flattened_to_directory() {
        let doc = RawDocument::from_source("guides/index.mdx", "").unwrap();
        assert_eq!(doc.flattened_path, "guides");
    }

    #[test]
    fn test_windows_separators_are_normalized() {
        let doc = RawDocument::from_source("web\\buttons\\primary.mdx", "").unwrap();
        assert_eq!(doc.id, "web/buttons/primary.mdx");
        assert_eq!(doc.flattened_path, "web/buttons/primary");
    }

    #[test]
    fn test_root_level_document() {
        let doc = RawDocument::from_source("about.mdx", "").unwrap();
        assert_eq!(doc.source_file_dir, "");
        assert_eq!(doc.flattened_path, "about");
    }

    #[test]
    fn test_declared_fields() {
        let doc = RawDocument::from_source("guides/a.mdx", "---\ntitle: A\n---\nbody").unwrap();
        assert_eq!(doc.field_str("title"), Some("A"));
        assert_eq!(doc.field_str("missing"), None);
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_read_documents_filters_extensions() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("guides/nested")).unwrap();
        fs::write(root.join("guides/a.mdx"), "---\ntitle: A\n---\n").unwrap();
        fs::write(root.join("guides/nested/b.mdx"), "---\ntitle: B\n---\n").unwrap();
        fs::write(root.join("guides/notes.txt"), "ignored").unwrap();
        fs::write(root.join("guides/.DS_Store"), "").unwrap();

        let docs = read_documents(root, has_extension("mdx")).unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["guides/a.mdx", "guides/nested/b.mdx"]);
    }

    #[test]
    fn test_read_outside_root() {
        let dir = TempDir::new().unwrap();
        let err = RawDocument::read(&dir.path().join("content"), Path::new("/elsewhere/a.mdx"))
            .unwrap_err();
        assert!(matches!(err, SourceError::OutsideRoot(_)));
    }

    #[test]
    fn test_read_reports_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.mdx"), "---\ntitle: x\n").unwrap();
        let err = read_documents(dir.path(), has_extension("mdx")).unwrap_err();
        assert!(err.to_string().contains("broken.mdx"));
    }
}
