//! Error taxonomy for the content layer.
//!
//! | Error                | Raised by                       | Fatal                       |
//! |----------------------|---------------------------------|-----------------------------|
//! | `ConfigurationError` | registry construction           | always                      |
//! | `ValidationError`    | field, slug and route checks    | always                      |
//! | `RouteError`         | framework path resolution       | only for `resolve` requests |
//! | `SourceError`        | reading the content tree        | always                      |
//!
//! Package version lookups never surface an error; see `package`.

use super::kind::DocumentKind;
use std::path::PathBuf;
use thiserror::Error;

/// Registry definition errors, raised before any document is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("empty file pattern for `{0}`")]
    EmptyPattern(DocumentKind),

    #[error("malformed file pattern `{pattern}` for `{kind}`: {reason}")]
    MalformedPattern {
        kind: DocumentKind,
        pattern: String,
        reason: &'static str,
    },

    #[error("file pattern `{pattern}` of `{kind}` duplicates the pattern of `{existing}`")]
    DuplicatePattern {
        kind: DocumentKind,
        existing: DocumentKind,
        pattern: String,
    },

    #[error("document type `{0}` is registered twice")]
    DuplicateKind(DocumentKind),

    #[error("document type `{kind}` has no `{field}` resolver")]
    MissingResolver {
        kind: DocumentKind,
        field: &'static str,
    },

    #[error("document type `{0}` declares an empty required field name")]
    EmptyRequiredField(DocumentKind),
}

/// Per-document validation errors. Any of these aborts the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{path}`: missing required field `{field}`")]
    MissingField { path: String, field: String },

    #[error("`{path}`: field `{field}` {reason}")]
    InvalidField {
        path: String,
        field: String,
        reason: String,
    },

    #[error("`{path}`: computed slug is empty")]
    EmptySlug { path: String },

    #[error("duplicate {kind} slug `{slug}` in `{first}` and `{second}`")]
    DuplicateSlug {
        kind: DocumentKind,
        slug: String,
        first: String,
        second: String,
    },

    #[error("duplicate {kind} route `{path}` from `{first}` and `{second}`")]
    DuplicateRoute {
        kind: DocumentKind,
        path: String,
        first: String,
        second: String,
    },
}

/// Framework route resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("empty route")]
    Empty,

    #[error("`{0}` is not a supported framework")]
    UnknownFramework(String),

    #[error("no {kind} document at `{path}`")]
    NotFound { kind: DocumentKind, path: String },
}

/// Errors while reading raw documents.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is outside the content directory")]
    OutsideRoot(PathBuf),

    #[error("`{0}` has a non UTF-8 path")]
    InvalidPath(PathBuf),

    #[error("`{path}`: unterminated front-matter block")]
    UnterminatedFrontmatter { path: String },

    #[error("`{path}`: malformed front-matter: {message}")]
    MalformedFrontmatter { path: String, message: String },
}

/// Any error produced by the content layer.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
