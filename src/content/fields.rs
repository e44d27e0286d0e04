//! Computed field resolvers.
//!
//! Every category gets the base table merged with its own override table when
//! the registry is built:
//!
//! ```text
//! base:      slug  editUrl  params  frontmatter
//!              │       │       │         │
//! Component: ──┼───────┼───────┼─────────┼── + pathname npmUrl sourceUrl visualizeUrl version
//! Snippet:   ──┼───────┼───────┼─────────┼── + framework
//! Changelog: slug'     │    params'  frontmatter'      (release-date addressing)
//! ```
//!
//! Resolvers are plain functions of `(kind, document, context)`. They never
//! read another resolver's output, so evaluation order is irrelevant and
//! documents resolve independently.

use super::{
    document::TypedDocument,
    error::ValidationError,
    frontmatter::Fields,
    kind::DocumentKind,
    package::{PackageMetadata, lookup_version},
    registry::DocumentTypeSpec,
    source::RawDocument,
    toc::{TocEntry, extract_toc},
};
use crate::{config::SiteConfig, utils::slug::{kebab_case, strip_extension}};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Site-wide inputs available to every resolver.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub config: &'a SiteConfig,
    pub packages: &'a dyn PackageMetadata,
}

impl<'a> ResolveContext<'a> {
    pub fn new(config: &'a SiteConfig, packages: &'a dyn PackageMetadata) -> Self {
        Self { config, packages }
    }
}

pub type ResolveResult = Result<Value, ValidationError>;

/// A pure computed-field function.
pub type Resolver = fn(DocumentKind, &RawDocument, &ResolveContext<'_>) -> ResolveResult;

/// Output field name → resolver.
pub type ResolverTable = BTreeMap<&'static str, Resolver>;

// ============================================================================
// Tables
// ============================================================================

/// Resolvers shared by every category.
pub fn base_resolvers() -> ResolverTable {
    ResolverTable::from([
        ("slug", file_slug as Resolver),
        ("editUrl", edit_url as Resolver),
        ("params", flattened_params as Resolver),
        ("frontmatter", frontmatter as Resolver),
    ])
}

/// Category-specific resolvers, added to or replacing the base ones.
pub fn override_resolvers(kind: DocumentKind) -> ResolverTable {
    let mut table = ResolverTable::new();
    if kind.pathname().is_some() {
        table.insert("pathname", pathname);
    }
    match kind {
        DocumentKind::Component => {
            table.insert("npmUrl", npm_url);
            table.insert("sourceUrl", source_url);
            table.insert("visualizeUrl", visualize_url);
            table.insert("version", version);
        }
        DocumentKind::Snippet => {
            table.insert("framework", snippet_framework);
        }
        DocumentKind::Changelog => {
            table.insert("slug", changelog_slug);
            table.insert("params", changelog_params);
            table.insert("frontmatter", changelog_frontmatter);
        }
        _ => {}
    }
    table
}

/// Base table merged with the overrides of `kind`.
pub fn resolvers_for(kind: DocumentKind) -> ResolverTable {
    let mut table = base_resolvers();
    table.extend(override_resolvers(kind));
    table
}

/// Declared fields a document of `kind` must carry.
pub fn required_fields(kind: DocumentKind) -> Vec<String> {
    let fields: &[&str] = match kind {
        DocumentKind::Changelog => &["releaseDate"],
        DocumentKind::Component => &["title", "package"],
        DocumentKind::Snippet => &[],
        _ => &["title"],
    };
    fields.iter().map(|f| (*f).to_owned()).collect()
}

// ============================================================================
// Resolution
// ============================================================================

/// Validate `raw` against `spec` and evaluate every resolver of `spec`.
pub fn resolve(
    raw: &RawDocument,
    spec: &DocumentTypeSpec,
    ctx: &ResolveContext<'_>,
) -> Result<TypedDocument, ValidationError> {
    validate_required(raw, &spec.required_fields)?;

    let computed = spec
        .resolvers
        .iter()
        .map(|(name, resolver)| Ok(((*name).to_owned(), resolver(spec.kind, raw, ctx)?)))
        .collect::<Result<Fields, ValidationError>>()?;

    let slug = computed
        .get("slug")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(raw, "slug", "must resolve to a string"))?
        .to_owned();
    let params = computed
        .get("params")
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| invalid(raw, "params", "must resolve to a list of strings"))?;

    Ok(TypedDocument {
        kind: spec.kind,
        id: raw.id.clone(),
        slug,
        params,
        fields: raw.fields.clone(),
        computed,
        body: raw.body.clone(),
    })
}

/// Every required field must be present and non-empty.
fn validate_required(raw: &RawDocument, required: &[String]) -> Result<(), ValidationError> {
    match required.iter().find(|name| !is_present(raw.fields.get(name.as_str()))) {
        Some(field) => Err(ValidationError::MissingField {
            path: raw.id.clone(),
            field: field.clone(),
        }),
        None => Ok(()),
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

fn invalid(raw: &RawDocument, field: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidField {
        path: raw.id.clone(),
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

// ============================================================================
// Base Resolvers
// ============================================================================

/// File name without its extension.
fn slug_of(raw: &RawDocument) -> Result<String, ValidationError> {
    let slug = strip_extension(&raw.source_file_name);
    if slug.is_empty() {
        return Err(ValidationError::EmptySlug { path: raw.id.clone() });
    }
    Ok(slug.to_owned())
}

fn file_slug(_: DocumentKind, raw: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    slug_of(raw).map(Value::String)
}

fn edit_url(_: DocumentKind, raw: &RawDocument, ctx: &ResolveContext<'_>) -> ResolveResult {
    let base = ctx.config.repo.edit_url.trim_end_matches('/');
    Ok(Value::String(format!("{base}/{}", raw.id)))
}

fn flattened_params(_: DocumentKind, raw: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    Ok(raw.flattened_path.split('/').collect())
}

/// Renderer-facing metadata bundle.
///
/// Self-contained: owns copies of everything, no reference back to the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    pub slug: String,
    pub toc: Vec<TocEntry>,
}

fn frontmatter(_: DocumentKind, raw: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    let bundle = Frontmatter {
        title: declared_text(raw, "title")?,
        description: declared_text(raw, "description")?,
        tags: declared_tags(raw)?,
        author: raw.fields.get("author").filter(|v| !v.is_null()).cloned(),
        slug: format!("/{}", raw.flattened_path),
        toc: extract_toc(&raw.body),
    };
    to_value(raw, "frontmatter", &bundle)
}

/// A declared text field. Unquoted scalars (`title: 2024`) keep their text.
fn declared_text(raw: &RawDocument, field: &str) -> Result<Option<String>, ValidationError> {
    match raw.fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(scalar.to_string())),
        Some(_) => Err(invalid(raw, field, "must be a string")),
    }
}

/// `tags` as a string list; a lone string counts as one tag.
fn declared_tags(raw: &RawDocument) -> Result<Option<Vec<String>>, ValidationError> {
    match raw.fields.get("tags") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(tag)) => Ok(Some(vec![tag.clone()])),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
            .map(Some)
            .ok_or_else(|| invalid(raw, "tags", "must be a list of strings")),
        Some(_) => Err(invalid(raw, "tags", "must be a list of strings")),
    }
}

fn to_value(raw: &RawDocument, field: &str, value: &impl Serialize) -> ResolveResult {
    serde_json::to_value(value).map_err(|err| invalid(raw, field, &err.to_string()))
}

// ============================================================================
// Category Resolvers
// ============================================================================

fn pathname(kind: DocumentKind, _: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    Ok(kind.pathname().map_or(Value::Null, Value::from))
}

fn npm_url(_: DocumentKind, raw: &RawDocument, ctx: &ResolveContext<'_>) -> ResolveResult {
    let base = ctx.config.registry.package_url.trim_end_matches('/');
    let package = raw.field_str("package").unwrap_or_default();
    Ok(Value::String(format!("{base}/{package}")))
}

fn source_url(_: DocumentKind, raw: &RawDocument, ctx: &ResolveContext<'_>) -> ResolveResult {
    let repo = &ctx.config.repo;
    let slug = slug_of(raw)?;
    Ok(Value::String(format!(
        "{}/tree/{}/{}/{slug}",
        repo.url.trim_end_matches('/'),
        repo.branch,
        repo.source_dir.trim_matches('/'),
    )))
}

fn visualize_url(_: DocumentKind, raw: &RawDocument, ctx: &ResolveContext<'_>) -> ResolveResult {
    let base = ctx.config.registry.visualize_url.trim_end_matches('/');
    Ok(Value::String(format!("{base}/{}", slug_of(raw)?)))
}

/// The only resolver allowed to fail silently.
fn version(_: DocumentKind, raw: &RawDocument, ctx: &ResolveContext<'_>) -> ResolveResult {
    Ok(Value::String(lookup_version(ctx.packages, raw.field_str("package"))))
}

/// `snippets/<framework>/...`: the second path segment.
fn snippet_framework(_: DocumentKind, raw: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    Ok(raw.path_segments().nth(1).map_or(Value::Null, Value::from))
}

// ============================================================================
// Changelog Resolvers
// ============================================================================

fn release_slug(raw: &RawDocument) -> Result<String, ValidationError> {
    let date = raw
        .field_str("releaseDate")
        .ok_or_else(|| invalid(raw, "releaseDate", "must be a string"))?;
    let slug = kebab_case(date);
    if slug.is_empty() {
        return Err(ValidationError::EmptySlug { path: raw.id.clone() });
    }
    Ok(slug)
}

fn changelog_slug(_: DocumentKind, raw: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    release_slug(raw).map(Value::String)
}

fn changelog_params(kind: DocumentKind, raw: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    Ok(Value::from(vec![kind.dir().to_owned(), release_slug(raw)?]))
}

fn changelog_frontmatter(kind: DocumentKind, raw: &RawDocument, _: &ResolveContext<'_>) -> ResolveResult {
    let date = raw.field_str("releaseDate").unwrap_or_default();
    let bundle = Frontmatter {
        title: Some("Changelog".to_owned()),
        description: Some(format!("The changes made as at {date}")),
        tags: None,
        author: None,
        slug: format!("/{}/{}", kind.dir(), release_slug(raw)?),
        toc: Vec::new(),
    };
    to_value(raw, "frontmatter", &bundle)
}
