//! Build manifest assembly.
//!
//! ```text
//! raw documents ──par_iter──► classify + resolve ──► framework check ──► slug + route uniqueness ──► fold
//!                (parallel, independent)            (warn + omit)       (single writer)
//! ```
//!
//! The manifest is immutable once built. Per-kind listings and routes share
//! the same `Arc<TypedDocument>`.

use super::{
    document::TypedDocument,
    error::{Result, RouteError, ValidationError},
    fields::{ResolveContext, resolve},
    framework::{Framework, FrameworkInfo, extract_params},
    frontmatter::{Fields, toml_to_json},
    kind::DocumentKind,
    registry::Registry,
    source::RawDocument,
};
use crate::{config::SiteConfig, debug, log};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, fs, path::Path, sync::Arc};

/// File name of the full manifest.
pub const MANIFEST_FILE: &str = "manifest.json";
/// File name of the route list.
pub const ROUTES_FILE: &str = "routes.json";
/// File name of a per-kind listing, inside `<output>/<Kind>/`.
pub const INDEX_FILE: &str = "_index.json";

// ============================================================================
// Types
// ============================================================================

/// A static route to pre-render.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub path: String,
    pub segments: Vec<String>,
    pub kind: DocumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    #[serde(rename = "document", serialize_with = "serialize_document_id")]
    pub document: Arc<TypedDocument>,
}

fn serialize_document_id<S: Serializer>(doc: &Arc<TypedDocument>, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&doc.id)
}

/// Site header of `manifest.json`, taken from `[base]` and `[extra]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteInfo {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Fields::is_empty")]
    pub extra: Fields,
}

impl SiteInfo {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.base.title.clone(),
            description: config.base.description.clone(),
            url: config.base.url.clone(),
            extra: config
                .extra
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_json(value.clone())))
                .collect(),
        }
    }
}

/// Every typed document by kind, plus the route list.
///
/// `frameworks` is the presentation table renderers use for navigation.
#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    site: SiteInfo,
    frameworks: &'static [FrameworkInfo],
    documents: BTreeMap<DocumentKind, Vec<Arc<TypedDocument>>>,
    routes: Vec<Route>,
}

// ============================================================================
// Assembly
// ============================================================================

/// Classify, validate and resolve `raws` into a manifest.
///
/// Unclassified documents are skipped. A framework-partitioned document with
/// an unknown framework is logged and left out before uniqueness is checked.
/// Any validation error on the kept documents aborts the whole build.
pub fn build_manifest(
    registry: &Registry,
    raws: &[RawDocument],
    ctx: &ResolveContext<'_>,
) -> Result<Manifest> {
    let mut resolved = raws
        .par_iter()
        .filter_map(|raw| match registry.classify(raw) {
            Some(spec) => Some(resolve(raw, spec, ctx)),
            None => {
                debug!("content"; "skipped unclassified `{}`", raw.id);
                None
            }
        })
        .collect::<std::result::Result<Vec<_>, ValidationError>>()?;

    resolved.sort_by(|a, b| (a.kind, &a.id).cmp(&(b.kind, &b.id)));

    let kept: Vec<_> = resolved
        .into_iter()
        .filter_map(|doc| match framework_of(&doc) {
            Ok(framework) => Some((doc, framework)),
            Err(err) => {
                log!("warn"; "omitting `{}`: {err}", doc.id);
                None
            }
        })
        .collect();
    check_unique_slugs(kept.iter().map(|(doc, _)| doc))?;
    check_unique_routes(kept.iter().map(|(doc, _)| doc))?;

    let mut manifest = Manifest {
        site: SiteInfo::from_config(ctx.config),
        frameworks: Framework::table(),
        ..Manifest::default()
    };
    for (doc, framework) in kept {
        let doc = Arc::new(doc);
        if doc.kind.is_routable() {
            manifest.routes.push(Route {
                path: doc.route_path(),
                segments: doc.params.clone(),
                kind: doc.kind,
                framework,
                document: Arc::clone(&doc),
            });
        }
        manifest.documents.entry(doc.kind).or_default().push(doc);
    }

    manifest.routes.sort_by(|a, b| a.path.cmp(&b.path).then(a.kind.cmp(&b.kind)));
    Ok(manifest)
}

/// Single-writer pass over sorted documents; reports the first slug collision.
fn check_unique_slugs<'a>(
    docs: impl IntoIterator<Item = &'a TypedDocument>,
) -> std::result::Result<(), ValidationError> {
    let mut seen: FxHashMap<(DocumentKind, &str), &str> = FxHashMap::default();
    for doc in docs {
        if let Some(first) = seen.insert((doc.kind, doc.slug.as_str()), doc.id.as_str()) {
            return Err(ValidationError::DuplicateSlug {
                kind: doc.kind,
                slug: doc.slug.clone(),
                first: first.to_owned(),
                second: doc.id.clone(),
            });
        }
    }
    Ok(())
}

/// Distinct slugs can still flatten to the same params (`a.mdx`, `a/index.mdx`).
fn check_unique_routes<'a>(
    docs: impl IntoIterator<Item = &'a TypedDocument>,
) -> std::result::Result<(), ValidationError> {
    let mut seen: FxHashMap<(DocumentKind, &[String]), &str> = FxHashMap::default();
    for doc in docs {
        if let Some(first) = seen.insert((doc.kind, doc.params.as_slice()), doc.id.as_str()) {
            return Err(ValidationError::DuplicateRoute {
                kind: doc.kind,
                path: doc.route_path(),
                first: first.to_owned(),
                second: doc.id.clone(),
            });
        }
    }
    Ok(())
}

/// Validated framework of a framework-partitioned document.
fn framework_of(doc: &TypedDocument) -> std::result::Result<Option<Framework>, RouteError> {
    if !doc.kind.is_framework_partitioned() {
        return Ok(None);
    }
    let tag = doc.framework_tag().ok_or(RouteError::Empty)?;
    Ok(Some(tag.parse()?))
}

// ============================================================================
// Lookups
// ============================================================================

impl Manifest {
    /// Documents of `kind`, sorted by id.
    pub fn documents_of(&self, kind: DocumentKind) -> &[Arc<TypedDocument>] {
        self.documents.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The document of `kind` whose params equal `params`.
    pub fn find<S: AsRef<str>>(&self, kind: DocumentKind, params: &[S]) -> Option<&Arc<TypedDocument>> {
        self.documents_of(kind).iter().find(|doc| {
            doc.params.len() == params.len()
                && doc.params.iter().zip(params).all(|(a, b)| a == b.as_ref())
        })
    }

    /// Params of every routable document of `kind`, for static generation.
    pub fn framework_paths(&self, kind: DocumentKind) -> Vec<&[String]> {
        self.routes
            .iter()
            .filter(|route| route.kind == kind)
            .map(|route| route.segments.as_slice())
            .collect()
    }

    /// Resolve a request path against documents of `kind`.
    ///
    /// Framework-partitioned kinds validate the first segment first, so an
    /// unsupported framework is reported as such instead of as a missing page.
    pub fn resolve_path<S: AsRef<str>>(
        &self,
        kind: DocumentKind,
        segments: &[S],
    ) -> std::result::Result<&Arc<TypedDocument>, RouteError> {
        if kind.is_platform() {
            extract_params(segments)?;
        } else if segments.is_empty() {
            return Err(RouteError::Empty);
        }
        self.find(kind, segments).ok_or_else(|| RouteError::NotFound {
            kind,
            path: segments.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join("/"),
        })
    }

    /// Snippets written for `framework`.
    pub fn snippets_for(&self, framework: Framework) -> impl Iterator<Item = &Arc<TypedDocument>> {
        self.documents_of(DocumentKind::Snippet)
            .iter()
            .filter(move |doc| doc.framework_tag() == Some(framework.as_str()))
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Write `manifest.json`, `routes.json` and one `<Kind>/_index.json` per kind.
    pub fn write_to(&self, output: &Path) -> anyhow::Result<()> {
        use anyhow::Context;

        fs::create_dir_all(output)
            .with_context(|| format!("failed to create `{}`", output.display()))?;
        write_json(&output.join(MANIFEST_FILE), self)?;
        write_json(&output.join(ROUTES_FILE), &self.routes)?;

        for (kind, docs) in &self.documents {
            let dir = output.join(kind.name());
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create `{}`", dir.display()))?;
            write_json(&dir.join(INDEX_FILE), docs)?;
        }
        Ok(())
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> anyhow::Result<()> {
    use anyhow::Context;

    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize `{}`", path.display()))?;
    fs::write(path, json).with_context(|| format!("failed to write `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SiteConfig,
        content::{
            error::ContentError,
            package::{NoPackages, NodeModules},
        },
    };
    use serde_json::Value;
    use tempfile::TempDir;

    fn raw(id: &str, text: &str) -> RawDocument {
        RawDocument::from_source(id, text).unwrap()
    }

    fn titled(id: &str) -> RawDocument {
        raw(id, "---\ntitle: Doc\n---\n## Usage\n")
    }

    fn build(raws: &[RawDocument]) -> Result<Manifest> {
        let config = SiteConfig::default();
        let ctx = ResolveContext::new(&config, &NoPackages);
        let registry = Registry::standard("mdx").unwrap();
        build_manifest(&registry, raws, &ctx)
    }

    fn sample() -> Vec<RawDocument> {
        vec![
            titled("overview/intro.mdx"),
            titled("guides/getting-started.mdx"),
            titled("web/buttons/primary.mdx"),
            titled("web/install.mdx"),
            titled("ios/install.mdx"),
            titled("rust/install.mdx"),
            raw("components/accordion.mdx", "---\ntitle: Accordion\npackage: \"@zag-js/accordion\"\n---\n"),
            raw("changelogs/first.mdx", "---\nreleaseDate: \"2024-03-01T00:00:00Z\"\n---\n"),
            raw("snippets/react/accordion/usage.mdx", "```jsx\n```\n"),
            raw("snippets/web/tabs/basic.mdx", "```js\n```\n"),
            titled("about.mdx"),
        ]
    }

    #[test]
    fn test_every_document_is_classified_once() {
        let manifest = build(&sample()).unwrap();
        // `about.mdx` matches no category, `react` is not a framework
        assert_eq!(manifest.len(), 9);
        assert_eq!(manifest.documents_of(DocumentKind::Web).len(), 2);
        assert_eq!(manifest.documents_of(DocumentKind::Unity).len(), 0);
    }

    #[test]
    fn test_params_reconstruct_route_path() {
        let manifest = build(&sample()).unwrap();
        for route in manifest.routes() {
            assert_eq!(route.path, format!("/{}", route.segments.join("/")));
            assert_eq!(route.path, route.document.route_path());
        }
    }

    #[test]
    fn test_routes_are_sorted_and_exclude_snippets() {
        let manifest = build(&sample()).unwrap();
        let paths: Vec<_> = manifest.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "/changelogs/2024-03-01t000000z",
                "/components/accordion",
                "/guides/getting-started",
                "/ios/install",
                "/overview/intro",
                "/rust/install",
                "/web/buttons/primary",
                "/web/install",
            ]
        );
        assert!(manifest.routes().iter().all(|r| r.kind != DocumentKind::Snippet));
    }

    #[test]
    fn test_route_generation_is_deterministic() {
        let mut reversed = sample();
        reversed.reverse();
        let a = serde_json::to_string(&build(&sample()).unwrap()).unwrap();
        let b = serde_json::to_string(&build(&reversed).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_platform_route_framework() {
        let manifest = build(&sample()).unwrap();
        let route = manifest.routes().iter().find(|r| r.path == "/web/buttons/primary").unwrap();
        assert_eq!(route.framework, Some(Framework::Web));
        assert_eq!(route.kind, DocumentKind::Web);
    }

    #[test]
    fn test_duplicate_slug_names_both_documents() {
        let err = build(&[titled("guides/a/setup.mdx"), titled("guides/b/setup.mdx")]).unwrap_err();
        match err {
            ContentError::Validation(ValidationError::DuplicateSlug { kind, slug, first, second }) => {
                assert_eq!(kind, DocumentKind::Guide);
                assert_eq!(slug, "setup");
                assert_eq!(first, "guides/a/setup.mdx");
                assert_eq!(second, "guides/b/setup.mdx");
            }
            other => panic!("expected a duplicate slug error, got {other:?}"),
        }
    }

    #[test]
    fn test_index_and_sibling_file_share_a_route() {
        let err = build(&[titled("guides/a.mdx"), titled("guides/a/index.mdx")]).unwrap_err();
        match err {
            ContentError::Validation(ValidationError::DuplicateRoute { kind, path, first, second }) => {
                assert_eq!(kind, DocumentKind::Guide);
                assert_eq!(path, "/guides/a");
                assert_eq!(first, "guides/a.mdx");
                assert_eq!(second, "guides/a/index.mdx");
            }
            other => panic!("expected a duplicate route error, got {other:?}"),
        }
    }

    #[test]
    fn test_routes_are_unique() {
        let manifest = build(&sample()).unwrap();
        let mut paths: Vec<_> = manifest.routes().iter().map(|r| r.path.as_str()).collect();
        let total = paths.len();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }

    #[test]
    fn test_same_slug_in_different_kinds_is_allowed() {
        let manifest = build(&[titled("guides/setup.mdx"), titled("web/setup.mdx")]).unwrap();
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_changelog_release_date_collision() {
        let date = "---\nreleaseDate: \"2024-03-01\"\n---\n";
        let err = build(&[raw("changelogs/a.mdx", date), raw("changelogs/b.mdx", date)]).unwrap_err();
        assert!(err.to_string().contains("changelogs/a.mdx"));
        assert!(err.to_string().contains("changelogs/b.mdx"));
    }

    #[test]
    fn test_missing_field_aborts_build() {
        let err = build(&[titled("guides/a.mdx"), raw("guides/b.mdx", "no header")]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::MissingField { ref path, .. }) if path == "guides/b.mdx"
        ));
    }

    #[test]
    fn test_unknown_snippet_framework_is_omitted() {
        let manifest = build(&[
            raw("snippets/kotlin/a.mdx", ""),
            raw("snippets/react/b.mdx", ""),
            raw("snippets/web/c.mdx", ""),
        ])
        .unwrap();
        let ids: Vec<_> = manifest
            .documents_of(DocumentKind::Snippet)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["snippets/web/c.mdx"]);
    }

    #[test]
    fn test_omitted_documents_do_not_collide() {
        let manifest = build(&[
            raw("snippets/react/accordion/usage.mdx", ""),
            raw("snippets/vue/accordion/usage.mdx", ""),
        ])
        .unwrap();
        assert!(manifest.is_empty());

        let manifest = build(&[
            raw("snippets/react/tabs/usage.mdx", ""),
            raw("snippets/web/tabs/usage.mdx", ""),
        ])
        .unwrap();
        let ids: Vec<_> = manifest
            .documents_of(DocumentKind::Snippet)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["snippets/web/tabs/usage.mdx"]);
    }

    #[test]
    fn test_snippets_for_framework() {
        let manifest = build(&sample()).unwrap();
        let web: Vec<_> = manifest.snippets_for(Framework::Web).map(|d| d.id.as_str()).collect();
        assert_eq!(web, ["snippets/web/tabs/basic.mdx"]);
        assert_eq!(manifest.snippets_for(Framework::Unity).count(), 0);
    }

    #[test]
    fn test_framework_paths() {
        let manifest = build(&sample()).unwrap();
        let paths = manifest.framework_paths(DocumentKind::Web);
        assert_eq!(paths.len(), 2);
        for params in paths {
            let extracted = extract_params(params).unwrap();
            assert_eq!(extracted.framework, Framework::Web);
            let mut rebuilt = vec![extracted.framework.to_string()];
            rebuilt.extend(extracted.slug);
            assert_eq!(rebuilt, params);
        }
    }

    #[test]
    fn test_platform_routes_round_trip_through_extract_params() {
        let manifest = build(&sample()).unwrap();
        let platform: Vec<_> = manifest.routes().iter().filter(|r| r.kind.is_platform()).collect();
        assert_eq!(platform.len(), 4);
        for route in platform {
            let extracted = extract_params(&route.segments).unwrap();
            assert_eq!(Some(extracted.framework), route.framework);
            let mut rebuilt = vec![extracted.framework.as_str().to_owned()];
            rebuilt.extend(extracted.slug);
            assert_eq!(rebuilt, route.segments);
        }
    }

    #[test]
    fn test_resolve_path() {
        let manifest = build(&sample()).unwrap();
        let doc = manifest
            .resolve_path(DocumentKind::Web, &["web", "buttons", "primary"])
            .unwrap();
        assert_eq!(doc.id, "web/buttons/primary.mdx");

        assert_eq!(
            manifest.resolve_path(DocumentKind::Web, &["kotlin", "x"]).unwrap_err(),
            RouteError::UnknownFramework("kotlin".into())
        );
        assert_eq!(
            manifest.resolve_path(DocumentKind::Web, &["web", "missing"]).unwrap_err(),
            RouteError::NotFound { kind: DocumentKind::Web, path: "web/missing".into() }
        );
        assert_eq!(
            manifest.resolve_path::<&str>(DocumentKind::Guide, &[]).unwrap_err(),
            RouteError::Empty
        );
    }

    #[test]
    fn test_find_changelog_by_release_date() {
        let manifest = build(&sample()).unwrap();
        let doc = manifest
            .find(DocumentKind::Changelog, &["changelogs", "2024-03-01t000000z"])
            .unwrap();
        assert_eq!(doc.id, "changelogs/first.mdx");
    }

    #[test]
    fn test_component_version_from_packages() {
        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("@zag-js/accordion");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"version":"1.2.3"}"#).unwrap();

        let config = SiteConfig::default();
        let provider = NodeModules::new(dir.path());
        let ctx = ResolveContext::new(&config, &provider);
        let registry = Registry::standard("mdx").unwrap();
        let manifest = build_manifest(&registry, &sample(), &ctx).unwrap();

        let doc = &manifest.documents_of(DocumentKind::Component)[0];
        assert_eq!(doc.computed("version").unwrap(), "1.2.3");
    }

    #[test]
    fn test_site_header_from_config() {
        let mut config = SiteConfig::default();
        config.base.title = "Zag".into();
        config.base.url = Some("https://zagjs.com".into());
        config.extra.insert("discord".into(), toml::Value::String("https://discord.gg/zag".into()));
        let ctx = ResolveContext::new(&config, &NoPackages);
        let registry = Registry::standard("mdx").unwrap();
        let manifest = build_manifest(&registry, &sample(), &ctx).unwrap();

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            json["site"],
            serde_json::json!({
                "title": "Zag",
                "url": "https://zagjs.com",
                "extra": { "discord": "https://discord.gg/zag" },
            })
        );
    }

    #[test]
    fn test_write_to() {
        let dir = TempDir::new().unwrap();
        let manifest = build(&sample()).unwrap();
        manifest.write_to(dir.path()).unwrap();

        let full: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap()).unwrap();
        assert_eq!(full["site"]["title"], "Documentation");
        assert_eq!(full["frameworks"].as_array().unwrap().len(), Framework::ALL.len());
        assert_eq!(full["frameworks"][1]["label"], "iOS (Swift)");
        assert_eq!(full["frameworks"][3]["icon"], "SiJavascript");
        assert_eq!(full["frameworks"][3]["index"], 3);
        assert_eq!(full["documents"]["Web"].as_array().unwrap().len(), 2);
        assert_eq!(full["documents"]["iOS"][0]["type"], "iOS");
        assert_eq!(full["documents"]["iOS"][0]["_id"], "ios/install.mdx");
        assert_eq!(full["documents"]["iOS"][0]["slug"], "install");

        let routes: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(ROUTES_FILE)).unwrap()).unwrap();
        assert_eq!(routes.as_array().unwrap().len(), manifest.routes().len());
        assert_eq!(routes[0]["document"], "changelogs/first.mdx");

        let guides: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("Guide").join(INDEX_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(guides[0]["frontmatter"]["slug"], "/guides/getting-started");
    }
}
