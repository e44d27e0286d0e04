//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_manifest()
//!     │       │
//!     │       ├── Registry::standard()  ──► one spec per category
//!     │       ├── read_documents()      ──► RawDocument per file (parallel)
//!     │       └── build_manifest()      ──► TypedDocument + Route (parallel resolve)
//!     │
//!     ├── prepare_output()  ──► optional clean
//!     │
//!     └── Manifest::write_to() ──► manifest.json, routes.json, <Kind>/_index.json
//! ```

use crate::{
    config::SiteConfig,
    content::{
        DocumentKind, Framework, Manifest, NodeModules, Registry, ResolveContext, build_manifest,
        read_documents,
    },
    debug, log,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Read, classify and resolve the whole content tree.
///
/// Nothing is written; `check`, `routes` and `resolve` stop here.
pub fn load_manifest(config: &SiteConfig) -> Result<Manifest> {
    let registry = Registry::standard(&config.build.extension)
        .context("invalid document type registry")?;
    for spec in registry.specs() {
        debug!("content"; "{:<10} {}", spec.kind, spec.pattern);
    }

    let content = &config.build.content;
    let raws = read_documents(content, |path| registry.accepts(path))
        .with_context(|| format!("failed to read content from `{}`", content.display()))?;
    log!("content"; "read {} files", raws.len());

    let packages = NodeModules::new(&config.build.packages);
    let ctx = ResolveContext::new(config, &packages);
    let manifest = build_manifest(&registry, &raws, &ctx)?;

    log!("content"; "{} documents, {} routes", manifest.len(), manifest.routes().len());
    Ok(manifest)
}

/// Build the manifest and write it to the output directory.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Manifest> {
    let manifest = load_manifest(config)?;
    let output = &config.build.output;

    prepare_output(output, config.build.clean)?;
    manifest.write_to(output)?;

    log_build_result(&manifest, output);
    Ok(manifest)
}

/// Create the output directory, removing the old one when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Log per-kind counts, or a warning when nothing was classified.
fn log_build_result(manifest: &Manifest, output: &Path) {
    if manifest.is_empty() {
        log!("warn"; "no documents found, check the content directory layout");
        return;
    }

    let counts: Vec<_> = DocumentKind::ALL
        .into_iter()
        .map(|kind| (kind, manifest.documents_of(kind).len()))
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect();
    log!("build"; "{}", counts.join(", "));

    let snippets: Vec<_> = Framework::ALL
        .into_iter()
        .map(|fw| (fw, manifest.snippets_for(fw).count()))
        .filter(|(_, count)| *count > 0)
        .map(|(fw, count)| format!("{fw}: {count}"))
        .collect();
    if !snippets.is_empty() {
        debug!("build"; "snippets by framework: {}", snippets.join(", "));
    }
    log!("build"; "done, written to `{}`", output.display());
}
