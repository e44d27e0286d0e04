//! doclayer - content taxonomy and route manifest builder for documentation sites.

mod build;
mod cli;
mod config;
mod content;
mod logger;
mod utils;

use anyhow::{Context, Result};
use build::{build_site, load_manifest};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{DocumentKind, Framework, Manifest};

fn main() {
    if let Err(err) = run() {
        log!("error"; "{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    logger::set_verbose(cli.verbose);
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Check => {
            load_manifest(&config)?;
            log!("check"; "content is valid");
            Ok(())
        }
        Commands::Routes { kind } => {
            print_routes(&load_manifest(&config)?, *kind);
            Ok(())
        }
        Commands::Resolve { kind, path } => resolve(&load_manifest(&config)?, *kind, path),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error; every section has defaults.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        debug!("config"; "`{}` not found, using defaults", config_path.display());
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Every route, or only the static paths of one kind.
fn print_routes(manifest: &Manifest, kind: Option<DocumentKind>) {
    let routes: Vec<_> = match kind {
        Some(kind) => manifest
            .framework_paths(kind)
            .into_iter()
            .map(|segments| format!("/{}", segments.join("/")))
            .collect(),
        None => manifest
            .routes()
            .iter()
            .map(|route| format!("{:<10} {}", route.kind, route.path))
            .collect(),
    };

    log!("route"; "{} routes\n{}", routes.len(), routes.join("\n"));
}

fn resolve(manifest: &Manifest, kind: DocumentKind, path: &str) -> Result<()> {
    let segments: Vec<_> = path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    let doc = manifest
        .resolve_path(kind, &segments)
        .with_context(|| format!("cannot resolve `{path}` as {kind}"))?;

    log!("route"; "/{} -> {}", segments.join("/"), doc.id);
    if let Some(title) = doc.frontmatter().and_then(|fm| fm.get("title")).and_then(|t| t.as_str()) {
        log!("route"; "title: {title}");
    }
    if let Some(framework) = doc.framework_tag().and_then(|tag| tag.parse::<Framework>().ok()) {
        log!("route"; "framework: {} ({framework})", framework.label());
    }
    Ok(())
}
