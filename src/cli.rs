//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::content::DocumentKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// doclayer: content taxonomy and route manifest builder
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: doclayer.toml)
    #[arg(short = 'C', long, default_value = "doclayer.toml")]
    pub config: PathBuf,

    /// Log skipped files and per-step details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Classify and resolve every document, then write the manifest
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,
    },

    /// Validate the content tree without writing anything
    Check,

    /// Print the static routes to pre-render
    Routes {
        /// Only list routes of this document kind (e.g. `web`, `iOS`)
        #[arg(short, long)]
        kind: Option<DocumentKind>,
    },

    /// Resolve a request path to the document serving it
    Resolve {
        /// Document kind the path belongs to (e.g. `web`, `Guide`)
        kind: DocumentKind,

        /// Route path, e.g. `web/buttons/primary`
        path: String,
    },
}
