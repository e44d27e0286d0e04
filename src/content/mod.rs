//! Content taxonomy: classification, computed fields, framework routes.
//!
//! ```text
//! content root ──source──► RawDocument ──registry──► DocumentTypeSpec
//!                                                        │
//!                          TypedDocument ◄──fields───────┘
//!                               │
//!                               └──manifest──► Manifest { documents, routes }
//! ```
//!
//! | Module        | Role                                                 |
//! |---------------|------------------------------------------------------|
//! | `source`      | Walk the content root, split front-matter            |
//! | `registry`    | Categories, file patterns, first-match classification |
//! | `fields`      | Required-field validation and computed resolvers     |
//! | `framework`   | Closed framework set, `[framework, ...slug]` parsing |
//! | `manifest`    | Parallel assembly, slug uniqueness, lookups, output  |

mod document;
pub mod error;
mod fields;
mod framework;
mod frontmatter;
mod kind;
mod manifest;
mod package;
mod registry;
mod source;
mod toc;

pub use fields::ResolveContext;
pub use framework::Framework;
pub use kind::DocumentKind;
pub use manifest::{Manifest, build_manifest};
pub use package::NodeModules;
pub use registry::{DEFAULT_EXTENSION, Registry};
pub use source::read_documents;
