//! Typed documents, the output of field resolution.

use super::{frontmatter::Fields, kind::DocumentKind};
use serde::Serialize;
use serde_json::Value;

/// A raw document after validation and computed-field resolution.
///
/// Serialized flat: declared fields under `fields`, every computed field
/// (`slug`, `params`, `editUrl`, `frontmatter`, extras) at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,

    #[serde(rename = "_id")]
    pub id: String,

    /// Typed copy of `computed.slug`
    #[serde(skip)]
    pub slug: String,

    /// Typed copy of `computed.params`
    #[serde(skip)]
    pub params: Vec<String>,

    pub fields: Fields,

    #[serde(flatten)]
    pub computed: Fields,

    pub body: String,
}

impl TypedDocument {
    /// A computed field by name.
    pub fn computed(&self, name: &str) -> Option<&Value> {
        self.computed.get(name)
    }

    /// The renderer-facing metadata bundle.
    pub fn frontmatter(&self) -> Option<&Value> {
        self.computed("frontmatter")
    }

    /// Canonical route path: `/` followed by `params` joined with `/`.
    pub fn route_path(&self) -> String {
        format!("/{}", self.params.join("/"))
    }

    /// Framework tag carried by a framework-partitioned document.
    ///
    /// Platform guides are addressed as `[platform, ...slug]`, so the tag is
    /// the first param. Snippets carry an explicit `framework` field.
    pub fn framework_tag(&self) -> Option<&str> {
        match self.kind {
            DocumentKind::Snippet => self.computed("framework").and_then(Value::as_str),
            kind if kind.is_platform() => self.params.first().map(String::as_str),
            _ => None,
        }
    }
}
