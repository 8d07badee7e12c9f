//! Text rendering of entry subtrees.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::entry::EntryId;
use crate::entries::{MATERIAL_SCALARS, TEXTURE_SCALARS};
use crate::error::{EggError, Result};
use crate::key::EntryKey;
use crate::kind::EntryKind;

/// Options controlling how a document is written out.
///
/// ```
/// let options = pegg::RenderOptions::from_toml_str("indent = \"\\t\"").unwrap();
/// assert_eq!(options.indent, "\t");
/// assert!(options.compact);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Repeated once per nesting level.
    pub indent: String,
    /// Collapse childless single-line entries onto one line.
    pub compact: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_owned(),
            compact: true,
        }
    }
}

impl RenderOptions {
    /// Options with an explicit indentation unit and compact flag.
    pub fn new(indent: impl Into<String>, compact: bool) -> Self {
        Self {
            indent: indent.into(),
            compact,
        }
    }

    /// Parse options from a TOML fragment. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source)
            .map_err(|e| EggError::invalid("render options", source.trim(), e.message()))
    }
}

/// Scalars a kind writes ahead of its other children, in order.
fn scalar_order(kind: Option<EntryKind>) -> &'static [&'static str] {
    match kind {
        Some(EntryKind::Material) => MATERIAL_SCALARS,
        Some(EntryKind::Texture) => TEXTURE_SCALARS,
        _ => &[],
    }
}

/// Render the subtree rooted at `id`. The root writes no wrapper of its own.
pub(crate) fn render(doc: &Document, id: EntryId, indent: &str, compact: bool) -> String {
    let renderer = Renderer {
        doc,
        indent,
        compact,
    };
    let mut out = String::new();
    renderer.write_entry(id, 0, &mut out);
    log::trace!("rendered {} bytes", out.len());
    out
}

struct Renderer<'a> {
    doc: &'a Document,
    indent: &'a str,
    compact: bool,
}

impl Renderer<'_> {
    fn pad(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str(self.indent);
        }
    }

    fn write_entry(&self, id: EntryId, depth: usize, out: &mut String) {
        let entry = self.doc.get(id);
        let is_root = entry.parent.is_none();
        let content = entry.payload.content().filter(|c| !c.is_empty());
        let one_line = self.compact
            && !entry.has_children()
            && content.as_ref().map_or(true, |c| !c.contains('\n'));
        let sep = if one_line { ' ' } else { '\n' };

        if !is_root {
            self.pad(depth, out);
            out.push('<');
            out.push_str(entry.kind.map_or("", EntryKind::as_str));
            out.push_str("> ");
            if let Some(name) = entry.name.as_deref().filter(|n| !n.is_empty()) {
                out.push_str(name);
                out.push(' ');
            }
            out.push('{');
            out.push(sep);
        }

        if let Some(content) = &content {
            for line in content.split('\n') {
                if !one_line {
                    self.pad(depth + 1, out);
                }
                out.push_str(line);
                out.push(sep);
            }
        }

        let child_depth = if is_root { depth } else { depth + 1 };
        for name in scalar_order(entry.kind) {
            if let Some(child) = entry.keyed(EntryKind::Scalar, &EntryKey::from(*name)) {
                self.write_entry(child, child_depth, out);
            }
        }
        for kind in EntryKind::RENDER_ORDER {
            for child in entry.slot(kind).ids() {
                self.write_entry(child, child_depth, out);
            }
        }

        if !is_root {
            if !one_line {
                self.pad(depth, out);
            }
            out.push_str("}\n");
        }
    }
}
