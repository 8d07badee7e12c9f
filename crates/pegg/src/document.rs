//! The document root: owner of the entry arena.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use slotmap::SlotMap;

use crate::entry::{Entry, EntryId, Payload, Slot};
use crate::error::{EggError, Result};
use crate::key::EntryKey;
use crate::kind::marker::{Any, Root, VertexPool};
use crate::kind::{EntryKind, Kind};
use crate::render::{self, RenderOptions};
use crate::view::{EntryMut, EntryRef};

/// An egg document under construction.
///
/// Entries live in an arena owned by the document and are linked into a
/// tree by id: parents own their children through typed slots and children
/// keep a plain back-link to their parent. Entries are attached exactly once
/// by the `add_*`/`append_*`/`set_*` operations of the host traits in
/// [`entries`](crate::entries) and are never moved afterwards.
///
/// # Example
///
/// ```
/// use pegg::prelude::*;
///
/// let mut doc = Document::new();
/// doc.append_comment("generated").unwrap();
/// let mut group = doc.add_group("Cube").unwrap();
/// let mut pool = group.add_vertex_pool("Cube").unwrap();
/// pool.add_vertex(0, &[1, 1, -1], None).unwrap();
/// pool.add_vertex(1, &[1, -1, -1], None).unwrap();
/// pool.add_vertex(2, &[-1, -1, -1], None).unwrap();
/// group.append_polygon(&[0, 1, 2], "Cube").unwrap();
///
/// assert!(doc.render("  ", true).starts_with("<Comment> { \"generated\" }"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    arena: SlotMap<EntryId, Entry>,
    root: EntryId,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Entry::new(None, None, None, Payload::Empty));
        Self { arena, root }
    }

    /// Read-only cursor to the root.
    pub fn root(&self) -> EntryRef<'_, Root> {
        EntryRef::new(self, self.root)
    }

    pub(crate) fn root_id(&self) -> EntryId {
        self.root
    }

    /// Cursor to the entry behind `id`, if it is still attached.
    pub fn entry(&self, id: EntryId) -> Option<EntryRef<'_, Any>> {
        self.arena.contains_key(id).then(|| EntryRef::new(self, id))
    }

    /// Mutable cursor to the entry behind `id`, if it is attached and of kind `K`.
    pub fn entry_mut<K: Kind>(&mut self, id: EntryId) -> Option<EntryMut<'_, K>> {
        let kind = self.arena.get(id)?.kind;
        if K::matches(kind) {
            Some(EntryMut::new(self, id))
        } else {
            None
        }
    }

    /// Top-level entries of every kind.
    pub fn children(&self) -> Vec<EntryRef<'_>> {
        self.root().children()
    }

    /// Number of attached entries, not counting the root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    /// Whether nothing has been attached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every vertex pool in the document by name, searching groups and
    /// instances recursively from the root.
    pub fn find_vertex_pools(&self) -> BTreeMap<&str, EntryRef<'_, VertexPool>> {
        let mut pools = BTreeMap::new();
        self.collect_vertex_pools(self.root, &mut pools);
        pools
    }

    fn collect_vertex_pools<'a>(
        &'a self,
        id: EntryId,
        pools: &mut BTreeMap<&'a str, EntryRef<'a, VertexPool>>,
    ) {
        let entry = self.get(id);
        if let Slot::Keyed(map) = entry.slot(EntryKind::VertexPool) {
            for (key, pool) in map {
                if let Some(name) = key.as_name() {
                    pools.insert(name, EntryRef::new(self, *pool));
                }
            }
        }
        for kind in [EntryKind::Group, EntryKind::Instance] {
            for child in entry.slot(kind).ids() {
                self.collect_vertex_pools(child, pools);
            }
        }
    }

    /// Render the whole document.
    ///
    /// `indent` is repeated once per nesting level. With `compact`, childless
    /// entries whose content fits on one line are written on a single line.
    pub fn render(&self, indent: &str, compact: bool) -> String {
        render::render(self, self.root, indent, compact)
    }

    /// Render the whole document with `options`.
    pub fn render_with(&self, options: &RenderOptions) -> String {
        self.render(&options.indent, options.compact)
    }

    /// Write the rendered document to `path`.
    pub fn export(&self, path: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.render_with(options).as_bytes())?;
        writer.flush()?;
        log::debug!("exported {} entries to {}", self.len(), path.as_ref().display());
        Ok(())
    }

    pub(crate) fn get(&self, id: EntryId) -> &Entry {
        &self.arena[id]
    }

    pub(crate) fn get_mut(&mut self, id: EntryId) -> &mut Entry {
        &mut self.arena[id]
    }

    /// Whether the root holds a keyed `kind` child named `name`.
    pub(crate) fn root_has(&self, kind: EntryKind, name: &str) -> bool {
        self.get(self.root)
            .keyed(kind, &EntryKey::from(name))
            .is_some()
    }

    /// Create an entry and link it under `parent`.
    ///
    /// Keyed kinds fail on a duplicate `key` before anything is created.
    /// Singleton kinds replace and release the previous occupant.
    pub(crate) fn attach(
        &mut self,
        parent: EntryId,
        kind: EntryKind,
        key: Option<EntryKey>,
        name: Option<String>,
        payload: Payload,
    ) -> Result<EntryId> {
        let key = key.unwrap_or(EntryKey::Default);
        if let Slot::Keyed(map) = self.get(parent).slot(kind) {
            if map.contains_key(&key) {
                return Err(EggError::duplicate(kind, key));
            }
        }

        log::debug!(
            "attach {kind} {} under {:?}",
            name.as_deref().unwrap_or("-"),
            self.get(parent).kind
        );
        let id = self
            .arena
            .insert(Entry::new(Some(kind), name, Some(parent), payload));
        let replaced = match self.get_mut(parent).slot_mut(kind) {
            Slot::Sequence(ids) => {
                ids.push(id);
                None
            }
            Slot::Keyed(map) => {
                map.insert(key, id);
                None
            }
            Slot::Single(slot) => slot.replace(id),
        };
        if let Some(old) = replaced {
            self.release(old);
        }
        Ok(id)
    }

    /// Set a `<Scalar>` child, overwriting any previous value.
    pub(crate) fn set_scalar(&mut self, parent: EntryId, name: &str, value: String) -> Result<()> {
        let key = EntryKey::from(name);
        match self.get(parent).keyed(EntryKind::Scalar, &key) {
            Some(existing) => {
                self.get_mut(existing).payload = Payload::Text(value);
            }
            None => {
                self.attach(
                    parent,
                    EntryKind::Scalar,
                    Some(key),
                    Some(name.to_owned()),
                    Payload::Text(value),
                )?;
            }
        }
        Ok(())
    }

    fn release(&mut self, id: EntryId) {
        if let Some(entry) = self.arena.remove(id) {
            for child in entry.child_ids() {
                self.release(child);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders with [`RenderOptions::default`].
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&RenderOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.render("    ", true), "");
        assert!(doc.children().is_empty());
        assert!(doc.root().parent().is_none());
        assert_eq!(doc.root().kind(), None);
    }

    #[test]
    fn test_lookup_returns_added_entry() {
        let mut doc = Document::new();
        let group = doc.add_group("Body").unwrap().id();
        let material = doc.add_material("steel").unwrap().id();
        assert_eq!(doc.groups().get("Body").unwrap().id(), group);
        assert_eq!(doc.materials().get("steel").unwrap().id(), material);
        assert_eq!(doc.entry(group).unwrap().kind(), Some(EntryKind::Group));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_entry_mut_checks_kind() {
        let mut doc = Document::new();
        let id = doc.add_group("Body").unwrap().id();
        assert!(doc.entry_mut::<crate::marker::Group>(id).is_some());
        assert!(doc.entry_mut::<crate::marker::Instance>(id).is_none());
    }

    #[test]
    fn test_parent_and_root_links() {
        let mut doc = Document::new();
        let mut outer = doc.add_group("outer").unwrap();
        let mut inner = outer.add_instance("inner").unwrap();
        let pool = inner.add_vertex_pool("pool").unwrap().id();

        let pool = doc.entry(pool).unwrap();
        let inner = pool.parent().unwrap();
        assert_eq!(inner.kind(), Some(EntryKind::Instance));
        let outer = inner.parent().unwrap();
        assert_eq!(outer.name(), Some("outer"));
        assert_eq!(outer.parent().unwrap().kind(), None);
        assert_eq!(pool.root().id(), doc.root().id());
    }

    #[test]
    fn test_children_is_flat() {
        let mut doc = Document::new();
        doc.append_comment("one").unwrap();
        let mut group = doc.add_group("g").unwrap();
        group.add_group("nested").unwrap();
        doc.add_material("m").unwrap();

        let children = doc.children();
        assert_eq!(children.len(), 3);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_find_vertex_pools_is_document_wide() {
        let mut doc = Document::new();
        doc.add_vertex_pool("top").unwrap();
        let mut group = doc.add_group("g").unwrap();
        let mut instance = group.add_instance("i").unwrap();
        let deep = instance.add_vertex_pool("deep").unwrap().id();

        let pools = doc.find_vertex_pools();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools["deep"].id(), deep);

        // Reachable from any entry.
        let from_pool = doc.entry(deep).unwrap().find_vertex_pools();
        assert!(from_pool.contains_key("top"));
    }

    #[test]
    fn test_display_uses_default_options() {
        let mut doc = Document::new();
        doc.add_group("g").unwrap();
        assert_eq!(doc.to_string(), doc.render("    ", true));
        assert_eq!(doc.to_string(), "<Group> g { }\n");
    }

    #[test]
    fn test_export_writes_rendered_text() {
        let mut doc = Document::new();
        doc.append_comment("exported").unwrap();
        let path = std::env::temp_dir().join("pegg_test_export.egg");
        doc.export(&path, &RenderOptions::default()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "<Comment> { \"exported\" }\n");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_export_reports_io_errors() {
        let doc = Document::new();
        let path = std::env::temp_dir()
            .join("pegg_missing_dir")
            .join("nested")
            .join("out.egg");
        let err = doc.export(&path, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, EggError::Io(_)));
    }
}
