use crate::document::Document;
use crate::entry::{EntryId, Payload};
use crate::error::{EggError, Result};
use crate::format::escape_name;
use crate::key::EntryKey;
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, EntryRef, SequenceView};

use super::Host;

/// Check that `pool` exists somewhere in the document and holds every index.
fn check_vertex_ref(doc: &Document, indices: &[u32], pool: &str) -> Result<()> {
    let pools = doc.find_vertex_pools();
    let vertices = pools
        .get(pool)
        .ok_or_else(|| EggError::unknown(EntryKind::VertexPool, pool))?
        .vertices();
    if indices.is_empty() {
        return Err(EggError::shape(EntryKind::VertexRef, "at least 1 index", 0));
    }
    match indices.iter().find(|&&index| !vertices.contains_key(index)) {
        Some(missing) => Err(EggError::unknown(EntryKind::Vertex, missing)),
        None => Ok(()),
    }
}

/// Attach a `<VertexRef>` and its `<Ref>` under `parent`. Must be validated first.
fn attach_vertex_ref(
    doc: &mut Document,
    parent: EntryId,
    indices: &[u32],
    pool: &str,
) -> Result<EntryId> {
    let id = doc.attach(
        parent,
        EntryKind::VertexRef,
        None,
        None,
        Payload::Indices(indices.to_vec()),
    )?;
    doc.attach(
        id,
        EntryKind::Ref,
        None,
        None,
        Payload::Text(escape_name(pool, false)),
    )?;
    Ok(id)
}

/// Holds `<Polygon>` entries, kept in the order they were appended.
pub trait PolygonHost: Host {
    /// Append a polygon over `indices` of the vertex pool named `pool`.
    ///
    /// The pool is looked up across the whole document and must contain
    /// every index. Nothing is attached when the check fails.
    fn append_polygon(&mut self, indices: &[u32], pool: &str) -> Result<EntryMut<'_, marker::Polygon>> {
        let (doc, parent) = self.host_mut();
        check_vertex_ref(doc, indices, pool)?;
        let id = doc.attach(parent, EntryKind::Polygon, None, None, Payload::Empty)?;
        attach_vertex_ref(doc, id, indices, pool)?;
        Ok(EntryMut::new(doc, id))
    }

    /// Polygons in the order they were appended.
    fn polygons(&self) -> SequenceView<'_, marker::Polygon> {
        self.host_ref().sequence()
    }
}

impl PolygonHost for EntryMut<'_, marker::Group> {}
impl PolygonHost for EntryMut<'_, marker::Instance> {}

/// Holds `<VertexRef>` entries of a polygon.
pub trait VertexRefHost: Host {
    /// Append another reference to vertices of `pool`.
    fn append_vertex_ref(&mut self, indices: &[u32], pool: &str) -> Result<EntryMut<'_, marker::VertexRef>> {
        let (doc, parent) = self.host_mut();
        check_vertex_ref(doc, indices, pool)?;
        let id = attach_vertex_ref(doc, parent, indices, pool)?;
        Ok(EntryMut::new(doc, id))
    }

    /// Vertex references in the order they were appended.
    fn vertex_refs(&self) -> SequenceView<'_, marker::VertexRef> {
        self.host_ref().sequence()
    }

    /// The first vertex reference, the one the polygon was created with.
    fn vertex_ref(&self) -> Option<EntryRef<'_, marker::VertexRef>> {
        self.vertex_refs().first()
    }
}

/// Holds the `<MRef>` material reference of a polygon.
pub trait MaterialRefHost: Host {
    /// Refer to the top-level material `name`, replacing any earlier reference.
    fn set_material_ref(&mut self, name: &str) -> Result<EntryMut<'_, marker::MRef>> {
        let (doc, parent) = self.host_mut();
        if !doc.root_has(EntryKind::Material, name) {
            return Err(EggError::unknown(EntryKind::Material, name));
        }
        let payload = Payload::Text(escape_name(name, false));
        let id = doc.attach(parent, EntryKind::MRef, None, None, payload)?;
        Ok(EntryMut::new(doc, id))
    }

    /// The material reference, if set.
    fn material_ref(&self) -> Option<EntryRef<'_, marker::MRef>> {
        self.host_ref().single()
    }
}

/// Holds `<TRef>` texture references of a polygon.
pub trait TextureRefHost: Host {
    /// Append a reference to the top-level texture `name`.
    fn append_texture_ref(&mut self, name: &str) -> Result<EntryMut<'_, marker::TRef>> {
        let (doc, parent) = self.host_mut();
        if !doc.root_has(EntryKind::Texture, name) {
            return Err(EggError::unknown(EntryKind::Texture, name));
        }
        let payload = Payload::Text(escape_name(name, false));
        let id = doc.attach(parent, EntryKind::TRef, None, None, payload)?;
        Ok(EntryMut::new(doc, id))
    }

    /// Texture references in the order they were appended.
    fn texture_refs(&self) -> SequenceView<'_, marker::TRef> {
        self.host_ref().sequence()
    }
}

impl VertexRefHost for EntryMut<'_, marker::Polygon> {}
impl MaterialRefHost for EntryMut<'_, marker::Polygon> {}
impl TextureRefHost for EntryMut<'_, marker::Polygon> {}

impl<'a> EntryRef<'a, marker::Polygon> {
    /// The vertex reference the polygon was created with.
    pub fn vertex_ref(&self) -> Option<EntryRef<'a, marker::VertexRef>> {
        self.sequence().first()
    }
}

impl<'a> EntryRef<'a, marker::VertexRef> {
    /// Referenced vertex indices, in order.
    pub fn indices(&self) -> &'a [u32] {
        match self.payload() {
            Payload::Indices(indices) => indices,
            _ => &[],
        }
    }

    /// Name of the referenced vertex pool, as written.
    pub fn pool(&self) -> Option<&'a str> {
        match self.single::<marker::Ref>()?.payload() {
            Payload::Text(pool) => Some(pool),
            _ => None,
        }
    }
}
