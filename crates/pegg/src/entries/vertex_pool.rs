use crate::document::Document;
use crate::entry::Payload;
use crate::error::{EggError, Result};
use crate::format::{escape_name, to_numbers, Number};
use crate::key::EntryKey;
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, EntryRef, KeyedView};

use super::{check_len, Host};

/// Holds named `<VertexPool>` entries.
///
/// Pool names are unique across the whole document, not just among siblings,
/// since polygons refer to pools by name alone.
pub trait VertexPoolHost: Host {
    /// Add a vertex pool. Fails with [`DuplicateKey`](crate::EggError::DuplicateKey)
    /// if any pool in the document already has this name.
    fn add_vertex_pool(&mut self, name: &str) -> Result<EntryMut<'_, marker::VertexPool>> {
        let (doc, parent) = self.host_mut();
        if doc.find_vertex_pools().contains_key(name) {
            return Err(EggError::duplicate(EntryKind::VertexPool, EntryKey::from(name)));
        }
        let id = doc.attach(
            parent,
            EntryKind::VertexPool,
            Some(EntryKey::from(name)),
            Some(escape_name(name, false)),
            Payload::Empty,
        )?;
        Ok(EntryMut::new(doc, id))
    }

    /// Pools held directly by this entry. See
    /// [`Document::find_vertex_pools`] for the document-wide lookup.
    fn vertex_pools(&self) -> KeyedView<'_, marker::VertexPool> {
        self.host_ref().keyed()
    }

    /// Mutable cursor to the pool `name` held directly by this entry.
    fn vertex_pool_mut(&mut self, name: &str) -> Option<EntryMut<'_, marker::VertexPool>> {
        let (doc, parent) = self.host_mut();
        let id = doc
            .get(parent)
            .keyed(EntryKind::VertexPool, &EntryKey::from(name))?;
        Some(EntryMut::new(doc, id))
    }
}

impl VertexPoolHost for Document {}
impl VertexPoolHost for EntryMut<'_, marker::Group> {}
impl VertexPoolHost for EntryMut<'_, marker::Instance> {}

/// Holds numbered `<Vertex>` entries.
pub trait VertexHost: Host {
    /// Add vertex `index` with 1 to 4 coordinates (x, then optional y, z, w).
    fn add_vertex<N: Into<Number> + Copy>(
        &mut self,
        index: u32,
        coordinates: &[N],
        precision: Option<usize>,
    ) -> Result<EntryMut<'_, marker::Vertex>> {
        check_len(EntryKind::Vertex, coordinates.len(), 1, 4)?;
        let (doc, parent) = self.host_mut();
        let payload = Payload::Numbers {
            values: to_numbers(coordinates),
            precision,
        };
        let id = doc.attach(
            parent,
            EntryKind::Vertex,
            Some(EntryKey::Index(index)),
            Some(index.to_string()),
            payload,
        )?;
        Ok(EntryMut::new(doc, id))
    }

    /// Vertices by index, in ascending order.
    fn vertices(&self) -> KeyedView<'_, marker::Vertex> {
        self.host_ref().keyed()
    }

    /// Mutable cursor to vertex `index`.
    fn vertex_mut(&mut self, index: u32) -> Option<EntryMut<'_, marker::Vertex>> {
        let (doc, parent) = self.host_mut();
        let id = doc
            .get(parent)
            .keyed(EntryKind::Vertex, &EntryKey::Index(index))?;
        Some(EntryMut::new(doc, id))
    }
}

impl VertexHost for EntryMut<'_, marker::VertexPool> {}

impl<'a> EntryRef<'a, marker::VertexPool> {
    /// Vertices by index, in ascending order.
    pub fn vertices(&self) -> KeyedView<'a, marker::Vertex> {
        self.keyed()
    }
}

impl EntryRef<'_, marker::Vertex> {
    /// Index of the vertex within its pool.
    pub fn index(&self) -> Option<u32> {
        self.name()?.parse().ok()
    }

    /// The supplied coordinates; unsupplied trailing ones are absent.
    pub fn coordinates(&self) -> Vec<f64> {
        self.numbers().iter().map(|n| n.as_f64()).collect()
    }

    fn coordinate(&self, axis: usize) -> Option<f64> {
        self.numbers().get(axis).map(|n| n.as_f64())
    }

    /// x coordinate.
    pub fn x(&self) -> Option<f64> {
        self.coordinate(0)
    }

    /// y coordinate, if supplied.
    pub fn y(&self) -> Option<f64> {
        self.coordinate(1)
    }

    /// z coordinate, if supplied.
    pub fn z(&self) -> Option<f64> {
        self.coordinate(2)
    }

    /// w coordinate, if supplied.
    pub fn w(&self) -> Option<f64> {
        self.coordinate(3)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::prelude::*;

    #[test]
    fn test_pool_names_are_document_wide() {
        let mut doc = Document::new();
        doc.add_group("a").unwrap().add_vertex_pool("shared").unwrap();
        let mut b = doc.add_group("b").unwrap();
        let err = b.add_vertex_pool("shared").unwrap_err();
        assert!(matches!(
            err,
            EggError::DuplicateKey {
                kind: EntryKind::VertexPool,
                ..
            }
        ));
        assert!(b.vertex_pools().is_empty());
        assert!(doc.add_vertex_pool("shared").is_err());
        assert_eq!(doc.find_vertex_pools().len(), 1);
    }

    #[test]
    fn test_vertex_coordinates() {
        let mut doc = Document::new();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        pool.add_vertex(0, &[1.5], None).unwrap();
        pool.add_vertex(1, &[0.1, 0.2, 0.3, 1.0], None).unwrap();

        let vertices = pool.vertices();
        let first = vertices.get(0u32).unwrap();
        assert_relative_eq!(first.x().unwrap(), 1.5);
        assert_eq!(first.y(), None);
        assert_eq!(first.w(), None);
        assert_eq!(first.index(), Some(0));

        let second = vertices.get(1u32).unwrap();
        assert_relative_eq!(second.z().unwrap(), 0.3);
        assert_relative_eq!(second.w().unwrap(), 1.0);
        assert_eq!(second.coordinates().len(), 4);
    }

    #[test]
    fn test_zero_is_a_value() {
        let mut doc = Document::new();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        pool.add_vertex(0, &[0, 0, 0], None).unwrap();
        let vertex = pool.vertices().get(0u32).unwrap();
        assert_eq!(vertex.z(), Some(0.0));
        assert_eq!(vertex.content().as_deref(), Some("0 0 0"));
    }

    #[test]
    fn test_vertex_arity_and_duplicates() {
        let mut doc = Document::new();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        assert!(matches!(
            pool.add_vertex::<f64>(0, &[], None),
            Err(EggError::ShapeViolation { actual: 0, .. })
        ));
        assert!(matches!(
            pool.add_vertex(0, &[1, 2, 3, 4, 5], None),
            Err(EggError::ShapeViolation { actual: 5, .. })
        ));
        pool.add_vertex(7, &[1], None).unwrap();
        let err = pool.add_vertex(7, &[2], None).unwrap_err();
        assert_eq!(err.to_string(), "cannot add Vertex 7: it already exists");
        assert_eq!(pool.vertices().len(), 1);
        assert!(pool.vertex_mut(7).is_some());
        assert!(pool.vertex_mut(8).is_none());
    }

    #[test]
    fn test_vertex_precision() {
        let mut doc = Document::new();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        pool.add_vertex(0, &[1, 2], Some(3)).unwrap();
        assert_eq!(doc.render("", true), "<VertexPool> p {\n<Vertex> 0 { 1.000 2.000 }\n}\n");
    }

    #[test]
    fn test_reacquire_pool_in_group() {
        let mut doc = Document::new();
        let mut group = doc.add_group("g").unwrap();
        group.add_vertex_pool("p").unwrap();
        group
            .vertex_pool_mut("p")
            .unwrap()
            .add_vertex(3, &[1, 1, 1], None)
            .unwrap();
        let pools = doc.find_vertex_pools();
        assert_eq!(pools["p"].vertices().len(), 1);
    }
}
