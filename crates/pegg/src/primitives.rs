//! Ready-made documents for common shapes.

use crate::document::Document;
use crate::entries::{GroupHost, PolygonHost, VertexHost, VertexPoolHost};
use crate::error::Result;

/// Corner signs of the cube, indexed by vertex number.
const CUBE_CORNERS: [[f64; 3]; 8] = [
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const CUBE_FACES: [[u32; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 7, 6, 5],
    [0, 4, 5, 1],
    [1, 5, 6, 2],
    [2, 6, 7, 3],
    [4, 0, 3, 7],
];

/// An axis-aligned cube of edge length `size` centered on the origin.
///
/// The document holds one group `Cube` with one vertex pool `Cube` of eight
/// vertices and six quads.
///
/// ```
/// let doc = pegg::primitives::cube(2.0).unwrap();
/// assert!(doc.render("  ", true).starts_with("<Group> Cube {"));
/// ```
pub fn cube(size: f64) -> Result<Document> {
    let half = size / 2.0;
    let mut doc = Document::new();
    let mut group = doc.add_group("Cube")?;

    let mut pool = group.add_vertex_pool("Cube")?;
    for (index, corner) in (0u32..).zip(CUBE_CORNERS) {
        pool.add_vertex(index, &corner.map(|sign| sign * half), None)?;
    }

    for face in &CUBE_FACES {
        group.append_polygon(face, "Cube")?;
    }
    log::debug!("built cube of size {size}");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_cube_structure() {
        let doc = cube(2.0).unwrap();
        let top = doc.children();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].kind(), Some(EntryKind::Group));
        assert_eq!(top[0].name(), Some("Cube"));

        let group = doc.groups().get("Cube").unwrap();
        let pools = group.keyed::<marker::VertexPool>();
        assert_eq!(pools.len(), 1);
        let pool = pools.get("Cube").unwrap();
        let indices: Vec<u32> = pool.vertices().values().filter_map(|v| v.index()).collect();
        assert_eq!(indices, (0..8u32).collect::<Vec<_>>());

        let polygons = group.sequence::<marker::Polygon>();
        assert_eq!(polygons.len(), 6);
        for polygon in polygons.iter() {
            let vertex_ref = polygon.vertex_ref().unwrap();
            assert_eq!(vertex_ref.indices().len(), 4);
            assert_eq!(vertex_ref.pool(), Some("Cube"));
        }
    }

    #[test]
    fn test_cube_is_scaled() {
        let doc = cube(3.0).unwrap();
        let pools = doc.find_vertex_pools();
        let vertex = pools["Cube"].vertices().get(6u32).unwrap();
        assert_relative_eq!(vertex.x().unwrap(), -1.5);
        assert_relative_eq!(vertex.y().unwrap(), -1.5);
        assert_relative_eq!(vertex.z().unwrap(), 1.5);
    }

    #[test]
    fn test_cube_render() {
        let text = cube(2.0).unwrap().render("  ", true);
        assert!(text.starts_with("<Group> Cube {\n  <VertexPool> Cube {\n    <Vertex> 0 { 1.0 1.0 -1.0 }\n"));
        assert_eq!(text.matches("<Polygon>").count(), 6);
        assert_eq!(text.matches("<Ref> { Cube }").count(), 6);
        assert!(text.contains("      4 7 6 5\n"));
        assert!(text.ends_with("}\n"));
    }
}
