#![warn(missing_docs)]

//! pegg - build Panda3D egg scene descriptions in memory
//!
//! A [`Document`] is a tree of typed entries (groups, vertex pools, polygons,
//! materials, textures, transforms, ...) that checks its structural and
//! cross-reference rules as it is built and renders to egg text
//! deterministically.
//!
//! # Example
//!
//! ```rust
//! use pegg::prelude::*;
//!
//! let mut doc = Document::new();
//! doc.set_coordinate_system(CoordinateSystem::ZUp).unwrap();
//! doc.add_material("red").unwrap().set_diffuse(&[1, 0, 0], None).unwrap();
//!
//! let mut group = doc.add_group("Triangle").unwrap();
//! let mut pool = group.add_vertex_pool("tri").unwrap();
//! pool.add_vertex(0, &[0, 0, 0], None).unwrap();
//! pool.add_vertex(1, &[1, 0, 0], None).unwrap();
//! pool.add_vertex(2, &[0, 1, 0], None).unwrap();
//! group
//!     .append_polygon(&[0, 1, 2], "tri")
//!     .unwrap()
//!     .set_material_ref("red")
//!     .unwrap();
//!
//! let text = doc.render("  ", true);
//! assert!(text.starts_with("<CoordinateSystem> { Z-up }\n"));
//! ```

mod document;
mod entry;
mod error;
mod format;
mod key;
mod kind;
mod render;
mod view;
mod vocab;

pub mod entries;
pub mod primitives;

pub use document::Document;
pub use entry::EntryId;
pub use error::{EggError, Result};
pub use format::{escape_name, fmt_number, Number};
pub use key::EntryKey;
pub use kind::{marker, Concrete, EntryKind, Kind, Storage};
pub use render::RenderOptions;
pub use view::{EntryMut, EntryRef, KeyedView, SequenceView};
pub use vocab::{CompressionMode, CoordinateSystem, EnvType, TextureFormat, TextureType, WrapMode};

/// Common imports for building documents.
///
/// ```rust
/// use pegg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::entries::{
        CommentHost, CoordinateSystemHost, GroupHost, InstanceHost, MaterialHost,
        MaterialRefHost, NormalHost, PolygonHost, TextureHost, TextureRefHost, TransformHost,
        UvHost, VertexHost, VertexPoolHost, VertexRefHost,
    };
    pub use crate::{
        marker, CompressionMode, CoordinateSystem, Document, EggError, EntryKind, EnvType,
        RenderOptions, TextureFormat, TextureType, WrapMode,
    };
}
