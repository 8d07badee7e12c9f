//! Capabilities of each entry kind.
//!
//! Every kind that can hold children of another kind implements the matching
//! host trait: [`GroupHost`] for entries that can hold groups, [`VertexHost`]
//! for vertex pools, and so on. The traits are implemented for the
//! [`Document`] root and for [`EntryMut`] cursors of the kinds that allow
//! them, so a misplaced entry is a compile error rather than a runtime one.
//!
//! Kind-specific setters that don't add children (material colors, texture
//! scalars, matrix contents) are inherent methods on the typed cursor.

mod comment;
mod coordinate_system;
mod group;
mod material;
mod normal;
mod polygon;
mod texture;
mod transform;
mod uv;
mod vertex_pool;

pub use comment::CommentHost;
pub use coordinate_system::CoordinateSystemHost;
pub use group::{GroupHost, InstanceHost};
pub use material::MaterialHost;
pub use normal::NormalHost;
pub use polygon::{MaterialRefHost, PolygonHost, TextureRefHost, VertexRefHost};
pub use texture::TextureHost;
pub use transform::TransformHost;
pub use uv::UvHost;
pub use vertex_pool::{VertexHost, VertexPoolHost};

pub(crate) use material::MATERIAL_SCALARS;
pub(crate) use texture::TEXTURE_SCALARS;

use crate::document::Document;
use crate::entry::EntryId;
use crate::error::{EggError, Result};
use crate::format::{fmt_number, Number};
use crate::kind::{EntryKind, Kind};
use crate::view::{EntryMut, EntryRef};

mod sealed {
    pub trait Sealed {}
}

/// Anything that can hold child entries: the document root or a mutable cursor.
///
/// Sealed; the capability traits build on it.
pub trait Host: sealed::Sealed {
    #[doc(hidden)]
    fn host(&self) -> (&Document, EntryId);

    #[doc(hidden)]
    fn host_mut(&mut self) -> (&mut Document, EntryId);

    #[doc(hidden)]
    fn host_ref(&self) -> EntryRef<'_> {
        let (doc, id) = self.host();
        EntryRef::new(doc, id)
    }
}

impl sealed::Sealed for Document {}

impl Host for Document {
    fn host(&self) -> (&Document, EntryId) {
        (self, self.root_id())
    }

    fn host_mut(&mut self) -> (&mut Document, EntryId) {
        let root = self.root_id();
        (self, root)
    }
}

impl<K: Kind> sealed::Sealed for EntryMut<'_, K> {}

impl<K: Kind> Host for EntryMut<'_, K> {
    fn host(&self) -> (&Document, EntryId) {
        (&*self.doc, self.id)
    }

    fn host_mut(&mut self) -> (&mut Document, EntryId) {
        (&mut *self.doc, self.id)
    }
}

/// Write up to `names.len()` channel values in `[0, 1]` as scalars, left to right.
///
/// Every value is checked before any scalar is written.
pub(crate) fn set_channels(
    doc: &mut Document,
    id: EntryId,
    kind: EntryKind,
    names: &[&'static str],
    values: &[Number],
    precision: Option<usize>,
) -> Result<()> {
    if values.len() > names.len() {
        return Err(EggError::shape(
            kind,
            format!("at most {} values", names.len()),
            values.len(),
        ));
    }
    for (name, value) in names.iter().zip(values) {
        if !(0.0..=1.0).contains(&value.as_f64()) {
            return Err(EggError::invalid(
                *name,
                value,
                "must be between 0.0 and 1.0",
            ));
        }
    }
    for (name, value) in names.iter().zip(values) {
        doc.set_scalar(id, name, fmt_number(*value, precision))?;
    }
    Ok(())
}

/// Check a component count against an inclusive range.
pub(crate) fn check_len(
    kind: EntryKind,
    len: usize,
    min: usize,
    max: usize,
) -> Result<()> {
    if (min..=max).contains(&len) {
        return Ok(());
    }
    let expected = if min == max {
        format!("exactly {min} values")
    } else {
        format!("{min} to {max} values")
    };
    Err(EggError::shape(kind, expected, len))
}
