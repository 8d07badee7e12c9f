use crate::entry::Payload;
use crate::error::Result;
use crate::format::{to_numbers, Number};
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, EntryRef};

use super::{check_len, Host};

/// Holds the surface `<Normal>` of a vertex or polygon.
pub trait NormalHost: Host {
    /// Set the normal to `vector` (x, y, z), replacing any earlier one.
    fn set_normal<N: Into<Number> + Copy>(
        &mut self,
        vector: &[N],
        precision: Option<usize>,
    ) -> Result<EntryMut<'_, marker::Normal>> {
        check_len(EntryKind::Normal, vector.len(), 3, 3)?;
        let (doc, parent) = self.host_mut();
        let payload = Payload::Numbers {
            values: to_numbers(vector),
            precision,
        };
        let id = doc.attach(parent, EntryKind::Normal, None, None, payload)?;
        Ok(EntryMut::new(doc, id))
    }

    /// The normal, if set.
    fn normal(&self) -> Option<EntryRef<'_, marker::Normal>> {
        self.host_ref().single()
    }
}

impl NormalHost for EntryMut<'_, marker::Vertex> {}
impl NormalHost for EntryMut<'_, marker::Polygon> {}

impl EntryRef<'_, marker::Normal> {
    /// The vector as `[x, y, z]`.
    pub fn vector(&self) -> Option<[f64; 3]> {
        match self.numbers() {
            [x, y, z] => Some([x.as_f64(), y.as_f64(), z.as_f64()]),
            _ => None,
        }
    }
}
