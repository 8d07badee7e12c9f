use crate::document::Document;
use crate::entry::Payload;
use crate::error::Result;
use crate::kind::{marker, EntryKind};
use crate::view::EntryMut;
use crate::vocab::CoordinateSystem;

use super::Host;

/// Holds the document's `<CoordinateSystem>` declaration.
pub trait CoordinateSystemHost: Host {
    /// Declare the coordinate system, replacing any earlier declaration.
    fn set_coordinate_system(
        &mut self,
        system: CoordinateSystem,
    ) -> Result<EntryMut<'_, marker::CoordinateSystem>> {
        let (doc, parent) = self.host_mut();
        let payload = Payload::CoordinateSystem(system);
        let id = doc.attach(parent, EntryKind::CoordinateSystem, None, None, payload)?;
        Ok(EntryMut::new(doc, id))
    }

    /// The declared coordinate system, or `Y-up` when none was declared.
    fn coordinate_system(&self) -> CoordinateSystem {
        self.host_ref()
            .single::<marker::CoordinateSystem>()
            .and_then(|entry| match entry.payload() {
                Payload::CoordinateSystem(system) => Some(*system),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl CoordinateSystemHost for Document {}
