use crate::document::Document;
use crate::entry::Payload;
use crate::error::Result;
use crate::format::escape_name;
use crate::key::EntryKey;
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, KeyedView};

use super::Host;

/// Holds named `<Group>` entries, the primary structuring node of a scene.
pub trait GroupHost: Host {
    /// Add a group. Fails with [`DuplicateKey`](crate::EggError::DuplicateKey)
    /// if a sibling group already has this name.
    fn add_group(&mut self, name: &str) -> Result<EntryMut<'_, marker::Group>> {
        let (doc, parent) = self.host_mut();
        let id = doc.attach(
            parent,
            EntryKind::Group,
            Some(EntryKey::from(name)),
            Some(escape_name(name, false)),
            Payload::Empty,
        )?;
        Ok(EntryMut::new(doc, id))
    }

    /// Child groups in rendering order.
    fn groups(&self) -> KeyedView<'_, marker::Group> {
        self.host_ref().keyed()
    }

    /// Mutable cursor to the child group `name`.
    fn group_mut(&mut self, name: &str) -> Option<EntryMut<'_, marker::Group>> {
        let (doc, parent) = self.host_mut();
        let id = doc.get(parent).keyed(EntryKind::Group, &EntryKey::from(name))?;
        Some(EntryMut::new(doc, id))
    }
}

/// Holds named `<Instance>` entries.
///
/// An instance is structurally a group that establishes a local coordinate
/// space for everything below it.
pub trait InstanceHost: Host {
    /// Add an instance. Fails with [`DuplicateKey`](crate::EggError::DuplicateKey)
    /// if a sibling instance already has this name.
    fn add_instance(&mut self, name: &str) -> Result<EntryMut<'_, marker::Instance>> {
        let (doc, parent) = self.host_mut();
        let id = doc.attach(
            parent,
            EntryKind::Instance,
            Some(EntryKey::from(name)),
            Some(escape_name(name, false)),
            Payload::Empty,
        )?;
        Ok(EntryMut::new(doc, id))
    }

    /// Child instances in rendering order.
    fn instances(&self) -> KeyedView<'_, marker::Instance> {
        self.host_ref().keyed()
    }

    /// Mutable cursor to the child instance `name`.
    fn instance_mut(&mut self, name: &str) -> Option<EntryMut<'_, marker::Instance>> {
        let (doc, parent) = self.host_mut();
        let id = doc
            .get(parent)
            .keyed(EntryKind::Instance, &EntryKey::from(name))?;
        Some(EntryMut::new(doc, id))
    }
}

impl GroupHost for Document {}
impl GroupHost for EntryMut<'_, marker::Group> {}
impl GroupHost for EntryMut<'_, marker::Instance> {}

impl InstanceHost for Document {}
impl InstanceHost for EntryMut<'_, marker::Group> {}
impl InstanceHost for EntryMut<'_, marker::Instance> {}
