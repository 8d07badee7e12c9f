//! Typed cursors into a document and read-only views over child collections.
//!
//! Views borrow the live collection inside the document rather than copying
//! it: they expose lookups and iteration only, and the borrow checker keeps
//! the tree from being mutated while a view is held. A view taken after the
//! tree has grown sees the new entries.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::document::Document;
use crate::entry::{Entry, EntryId, Payload, Slot};
use crate::format::Number;
use crate::key::EntryKey;
use crate::kind::marker::{Any, Root, VertexPool};
use crate::kind::{Concrete, EntryKind, Kind};
use crate::render;

/// Read-only cursor to one entry, tagged with its kind.
pub struct EntryRef<'a, K = Any> {
    doc: &'a Document,
    id: EntryId,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for EntryRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for EntryRef<'_, K> {}

impl<'a, K: Kind> EntryRef<'a, K> {
    /// Cursor to `id`, which must be live and of kind `K`.
    pub(crate) fn new(doc: &'a Document, id: EntryId) -> Self {
        debug_assert!(K::matches(doc.get(id).kind));
        Self {
            doc,
            id,
            _kind: PhantomData,
        }
    }

    fn entry(&self) -> &'a Entry {
        self.doc.get(self.id)
    }

    pub(crate) fn payload(&self) -> &'a Payload {
        &self.entry().payload
    }

    pub(crate) fn numbers(&self) -> &'a [Number] {
        match self.payload() {
            Payload::Numbers { values, .. } => values,
            _ => &[],
        }
    }

    /// Handle of this entry.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Kind of this entry; `None` for the document root.
    pub fn kind(&self) -> Option<EntryKind> {
        self.entry().kind
    }

    /// Escaped name as written in the header.
    pub fn name(&self) -> Option<&'a str> {
        self.entry().name.as_deref()
    }

    /// Kind-specific leaf content; `None` for composite entries.
    pub fn content(&self) -> Option<String> {
        self.entry().payload.content()
    }

    /// The document this entry belongs to.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Direct children of every kind. Not recursive.
    pub fn children(&self) -> Vec<EntryRef<'a>> {
        self.entry()
            .child_ids()
            .into_iter()
            .map(|id| EntryRef::new(self.doc, id))
            .collect()
    }

    /// Direct parent; `None` only at the root.
    pub fn parent(&self) -> Option<EntryRef<'a>> {
        self.entry().parent.map(|id| EntryRef::new(self.doc, id))
    }

    /// The document root, following parent links upward.
    pub fn root(&self) -> EntryRef<'a, Root> {
        let mut id = self.id;
        while let Some(parent) = self.doc.get(id).parent {
            id = parent;
        }
        EntryRef::new(self.doc, id)
    }

    /// Drop the kind tag.
    pub fn erase(self) -> EntryRef<'a> {
        EntryRef::new(self.doc, self.id)
    }

    /// Re-tag as `T` if the entry is of that kind.
    pub fn downcast<T: Kind>(self) -> Option<EntryRef<'a, T>> {
        T::matches(self.kind()).then(|| EntryRef::new(self.doc, self.id))
    }

    /// Children of kind `C` held in a name-keyed collection.
    pub fn keyed<C: Concrete>(&self) -> KeyedView<'a, C> {
        KeyedView::new(self.doc, self.entry().slot(C::KIND))
    }

    /// Children of kind `C` held in an ordered sequence.
    pub fn sequence<C: Concrete>(&self) -> SequenceView<'a, C> {
        SequenceView::new(self.doc, self.entry().slot(C::KIND))
    }

    /// The child of kind `C` held in a singleton slot.
    pub fn single<C: Concrete>(&self) -> Option<EntryRef<'a, C>> {
        self.entry()
            .single(C::KIND)
            .map(|id| EntryRef::new(self.doc, id))
    }

    /// Content of a named `<Scalar>` child.
    pub fn scalar(&self, name: &str) -> Option<&'a str> {
        let id = self.entry().keyed(EntryKind::Scalar, &EntryKey::from(name))?;
        match &self.doc.get(id).payload {
            Payload::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Every vertex pool in the document, gathered from the root down through
    /// groups and instances.
    pub fn find_vertex_pools(&self) -> BTreeMap<&'a str, EntryRef<'a, VertexPool>> {
        self.doc.find_vertex_pools()
    }

    /// Render this entry and its subtree.
    pub fn render(&self, indent: &str, compact: bool) -> String {
        render::render(self.doc, self.id, indent, compact)
    }
}

impl<K: Kind> fmt::Debug for EntryRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind().map_or("Root", EntryKind::as_str);
        match self.name() {
            Some(name) => write!(f, "<{kind} name={name:?}>"),
            None => write!(f, "<{kind}>"),
        }
    }
}

/// Mutable cursor to one entry, tagged with its kind.
///
/// Operations available on a cursor depend on its kind: see the host traits
/// in [`entries`](crate::entries).
pub struct EntryMut<'a, K> {
    pub(crate) doc: &'a mut Document,
    pub(crate) id: EntryId,
    _kind: PhantomData<fn() -> K>,
}

impl<'a, K: Kind> EntryMut<'a, K> {
    /// Cursor to `id`, which must be live and of kind `K`.
    pub(crate) fn new(doc: &'a mut Document, id: EntryId) -> Self {
        debug_assert!(K::matches(doc.get(id).kind));
        Self {
            doc,
            id,
            _kind: PhantomData,
        }
    }

    /// Handle of this entry.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Read-only view of this entry.
    pub fn to_ref(&self) -> EntryRef<'_, K> {
        EntryRef::new(self.doc, self.id)
    }

    /// Give up mutable access and keep a read-only cursor.
    pub fn into_ref(self) -> EntryRef<'a, K> {
        EntryRef::new(self.doc, self.id)
    }
}

impl<K: Kind> fmt::Debug for EntryMut<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_ref(), f)
    }
}

/// Read-only view of a name-keyed child collection, iterated in rendering order.
pub struct KeyedView<'a, C> {
    doc: &'a Document,
    map: Option<&'a BTreeMap<EntryKey, EntryId>>,
    _kind: PhantomData<fn() -> C>,
}

impl<'a, C: Concrete> KeyedView<'a, C> {
    fn new(doc: &'a Document, slot: &'a Slot) -> Self {
        let map = match slot {
            Slot::Keyed(map) => Some(map),
            _ => None,
        };
        Self {
            doc,
            map,
            _kind: PhantomData,
        }
    }

    /// Entry stored under `key`.
    pub fn get(&self, key: impl Into<EntryKey>) -> Option<EntryRef<'a, C>> {
        let id = self.map?.get(&key.into())?;
        Some(EntryRef::new(self.doc, *id))
    }

    /// Whether an entry is stored under `key`.
    pub fn contains_key(&self, key: impl Into<EntryKey>) -> bool {
        self.map.is_some_and(|map| map.contains_key(&key.into()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.map_or(0, BTreeMap::len)
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in rendering order.
    pub fn keys(&self) -> impl Iterator<Item = &'a EntryKey> + 'a {
        self.map.into_iter().flat_map(BTreeMap::keys)
    }

    /// Entries in rendering order.
    pub fn values(&self) -> impl Iterator<Item = EntryRef<'a, C>> + 'a {
        self.iter().map(|(_, entry)| entry)
    }

    /// Key/entry pairs in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a EntryKey, EntryRef<'a, C>)> + 'a {
        let doc = self.doc;
        self.map
            .into_iter()
            .flat_map(BTreeMap::iter)
            .map(move |(key, id)| (key, EntryRef::new(doc, *id)))
    }
}

/// Read-only view of an ordered child collection, iterated in insertion order.
pub struct SequenceView<'a, C> {
    doc: &'a Document,
    ids: &'a [EntryId],
    _kind: PhantomData<fn() -> C>,
}

impl<'a, C: Concrete> SequenceView<'a, C> {
    fn new(doc: &'a Document, slot: &'a Slot) -> Self {
        let ids = match slot {
            Slot::Sequence(ids) => ids.as_slice(),
            _ => &[],
        };
        Self {
            doc,
            ids,
            _kind: PhantomData,
        }
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<EntryRef<'a, C>> {
        self.ids.get(index).map(|id| EntryRef::new(self.doc, *id))
    }

    /// First entry.
    pub fn first(&self) -> Option<EntryRef<'a, C>> {
        self.get(0)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = EntryRef<'a, C>> + 'a {
        let (doc, ids) = (self.doc, self.ids);
        ids.iter().map(move |id| EntryRef::new(doc, *id))
    }
}
