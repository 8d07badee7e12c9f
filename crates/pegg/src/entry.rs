//! Arena storage for document entries.

use std::collections::BTreeMap;

use slotmap::new_key_type;

use crate::format::{join_numbers, Number};
use crate::key::EntryKey;
use crate::kind::{EntryKind, Storage};
use crate::vocab::CoordinateSystem;

new_key_type! {
    /// Handle of an entry inside a [`Document`](crate::Document).
    pub struct EntryId;
}

/// Children of one kind, shaped by [`EntryKind::storage`].
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Sequence(Vec<EntryId>),
    Keyed(BTreeMap<EntryKey, EntryId>),
    Single(Option<EntryId>),
}

impl Slot {
    fn for_kind(kind: EntryKind) -> Self {
        match kind.storage() {
            Storage::Sequence => Slot::Sequence(Vec::new()),
            Storage::Keyed => Slot::Keyed(BTreeMap::new()),
            Storage::Single => Slot::Single(None),
        }
    }

    /// Child ids in rendering order.
    pub(crate) fn ids(&self) -> Vec<EntryId> {
        match self {
            Slot::Sequence(ids) => ids.clone(),
            Slot::Keyed(map) => map.values().copied().collect(),
            Slot::Single(id) => id.iter().copied().collect(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Slot::Sequence(ids) => ids.is_empty(),
            Slot::Keyed(map) => map.is_empty(),
            Slot::Single(id) => id.is_none(),
        }
    }
}

/// Kind-specific leaf data of an entry.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    /// Composite entries carry no content of their own.
    Empty,
    /// Pre-escaped text: comments, references, scalars, filenames.
    Text(String),
    CoordinateSystem(CoordinateSystem),
    Numbers {
        values: Vec<Number>,
        precision: Option<usize>,
    },
    Matrix {
        rows: Vec<Vec<Number>>,
        precision: Option<usize>,
    },
    Indices(Vec<u32>),
}

impl Payload {
    /// Content lines of the entry, or `None` when it has none.
    pub(crate) fn content(&self) -> Option<String> {
        match self {
            Payload::Empty => None,
            Payload::Text(text) => Some(text.clone()),
            Payload::CoordinateSystem(system) => Some(system.as_str().to_owned()),
            Payload::Numbers { values, precision } => Some(join_numbers(values, *precision)),
            Payload::Matrix { rows, precision } => Some(
                rows.iter()
                    .map(|row| join_numbers(row, *precision))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Payload::Indices(indices) => Some(
                indices
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }
}

/// One node of the document tree.
///
/// The root is the only entry with neither a kind nor a parent.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) kind: Option<EntryKind>,
    /// Escaped name as written in the header.
    pub(crate) name: Option<String>,
    /// Back-link only; ownership runs from the slots downward.
    pub(crate) parent: Option<EntryId>,
    pub(crate) slots: [Slot; EntryKind::COUNT],
    pub(crate) payload: Payload,
}

impl Entry {
    pub(crate) fn new(
        kind: Option<EntryKind>,
        name: Option<String>,
        parent: Option<EntryId>,
        payload: Payload,
    ) -> Self {
        Self {
            kind,
            name,
            parent,
            slots: std::array::from_fn(|i| Slot::for_kind(EntryKind::ALL[i])),
            payload,
        }
    }

    pub(crate) fn slot(&self, kind: EntryKind) -> &Slot {
        &self.slots[kind.index()]
    }

    pub(crate) fn slot_mut(&mut self, kind: EntryKind) -> &mut Slot {
        &mut self.slots[kind.index()]
    }

    /// Look up a keyed child.
    pub(crate) fn keyed(&self, kind: EntryKind, key: &EntryKey) -> Option<EntryId> {
        match self.slot(kind) {
            Slot::Keyed(map) => map.get(key).copied(),
            _ => None,
        }
    }

    /// The child in a singleton slot.
    pub(crate) fn single(&self, kind: EntryKind) -> Option<EntryId> {
        match self.slot(kind) {
            Slot::Single(id) => *id,
            _ => None,
        }
    }

    pub(crate) fn has_children(&self) -> bool {
        self.slots.iter().any(|slot| !slot.is_empty())
    }

    /// All children, flattened in kind declaration order.
    pub(crate) fn child_ids(&self) -> Vec<EntryId> {
        self.slots.iter().flat_map(Slot::ids).collect()
    }
}
