//! The closed set of entry kinds and the type-level markers for each.

use std::fmt;

/// How a parent stores its children of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Ordered list; insertion order is rendering order.
    Sequence,
    /// Name-keyed map; keys are unique per parent.
    Keyed,
    /// At most one child; later writes replace earlier ones.
    Single,
}

/// Kind of an entry. The variant name is the literal header token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum EntryKind {
    Comment,
    CoordinateSystem,
    Transform,
    Matrix3,
    Matrix4,
    Rotate,
    MRef,
    TRef,
    Normal,
    Texture,
    Material,
    VertexPool,
    Vertex,
    VertexRef,
    Polygon,
    Ref,
    Group,
    Instance,
    UV,
    Scalar,
}

impl EntryKind {
    /// Number of kinds.
    pub const COUNT: usize = 20;

    /// Every kind, in declaration order.
    pub const ALL: [EntryKind; Self::COUNT] = [
        EntryKind::Comment,
        EntryKind::CoordinateSystem,
        EntryKind::Transform,
        EntryKind::Matrix3,
        EntryKind::Matrix4,
        EntryKind::Rotate,
        EntryKind::MRef,
        EntryKind::TRef,
        EntryKind::Normal,
        EntryKind::Texture,
        EntryKind::Material,
        EntryKind::VertexPool,
        EntryKind::Vertex,
        EntryKind::VertexRef,
        EntryKind::Polygon,
        EntryKind::Ref,
        EntryKind::Group,
        EntryKind::Instance,
        EntryKind::UV,
        EntryKind::Scalar,
    ];

    /// Order in which child kinds are written after a node's own scalars.
    ///
    /// Scalars are absent: they only appear through the per-kind scalar order.
    pub const RENDER_ORDER: [EntryKind; 19] = [
        EntryKind::Comment,
        EntryKind::CoordinateSystem,
        EntryKind::Transform,
        EntryKind::Matrix3,
        EntryKind::Matrix4,
        EntryKind::Rotate,
        EntryKind::MRef,
        EntryKind::TRef,
        EntryKind::Normal,
        EntryKind::Texture,
        EntryKind::Material,
        EntryKind::VertexPool,
        EntryKind::Vertex,
        EntryKind::VertexRef,
        EntryKind::Polygon,
        EntryKind::Ref,
        EntryKind::Group,
        EntryKind::Instance,
        EntryKind::UV,
    ];

    /// Header token, e.g. `VertexPool`.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Comment => "Comment",
            EntryKind::CoordinateSystem => "CoordinateSystem",
            EntryKind::Transform => "Transform",
            EntryKind::Matrix3 => "Matrix3",
            EntryKind::Matrix4 => "Matrix4",
            EntryKind::Rotate => "Rotate",
            EntryKind::MRef => "MRef",
            EntryKind::TRef => "TRef",
            EntryKind::Normal => "Normal",
            EntryKind::Texture => "Texture",
            EntryKind::Material => "Material",
            EntryKind::VertexPool => "VertexPool",
            EntryKind::Vertex => "Vertex",
            EntryKind::VertexRef => "VertexRef",
            EntryKind::Polygon => "Polygon",
            EntryKind::Ref => "Ref",
            EntryKind::Group => "Group",
            EntryKind::Instance => "Instance",
            EntryKind::UV => "UV",
            EntryKind::Scalar => "Scalar",
        }
    }

    /// Storage shape a parent uses for children of this kind.
    pub fn storage(self) -> Storage {
        match self {
            EntryKind::Comment | EntryKind::Polygon | EntryKind::TRef | EntryKind::VertexRef => {
                Storage::Sequence
            }
            EntryKind::Group
            | EntryKind::Instance
            | EntryKind::Material
            | EntryKind::Scalar
            | EntryKind::Texture
            | EntryKind::UV
            | EntryKind::Vertex
            | EntryKind::VertexPool => Storage::Keyed,
            EntryKind::CoordinateSystem
            | EntryKind::Transform
            | EntryKind::Matrix3
            | EntryKind::Matrix4
            | EntryKind::Rotate
            | EntryKind::MRef
            | EntryKind::Normal
            | EntryKind::Ref => Storage::Single,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-level tag carried by entry cursors.
pub trait Kind: 'static {
    /// Whether an entry of `kind` (`None` for the root) may be viewed as `Self`.
    fn matches(kind: Option<EntryKind>) -> bool;
}

/// A tag naming exactly one [`EntryKind`].
pub trait Concrete: Kind {
    /// The kind this tag stands for.
    const KIND: EntryKind;
}

/// Zero-sized tags for typed cursors, one per entry kind.
pub mod marker {
    use super::{Concrete, EntryKind, Kind};

    /// Any entry, including the root.
    #[derive(Debug)]
    pub enum Any {}

    impl Kind for Any {
        fn matches(_: Option<EntryKind>) -> bool {
            true
        }
    }

    /// The document root.
    #[derive(Debug)]
    pub enum Root {}

    impl Kind for Root {
        fn matches(kind: Option<EntryKind>) -> bool {
            kind.is_none()
        }
    }

    macro_rules! markers {
        ($($name:ident),* $(,)?) => {
            $(
                #[doc = concat!("A `", stringify!($name), "` entry.")]
                #[derive(Debug)]
                pub enum $name {}

                impl Kind for $name {
                    fn matches(kind: Option<EntryKind>) -> bool {
                        kind == Some(EntryKind::$name)
                    }
                }

                impl Concrete for $name {
                    const KIND: EntryKind = EntryKind::$name;
                }
            )*
        };
    }

    markers!(
        Comment,
        CoordinateSystem,
        Transform,
        Matrix3,
        Matrix4,
        Rotate,
        MRef,
        TRef,
        Normal,
        Texture,
        Material,
        VertexPool,
        Vertex,
        VertexRef,
        Polygon,
        Ref,
        Group,
        Instance,
        UV,
        Scalar,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, kind) in EntryKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_render_order_sequence() {
        let tokens: Vec<_> = EntryKind::RENDER_ORDER.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            tokens.join(" "),
            "Comment CoordinateSystem Transform Matrix3 Matrix4 Rotate MRef TRef Normal \
             Texture Material VertexPool Vertex VertexRef Polygon Ref Group Instance UV"
        );
        assert!(!EntryKind::RENDER_ORDER.contains(&EntryKind::Scalar));
    }

    #[test]
    fn test_storage_shapes() {
        assert_eq!(EntryKind::Polygon.storage(), Storage::Sequence);
        assert_eq!(EntryKind::TRef.storage(), Storage::Sequence);
        assert_eq!(EntryKind::Vertex.storage(), Storage::Keyed);
        assert_eq!(EntryKind::UV.storage(), Storage::Keyed);
        assert_eq!(EntryKind::CoordinateSystem.storage(), Storage::Single);
        assert_eq!(EntryKind::Ref.storage(), Storage::Single);
    }

    #[test]
    fn test_markers() {
        assert!(marker::Group::matches(Some(EntryKind::Group)));
        assert!(!marker::Group::matches(Some(EntryKind::Instance)));
        assert!(marker::Root::matches(None));
        assert!(marker::Any::matches(None));
        assert_eq!(<marker::UV as Concrete>::KIND, EntryKind::UV);
    }
}
