//! Keys of name-keyed child collections.

use std::cmp::Ordering;
use std::fmt;

/// Key of an entry inside a name-keyed collection.
///
/// Keys order the way they render: the default key first, then indices
/// numerically, then names compared case-insensitively (ties broken on the
/// exact text so the order never depends on insertion).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// The unnamed member, e.g. the default UV set.
    Default,
    /// Numeric key, used for vertices.
    Index(u32),
    /// Textual key.
    Name(String),
}

impl EntryKey {
    fn rank(&self) -> u8 {
        match self {
            EntryKey::Default => 0,
            EntryKey::Index(_) => 1,
            EntryKey::Name(_) => 2,
        }
    }

    /// The key's name, if it is textual.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            EntryKey::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl Ord for EntryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (EntryKey::Index(a), EntryKey::Index(b)) => a.cmp(b),
            (EntryKey::Name(a), EntryKey::Name(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for EntryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Default => f.write_str("default"),
            EntryKey::Index(index) => write!(f, "{index}"),
            EntryKey::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl From<&str> for EntryKey {
    fn from(name: &str) -> Self {
        EntryKey::Name(name.to_owned())
    }
}

impl From<String> for EntryKey {
    fn from(name: String) -> Self {
        EntryKey::Name(name)
    }
}

impl From<u32> for EntryKey {
    fn from(index: u32) -> Self {
        EntryKey::Index(index)
    }
}

/// `None` and the empty string both select the default key.
impl From<Option<&str>> for EntryKey {
    fn from(name: Option<&str>) -> Self {
        match name {
            None | Some("") => EntryKey::Default,
            Some(name) => EntryKey::Name(name.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(keys: &[EntryKey]) -> Vec<String> {
        let mut keys = keys.to_vec();
        keys.sort();
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_order() {
        let keys = ["B", "a", "C"].map(EntryKey::from);
        assert_eq!(sorted(&keys), ["\"a\"", "\"B\"", "\"C\""]);
    }

    #[test]
    fn test_case_tie_is_stable() {
        let forward = sorted(&["a", "A"].map(EntryKey::from));
        let backward = sorted(&["A", "a"].map(EntryKey::from));
        assert_eq!(forward, backward);
        assert_ne!(EntryKey::from("a"), EntryKey::from("A"));
    }

    #[test]
    fn test_numeric_order() {
        let keys = [10u32, 2, 0].map(EntryKey::from);
        assert_eq!(sorted(&keys), ["0", "2", "10"]);
    }

    #[test]
    fn test_default_first() {
        let keys = [
            EntryKey::from("alpha"),
            EntryKey::from(None::<&str>),
            EntryKey::from("Zeta"),
        ];
        assert_eq!(sorted(&keys)[0], "default");
        assert_eq!(EntryKey::from(Some("")), EntryKey::Default);
    }
}
