use crate::entry::Payload;
use crate::error::{EggError, Result};
use crate::format::{escape_name, to_numbers, Number};
use crate::key::EntryKey;
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, EntryRef, KeyedView};

use super::{check_len, Host};

/// Holds the `<UV>` texture coordinate sets of a vertex.
pub trait UvHost: Host {
    /// Add a UV set of 2 or 3 components.
    ///
    /// `None` or an empty name adds the default set. A named set is only
    /// accepted once some texture in the document declares a matching
    /// `uv-name`.
    fn add_uv<N: Into<Number> + Copy>(
        &mut self,
        co: &[N],
        name: Option<&str>,
        precision: Option<usize>,
    ) -> Result<EntryMut<'_, marker::UV>> {
        check_len(EntryKind::UV, co.len(), 2, 3)?;
        let key = EntryKey::from(name);
        let (doc, parent) = self.host_mut();
        if doc.get(parent).keyed(EntryKind::UV, &key).is_some() {
            return Err(EggError::duplicate(EntryKind::UV, key));
        }

        let escaped = key.as_name().map(|name| escape_name(name, false));
        if let Some(uv_name) = &escaped {
            let declared = doc
                .root()
                .keyed::<marker::Texture>()
                .values()
                .any(|texture| texture.uv_name() == Some(uv_name.as_str()));
            if !declared {
                return Err(EggError::invalid(
                    "uv-name",
                    uv_name,
                    "no texture declares this uv-name",
                ));
            }
        }

        let payload = Payload::Numbers {
            values: to_numbers(co),
            precision,
        };
        let id = doc.attach(parent, EntryKind::UV, Some(key), escaped, payload)?;
        Ok(EntryMut::new(doc, id))
    }

    /// UV sets with the default set first, then named sets.
    fn uvs(&self) -> KeyedView<'_, marker::UV> {
        self.host_ref().keyed()
    }

    /// The default UV set, if added.
    fn uv(&self) -> Option<EntryRef<'_, marker::UV>> {
        self.uvs().get(EntryKey::Default)
    }
}

impl UvHost for EntryMut<'_, marker::Vertex> {}

impl EntryRef<'_, marker::UV> {
    /// The u, v and optional w components.
    pub fn co(&self) -> Vec<f64> {
        self.numbers().iter().map(|n| n.as_f64()).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::prelude::*;

    #[test]
    fn test_named_uv_needs_declaring_texture() {
        let mut doc = Document::new();
        doc.add_texture("t", "t.png").unwrap();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        let mut vertex = pool.add_vertex(0, &[0, 0, 0], None).unwrap();
        let err = vertex.add_uv(&[0.5, 0.5], Some("diffuse"), None).unwrap_err();
        assert!(matches!(err, EggError::InvalidValue { .. }));
        assert!(vertex.uvs().is_empty());

        doc.texture_mut("t").unwrap().set_uv_name("diffuse").unwrap();
        let mut pool = doc.vertex_pool_mut("p").unwrap();
        let mut vertex = pool.vertex_mut(0).unwrap();
        vertex.add_uv(&[0.5, 0.5], Some("diffuse"), None).unwrap();
        assert!(vertex.uvs().contains_key("diffuse"));
    }

    #[test]
    fn test_default_uv_renders_first() {
        let mut doc = Document::new();
        doc.add_texture("t", "t.png").unwrap().set_uv_name("alpha").unwrap();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        let mut vertex = pool.add_vertex(0, &[1], None).unwrap();
        vertex.add_uv(&[1, 1], Some("alpha"), None).unwrap();
        vertex.add_uv(&[0, 0], None, None).unwrap();

        let expected = "\
<Vertex> 0 {
  1
  <UV> { 0 0 }
  <UV> alpha { 1 1 }
}
";
        assert_eq!(vertex.to_ref().render("  ", true), expected);
        let keys: Vec<String> = vertex.uvs().keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["default", "\"alpha\""]);
    }

    #[test]
    fn test_empty_name_is_default() {
        let mut doc = Document::new();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        let mut vertex = pool.add_vertex(0, &[1], None).unwrap();
        vertex.add_uv(&[0.25, 0.75, 1.0], Some(""), None).unwrap();
        let err = vertex.add_uv(&[0, 0], None, None).unwrap_err();
        assert_eq!(err.to_string(), "cannot add UV default: it already exists");

        let co = vertex.uv().unwrap().co();
        assert_eq!(co.len(), 3);
        assert_relative_eq!(co[1], 0.75);
    }

    #[test]
    fn test_uv_arity() {
        let mut doc = Document::new();
        let mut pool = doc.add_vertex_pool("p").unwrap();
        let mut vertex = pool.add_vertex(0, &[1], None).unwrap();
        assert!(vertex.add_uv(&[0.5], None, None).is_err());
        assert!(vertex.add_uv(&[0, 0, 0, 0], None, None).is_err());
        assert!(vertex.uv().is_none());
    }
}
