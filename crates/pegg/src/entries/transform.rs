use crate::entry::Payload;
use crate::error::{EggError, Result};
use crate::format::{to_numbers, Number};
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, EntryRef};

use super::{check_len, Host};

/// Holds the `<Transform>` of a group, instance or texture.
pub trait TransformHost: Host {
    /// The transform, created empty on first access.
    fn transform_mut(&mut self) -> Result<EntryMut<'_, marker::Transform>> {
        let (doc, parent) = self.host_mut();
        let id = match doc.get(parent).single(EntryKind::Transform) {
            Some(id) => id,
            None => doc.attach(parent, EntryKind::Transform, None, None, Payload::Empty)?,
        };
        Ok(EntryMut::new(doc, id))
    }

    /// The transform, if one was created.
    fn transform(&self) -> Option<EntryRef<'_, marker::Transform>> {
        self.host_ref().single()
    }
}

impl TransformHost for EntryMut<'_, marker::Group> {}
impl TransformHost for EntryMut<'_, marker::Instance> {}
impl TransformHost for EntryMut<'_, marker::Texture> {}

fn matrix_rows<R, N>(kind: EntryKind, size: usize, rows: &[R]) -> Result<Vec<Vec<Number>>>
where
    R: AsRef<[N]>,
    N: Into<Number> + Copy,
{
    let expected = || format!("{size} rows of {size} values");
    if rows.len() != size {
        return Err(EggError::shape(kind, expected(), rows.len()));
    }
    rows.iter()
        .map(|row| {
            let row = row.as_ref();
            if row.len() == size {
                Ok(to_numbers(row))
            } else {
                Err(EggError::shape(kind, expected(), row.len()))
            }
        })
        .collect()
}

impl EntryMut<'_, marker::Transform> {
    fn parent_kind(&self) -> Option<EntryKind> {
        let parent = self.doc.get(self.id).parent?;
        self.doc.get(parent).kind
    }

    /// Set the 3×3 matrix, replacing any earlier one. Only texture
    /// transforms accept a 3×3 matrix.
    pub fn set_matrix3<R, N>(
        &mut self,
        rows: &[R],
        precision: Option<usize>,
    ) -> Result<EntryMut<'_, marker::Matrix3>>
    where
        R: AsRef<[N]>,
        N: Into<Number> + Copy,
    {
        if self.parent_kind() != Some(EntryKind::Texture) {
            return Err(EggError::Misplaced {
                kind: EntryKind::Matrix3,
                allowed: EntryKind::Texture,
            });
        }
        let rows = matrix_rows(EntryKind::Matrix3, 3, rows)?;
        let payload = Payload::Matrix { rows, precision };
        let id = self
            .doc
            .attach(self.id, EntryKind::Matrix3, None, None, payload)?;
        Ok(EntryMut::new(self.doc, id))
    }

    /// Set the 4×4 matrix, replacing any earlier one.
    pub fn set_matrix4<R, N>(
        &mut self,
        rows: &[R],
        precision: Option<usize>,
    ) -> Result<EntryMut<'_, marker::Matrix4>>
    where
        R: AsRef<[N]>,
        N: Into<Number> + Copy,
    {
        let rows = matrix_rows(EntryKind::Matrix4, 4, rows)?;
        let payload = Payload::Matrix { rows, precision };
        let id = self
            .doc
            .attach(self.id, EntryKind::Matrix4, None, None, payload)?;
        Ok(EntryMut::new(self.doc, id))
    }

    /// Set the rotation: degrees, optionally followed by up to three axis
    /// components.
    pub fn set_rotate<N: Into<Number> + Copy>(
        &mut self,
        values: &[N],
        precision: Option<usize>,
    ) -> Result<EntryMut<'_, marker::Rotate>> {
        check_len(EntryKind::Rotate, values.len(), 1, 4)?;
        let payload = Payload::Numbers {
            values: to_numbers(values),
            precision,
        };
        let id = self
            .doc
            .attach(self.id, EntryKind::Rotate, None, None, payload)?;
        Ok(EntryMut::new(self.doc, id))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    const IDENTITY3: [[i32; 3]; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

    #[test]
    fn test_transform_is_created_once() {
        let mut doc = Document::new();
        let mut group = doc.add_group("g").unwrap();
        assert!(group.transform().is_none());
        let first = group.transform_mut().unwrap().id();
        let second = group.transform_mut().unwrap().id();
        assert_eq!(first, second);
        assert_eq!(doc.render("", true), "<Group> g {\n<Transform> { }\n}\n");
    }

    #[test]
    fn test_matrix3_only_under_texture() {
        let mut doc = Document::new();
        let mut group = doc.add_group("g").unwrap();
        let err = group
            .transform_mut()
            .unwrap()
            .set_matrix3(&IDENTITY3, None)
            .unwrap_err();
        assert!(matches!(
            err,
            EggError::Misplaced {
                kind: EntryKind::Matrix3,
                allowed: EntryKind::Texture,
            }
        ));

        let mut tex = doc.add_texture("t", "t.png").unwrap();
        tex.transform_mut().unwrap().set_matrix3(&IDENTITY3, None).unwrap();
        let expected = "\
<Texture> t {
  \"t.png\"
  <Transform> {
    <Matrix3> {
      1 0 0
      0 1 0
      0 0 1
    }
  }
}
<Group> g {
  <Transform> { }
}
";
        assert_eq!(doc.render("  ", true), expected);
    }

    #[test]
    fn test_matrix_shape_is_checked() {
        let mut doc = Document::new();
        let mut group = doc.add_group("g").unwrap();
        let mut transform = group.transform_mut().unwrap();

        let err = transform.set_matrix4(&IDENTITY3, None).unwrap_err();
        assert!(matches!(
            err,
            EggError::ShapeViolation {
                kind: EntryKind::Matrix4,
                actual: 3,
                ..
            }
        ));
        let ragged: [&[f64]; 4] = [&[1.0, 0.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0; 4], &[0.0; 4]];
        assert!(transform.set_matrix4::<_, f64>(&ragged, None).is_err());
        assert!(transform.to_ref().single::<marker::Matrix4>().is_none());
    }

    #[test]
    fn test_matrix_precision() {
        let mut doc = Document::new();
        let mut instance = doc.add_instance("i").unwrap();
        let rows = [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [2.5, 0.0, 0.0, 1.0]];
        instance.transform_mut().unwrap().set_matrix4(&rows, Some(1)).unwrap();
        let text = doc.render("", true);
        assert!(text.contains("<Matrix4> {\n1.0 0.0 0.0 0.0\n"));
        assert!(text.contains("2.5 0.0 0.0 1.0\n}"));
    }

    #[test]
    fn test_rotate_arity() {
        let mut doc = Document::new();
        let mut group = doc.add_group("g").unwrap();
        let mut transform = group.transform_mut().unwrap();
        assert!(transform.set_rotate::<i32>(&[], None).is_err());
        let err = transform.set_rotate(&[90, 0, 0, 1, 0], None).unwrap_err();
        assert!(matches!(err, EggError::ShapeViolation { actual: 5, .. }));
        transform.set_rotate(&[45], None).unwrap();
        transform.set_rotate(&[90, 0, 0, 1], None).unwrap();

        let rotate = transform.to_ref().single::<marker::Rotate>().unwrap();
        assert_eq!(rotate.content().as_deref(), Some("90 0 0 1"));
        assert_eq!(doc.len(), 3);
    }
}
