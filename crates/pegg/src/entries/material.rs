use crate::document::Document;
use crate::entry::Payload;
use crate::error::Result;
use crate::format::{escape_name, fmt_number, to_numbers, Number};
use crate::key::EntryKey;
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, KeyedView};

use super::{set_channels, Host};

/// Scalars of a `<Material>`, in the order they are written.
pub(crate) const MATERIAL_SCALARS: &[&str] = &[
    "diffr", "diffg", "diffb", "diffa",
    "ambr", "ambg", "ambb", "amba",
    "emitr", "emitg", "emitb", "emita",
    "specr", "specg", "specb", "speca",
    "shininess", "local",
];

const DIFFUSE: [&str; 4] = ["diffr", "diffg", "diffb", "diffa"];
const AMBIENT: [&str; 4] = ["ambr", "ambg", "ambb", "amba"];
const EMISSION: [&str; 4] = ["emitr", "emitg", "emitb", "emita"];
const SPECULAR: [&str; 4] = ["specr", "specg", "specb", "speca"];

/// Holds named `<Material>` entries, referenced from polygons by `<MRef>`.
pub trait MaterialHost: Host {
    /// Add a material with no attributes set.
    fn add_material(&mut self, name: &str) -> Result<EntryMut<'_, marker::Material>> {
        let (doc, parent) = self.host_mut();
        let id = doc.attach(
            parent,
            EntryKind::Material,
            Some(EntryKey::from(name)),
            Some(escape_name(name, false)),
            Payload::Empty,
        )?;
        Ok(EntryMut::new(doc, id))
    }

    /// Materials in rendering order.
    fn materials(&self) -> KeyedView<'_, marker::Material> {
        self.host_ref().keyed()
    }

    /// Mutable cursor to the material `name`.
    fn material_mut(&mut self, name: &str) -> Option<EntryMut<'_, marker::Material>> {
        let (doc, parent) = self.host_mut();
        let id = doc
            .get(parent)
            .keyed(EntryKind::Material, &EntryKey::from(name))?;
        Some(EntryMut::new(doc, id))
    }
}

impl MaterialHost for Document {}

/// Color groups take up to four channel values (red, green, blue, alpha),
/// assigned left to right. Each must lie in `[0, 1]`.
impl EntryMut<'_, marker::Material> {
    fn set_color<N: Into<Number> + Copy>(
        &mut self,
        names: &[&'static str],
        values: &[N],
        precision: Option<usize>,
    ) -> Result<()> {
        set_channels(
            self.doc,
            self.id,
            EntryKind::Material,
            names,
            &to_numbers(values),
            precision,
        )
    }

    /// Diffuse color channels.
    pub fn set_diffuse<N: Into<Number> + Copy>(
        &mut self,
        values: &[N],
        precision: Option<usize>,
    ) -> Result<()> {
        self.set_color(&DIFFUSE, values, precision)
    }

    /// Ambient color channels.
    pub fn set_ambient<N: Into<Number> + Copy>(
        &mut self,
        values: &[N],
        precision: Option<usize>,
    ) -> Result<()> {
        self.set_color(&AMBIENT, values, precision)
    }

    /// Emission color channels.
    pub fn set_emission<N: Into<Number> + Copy>(
        &mut self,
        values: &[N],
        precision: Option<usize>,
    ) -> Result<()> {
        self.set_color(&EMISSION, values, precision)
    }

    /// Specular color channels.
    pub fn set_specular<N: Into<Number> + Copy>(
        &mut self,
        values: &[N],
        precision: Option<usize>,
    ) -> Result<()> {
        self.set_color(&SPECULAR, values, precision)
    }

    /// Size of the specular highlight; larger values give a smaller, shinier
    /// highlight. Not range-checked.
    pub fn set_shininess(&mut self, value: impl Into<Number>, precision: Option<usize>) -> Result<()> {
        self.doc
            .set_scalar(self.id, "shininess", fmt_number(value, precision))
    }
}
