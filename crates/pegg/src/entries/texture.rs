use crate::document::Document;
use crate::entry::Payload;
use crate::error::{EggError, Result};
use crate::format::{escape_name, fmt_number, to_numbers, Number};
use crate::key::EntryKey;
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, EntryRef, KeyedView};
use crate::vocab::{CompressionMode, EnvType, TextureFormat, TextureType, WrapMode};

use super::{set_channels, Host};

/// Scalars of a `<Texture>`, in the order they are written.
pub(crate) const TEXTURE_SCALARS: &[&str] = &[
    "alpha-file",
    "alpha-file-channel",
    "format",
    "compression",
    "wrap",
    "wrapu",
    "wrapv",
    "wrapw",
    "borderr",
    "borderg",
    "borderb",
    "bordera",
    "type",
    "multiview",
    "num-views",
    "envtype",
    "uv-name",
];

const BORDER: [&str; 4] = ["borderr", "borderg", "borderb", "bordera"];

/// Holds named `<Texture>` entries, referenced from polygons by `<TRef>`.
pub trait TextureHost: Host {
    /// Add a texture loaded from `filename`.
    fn add_texture(&mut self, name: &str, filename: &str) -> Result<EntryMut<'_, marker::Texture>> {
        let (doc, parent) = self.host_mut();
        let id = doc.attach(
            parent,
            EntryKind::Texture,
            Some(EntryKey::from(name)),
            Some(escape_name(name, false)),
            Payload::Text(escape_name(filename, true)),
        )?;
        Ok(EntryMut::new(doc, id))
    }

    /// Textures in rendering order.
    fn textures(&self) -> KeyedView<'_, marker::Texture> {
        self.host_ref().keyed()
    }

    /// Mutable cursor to the texture `name`.
    fn texture_mut(&mut self, name: &str) -> Option<EntryMut<'_, marker::Texture>> {
        let (doc, parent) = self.host_mut();
        let id = doc
            .get(parent)
            .keyed(EntryKind::Texture, &EntryKey::from(name))?;
        Some(EntryMut::new(doc, id))
    }
}

impl TextureHost for Document {}

impl EntryMut<'_, marker::Texture> {
    fn set(&mut self, name: &str, value: String) -> Result<()> {
        self.doc.set_scalar(self.id, name, value)
    }

    /// Grayscale image whose contents become the alpha channel.
    pub fn set_alpha_file(&mut self, filename: &str) -> Result<()> {
        self.set("alpha-file", escape_name(filename, true))
    }

    /// Channel of the alpha file to use: 0 for the grayscale combination,
    /// 1 to 4 for r, g, b or a.
    pub fn set_alpha_file_channel(&mut self, channel: u8) -> Result<()> {
        if channel > 4 {
            return Err(EggError::invalid(
                "alpha-file-channel",
                channel,
                "should be one of 0, 1, 2, 3, 4",
            ));
        }
        self.set("alpha-file-channel", channel.to_string())
    }

    /// Load format of the image.
    pub fn set_format(&mut self, format: TextureFormat) -> Result<()> {
        self.set("format", format.to_string())
    }

    /// Compression applied when the texture is uploaded.
    pub fn set_compression(&mut self, mode: CompressionMode) -> Result<()> {
        self.set("compression", mode.to_string())
    }

    /// Wrapping on both axes.
    pub fn set_wrap(&mut self, mode: WrapMode) -> Result<()> {
        self.set("wrap", mode.to_string())
    }

    /// Wrapping along u.
    pub fn set_wrapu(&mut self, mode: WrapMode) -> Result<()> {
        self.set("wrapu", mode.to_string())
    }

    /// Wrapping along v.
    pub fn set_wrapv(&mut self, mode: WrapMode) -> Result<()> {
        self.set("wrapv", mode.to_string())
    }

    /// Wrapping along w, for 3-D textures.
    pub fn set_wrapw(&mut self, mode: WrapMode) -> Result<()> {
        self.set("wrapw", mode.to_string())
    }

    /// Border color used with [`WrapMode::BorderColor`]; up to four channels
    /// in `[0, 1]` assigned left to right.
    pub fn set_border_color<N: Into<Number> + Copy>(
        &mut self,
        values: &[N],
        precision: Option<usize>,
    ) -> Result<()> {
        set_channels(
            self.doc,
            self.id,
            EntryKind::Texture,
            &BORDER,
            &to_numbers(values),
            precision,
        )
    }

    /// Dimensionality of the texture.
    pub fn set_type(&mut self, texture_type: TextureType) -> Result<()> {
        self.set("type", texture_type.to_string())
    }

    /// Whether the texture holds multiple views; must be in `[0, 1]`.
    pub fn set_multiview(&mut self, flag: impl Into<Number>, precision: Option<usize>) -> Result<()> {
        let flag = flag.into();
        if !(0.0..=1.0).contains(&flag.as_f64()) {
            return Err(EggError::invalid(
                "multiview",
                flag,
                "must be between 0.0 and 1.0",
            ));
        }
        self.set("multiview", fmt_number(flag, precision))
    }

    /// Number of views in a multiview texture; at least one.
    pub fn set_num_views(&mut self, count: u32) -> Result<()> {
        if count < 1 {
            return Err(EggError::invalid("num-views", count, "must be at least 1"));
        }
        self.set("num-views", count.to_string())
    }

    /// How the texture combines with the underlying color.
    pub fn set_envtype(&mut self, envtype: EnvType) -> Result<()> {
        self.set("envtype", envtype.to_string())
    }

    /// Name of the UV set this texture samples. Vertices may only add named
    /// UV sets that some texture declares here.
    pub fn set_uv_name(&mut self, uv_name: &str) -> Result<()> {
        self.set("uv-name", escape_name(uv_name, false))
    }
}

impl<'a> EntryRef<'a, marker::Texture> {
    /// Image filename, as written.
    pub fn filename(&self) -> Option<&'a str> {
        match self.payload() {
            Payload::Text(filename) => Some(filename),
            _ => None,
        }
    }

    /// Declared UV set name, as written.
    pub fn uv_name(&self) -> Option<&'a str> {
        self.scalar("uv-name")
    }
}
