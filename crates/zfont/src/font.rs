use std::io::Read;

use crate::{
    bmf::BmfFont,
    fon1::Fon1Font,
    fon2::Fon2Font,
    glyph::{FontMetrics, Glyph, GlyphSet},
    palette::{ColorLookup, Palette},
    FontError, Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontKind {
    Fon2,
    Fon1,
    Bmf,
}

impl FontKind {
    /// Probe order used by [`Font::detect`].
    pub const PROBE_ORDER: [FontKind; 3] = [FontKind::Fon2, FontKind::Fon1, FontKind::Bmf];

    pub fn detect(self, bytes: &[u8]) -> bool {
        match self {
            FontKind::Fon2 => Fon2Font::detect(bytes),
            FontKind::Fon1 => Fon1Font::detect(bytes),
            FontKind::Bmf => BmfFont::detect(bytes),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontKind::Fon2 => "FON2",
            FontKind::Fon1 => "FON1",
            FontKind::Bmf => "BMF",
        }
    }
}

/// Unified font enum over the supported bitmap formats.
#[derive(Clone, Debug)]
pub enum Font {
    Fon2(Fon2Font),
    Fon1(Fon1Font),
    Bmf(BmfFont),
}

impl Font {
    /// First format in [`FontKind::PROBE_ORDER`] whose signature matches.
    pub fn detect(bytes: &[u8]) -> Option<FontKind> {
        FontKind::PROBE_ORDER
            .into_iter()
            .find(|kind| kind.detect(bytes))
    }

    /// Decode a font from raw bytes. ZIP archives (PK3) are searched for the
    /// first entry that holds a supported font.
    pub fn load(bytes: &[u8]) -> Result<Font> {
        #[cfg(feature = "zip")]
        if bytes.starts_with(b"PK\x03\x04") {
            return Self::load_from_zip(bytes);
        }
        let kind = Self::detect(bytes).ok_or(FontError::UnsupportedFormat)?;
        Self::load_as(kind, bytes)
    }

    pub fn load_as(kind: FontKind, bytes: &[u8]) -> Result<Font> {
        Ok(match kind {
            FontKind::Fon2 => Font::Fon2(Fon2Font::from_bytes(bytes)?),
            FontKind::Fon1 => Font::Fon1(Fon1Font::from_bytes(bytes)?),
            FontKind::Bmf => Font::Bmf(BmfFont::from_bytes(bytes)?),
        })
    }

    pub fn read<R: Read>(mut reader: R) -> Result<Font> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::load(&buf)
    }

    #[cfg(feature = "zip")]
    fn load_from_zip(bytes: &[u8]) -> Result<Font> {
        use std::io::Cursor;
        use zip::ZipArchive;

        const FONT_EXTENSIONS: [&str; 4] = [".fon", ".fnt", ".bmf", ".lmp"];

        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| FontError::Archive(format!("zip open error: {e}")))?;
        let mut candidates = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| FontError::Archive(format!("zip entry error: {e}")))?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_ascii_lowercase();
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .map_err(|e| FontError::Archive(format!("zip read error in {name}: {e}")))?;
            let Some(kind) = Self::detect(&buf) else {
                continue;
            };
            let preferred = FONT_EXTENSIONS.iter().any(|ext| name.ends_with(ext));
            log::debug!("zip: {name} looks like a {} font", kind.name());
            candidates.push((preferred, kind, buf));
        }
        // font extensions first, archive order otherwise
        candidates.sort_by_key(|(preferred, _, _)| !*preferred);
        let (_, kind, buf) = candidates
            .into_iter()
            .next()
            .ok_or(FontError::UnsupportedFormat)?;
        Self::load_as(kind, &buf)
    }

    pub fn kind(&self) -> FontKind {
        match self {
            Font::Fon2(_) => FontKind::Fon2,
            Font::Fon1(_) => FontKind::Fon1,
            Font::Bmf(_) => FontKind::Bmf,
        }
    }

    pub fn is_ready(&self) -> bool {
        match self {
            Font::Fon2(f) => f.is_ready(),
            Font::Fon1(f) => f.is_ready(),
            Font::Bmf(f) => f.is_ready(),
        }
    }

    pub fn glyph(&self, code: u8) -> Option<&Glyph> {
        self.glyphs().get(code)
    }

    pub fn glyphs(&self) -> &GlyphSet {
        match self {
            Font::Fon2(f) => f.glyphs(),
            Font::Fon1(f) => f.glyphs(),
            Font::Bmf(f) => f.glyphs(),
        }
    }

    pub fn palette(&self) -> &Palette {
        match self {
            Font::Fon2(f) => f.palette(),
            Font::Fon1(f) => f.palette(),
            Font::Bmf(f) => f.palette(),
        }
    }

    pub fn metrics(&self) -> &FontMetrics {
        match self {
            Font::Fon2(f) => f.metrics(),
            Font::Fon1(f) => f.metrics(),
            Font::Bmf(f) => f.metrics(),
        }
    }

    pub fn color_lookup(&self) -> ColorLookup {
        match self {
            Font::Fon2(f) => f.color_lookup(),
            Font::Fon1(f) => f.color_lookup(),
            Font::Bmf(f) => f.color_lookup(),
        }
    }

    /// RGBA8 preview of one glyph, `None` for undefined or blank glyphs.
    pub fn render_rgba(&self, code: u8) -> Option<Vec<u8>> {
        let glyph = self.glyph(code).filter(|g| !g.is_blank())?;
        Some(glyph.to_rgba(self.palette(), self.color_lookup()))
    }
}
