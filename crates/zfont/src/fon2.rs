//! FON2: ZDoom's paletted font format with a contiguous character range.
//!
//! ```text
//! "FON2"
//! u16 font height
//! u8  first char, u8 last char
//! u8  constant width flag
//! u8  shading type (unused)
//! u8  palette size - 1
//! u8  flags; bit 0: a kerning value follows
//! [i16 kerning]
//! u16 widths[count]  or  u16 width for constant width fonts
//! palette: (palette size) RGB triples, entry 0 is transparent
//! RLE glyph data, one raster of width * height per character
//! ```
use crate::{
    error::{FontError, Result},
    glyph::{average_space_width, FontMetrics, Glyph, GlyphSet},
    palette::{ColorLookup, Palette},
    reader::ByteReader,
    rle,
};

pub const FON2_MAGIC: &[u8; 4] = b"FON2";

const FLAG_KERNING: u8 = 0x01;

#[derive(Clone, Debug)]
pub struct Fon2Font {
    pub first_char: u8,
    pub last_char: u8,
    widths: Vec<u16>,
    palette: Palette,
    glyphs: GlyphSet,
    metrics: FontMetrics,
    pub truncated: bool,
}

impl Fon2Font {
    pub fn detect(bytes: &[u8]) -> bool {
        bytes.starts_with(FON2_MAGIC)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !Self::detect(bytes) {
            return Err(FontError::FormatMismatch("FON2"));
        }
        let mut r = ByteReader::at(bytes, FON2_MAGIC.len())?;
        let font_height = r.u16_le("fon2 font height")?;
        let first_char = r.u8("fon2 first char")?;
        let last_char = r.u8("fon2 last char")?;
        if last_char < first_char {
            return Err(FontError::MalformedHeader(format!(
                "fon2 character range {first_char}..={last_char} is empty"
            )));
        }
        let count = (last_char - first_char) as usize + 1;
        let monospace = r.u8("fon2 constant width flag")? != 0;
        r.skip(1, "fon2 shading type")?;
        let palette_size = r.u8("fon2 palette size")? as usize + 1;
        let flags = r.u8("fon2 flags")?;
        let global_kerning = if flags & FLAG_KERNING != 0 {
            r.i16_le("fon2 kerning")? as i32
        } else {
            0
        };
        let widths = if monospace {
            vec![r.u16_le("fon2 constant width")?; count]
        } else {
            (0..count)
                .map(|_| r.u16_le("fon2 character widths"))
                .collect::<Result<Vec<_>>>()?
        };
        let space_width = space_width(first_char, last_char, &widths);

        let palette = Palette::from_rgb_bytes(r.bytes(palette_size * 3, "fon2 palette")?);

        let mut glyphs = GlyphSet::new();
        let mut truncated = false;
        for (i, width) in widths.iter().enumerate() {
            let code = first_char + i as u8;
            let expanded = rle::expand(&mut r, *width as usize * font_height as usize);
            if expanded.truncated && !truncated {
                log::warn!("fon2: glyph data ends inside character {code}, zero filling the rest");
                truncated = true;
            }
            if *width > 0 {
                glyphs.insert(
                    code,
                    Glyph::new(*width as usize, font_height as usize, expanded.pixels),
                );
            }
        }
        log::debug!(
            "fon2: chars {first_char}..={last_char}, {} palette entries, space width {space_width}",
            palette.len()
        );

        Ok(Self {
            first_char,
            last_char,
            metrics: FontMetrics {
                font_height: font_height as u32,
                space_width,
                global_kerning,
                monospace,
                cell_width: monospace.then(|| widths[0] as u32),
                console_translation: false,
            },
            widths,
            palette,
            glyphs,
            truncated,
        })
    }

    pub fn is_ready(&self) -> bool {
        !self.glyphs.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.widths.len()
    }

    pub fn width_of(&self, code: u8) -> Option<u16> {
        let index = code.checked_sub(self.first_char)? as usize;
        self.widths.get(index).copied()
    }

    pub fn glyph(&self, code: u8) -> Option<&Glyph> {
        self.glyphs.get(code)
    }

    pub fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn color_lookup(&self) -> ColorLookup {
        ColorLookup::ZeroTransparent
    }
}

fn space_width(first: u8, last: u8, widths: &[u16]) -> u32 {
    if first == b' ' {
        widths[0] as u32
    } else if first < b' ' && last >= b' ' {
        widths[(b' ' - first) as usize] as u32
    } else if first <= b'N' && last >= b'N' {
        (widths[(b'N' - first) as usize] as u32 + 1) / 2
    } else {
        average_space_width(widths.iter().map(|w| *w as u32))
    }
}
