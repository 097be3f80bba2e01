//! Test support utilities for zfont.
//!
//! Builders that assemble BMF, FON1, FON2, WAD and Doom picture byte streams
//! in memory, so tests and benchmarks don't need binary fixtures.

use crate::{bmf::BMF_MAGIC, fon1::FON1_MAGIC, fon2::FON2_MAGIC, Rgb};

/// Encodes `pixels` with the FON1/FON2 run-length scheme: runs of three or
/// more equal bytes become repeats, everything else literal runs.
pub fn rle_encode(pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut literals: Vec<u8> = Vec::new();
    let flush = |literals: &mut Vec<u8>, out: &mut Vec<u8>| {
        for chunk in literals.chunks(128) {
            out.push((chunk.len() - 1) as u8);
            out.extend(chunk);
        }
        literals.clear();
    };
    let mut i = 0;
    while i < pixels.len() {
        let value = pixels[i];
        let run = pixels[i..]
            .iter()
            .take(128)
            .take_while(|p| **p == value)
            .count();
        if run >= 3 {
            flush(&mut literals, &mut out);
            out.push((-(run as i16 - 1)) as i8 as u8);
            out.push(value);
            i += run;
        } else {
            literals.push(value);
            i += 1;
        }
    }
    flush(&mut literals, &mut out);
    out
}

/// One BMF character record.
#[derive(Clone, Debug, Default)]
pub struct BmfChar {
    pub code: u8,
    pub width: u8,
    pub height: u8,
    pub x_offset: i8,
    pub y_offset: i8,
    pub shift: u8,
    pub pixels: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct BmfBuilder {
    pub line_height: u8,
    pub kerning: i8,
    pub largest_used_color: u8,
    /// 6-bit VGA colours, entry 0 excluded
    pub colors: Vec<[u8; 3]>,
    pub info: Vec<u8>,
    pub chars: Vec<BmfChar>,
}

impl BmfBuilder {
    pub fn build(&self) -> Vec<u8> {
        let mut out = BMF_MAGIC.to_vec();
        out.push(0x11); // version
        out.push(self.line_height);
        out.extend([0, 0]);
        out.push(self.kerning as u8);
        out.push(0);
        out.push(self.colors.len() as u8);
        out.push(self.largest_used_color);
        out.extend([0; 4]);
        out.push(self.colors.len() as u8);
        for c in &self.colors {
            out.extend(c);
        }
        out.push(self.info.len() as u8);
        out.extend(&self.info);
        out.extend((self.chars.len() as u16).to_le_bytes());
        for c in &self.chars {
            out.extend([
                c.code,
                c.width,
                c.height,
                c.x_offset as u8,
                c.y_offset as u8,
                c.shift,
            ]);
            out.extend(&c.pixels);
        }
        out
    }
}

/// FON1 with the same raster for every character unless overridden.
pub fn fon1_bytes(width: u16, height: u16, glyph: impl Fn(u8) -> Vec<u8>) -> Vec<u8> {
    let mut out = FON1_MAGIC.to_vec();
    out.extend(width.to_le_bytes());
    out.extend(height.to_le_bytes());
    for code in 0..=255u8 {
        out.extend(rle_encode(&glyph(code)));
    }
    out
}

#[derive(Clone, Debug, Default)]
pub struct Fon2Builder {
    pub font_height: u16,
    pub first_char: u8,
    pub monospace: bool,
    pub kerning: Option<i16>,
    /// Entry 0 included
    pub palette: Vec<Rgb>,
    /// `(width, pixels)` per character starting at `first_char`
    pub chars: Vec<(u16, Vec<u8>)>,
}

impl Fon2Builder {
    pub fn build(&self) -> Vec<u8> {
        let mut out = FON2_MAGIC.to_vec();
        out.extend(self.font_height.to_le_bytes());
        out.push(self.first_char);
        out.push(self.first_char + (self.chars.len() as u8).saturating_sub(1));
        out.push(self.monospace as u8);
        out.push(0); // shading
        out.push((self.palette.len() as u8).wrapping_sub(1));
        match self.kerning {
            Some(k) => {
                out.push(1);
                out.extend(k.to_le_bytes());
            }
            None => out.push(0),
        }
        if self.monospace {
            out.extend(self.chars.first().map(|c| c.0).unwrap_or(0).to_le_bytes());
        } else {
            for (width, _) in &self.chars {
                out.extend(width.to_le_bytes());
            }
        }
        for c in &self.palette {
            out.extend([c.r, c.g, c.b]);
        }
        for (_, pixels) in &self.chars {
            out.extend(rle_encode(pixels));
        }
        out
    }
}

/// PWAD with the given lumps, directory at the end.
pub fn wad_bytes(lumps: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = b"PWAD".to_vec();
    out.extend((lumps.len() as u32).to_le_bytes());
    let data_len: usize = lumps.iter().map(|(_, d)| d.len()).sum();
    out.extend(((12 + data_len) as u32).to_le_bytes());
    let mut offsets = Vec::new();
    for (_, data) in lumps {
        offsets.push(out.len() as u32);
        out.extend(*data);
    }
    for ((name, data), offset) in lumps.iter().zip(offsets) {
        out.extend(offset.to_le_bytes());
        out.extend((data.len() as u32).to_le_bytes());
        let mut raw = [0u8; 8];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        out.extend(raw);
    }
    out
}

/// Doom picture; each column is a list of `(top_delta, pixels)` posts.
pub fn picture_bytes(
    width: u16,
    height: u16,
    x_offset: i16,
    y_offset: i16,
    columns: &[Vec<(u8, Vec<u8>)>],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend(width.to_le_bytes());
    out.extend(height.to_le_bytes());
    out.extend(x_offset.to_le_bytes());
    out.extend(y_offset.to_le_bytes());
    let table_at = out.len();
    out.extend(vec![0u8; columns.len() * 4]);
    for (i, posts) in columns.iter().enumerate() {
        let offset = out.len() as u32;
        out[table_at + i * 4..table_at + i * 4 + 4].copy_from_slice(&offset.to_le_bytes());
        for (top, pixels) in posts {
            out.push(*top);
            out.push(pixels.len() as u8);
            out.push(0);
            out.extend(pixels);
            out.push(0);
        }
        out.push(0xFF);
    }
    out
}
