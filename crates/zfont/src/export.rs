//! Turns a decoded [`Font`] into the files of a GZDoom Unicode font folder:
//! one indexed PNG per glyph or per sprite sheet, plus `font.inf`.
use once_cell::sync::Lazy;

use crate::{
    codepage::{windows_1252, Codepage},
    glyph::Glyph,
    palette::Palette,
    png::PngChunkList,
    Font, Result,
};

pub const FONT_INFO_NAME: &str = "font.inf";

const MAX_BLOCK_SIZE: u16 = 256;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Maps font bytes to the Unicode code points used as file names.
    pub codepage: Codepage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Range of code points laid out on one sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnicodeBlock {
    pub start: u16,
    pub size: u16,
}

/// FON1 bytes 0x80..=0x9F are Windows-1252, so the 256 characters spread
/// over several Unicode ranges.
pub static FON1_BLOCKS: Lazy<Vec<UnicodeBlock>> =
    Lazy::new(|| unicode_blocks((0..=255u8).map(windows_1252)));

/// Groups code points into blocks no wider than 256.
pub fn unicode_blocks(code_points: impl IntoIterator<Item = u16>) -> Vec<UnicodeBlock> {
    let mut code_points: Vec<u16> = code_points.into_iter().collect();
    code_points.sort_unstable();
    code_points.dedup();
    let Some((&first, rest)) = code_points.split_first() else {
        return Vec::new();
    };
    let mut blocks = Vec::new();
    let (mut start, mut last) = (first, first);
    for &cp in rest {
        if cp as u32 >= start as u32 + MAX_BLOCK_SIZE as u32 {
            blocks.push(UnicodeBlock {
                start,
                size: last - start + 1,
            });
            start = cp;
        }
        last = cp;
    }
    blocks.push(UnicodeBlock {
        start,
        size: last - start + 1,
    });
    blocks
}

/// Near-square grid for `count` cells: `(rows, cols)`.
pub fn sheet_grid(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let mut rows = (count as f64).sqrt() as usize;
    // guard against float rounding on perfect squares
    while (rows + 1) * (rows + 1) <= count {
        rows += 1;
    }
    while rows * rows > count {
        rows -= 1;
    }
    (rows, count.div_ceil(rows))
}

/// PNG for a single glyph. Non-zero glyph offsets become a negated `grAB`.
pub fn glyph_png(glyph: &Glyph, palette: &Palette) -> Result<PngChunkList> {
    let mut png = PngChunkList::from_raster(
        glyph.width as u32,
        glyph.height as u32,
        palette,
        Palette::TRANSPARENT,
        &glyph.pixels,
    )?;
    if glyph.x_offset != 0 || glyph.y_offset != 0 {
        png.set_offset(-glyph.x_offset, -glyph.y_offset);
    }
    Ok(png)
}

fn png_name(code_point: u16) -> String {
    format!("{code_point:04X}.png")
}

pub fn export_font(font: &Font, options: &ExportOptions) -> Result<Vec<ExportedFile>> {
    if !font.is_ready() {
        return Ok(Vec::new());
    }
    let mut files = match font {
        Font::Fon1(f) => export_sheets(
            font,
            &FON1_BLOCKS,
            (f.cell_width(), f.cell_height()),
            windows_1252,
        )?,
        Font::Fon2(f) if f.metrics().monospace => {
            let to_unicode = |code| options.codepage.to_unicode(code);
            let blocks = unicode_blocks((f.first_char..=f.last_char).map(to_unicode));
            let cell = (
                f.metrics().cell_width.unwrap_or(0) as usize,
                f.metrics().font_height as usize,
            );
            export_sheets(font, &blocks, cell, to_unicode)?
        }
        Font::Fon2(_) | Font::Bmf(_) => export_glyphs(font, options)?,
    };
    if !files.is_empty() {
        files.push(ExportedFile {
            name: FONT_INFO_NAME.to_string(),
            bytes: font.metrics().describe().into_bytes(),
        });
    }
    log::debug!("export: {} {} files", font.kind().name(), files.len());
    Ok(files)
}

/// `glyph` with every pixel passed through the font's colour lookup, so the
/// raster only holds indices inside the palette.
fn resolved(font: &Font, glyph: &Glyph) -> Glyph {
    let (palette, lookup) = (font.palette(), font.color_lookup());
    let pixels = glyph
        .pixels
        .iter()
        .map(|p| palette.resolve(*p, lookup).unwrap_or(Palette::TRANSPARENT) as u8)
        .collect();
    Glyph {
        pixels,
        ..glyph.clone()
    }
}

fn export_glyphs(font: &Font, options: &ExportOptions) -> Result<Vec<ExportedFile>> {
    let crop = matches!(font, Font::Fon2(_));
    let mut files = Vec::new();
    for (code, glyph) in font.glyphs().iter() {
        if glyph.is_blank() {
            continue;
        }
        let glyph = resolved(font, glyph);
        let glyph = if crop {
            match glyph.cropped_vertically() {
                Some(cropped) => cropped,
                None => continue,
            }
        } else {
            glyph
        };
        let png = glyph_png(&glyph, font.palette())?;
        files.push(ExportedFile {
            name: png_name(options.codepage.to_unicode(code)),
            bytes: png.to_bytes(),
        });
    }
    Ok(files)
}

/// Copies `glyph` into cell `(col, row)` of a sheet `sheet_width` wide.
fn blit(sheet: &mut [u8], sheet_width: usize, glyph: &Glyph, col: usize, row: usize) {
    let (x0, y0) = (col * glyph.width, row * glyph.height);
    for (y, line) in glyph.rows().enumerate() {
        let at = (y0 + y) * sheet_width + x0;
        sheet[at..at + line.len()].copy_from_slice(line);
    }
}

/// One near-square sheet per block, each glyph placed at its code point's
/// offset from the block start. Used for fixed-size cells only.
fn export_sheets(
    font: &Font,
    blocks: &[UnicodeBlock],
    (cell_w, cell_h): (usize, usize),
    to_unicode: impl Fn(u8) -> u16,
) -> Result<Vec<ExportedFile>> {
    if cell_w == 0 || cell_h == 0 {
        return Ok(Vec::new());
    }
    let grids: Vec<(usize, usize)> = blocks.iter().map(|b| sheet_grid(b.size as usize)).collect();
    let mut sheets: Vec<Vec<u8>> = grids
        .iter()
        .map(|(rows, cols)| vec![0u8; rows * cell_h * cols * cell_w])
        .collect();

    for (code, glyph) in font.glyphs().iter() {
        let cp = to_unicode(code);
        let Some(index) = blocks.iter().rposition(|b| b.start <= cp) else {
            continue;
        };
        let (rows, cols) = grids[index];
        let pos = (cp - blocks[index].start) as usize;
        if pos >= rows * cols {
            continue;
        }
        blit(
            &mut sheets[index],
            cols * cell_w,
            &resolved(font, glyph),
            pos % cols,
            pos / cols,
        );
    }

    blocks
        .iter()
        .zip(grids)
        .zip(sheets)
        .map(|((block, (rows, cols)), pixels)| {
            let png = PngChunkList::from_raster(
                (cols * cell_w) as u32,
                (rows * cell_h) as u32,
                font.palette(),
                Palette::TRANSPARENT,
                &pixels,
            )?;
            Ok(ExportedFile {
                name: png_name(block.start),
                bytes: png.to_bytes(),
            })
        })
        .collect()
}
