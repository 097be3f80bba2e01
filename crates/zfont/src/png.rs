//! Chunk-level PNG reading and writing.
//!
//! Only what the converter needs: parse an existing file into its chunks,
//! swap the palette, attach a `grAB` offset chunk and write it back, or
//! build a minimal 8-bit indexed image from scratch.
use std::io::Write;

use crate::{
    error::{FontError, Result},
    palette::Palette,
    reader::ByteReader,
};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const IHDR: [u8; 4] = *b"IHDR";
pub const PLTE: [u8; 4] = *b"PLTE";
pub const TRNS: [u8; 4] = *b"tRNS";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";
/// ZDoom's sprite offset chunk: two big endian i32 (x, y).
pub const GRAB: [u8; 4] = *b"grAB";

const COLOR_TYPE_INDEXED: u8 = 3;
const DEFLATE_LEVEL: u8 = 9;

/// CRC32 (reflected `0xEDB88320`, pre and post inverted) over the chunk type
/// followed by its payload.
pub fn chunk_crc(kind: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    hasher.finalize()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngChunk {
    kind: [u8; 4],
    data: Vec<u8>,
    crc: u32,
}

impl PngChunk {
    pub fn new(kind: [u8; 4], data: Vec<u8>) -> Self {
        let crc = chunk_crc(&kind, &data);
        Self { kind, data, crc }
    }

    pub fn kind(&self) -> [u8; 4] {
        self.kind
    }

    pub fn kind_str(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn crc(&self) -> u32 {
        self.crc
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend((self.data.len() as u32).to_be_bytes());
        out.extend(self.kind);
        out.extend(&self.data);
        out.extend(self.crc.to_be_bytes());
    }
}

/// Ordered chunks of one PNG file. `IHDR` is always first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngChunkList {
    chunks: Vec<PngChunk>,
}

impl PngChunkList {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(FontError::FormatMismatch("PNG"));
        }
        let mut r = ByteReader::at(bytes, PNG_SIGNATURE.len())?;
        let mut chunks = Vec::new();
        while !r.is_empty() {
            let len = r.u32_be("png chunk length")? as usize;
            let kind = r.array::<4>("png chunk type")?;
            let data = r.bytes(len, "png chunk data")?.to_vec();
            let found = r.u32_be("png chunk crc")?;
            let expected = chunk_crc(&kind, &data);
            if found != expected {
                return Err(FontError::ChunkCrcMismatch {
                    chunk: String::from_utf8_lossy(&kind).into_owned(),
                    expected,
                    found,
                });
            }
            if kind == IHDR && !chunks.is_empty() {
                return Err(FontError::MalformedHeader(
                    "png: IHDR must be the first and only header chunk".into(),
                ));
            }
            if kind != IHDR && chunks.is_empty() {
                return Err(FontError::MalformedHeader(
                    "png: first chunk is not IHDR".into(),
                ));
            }
            chunks.push(PngChunk {
                kind,
                data,
                crc: found,
            });
        }
        if chunks.is_empty() {
            return Err(FontError::MalformedHeader("png: no chunks".into()));
        }
        Ok(Self { chunks })
    }

    /// Builds an 8-bit indexed image: `IHDR`, `PLTE`/`tRNS`, one `IDAT`,
    /// `IEND`.
    pub fn from_raster(
        width: u32,
        height: u32,
        palette: &Palette,
        transparent: usize,
        pixels: &[u8],
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if expected == 0 || pixels.len() != expected {
            return Err(FontError::InvalidRaster {
                expected,
                found: pixels.len(),
            });
        }

        let mut header = Vec::with_capacity(13);
        header.extend(width.to_be_bytes());
        header.extend(height.to_be_bytes());
        header.push(8); // bit depth
        header.push(COLOR_TYPE_INDEXED);
        header.push(0); // compression
        header.push(0); // filter
        header.push(0); // interlace

        // filter type 0 in front of every row
        let row_len = width as usize;
        let mut filtered = Vec::with_capacity(expected + height as usize);
        for row in pixels.chunks_exact(row_len) {
            filtered.push(0);
            filtered.extend(row);
        }
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, DEFLATE_LEVEL);

        let mut list = Self {
            chunks: vec![PngChunk::new(IHDR, header)],
        };
        list.replace_palette(palette, transparent);
        list.chunks.push(PngChunk::new(IDAT, compressed));
        list.chunks.push(PngChunk::new(IEND, Vec::new()));
        Ok(list)
    }

    pub fn chunks(&self) -> &[PngChunk] {
        &self.chunks
    }

    pub fn find(&self, kind: [u8; 4]) -> Option<&PngChunk> {
        self.chunks.iter().find(|c| c.kind == kind)
    }

    fn position(&self, kind: [u8; 4]) -> Option<usize> {
        self.chunks.iter().position(|c| c.kind == kind)
    }

    /// Index right behind `IHDR` and an offset chunk that sticks to it.
    fn after_header(&self) -> usize {
        match self.chunks.get(1) {
            Some(chunk) if chunk.kind == GRAB => 2,
            _ => 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.header_u32(0)
    }

    pub fn height(&self) -> u32 {
        self.header_u32(4)
    }

    fn header_u32(&self, at: usize) -> u32 {
        self.chunks[0]
            .data
            .get(at..at + 4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_be_bytes)
            .unwrap_or(0)
    }

    /// Swaps in `palette` as `PLTE` plus a `tRNS` that marks `transparent`.
    ///
    /// The pair lands where the old `PLTE` was, or right after the header if
    /// the file had none. `tRNS` only runs up to the transparent entry and is
    /// left out if that index is not in the palette.
    pub fn replace_palette(&mut self, palette: &Palette, transparent: usize) {
        let at = match self.position(PLTE) {
            Some(plte) => {
                plte - self.chunks[..plte]
                    .iter()
                    .filter(|c| c.kind == TRNS)
                    .count()
            }
            None => self.after_header(),
        };
        self.chunks.retain(|c| c.kind != PLTE && c.kind != TRNS);

        let rgb = palette
            .colors()
            .iter()
            .flat_map(|c| [c.r, c.g, c.b])
            .collect::<Vec<_>>();
        let mut insert = vec![PngChunk::new(PLTE, rgb)];
        if transparent < palette.len() {
            let mut alpha = vec![255u8; transparent + 1];
            alpha[transparent] = 0;
            insert.push(PngChunk::new(TRNS, alpha));
        }
        let at = at.min(self.chunks.len());
        self.chunks.splice(at..at, insert);
    }

    /// Writes the `grAB` offset, replacing an existing one in place.
    pub fn set_offset(&mut self, x: i32, y: i32) {
        let mut data = Vec::with_capacity(8);
        data.extend(x.to_be_bytes());
        data.extend(y.to_be_bytes());
        let chunk = PngChunk::new(GRAB, data);
        match self.position(GRAB) {
            Some(existing) => self.chunks[existing] = chunk,
            None => self.chunks.insert(1, chunk),
        }
    }

    pub fn offset(&self) -> Option<(i32, i32)> {
        let data = &self.find(GRAB)?.data;
        let x = i32::from_be_bytes(data.get(0..4)?.try_into().ok()?);
        let y = i32::from_be_bytes(data.get(4..8)?.try_into().ok()?);
        Some((x, y))
    }

    pub fn remove(&mut self, kind: [u8; 4]) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|c| c.kind != kind || c.kind == IHDR);
        before - self.chunks.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            PNG_SIGNATURE.len() + self.chunks.iter().map(|c| c.data.len() + 12).sum::<usize>(),
        );
        out.extend(PNG_SIGNATURE);
        for chunk in &self.chunks {
            chunk.write_to(&mut out);
        }
        out
    }

    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
