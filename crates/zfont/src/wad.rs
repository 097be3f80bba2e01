//! Doom IWAD/PWAD lump container.
use std::collections::HashMap;

use crate::{
    error::{FontError, Result},
    palette::Palette,
    reader::ByteReader,
};

pub const IWAD_MAGIC: &[u8; 4] = b"IWAD";
pub const PWAD_MAGIC: &[u8; 4] = b"PWAD";

const LUMP_NAME_LEN: usize = 8;
const PLAYPAL: &str = "PLAYPAL";
const PLAYPAL_LEN: usize = 256 * 3;

/// Location of a lump inside the WAD data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WadLump {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WadKind {
    Iwad,
    Pwad,
}

/// A WAD file held in memory with its lump directory.
#[derive(Clone, Debug)]
pub struct DoomWad {
    kind: WadKind,
    data: Vec<u8>,
    entries: Vec<WadLump>,
    directory: HashMap<String, usize>,
}

impl DoomWad {
    pub fn detect(bytes: &[u8]) -> bool {
        bytes.starts_with(IWAD_MAGIC) || bytes.starts_with(PWAD_MAGIC)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let kind = if data.starts_with(IWAD_MAGIC) {
            WadKind::Iwad
        } else if data.starts_with(PWAD_MAGIC) {
            WadKind::Pwad
        } else {
            return Err(FontError::FormatMismatch("IWAD/PWAD"));
        };
        let mut r = ByteReader::at(&data, 4)?;
        let lump_count = r.u32_le("wad lump count")?;
        let directory_offset = r.u32_le("wad directory offset")?;

        let mut r = ByteReader::at(&data, directory_offset as usize)?;
        let mut entries = Vec::with_capacity((lump_count as usize).min(r.remaining() / 16));
        let mut directory = HashMap::new();
        for _ in 0..lump_count {
            let offset = r.u32_le("wad lump offset")?;
            let size = r.u32_le("wad lump size")?;
            let name = lump_name(&r.array::<LUMP_NAME_LEN>("wad lump name")?);
            // later lumps override earlier ones of the same name
            if let Some(previous) = directory.insert(name.clone(), entries.len()) {
                log::debug!("wad: lump {name} (entry {previous}) replaced by a later one");
            }
            entries.push(WadLump { name, offset, size });
        }

        Ok(Self {
            kind,
            data,
            entries,
            directory,
        })
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// All directory entries in file order, duplicates included.
    pub fn lumps(&self) -> &[WadLump] {
        &self.entries
    }

    pub fn find(&self, name: &str) -> Option<&WadLump> {
        self.directory.get(name).map(|i| &self.entries[*i])
    }

    /// Bytes of the named lump, `Ok(None)` if the WAD has no such lump.
    pub fn lump(&self, name: &str) -> Result<Option<&[u8]>> {
        let Some(lump) = self.find(name) else {
            return Ok(None);
        };
        let mut r = ByteReader::at(&self.data, lump.offset as usize)?;
        Ok(Some(r.bytes(lump.size as usize, "wad lump data")?))
    }

    /// First palette of the `PLAYPAL` lump.
    pub fn playpal(&self) -> Result<Option<Palette>> {
        let Some(bytes) = self.lump(PLAYPAL)? else {
            return Ok(None);
        };
        if bytes.len() < PLAYPAL_LEN {
            return Err(FontError::Truncated { what: "PLAYPAL" });
        }
        Ok(Some(Palette::from_rgb_bytes(&bytes[..PLAYPAL_LEN])))
    }
}

fn lump_name(raw: &[u8; LUMP_NAME_LEN]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(LUMP_NAME_LEN);
    raw[..end].iter().map(|b| *b as char).collect()
}
