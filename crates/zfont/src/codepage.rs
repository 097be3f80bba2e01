//! Byte to Unicode mapping used when naming exported glyphs.

/// Windows-1252 code points for bytes 0x80..=0x9F. Undefined bytes map to
/// themselves.
pub const WINDOWS_1252_HIGH: [u16; 32] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x008D, 0x017D, 0x008F, //
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Codepage {
    /// ISO-8859-1: every byte is its own code point
    #[default]
    Latin1,
    Windows1252,
}

impl Codepage {
    pub fn to_unicode(self, byte: u8) -> u16 {
        match self {
            Codepage::Latin1 => byte as u16,
            Codepage::Windows1252 => windows_1252(byte),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Some(Codepage::Latin1),
            "windows-1252" | "windows1252" | "cp1252" => Some(Codepage::Windows1252),
            _ => None,
        }
    }
}

pub fn windows_1252(byte: u8) -> u16 {
    match byte {
        0x80..=0x9F => WINDOWS_1252_HIGH[(byte - 0x80) as usize],
        _ => byte as u16,
    }
}

impl std::str::FromStr for Codepage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Codepage::from_name(s).ok_or_else(|| format!("unknown codepage {s}"))
    }
}
