//! Run-length scheme used by FON1 and FON2 glyph data.
use crate::reader::ByteReader;

/// Outcome of expanding one glyph.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Expanded {
    pub pixels: Vec<u8>,
    /// The input ran out before the raster was filled; the tail is zero.
    pub truncated: bool,
}

/// Expands exactly `size` output bytes.
///
/// Control byte `c >= 0` copies `c + 1` literals, `c < 0` repeats the next
/// byte `-c + 1` times and `-128` does nothing. Output past `size` is
/// dropped but its input is still consumed so the next glyph starts at the
/// right place.
pub(crate) fn expand(reader: &mut ByteReader<'_>, size: usize) -> Expanded {
    let mut pixels = vec![0u8; size];
    let mut pos = 0usize;
    while pos < size {
        let Ok(code) = reader.i8("rle control byte") else {
            return Expanded {
                pixels,
                truncated: true,
            };
        };
        if code >= 0 {
            let run = code as usize + 1;
            let Ok(literals) = reader.bytes(run, "rle literal run") else {
                // keep whatever is left of the run
                let rest = reader.remaining();
                if let Ok(tail) = reader.bytes(rest, "rle literal run") {
                    let n = tail.len().min(size - pos);
                    pixels[pos..pos + n].copy_from_slice(&tail[..n]);
                }
                return Expanded {
                    pixels,
                    truncated: true,
                };
            };
            let n = run.min(size - pos);
            pixels[pos..pos + n].copy_from_slice(&literals[..n]);
            pos += run;
        } else if code != -128 {
            let run = (-(code as i16)) as usize + 1;
            let Ok(value) = reader.u8("rle repeat value") else {
                return Expanded {
                    pixels,
                    truncated: true,
                };
            };
            let n = run.min(size - pos);
            pixels[pos..pos + n].fill(value);
            pos += run;
        }
    }
    Expanded {
        pixels,
        truncated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_then_repeat() {
        let data = [1u8, 0x10, 0x20, (-2i8) as u8, 0x30];
        let mut r = ByteReader::new(&data);
        let out = expand(&mut r, 4);
        assert_eq!(out.pixels, vec![0x10, 0x20, 0x30, 0x30]);
        assert!(!out.truncated);
        assert!(r.is_empty());
    }

    #[test]
    fn minus_128_is_a_no_op() {
        let data = [0x80u8, 0x00, 0x07, 0x80, (-1i8) as u8, 0x09];
        let mut r = ByteReader::new(&data);
        let out = expand(&mut r, 3);
        assert_eq!(out.pixels, vec![0x07, 0x09, 0x09]);
    }

    #[test]
    fn overlong_literal_consumes_its_input() {
        // 4 literals into a 2 byte glyph, then the next glyph starts at 0xAA
        let data = [3u8, 1, 2, 3, 4, 0, 0xAA];
        let mut r = ByteReader::new(&data);
        assert_eq!(expand(&mut r, 2).pixels, vec![1, 2]);
        assert_eq!(expand(&mut r, 1).pixels, vec![0xAA]);
    }

    #[test]
    fn end_of_stream_zero_fills() {
        let data = [2u8, 5, 6];
        let mut r = ByteReader::new(&data);
        let out = expand(&mut r, 4);
        assert_eq!(out.pixels, vec![5, 6, 0, 0]);
        assert!(out.truncated);
    }
}
