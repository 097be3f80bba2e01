use pretty_assertions::assert_eq;
use zfont::{
    bmf::BmfFont,
    export_font,
    palette::VGA_TO_RGB,
    test_support::{BmfBuilder, BmfChar},
    ColorLookup, ExportOptions, Font, FontError, Rgb,
};

fn two_color_font(chars: Vec<BmfChar>) -> Vec<u8> {
    BmfBuilder {
        line_height: 8,
        kerning: -1,
        largest_used_color: 0,
        colors: vec![[63, 0, 0]],
        info: b"made by hand".to_vec(),
        chars,
    }
    .build()
}

#[test]
fn bmf_detects_magic_only() {
    assert!(BmfFont::detect(&two_color_font(vec![])));
    assert!(!BmfFont::detect(b"FON2"));
    assert!(matches!(
        BmfFont::from_bytes(b"nope"),
        Err(FontError::FormatMismatch(_))
    ));
}

#[test]
fn bmf_header_and_glyph() {
    let bytes = two_color_font(vec![BmfChar {
        code: b'A',
        width: 2,
        height: 3,
        x_offset: -1,
        y_offset: 2,
        shift: 3,
        pixels: vec![0, 1, 1, 0, 1, 1],
    }]);
    let font = BmfFont::from_bytes(&bytes).unwrap();
    assert!(font.is_ready());
    assert_eq!(font.metrics().font_height, 8);
    assert_eq!(font.metrics().global_kerning, -1);
    assert_eq!(font.palette().len(), 2);
    assert_eq!(font.palette().get(1), Some(Rgb::new(255, 0, 0)));

    let glyph = font.glyph(b'A').unwrap();
    assert_eq!((glyph.width, glyph.height), (2, 3));
    assert_eq!((glyph.x_offset, glyph.y_offset), (-1, 2));
    assert_eq!(glyph.advance, Some(3));
    // the shift, not the raster width, drives the pen
    assert_eq!(glyph.advance(), 3);
    assert_eq!(glyph.pixels, vec![0, 1, 1, 0, 1, 1]);
    assert!(font.glyph(b'B').is_none());
}

#[test]
fn bmf_space_glyph_sets_space_width_even_if_blank() {
    let bytes = two_color_font(vec![BmfChar {
        code: b' ',
        shift: 5,
        ..Default::default()
    }]);
    let font = Font::load(&bytes).unwrap();
    assert_eq!(font.metrics().space_width, 5);
    assert!(font.glyph(b' ').unwrap().is_blank());
    assert!(export_font(&font, &ExportOptions::default())
        .unwrap()
        .is_empty());
}

#[test]
fn bmf_space_wins_over_n_in_any_order() {
    let n = BmfChar {
        code: b'N',
        width: 1,
        height: 1,
        shift: 9,
        pixels: vec![1],
        ..Default::default()
    };
    let space = BmfChar {
        code: b' ',
        shift: 4,
        ..Default::default()
    };
    for chars in [vec![n.clone(), space.clone()], vec![space, n]] {
        let font = BmfFont::from_bytes(&two_color_font(chars)).unwrap();
        assert_eq!(font.metrics().space_width, 4);
    }
}

#[test]
fn bmf_space_width_falls_back_to_n_then_average() {
    let glyph = |code, width: u8, shift| BmfChar {
        code,
        width,
        height: 1,
        shift,
        pixels: vec![1; width as usize],
        ..Default::default()
    };
    let font = BmfFont::from_bytes(&two_color_font(vec![glyph(b'N', 6, 7)])).unwrap();
    assert_eq!(font.metrics().space_width, 7);

    // (4 + 5) * 2 / (2 * 3) = 3
    let font =
        BmfFont::from_bytes(&two_color_font(vec![glyph(b'a', 4, 0), glyph(b'b', 5, 0)])).unwrap();
    assert_eq!(font.metrics().space_width, 3);
}

#[test]
fn bmf_duplicate_codes_keep_the_last() {
    let first = BmfChar {
        code: b'x',
        width: 1,
        height: 1,
        shift: 1,
        pixels: vec![1],
        ..Default::default()
    };
    let second = BmfChar {
        width: 2,
        pixels: vec![1, 1],
        ..first.clone()
    };
    let font = BmfFont::from_bytes(&two_color_font(vec![first, second])).unwrap();
    assert_eq!(font.glyphs().len(), 1);
    assert_eq!(font.glyph(b'x').unwrap().width, 2);
}

#[test]
fn bmf_truncated_pixels_are_an_error() {
    let mut bytes = two_color_font(vec![BmfChar {
        code: b'A',
        width: 4,
        height: 4,
        pixels: vec![1; 16],
        ..Default::default()
    }]);
    bytes.truncate(bytes.len() - 3);
    assert!(matches!(
        BmfFont::from_bytes(&bytes),
        Err(FontError::Truncated { .. })
    ));
}

#[test]
fn bmf_no_characters_is_not_ready() {
    let font = BmfFont::from_bytes(&two_color_font(vec![])).unwrap();
    assert!(!font.is_ready());
}

#[test]
fn bmf_palette_uses_vga_scaling() {
    let bytes = BmfBuilder {
        colors: vec![[0, 32, 63], [1, 2, 3]],
        ..Default::default()
    }
    .build();
    let font = BmfFont::from_bytes(&bytes).unwrap();
    assert_eq!(
        font.palette().get(1),
        Some(Rgb::new(0, VGA_TO_RGB(32), 255))
    );
    assert_eq!(
        font.palette().get(2),
        Some(Rgb::new(VGA_TO_RGB(1), VGA_TO_RGB(2), VGA_TO_RGB(3)))
    );
}

#[test]
fn bmf_color_lookup_clamps_to_largest_used() {
    let bytes = BmfBuilder {
        largest_used_color: 3,
        colors: vec![[1, 1, 1], [2, 2, 2], [3, 3, 3], [4, 4, 4]],
        ..Default::default()
    }
    .build();
    let font = BmfFont::from_bytes(&bytes).unwrap();
    let palette = font.palette();
    let lookup = font.color_lookup();
    assert_eq!(lookup, ColorLookup::LargestUsed(3));
    for i in 0..=255u8 {
        let resolved = palette.resolve(i, lookup).unwrap();
        assert_eq!(resolved, (i as usize).min(2));
        assert!(resolved < palette.len());
    }
}
