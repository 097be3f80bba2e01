use pretty_assertions::assert_eq;
use zfont::{
    picture::Post,
    test_support::{picture_bytes, wad_bytes},
    wad::WadKind,
    DoomPicture, DoomWad, FontError, Palette, Rgb,
};

fn playpal() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, 255 - i, i / 2]).collect()
}

#[test]
fn wad_lists_and_reads_lumps() {
    let wad = DoomWad::from_bytes(wad_bytes(&[
        ("MAP01", b""),
        ("THINGS", &[1, 2, 3]),
        ("LONGNAME", &[9; 4]),
    ]))
    .unwrap();
    assert_eq!(wad.kind(), WadKind::Pwad);
    let names: Vec<&str> = wad.lumps().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["MAP01", "THINGS", "LONGNAME"]);
    assert_eq!(wad.lump("THINGS").unwrap(), Some(&[1u8, 2, 3][..]));
    assert_eq!(wad.lump("LONGNAME").unwrap(), Some(&[9u8; 4][..]));
    assert_eq!(wad.lump("MAP01").unwrap(), Some(&[][..]));
    assert_eq!(wad.lump("NOPE").unwrap(), None);
}

#[test]
fn wad_later_duplicate_wins() {
    let wad = DoomWad::from_bytes(wad_bytes(&[("TITLEPIC", &[1]), ("TITLEPIC", &[2, 2])]))
        .unwrap();
    assert_eq!(wad.lumps().len(), 2);
    assert_eq!(wad.lump("TITLEPIC").unwrap(), Some(&[2u8, 2][..]));
}

#[test]
fn wad_rejects_bad_magic_and_short_directory() {
    assert!(matches!(
        DoomWad::from_bytes(b"ZWAD\0\0\0\0\0\0\0\0".to_vec()),
        Err(FontError::FormatMismatch(_))
    ));
    let mut bytes = wad_bytes(&[("A", &[1])]);
    bytes.truncate(bytes.len() - 4);
    assert!(matches!(
        DoomWad::from_bytes(bytes),
        Err(FontError::Truncated { .. })
    ));
}

#[test]
fn wad_lump_out_of_bounds_is_truncated() {
    let mut bytes = wad_bytes(&[("A", &[1, 2])]);
    // directory entry size field
    let dir = bytes.len() - 16;
    bytes[dir + 4..dir + 8].copy_from_slice(&100u32.to_le_bytes());
    let wad = DoomWad::from_bytes(bytes).unwrap();
    assert!(matches!(wad.lump("A"), Err(FontError::Truncated { .. })));
}

#[test]
fn wad_playpal_is_first_palette() {
    let mut lump = playpal();
    // a second palette that must be ignored
    lump.extend([7u8; 768]);
    let wad = DoomWad::from_bytes(wad_bytes(&[("PLAYPAL", &lump[..])])).unwrap();
    let palette = wad.playpal().unwrap().unwrap();
    assert_eq!(palette.len(), 256);
    assert_eq!(palette.get(10), Some(Rgb::new(10, 245, 5)));
    assert_eq!(palette.get(255), Some(Rgb::new(255, 0, 127)));

    let empty = DoomWad::from_bytes(wad_bytes(&[])).unwrap();
    assert!(empty.playpal().unwrap().is_none());
}

#[test]
fn picture_header_and_posts() {
    let bytes = picture_bytes(
        2,
        4,
        -1,
        3,
        &[vec![(0, vec![5, 6])], vec![(1, vec![7]), (3, vec![8])]],
    );
    let picture = DoomPicture::parse(&bytes).unwrap();
    assert_eq!((picture.width, picture.height), (2, 4));
    assert_eq!((picture.x_offset, picture.y_offset), (-1, 3));
    assert_eq!(
        picture.column(1).unwrap(),
        vec![
            Post {
                y: 1,
                pixels: vec![7]
            },
            Post {
                y: 3,
                pixels: vec![8]
            },
        ]
    );
    assert_eq!(
        picture.to_indexed(255).unwrap(),
        vec![5, 255, 6, 7, 255, 255, 255, 8]
    );
}

#[test]
fn picture_tall_patch_delta_is_relative() {
    let bytes = picture_bytes(1, 20, 0, 0, &[vec![(10, vec![1; 5]), (5, vec![2; 2])]]);
    let picture = DoomPicture::parse(&bytes).unwrap();
    let posts = picture.column(0).unwrap();
    assert_eq!(posts.iter().map(|p| p.y).collect::<Vec<_>>(), vec![10, 15]);

    let indexed = picture.to_indexed(0).unwrap();
    assert_eq!(&indexed[10..15], &[1; 5]);
    assert_eq!(&indexed[15..17], &[2; 2]);
    assert_eq!(indexed[17], 0);
}

#[test]
fn picture_posts_past_the_bottom_are_clipped() {
    let bytes = picture_bytes(1, 2, 0, 0, &[vec![(1, vec![4, 4, 4])]]);
    let picture = DoomPicture::parse(&bytes).unwrap();
    assert_eq!(picture.to_indexed(9).unwrap(), vec![9, 4]);
}

#[test]
fn picture_renders_through_palette() {
    let palette = Palette::from_rgb_bytes(&playpal());
    let bytes = picture_bytes(2, 1, 0, 0, &[vec![(0, vec![3])], vec![]]);
    let picture = DoomPicture::parse(&bytes).unwrap();
    assert_eq!(
        picture.render_rgba(&palette).unwrap(),
        vec![3, 252, 1, 255, 0, 0, 0, 0]
    );
}

#[test]
fn picture_truncated_column_table_is_an_error() {
    let bytes = picture_bytes(3, 1, 0, 0, &[vec![], vec![], vec![]]);
    assert!(matches!(
        DoomPicture::parse(&bytes[..12]),
        Err(FontError::Truncated { .. })
    ));
    assert!(DoomPicture::parse(&bytes).unwrap().column(3).is_err());
}
