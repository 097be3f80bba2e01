use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use zfont::{
    png::PngChunkList,
    test_support::{picture_bytes, wad_bytes, Fon2Builder},
    Palette, Rgb,
};

fn zfont() -> Command {
    Command::cargo_bin("zfont").unwrap()
}

fn fon2() -> Vec<u8> {
    Fon2Builder {
        font_height: 2,
        first_char: b'A',
        monospace: false,
        kerning: None,
        palette: vec![Rgb::new(0, 0, 0), Rgb::new(200, 0, 0)],
        chars: vec![(1, vec![1, 1]), (2, vec![0, 0, 1, 0])],
    }
    .build()
}

#[test]
fn convert_writes_font_folder() {
    let dir = tempdir().unwrap();
    let font = dir.path().join("SMALLFNT.fon");
    fs::write(&font, fon2()).unwrap();
    let out = dir.path().join("out");

    zfont()
        .arg("convert")
        .arg(&font)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success();

    let folder = out.join("fonts").join("SMALLFNT");
    assert!(folder.join("0041.png").is_file());
    assert!(folder.join("0042.png").is_file());
    let inf = fs::read_to_string(folder.join("font.inf")).unwrap();
    assert!(inf.contains("FontHeight 2"));

    // 'B' had its blank top row cropped away
    let b = PngChunkList::parse(&fs::read(folder.join("0042.png")).unwrap()).unwrap();
    assert_eq!(b.offset(), Some((0, -1)));
}

#[test]
fn convert_continues_past_bad_files() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.fon");
    let bad = dir.path().join("bad.fon");
    fs::write(&good, fon2()).unwrap();
    fs::write(&bad, b"definitely not a font").unwrap();
    let out = dir.path().join("out");

    zfont()
        .arg("convert")
        .arg(&bad)
        .arg(&good)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 fonts failed"));

    assert!(out.join("fonts").join("good").join("font.inf").is_file());
}

#[test]
fn inspect_prints_metrics() {
    let dir = tempdir().unwrap();
    let font = dir.path().join("font.fon");
    fs::write(&font, fon2()).unwrap();

    zfont()
        .arg("inspect")
        .arg(&font)
        .assert()
        .success()
        .stdout(predicate::str::contains("FON2 font"))
        .stdout(predicate::str::contains("Defined characters: 2"))
        .stdout(predicate::str::contains("FontHeight 2"));
}

#[test]
fn grab_rewrites_offset() {
    let dir = tempdir().unwrap();
    let png = dir.path().join("glyph.png");
    let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(1, 1, 1)]);
    let list = PngChunkList::from_raster(1, 1, &palette, 0, &[1]).unwrap();
    fs::write(&png, list.to_bytes()).unwrap();

    zfont()
        .args(["grab", "--x", "-4", "--y", "7"])
        .arg(&png)
        .assert()
        .success();

    let rewritten = PngChunkList::parse(&fs::read(&png).unwrap()).unwrap();
    assert_eq!(rewritten.offset(), Some((-4, 7)));
}

#[test]
fn wad_list_and_picture() {
    let dir = tempdir().unwrap();
    let playpal: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
    let picture = picture_bytes(2, 2, 3, -1, &[vec![(0, vec![10, 11])], vec![(1, vec![12])]]);
    let wad = dir.path().join("test.wad");
    fs::write(
        &wad,
        wad_bytes(&[("PLAYPAL", &playpal[..]), ("PICTURE", &picture[..])]),
    )
    .unwrap();

    zfont()
        .args(["wad", "list"])
        .arg(&wad)
        .assert()
        .success()
        .stdout(predicate::str::contains("PLAYPAL"))
        .stdout(predicate::str::contains("PICTURE"));

    let out = dir.path().join("picture.png");
    zfont()
        .args(["wad", "picture"])
        .arg(&wad)
        .arg("PICTURE")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let png = PngChunkList::parse(&fs::read(&out).unwrap()).unwrap();
    assert_eq!((png.width(), png.height()), (2, 2));
    assert_eq!(png.offset(), Some((3, -1)));

    zfont()
        .args(["wad", "picture"])
        .arg(&wad)
        .arg("MISSING")
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no lump named MISSING"));
}
