use std::path::PathBuf;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_frames_sequence").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn file_name_is_zero_padded() {
    let naming = FrameNaming::default();
    assert_eq!(naming.file_name(FrameIndex(0)), "0000000000.png");
    assert_eq!(naming.file_name(FrameIndex(42)), "0000000042.png");
    assert_eq!(naming.ffmpeg_pattern(), "%010d.png");
}

#[test]
fn parse_index_requires_numeric_stem_and_extension() {
    let naming = FrameNaming::default();
    assert_eq!(
        naming.parse_index(Path::new("video/0000000007.png")),
        Some(FrameIndex(7))
    );
    assert_eq!(naming.parse_index(Path::new("12.PNG")), Some(FrameIndex(12)));
    assert_eq!(naming.parse_index(Path::new("0000000007.jpg")), None);
    assert_eq!(naming.parse_index(Path::new("frame7.png")), None);
    assert_eq!(naming.parse_index(Path::new("-7.png")), None);
    assert_eq!(naming.parse_index(Path::new(".png")), None);
}

#[test]
fn scan_orders_frames_and_skips_strays() {
    let dir = scratch("scan_orders");
    let naming = FrameNaming::default();
    for i in [3u64, 0, 1] {
        std::fs::write(naming.path_for(&dir, FrameIndex(i)), [i as u8]).unwrap();
    }
    std::fs::write(dir.join("notes.txt"), b"x").unwrap();
    std::fs::create_dir_all(dir.join("0000000009.png")).unwrap();

    let seq = FrameSequence::scan(&dir, naming).unwrap();
    let indices: Vec<u64> = seq.frames().iter().map(|f| f.index.0).collect();
    assert_eq!(indices, vec![0, 1, 3]);
    assert_eq!(seq.max_index().unwrap(), FrameIndex(3));
    assert_eq!(seq.missing().unwrap(), vec![FrameIndex(2)]);
}

#[test]
fn unpadded_names_count_toward_max_but_are_not_canonical() {
    let dir = scratch("unpadded");
    let naming = FrameNaming::default();
    std::fs::write(naming.path_for(&dir, FrameIndex(0)), b"a").unwrap();
    std::fs::write(dir.join("2.png"), b"b").unwrap();

    let seq = FrameSequence::scan(&dir, naming).unwrap();
    assert_eq!(seq.max_index().unwrap(), FrameIndex(2));
    assert_eq!(seq.missing().unwrap(), vec![FrameIndex(1), FrameIndex(2)]);
}

#[test]
fn empty_directory_has_no_max() {
    let dir = scratch("empty");
    let seq = FrameSequence::scan(&dir, FrameNaming::default()).unwrap();
    assert!(seq.frames().is_empty());
    assert!(matches!(seq.max_index(), Err(CanvasError::Validation(_))));
}

#[test]
fn scan_missing_directory_is_an_io_error() {
    let err = FrameSequence::scan("target/no/such/frames", FrameNaming::default()).unwrap_err();
    assert!(matches!(err, CanvasError::Other(_)));
}
