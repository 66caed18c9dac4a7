use std::path::{Path, PathBuf};

use super::*;
use crate::frames::sequence::FrameNaming;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_frames_gap_fill").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_frames(dir: &Path, indices: &[u64]) {
    let naming = FrameNaming::default();
    for &i in indices {
        std::fs::write(naming.path_for(dir, FrameIndex(i)), format!("frame-{i}")).unwrap();
    }
}

fn read_frame(dir: &Path, i: u64) -> String {
    std::fs::read_to_string(FrameNaming::default().path_for(dir, FrameIndex(i))).unwrap()
}

#[test]
fn single_gap_copies_predecessor() {
    let dir = scratch("single_gap");
    write_frames(&dir, &[0, 1, 3, 4]);

    let seq = FrameSequence::scan(&dir, FrameNaming::default()).unwrap();
    let report = fill_gaps(&seq).unwrap();

    assert_eq!(report.max_index, FrameIndex(4));
    assert_eq!(report.frame_count(), 5);
    assert_eq!(report.filled.len(), 1);
    assert_eq!(report.filled[0].index, FrameIndex(2));
    assert_eq!(read_frame(&dir, 2), read_frame(&dir, 1));
    assert_eq!(read_frame(&dir, 3), "frame-3");
}

#[test]
fn gap_run_repeats_last_existing_frame() {
    let dir = scratch("gap_run");
    write_frames(&dir, &[0, 1, 5]);

    let seq = FrameSequence::scan(&dir, FrameNaming::default()).unwrap();
    let report = fill_gaps(&seq).unwrap();

    let filled: Vec<u64> = report.filled.iter().map(|b| b.index.0).collect();
    assert_eq!(filled, vec![2, 3, 4]);
    for i in 2..=4 {
        assert_eq!(read_frame(&dir, i), "frame-1");
    }
    assert!(seq.missing().unwrap().is_empty());
}

#[test]
fn contiguous_sequence_is_untouched() {
    let dir = scratch("contiguous");
    write_frames(&dir, &[0, 1, 2]);

    let seq = FrameSequence::scan(&dir, FrameNaming::default()).unwrap();
    let report = fill_gaps(&seq).unwrap();
    assert!(report.filled.is_empty());
    assert_eq!(report.max_index, FrameIndex(2));
}

#[test]
fn missing_first_frame_is_rejected_without_copying() {
    let dir = scratch("missing_first");
    write_frames(&dir, &[1, 3]);

    let seq = FrameSequence::scan(&dir, FrameNaming::default()).unwrap();
    let err = fill_gaps(&seq).unwrap_err();
    assert!(matches!(err, CanvasError::Validation(_)));
    assert!(err.to_string().contains("frame 0"));
    assert!(!FrameNaming::default().path_for(&dir, FrameIndex(2)).exists());
}

#[test]
fn empty_directory_is_rejected() {
    let dir = scratch("empty");
    let seq = FrameSequence::scan(&dir, FrameNaming::default()).unwrap();
    assert!(matches!(fill_gaps(&seq), Err(CanvasError::Validation(_))));
}
