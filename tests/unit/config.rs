use std::path::Path;

use super::*;

#[test]
fn video_defaults_reproduce_fixed_invocation() {
    let cfg = VideoConfig::default();
    cfg.validate().unwrap();

    let enc = cfg.encode_config();
    assert_eq!(enc.input_pattern, Path::new("video").join("%010d.png"));
    assert_eq!(enc.fps, 120);
    assert_eq!(enc.codec, "libx265");
    assert_eq!(enc.out_path, Path::new("canvas.mp4"));
    assert!(enc.overwrite);
}

#[test]
fn video_validation_catches_bad_naming() {
    let mut cfg = VideoConfig::default();
    cfg.naming.width = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = VideoConfig::default();
    cfg.naming.extension = ".png".to_string();
    assert!(cfg.validate().is_err());

    let cfg = VideoConfig {
        fps: 0,
        ..VideoConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn illustrate_defaults_match_fixed_constants() {
    let cfg = IllustrateConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.replication, 100);
    assert_eq!(cfg.crop_side, 200);
    let window = cfg.crop_window().unwrap();
    assert_eq!((window.left, window.top), (540, 260));
    assert_eq!((window.right(), window.bottom()), (740, 460));
    assert_eq!(cfg.marker, MarkerShape::Small);
    assert_eq!(cfg.out_path, Path::new("out.gif"));
    assert!(cfg.random_seeds.is_none());
    assert_eq!(RandomSeedArea::default().width, 1280);
}

#[test]
fn illustrate_validation_catches_bad_values() {
    for cfg in [
        IllustrateConfig {
            replication: 0,
            ..IllustrateConfig::default()
        },
        IllustrateConfig {
            crop_side: 0,
            ..IllustrateConfig::default()
        },
        IllustrateConfig {
            crop_canvas: (150, 720),
            ..IllustrateConfig::default()
        },
        IllustrateConfig {
            video_out: Some("x.mp4".into()),
            video_fps: 0,
            ..IllustrateConfig::default()
        },
        IllustrateConfig {
            gif: GifOpts {
                speed: 31,
                ..GifOpts::default()
            },
            ..IllustrateConfig::default()
        },
    ] {
        assert!(matches!(cfg.validate(), Err(CanvasError::Validation(_))));
    }
}

#[test]
fn crop_window_follows_the_reference_canvas() {
    let cfg = IllustrateConfig {
        crop_canvas: (1920, 1080),
        ..IllustrateConfig::default()
    };
    let window = cfg.crop_window().unwrap();
    assert_eq!((window.left, window.top, window.side), (860, 440, 200));
}
