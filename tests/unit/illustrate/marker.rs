use image::Rgba;

use super::*;

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 251) as u8, (y * 13 % 251) as u8, ((x + y) % 200) as u8, 255])
    })
}

#[test]
fn small_ring_has_eight_offsets_without_center() {
    let offsets: Vec<_> = MarkerShape::Small.offsets().collect();
    assert_eq!(offsets.len(), 8);
    assert!(!offsets.contains(&(0, 0)));
    assert!(offsets.iter().all(|&(dx, dy)| dx.abs().max(dy.abs()) == 1));
}

#[test]
fn large_ring_has_sixteen_offsets_on_the_border() {
    let offsets: Vec<_> = MarkerShape::Large.offsets().collect();
    assert_eq!(offsets.len(), 16);
    assert!(offsets.contains(&(-2, -2)));
    assert!(offsets.contains(&(2, 1)));
    assert!(!offsets.contains(&(1, 1)));
}

#[test]
fn canvas_rejects_out_of_range_writes() {
    let mut img = gradient(4, 3);
    let before = img.clone();
    let mut canvas = PixelCanvas::new(&mut img);
    for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i64::MAX, 0)] {
        assert_eq!(canvas.try_put_pixel(x, y, WHITE), Err(OutOfBounds { x, y }));
    }
    assert_eq!(img, before);
}

#[test]
fn draw_marker_interior_writes_full_ring() {
    let mut img = gradient(10, 10);
    let center_before = *img.get_pixel(5, 5);
    let stats = draw_marker(
        &mut PixelCanvas::new(&mut img),
        Seed::new(5, 5),
        MarkerShape::Small,
        WHITE,
    );
    assert_eq!(stats, MarkerStats { drawn: 8, clipped: 0 });
    assert_eq!(*img.get_pixel(4, 4), WHITE);
    assert_eq!(*img.get_pixel(6, 5), WHITE);
    assert_eq!(*img.get_pixel(5, 5), center_before);
    assert_ne!(*img.get_pixel(3, 3), WHITE);
}

#[test]
fn draw_marker_at_corner_clips_silently() {
    let mut img = gradient(8, 8);
    let stats = draw_marker(
        &mut PixelCanvas::new(&mut img),
        Seed::new(0, 0),
        MarkerShape::Small,
        WHITE,
    );
    assert_eq!(stats, MarkerStats { drawn: 3, clipped: 5 });

    let stats = draw_marker(
        &mut PixelCanvas::new(&mut img),
        Seed::new(7, 6),
        MarkerShape::Large,
        WHITE,
    );
    // Columns 8 and 9 plus row 8 fall outside an 8x8 image.
    assert_eq!(stats, MarkerStats { drawn: 6, clipped: 10 });
}

#[test]
fn annotate_preserves_every_seed_pixel() {
    let original = gradient(32, 24);
    let mut img = original.clone();
    let seeds = [
        Seed::new(10, 10),
        Seed::new(11, 10), // inside its neighbour's ring
        Seed::new(0, 0),
        Seed::new(31, 23),
        Seed::new(1, 22),
    ];

    let stats = annotate(&mut img, &seeds, MarkerShape::Small).unwrap();
    assert!(stats.clipped > 0);

    for s in seeds {
        assert_eq!(img.get_pixel(s.x, s.y), original.get_pixel(s.x, s.y), "{s:?}");
    }
    assert_eq!(*img.get_pixel(9, 9), WHITE);
    assert_eq!(*img.get_pixel(12, 11), WHITE);
}

#[test]
fn annotate_large_near_edges_does_not_fail() {
    let original = gradient(16, 16);
    let mut img = original.clone();
    let seeds = [Seed::new(1, 1), Seed::new(14, 15), Seed::new(15, 0)];
    annotate(&mut img, &seeds, MarkerShape::Large).unwrap();
    for s in seeds {
        assert_eq!(img.get_pixel(s.x, s.y), original.get_pixel(s.x, s.y));
    }
}

#[test]
fn annotate_rejects_seed_outside_image_before_drawing() {
    let original = gradient(8, 8);
    let mut img = original.clone();
    let err = annotate(
        &mut img,
        &[Seed::new(2, 2), Seed::new(8, 1)],
        MarkerShape::Small,
    )
    .unwrap_err();
    assert!(matches!(err, CanvasError::Validation(_)));
    assert_eq!(img, original);
}
