use super::*;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn frame(idx: usize) -> String {
    format!("B$2S020{idx}{}", "A".repeat(16))
}

fn opts(mode: RenderMode) -> RenderOpts {
    RenderOpts {
        scale: 2,
        margin: 4,
        mode,
        frame_delay_ms: 250,
    }
}

#[test]
fn symbol_size_includes_quiet_zone_and_scale() {
    // Version 1 is 21 modules wide.
    let img = rasterize(&frame(0), 1, 2, 4).unwrap();
    assert_eq!(img.dimensions(), ((21 + 8) * 2, (21 + 8) * 2));
    // Quiet zone stays light, finder pattern corner is dark.
    assert_eq!(img.get_pixel(0, 0), &LIGHT);
    assert_eq!(img.get_pixel(8, 8), &DARK);
}

#[test]
fn frame_too_long_for_version_is_render_error() {
    let long = format!("B$2S0100{}", "A".repeat(200));
    assert!(matches!(
        rasterize(&long, 1, 1, 0),
        Err(ViewerError::Render(_))
    ));
}

#[test]
fn stacked_is_one_png_with_frames_top_to_bottom() {
    let frames = vec![frame(0), frame(1)];
    let bytes = render(&frames, 1, &opts(RenderMode::Stacked)).unwrap();
    assert_eq!(bytes[..8], PNG_SIGNATURE);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (58, 116));
}

#[test]
fn animated_multi_frame_is_apng() {
    let frames = vec![frame(0), frame(1)];
    let bytes = render(&frames, 1, &opts(RenderMode::Animated)).unwrap();
    assert_eq!(bytes[..8], PNG_SIGNATURE);
    assert!(bytes.windows(4).any(|w| w == b"acTL"));
}

#[test]
fn animated_single_frame_is_plain_png() {
    let bytes = render(&[frame(0)], 1, &opts(RenderMode::Animated)).unwrap();
    assert_eq!(bytes[..8], PNG_SIGNATURE);
    assert!(!bytes.windows(4).any(|w| w == b"acTL"));
}

#[test]
fn rejects_empty_input_and_bad_options() {
    assert!(render(&[], 1, &opts(RenderMode::Stacked)).is_err());
    assert!(render(&[frame(0)], 0, &opts(RenderMode::Stacked)).is_err());
    let mut o = opts(RenderMode::Stacked);
    o.scale = 0;
    assert!(render(&[frame(0)], 1, &o).is_err());
}
