use std::sync::Arc;

use super::*;
use crate::foundation::core::{Encoding, FileType};

fn session(raw: &[u8], frames: usize) -> QrSession {
    QrSession {
        frames: vec![String::from("F"); frames],
        raw_bytes: Arc::from(raw),
        encoding: Encoding::Base32,
        file_type: FileType::from_char('R').unwrap(),
        qr_version: 3,
        min_frame_count: 1,
    }
}

#[test]
fn fingerprint_is_tail_of_sha256() {
    // sha256("abc") = ba7816bf...b00361a396177a9cb410ff61f20015ad
    assert_eq!(
        content_fingerprint(b"abc"),
        "b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn single_frame_has_no_multiplicity_suffix() {
    let s = session(b"abc", 1);
    let name = "bbqr-R-b00361a396177a9cb410ff61f20015ad.png";
    assert_eq!(download_filename(&s, RenderMode::Animated), name);
    assert_eq!(download_filename(&s, RenderMode::Stacked), name);
}

#[test]
fn multi_frame_names_count_and_selector() {
    let s = session(b"abc", 4);
    assert_eq!(
        download_filename(&s, RenderMode::Animated),
        "bbqr-R-b00361a396177a9cb410ff61f20015ad-4-animated.png"
    );
    assert_eq!(
        download_filename(&s, RenderMode::Stacked),
        "bbqr-R-b00361a396177a9cb410ff61f20015ad-4-stacked.png"
    );
}

#[test]
fn name_depends_on_content_only() {
    let a = session(b"abc", 2);
    let mut b = session(b"abc", 2);
    b.qr_version = 9;
    b.frames = vec![String::from("G"); 2];
    assert_eq!(
        download_filename(&a, RenderMode::Stacked),
        download_filename(&b, RenderMode::Stacked)
    );
    let c = session(b"abd", 2);
    assert_ne!(
        download_filename(&a, RenderMode::Stacked),
        download_filename(&c, RenderMode::Stacked)
    );
}
