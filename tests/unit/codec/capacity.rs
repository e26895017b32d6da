use super::*;
use crate::foundation::core::Encoding;

fn opts(min_split: usize, max_split: usize) -> SplitOpts {
    SplitOpts {
        encoding: Encoding::Base32,
        min_split,
        max_split,
        min_version: 1,
        max_version: 40,
    }
}

#[test]
fn capacity_subtracts_header_and_rounds_to_split_mod() {
    assert_eq!(payload_capacity(1, 8), Some(16));
    assert_eq!(payload_capacity(3, 8), Some(64));
    assert_eq!(payload_capacity(40, 8), Some(4288));
    assert_eq!(payload_capacity(0, 8), None);
    assert_eq!(payload_capacity(41, 8), None);
}

#[test]
fn small_payload_picks_smallest_single_frame_version() {
    let c = estimate_version(40, 8, &opts(1, 1)).unwrap();
    assert_eq!((c.version, c.count, c.data_per_frame), (3, 1, 64));
}

#[test]
fn fewest_frames_then_lowest_version() {
    let c = estimate_version(9000, 8, &opts(1, MAX_FRAMES)).unwrap();
    assert_eq!(c.count, 3);
    assert_eq!(c.version, 33);
}

#[test]
fn exact_count_can_be_infeasible_between_feasible_counts() {
    assert_eq!(estimate_version(40, 8, &opts(2, 2)).unwrap().count, 2);
    assert_eq!(estimate_version(40, 8, &opts(3, 3)).unwrap().count, 3);
    assert!(estimate_version(40, 8, &opts(4, 4)).unwrap_err().is_no_fit());
}

#[test]
fn too_large_for_one_frame_is_no_fit() {
    assert!(estimate_version(9000, 8, &opts(1, 2)).unwrap_err().is_no_fit());
}

#[test]
fn rejects_bad_bounds() {
    assert!(matches!(
        estimate_version(40, 8, &opts(0, 1)),
        Err(ViewerError::Validation(_))
    ));
    assert!(matches!(
        estimate_version(40, 8, &opts(3, 2)),
        Err(ViewerError::Validation(_))
    ));
    let mut o = opts(1, 1);
    o.max_version = 41;
    assert!(matches!(
        estimate_version(40, 8, &o),
        Err(ViewerError::Validation(_))
    ));
}
