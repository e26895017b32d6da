use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ViewerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ViewerError::codec("x").to_string().contains("codec error:"));
    assert!(ViewerError::no_fit("x").to_string().contains("no fit:"));
    assert!(ViewerError::render("x").to_string().contains("render error:"));
}

#[test]
fn only_no_fit_is_no_fit() {
    assert!(ViewerError::no_fit("x").is_no_fit());
    assert!(!ViewerError::codec("x").is_no_fit());
    assert!(!ViewerError::render("x").is_no_fit());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ViewerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
