use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ShorelineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ShorelineError::config("x").to_string().contains("config error:"));
    assert!(ShorelineError::color("x").to_string().contains("color error:"));
    assert!(
        ShorelineError::initialization("x")
            .to_string()
            .contains("initialization error:")
    );
    assert!(ShorelineError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShorelineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
