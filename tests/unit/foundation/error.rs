use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        IconRingError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        IconRingError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        IconRingError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert_eq!(
        IconRingError::script(7, "unknown command").to_string(),
        "script error (line 7): unknown command"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = IconRingError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
