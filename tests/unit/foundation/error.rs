use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PrimkitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PrimkitError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        PrimkitError::synthesis("x")
            .to_string()
            .contains("synthesis error:")
    );
    assert!(
        PrimkitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PrimkitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
