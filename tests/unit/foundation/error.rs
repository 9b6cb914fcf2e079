use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PanecastError::resource("x")
            .to_string()
            .contains("resource unavailable:")
    );
    assert!(
        PanecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PanecastError::host("x").to_string().contains("host error:"));

    let truncated = PanecastError::TruncatedInput {
        offset: 12,
        needed: 4,
        len: 14,
    };
    let msg = truncated.to_string();
    assert!(msg.contains("truncated input:"));
    assert!(msg.contains("offset 12"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PanecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn startup_fatality_matches_taxonomy() {
    assert!(PanecastError::resource("x").is_fatal_at_startup());
    assert!(
        PanecastError::TruncatedInput {
            offset: 0,
            needed: 4,
            len: 0
        }
        .is_fatal_at_startup()
    );
    assert!(!PanecastError::host("x").is_fatal_at_startup());
}
