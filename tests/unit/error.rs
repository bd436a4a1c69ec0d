use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TrackvizError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TrackvizError::lookup("x")
            .to_string()
            .contains("lookup error:")
    );
    assert!(
        TrackvizError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(TrackvizError::io("x").to_string().contains("io error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TrackvizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn helper_constructors_pick_the_matching_variant() {
    assert!(matches!(
        TrackvizError::validation("x"),
        TrackvizError::Validation(_)
    ));
    assert!(matches!(TrackvizError::lookup("x"), TrackvizError::Lookup(_)));
    assert!(matches!(TrackvizError::render("x"), TrackvizError::Render(_)));
    assert!(matches!(TrackvizError::io("x"), TrackvizError::Io(_)));
}
