use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StoryscapeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StoryscapeError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(StoryscapeError::load("x").to_string().contains("load error:"));
    assert!(
        StoryscapeError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        StoryscapeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        StoryscapeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StoryscapeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn url_parse_errors_map_to_config() {
    let err: StoryscapeError = url::Url::parse("not a url").unwrap_err().into();
    assert!(matches!(err, StoryscapeError::Config(_)));
}
