use super::*;

#[test]
fn source_kinds() {
    assert_eq!(source_kind("https://example.test/a.png"), SourceKind::Http);
    assert_eq!(source_kind("http://example.test/a.png"), SourceKind::Http);
    assert_eq!(source_kind("file:///tmp/a.png"), SourceKind::File);
    assert_eq!(source_kind("scenes/a.png"), SourceKind::Path);
    assert_eq!(source_kind("/abs/a.png"), SourceKind::Path);
    assert_eq!(source_kind("C:\\scenes\\a.png"), SourceKind::Path);
    assert_eq!(source_kind("ftp://example.test/a.png"), SourceKind::Unsupported);
}

#[test]
fn fs_loader_resolves_relative_paths_against_root() {
    let loader = FsLoader::with_root("assets");
    assert_eq!(
        loader.resolve("bg/a.png").unwrap(),
        PathBuf::from("assets").join("bg/a.png")
    );
    assert!(loader.resolve("https://example.test/a.png").is_err());
}

#[test]
fn fs_loader_reads_files_and_reports_missing() {
    let dir = PathBuf::from("target").join("loader_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bytes.bin");
    std::fs::write(&path, b"abc").unwrap();

    let loader = FsLoader::new();
    assert_eq!(loader.fetch(path.to_str().unwrap()).unwrap(), b"abc");

    let err = loader.fetch("target/loader_unit/missing.bin").unwrap_err();
    assert!(matches!(err, StoryscapeError::Load(_)));
}

#[test]
fn default_loader_rejects_unsupported_schemes() {
    let loader = DefaultLoader::new(FsLoader::new()).unwrap();
    assert!(loader.fetch("ftp://example.test/a.png").is_err());
}

#[cfg(not(feature = "http"))]
#[test]
fn default_loader_without_http_feature_fails_http_sources() {
    let loader = DefaultLoader::new(FsLoader::new()).unwrap();
    let err = loader.fetch("https://example.test/a.png").unwrap_err();
    assert!(err.to_string().contains("http"));
}

#[test]
fn memory_loader_serves_known_sources() {
    let loader = MemoryLoader::new().with("a", vec![1, 2, 3]);
    assert_eq!(loader.fetch("a").unwrap(), vec![1, 2, 3]);
    assert!(loader.fetch("b").is_err());
}
