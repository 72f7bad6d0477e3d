//! Image source fetching.
//!
//! Loaders only move bytes; decoding happens in [`crate::decode_image`]. There is no retry
//! policy: a failed fetch is reported once and the engine keeps its current backdrop.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use url::Url;

use crate::foundation::error::{StoryscapeError, StoryscapeResult};

/// Fetch the encoded bytes behind a layer `src`.
pub trait ImageLoader: Send + Sync {
    fn fetch(&self, src: &str) -> StoryscapeResult<Vec<u8>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SourceKind {
    Http,
    File,
    Path,
    Unsupported,
}

pub(crate) fn source_kind(src: &str) -> SourceKind {
    match Url::parse(src) {
        Ok(url) => match url.scheme() {
            "http" | "https" => SourceKind::Http,
            "file" => SourceKind::File,
            // Windows drive letters parse as one-letter schemes.
            s if s.len() == 1 => SourceKind::Path,
            _ => SourceKind::Unsupported,
        },
        Err(_) => SourceKind::Path,
    }
}

/// Reads bare paths and `file://` URLs from disk.
#[derive(Clone, Debug, Default)]
pub struct FsLoader {
    root: Option<PathBuf>,
}

impl FsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, src: &str) -> StoryscapeResult<PathBuf> {
        let path = match source_kind(src) {
            SourceKind::File => Url::parse(src)?
                .to_file_path()
                .map_err(|()| StoryscapeError::load(format!("'{src}' is not a local file url")))?,
            SourceKind::Path => PathBuf::from(src),
            SourceKind::Http | SourceKind::Unsupported => {
                return Err(StoryscapeError::load(format!(
                    "'{src}' is not a filesystem source"
                )));
            }
        };
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        })
    }
}

impl ImageLoader for FsLoader {
    fn fetch(&self, src: &str) -> StoryscapeResult<Vec<u8>> {
        let path = self.resolve(src)?;
        read_file(&path)
    }
}

fn read_file(path: &Path) -> StoryscapeResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| StoryscapeError::load(format!("read '{}': {e}", path.display())))
}

/// Blocking HTTP(S) loader. No retries, no caching.
#[cfg(feature = "http")]
#[derive(Clone, Debug)]
pub struct HttpLoader {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpLoader {
    pub fn new() -> StoryscapeResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("storyscape/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoryscapeError::config(format!("build http client: {e}")))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl ImageLoader for HttpLoader {
    fn fetch(&self, src: &str) -> StoryscapeResult<Vec<u8>> {
        let response = self
            .client
            .get(src)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| StoryscapeError::load(format!("GET '{src}': {e}")))?;
        let bytes = response
            .bytes()
            .map_err(|e| StoryscapeError::load(format!("read body of '{src}': {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Routes `http(s)://` sources to the HTTP loader (feature `http`) and everything else to disk.
#[derive(Clone, Debug)]
pub struct DefaultLoader {
    fs: FsLoader,
    #[cfg(feature = "http")]
    http: HttpLoader,
}

impl DefaultLoader {
    pub fn new(fs: FsLoader) -> StoryscapeResult<Self> {
        Ok(Self {
            fs,
            #[cfg(feature = "http")]
            http: HttpLoader::new()?,
        })
    }
}

impl ImageLoader for DefaultLoader {
    fn fetch(&self, src: &str) -> StoryscapeResult<Vec<u8>> {
        match source_kind(src) {
            #[cfg(feature = "http")]
            SourceKind::Http => self.http.fetch(src),
            #[cfg(not(feature = "http"))]
            SourceKind::Http => Err(StoryscapeError::load(format!(
                "'{src}': http sources need the `http` feature"
            ))),
            SourceKind::File | SourceKind::Path => self.fs.fetch(src),
            SourceKind::Unsupported => Err(StoryscapeError::load(format!(
                "'{src}': unsupported source scheme"
            ))),
        }
    }
}

/// In-memory sources, for bundled assets and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(src.into(), bytes);
    }

    pub fn with(mut self, src: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(src, bytes);
        self
    }
}

impl ImageLoader for MemoryLoader {
    fn fetch(&self, src: &str) -> StoryscapeResult<Vec<u8>> {
        self.entries
            .get(src)
            .cloned()
            .ok_or_else(|| StoryscapeError::load(format!("no in-memory source '{src}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
