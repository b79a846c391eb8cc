//! Shader source fetching.
//!
//! The builder never reads files itself. It asks a [`SourceFetcher`] for the text behind a path
//! and suspends until the fetcher answers. Three fetchers are provided: [`FsFetcher`] reads from
//! disk, [`MemoryFetcher`] serves sources registered at runtime and [`EmbeddedFetcher`] serves
//! sources baked into the binary with [`include_dir`].

use std::{future::Future, io};

use futures::future;
use fxhash::FxHashMap;

/// Reasons a fetch can fail.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("no resource at '{0}'")]
    NotFound(String),
    #[error("resource '{0}' is not valid UTF-8")]
    InvalidUtf8(String),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
            io::ErrorKind::InvalidData => FetchError::InvalidUtf8(path.to_string()),
            _ => FetchError::Io(err),
        }
    }
}

/// Supplies the full text of a resource given its path.
pub trait SourceFetcher {
    /// Fetches the text stored at `path`.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// Reads sources from the local filesystem. Paths are used as given.
///
/// The read is blocking: it happens when [`fetch`](SourceFetcher::fetch) is called and the
/// returned future is already complete, so it never suspends and the two stages of a program
/// are read one after the other.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFetcher;

impl SourceFetcher for FsFetcher {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> {
        let result = std::fs::read_to_string(path).map_err(|e| FetchError::from_io(path, e));
        future::ready(result)
    }
}

/// Serves sources registered in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryFetcher {
    sources: FxHashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` under `path`, replacing whatever was there.
    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) -> &mut Self {
        self.sources.insert(path.into(), source.into());
        self
    }

    /// Removes the source registered under `path`.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.sources.remove(path)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceFetcher for MemoryFetcher {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> {
        let result = self
            .sources
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()));
        future::ready(result)
    }
}

/// Serves sources from a directory embedded with [`include_dir::include_dir!`].
///
/// Leading `/` and `./` are stripped so the builder's base path can point at the root of the
/// embedded tree.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFetcher {
    root: &'static include_dir::Dir<'static>,
}

impl EmbeddedFetcher {
    pub fn new(root: &'static include_dir::Dir<'static>) -> Self {
        Self { root }
    }

    fn lookup(&self, path: &str) -> Result<String, FetchError> {
        let mut relative = path;
        loop {
            if let Some(rest) = relative.strip_prefix("./") {
                relative = rest;
            } else if let Some(rest) = relative.strip_prefix('/') {
                relative = rest;
            } else {
                break;
            }
        }
        let file = self
            .root
            .get_file(relative)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;
        file.contents_utf8()
            .map(str::to_string)
            .ok_or_else(|| FetchError::InvalidUtf8(path.to_string()))
    }
}

impl SourceFetcher for EmbeddedFetcher {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> {
        future::ready(self.lookup(path))
    }
}
