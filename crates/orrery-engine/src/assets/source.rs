use std::collections::{HashMap, HashSet};
use std::future::{ready, Future};

use crate::assets::error::AssetError;

/// Where asset text comes from.
///
/// The browser implementation wraps `window.fetch`; it is not `Send`, so
/// neither is the returned future.
pub trait AssetSource {
    /// Fetch the file at `path` (relative to the asset root) as UTF-8 text.
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, AssetError>>;
}

/// Join a directory prefix such as `"earth/"` and a file name.
pub fn join_path(base: &str, file: &str) -> String {
    if base.is_empty() {
        file.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, file)
    } else {
        format!("{}/{}", base, file)
    }
}

/// In-memory asset source. Resolves immediately.
///
/// Paths registered with `fail` answer with a fetch error, which lets tests
/// and offline tools simulate a broken network for one file.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
    failing: HashSet<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Make `path` fail with a network error.
    pub fn fail(&mut self, path: impl Into<String>) {
        self.failing.insert(path.into());
    }
}

impl AssetSource for MemorySource {
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, AssetError>> {
        let result = if self.failing.contains(path) {
            Err(AssetError::Fetch {
                url: path.to_string(),
                message: "simulated network error".to_string(),
            })
        } else {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| AssetError::NotFound(path.to_string()))
        };
        ready(result)
    }
}
