// crates/geopick-core/src/loader/common_io.rs
use super::DocumentSource;
use crate::error::{GeoError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;
#[cfg(feature = "compact")]
use std::io::Read;

/// A dataset file on disk. Files ending in `.gz` are gunzipped when the
/// `compact` feature is enabled.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "dataset not readable");
            GeoError::ResourceMissing(self.name.clone())
        })?;

        if is_gzip(&self.path) {
            return gunzip(&bytes);
        }
        Ok(bytes)
    }
}

/// A dataset compiled into the binary, e.g. via `include_bytes!`.
#[derive(Debug, Clone, Copy)]
pub struct StaticSource {
    name: &'static str,
    bytes: &'static [u8],
}

impl StaticSource {
    pub const fn new(name: &'static str, bytes: &'static [u8]) -> Self {
        Self { name, bytes }
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn read(&self) -> Result<Vec<u8>> {
        if self.name.ends_with(".gz") {
            return gunzip(self.bytes);
        }
        Ok(self.bytes.to_vec())
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

#[cfg(feature = "compact")]
fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|_| GeoError::DecodingFailed)?;
    Ok(out)
}

// Without 'compact' a gzip payload is passed through and fails to parse.
#[cfg(not(feature = "compact"))]
fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    Ok(bytes.to_vec())
}
