use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ip_core::paste::{ImageSource, MimeType};
use ip_core::ports::{ClockPort, FetchError, FetchStorePort};
use rand::Rng;
use reqwest::header::CONTENT_TYPE;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info_span, Instrument};

use super::file_name::{contained_parts, image_file_name, reference_for, resolve_extension};
use crate::time::SystemClock;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_NAME_ATTEMPTS: usize = 8;

/// Saves images below a document root.
///
/// Bytes sources are written as-is; URL sources are downloaded first. Every
/// image gets a fresh timestamped file name and existing files are never
/// overwritten. The returned reference is relative to the document root.
///
/// 将图片保存到文档根目录下，返回相对引用路径。
pub struct FsFetchStore {
    base_dir: PathBuf,
    http: reqwest::Client,
    clock: Arc<dyn ClockPort>,
}

impl FsFetchStore {
    pub fn new(base_dir: impl Into<PathBuf>, http: reqwest::Client, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            base_dir: base_dir.into(),
            http,
            clock,
        }
    }

    /// Store rooted at `base_dir` with a default HTTP client and the system clock.
    pub fn with_defaults(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("imgpaste/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client failed")?;
        Ok(Self::new(base_dir, http, Arc::new(SystemClock)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn download(&self, url: &str) -> Result<(Vec<u8>, Option<MimeType>), FetchError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FetchError::InvalidSource(format!("not an http(s) url: {url}")));
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| MimeType(value.to_string()));
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!(bytes = body.len(), content_type = ?mime, "Image downloaded");
        Ok((body.to_vec(), mime))
    }

    /// Create a new file in `dir` and write `data`, retrying on name collisions.
    async fn write_unique(&self, dir: &Path, extension: &str, data: &[u8]) -> Result<String, FetchError> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let suffix: u16 = rand::rng().random();
            let name = image_file_name(self.clock.now_ms(), suffix, extension);
            let path = dir.join(&name);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(io_error(&path, e)),
            };
            file.write_all(data).await.map_err(|e| io_error(&path, e))?;
            file.flush().await.map_err(|e| io_error(&path, e))?;

            debug!(path = %path.display(), "Image written");
            return Ok(name);
        }

        Err(FetchError::Io(format!(
            "no free file name in {} after {MAX_NAME_ATTEMPTS} attempts",
            dir.display()
        )))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> FetchError {
    FetchError::Io(format!("{}: {}", path.display(), err))
}

#[async_trait]
impl FetchStorePort for FsFetchStore {
    async fn fetch_and_store(&self, source: &ImageSource, target_dir: &Path) -> Result<String, FetchError> {
        let span = info_span!("infra.fetch_store.fetch_and_store", source = %source.describe());

        async {
            let parts = contained_parts(target_dir).ok_or_else(|| {
                FetchError::InvalidSource(format!(
                    "target directory leaves the document root: {}",
                    target_dir.display()
                ))
            })?;
            let dir = parts.iter().fold(self.base_dir.clone(), |dir, part| dir.join(part));
            fs::create_dir_all(&dir).await.map_err(|e| io_error(&dir, e))?;

            let (data, mime, location) = match source {
                ImageSource::Bytes {
                    data,
                    mime,
                    file_name,
                } => (data.to_vec(), Some(mime.clone()), file_name.as_deref()),
                ImageSource::Url(url) => {
                    let (data, mime) = self.download(url).await?;
                    (data, mime, Some(url.as_str()))
                }
            };
            if data.is_empty() {
                return Err(FetchError::InvalidSource("image has no content".into()));
            }

            let extension = resolve_extension(mime.as_ref(), &data, location);
            let name = self.write_unique(&dir, &extension, &data).await?;
            Ok(reference_for(&parts, &name))
        }
        .instrument(span)
        .await
    }
}
