use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use url::Url;

use crate::state::Config;

/// Where the dashboard reads its documents from. Paths are relative to the
/// configured base location.
#[async_trait]
pub trait MetricsSource {
    /// Full text of the document at `path`.
    async fn fetch_text(&self, path: &str) -> Result<String>;
    /// Best-effort size in bytes without reading the body.
    async fn probe_len(&self, path: &str) -> Result<u64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    File,
}

impl SourceKind {
    pub fn from_base(base: &str) -> Self {
        if base.starts_with("http://") || base.starts_with("https://") {
            SourceKind::Http
        } else {
            SourceKind::File
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Box<dyn MetricsSource + Send + Sync>> {
        match self {
            SourceKind::Http => Ok(Box::new(HttpSource::new(&cfg.base)?)),
            SourceKind::File => Ok(Box::new(FileSource::new(&cfg.base))),
        }
    }
}

pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        // Url::join drops the last segment of a base without a trailing
        // slash, so normalize before parsing.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized)
            .with_context(|| format!("invalid base url: {}", normalized))?;
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid document path: {}", path))
    }
}

#[async_trait]
impl MetricsSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path)?;
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("GET {} returned {}", url, status));
        }
        Ok(resp.text().await?)
    }

    async fn probe_len(&self, path: &str) -> Result<u64> {
        let url = self.url_for(path)?;
        let resp = self.client.head(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("HEAD {} returned {}", url, status));
        }
        // Response::content_length() is the body size hint, which is zero
        // for HEAD; the advertised size lives in the header.
        resp.headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| anyhow!("no content-length for {}", url))
    }
}

pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MetricsSource for FileSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).with_context(|| format!("cannot read {}", full.display()))
    }

    async fn probe_len(&self, path: &str) -> Result<u64> {
        let full = self.root.join(path);
        let meta = std::fs::metadata(&full)
            .with_context(|| format!("cannot stat {}", full.display()))?;
        Ok(meta.len())
    }
}

// Stub implementation to make failure paths explicit.
pub struct NullSource;

#[async_trait]
impl MetricsSource for NullSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        Err(anyhow!("null source: no document at {}", path))
    }

    async fn probe_len(&self, path: &str) -> Result<u64> {
        Err(anyhow!("null source: no document at {}", path))
    }
}
