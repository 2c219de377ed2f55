//! Fetching dataset payloads
//!
//! [`Fetch`] is the seam between the atlas and wherever datasets live. The
//! `http` feature provides [`SourceFetcher`], which reads `http(s)://`
//! locations over the network and everything else from disk.

use crate::error::{Error, Result};
use crate::store::DatasetSource;
use std::future::Future;

/// Retrieves the text of a dataset location
pub trait Fetch {
    fn fetch_text(&self, location: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Whether a location names a network resource
pub fn is_remote(location: &str) -> bool {
    url::Url::parse(location).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Fetch the payload of a source; direct payloads cannot be fetched
pub async fn fetch_source(
    fetcher: &impl Fetch,
    source: &DatasetSource,
    default_location: &str,
) -> Result<String> {
    let location = source
        .location(default_location)
        .ok_or_else(|| Error::InvalidLocation {
            location: source.to_string(),
            reason: "direct payloads have no location".to_string(),
        })?;
    fetcher.fetch_text(location).await
}

#[cfg(feature = "http")]
pub use http::SourceFetcher;

#[cfg(feature = "http")]
mod http {
    use super::{Fetch, is_remote};
    use crate::error::{Error, Result};
    use reqwest::Client;
    use std::path::{Path, PathBuf};
    use tracing::debug;

    /// Reads datasets over HTTP(S) or from the local filesystem
    #[derive(Clone)]
    pub struct SourceFetcher {
        client: Client,
        /// Directory that relative file locations are resolved against
        base_dir: Option<PathBuf>,
    }

    impl SourceFetcher {
        pub fn new() -> Self {
            Self {
                client: Client::builder()
                    .user_agent(concat!("sharn-atlas/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .unwrap_or_else(|_| Client::new()),
                base_dir: None,
            }
        }

        /// Resolve relative file locations against `dir`
        pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
            self.base_dir = Some(dir.into());
            self
        }

        fn local_path(&self, location: &str) -> PathBuf {
            let path = Path::new(location.strip_prefix("file://").unwrap_or(location));
            match &self.base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.to_path_buf(),
            }
        }

        async fn fetch_remote(&self, url: &str) -> Result<String> {
            let fetch_error = |reason: String| Error::Fetch {
                url: url.to_string(),
                reason,
            };

            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| fetch_error(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(fetch_error(format!("HTTP {status}")));
            }

            response.text().await.map_err(|e| fetch_error(e.to_string()))
        }

        async fn fetch_local(&self, location: &str) -> Result<String> {
            let path = self.local_path(location);
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| Error::Read {
                    path: path.display().to_string(),
                    source,
                })
        }
    }

    impl Default for SourceFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Fetch for SourceFetcher {
        async fn fetch_text(&self, location: &str) -> Result<String> {
            debug!("Fetching dataset from {}", location);
            if is_remote(location) {
                self.fetch_remote(location).await
            } else {
                self.fetch_local(location).await
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/data.json"));
        assert!(is_remote("http://localhost:8000/districtInfo.json"));
        assert!(!is_remote("districtInfo.json"));
        assert!(!is_remote("/srv/sharn/districtInfo.json"));
        assert!(!is_remote("file:///srv/sharn/districtInfo.json"));
    }
}
