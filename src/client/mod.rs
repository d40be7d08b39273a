//! Photo store client.
//!
//! Three operations against the remote photo service:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET /photos` -> JSON array of photos |
//! | upload    | `POST /upload`, multipart field `photo` |
//! | delete    | `DELETE /photos/{id}` |
//!
//! There is no retry, caching or pagination. Every failure is a
//! [`TransportError`]; callers decide how to surface it.

mod error;
mod types;

pub use error::{Result, TransportError};
pub use types::{Photo, PhotoId, SelectedFile, parse_timestamp};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::constants::UPLOAD_FIELD;

/// Remote photo storage.
///
/// [`PhotoClient`] is the HTTP implementation; the trait is the seam the
/// gallery is generic over.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Fetch the full current set of photos, in server order.
    async fn list_photos(&self) -> Result<Vec<Photo>>;

    /// Upload one file. Success carries no payload; re-list to see the record.
    async fn upload_photo(&self, file: SelectedFile) -> Result<()>;

    /// Delete the identified photo. Not idempotent: a second delete fails.
    async fn delete_photo(&self, id: &PhotoId) -> Result<()>;
}

/// HTTP client for the photo service.
#[derive(Debug, Clone)]
pub struct PhotoClient {
    base: Url,
    http: reqwest::Client,
}

impl PhotoClient {
    /// Create a client for the service at `base_url`, without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Same as [`PhotoClient::new`].
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = parse_base_url(base_url)?;

        let mut builder =
            reqwest::Client::builder().user_agent(concat!("photogrid/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::Client)?;

        Ok(Self { base, http })
    }

    /// Base URL the client was constructed with.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL by appending path segments to the base.
    ///
    /// Segments are percent-encoded, so an id cannot escape its segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::invalid_url(self.base.as_str(), "cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(url = %url, status = %status, "Photo service responded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::status(url.as_str(), status, &body))
    }
}

#[async_trait]
impl PhotoStore for PhotoClient {
    async fn list_photos(&self) -> Result<Vec<Photo>> {
        let url = self.endpoint(&["photos"])?;
        let response = self.send(self.http.get(url.clone()), &url).await?;

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        let photos: Vec<Photo> =
            serde_json::from_slice(&body).map_err(|source| TransportError::Decode {
                url: url.to_string(),
                source,
            })?;

        debug!(count = photos.len(), "Fetched photos");
        Ok(photos)
    }

    async fn upload_photo(&self, file: SelectedFile) -> Result<()> {
        let url = self.endpoint(&["upload"])?;
        let size = file.len();

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.mime)
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        self.send(self.http.post(url.clone()).multipart(form), &url)
            .await?;

        debug!(filename = %file.filename, size, "Uploaded photo");
        Ok(())
    }

    async fn delete_photo(&self, id: &PhotoId) -> Result<()> {
        let url = self.endpoint(&["photos", id.as_str()])?;
        self.send(self.http.delete(url.clone()), &url).await?;

        debug!(id = %id, "Deleted photo");
        Ok(())
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let base = Url::parse(base_url.trim())
        .map_err(|e| TransportError::invalid_url(base_url, e.to_string()))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(TransportError::invalid_url(
            base_url,
            format!("unsupported scheme '{}'", base.scheme()),
        ));
    }
    if base.cannot_be_a_base() {
        return Err(TransportError::invalid_url(base_url, "cannot be a base URL"));
    }

    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_onto_root() {
        let client = PhotoClient::new("https://photos.example.com").unwrap();
        assert_eq!(
            client.endpoint(&["photos"]).unwrap().as_str(),
            "https://photos.example.com/photos"
        );
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let client = PhotoClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            client.endpoint(&["upload"]).unwrap().as_str(),
            "http://localhost:8080/api/upload"
        );

        let client = PhotoClient::new("http://localhost:8080/api").unwrap();
        assert_eq!(
            client.endpoint(&["photos", "12"]).unwrap().as_str(),
            "http://localhost:8080/api/photos/12"
        );
    }

    #[test]
    fn test_endpoint_encodes_id_segment() {
        let client = PhotoClient::new("http://localhost").unwrap();
        let url = client.endpoint(&["photos", "../upload?x=1"]).unwrap();
        assert_eq!(url.path(), "/photos/..%2Fupload%3Fx=1");
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        assert!(matches!(
            PhotoClient::new("photos.example.com"),
            Err(TransportError::InvalidUrl { .. })
        ));
        assert!(matches!(
            PhotoClient::new("ftp://photos.example.com"),
            Err(TransportError::InvalidUrl { .. })
        ));
        assert!(matches!(
            PhotoClient::new("mailto:someone@example.com"),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_with_timeout_builds() {
        let client =
            PhotoClient::with_timeout("http://127.0.0.1:9", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9/");
    }
}
