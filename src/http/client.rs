use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::{Client, StatusCode};
use std::io::Write;

/// Thin wrapper around a reqwest [`Client`] for streaming downloads.
///
/// Issues exactly one request per call; failed downloads are surfaced to
/// the caller rather than retried, and dropping the returned future aborts
/// the request in flight.
#[derive(Clone, Default)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Downloads a URL body into the writer produced by `create_writer`.
    ///
    /// Any status other than 200 is a hard failure carrying the status
    /// code. The body is streamed chunk by chunk, so archives never have
    /// to fit in memory. Returns the number of bytes written.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to start download request")?;

        if response.status() != StatusCode::OK {
            bail!("unexpected status code {} from {}", response.status(), url);
        }

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read chunk from download stream")?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")?;
            downloaded_bytes += chunk.len() as u64;
        }

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_file_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/file.txt")
            .with_status(200)
            .with_body("test content")
            .create_async()
            .await;

        let client = HttpClient::default();
        let mut sink = Vec::new();
        let bytes = client
            .download_file(&format!("{}/file.txt", url), || Ok(&mut sink))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, 12);
        assert_eq!(sink, b"test content");
    }

    #[tokio::test]
    async fn test_download_file_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/file.txt")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::default();
        let result = client
            .download_file(&format!("{}/file.txt", url), || Ok(std::io::sink()))
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_download_file_is_not_retried() {
        // A failing server must see exactly one request.
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/file.txt")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::default();
        let result = client
            .download_file(&format!("{}/file.txt", url), || Ok(std::io::sink()))
            .await;

        mock.assert_async().await;
        assert!(result.is_err());
    }
}
