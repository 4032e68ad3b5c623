//! HTTP client for the job record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pipeline::{RecordSink, SubmitOutcome};
use crate::record::JobRecord;

/// Record store used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("jobtrail/", env!("CARGO_PKG_VERSION"));

/// Posts records as JSON to `{server_url}/jobs`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: Client,
}

impl ApiClient {
    /// Creates a client for the store at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_builder(base_url, Client::builder())
    }

    fn with_builder(base_url: impl Into<String>, builder: ClientBuilder) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("server URL is empty".to_string()));
        }

        let http_client = builder
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// The base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The submission endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/jobs", self.base_url)
    }
}

#[async_trait]
impl RecordSink for ApiClient {
    async fn submit(&self, record: &JobRecord) -> Result<SubmitOutcome> {
        let response = self
            .http_client
            .post(self.endpoint())
            .json(record)
            .send()
            .await?;

        let status = response.status();
        let outcome = SubmitOutcome::from_status(status.as_u16());
        if !outcome.is_stored() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, body = %body.trim(), "Record store response");
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::JobStatus;
    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn record() -> JobRecord {
        JobRecord {
            company: "Acme Corp".to_string(),
            title: "Software Engineer".to_string(),
            status: JobStatus::Applied,
            applied_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            notes: "Your application was sent to Acme Corp".to_string(),
        }
    }

    fn local_client(base_url: &str) -> ApiClient {
        ApiClient::with_builder(base_url, Client::builder().no_proxy()).unwrap()
    }

    /// Accepts one connection, answers with `status_line`, returns the request text.
    async fn serve_once(status_line: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response =
                format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            request
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_endpoint() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.endpoint(), "http://localhost:8080/jobs");
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(ApiClient::new("  "), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_submit_posts_json() {
        let (url, server) = serve_once("201 Created").await;
        let outcome = local_client(&url).submit(&record()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("post /jobs http/1.1\r\n"));
        assert!(request.contains("content-type: application/json"));
        assert!(request.contains("user-agent: jobtrail/"));
        assert!(request.contains(r#""company":"acme corp""#));
        assert!(request.contains(r#""applied_date":"2025-01-06""#));
        assert!(request.contains(r#""status":"applied""#));
    }

    #[tokio::test]
    async fn test_submit_maps_statuses() {
        for (status_line, expected) in [
            ("200 OK", SubmitOutcome::Created),
            ("409 Conflict", SubmitOutcome::AlreadyExists),
            ("400 Bad Request", SubmitOutcome::ClientError),
            ("500 Internal Server Error", SubmitOutcome::ServerError),
            ("503 Service Unavailable", SubmitOutcome::Unexpected(503)),
        ] {
            let (url, server) = serve_once(status_line).await;
            let outcome = local_client(&url).submit(&record()).await.unwrap();
            assert_eq!(outcome, expected, "{status_line}");
            server.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_submit_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = local_client(&format!("http://{addr}")).submit(&record()).await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
