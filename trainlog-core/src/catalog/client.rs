use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::CatalogSnapshot;
use crate::config::CatalogConfig;
use crate::model::CatalogEntry;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ExercisePage {
    results: Vec<ExerciseRecord>,
}

/// wger returns much more per exercise; only the name is of interest here.
#[derive(Deserialize)]
struct ExerciseRecord {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Clone)]
enum CatalogBackend {
    Wger {
        http: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
    },
    Static {
        entries: Arc<[CatalogEntry]>,
    },
}

#[derive(Clone)]
pub struct CatalogClient {
    backend: CatalogBackend,
}

impl CatalogClient {
    pub fn new_wger(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("trainlog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        info!("CatalogClient::new_wger url={}", config.base_url);
        Ok(Self {
            backend: CatalogBackend::Wger {
                http,
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
            },
        })
    }

    /// Serves a fixed list; no network involved.
    pub fn new_static(entries: Vec<CatalogEntry>) -> Self {
        debug!(
            "CatalogClient::new_static creating static backend with {} entries",
            entries.len()
        );
        Self {
            backend: CatalogBackend::Static {
                entries: entries.into(),
            },
        }
    }

    /// Single read of the whole catalog. No pagination, no retry.
    pub async fn fetch_exercise_names(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        match &self.backend {
            CatalogBackend::Static { entries } => Ok(entries.to_vec()),
            CatalogBackend::Wger {
                http,
                base_url,
                api_key,
            } => {
                info!("Fetching exercise catalog from {}", base_url);
                let mut request = http.get(base_url);
                if let Some(key) = api_key {
                    request = request.header(AUTHORIZATION, format!("Token {key}"));
                }

                let response = request.send().await?;
                let status = response.status();
                let body = response.text().await?;
                if !status.is_success() {
                    return Err(CatalogError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }

                let page: ExercisePage = serde_json::from_str(&body)?;
                let entries: Vec<CatalogEntry> = page
                    .results
                    .into_iter()
                    .filter_map(|record| record.name)
                    .filter(|name| !name.is_empty())
                    .map(CatalogEntry::new)
                    .collect();
                info!("Catalog returned {} named exercises", entries.len());
                Ok(entries)
            }
        }
    }

    /// Awaits the fetch once and freezes the result. A failed fetch is logged
    /// and yields an empty snapshot: the user can still type a name by hand.
    pub async fn fetch_snapshot(&self) -> CatalogSnapshot {
        match self.fetch_exercise_names().await {
            Ok(entries) => CatalogSnapshot::new(entries),
            Err(e) => {
                warn!("Error fetching exercises: {}", e);
                CatalogSnapshot::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers exactly one request with `status` and `body`, returning the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/v2/exercise/", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        (url, handle)
    }

    fn client_for(url: String, api_key: Option<&str>) -> CatalogClient {
        CatalogClient::new_wger(&CatalogConfig {
            base_url: url,
            api_key: api_key.map(str::to_string),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn static_backend_returns_entries() {
        let client = CatalogClient::new_static(vec!["Squat".into(), "Lunge".into()]);
        let names = client.fetch_exercise_names().await.unwrap();
        assert_eq!(names, vec![CatalogEntry::new("Squat"), CatalogEntry::new("Lunge")]);
        assert_eq!(client.fetch_snapshot().await.search("squ").len(), 1);
    }

    #[tokio::test]
    async fn wger_sends_token_and_projects_names() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"count":3,"next":null,"results":[{"id":1,"name":"Squat","category":10},{"id":2,"uuid":"x"},{"id":3,"name":"Bench Press"}]}"#,
        )
        .await;
        let client = client_for(url, Some("abc123"));

        let names = client.fetch_exercise_names().await.unwrap();
        assert_eq!(
            names,
            vec![CatalogEntry::new("Squat"), CatalogEntry::new("Bench Press")]
        );

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /api/v2/exercise/ "));
        assert!(request.contains("authorization: token abc123"));
    }

    #[tokio::test]
    async fn wger_without_key_sends_no_authorization() {
        let (url, server) = serve_once("200 OK", r#"{"results":[]}"#).await;
        let client = client_for(url, None);

        assert!(client.fetch_exercise_names().await.unwrap().is_empty());
        let request = server.await.unwrap().to_lowercase();
        assert!(!request.contains("authorization:"));
    }

    #[tokio::test]
    async fn error_status_is_surfaced() {
        let (url, _server) =
            serve_once("401 Unauthorized", r#"{"detail":"Invalid token."}"#).await;
        let client = client_for(url, Some("bad"));

        match client.fetch_exercise_names().await {
            Err(CatalogError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid token"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let (url, _server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let client = client_for(url, None);

        assert!(matches!(
            client.fetch_exercise_names().await,
            Err(CatalogError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn failed_fetch_yields_empty_snapshot() {
        let (url, _server) = serve_once("500 Internal Server Error", "oops").await;
        let client = client_for(url, None);

        assert!(client.fetch_snapshot().await.is_empty());
    }
}
