use crate::prelude::*;
use std::future::Future;

use log::debug;
use qiita_core::error::FetchError;
use qiita_core::qiita::{decode_articles, Article, Endpoints};
use reqwest::header::ACCEPT;
use reqwest::RequestBuilder;

use crate::config::QiitaConfig;

const USER_AGENT: &str = concat!("qiita-reader/", env!("CARGO_PKG_VERSION"));

/// Source of article lists
pub trait ArticleFetcher: Send + Sync + 'static {
    /// Fetch the first page of `count` articles whose title matches
    /// `title_filter`. One request, no retry.
    fn fetch_articles(
        &self,
        count: u32,
        title_filter: &str,
    ) -> impl Future<Output = Result<Vec<Article>, FetchError>> + Send;
}

/// Source of raw avatar image bytes
pub trait ImageFetcher: Send + Sync + 'static {
    fn fetch_image(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Create the HTTP client shared by article and avatar requests
pub fn create_client(config: &QiitaConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Qiita API client over `reqwest`
#[derive(Debug, Clone)]
pub struct QiitaClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl QiitaClient {
    pub fn new(client: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn from_config(config: &QiitaConfig) -> Result<Self> {
        Ok(Self::new(create_client(config)?, config.endpoints.clone()))
    }

    async fn send(request: RequestBuilder) -> Result<Vec<u8>, FetchError> {
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

impl ArticleFetcher for QiitaClient {
    async fn fetch_articles(
        &self,
        count: u32,
        title_filter: &str,
    ) -> Result<Vec<Article>, FetchError> {
        let url = self.endpoints.items_url(count, title_filter)?;
        debug!("GET {url}");

        let request = self.client.get(&url).header(ACCEPT, "application/json");
        let body = Self::send(request).await?;
        decode_articles(&body)
    }
}

impl ImageFetcher for QiitaClient {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {url}");
        Self::send(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qiita_core::presenter::ReplacePolicy;

    fn config(timeout: Option<u64>) -> QiitaConfig {
        QiitaConfig {
            endpoints: Endpoints::default(),
            count: 50,
            timeout: timeout.map(std::time::Duration::from_secs),
            policy: ReplacePolicy::LatestIssued,
            verbose: false,
        }
    }

    /// Serve a single HTTP response on a local port and hand back the raw
    /// request that was received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

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
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).to_lowercase()
        });

        (base_url, handle)
    }

    fn local_client(base_url: &str) -> QiitaClient {
        QiitaClient::new(
            create_client(&config(Some(5))).unwrap(),
            Endpoints::new(base_url),
        )
    }

    #[tokio::test]
    async fn test_fetch_articles_sends_one_json_get() {
        let body = r#"[{"id": "a1", "title": "Hello", "user": {"id": "u1", "profile_image_url": "http://x/y.png"}}]"#;
        let (base_url, server) = serve_once("200 OK", body).await;

        let articles = local_client(&base_url)
            .fetch_articles(5, "rust")
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id, "a1");
        assert!(request.starts_with("get /api/v2/items?page=1&per_page=5&query=title:rust http/1.1\r\n"));
        assert_eq!(request.matches("get ").count(), 1);
        assert!(request.contains("\r\naccept: application/json\r\n"));
        assert!(request.contains("\r\nuser-agent: qiita-reader/"));
    }

    #[tokio::test]
    async fn test_fetch_image_does_not_ask_for_json() {
        let (base_url, server) = serve_once("200 OK", "imagebytes").await;

        let bytes = local_client(&base_url)
            .fetch_image(&format!("{base_url}/avatar.png"))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(bytes, b"imagebytes".to_vec());
        assert!(request.starts_with("get /avatar.png http/1.1\r\n"));
        assert!(!request.contains("application/json"));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_status() {
        let (base_url, server) = serve_once("503 Service Unavailable", "").await;

        let err = local_client(&base_url)
            .fetch_articles(5, "")
            .await
            .unwrap_err();
        server.await.unwrap();

        assert_eq!(err, FetchError::Status(503));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, server) = serve_once("200 OK", "<html></html>").await;

        let err = local_client(&base_url)
            .fetch_articles(5, "")
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(err.is_decode());
    }

    #[test]
    fn test_create_client() {
        assert!(create_client(&config(None)).is_ok());
        assert!(create_client(&config(Some(3))).is_ok());
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("qiita-reader/"));
    }

    #[tokio::test]
    async fn test_invalid_count_fails_before_request() {
        // Unroutable host: reaching the network would fail differently
        let client = QiitaClient::new(
            create_client(&config(None)).unwrap(),
            Endpoints::new("http://127.0.0.1:9"),
        );

        let err = client.fetch_articles(0, "").await.unwrap_err();
        assert_eq!(err, FetchError::InvalidCount(0));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = QiitaClient::new(
            create_client(&config(Some(2))).unwrap(),
            Endpoints::new("http://127.0.0.1:9"),
        );

        let err = client.fetch_articles(10, "").await.unwrap_err();
        assert!(err.is_network());
    }
}
