use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::errors::{NewsdeskError, NewsdeskResult};

/// Query parameters that carry credentials and must not reach the logs
const SECRET_PARAMS: &[&str] = &["apikey", "apiKey", "key", "cx"];

/// One GET returning a JSON document. Implementations make a single attempt.
#[async_trait]
pub trait JsonClient: Send + Sync {
    async fn get_json(&self, url: &Url) -> NewsdeskResult<Value>;
}

pub struct HttpJsonClient {
    client: Client,
}

impl HttpJsonClient {
    pub fn new(timeout: Duration) -> NewsdeskResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonClient for HttpJsonClient {
    async fn get_json(&self, url: &Url) -> NewsdeskResult<Value> {
        tracing::debug!(url = %redact(url), "GET");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsdeskError::Http {
                status: status.as_u16(),
                reason: error_reason(&body)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| NewsdeskError::Parse(e.to_string()))
    }
}

/// Providers report failures as `{message}`, `{error: {message}}` or `{results: {message}}`
fn error_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    ["/message", "/error/message", "/results/message", "/error"]
        .iter()
        .filter_map(|p| value.pointer(p))
        .find_map(Value::as_str)
        .map(str::to_string)
}

/// Copy of the URL with credential parameters masked, for logging
pub fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if SECRET_PARAMS.contains(&k.as_ref()) {
                (k.into_owned(), "***".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    if pairs.is_empty() {
        return redacted.to_string();
    }

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request on a local port with a fixed response
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        Url::parse(&format!("http://{}/api/1/news?apikey=k", addr)).unwrap()
    }

    fn client() -> HttpJsonClient {
        HttpJsonClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_json() {
        let url = serve_once("200 OK", r#"{"status":"success","results":[]}"#).await;

        let value = client().get_json(&url).await.unwrap();
        assert_eq!(value["status"], "success");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error_with_provider_message() {
        let url = serve_once(
            "401 Unauthorized",
            r#"{"status":"error","message":"apiKey missing"}"#,
        )
        .await;

        match client().get_json(&url).await {
            Err(NewsdeskError::Http { status, reason }) => {
                assert_eq!(status, 401);
                assert_eq!(reason, "apiKey missing");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status_without_message_uses_canonical_reason() {
        let url = serve_once("503 Service Unavailable", "<html>down</html>").await;

        assert!(matches!(
            client().get_json(&url).await,
            Err(NewsdeskError::Http { status: 503, ref reason }) if reason == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let url = serve_once("200 OK", "<html>not json</html>").await;

        assert!(matches!(
            client().get_json(&url).await,
            Err(NewsdeskError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_port_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/news", addr)).unwrap();
        assert!(matches!(
            client().get_json(&url).await,
            Err(NewsdeskError::Network(_))
        ));
    }

    #[test]
    fn test_redact_masks_keys() {
        let url = Url::parse(
            "https://newsdata.io/api/1/news?apikey=secret&language=en&country=in",
        )
        .unwrap();

        let redacted = redact(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("apikey=***") || redacted.contains("apikey=%2A%2A%2A"));
        assert!(redacted.contains("language=en"));
    }

    #[test]
    fn test_redact_without_query() {
        let url = Url::parse("https://example.com/path").unwrap();
        assert_eq!(redact(&url), "https://example.com/path");
    }

    #[test]
    fn test_error_reason_shapes() {
        assert_eq!(
            error_reason(r#"{"status":"error","message":"apiKey missing"}"#).as_deref(),
            Some("apiKey missing")
        );
        assert_eq!(
            error_reason(r#"{"error":{"code":403,"message":"quota exceeded"}}"#).as_deref(),
            Some("quota exceeded")
        );
        assert_eq!(
            error_reason(r#"{"status":"error","results":{"message":"bad key"}}"#).as_deref(),
            Some("bad key")
        );
        assert_eq!(error_reason("not json"), None);
    }
}
