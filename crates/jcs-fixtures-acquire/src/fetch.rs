use anyhow::Result;
use reqwest::{StatusCode, Url};
use std::future::Future;

/// Browser User-Agent sent with every request; the manifest host blocks
/// obvious bots.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

/// Source of page bodies for the pipeline.
///
/// `None` means "no content": a non-200 status or a transport failure.
/// Callers skip whatever depended on the page.
pub trait Fetch {
    fn get_text(&self, url: &Url) -> impl Future<Output = Option<String>>;
}

/// Plain HTTP GET with the library's default redirect and timeout policy.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = client_builder().build()?;
        Ok(Self { client })
    }
}

fn client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().user_agent(USER_AGENT)
}

impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &Url) -> Option<String> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Request failed");
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(url = %url, status = %status, "Unexpected HTTP status");
            return None;
        }

        // Always UTF-8, whatever charset the server advertises
        match response.bytes().await {
            Ok(body) => {
                tracing::debug!(url = %url, bytes = body.len(), "Received body");
                Some(String::from_utf8_lossy(&body).into_owned())
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to read response body");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Same client setup, minus any proxy from the environment.
    fn local_fetcher() -> HttpFetcher {
        HttpFetcher {
            client: client_builder().no_proxy().build().unwrap(),
        }
    }

    /// Serve one canned response on a local port; the handle yields the raw request.
    async fn serve_once(status: &str, headers: &str, body: &[u8]) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = [
            format!(
                "HTTP/1.1 {status}\r\n{headers}Content-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .into_bytes(),
            body.to_vec(),
        ]
        .concat();

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
            socket.write_all(&response).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        let url = Url::parse(&format!("http://{addr}/tests/toRdf-manifest")).unwrap();
        (url, handle)
    }

    #[tokio::test]
    async fn test_ok_body_is_utf8_regardless_of_charset() {
        let (url, server) = serve_once(
            "200 OK",
            "Content-Type: text/html; charset=iso-8859-1\r\n",
            "péché".as_bytes(),
        )
        .await;

        let body = local_fetcher().get_text(&url).await;
        let request = server.await.unwrap().to_lowercase();

        assert_eq!(body.as_deref(), Some("péché"));
        assert!(request.starts_with("get /tests/tordf-manifest "));
        assert!(request.contains(&format!("user-agent: {}", USER_AGENT.to_lowercase())));
    }

    #[tokio::test]
    async fn test_non_200_is_none() {
        let (url, server) = serve_once(
            "404 Not Found",
            "Content-Type: text/html\r\n",
            b"<html>not found</html>",
        )
        .await;

        let body = local_fetcher().get_text(&url).await;
        server.await.unwrap();

        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn test_other_success_status_is_none() {
        let (url, server) = serve_once("204 No Content", "", b"").await;

        let body = local_fetcher().get_text(&url).await;
        server.await.unwrap();

        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn test_connection_refused_is_none() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/tests/toRdf-manifest")).unwrap();

        let body = local_fetcher().get_text(&url).await;

        assert_eq!(body, None);
    }
}
