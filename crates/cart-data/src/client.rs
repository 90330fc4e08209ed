//! REST client for the stock and catalog backend.

use async_trait::async_trait;
use cart_model::{Product, ProductId, StockInfo};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::lookup::{FetchError, ProductCatalog, StockLookup};
use crate::timeout::TimeoutConfig;

/// Body of `GET /stock/{id}`. Backends may echo the id; only the amount is read.
#[derive(Debug, Deserialize)]
struct StockBody {
    amount: i64,
}

/// HTTP client for a backend exposing `GET /stock/{id}` and
/// `GET /products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: Url,
    client: reqwest::Client,
    timeout: TimeoutConfig,
}

impl HttpCatalog {
    /// Create a new client rooted at `base_url`.
    pub fn new(base_url: &str, timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::Request(format!("invalid base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Request(format!(
                "base url cannot hold paths: {}",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    /// Base URL of the backend.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Timeouts applied to every request.
    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout
    }

    /// URL of `/{collection}/{id}`, with the id percent-encoded as one segment.
    pub fn resource_url(&self, collection: &str, id: &ProductId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection).push(&id.to_string());
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "fetching");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(e, &url))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Deserialization(e.to_string())
            }
        })
    }
}

#[async_trait]
impl StockLookup for HttpCatalog {
    async fn stock(&self, id: &ProductId) -> Result<StockInfo, FetchError> {
        let body: StockBody = self.fetch(self.resource_url("stock", id)).await?;
        Ok(StockInfo::new(id.clone(), body.amount))
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    async fn product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.fetch(self.resource_url("products", id)).await
    }
}

fn transport_error(e: reqwest::Error, url: &Url) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else if e.is_connect() {
        FetchError::Connection(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned response to every connection; returns the base URL.
    async fn backend(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    fn client(base_url: &str) -> HttpCatalog {
        HttpCatalog::new(base_url, TimeoutConfig::from_total(Duration::from_secs(2))).unwrap()
    }

    #[test]
    fn test_resource_url() {
        let client = HttpCatalog::new("http://localhost:3333", TimeoutConfig::default()).unwrap();
        assert_eq!(
            client.resource_url("stock", &ProductId::from(1)).as_str(),
            "http://localhost:3333/stock/1"
        );
    }

    #[test]
    fn test_resource_url_keeps_base_path() {
        let client =
            HttpCatalog::new("http://localhost:3333/api/", TimeoutConfig::default()).unwrap();
        assert_eq!(
            client
                .resource_url("products", &ProductId::text("a/b"))
                .as_str(),
            "http://localhost:3333/api/products/a%2Fb"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpCatalog::new("not a url", TimeoutConfig::default());
        assert!(matches!(result, Err(FetchError::Request(_))));

        let result = HttpCatalog::new("mailto:shop@example.com", TimeoutConfig::default());
        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_fetch_error() {
        // port 9 (discard) is closed on any sane test host
        let client = HttpCatalog::new(
            "http://127.0.0.1:9",
            TimeoutConfig::from_total(Duration::from_millis(500)),
        )
        .unwrap();

        let result = client.stock(&ProductId::from(1)).await;
        assert!(matches!(
            result,
            Err(FetchError::Connection(_)) | Err(FetchError::Timeout(_)) | Err(FetchError::Request(_))
        ));
    }

    #[tokio::test]
    async fn test_stock_body_with_amount_only() {
        let client = client(&backend("200 OK", r#"{"amount":5}"#).await);

        let stock = client.stock(&ProductId::from(7)).await.unwrap();
        assert_eq!(stock, StockInfo::new(7, 5));
    }

    #[tokio::test]
    async fn test_stock_body_with_echoed_id() {
        let client = client(&backend("200 OK", r#"{"id":"7","amount":2}"#).await);

        // keyed by the requested id, not the echoed one
        let stock = client.stock(&ProductId::from(7)).await.unwrap();
        assert_eq!(stock, StockInfo::new(7, 2));
    }

    #[tokio::test]
    async fn test_product_body() {
        let client = client(
            &backend(
                "200 OK",
                r#"{"id":1,"title":"Tênis de Caminhada","price":179.9,"image":"a.jpg"}"#,
            )
            .await,
        );

        let product = client.product(&ProductId::from(1)).await.unwrap();
        assert_eq!(product.title, "Tênis de Caminhada");
        assert_eq!(product.image, "a.jpg");
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let client = client(&backend("404 Not Found", "{}").await);

        let result = client.stock(&ProductId::from(1)).await;
        assert!(matches!(result, Err(FetchError::NotFound(url)) if url.ends_with("/stock/1")));
        let result = client.product(&ProductId::from(1)).await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_http_error() {
        let server_error = client(&backend("500 Internal Server Error", "{}").await);
        let result = server_error.stock(&ProductId::from(1)).await;
        assert!(matches!(result, Err(FetchError::Http { status: 500, .. })));

        let bad_request = client(&backend("400 Bad Request", "{}").await);
        let result = bad_request.product(&ProductId::from(1)).await;
        assert!(matches!(result, Err(FetchError::Http { status: 400, .. })));
    }

    #[tokio::test]
    async fn test_malformed_body_is_deserialization_error() {
        let client = client(&backend("200 OK", r#"{"stock":"plenty"}"#).await);

        let result = client.stock(&ProductId::from(1)).await;
        assert!(matches!(result, Err(FetchError::Deserialization(_))));
    }

    #[test]
    fn test_accessors() {
        let timeout = TimeoutConfig::from_total(Duration::from_secs(3));
        let client = HttpCatalog::new("http://localhost:3333", timeout).unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:3333/");
        assert_eq!(client.timeout(), timeout);
    }
}
