//! Catalog providers.

use async_trait::async_trait;
use storefront_data::{FetchClient, FetchError};

use crate::catalog::Product;

/// Default product endpoint.
pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://5fc9346b2af77700165ae514.mockapi.io/products";

/// Something that can produce the full product collection.
///
/// Implementations return products in the order the provider gives them;
/// the catalog store preserves that order.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read the whole product collection once.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;
}

/// Catalog served as a JSON array from an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
    endpoint: String,
}

impl HttpCatalog {
    /// Create a provider for `endpoint`.
    pub fn new(client: FetchClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint products are read from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        self.client.fetch(&self.endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_data::FetchPolicy;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_http_catalog_preserves_provider_order() {
        let body = r#"[
            {"id":"2","name":"Samsung Galaxy","price":"10.00","image":"","description":"","createdAt":"2024-01-02T00:00:00Z"},
            {"id":"1","name":"Apple iPhone13","price":12.5,"image":"","description":"","createdAt":"2024-01-01T00:00:00Z"}
        ]"#;
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        let client = FetchClient::with_policy(FetchPolicy::default().without_proxy()).unwrap();
        let catalog = HttpCatalog::new(client, format!("http://{}/products", addr));

        let products = catalog.fetch_products().await.unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }
}
