//! Commerce API client implementation.
//!
//! Plain JSON-over-HTTP with `reqwest`. Product reads are cached with
//! `moka` (5-minute TTL); order submission and form posts are never
//! cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::api::types::{
    ContactRequest, Order, OrderRequest, Product, ProductPage, SubscribeRequest,
};
use crate::api::ApiError;
use crate::config::CommerceApiConfig;
use sundrift_core::OrderId;

/// Cached API responses.
#[derive(Clone)]
enum CacheValue {
    Product(Arc<Product>),
    ProductPage(Arc<ProductPage>),
}

/// Client for the Sundrift Commerce API.
///
/// Cheaply cloneable; all clones share one connection pool and cache.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    cache: Cache<String, CacheValue>,
}

impl CommerceClient {
    /// Create a new Commerce API client.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CommerceClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Cheap reachability probe for the readiness endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the API root is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let url = format!("{}/health", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: response.status(),
                message: "health check failed".to_string(),
            })
        }
    }

    /// Fetch one page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response can't be
    /// decoded.
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: u32, limit: u32) -> Result<ProductPage, ApiError> {
        let cache_key = format!("products:{page}:{limit}");
        if let Some(CacheValue::ProductPage(cached)) = self.inner.cache.get(&cache_key).await {
            debug!(cache_key, "Product page cache hit");
            return Ok((*cached).clone());
        }

        let path = format!("/products?page={page}&limit={limit}");
        let product_page: ProductPage = self.get_json(&path).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::ProductPage(Arc::new(product_page.clone())))
            .await;

        Ok(product_page)
    }

    /// Fetch a single product by handle.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the handle doesn't exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, handle: &str) -> Result<Product, ApiError> {
        let cache_key = format!("product:{handle}");
        if let Some(CacheValue::Product(cached)) = self.inner.cache.get(&cache_key).await {
            debug!(cache_key, "Product cache hit");
            return Ok((*cached).clone());
        }

        let path = format!("/products/{handle}");
        let product: Product = self.get_json(&path).await.map_err(|e| match e {
            ApiError::NotFound(_) => ApiError::NotFound(handle.to_string()),
            other => other,
        })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Arc::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Submit an order assembled by the checkout wizard.
    ///
    /// Never cached, never retried here: the caller decides how to surface
    /// a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects or cannot accept the order.
    #[instrument(skip_all, fields(reference = %request.reference))]
    pub async fn submit_order(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        self.post_json("/orders", request).await
    }

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the order doesn't exist.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        let path = format!("/orders/{id}");
        self.get_json(&path).await.map_err(|e| match e {
            ApiError::NotFound(_) => ApiError::NotFound(id.to_string()),
            other => other,
        })
    }

    /// Subscribe an email address to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the subscription. A duplicate
    /// subscription comes back as [`ApiError::Status`] with 409.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, email: &str) -> Result<(), ApiError> {
        let request = SubscribeRequest { email };
        let _: serde_json::Value = self.post_json("/subscribers", &request).await?;
        Ok(())
    }

    /// Submit a product question from the contact form.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot accept the message.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn submit_question(&self, request: &ContactRequest) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post_json("/contact", request).await?;
        Ok(())
    }

    /// Execute a GET request and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    /// Execute a POST request with a JSON body and decode the response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.api_token)
            .json(body)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    /// Map status codes and decode the body.
    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(ApiError::Status {
                status,
                message: body.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
