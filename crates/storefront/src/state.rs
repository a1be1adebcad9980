//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::CommerceClient;
use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::search::{SearchIndex, build_index_async};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the API client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: CommerceClient,
    content: ContentStore,
    search: SearchIndex,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the local content pages eagerly; the search index starts empty
    /// and must be populated via [`AppState::start_search_indexing`].
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self, ContentError> {
        let api = CommerceClient::new(&config.commerce);
        let content = ContentStore::load(&config.content_dir)?;
        let search = SearchIndex::new();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                content,
                search,
            }),
        })
    }

    /// Spawn the background task that builds the search index.
    pub fn start_search_indexing(&self) {
        build_index_async(
            self.search().clone(),
            self.api().clone(),
            self.content().clone(),
        );
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the commerce API client.
    #[must_use]
    pub fn api(&self) -> &CommerceClient {
        &self.inner.api
    }

    /// Get a reference to the content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the search index.
    #[must_use]
    pub fn search(&self) -> &SearchIndex {
        &self.inner.search
    }
}
