//! Full-text search using Tantivy.
//!
//! This module provides a search index that is built asynchronously at startup
//! from:
//! - Products from the commerce API
//! - Support and legal pages from local content
//!
//! The app starts immediately with an empty index. A background task builds
//! the real index and swaps it in atomically when ready.

mod indexer;

use std::sync::{Arc, RwLock};

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, STORED, Schema, TextFieldIndexing, TextOptions, Value,
};
use tantivy::{Index, IndexReader, ReloadPolicy, Term};
use tracing::instrument;

pub use indexer::build_index_async;

/// Document types that can be indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    Product,
    Page,
}

impl DocType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Page => "page",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "product" => Some(Self::Product),
            "page" => Some(Self::Page),
            _ => None,
        }
    }
}

/// A search result item.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub doc_type: DocType,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub available: bool,
    pub score: f32,
}

/// Schema field handles for the search index.
#[derive(Clone)]
pub struct SearchFields {
    // Stored fields (returned in results)
    pub doc_type: Field,
    pub handle: Field,
    pub title: Field,
    pub description: Field,
    pub image_url: Field,
    pub price: Field,
    pub available: Field,
    // Text fields for full-text search (not stored, just indexed)
    pub title_text: Field,
    pub description_text: Field,
    pub tags_text: Field,
}

/// Inner index state (once built).
struct ReadyIndex {
    #[allow(dead_code)]
    index: Index,
    reader: IndexReader,
    fields: SearchFields,
}

/// The search index.
///
/// Starts empty and is populated asynchronously by a background task.
#[derive(Clone)]
pub struct SearchIndex {
    inner: Arc<RwLock<Option<ReadyIndex>>>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    /// Create a new empty search index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    /// Check if the index is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Set the built index. Called by the background builder task.
    pub(crate) fn set_ready(&self, index: Index, fields: SearchFields) -> Result<(), SearchError> {
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::Index(format!("Failed to create reader: {e}")))?;

        let ready = ReadyIndex {
            index,
            reader,
            fields,
        };

        *self
            .inner
            .write()
            .map_err(|_| SearchError::Index("Lock poisoned".to_string()))? = Some(ready);

        Ok(())
    }

    /// Build the schema for the search index.
    pub(crate) fn build_schema() -> (Schema, SearchFields) {
        use tantivy::schema::{NumericOptions, STRING};

        let mut schema_builder = Schema::builder();

        // Stored and indexed fields
        // STRING means indexed but not tokenized (exact match)
        let doc_type = schema_builder.add_text_field("doc_type", STRING | STORED);
        let handle = schema_builder.add_text_field("handle", STORED);
        let title = schema_builder.add_text_field("title", STORED);
        let description = schema_builder.add_text_field("description", STORED);
        let image_url = schema_builder.add_text_field("image_url", STORED);
        let price = schema_builder.add_text_field("price", STORED);

        let available =
            schema_builder.add_u64_field("available", NumericOptions::default().set_stored());

        // Text indexing options for full-text search
        let text_indexing = TextFieldIndexing::default()
            .set_tokenizer("en_stem")
            .set_index_option(IndexRecordOption::WithFreqsAndPositions);
        let text_options = TextOptions::default().set_indexing_options(text_indexing);

        // Indexed text fields (for searching)
        let title_text = schema_builder.add_text_field("title_text", text_options.clone());
        let description_text =
            schema_builder.add_text_field("description_text", text_options.clone());
        let tags_text = schema_builder.add_text_field("tags_text", text_options);

        let schema = schema_builder.build();
        let fields = SearchFields {
            doc_type,
            handle,
            title,
            description,
            image_url,
            price,
            available,
            title_text,
            description_text,
            tags_text,
        };

        (schema, fields)
    }

    /// Search the index with the given query string.
    ///
    /// Returns empty results if the index isn't ready yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the index lock is poisoned or the search query fails.
    #[instrument(skip(self))]
    // Allow: The RwLockReadGuard must be held for the entire search operation because
    // `ready` is a reference that borrows from the guard's protected data. Dropping
    // the guard early would release the read lock and invalidate the `ready` reference,
    // causing use-after-free. The searcher, fields, and all document access depend on
    // this lock being held.
    #[allow(clippy::significant_drop_tightening)]
    pub fn search(&self, query_str: &str, limit: usize) -> Result<SearchResults, SearchError> {
        let query_str = query_str.trim().to_lowercase();
        if query_str.is_empty() {
            return Ok(SearchResults::default());
        }

        let guard = self
            .inner
            .read()
            .map_err(|_| SearchError::Index("Lock poisoned".to_string()))?;

        let Some(ready) = guard.as_ref() else {
            // Index not ready yet, return empty results
            return Ok(SearchResults {
                query: query_str,
                ..Default::default()
            });
        };

        let searcher = ready.reader.searcher();

        // Build a boolean query combining prefix and fuzzy matches
        let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        // For each search term, create queries on searchable fields
        for term in query_str.split_whitespace() {
            // For short terms, use prefix matching (regex)
            // For longer terms, use exact + fuzzy matching
            if term.len() < 3 {
                // Prefix match on title using regex (e.g., "f" matches "flannel")
                // Escape basic regex metacharacters for safety
                let escaped: String = term
                    .chars()
                    .flat_map(|c| match c {
                        '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '{' | '}'
                        | '|' | '\\' => vec!['\\', c],
                        _ => vec![c],
                    })
                    .collect();
                let prefix_pattern = format!("{escaped}.*");
                if let Ok(regex_query) =
                    RegexQuery::from_pattern(&prefix_pattern, ready.fields.title_text)
                {
                    subqueries.push((Occur::Should, Box::new(regex_query)));
                }
                // Also try prefix on tags
                if let Ok(regex_query) =
                    RegexQuery::from_pattern(&prefix_pattern, ready.fields.tags_text)
                {
                    subqueries.push((Occur::Should, Box::new(regex_query)));
                }
            } else {
                // Title exact match
                let title_term = Term::from_field_text(ready.fields.title_text, term);
                subqueries.push((
                    Occur::Should,
                    Box::new(TermQuery::new(title_term.clone(), IndexRecordOption::Basic)),
                ));

                // Title fuzzy match (1 edit distance)
                let fuzzy_title = FuzzyTermQuery::new(title_term, 1, true);
                subqueries.push((Occur::Should, Box::new(fuzzy_title)));

                // Description fuzzy match
                let desc_term = Term::from_field_text(ready.fields.description_text, term);
                let fuzzy_desc = FuzzyTermQuery::new(desc_term, 1, true);
                subqueries.push((Occur::Should, Box::new(fuzzy_desc)));

                // Tags exact match
                let tags_term = Term::from_field_text(ready.fields.tags_text, term);
                subqueries.push((
                    Occur::Should,
                    Box::new(TermQuery::new(tags_term, IndexRecordOption::Basic)),
                ));
            }
        }

        let query = BooleanQuery::new(subqueries);

        // Search for more results than needed to allow grouping by type
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit * 2))
            .map_err(|e| SearchError::Query(format!("Search failed: {e}")))?;

        // Collect and group results
        let mut products = Vec::new();
        let mut pages = Vec::new();

        for (score, doc_address) in top_docs {
            let doc = searcher
                .doc::<tantivy::TantivyDocument>(doc_address)
                .map_err(|e| SearchError::Query(format!("Failed to retrieve doc: {e}")))?;

            let result = Self::doc_to_result(&ready.fields, &doc, score)?;

            match result.doc_type {
                DocType::Product if products.len() < limit => products.push(result),
                DocType::Page if pages.len() < limit => pages.push(result),
                _ => {}
            }
        }

        Ok(SearchResults {
            products,
            pages,
            query: query_str,
        })
    }

    /// Convert a Tantivy document to a search result.
    fn doc_to_result(
        fields: &SearchFields,
        doc: &tantivy::TantivyDocument,
        score: f32,
    ) -> Result<SearchResult, SearchError> {
        let get_text = |field: Field| -> String {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        let doc_type_str = get_text(fields.doc_type);
        let doc_type = DocType::parse(&doc_type_str)
            .ok_or_else(|| SearchError::Query(format!("Invalid doc_type: {doc_type_str}")))?;

        let image_url = get_text(fields.image_url);
        let price = get_text(fields.price);
        let available = doc
            .get_first(fields.available)
            .and_then(|v| v.as_u64())
            .is_some_and(|v| v == 1);

        Ok(SearchResult {
            doc_type,
            handle: get_text(fields.handle),
            title: get_text(fields.title),
            description: get_text(fields.description),
            image_url: if image_url.is_empty() {
                None
            } else {
                Some(image_url)
            },
            price: if price.is_empty() { None } else { Some(price) },
            available,
            score,
        })
    }

    /// Get the number of documents in the index, or 0 if not ready.
    #[must_use]
    pub fn num_docs(&self) -> u64 {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|r| r.reader.searcher().num_docs()))
            .unwrap_or(0)
    }
}

/// Grouped search results.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub products: Vec<SearchResult>,
    pub pages: Vec<SearchResult>,
    pub query: String,
}

impl SearchResults {
    /// Check if there are any results.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty() && self.pages.is_empty()
    }

    /// Get the total number of results.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.products.len() + self.pages.len()
    }
}

/// Search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Index error: {0}")]
    Index(String),
    #[error("Query error: {0}")]
    Query(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index_returns_no_results() {
        let index = SearchIndex::new();
        assert!(!index.is_ready());

        let results = index.search("flannel", 10).unwrap();
        assert!(results.is_empty());
        assert_eq!(results.query, "flannel");
    }

    #[test]
    fn test_empty_query_returns_default() {
        let index = SearchIndex::new();
        let results = index.search("   ", 10).unwrap();
        assert!(results.is_empty());
        assert_eq!(results.total(), 0);
    }

    #[test]
    fn test_doc_type_roundtrip() {
        assert_eq!(DocType::parse("product"), Some(DocType::Product));
        assert_eq!(DocType::parse("page"), Some(DocType::Page));
        assert_eq!(DocType::parse("article"), None);
        assert_eq!(DocType::Product.as_str(), "product");
    }
}
