//! Search index builder.
//!
//! Builds the search index asynchronously from the commerce API catalog and
//! local content pages.

use tantivy::Index;
use tracing::{debug, error, info, instrument, warn};

use crate::api::CommerceClient;
use crate::content::ContentStore;

use super::{DocType, SearchFields, SearchIndex};

/// Page size used when walking the product listing.
const INDEX_PAGE_SIZE: u32 = 50;

/// Spawn a background task to build the search index.
///
/// The index will be populated asynchronously. Until complete,
/// `SearchIndex::search()` returns empty results.
pub fn build_index_async(search_index: SearchIndex, api: CommerceClient, content: ContentStore) {
    info!("Spawning background search index build task");
    tokio::spawn(async move {
        info!("Search index build task started");
        match build_index(&api, &content).await {
            Ok((index, fields)) => {
                info!("Search index built successfully, setting as ready");
                if let Err(e) = search_index.set_ready(index, fields) {
                    error!(error = %e, "Failed to set search index as ready");
                } else {
                    let docs = search_index.num_docs();
                    info!(docs, "Search index is now ready and serving requests");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to build search index");
            }
        }
    });
}

/// Build the search index (called by background task).
#[instrument(skip_all)]
async fn build_index(
    api: &CommerceClient,
    content: &ContentStore,
) -> Result<(Index, SearchFields), BuildError> {
    info!("Building search schema");
    let (schema, fields) = SearchIndex::build_schema();

    // Create in-memory index
    info!("Creating in-memory index");
    let index = Index::create_in_ram(schema);

    // Register the English stemmer tokenizer
    let tokenizer_manager = index.tokenizers();
    tokenizer_manager.register(
        "en_stem",
        tantivy::tokenizer::TextAnalyzer::builder(tantivy::tokenizer::SimpleTokenizer::default())
            .filter(tantivy::tokenizer::RemoveLongFilter::limit(40))
            .filter(tantivy::tokenizer::LowerCaser)
            .filter(tantivy::tokenizer::Stemmer::new(
                tantivy::tokenizer::Language::English,
            ))
            .build(),
    );

    let mut writer = index
        .writer(50_000_000) // 50MB buffer
        .map_err(|e| BuildError(format!("Failed to create writer: {e}")))?;

    // Index products from the commerce API
    info!("Fetching and indexing products");
    let products_count = index_products(api, &writer, &fields).await;
    info!(count = products_count, "Indexed products");

    // Index pages from local content
    info!("Indexing local pages");
    let pages_count = index_pages(content, &writer, &fields);
    info!(count = pages_count, "Indexed pages");

    // Commit the index
    info!("Committing index");
    writer
        .commit()
        .map_err(|e| BuildError(format!("Failed to commit index: {e}")))?;

    let total = products_count + pages_count;
    info!(total, "Search index built successfully");

    Ok((index, fields))
}

/// Index all products by walking the paged listing.
async fn index_products(
    api: &CommerceClient,
    writer: &tantivy::IndexWriter,
    fields: &SearchFields,
) -> usize {
    debug!("Starting to fetch products for indexing");
    let mut count = 0;
    let mut page = 1;

    loop {
        debug!(page, "Fetching products page");
        let listing = match api.list_products(page, INDEX_PAGE_SIZE).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, page, "Failed to fetch products for indexing");
                break;
            }
        };

        let batch_size = listing.products.len();
        debug!(page, batch_size, "Received products batch");

        for product in &listing.products {
            let doc = tantivy::doc!(
                fields.doc_type => DocType::Product.as_str(),
                fields.handle => product.handle.clone(),
                fields.title => product.title.clone(),
                fields.description => strip_html(&product.description),
                fields.image_url => product.featured_image().map_or(String::new(), |img| img.url.clone()),
                fields.price => product.price.to_money().to_string(),
                fields.available => u64::from(product.available),
                fields.title_text => product.title.clone(),
                fields.description_text => strip_html(&product.description),
                fields.tags_text => product.tags.join(" ")
            );

            if let Err(e) = writer.add_document(doc) {
                warn!(error = %e, handle = %product.handle, "Failed to index product");
            } else {
                count += 1;
            }
        }

        if page >= listing.total_pages || batch_size == 0 {
            break;
        }
        page += 1;
    }

    count
}

/// Index all pages from local content.
fn index_pages(
    content: &ContentStore,
    writer: &tantivy::IndexWriter,
    fields: &SearchFields,
) -> usize {
    let mut count = 0;

    for page in content.get_all_pages() {
        let doc = tantivy::doc!(
            fields.doc_type => DocType::Page.as_str(),
            fields.handle => page.slug.clone(),
            fields.title => page.meta.title.clone(),
            fields.description => page.meta.description.clone().unwrap_or_default(),
            fields.image_url => String::new(),
            fields.price => String::new(),
            fields.available => 1u64, // Pages are always "available"
            fields.title_text => page.meta.title.clone(),
            fields.description_text => strip_html(&page.content_html),
            fields.tags_text => String::new()
        );

        if let Err(e) = writer.add_document(doc) {
            warn!(error = %e, slug = %page.slug, "Failed to index page");
        } else {
            count += 1;
        }
    }

    count
}

/// Strip HTML tags from a string.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    // Decode common HTML entities
    result
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Build error wrapper.
#[derive(Debug)]
struct BuildError(String);

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::strip_html;

    #[test]
    fn test_strip_html_removes_tags() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn test_strip_html_decodes_entities() {
        assert_eq!(strip_html("salt &amp; pepper"), "salt & pepper");
    }
}
