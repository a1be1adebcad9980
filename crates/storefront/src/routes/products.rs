//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::api::types::Product;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Default page size for the product listing.
const PRODUCTS_PER_PAGE: u32 = 12;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub handle: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub featured_image: Option<ImageView>,
    pub images: Vec<ImageView>,
    pub variants: Vec<VariantView>,
    pub available: bool,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Variant display data for templates.
#[derive(Clone)]
pub struct VariantView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub available: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let images: Vec<ImageView> = product
            .images
            .iter()
            .map(|img| ImageView {
                url: img.url.clone(),
                alt: img.alt_text.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_money().to_string(),
            compare_at_price: product
                .compare_at_price
                .as_ref()
                .map(|p| p.to_money().to_string()),
            featured_image: images.first().cloned(),
            images,
            variants: product
                .variants
                .iter()
                .map(|v| VariantView {
                    id: v.id.to_string(),
                    title: v.title.clone(),
                    price: v.price.to_money().to_string(),
                    available: v.available,
                })
                .collect(),
            available: product.available,
        }
    }
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_more_pages: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Quick view fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductView,
}

/// Display product listing page.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let current_page = query.page.unwrap_or(1).max(1);

    let listing = state
        .api()
        .list_products(current_page, PRODUCTS_PER_PAGE)
        .await?;

    Ok(ProductsIndexTemplate {
        products: listing.products.iter().map(ProductView::from).collect(),
        current_page,
        total_pages: listing.total_pages,
        has_more_pages: current_page < listing.total_pages,
    })
}

/// Display product detail page.
///
/// # Errors
///
/// Returns 404 if the handle doesn't exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let product = state.api().get_product(&handle).await?;

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
    })
}

/// Display quick view fragment (for HTMX).
///
/// # Errors
///
/// Returns 404 if the handle doesn't exist.
#[instrument(skip(state))]
pub async fn quick_view(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let product = state.api().get_product(&handle).await?;

    Ok(QuickViewTemplate {
        product: ProductView::from(&product),
    })
}
