//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::products::ProductView;
use crate::filters;
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_PRODUCTS: u32 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Featured products for the grid.
    pub featured_products: Vec<ProductView>,
}

/// Display the home page.
///
/// A catalog outage degrades to an empty grid rather than a 500: the rest
/// of the page still renders.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured_products = state
        .api()
        .list_products(1, FEATURED_PRODUCTS)
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch featured products: {e}");
                Vec::new()
            },
            |listing| listing.products.iter().map(ProductView::from).collect(),
        );

    HomeTemplate { featured_products }
}
