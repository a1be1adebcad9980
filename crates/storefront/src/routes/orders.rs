//! Order confirmation route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::api::types::Order;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;
use sundrift_core::{OrderId, PaymentMethod};

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: Order,
    /// Human-readable payment method label.
    pub method_label: String,
    /// Whether the COD fee row should be shown.
    pub is_cod: bool,
}

/// Display an order confirmation / status page.
///
/// # Errors
///
/// Returns 404 if the order doesn't exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let order = state.api().get_order(&OrderId::new(id)).await?;

    let method_label = order.payment_method.label().to_string();
    let is_cod = order.payment_method == PaymentMethod::Cod;

    Ok(OrderShowTemplate {
        order,
        method_label,
        is_cod,
    })
}
