//! Contact form route handlers.
//!
//! Handles product question submissions, forwarded to the commerce API.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::types::ContactRequest;
use crate::state::AppState;
use sundrift_core::Email;

/// Product question form data.
#[derive(Debug, Deserialize)]
pub struct ProductQuestionForm {
    pub product: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Submit a product question.
///
/// POST /contact/product-question
#[instrument(skip(state, form), fields(product = %form.product))]
pub async fn product_question(
    State(state): State<AppState>,
    Json(form): Json<ProductQuestionForm>,
) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Please enter a valid email address.".to_string()),
            }),
        );
    };

    // Validate required fields
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Name and message are required.".to_string()),
            }),
        );
    }

    let request = ContactRequest {
        product: form.product.trim().to_string(),
        name: form.name.trim().to_string(),
        email: email.as_str().to_string(),
        phone: form
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from),
        message: form.message.trim().to_string(),
    };

    match state.api().submit_question(&request).await {
        Ok(()) => {
            tracing::info!(product = %request.product, "Product question submitted");
            (
                StatusCode::OK,
                Json(ContactResponse {
                    success: true,
                    message: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to submit product question");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse {
                    success: false,
                    message: Some("Something went wrong. Please try again.".to_string()),
                }),
            )
        }
    }
}
