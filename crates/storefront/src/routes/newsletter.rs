//! Newsletter subscription route handlers.
//!
//! Handles email newsletter subscriptions via the commerce API. A duplicate
//! subscription is treated as success: the subscriber is already in the
//! system.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::api::ApiError;
use crate::state::AppState;
use sundrift_core::Email;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Success fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
}

/// Error fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

/// Subscribe to newsletter (HTMX).
#[instrument(skip(state, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return SubscribeErrorTemplate {
            message: "Please enter a valid email address.".to_string(),
            email: form.email.trim().to_string(),
        }
        .into_response();
    };

    match state.api().subscribe(email.as_str()).await {
        Ok(()) => {
            tracing::info!("Newsletter subscription successful");
            SubscribeSuccessTemplate {
                email: email.as_str().to_string(),
            }
            .into_response()
        }
        // Already subscribed: treat as success
        Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::CONFLICT => {
            tracing::info!("Email already subscribed - treating as success");
            SubscribeSuccessTemplate {
                email: email.as_str().to_string(),
            }
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Newsletter subscription failed");
            SubscribeErrorTemplate {
                message: "Something went wrong. Please try again.".to_string(),
                email: email.as_str().to_string(),
            }
            .into_response()
        }
    }
}
