//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use sundrift_core::Money;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats integer cents as a dollar amount, e.g. `1599` becomes `$15.99`.
///
/// Usage in templates: `{{ totals.subtotal|usd }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn usd(value: &Money, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use askama::Template;

    use crate::filters;

    use super::*;

    #[derive(Template)]
    #[template(source = "{{ price|usd }}", ext = "txt")]
    struct UsdTemplate {
        price: Money,
    }

    #[derive(Template)]
    #[template(source = "{{ \"\"|current_year }}", ext = "txt")]
    struct YearTemplate;

    #[test]
    fn test_usd_formats_cents() {
        let rendered = UsdTemplate {
            price: Money::from_cents(1_599),
        }
        .render()
        .unwrap();
        assert_eq!(rendered, "$15.99");
    }

    #[test]
    fn test_current_year_is_plausible() {
        let year: i32 = YearTemplate.render().unwrap().parse().unwrap();
        assert!(year >= 2025);
    }
}
