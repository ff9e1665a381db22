//! Request parameter extraction.
//!
//! The target URL comes from the `pdf` parameter, either in the query string
//! or in a form-encoded body. Body pairs come before query pairs and the first
//! `pdf` found is used, even when it is empty.

use axum::extract::{FromRequest, Query, Request};
use axum::http::{header, Method};
use axum::Form;

use crate::error::GatewayError;
use crate::relay::TargetUrl;

/// Decoded `key=value` pairs, in the order they were sent.
pub type Pairs = Vec<(String, String)>;

/// Pull the target URL out of the request.
///
/// Missing, malformed and empty parameters all yield
/// [`GatewayError::MissingTarget`].
pub async fn read_target(request: Request) -> Result<TargetUrl, GatewayError> {
    let query = Query::<Pairs>::try_from_uri(request.uri())
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();

    let form = if has_form_body(&request) {
        Form::<Pairs>::from_request(request, &())
            .await
            .map(|Form(pairs)| pairs)
            .unwrap_or_default()
    } else {
        Pairs::new()
    };

    let pdf = first_value(&form, "pdf")
        .or_else(|| first_value(&query, "pdf"))
        .unwrap_or_default();
    TargetUrl::new(pdf)
}

fn first_value<'a>(pairs: &'a Pairs, key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn has_form_body(request: &Request) -> bool {
    if ![Method::POST, Method::PUT, Method::PATCH].contains(request.method()) {
        return false;
    }
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}
