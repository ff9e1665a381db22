//! Route handlers.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::GatewayError;
use crate::http::request::read_target;
use crate::http::response::stream_body;
use crate::http::server::AppState;
use crate::observability::metrics::{self, Outcome};

/// `/tika`: relay the document named by `pdf` and stream back the result.
pub async fn extract_handler(State(state): State<AppState>, request: Request) -> Response {
    match extract(&state, request).await {
        Ok(response) => {
            metrics::record_request(Outcome::Relayed);
            response
        }
        Err(err) => {
            match &err {
                GatewayError::MissingTarget => {
                    metrics::record_request(Outcome::MissingTarget);
                    tracing::debug!("Extraction requested without a target");
                }
                other => {
                    metrics::record_request(Outcome::Failed);
                    tracing::warn!(error = %other, "Relay failed");
                }
            }
            err.into_response()
        }
    }
}

async fn extract(state: &AppState, request: Request) -> Result<Response, GatewayError> {
    let target = read_target(request).await?;
    tracing::info!(url = %target, "Relaying document");

    let result = state.pipeline.run(&target).await?;
    Ok(stream_body(result).into_response())
}

/// Every other path: the static index page.
pub async fn index_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, GatewayError> {
    let path = &state.config.static_files.index_path;

    if let Err(source) = tokio::fs::File::open(path).await {
        tracing::warn!(path = %path, error = %source, "Cannot open index file");
        return Err(GatewayError::IndexFile {
            path: path.clone(),
            source,
        });
    }

    // ServeFile answers 405 to anything but GET and HEAD.
    let (mut parts, body) = request.into_parts();
    if parts.method != Method::HEAD {
        parts.method = Method::GET;
    }

    let response = ServeFile::new(path)
        .oneshot(Request::from_parts(parts, body))
        .await
        .unwrap_or_else(|never| match never {});
    Ok(response.map(Body::new))
}
