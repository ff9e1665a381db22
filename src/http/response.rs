//! Streaming the extraction result back to the caller.
//!
//! Headers are already sent by the time the result is read, so a read
//! failure cannot change the status. Instead the error text is appended to
//! the body and the stream ends, the same in-band signaling used for
//! pipeline failures.

use std::convert::Infallible;

use axum::body::{Body, Bytes};
use futures_util::stream;
use tokio::io::AsyncReadExt;

use crate::error::RelayError;
use crate::relay::ExtractionStream;

const CHUNK_SIZE: usize = 8 * 1024;

/// Turn the result stream into a response body.
pub fn stream_body(result: ExtractionStream) -> Body {
    let chunks = stream::unfold(Some(result), |state| async move {
        let mut result = state?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        match result.read(&mut buf).await {
            Ok(0) => None,
            Ok(n) => {
                buf.truncate(n);
                Some((Ok::<_, Infallible>(Bytes::from(buf)), Some(result)))
            }
            Err(e) => {
                let err = RelayError::from_read(e, result.read_deadline());
                tracing::warn!(error = %err, "Reading extraction result failed");
                Some((Ok(Bytes::from(err.to_body())), None))
            }
        }
    });
    Body::from_stream(chunks)
}
