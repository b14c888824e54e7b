//! Remote retrieval. The whole body is buffered before parsing starts.

use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use reqwest::header::{HeaderName, CONTENT_ENCODING, CONTENT_TYPE};
use tracing::{debug, info};

use crate::config::FetchOptions;
use crate::io::SourceMeta;
use crate::{WorkdayError, WorkdayResult};

/// Download `url`, following redirects. Non-2xx statuses and bodies over
/// `opts.max_bytes` are errors.
pub async fn fetch(url: &str, opts: &FetchOptions) -> WorkdayResult<(Bytes, SourceMeta)> {
    let mut builder = reqwest::Client::builder()
        .user_agent(opts.user_agent.as_str())
        .timeout(opts.timeout);
    if !opts.use_proxy {
        builder = builder.no_proxy();
    }
    let client = builder.build()?;

    debug!(url, "requesting sheet");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(WorkdayError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let header = |name: HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    let meta = SourceMeta::from_headers(
        &header(CONTENT_TYPE),
        &header(CONTENT_ENCODING),
        response.url().path(),
    );

    if let Some(len) = response.content_length() {
        if len > opts.max_bytes as u64 {
            return Err(WorkdayError::BodyTooLarge {
                limit: opts.max_bytes,
            });
        }
    }

    let mut body = BytesMut::new();
    let mut chunks = response.bytes_stream();
    while let Some(chunk) = chunks.try_next().await? {
        if body.len() + chunk.len() > opts.max_bytes {
            return Err(WorkdayError::BodyTooLarge {
                limit: opts.max_bytes,
            });
        }
        body.extend_from_slice(&chunk);
    }

    info!(url, bytes = body.len(), content_type = %meta.content_type, "fetched sheet");
    Ok((body.freeze(), meta))
}
