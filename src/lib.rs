//! Workday job sheets to printable cards.
//!
//! - Source: a spreadsheet CSV export fetched over HTTP, or a file on disk
//!   (gzip/zstd and non-UTF-8 charsets are decoded first).
//! - Gate: every required column must appear in the header, otherwise the
//!   run halts with [`WorkdayError::SchemaMismatch`].
//! - Records: rows keyed by header name. Rows without a job name are
//!   dropped; blank required fields become per-record warnings.
//!
//! Data shape:
//! - [`Outcome`] `{ errors, groups, visible, skipped }`
//! - [`Record`] values accessed with `get(column) -> Option<&str>`
#![cfg_attr(docsrs, feature(doc_cfg))]
//
mod aggregate;
mod codec;
pub mod config;
mod fetch;
mod io;
pub mod logging;
mod parser;
pub mod present;
mod record;
mod schema;

pub use crate::aggregate::{
    process, FieldErrors, FilterState, GroupCounts, Keys, Outcome, RecordLabel,
};
pub use crate::config::{Config, FetchOptions, Source};
pub use crate::fetch::fetch;
pub use crate::io::{build_source_reader, reader_from_path, SourceMeta};
pub use crate::parser::{parse, parse_rows, split_header, Row};
pub use crate::record::{build, Record};
pub use crate::schema::{validate, Schema, SchemaEntry};

use thiserror::Error;
use tokio::io::AsyncRead;
use tracing::info;

#[derive(Debug, Error)]
pub enum WorkdayError {
    #[error("could not fetch sheet: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("sheet request to {url} failed with HTTP {status}")]
    Status { status: u16, url: String },
    #[error("sheet is larger than {limit} bytes")]
    BodyTooLarge { limit: usize },
    #[error("Missing required headers: {}", .0.join(", "))]
    SchemaMismatch(Vec<String>),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv_async::Error),
}

impl WorkdayError {
    /// The source could not be retrieved at all.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            WorkdayError::Fetch(_) | WorkdayError::Status { .. } | WorkdayError::BodyTooLarge { .. }
        )
    }
}

pub type WorkdayResult<T> = std::result::Result<T, WorkdayError>;

/// Parse, gate on the header, build records and aggregate them.
pub async fn evaluate<R>(
    reader: R,
    config: &Config,
    filter: &FilterState,
) -> WorkdayResult<Outcome>
where
    R: AsyncRead + Unpin + Send,
{
    let (header, rows) = split_header(parse_rows(reader).await?);

    let missing = validate(&header, &config.schema);
    if !missing.is_empty() {
        return Err(WorkdayError::SchemaMismatch(missing));
    }

    let records = build(&header, &rows);
    info!(rows = rows.len(), "built records");

    let keys = Keys {
        grouping: config.grouping_field.trim(),
        primary: config.primary_key_field.trim(),
    };
    let outcome = process(records, &config.schema, keys, filter);
    info!(
        groups = outcome.groups.len(),
        visible = outcome.visible.len(),
        warnings = outcome.errors.len(),
        skipped = outcome.skipped,
        "processed records"
    );
    Ok(outcome)
}

/// One full run against the configured source.
pub async fn run(config: &Config, filter: &FilterState) -> WorkdayResult<Outcome> {
    config.validate()?;
    match &config.source {
        Source::Url(url) => {
            let (body, meta) = fetch(url, &config.fetch).await?;
            let reader = build_source_reader(std::io::Cursor::new(body), &meta);
            evaluate(reader, config, filter).await
        }
        Source::Path(path) => {
            let (reader, _meta) = reader_from_path(path).await?;
            evaluate(reader, config, filter).await
        }
    }
}
