use std::path::PathBuf;
use std::time::Duration;

use crate::schema::Schema;
use crate::{WorkdayError, WorkdayResult};

pub const DEFAULT_GROUPING_FIELD: &str = "Committee";
pub const DEFAULT_PRIMARY_KEY_FIELD: &str = "Job Name";

/// Where the sheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// CSV export of one tab of a hosted spreadsheet.
    pub fn google_sheet(doc_id: &str, gid: u64) -> Self {
        Source::Url(format!(
            "https://docs.google.com/spreadsheets/d/{doc_id}/export?format=csv&gid={gid}"
        ))
    }

    pub fn describe(&self) -> String {
        match self {
            Source::Url(url) => url.clone(),
            Source::Path(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_bytes: usize,
    pub user_agent: String,
    /// Honor `HTTP_PROXY`-style environment settings.
    pub use_proxy: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_bytes: 16 << 20,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            use_proxy: true,
        }
    }
}

/// Startup settings for one deployment. Read once, never reloaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub schema: Schema,
    /// Column used to bucket records for counts and filtering.
    pub grouping_field: String,
    /// Column whose emptiness drops a row entirely.
    pub primary_key_field: String,
    pub fetch: FetchOptions,
}

impl Config {
    pub fn new(source: Source, schema: Schema) -> Self {
        Self {
            source,
            schema,
            grouping_field: DEFAULT_GROUPING_FIELD.to_string(),
            primary_key_field: DEFAULT_PRIMARY_KEY_FIELD.to_string(),
            fetch: FetchOptions::default(),
        }
    }

    pub fn with_grouping_field(mut self, field: impl Into<String>) -> Self {
        self.grouping_field = field.into().trim().to_string();
        self
    }

    pub fn with_primary_key_field(mut self, field: impl Into<String>) -> Self {
        self.primary_key_field = field.into().trim().to_string();
        self
    }

    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// The grouping and primary-key fields must be required columns, or a
    /// sheet missing them would pass the header check.
    pub fn validate(&self) -> WorkdayResult<()> {
        if self.schema.is_empty() {
            return Err(WorkdayError::Config("schema has no required columns".into()));
        }
        for (role, field) in [
            ("grouping field", &self.grouping_field),
            ("primary-key field", &self.primary_key_field),
        ] {
            if !self.schema.contains(field) {
                return Err(WorkdayError::Config(format!(
                    "{role} '{field}' is not a required column"
                )));
            }
        }
        if self.fetch.max_bytes == 0 {
            return Err(WorkdayError::Config("max_bytes must be positive".into()));
        }
        Ok(())
    }
}

/// Parse a `Source Column=Label` pair. The split is on the last `=`, so
/// column names may contain `=`; a missing label reuses the column name.
pub fn parse_requirement(spec: &str) -> WorkdayResult<(String, String)> {
    let (source, label) = match spec.rsplit_once('=') {
        Some((source, label)) => (source.trim(), label.trim()),
        None => (spec.trim(), spec.trim()),
    };
    if source.is_empty() {
        return Err(WorkdayError::Config(format!(
            "empty column name in requirement '{spec}'"
        )));
    }
    let label = if label.is_empty() { source } else { label };
    Ok((source.to_string(), label.to_string()))
}
