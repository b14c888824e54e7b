use tracing::warn;

/// Required source columns and the short labels shown for them.
///
/// Iteration order is insertion order. Source names are stored trimmed, the
/// same way header cells are compared. Requiring a column twice keeps its
/// first position and takes the later label, so keys stay unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Exact spreadsheet header text, punctuation included.
    pub source: String,
    /// Canonical label used in warnings and on cards.
    pub label: String,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Schema::insert`].
    pub fn require(mut self, source: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert(source, label);
        self
    }

    pub fn insert(&mut self, source: impl Into<String>, label: impl Into<String>) {
        let source = source.into().trim().to_string();
        let label = label.into();
        match self.entries.iter_mut().find(|e| e.source == source) {
            Some(entry) => entry.label = label,
            None => self.entries.push(SchemaEntry { source, label }),
        }
    }

    /// The workday job sheet. `work_day_column` changes every season, so it
    /// is supplied by the deployment.
    pub fn workday(work_day_column: impl Into<String>) -> Self {
        Self::new()
            .require("Committee", "Committee")
            .require("Job Name", "Job Name")
            .require("Job Description", "Description")
            .require("Supplies Needed", "Supplies Needed")
            .require(
                "Where will the supplies be for the job on the work day?",
                "Supply Location",
            )
            .require(
                "Honcho (leader who gives direction/provides supplies for project)",
                "Honcho",
            )
            .require(
                "Number of workers: if Honcho is working this job then include them in this count.",
                "# workers",
            )
            .require("How long will it take per worker?", "time")
            .require("Priority - Indicate: Low, Medium, or High", "priority")
            .require(work_day_column, "work day")
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, source: &str) -> bool {
        let source = source.trim();
        self.entries.iter().any(|e| e.source == source)
    }

    pub fn label_of(&self, source: &str) -> Option<&str> {
        let source = source.trim();
        self.entries
            .iter()
            .find(|e| e.source == source)
            .map(|e| e.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, L: Into<String>> FromIterator<(S, L)> for Schema {
    fn from_iter<I: IntoIterator<Item = (S, L)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (source, label) in iter {
            schema.insert(source, label);
        }
        schema
    }
}

/// Source columns of `schema` that no trimmed header cell matches exactly.
/// Returned in schema order; empty means the sheet can be rendered.
pub fn validate<H: AsRef<str>>(header: &[H], schema: &Schema) -> Vec<String> {
    let trimmed: Vec<&str> = header.iter().map(|h| h.as_ref().trim()).collect();
    let missing: Vec<String> = schema
        .iter()
        .filter(|entry| !trimmed.contains(&entry.source.as_str()))
        .map(|entry| entry.source.clone())
        .collect();

    if !missing.is_empty() {
        warn!(?missing, "required headers not found");
    }
    missing
}
