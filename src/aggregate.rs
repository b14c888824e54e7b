use std::collections::HashMap;
use std::fmt;

use tracing::debug;
use url::form_urlencoded;

use crate::record::Record;
use crate::schema::Schema;

/// The group currently selected for display. `None` shows every group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState(Option<String>);

impl FilterState {
    /// An empty value means no filter.
    pub fn new(value: Option<String>) -> Self {
        Self(value.filter(|v| !v.is_empty()))
    }

    pub fn all() -> Self {
        Self(None)
    }

    /// Take the `filter` parameter from a URL query string, `?` optional.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let value = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "filter")
            .map(|(_, value)| value.into_owned());
        Self::new(value)
    }

    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// Byte-exact comparison against a record's group value.
    pub fn admits(&self, group: &str) -> bool {
        self.0.as_deref().map_or(true, |f| f == group)
    }
}

/// How a record is named in warnings: its group and primary-key values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLabel {
    pub group: String,
    pub name: String,
}

impl fmt::Display for RecordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" \"{}\"", self.group, self.name)
    }
}

/// Required fields a single record left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    /// Position of the record in the input.
    pub index: usize,
    pub label: RecordLabel,
    /// Schema labels, in schema order.
    pub missing: Vec<String>,
}

/// Record counts per group value, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct GroupCounts {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl GroupCounts {
    pub fn increment(&mut self, group: &str) {
        match self.index.get(group) {
            Some(&slot) => self.order[slot].1 += 1,
            None => {
                self.index.insert(group.to_string(), self.order.len());
                self.order.push((group.to_string(), 1));
            }
        }
    }

    pub fn get(&self, group: &str) -> Option<usize> {
        self.index.get(group).map(|&slot| self.order[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order.iter().map(|(g, n)| (g.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total(&self) -> usize {
        self.order.iter().map(|(_, n)| n).sum()
    }
}

impl PartialEq for GroupCounts {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for GroupCounts {}

/// Everything the presenter needs from one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub errors: Vec<FieldErrors>,
    pub groups: GroupCounts,
    pub visible: Vec<Record>,
    /// Rows dropped for having no primary-key value.
    pub skipped: usize,
}

/// Field names the run keys on. Both should be schema source columns.
#[derive(Debug, Clone, Copy)]
pub struct Keys<'a> {
    pub grouping: &'a str,
    pub primary: &'a str,
}

/// Collect warnings, group totals and the visible subset in input order.
///
/// Rows without a primary-key value are dropped before anything else looks
/// at them. Group totals cover every remaining record, filtered or not, so a
/// filter menu can still show all groups.
pub fn process(
    records: Vec<Record>,
    schema: &Schema,
    keys: Keys<'_>,
    filter: &FilterState,
) -> Outcome {
    let mut outcome = Outcome::default();

    for (index, record) in records.into_iter().enumerate() {
        if record.is_blank(keys.primary) {
            debug!(index, "skipping row without {}", keys.primary);
            outcome.skipped += 1;
            continue;
        }

        let group = record.value(keys.grouping);
        outcome.groups.increment(group);

        let missing: Vec<String> = schema
            .iter()
            .filter(|entry| record.is_blank(&entry.source))
            .map(|entry| entry.label.clone())
            .collect();
        if !missing.is_empty() {
            let label = RecordLabel {
                group: group.to_string(),
                name: record.value(keys.primary).to_string(),
            };
            debug!(%label, ?missing, "record has blank required fields");
            outcome.errors.push(FieldErrors {
                index,
                label,
                missing,
            });
        }

        if filter.admits(group) {
            outcome.visible.push(record);
        }
    }

    outcome
}
