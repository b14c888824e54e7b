use std::collections::HashMap;

use crate::parser::Row;

/// One data row keyed by trimmed header name.
///
/// A key is absent when the row ended before that column. Callers that ask
/// "is this field missing" should use [`Record::is_blank`], which treats an
/// absent key and an empty value alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, source: &str) -> Option<&str> {
        self.fields.get(source).map(String::as_str)
    }

    /// Value of `source`, or `""` when absent.
    pub fn value(&self, source: &str) -> &str {
        self.get(source).unwrap_or_default()
    }

    pub fn contains(&self, source: &str) -> bool {
        self.fields.contains_key(source)
    }

    pub fn is_blank(&self, source: &str) -> bool {
        self.get(source).map_or(true, |v| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Pair each row with the header by position.
///
/// Extra trailing cells are dropped; missing trailing cells leave their
/// keys out. When two header cells trim to the same name the later column
/// wins.
pub fn build<H: AsRef<str>>(header: &[H], rows: &[Row]) -> Vec<Record> {
    let header: Vec<&str> = header.iter().map(|h| h.as_ref().trim()).collect();
    rows.iter()
        .map(|row| {
            header
                .iter()
                .zip(row.iter())
                .map(|(key, cell)| (*key, cell.trim()))
                .collect()
        })
        .collect()
}
