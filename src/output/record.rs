//! Extracted product records and the sink that collects them

/// Text written in place of a field that was not found on the page
pub const NOT_FOUND: &str = "N/A";

/// One product extracted from a listing page
///
/// Each field is `None` when the page did not provide it. The textual
/// sentinel is only substituted when the record is written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub url: Option<String>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
}

impl Record {
    /// The URL field, or the not-found sentinel
    pub fn url_or_sentinel(&self) -> &str {
        self.url.as_deref().unwrap_or(NOT_FOUND)
    }

    /// All four fields in column order, absent ones as the sentinel
    pub fn fields_or_sentinel(&self) -> [&str; 4] {
        [
            self.url_or_sentinel(),
            self.image.as_deref().unwrap_or(NOT_FOUND),
            self.name.as_deref().unwrap_or(NOT_FOUND),
            self.price.as_deref().unwrap_or(NOT_FOUND),
        ]
    }
}

/// Append-only, ordered collection of records for one run
#[derive(Debug, Default)]
pub struct RecordSink {
    records: Vec<Record>,
}

impl RecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records, keeping their order
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Hands over the collected records, leaving the sink empty
    pub fn take(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.records)
    }
}
