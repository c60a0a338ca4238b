use std::io::Read;
use std::path::Path;

use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};

/// Column-oriented read access to a tabular dataset.
///
/// Columns are aligned by row index: `column(a)[i]` and `column(b)[i]` belong to the same row.
pub trait TabularSource {
    /// Return `true` when a column with this header name exists.
    fn has_column(&self, name: &str) -> bool;

    /// Fetch an entire column as strings, one per row.
    fn column(&self, name: &str) -> RiverGlyphResult<Vec<String>>;

    /// Number of data rows (the header row is not counted).
    fn row_count(&self) -> usize;
}

/// In-memory table loaded from a headered CSV document.
#[derive(Clone, Debug, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Load a CSV file. A missing or unreadable file is a data error.
    pub fn from_path(path: &Path) -> RiverGlyphResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| {
            RiverGlyphError::data(format!("failed to open dataset '{}': {e}", path.display()))
        })?;
        let table = Self::from_reader(f).map_err(|e| match e {
            RiverGlyphError::Data(msg) => {
                RiverGlyphError::data(format!("dataset '{}': {msg}", path.display()))
            }
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            rows = table.rows.len(),
            columns = table.headers.len(),
            "loaded dataset"
        );
        Ok(table)
    }

    /// Read a headered CSV document from any reader.
    ///
    /// Records may be shorter or longer than the header; missing cells read as empty strings.
    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the load.
    pub fn from_reader<R: Read>(reader: R) -> RiverGlyphResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .byte_headers()
            .map_err(|e| RiverGlyphError::data(format!("failed to read csv header: {e}")))?
            .iter()
            .map(|h| lossy_cell(h).trim().to_owned())
            .collect::<Vec<_>>();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(RiverGlyphError::data("csv header row is empty"));
        }

        let mut rows = Vec::new();
        let mut lossy_rows = 0usize;
        for (i, record) in rdr.byte_records().enumerate() {
            let record = record.map_err(|e| {
                RiverGlyphError::data(format!("failed to read csv record {}: {e}", i + 1))
            })?;
            if std::str::from_utf8(record.as_slice()).is_err() {
                lossy_rows += 1;
            }
            rows.push(record.iter().map(lossy_cell).collect());
        }
        if lossy_rows > 0 {
            tracing::warn!(
                rows = lossy_rows,
                "csv records with invalid utf-8 were decoded lossily"
            );
        }

        Ok(Self { headers, rows })
    }

    /// Header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn lossy_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl TabularSource for CsvTable {
    fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column(&self, name: &str) -> RiverGlyphResult<Vec<String>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| RiverGlyphError::data(format!("dataset has no '{name}' column")))?;
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(idx).cloned().unwrap_or_default())
            .collect())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/table.rs"]
mod tests;
