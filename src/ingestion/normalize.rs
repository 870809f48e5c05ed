//! Schema normalization: the single validation gate between parsing and persistence.

use std::collections::HashSet;

use crate::error::{IngestError, IngestResult};
use crate::types::{ParsedTable, RawTable};

/// Name given to a header cell that is blank.
pub const EMPTY_HEADER_NAME: &str = "__EMPTY";

/// Turn parser output into a [`ParsedTable`].
///
/// Fails with [`IngestError::SchemaDerivationFailed`] when rows exist but no columns were derived,
/// or when the derived columns are not unique. Rows are passed through untouched: keys a row does
/// not carry stay absent, and extra keys stay in the row without being added to `columns`.
pub fn normalize(raw: RawTable) -> IngestResult<ParsedTable> {
    let RawTable { columns, rows } = raw;

    if columns.is_empty() && !rows.is_empty() {
        return Err(IngestError::SchemaDerivationFailed {
            message: format!("{} row(s) parsed but no columns could be derived", rows.len()),
        });
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for c in &columns {
        if !seen.insert(c.as_str()) {
            return Err(IngestError::SchemaDerivationFailed {
                message: format!("duplicate column '{c}'. columns={columns:?}"),
            });
        }
    }

    let row_count = rows.len();
    Ok(ParsedTable {
        columns,
        rows,
        row_count,
    })
}

/// Builds unique column names from raw header cells.
///
/// Blank cells become [`EMPTY_HEADER_NAME`]; a repeated name gets the first free `_1`, `_2`, ...
/// suffix.
#[derive(Debug, Default)]
pub struct HeaderNames {
    names: Vec<String>,
    taken: HashSet<String>,
}

impl HeaderNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next header cell, returning the unique name assigned to it.
    pub fn push(&mut self, raw: &str) -> &str {
        let base = if raw.trim().is_empty() {
            EMPTY_HEADER_NAME
        } else {
            raw
        };

        let mut name = base.to_string();
        let mut suffix = 1usize;
        while self.taken.contains(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }

        self.taken.insert(name.clone());
        self.names.push(name);
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<'a> FromIterator<&'a str> for HeaderNames {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut out = Self::new();
        for raw in iter {
            out.push(raw);
        }
        out
    }
}
