//! Shaping fetched rows into a spreadsheet table.

use serde_json::{Map, Value};
use sheetdb_core::config::ClientConfig;

/// Header plus row-major cells, ready to be written into a worksheet table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportTable {
    /// Worksheet-unique table name.
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ImportTable {
    /// Project `rows` onto `columns`. Missing keys become `null`.
    pub fn from_rows(
        sheet_id: &str,
        datasource: &str,
        columns: &[String],
        rows: &[Map<String, Value>],
    ) -> Self {
        let cells = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            name: sanitize_table_name(sheet_id, datasource),
            header: columns.to_vec(),
            rows: cells,
        }
    }

    /// A1-style range of the header row, e.g. `A1:C1`.
    pub fn header_range(&self) -> String {
        let width = self.header.len().max(1);
        format!("A1:{}1", column_letter(width - 1))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `<sheet id>_<datasource>` with every non-alphanumeric character replaced by
/// `_`, cut to the spreadsheet's name limit.
pub fn sanitize_table_name(sheet_id: &str, datasource: &str) -> String {
    format!("{}_{}", sheet_id, datasource)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(ClientConfig::MAX_TABLE_NAME_LEN)
        .collect()
}

/// Zero-based column index to spreadsheet letters: 0 → A, 25 → Z, 26 → AA.
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
