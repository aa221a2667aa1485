// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::config::DEFAULT_PREAMBLE_LINES;
use crate::error::{DataFormatError, Result, SchemaError};
use crate::schema::COLUMN_COUNT;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// One data row as read from the file; `None` marks a blank cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub line: u64,
    pub cells: Vec<Option<String>>,
}
impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }
}
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Reads the statistical CSV: a descriptive preamble, one header row, data rows.
#[derive(Debug, Clone)]
pub struct SourceReader {
    preamble_lines: usize,
    expected_columns: usize,
}
impl SourceReader {
    pub fn new() -> Self {
        Self {
            preamble_lines: DEFAULT_PREAMBLE_LINES,
            expected_columns: COLUMN_COUNT,
        }
    }
    pub fn with_preamble_lines(mut self, preamble_lines: usize) -> Self {
        self.preamble_lines = preamble_lines;
        self
    }
    pub fn read_file(&self, path: &Path) -> Result<RawTable> {
        let bytes = std::fs::read(path).map_err(|source| DataFormatError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        self.read_str(&text, &path.display().to_string())
    }
    pub fn read_str(&self, text: &str, origin: &str) -> Result<RawTable> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let body = self.skip_preamble(text).ok_or_else(|| DataFormatError::MissingHeader {
            path: origin.to_string(),
            preamble: self.preamble_lines,
        })?;
        let line_offset = self.preamble_lines as u64;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        let header: Vec<String> = reader
            .headers()
            .map_err(|e| csv_error(e, line_offset))?
            .iter()
            .map(str::to_string)
            .collect();
        if header.len() != self.expected_columns {
            return Err(SchemaError::ColumnCount {
                expected: self.expected_columns,
                found: header.len(),
                header,
            }
            .into());
        }
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| csv_error(e, line_offset))?;
            let line = record.position().map_or(0, |p| p.line()) + line_offset;
            if record.len() > self.expected_columns {
                return Err(DataFormatError::RaggedRow {
                    line,
                    expected: self.expected_columns,
                    found: record.len(),
                }
                .into());
            }
            let mut cells: Vec<Option<String>> = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect();
            cells.resize(self.expected_columns, None);
            rows.push(RawRow { line, cells });
        }
        debug!(
            origin,
            rows = rows.len(),
            preamble = self.preamble_lines,
            "source rows read"
        );
        Ok(RawTable { header, rows })
    }
    fn skip_preamble<'a>(&self, text: &'a str) -> Option<&'a str> {
        let mut rest = text;
        for _ in 0..self.preamble_lines {
            let end = rest.find('\n')?;
            rest = &rest[end + 1..];
        }
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}
impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}
fn csv_error(source: csv::Error, line_offset: u64) -> DataFormatError {
    let line = source.position().map_or(0, |p| p.line()) + line_offset;
    DataFormatError::Csv { line, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KebunError;
    const HEADER: &str = "Provinsi,Kelapa Sawit,Kelapa,Karet,Kopi,Kakao,Tebu,Teh,Tembakau";
    fn with_preamble(body: &str) -> String {
        format!("Produksi Tanaman Perkebunan\n(Ribu Ton)\n2023\n{body}")
    }
    #[test]
    fn skips_preamble_and_reports_source_lines() {
        let text = with_preamble(&format!("{HEADER}\nACEH,1,2,3,4,5,6,7,8\n"));
        let table = SourceReader::new().read_str(&text, "inline").unwrap();
        assert_eq!(table.header.len(), 9);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].line, 5);
        assert_eq!(table.rows[0].cell(0), Some("ACEH"));
    }
    #[test]
    fn pads_short_rows_and_blanks_empty_fields() {
        let text = with_preamble(&format!("{HEADER}\nBALI, ,2\n"));
        let table = SourceReader::new().read_str(&text, "inline").unwrap();
        let row = &table.rows[0];
        assert_eq!(row.cells.len(), 9);
        assert_eq!(row.cell(1), None);
        assert_eq!(row.cell(2), Some("2"));
        assert_eq!(row.cell(8), None);
    }
    #[test]
    fn strips_byte_order_mark() {
        let text = format!("\u{feff}{}", with_preamble(&format!("{HEADER}\n")));
        let table = SourceReader::new().read_str(&text, "inline").unwrap();
        assert!(table.rows.is_empty());
    }
    #[test]
    fn short_file_is_missing_header() {
        let err = SourceReader::new()
            .read_str("only\ntwo lines\n", "inline")
            .unwrap_err();
        assert!(matches!(
            err,
            KebunError::DataFormat(DataFormatError::MissingHeader { preamble: 3, .. })
        ));
    }
    #[test]
    fn long_rows_are_rejected() {
        let text = with_preamble(&format!("{HEADER}\nACEH,1,2,3,4,5,6,7,8,9\n"));
        let err = SourceReader::new().read_str(&text, "inline").unwrap_err();
        assert!(matches!(
            err,
            KebunError::DataFormat(DataFormatError::RaggedRow { line: 5, found: 10, .. })
        ));
    }
}
