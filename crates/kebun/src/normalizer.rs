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

use crate::config::SourceConfig;
use crate::error::{AggregateError, DataFormatError, Result};
use crate::record::{AggregateRecord, CleanedTable, Dataset, LoadReport, RegionRecord};
use crate::schema::{coerce_rows, column_names, production_schema, ColumnSpec, COLUMN_COUNT};
use crate::source::{RawTable, SourceReader};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Turns the raw statistical CSV into a cleaned per-region table plus the national total.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: SourceConfig,
    reader: SourceReader,
    schema: [ColumnSpec; COLUMN_COUNT],
}
impl Normalizer {
    pub fn new(config: SourceConfig) -> Self {
        let reader = SourceReader::new().with_preamble_lines(config.preamble_lines);
        let schema = production_schema(config.unnamed_rows);
        Self {
            config,
            reader,
            schema,
        }
    }
    pub fn load(&self) -> Result<Dataset> {
        let path = &self.config.path;
        info!("Loading production data from {}", path.display());
        let raw = self.reader.read_file(path)?;
        self.normalize(raw, Some(path.clone()))
    }
    pub fn load_str(&self, text: &str) -> Result<Dataset> {
        let raw = self.reader.read_str(text, "<memory>")?;
        self.normalize(raw, None)
    }
    fn normalize(&self, raw: RawTable, source_path: Option<PathBuf>) -> Result<Dataset> {
        debug!(header = ?raw.header, columns = ?column_names(), "source columns relabelled");
        let rows_read = raw.rows.len();
        let rows: Vec<_> = raw.rows.into_iter().filter(|row| !row.is_blank()).collect();
        let blank_rows_dropped = rows_read - rows.len();
        debug!(rows_read, blank_rows_dropped, "blank rows dropped");

        let coerced = coerce_rows(&rows, &self.schema)?;
        if !coerced.warnings.is_empty() {
            warn!(
                "{} cells were blank or not numeric and were treated as missing",
                coerced.warnings.len()
            );
        }

        let sentinel = self.config.aggregate_name.as_str();
        let mut regions = Vec::with_capacity(rows.len());
        let mut aggregates = Vec::new();
        let mut seen: HashMap<&str, u64> = HashMap::new();
        let named = rows.iter().zip(coerced.names.iter().map(String::as_str));
        for (position, ((row, name), measurements)) in
            named.zip(coerced.measurements).enumerate()
        {
            if name == sentinel {
                aggregates.push(AggregateRecord {
                    name: name.to_string(),
                    line: row.line,
                    measurements,
                });
                continue;
            }
            if let Some(&first_line) = seen.get(name).filter(|_| !name.is_empty()) {
                return Err(DataFormatError::DuplicateRegion {
                    name: name.to_string(),
                    first_line,
                    line: row.line,
                }
                .into());
            }
            seen.insert(name, row.line);
            regions.push(RegionRecord {
                name: name.to_string(),
                position,
                line: row.line,
                measurements,
            });
        }

        let aggregate = match aggregates.len() {
            0 => {
                return Err(AggregateError::NotFound {
                    name: sentinel.to_string(),
                }
                .into())
            }
            1 => aggregates.remove(0),
            count => {
                return Err(AggregateError::Ambiguous {
                    name: sentinel.to_string(),
                    count,
                    lines: aggregates.iter().map(|a| a.line).collect(),
                }
                .into())
            }
        };
        info!(
            regions = regions.len(),
            aggregate_line = aggregate.line,
            warnings = coerced.warnings.len(),
            "production data normalised"
        );
        let report = LoadReport {
            source_path,
            rows_read,
            blank_rows_dropped,
            regions_kept: regions.len(),
            warnings: coerced.warnings,
            loaded_at: chrono::Utc::now(),
        };
        Ok(Dataset::new(CleanedTable::new(regions), aggregate).with_report(report))
    }
}
impl Default for Normalizer {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}
