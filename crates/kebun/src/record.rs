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

use crate::commodity::Commodity;
use crate::error::CoercionWarning;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Production per commodity in thousand tons; `None` marks a missing cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements([Option<f64>; Commodity::COUNT]);
impl Measurements {
    pub fn new(values: [Option<f64>; Commodity::COUNT]) -> Self {
        Self(values)
    }
    pub fn get(&self, commodity: Commodity) -> Option<f64> {
        self.0[commodity.index()]
    }
    pub fn set(&mut self, commodity: Commodity, value: Option<f64>) {
        self.0[commodity.index()] = value;
    }
    pub fn with(mut self, commodity: Commodity, value: f64) -> Self {
        self.set(commodity, Some(value));
        self
    }
    pub fn is_all_missing(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    /// Dense zero-based position after blank rows were dropped.
    pub position: usize,
    /// 1-based line in the source file, 0 for records built in code.
    pub line: u64,
    pub measurements: Measurements,
}
impl RegionRecord {
    pub fn new(name: impl Into<String>, position: usize, measurements: Measurements) -> Self {
        Self {
            name: name.into(),
            position,
            line: 0,
            measurements,
        }
    }
    pub fn value(&self, commodity: Commodity) -> Option<f64> {
        self.measurements.get(commodity)
    }
}

/// The national total row, kept apart from the per-region table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub name: String,
    pub line: u64,
    pub measurements: Measurements,
}
impl AggregateRecord {
    pub fn new(name: impl Into<String>, measurements: Measurements) -> Self {
        Self {
            name: name.into(),
            line: 0,
            measurements,
        }
    }
    pub fn value(&self, commodity: Commodity) -> Option<f64> {
        self.measurements.get(commodity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanedTable {
    records: Vec<RegionRecord>,
}
impl CleanedTable {
    pub fn new(records: Vec<RegionRecord>) -> Self {
        Self { records }
    }
    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, RegionRecord> {
        self.records.iter()
    }
    pub fn get(&self, name: &str) -> Option<&RegionRecord> {
        self.records.iter().find(|r| r.name == name)
    }
    /// Sum of the present values for one commodity.
    pub fn total(&self, commodity: Commodity) -> f64 {
        self.records.iter().filter_map(|r| r.value(commodity)).sum()
    }
}
impl<'a> IntoIterator for &'a CleanedTable {
    type Item = &'a RegionRecord;
    type IntoIter = std::slice::Iter<'a, RegionRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub source_path: Option<PathBuf>,
    pub rows_read: usize,
    pub blank_rows_dropped: usize,
    pub regions_kept: usize,
    pub warnings: Vec<CoercionWarning>,
    pub loaded_at: DateTime<Utc>,
}
impl LoadReport {
    pub fn empty() -> Self {
        Self {
            source_path: None,
            rows_read: 0,
            blank_rows_dropped: 0,
            regions_kept: 0,
            warnings: Vec::new(),
            loaded_at: Utc::now(),
        }
    }
}

/// Result of one load: the per-region table and the national total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub regions: CleanedTable,
    pub aggregate: AggregateRecord,
    pub report: LoadReport,
}
impl Dataset {
    pub fn new(regions: CleanedTable, aggregate: AggregateRecord) -> Self {
        let mut report = LoadReport::empty();
        report.regions_kept = regions.len();
        Self {
            regions,
            aggregate,
            report,
        }
    }
    pub fn with_report(mut self, report: LoadReport) -> Self {
        self.report = report;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn dataset_built_in_code_reports_no_source_rows() {
        let regions = CleanedTable::new(vec![RegionRecord::new(
            "ACEH",
            0,
            Measurements::default().with(Commodity::Tea, 4.0),
        )]);
        let aggregate = AggregateRecord::new("INDONESIA", Measurements::default());
        let dataset = Dataset::new(regions, aggregate);
        assert_eq!(dataset.report.rows_read, 0);
        assert_eq!(dataset.report.blank_rows_dropped, 0);
        assert_eq!(dataset.report.regions_kept, 1);
        assert!(dataset.report.source_path.is_none());
    }
}
