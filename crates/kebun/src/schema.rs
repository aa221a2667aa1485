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
use crate::error::{CoercionWarning, DataFormatError, Result};
use crate::record::Measurements;
use crate::source::RawRow;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const REGION_COLUMN: &str = "Provinsi";
pub const COLUMN_COUNT: usize = Commodity::COUNT + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Numeric(Commodity),
}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// A blank or unparseable cell fails the load.
    #[default]
    Reject,
    /// Blank or unparseable cells become missing values and record a warning.
    Coerce,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub missing: MissingPolicy,
}
const fn numeric(commodity: Commodity, name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Numeric(commodity),
        missing: MissingPolicy::Coerce,
    }
}

/// Canonical labels assigned to the nine source columns, in file order.
pub const PRODUCTION_SCHEMA: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec {
        name: REGION_COLUMN,
        kind: ColumnKind::Text,
        missing: MissingPolicy::Reject,
    },
    numeric(Commodity::OilPalm, "Kelapa_Sawit"),
    numeric(Commodity::Coconut, "Kelapa"),
    numeric(Commodity::Rubber, "Karet"),
    numeric(Commodity::Coffee, "Kopi"),
    numeric(Commodity::Cocoa, "Kakao"),
    numeric(Commodity::Sugarcane, "Tebu"),
    numeric(Commodity::Tea, "Teh"),
    numeric(Commodity::Tobacco, "Tembakau"),
];

/// The production schema with the region column's missing policy replaced.
pub fn production_schema(unnamed_rows: MissingPolicy) -> [ColumnSpec; COLUMN_COUNT] {
    let mut schema = PRODUCTION_SCHEMA;
    schema[0].missing = unnamed_rows;
    schema
}

pub fn column_names() -> Vec<&'static str> {
    PRODUCTION_SCHEMA.iter().map(|c| c.name).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Value(f64),
    Blank,
    Invalid,
}
impl Coerced {
    pub fn value(self) -> Option<f64> {
        match self {
            Coerced::Value(v) => Some(v),
            Coerced::Blank | Coerced::Invalid => None,
        }
    }
}

/// Parses one numeric cell; text that is not a finite number is `Invalid`.
pub fn coerce_numeric(cell: Option<&str>) -> Coerced {
    match cell.map(str::trim) {
        None => Coerced::Blank,
        Some("") => Coerced::Blank,
        Some(text) => match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Coerced::Value(v),
            _ => Coerced::Invalid,
        },
    }
}

#[derive(Debug, Clone)]
pub struct CoercedRows {
    pub names: Vec<String>,
    pub measurements: Vec<Measurements>,
    pub warnings: Vec<CoercionWarning>,
}

/// Applies every column of `schema` to the rows, one column at a time.
pub fn coerce_rows(rows: &[RawRow], schema: &[ColumnSpec]) -> Result<CoercedRows> {
    let mut names = vec![String::new(); rows.len()];
    let mut measurements = vec![Measurements::default(); rows.len()];
    let mut warnings = Vec::new();
    for (index, spec) in schema.iter().enumerate() {
        match spec.kind {
            ColumnKind::Text => {
                for (row, name) in rows.iter().zip(names.iter_mut()) {
                    match row.cell(index) {
                        Some(text) => *name = text.to_string(),
                        None if spec.missing == MissingPolicy::Reject => {
                            return Err(DataFormatError::UnnamedRow { line: row.line }.into());
                        }
                        None => warnings.push(CoercionWarning {
                            line: row.line,
                            column: spec.name.to_string(),
                            value: String::new(),
                        }),
                    }
                }
            }
            ColumnKind::Numeric(commodity) => {
                let parsed: Vec<Coerced> = rows
                    .par_iter()
                    .map(|row| coerce_numeric(row.cell(index)))
                    .collect();
                for ((row, slot), coerced) in rows.iter().zip(measurements.iter_mut()).zip(parsed) {
                    let value = || row.cell(index).unwrap_or_default().to_string();
                    match (coerced, spec.missing) {
                        (Coerced::Value(v), _) => slot.set(commodity, Some(v)),
                        (Coerced::Blank, MissingPolicy::Coerce) => {}
                        (Coerced::Invalid, MissingPolicy::Coerce) => {
                            warnings.push(CoercionWarning {
                                line: row.line,
                                column: spec.name.to_string(),
                                value: value(),
                            })
                        }
                        (_, MissingPolicy::Reject) => {
                            return Err(DataFormatError::RejectedCell {
                                line: row.line,
                                column: spec.name.to_string(),
                                value: value(),
                            }
                            .into());
                        }
                    }
                }
            }
        }
    }
    warnings.sort_by_key(|w| w.line);
    Ok(CoercedRows {
        names,
        measurements,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KebunError;
    #[test]
    fn schema_matches_commodity_order() {
        assert_eq!(PRODUCTION_SCHEMA[0].name, REGION_COLUMN);
        for commodity in Commodity::ALL {
            let spec = PRODUCTION_SCHEMA[commodity.index() + 1];
            assert_eq!(spec.kind, ColumnKind::Numeric(commodity));
            assert_eq!(spec.name, commodity.column_name());
        }
    }
    #[test]
    fn coercion_tolerates_dirty_cells() {
        assert_eq!(coerce_numeric(Some("12.5")), Coerced::Value(12.5));
        assert_eq!(coerce_numeric(Some(" 7 ")), Coerced::Value(7.0));
        assert_eq!(coerce_numeric(Some("-")), Coerced::Invalid);
        assert_eq!(coerce_numeric(Some("1,234")), Coerced::Invalid);
        assert_eq!(coerce_numeric(Some("NaN")), Coerced::Invalid);
        assert_eq!(coerce_numeric(Some("")), Coerced::Blank);
        assert_eq!(coerce_numeric(None), Coerced::Blank);
    }
    fn row(line: u64, cells: &[&str]) -> RawRow {
        let mut cells: Vec<Option<String>> = cells
            .iter()
            .map(|c| (!c.is_empty()).then(|| c.to_string()))
            .collect();
        cells.resize(COLUMN_COUNT, None);
        RawRow { line, cells }
    }
    #[test]
    fn warnings_name_line_and_column() {
        let dirty = row(9, &["BALI", "-", "3"]);
        let coerced = coerce_rows(std::slice::from_ref(&dirty), &PRODUCTION_SCHEMA).unwrap();
        assert_eq!(coerced.names, ["BALI"]);
        assert_eq!(coerced.measurements[0].get(Commodity::OilPalm), None);
        assert_eq!(coerced.measurements[0].get(Commodity::Coconut), Some(3.0));
        assert_eq!(
            coerced.warnings,
            vec![CoercionWarning {
                line: 9,
                column: "Kelapa_Sawit".to_string(),
                value: "-".to_string(),
            }]
        );
    }
    #[test]
    fn rejecting_numeric_column_fails_on_bad_cells() {
        let mut schema = PRODUCTION_SCHEMA;
        schema[1].missing = MissingPolicy::Reject;
        let bad = row(7, &["BALI", "-", "3"]);
        let err = coerce_rows(std::slice::from_ref(&bad), &schema).unwrap_err();
        assert!(matches!(
            err,
            KebunError::DataFormat(DataFormatError::RejectedCell { line: 7, ref column, ref value })
                if column == "Kelapa_Sawit" && value == "-"
        ));
        let blank = row(8, &["BALI", "", "3"]);
        assert!(coerce_rows(std::slice::from_ref(&blank), &schema).is_err());
        let good = row(9, &["BALI", "12", "3"]);
        let coerced = coerce_rows(std::slice::from_ref(&good), &schema).unwrap();
        assert_eq!(coerced.measurements[0].get(Commodity::OilPalm), Some(12.0));
    }
    #[test]
    fn region_policy_decides_unnamed_rows() {
        let unnamed = row(6, &["", "1", "2"]);
        let err = coerce_rows(std::slice::from_ref(&unnamed), &PRODUCTION_SCHEMA).unwrap_err();
        assert!(matches!(
            err,
            KebunError::DataFormat(DataFormatError::UnnamedRow { line: 6 })
        ));

        let schema = production_schema(MissingPolicy::Coerce);
        let coerced = coerce_rows(std::slice::from_ref(&unnamed), &schema).unwrap();
        assert_eq!(coerced.names, [""]);
        assert_eq!(coerced.measurements[0].get(Commodity::Coconut), Some(2.0));
        assert_eq!(
            coerced.warnings,
            vec![CoercionWarning {
                line: 6,
                column: REGION_COLUMN.to_string(),
                value: String::new(),
            }]
        );
    }
}
