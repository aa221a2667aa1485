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

#![allow(dead_code)]

use kebun::{
    AggregateRecord, CleanedTable, Commodity, Dataset, Measurements, RegionRecord, SourceConfig,
};
use std::path::Path;
use std::sync::Arc;

pub const HEADER: &str = "Provinsi,Kelapa Sawit,Kelapa,Karet,Kopi,Kakao,Tebu,Teh,Tembakau";
pub const PREAMBLE: &str = "Produksi Tanaman Perkebunan Menurut Provinsi (Ribu Ton),,,,,,,,\n2023,,,,,,,,\n,,,,,,,,\n";

/// Four provinces whose columns add up to the national row; three cells are `-`.
pub const PRODUCTION_CSV: &str = "Produksi Tanaman Perkebunan Menurut Provinsi (Ribu Ton),,,,,,,,
2023,,,,,,,,
,,,,,,,,
Provinsi,Kelapa Sawit,Kelapa,Karet,Kopi,Kakao,Tebu,Teh,Tembakau
ACEH,1000.5,60,50,70,30,5,-,2
SUMATERA UTARA,5000,90,400,80,20,10,5,3
RIAU,9000,300,350,2,1,-,-,0.5
,,,,,,,,
JAWA BARAT,10,20,30,40,5,100,90,20
INDONESIA,15010.5,470,830,192,56,115,95,25.5
,,,,,,,,
";

pub fn with_body(body: &str) -> String {
    format!("{PREAMBLE}{HEADER}\n{body}")
}

pub fn write_source(dir: &Path, contents: &str) -> SourceConfig {
    let path = dir.join("produksi.csv");
    std::fs::write(&path, contents).unwrap();
    SourceConfig {
        path,
        ..SourceConfig::default()
    }
}

/// Builds a dataset for one commodity directly from `(region, value)` pairs.
pub fn dataset_for(
    commodity: Commodity,
    values: &[(&str, Option<f64>)],
    total: Option<f64>,
) -> Arc<Dataset> {
    let records = values
        .iter()
        .enumerate()
        .map(|(position, (name, value))| {
            let mut measurements = Measurements::default();
            measurements.set(commodity, *value);
            RegionRecord::new(*name, position, measurements)
        })
        .collect();
    let mut aggregate = Measurements::default();
    aggregate.set(commodity, total);
    Arc::new(Dataset::new(
        CleanedTable::new(records),
        AggregateRecord::new("INDONESIA", aggregate),
    ))
}
