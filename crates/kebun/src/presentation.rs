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
use crate::config::PresentationConfig;
use crate::format::{format_optional, round_to};
use crate::record::Dataset;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub const SUMMARY_DECIMALS: usize = 2;
pub const TABLE_DECIMALS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub region: String,
    pub value: Option<f64>,
}
/// Regions ordered smallest first; missing values trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingView {
    pub commodity: Commodity,
    pub entries: Vec<RankingEntry>,
}
impl RankingView {
    pub fn max_value(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.value)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub label: String,
    pub value: f64,
    /// Fraction of the total, 0 when the total is zero.
    pub share: f64,
    pub emphasized: bool,
    /// Set on the catch-all bucket that absorbed small contributors.
    pub collapsed: bool,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionView {
    pub commodity: Commodity,
    pub threshold: f64,
    pub total: f64,
    /// Regions left out because their value is missing.
    pub missing: usize,
    pub slices: Vec<DistributionSlice>,
}
impl DistributionView {
    pub fn emphasized(&self) -> Option<&DistributionSlice> {
        self.slices.iter().find(|s| s.emphasized)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub commodity: Commodity,
    pub title: String,
    pub value: Option<f64>,
    pub formatted: String,
    pub unit: String,
}
impl std::fmt::Display for AggregateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.title, self.formatted, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayColumn {
    Region,
    Value,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub region: String,
    pub value: Option<f64>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTable {
    pub commodity: Commodity,
    pub rows: Vec<DisplayRow>,
}
impl DisplayTable {
    /// Returns a copy ordered by the given column; missing values stay last either way.
    pub fn sorted_by(&self, column: DisplayColumn, ascending: bool) -> DisplayTable {
        let mut rows = self.rows.clone();
        match column {
            DisplayColumn::Region => rows.sort_by(|a, b| {
                let ord = a.region.cmp(&b.region);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            }),
            DisplayColumn::Value => {
                rows.sort_by(|a, b| compare_missing_last(a.value, b.value, ascending))
            }
        }
        DisplayTable {
            commodity: self.commodity,
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityViews {
    pub commodity: Commodity,
    pub ranking: RankingView,
    pub distribution: DistributionView,
    pub summary: AggregateSummary,
    pub table: DisplayTable,
}

/// Derives the four dashboard views for one commodity from a loaded dataset.
///
/// Every method is a pure function of the dataset, the configuration and the
/// commodity; repeated calls return equal views.
#[derive(Debug, Clone)]
pub struct PresentationAdapter {
    dataset: Arc<Dataset>,
    config: PresentationConfig,
}
impl PresentationAdapter {
    pub fn new(dataset: Arc<Dataset>, config: PresentationConfig) -> Self {
        Self { dataset, config }
    }
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }
    pub fn present(&self, commodity: Commodity) -> CommodityViews {
        debug!(%commodity, "building views");
        CommodityViews {
            commodity,
            ranking: self.ranking(commodity),
            distribution: self.distribution(commodity),
            summary: self.summary(commodity),
            table: self.display_table(commodity),
        }
    }
    pub fn ranking(&self, commodity: Commodity) -> RankingView {
        let mut entries: Vec<RankingEntry> = self
            .dataset
            .regions
            .iter()
            .map(|r| RankingEntry {
                region: r.name.clone(),
                value: r.value(commodity),
            })
            .collect();
        entries.sort_by(|a, b| compare_missing_last(a.value, b.value, true));
        RankingView { commodity, entries }
    }
    pub fn distribution(&self, commodity: Commodity) -> DistributionView {
        let present: Vec<(&str, f64)> = self
            .dataset
            .regions
            .iter()
            .filter_map(|r| r.value(commodity).map(|v| (r.name.as_str(), v)))
            .collect();
        let missing = self.dataset.regions.len() - present.len();
        let total = self.dataset.regions.total(commodity);
        let threshold = if total == 0.0 {
            0.0
        } else {
            self.config.threshold_fraction * total
        };

        let other = self.config.other_label.as_str();
        let mut groups: BTreeMap<&str, (f64, bool)> = BTreeMap::new();
        for (name, value) in present {
            let collapse = value < threshold;
            let label = if collapse { other } else { name };
            let entry = groups.entry(label).or_insert((0.0, false));
            entry.0 += value;
            entry.1 |= collapse;
        }

        let mut emphasized: Option<(&str, f64)> = None;
        if total != 0.0 {
            for (label, (value, _)) in &groups {
                if emphasized.map_or(true, |(_, best)| *value > best) {
                    emphasized = Some((*label, *value));
                }
            }
        }
        let slices = groups
            .iter()
            .map(|(label, (value, collapsed))| DistributionSlice {
                label: label.to_string(),
                value: *value,
                share: if total == 0.0 { 0.0 } else { value / total },
                emphasized: emphasized.is_some_and(|(l, _)| l == *label),
                collapsed: *collapsed,
            })
            .collect();
        DistributionView {
            commodity,
            threshold,
            total,
            missing,
            slices,
        }
    }
    pub fn summary(&self, commodity: Commodity) -> AggregateSummary {
        let value = self.dataset.aggregate.value(commodity);
        AggregateSummary {
            commodity,
            title: format!("Total {}", commodity.display_name()),
            value,
            formatted: format_optional(value, SUMMARY_DECIMALS),
            unit: self.config.unit_label.clone(),
        }
    }
    pub fn display_table(&self, commodity: Commodity) -> DisplayTable {
        let table = DisplayTable {
            commodity,
            rows: self
                .dataset
                .regions
                .iter()
                .map(|r| DisplayRow {
                    region: r.name.clone(),
                    value: r.value(commodity).map(|v| round_to(v, TABLE_DECIMALS)),
                })
                .collect(),
        };
        table.sorted_by(DisplayColumn::Value, false)
    }
}

fn compare_missing_last(a: Option<f64>, b: Option<f64>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if ascending => a.total_cmp(&b),
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
