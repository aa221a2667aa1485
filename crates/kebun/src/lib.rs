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

pub mod cache;
pub mod commodity;
pub mod config;
pub mod error;
pub mod format;
pub mod normalizer;
pub mod presentation;
pub mod record;
pub mod schema;
pub mod source;

pub use cache::DatasetCache;
pub use commodity::{Commodity, UnknownCommodity};
pub use config::{DashboardConfig, PresentationConfig, SourceConfig};
pub use error::{
    AggregateError, CoercionWarning, ConfigError, DataFormatError, ErrorReporter, ErrorSeverity,
    KebunError, Result, SchemaError,
};
pub use normalizer::Normalizer;
pub use presentation::{
    AggregateSummary, CommodityViews, DisplayColumn, DisplayRow, DisplayTable, DistributionSlice,
    DistributionView, PresentationAdapter, RankingEntry, RankingView,
};
pub use schema::{ColumnKind, ColumnSpec, MissingPolicy, PRODUCTION_SCHEMA};
pub use record::{AggregateRecord, CleanedTable, Dataset, LoadReport, Measurements, RegionRecord};
use std::path::Path;

/// Loads the production data once and hands out presentation adapters over it.
pub struct ProductionDashboard {
    config: DashboardConfig,
    cache: DatasetCache,
}
impl ProductionDashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let cache = DatasetCache::new(config.source.clone());
        Self { config, cache }
    }
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = DashboardConfig::load(path)?;
        Ok(Self::new(config))
    }
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
    pub fn dataset(&self) -> Result<std::sync::Arc<Dataset>> {
        self.cache.get()
    }
    pub fn adapter(&self) -> Result<PresentationAdapter> {
        let dataset = self.dataset()?;
        Ok(PresentationAdapter::new(
            dataset,
            self.config.presentation.clone(),
        ))
    }
    pub fn views(&self, commodity: Commodity) -> Result<CommodityViews> {
        Ok(self.adapter()?.present(commodity))
    }
}
