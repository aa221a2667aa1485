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
use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::record::Dataset;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Memoizes the first successful load for the lifetime of the cache.
#[derive(Debug)]
pub struct DatasetCache {
    normalizer: Normalizer,
    cell: OnceCell<Arc<Dataset>>,
}
impl DatasetCache {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config),
            cell: OnceCell::new(),
        }
    }
    /// Loads on first call; a failed load leaves the cache empty.
    pub fn get(&self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.cell.get() {
            debug!("dataset served from cache");
            return Ok(Arc::clone(dataset));
        }
        self.cell
            .get_or_try_init(|| self.normalizer.load().map(Arc::new))
            .map(Arc::clone)
    }
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
