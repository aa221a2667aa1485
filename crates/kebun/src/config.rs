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
use crate::error::{ConfigError, ConfigResult};
use crate::schema::MissingPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "kebun.toml";
pub const DEFAULT_SOURCE_FILE: &str = "Produksi Tanaman Perkebunan, 2023.csv";
pub const DEFAULT_PREAMBLE_LINES: usize = 3;
pub const DEFAULT_AGGREGATE_NAME: &str = "INDONESIA";
pub const DEFAULT_OTHER_LABEL: &str = "Other";
pub const DEFAULT_THRESHOLD_FRACTION: f64 = 0.01;
pub const DEFAULT_UNIT_LABEL: &str = "thousand tons";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub presentation: PresentationConfig,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub preamble_lines: usize,
    pub aggregate_name: String,
    /// Whether a data row without a province name fails the load or is kept.
    pub unnamed_rows: MissingPolicy,
}
impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SOURCE_FILE),
            preamble_lines: DEFAULT_PREAMBLE_LINES,
            aggregate_name: DEFAULT_AGGREGATE_NAME.to_string(),
            unnamed_rows: MissingPolicy::Reject,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub other_label: String,
    pub threshold_fraction: f64,
    pub unit_label: String,
    pub default_commodity: Commodity,
}
impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            other_label: DEFAULT_OTHER_LABEL.to_string(),
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            unit_label: DEFAULT_UNIT_LABEL.to_string(),
            default_commodity: Commodity::default(),
        }
    }
}
impl DashboardConfig {
    /// Reads an optional TOML file; a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .build()
            .map_err(|source| ConfigError::Load {
                path: path.display().to_string(),
                source,
            })?;
        let loaded: Self = settings
            .try_deserialize()
            .map_err(|source| ConfigError::Load {
                path: path.display().to_string(),
                source,
            })?;
        debug!(config = ?loaded, "configuration loaded from {}", path.display());
        loaded.validate()?;
        Ok(loaded)
    }
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source.path = path.into();
        self
    }
    pub fn validate(&self) -> ConfigResult<()> {
        let fraction = self.presentation.threshold_fraction;
        if !(0.0..1.0).contains(&fraction) {
            return Err(invalid(
                "presentation.threshold_fraction",
                fraction,
                "must be at least 0 and below 1",
            ));
        }
        if self.presentation.other_label.trim().is_empty() {
            return Err(invalid(
                "presentation.other_label",
                &self.presentation.other_label,
                "must not be empty",
            ));
        }
        if self.source.aggregate_name.trim().is_empty() {
            return Err(invalid(
                "source.aggregate_name",
                &self.source.aggregate_name,
                "must not be empty",
            ));
        }
        Ok(())
    }
}
fn invalid(field: &str, value: impl std::fmt::Display, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
