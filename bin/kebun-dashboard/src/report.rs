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

use kebun::format::{format_optional, format_thousands};
use kebun::{CommodityViews, LoadReport};

/// Plain-text rendering of the four views, used by the `report` subcommand.
pub fn render(views: &CommodityViews, load: &LoadReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", views.summary));

    out.push_str("Ranking (smallest first)\n");
    for entry in &views.ranking.entries {
        out.push_str(&format!(
            "  {:<28} {:>14}\n",
            entry.region,
            format_optional(entry.value, 2)
        ));
    }

    let distribution = &views.distribution;
    out.push_str(&format!(
        "\nDistribution (threshold {}, {} regions without data)\n",
        format_thousands(distribution.threshold, 2),
        distribution.missing
    ));
    for slice in &distribution.slices {
        let marker = if slice.emphasized { "*" } else { " " };
        out.push_str(&format!(
            " {marker}{:<28} {:>14} {:>6.1}%\n",
            slice.label,
            format_thousands(slice.value, 2),
            slice.share * 100.0
        ));
    }

    out.push_str(&format!(
        "\n{:<28} {:>14}\n",
        "Provinsi",
        views.commodity.display_name()
    ));
    for row in &views.table.rows {
        out.push_str(&format!(
            "{:<28} {:>14}\n",
            row.region,
            format_optional(row.value, 2)
        ));
    }
    out.push_str(&format!(
        "\n{} regions, {} blank rows dropped, {} cells treated as missing\n",
        load.regions_kept,
        load.blank_rows_dropped,
        load.warnings.len()
    ));
    out
}
