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

mod common;

use common::{dataset_for, with_body};
use kebun::{Commodity, Normalizer, PresentationAdapter, PresentationConfig};
use proptest::prelude::*;

fn region_values() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.85, 0.0f64..1_000_000.0), 0..40)
}

fn named(values: &[Option<f64>]) -> Vec<(String, Option<f64>)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("R{i:02}"), *v))
        .collect()
}

fn adapter_for(values: &[Option<f64>], fraction: f64) -> PresentationAdapter {
    let named = named(values);
    let borrowed: Vec<(&str, Option<f64>)> =
        named.iter().map(|(n, v)| (n.as_str(), *v)).collect();
    let config = PresentationConfig {
        threshold_fraction: fraction,
        ..PresentationConfig::default()
    };
    PresentationAdapter::new(dataset_for(Commodity::Rubber, &borrowed, None), config)
}

proptest! {
    #[test]
    fn ranking_is_non_decreasing_with_missing_last(values in region_values()) {
        let ranking = adapter_for(&values, 0.01).ranking(Commodity::Rubber);
        prop_assert_eq!(ranking.entries.len(), values.len());
        let present: Vec<f64> = ranking.entries.iter().map_while(|e| e.value).collect();
        prop_assert!(present.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(ranking.entries[present.len()..].iter().all(|e| e.value.is_none()));
    }

    #[test]
    fn display_table_is_non_increasing(values in region_values()) {
        let table = adapter_for(&values, 0.01).display_table(Commodity::Rubber);
        let present: Vec<f64> = table.rows.iter().map_while(|r| r.value).collect();
        prop_assert!(present.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(table.rows[present.len()..].iter().all(|r| r.value.is_none()));
    }

    #[test]
    fn distribution_conserves_total(values in region_values(), fraction in 0.0f64..0.5) {
        let view = adapter_for(&values, fraction).distribution(Commodity::Rubber);
        let expected: f64 = values.iter().flatten().sum();
        let sum: f64 = view.slices.iter().map(|s| s.value).sum();
        prop_assert!((sum - expected).abs() <= 1e-6 * expected.max(1.0));
        prop_assert_eq!(view.missing, values.iter().filter(|v| v.is_none()).count());
        let emphasized = view.slices.iter().filter(|s| s.emphasized).count();
        prop_assert_eq!(emphasized, usize::from(view.total > 0.0));
        prop_assert!(view.slices.windows(2).all(|w| w[0].label < w[1].label));
        prop_assert!(view.slices.iter().filter(|s| s.collapsed).all(|s| s.label == "Other"));
    }

    #[test]
    fn blank_rows_never_become_regions(
        rows in prop::collection::vec((any::<bool>(), 0u32..10_000), 1..30)
    ) {
        let mut body = String::new();
        for (i, (blank, value)) in rows.iter().enumerate() {
            if *blank {
                body.push_str(",,,,,,,,\n");
            } else {
                body.push_str(&format!("R{i},{value},1,2,3,4,5,6,7\n"));
            }
        }
        body.push_str("INDONESIA,1,1,1,1,1,1,1,1\n");
        let dataset = Normalizer::default().load_str(&with_body(&body)).unwrap();
        let report = &dataset.report;
        prop_assert_eq!(report.rows_read, rows.len() + 1);
        prop_assert_eq!(report.blank_rows_dropped, rows.iter().filter(|(b, _)| *b).count());
        prop_assert_eq!(dataset.regions.len() + 1, report.rows_read - report.blank_rows_dropped);
        prop_assert!(dataset.regions.iter().all(|r| r.name != "INDONESIA"));
        let positions: Vec<usize> = dataset.regions.iter().map(|r| r.position).collect();
        prop_assert_eq!(positions, (0..dataset.regions.len()).collect::<Vec<_>>());
    }
}
