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

use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};
use kebun::format::format_thousands;
use kebun::{DistributionView, RankingView};
use std::f32::consts::TAU;

const ROW_HEIGHT: f32 = 18.0;
const LABEL_WIDTH: f32 = 150.0;
const VALUE_WIDTH: f32 = 90.0;
const HOLE_RATIO: f32 = 0.3;
const PULL_RATIO: f32 = 0.08;
const SEGMENT_STEP: f32 = TAU / 180.0;

const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(23, 190, 207),
];
const BAR_COLOR: Color32 = Color32::from_rgb(46, 139, 87);

pub fn slice_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Horizontal bars, largest at the top.
pub fn ranking_bars(ui: &mut egui::Ui, view: &RankingView) {
    let width = ui.available_width().max(LABEL_WIDTH + VALUE_WIDTH + 40.0);
    let height = ROW_HEIGHT * view.entries.len().max(1) as f32;
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(12.0);
    let bar_span = rect.width() - LABEL_WIDTH - VALUE_WIDTH;
    let max = view.max_value().filter(|m| *m > 0.0);

    for (row, entry) in view.entries.iter().rev().enumerate() {
        let top = rect.top() + row as f32 * ROW_HEIGHT;
        let mid = top + ROW_HEIGHT / 2.0;
        painter.text(
            pos2(rect.left() + LABEL_WIDTH - 6.0, mid),
            Align2::RIGHT_CENTER,
            &entry.region,
            font.clone(),
            text_color,
        );
        let bar_left = rect.left() + LABEL_WIDTH;
        let (bar_width, label) = match (entry.value, max) {
            (Some(v), Some(max)) => ((v / max) as f32 * bar_span, format_thousands(v, 2)),
            (Some(v), None) => (0.0, format_thousands(v, 2)),
            (None, _) => (0.0, "-".to_string()),
        };
        if bar_width > 0.0 {
            let bar = Rect::from_min_size(
                pos2(bar_left, top + 2.0),
                vec2(bar_width, ROW_HEIGHT - 4.0),
            );
            painter.rect_filled(bar, 2.0, BAR_COLOR);
        }
        painter.text(
            pos2(bar_left + bar_width + 4.0, mid),
            Align2::LEFT_CENTER,
            label,
            font.clone(),
            text_color,
        );
    }
}

/// Donut chart with the emphasized slice pulled out, followed by a legend.
pub fn donut(ui: &mut egui::Ui, view: &DistributionView) {
    if view.total <= 0.0 || view.slices.is_empty() {
        ui.label("No production recorded for this commodity.");
        return;
    }
    let size = ui.available_width().clamp(160.0, 340.0);
    let (response, painter) = ui.allocate_painter(vec2(size, size), Sense::hover());
    let center = response.rect.center();
    let outer = size / 2.0 * (1.0 - PULL_RATIO * 1.5);
    let inner = outer * HOLE_RATIO;

    let mut start = -TAU / 4.0;
    for (index, slice) in view.slices.iter().enumerate() {
        let sweep = slice.share as f32 * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let end = start + sweep;
        let offset = if slice.emphasized {
            let mid = start + sweep / 2.0;
            vec2(mid.cos(), mid.sin()) * outer * PULL_RATIO
        } else {
            vec2(0.0, 0.0)
        };
        let color = slice_color(index);
        let mut a0 = start;
        while a0 < end {
            let a1 = (a0 + SEGMENT_STEP).min(end);
            let points = vec![
                polar(center + offset, inner, a0),
                polar(center + offset, outer, a0),
                polar(center + offset, outer, a1),
                polar(center + offset, inner, a1),
            ];
            painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
            a0 = a1;
        }
        start = end;
    }

    egui::Grid::new("distribution_legend")
        .num_columns(3)
        .spacing([8.0, 2.0])
        .show(ui, |ui| {
            for (index, slice) in view.slices.iter().enumerate() {
                let (swatch, painter) = ui.allocate_painter(vec2(10.0, 10.0), Sense::hover());
                painter.rect_filled(swatch.rect, 1.0, slice_color(index));
                if slice.emphasized {
                    ui.strong(&slice.label);
                } else {
                    ui.label(&slice.label);
                }
                ui.label(format!("{:.1}%", slice.share * 100.0));
                ui.end_row();
            }
        });
    if view.missing > 0 {
        ui.small(format!("{} regions without data are not shown.", view.missing));
    }
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + vec2(angle.cos(), angle.sin()) * radius
}
