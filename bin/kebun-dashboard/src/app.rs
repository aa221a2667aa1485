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

use crate::charts;
use egui::{Color32, RichText};
use kebun::format::format_optional;
use kebun::{
    Commodity, CommodityViews, DisplayColumn, ErrorReporter, ErrorSeverity, PresentationAdapter,
    ProductionDashboard,
};
use tracing::{error, info};

struct LoadFailure {
    severity: ErrorSeverity,
    message: String,
}

pub struct DashboardApp {
    adapter: Option<PresentationAdapter>,
    failure: Option<LoadFailure>,
    selected: Commodity,
    views: Option<CommodityViews>,
    sort_column: DisplayColumn,
    sort_ascending: bool,
}
impl DashboardApp {
    pub fn new(dashboard: &ProductionDashboard) -> Self {
        let selected = dashboard.config().presentation.default_commodity;
        let (adapter, failure) = match dashboard.adapter() {
            Ok(adapter) => (Some(adapter), None),
            Err(e) => {
                error!("load failed: {e}");
                let failure = LoadFailure {
                    severity: e.severity(),
                    message: ErrorReporter::plain().report(&e),
                };
                (None, Some(failure))
            }
        };
        let mut app = Self {
            adapter,
            failure,
            selected,
            views: None,
            sort_column: DisplayColumn::Value,
            sort_ascending: false,
        };
        app.refresh();
        app
    }
    fn refresh(&mut self) {
        if let Some(adapter) = &self.adapter {
            info!(commodity = %self.selected, "commodity selected");
            self.views = Some(adapter.present(self.selected));
        }
    }
    fn toggle_sort(&mut self, column: DisplayColumn) {
        if self.sort_column == column {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = column;
            self.sort_ascending = column == DisplayColumn::Region;
        }
    }
    fn sort_marker(&self, column: DisplayColumn) -> &'static str {
        match (self.sort_column == column, self.sort_ascending) {
            (false, _) => "",
            (true, true) => " ▲",
            (true, false) => " ▼",
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Produksi Tanaman Perkebunan 2023");
                ui.separator();
                if self.adapter.is_none() {
                    return;
                }
                let before = self.selected;
                egui::ComboBox::from_label("Commodity")
                    .selected_text(self.selected.display_name())
                    .show_ui(ui, |ui| {
                        for commodity in Commodity::ALL {
                            ui.selectable_value(
                                &mut self.selected,
                                commodity,
                                commodity.display_name(),
                            );
                        }
                    });
                if before != self.selected {
                    self.refresh();
                }
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let Some(adapter) = &self.adapter else {
                    ui.label("No data loaded");
                    return;
                };
                let report = &adapter.dataset().report;
                ui.label(format!("Regions: {}", report.regions_kept));
                ui.label(format!("Blank rows dropped: {}", report.blank_rows_dropped));
                let warnings = report.warnings.len();
                if warnings > 0 {
                    ui.colored_label(
                        severity_color(ErrorSeverity::Warning),
                        format!("Cells treated as missing: {warnings}"),
                    )
                    .on_hover_text(
                        report
                            .warnings
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("\n"),
                    );
                }
                if let Some(path) = &report.source_path {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("Source: {}", path.display()));
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(failure) = &self.failure {
                ui.colored_label(
                    severity_color(failure.severity),
                    "The dashboard could not load its data.",
                );
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.monospace(&failure.message);
                });
                return;
            }
            let Some(views) = self.views.clone() else {
                return;
            };
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.group(|ui| {
                    ui.label(RichText::new(&views.summary.title).strong());
                    ui.label(
                        RichText::new(format!("{} {}", views.summary.formatted, views.summary.unit))
                            .size(24.0),
                    );
                });
                ui.add_space(8.0);
                ui.columns(2, |columns| {
                    columns[0].heading(format!("{} by province", views.commodity));
                    charts::ranking_bars(&mut columns[0], &views.ranking);
                    columns[1].heading("Share of production");
                    charts::donut(&mut columns[1], &views.distribution);
                });
                ui.add_space(12.0);
                ui.separator();
                ui.heading("Data");
                self.render_table(ui, &views);
            });
        });
    }
}

impl DashboardApp {
    fn render_table(&mut self, ui: &mut egui::Ui, views: &CommodityViews) {
        let table = views.table.sorted_by(self.sort_column, self.sort_ascending);
        let region_header = format!("Provinsi{}", self.sort_marker(DisplayColumn::Region));
        let value_header = format!(
            "{}{}",
            views.commodity.display_name(),
            self.sort_marker(DisplayColumn::Value)
        );
        egui::Grid::new("data_table")
            .num_columns(2)
            .striped(true)
            .min_col_width(120.0)
            .show(ui, |ui| {
                if ui
                    .add(egui::Button::new(RichText::new(region_header).strong()).frame(false))
                    .clicked()
                {
                    self.toggle_sort(DisplayColumn::Region);
                }
                if ui
                    .add(egui::Button::new(RichText::new(value_header).strong()).frame(false))
                    .clicked()
                {
                    self.toggle_sort(DisplayColumn::Value);
                }
                ui.end_row();
                for row in &table.rows {
                    ui.label(&row.region);
                    ui.label(format_optional(row.value, 2));
                    ui.end_row();
                }
            });
    }
}

fn severity_color(severity: ErrorSeverity) -> Color32 {
    match severity {
        ErrorSeverity::Warning => Color32::from_rgb(214, 160, 0),
        ErrorSeverity::Error => Color32::RED,
        ErrorSeverity::Critical => Color32::from_rgb(200, 0, 160),
    }
}
