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

mod app;
mod charts;
mod report;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use kebun::config::DEFAULT_CONFIG_FILE;
use kebun::{Commodity, DashboardConfig, ErrorReporter, ProductionDashboard};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the dashboard window.
    Gui,
    /// Print the views for one commodity to stdout.
    Report {
        #[arg(long)]
        commodity: Option<String>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "kebun-dashboard")]
#[command(about = "Plantation production by province: ranking, distribution and national totals.")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Overrides source.path from the configuration file.
    #[arg(long)]
    source: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    let filter = if args.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = DashboardConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(source) = args.source {
        config = config.with_source_path(source);
    }
    let dashboard = ProductionDashboard::new(config);

    match args.command.unwrap_or(Commands::Gui) {
        Commands::Gui => {
            info!("Starting production dashboard");
            run_gui(dashboard)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Report { commodity } => {
            let commodity = match commodity {
                Some(name) => name.parse::<Commodity>()?,
                None => dashboard.config().presentation.default_commodity,
            };
            match dashboard.adapter() {
                Ok(adapter) => {
                    let dataset = adapter.dataset().clone();
                    print!("{}", report::render(&adapter.present(commodity), &dataset.report));
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    error!("load failed: {e}");
                    eprint!("{}", ErrorReporter::new().report(&e));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn run_gui(dashboard: ProductionDashboard) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Produksi Tanaman Perkebunan"),
        ..Default::default()
    };
    let app = app::DashboardApp::new(&dashboard);
    eframe::run_native(
        "Produksi Tanaman Perkebunan",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
