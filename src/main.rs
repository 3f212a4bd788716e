use anyhow::{Context, Result, anyhow};
use eframe::egui;
use salary_dashboard::app::SalaryDashboardApp;
use salary_dashboard::config::DashboardConfig;
use salary_dashboard::data::loader::load_file;
use salary_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::debug!("Starting with {config:?}");

    // The dataset is loaded once; failing here is fatal.
    let dataset = load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))
        .context("loading startup dataset")?;
    let state = AppState::new(dataset, config.charts);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard de Salários na Área de Dados",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard: {e}"))
}
