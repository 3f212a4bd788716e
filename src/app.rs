use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("🎲 Análise de Salários na Área de Dados");
                    ui.label(
                        "Explore os dados salariais na área de dados nos últimos anos. \
                         Utilize os filtros da barra lateral para refinar sua análise.",
                    );
                    ui.add_space(8.0);

                    ui.strong("Métricas gerais (Salário anual em USD)");
                    charts::metric_cards(ui, &self.state.metrics);
                    ui.separator();

                    ui.strong("Gráficos");
                    charts::chart_grid(ui, &self.state);
                    ui.separator();

                    ui.strong("Dados Detalhados");
                    table::detail_table(ui, &self.state);
                });
        });
    }
}
