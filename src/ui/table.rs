use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::format::format_usd;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const HEADERS: [&str; 8] = [
    "Ano",
    "Senioridade",
    "Contrato",
    "Porte",
    "Cargo",
    "Remoto",
    "Salário (USD)",
    "País",
];

// ---------------------------------------------------------------------------
// Detail table of the filtered records
// ---------------------------------------------------------------------------

/// Virtualised table: only rows on screen are laid out.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let visible = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0).resizable(true), HEADERS.len() - 1)
        .column(Column::remainder())
        .max_scroll_height(400.0)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, visible.len(), |mut row| {
                let rec = &state.dataset.records[visible[row.index()]];
                let cells = [
                    rec.year.to_string(),
                    rec.seniority.clone(),
                    rec.contract.clone(),
                    rec.company_size.clone(),
                    rec.role.clone(),
                    rec.remote.clone(),
                    format_usd(rec.salary_usd),
                    rec.country.clone(),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
