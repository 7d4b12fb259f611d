use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Render every column of the filtered rows, in dataset order.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let ds = state.dataset;
    let rows = &state.visible_indices;

    if rows.is_empty() {
        ui.label("No rows match the current filters.");
    }

    let available = ui.available_height();
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0).clip(true), ds.columns.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(available)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in &ds.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let rec = &ds.records[rows[row.index()]];
                for cell in &rec.cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}
