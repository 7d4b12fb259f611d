use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ZooDashboardApp {
    pub state: AppState,
}

impl ZooDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ZooDashboardApp {
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
            ui.heading("🐾 Zoo Animal Life Expectancy Dashboard");
            ui.separator();

            panels::summary(ui, &self.state);
            ui.separator();

            plot::charts(ui, &mut self.state);
            ui.separator();

            ui.heading("📋 Filtered Data Table");
            panels::export_row(ui, &mut self.state);
            table::data_table(ui, &self.state);
        });
    }
}
