use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, ExportStatus};

/// Label of the combo box entry that clears the class filter.
const ALL_CLASSES: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    // ---- Taxon class selector ----
    ui.strong("Select Taxon Class:");
    let current = state
        .filters
        .taxon_class
        .clone()
        .unwrap_or_else(|| ALL_CLASSES.to_string());
    let mut selected = state.filters.taxon_class.clone();
    egui::ComboBox::from_id_salt("taxon_class")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, None, ALL_CLASSES);
            for class in &state.dataset.taxon_classes {
                let label = RichText::new(class).color(state.color_map.color_for(Some(class)));
                ui.selectable_value(&mut selected, Some(class.clone()), label);
            }
        });
    state.set_taxon_class(selected);

    ui.add_space(8.0);

    // ---- Species search ----
    ui.strong("🔍 Search for a Species (Common Name):");
    let mut search = state.filters.search.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut search)
            .hint_text("e.g. lion")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_search(&search);
    }

    if state.filters.is_active() {
        ui.add_space(4.0);
        if ui.small_button("Clear filters").clicked() {
            state.set_taxon_class(None);
            state.set_search("");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save filtered data").clicked() {
                state.export_filtered();
                ui.close_menu();
            }
            if ui.button("Save filtered data as…").clicked() {
                save_as_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let ds = state.dataset;
        ui.label(format!(
            "{} records loaded, {} visible",
            ds.len(),
            state.visible_indices.len()
        ))
        .on_hover_text(format!(
            "{} malformed lines skipped, {} rows without Overall MLE dropped",
            ds.report.malformed_rows, ds.report.missing_overall
        ));
    });
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Two headline numbers over the filtered rows.
pub fn summary(ui: &mut Ui, state: &AppState) {
    ui.heading("📊 Summary Statistics");
    let metrics = &state.view.metrics;
    ui.columns(2, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Species", metrics.distinct_species.to_string());
        metric(&mut cols[1], "Average Overall MLE", metrics.average_label());
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Export controls
// ---------------------------------------------------------------------------

/// Export button plus the outcome of the last export.
pub fn export_row(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("💾 Save Filtered Data as CSV").clicked() {
            state.export_filtered();
        }
        match &state.export_status {
            Some(ExportStatus::Saved { path, rows }) => {
                ui.label(
                    RichText::new(format!(
                        "Filtered data saved as '{}' ({rows} rows) ✅",
                        path.display()
                    ))
                    .color(Color32::GREEN),
                );
            }
            Some(ExportStatus::Failed(msg)) => {
                ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_as_dialog(state: &mut AppState) {
    let default_name = state
        .export_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .add_filter("CSV", &["csv"])
        .set_file_name(default_name)
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
