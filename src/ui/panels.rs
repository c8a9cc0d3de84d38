use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::{format_compact, show_outcome};
use crate::data::export;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – indicator selection and key insights
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No workbook loaded.");
        return;
    };
    let names = table.indicator_names();

    ui.strong("Select Indicators to Analyze");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search");
        ui.text_edit_singleline(&mut state.indicator_query);
    });

    let mut toggled: Option<String> = None;
    let mut select_all = false;
    let mut select_none = false;

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{}/{}", state.selection.len(), names.len()));
        select_all = ui.small_button("All").clicked();
        select_none = ui.small_button("None").clicked();
    });

    let query = state.indicator_query.to_lowercase();
    ScrollArea::vertical()
        .id_salt("indicator_list")
        .max_height(ui.available_height() * 0.55)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for name in names
                .iter()
                .filter(|n| query.is_empty() || n.to_lowercase().contains(&query))
            {
                let mut checked = state.selection.contains(name);
                let mut text = RichText::new(name);
                if checked {
                    text = text.color(state.colors.color_for(name));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(name.clone());
                }
            }
        });

    // Apply after the loop so the table borrow has ended.
    if select_all {
        state.select_all();
    } else if select_none {
        state.select_none();
    } else if let Some(name) = toggled {
        state.toggle_indicator(&name);
    }

    ui.add_space(8.0);
    ui.heading("Key Insights");
    ui.separator();
    key_insights(ui, state);
}

fn key_insights(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        return;
    };

    show_outcome(ui, &report.growth, |ui, growth| {
        ui.label(format!(
            "{} growth ({}→{})",
            growth.indicator, growth.previous_year, growth.latest_year
        ));
        ui.label(RichText::new(format!("{:.2}%", growth.percent)).size(22.0).strong());
        ui.small(format!(
            "{} → {}",
            format_compact(growth.previous_value),
            format_compact(growth.latest_value)
        ));
    });

    for (_, outcome) in &report.latest {
        ui.add_space(4.0);
        show_outcome(ui, outcome, |ui, latest| {
            ui.label(format!("{} (latest, {})", latest.indicator, latest.year));
            ui.label(RichText::new(format_compact(latest.value)).size(18.0).strong());
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.report.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export cleaned CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(name), Some(report)) = (&state.source_name, &state.report) {
            ui.label(format!(
                "{name}: {} indicators selected, {} records",
                state.selection.len(),
                report.records.len()
            ));
            ui.separator();
        }

        match &state.status {
            Some(Status::Success(msg)) => {
                ui.label(RichText::new(msg).color(Color32::from_rgb(60, 160, 80)));
            }
            Some(Status::Error { message, hint }) => {
                ui.label(RichText::new(message).color(Color32::RED));
                if let Some(hint) = hint {
                    ui.label(hint);
                }
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open indicator workbook")
        .add_filter("Excel workbook", &["xlsx"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(report) = &state.report else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Download cleaned data")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let outcome = export::save_csv(&path, &report.records);
    state.status = Some(match outcome {
        Ok(()) => Status::Success(format!("Saved {}", path.display())),
        Err(e) => {
            log::error!("Export failed: {e:#}");
            Status::Error {
                message: format!("Export failed: {e:#}"),
                hint: None,
            }
        }
    });
}
