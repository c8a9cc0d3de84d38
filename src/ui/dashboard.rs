use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use super::{charts, panels, show_outcome};
use crate::data::model::LongRecord;
use crate::pipeline::Notice;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Title, the three charts, the preview table and the download control.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Nigeria Economic Trends Dashboard");
    ui.label(
        "Key development indicators (GDP, population, CO2 emissions and more) \
         from World Bank data.",
    );
    ui.separator();

    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload an .xlsx workbook to begin  (File → Open…)");
        });
        return;
    };

    let config = &state.config;
    let mut download = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Indicator Trends Over Time");
            if report.records.is_empty() {
                notice(ui, &Notice::NoData);
            } else {
                charts::trend_chart(ui, report, &state.colors, config.max_trend_lines);
            }
            ui.add_space(12.0);

            ui.heading("Correlation Between Indicators");
            show_outcome(ui, &report.correlation, |ui, matrix| {
                charts::correlation_heatmap(ui, matrix, config.max_heatmap_indicators)
            });
            ui.add_space(12.0);

            ui.heading(format!(
                "{} Forecast ({}-{})",
                config.target_indicator,
                config.forecast_first_year,
                config.forecast_last_year()
            ));
            show_outcome(ui, &report.forecast, |ui, forecast| {
                charts::forecast_chart(ui, forecast);
                let remark = if forecast.is_growing() {
                    "continued growth"
                } else {
                    "a declining trend"
                };
                ui.label(format!(
                    "Forecast indicates {remark} in {} through {}.",
                    forecast.indicator,
                    config.forecast_last_year()
                ));
            });
            ui.add_space(12.0);

            ui.heading("Cleaned Data Preview");
            if report.records.is_empty() {
                notice(ui, &Notice::NoData);
            } else {
                preview_table(ui, &report.records, config.preview_rows);
            }
            ui.add_space(8.0);

            download = ui.button("Download Cleaned Data (CSV)").clicked();
        });

    if download {
        panels::export_dialog(state);
    }
}

fn notice(ui: &mut Ui, notice: &Notice) {
    ui.label(RichText::new(notice.to_string()).italics());
}

/// First `rows` cleaned records.
fn preview_table(ui: &mut Ui, records: &[LongRecord], rows: usize) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::initial(320.0).resizable(true))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder().at_least(120.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Indicator Name");
            });
            header.col(|ui| {
                ui.strong("Year");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for record in records.iter().take(rows) {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&record.indicator);
                    });
                    row.col(|ui| {
                        ui.label(record.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.value.to_string());
                    });
                });
            }
        });
}
