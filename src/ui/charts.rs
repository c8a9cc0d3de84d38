use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Rect, Sense, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::color::{annotation_color, correlation_color, IndicatorColors};
use crate::data::model::{CorrelationMatrix, ForecastSeries};
use crate::pipeline::DashboardReport;

// ---------------------------------------------------------------------------
// Trend lines
// ---------------------------------------------------------------------------

/// One line per selected indicator, with a marker on every observation.
///
/// At most `max_lines` indicators are drawn.
pub fn trend_chart(
    ui: &mut Ui,
    report: &DashboardReport,
    colors: &IndicatorColors,
    max_lines: usize,
) {
    let total = report.series.len();
    if total > max_lines {
        truncation_note(ui, max_lines, total);
    }

    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(340.0)
        .x_axis_label("Year")
        .y_axis_label("Value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, series) in report.series.iter().take(max_lines) {
                let points: Vec<[f64; 2]> = series
                    .iter()
                    .map(|&(year, value)| [year as f64, value])
                    .collect();

                let color = colors.color_for(name);
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(name)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(name)
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

const LABEL_WIDTH: f32 = 240.0;
const HEADER_HEIGHT: f32 = 22.0;
const CELL: f32 = 64.0;

/// Annotated heatmap. Columns are numbered; row labels carry the full names.
///
/// Only the first `max_indicators` indicators of each axis are drawn.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix, max_indicators: usize) {
    let n = matrix.size().min(max_indicators);
    if matrix.size() > n {
        truncation_note(ui, n, matrix.size());
    }
    let size = vec2(LABEL_WIDTH + CELL * n as f32, HEADER_HEIGHT + CELL * n as f32);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    let font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();
    let grid_left = rect.left() + LABEL_WIDTH;
    let grid_top = rect.top() + HEADER_HEIGHT;

    for (i, name) in matrix.indicators.iter().take(n).enumerate() {
        let offset = CELL * i as f32 + CELL / 2.0;
        painter.text(
            pos2(grid_left + offset, rect.top() + HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            format!("{}", i + 1),
            font.clone(),
            text_color,
        );
        painter.text(
            pos2(grid_left - 8.0, grid_top + offset),
            Align2::RIGHT_CENTER,
            format!("{}. {name}", i + 1),
            font.clone(),
            text_color,
        );
    }

    for (i, row) in matrix.values.iter().take(n).enumerate() {
        for (j, value) in row.iter().take(n).enumerate() {
            let cell = Rect::from_min_size(
                pos2(grid_left + CELL * j as f32, grid_top + CELL * i as f32),
                vec2(CELL, CELL),
            )
            .shrink(1.0);

            match value {
                Some(r) => {
                    painter.rect_filled(cell, 2.0, correlation_color(*r));
                    painter.text(
                        cell.center(),
                        Align2::CENTER_CENTER,
                        format!("{r:.2}"),
                        font.clone(),
                        annotation_color(*r),
                    );
                }
                None => {
                    painter.rect_filled(cell, 2.0, ui.visuals().faint_bg_color);
                    painter.text(
                        cell.center(),
                        Align2::CENTER_CENTER,
                        "n/a",
                        font.clone(),
                        Color32::GRAY,
                    );
                }
            }
        }
    }

    if let Some(pos) = response.hover_pos() {
        let col = ((pos.x - grid_left) / CELL).floor();
        let row = ((pos.y - grid_top) / CELL).floor();
        if col >= 0.0 && row >= 0.0 && (col as usize) < n && (row as usize) < n {
            let a = &matrix.indicators[row as usize];
            let b = &matrix.indicators[col as usize];
            let text = match matrix.get(a, b) {
                Some(r) => format!("{a} × {b}: {r:.4}"),
                None => format!("{a} × {b}: n/a"),
            };
            response.on_hover_text_at_pointer(text);
        }
    }

    ui.small("−1 blue · 0 grey · +1 red; n/a where two indicators share fewer than two years");
}

fn truncation_note(ui: &mut Ui, shown: usize, total: usize) {
    ui.colored_label(
        Color32::from_rgb(230, 160, 40),
        format!(
            "Showing the first {shown} of {total} indicators. \
             Narrow the selection to see the rest."
        ),
    );
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

/// Actual history as a solid line, the fitted extrapolation dashed in red.
pub fn forecast_chart(ui: &mut Ui, forecast: &ForecastSeries) {
    let actual: PlotPoints = forecast
        .history
        .iter()
        .map(|&(year, value)| [year as f64, value])
        .collect();
    let predicted: PlotPoints = forecast
        .points
        .iter()
        .map(|p| [p.year as f64, p.predicted])
        .collect();

    Plot::new("forecast_plot")
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label("Year")
        .y_axis_label(forecast.indicator.as_str())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(actual)
                    .name(format!("Actual {}", forecast.indicator))
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(predicted)
                    .name(format!("Predicted {}", forecast.indicator))
                    .color(Color32::RED)
                    .style(LineStyle::dashed_loose())
                    .width(2.0),
            );
        });
}
