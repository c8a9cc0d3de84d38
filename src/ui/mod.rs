use eframe::egui::{Color32, RichText, Ui};

use crate::pipeline::Outcome;

pub mod charts;
pub mod dashboard;
pub mod panels;

/// Render a step's value, or the notice / error that replaced it.
pub fn show_outcome<T>(ui: &mut Ui, outcome: &Outcome<T>, ready: impl FnOnce(&mut Ui, &T)) {
    match outcome {
        Outcome::Ready(value) => ready(ui, value),
        Outcome::Notice(notice) => {
            ui.label(RichText::new(notice.to_string()).italics());
        }
        Outcome::Failed(err) => {
            ui.colored_label(Color32::from_rgb(230, 160, 40), err.to_string());
        }
    }
}

/// Short human form of large magnitudes (`4.41e11` → `441.08 B`).
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, " T")
    } else if abs >= 1e9 {
        (value / 1e9, " B")
    } else if abs >= 1e6 {
        (value / 1e6, " M")
    } else {
        (value, "")
    };
    format!("{scaled:.2}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(441_080_000_000.0), "441.08 B");
        assert_eq!(format_compact(-2_500_000.0), "-2.50 M");
        assert_eq!(format_compact(0.62), "0.62");
        assert_eq!(format_compact(3.2e12), "3.20 T");
    }
}
