use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// Stable indicator → colour assignment for the trend chart and legend.
#[derive(Debug, Clone, Default)]
pub struct IndicatorColors {
    mapping: BTreeMap<String, Color32>,
}

impl IndicatorColors {
    pub fn new<'a>(indicators: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = indicators.into_iter().collect();
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        IndicatorColors { mapping }
    }

    pub fn color_for(&self, indicator: &str) -> Color32 {
        self.mapping
            .get(indicator)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation cells
// ---------------------------------------------------------------------------

const COOL: (f32, f32, f32) = (0.230, 0.299, 0.754);
const NEUTRAL: (f32, f32, f32) = (0.865, 0.865, 0.865);
const WARM: (f32, f32, f32) = (0.706, 0.016, 0.150);

/// Blue (−1) → grey (0) → red (+1), blended in linear RGB.
pub fn correlation_color(r: f64) -> Color32 {
    let t = r.clamp(-1.0, 1.0) as f32;
    let linear = |(red, green, blue): (f32, f32, f32)| -> LinSrgb {
        Srgb::new(red, green, blue).into_linear()
    };
    let neutral = linear(NEUTRAL);
    let mixed = if t < 0.0 {
        neutral.mix(linear(COOL), -t)
    } else {
        neutral.mix(linear(WARM), t)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Annotation colour that stays readable on top of `correlation_color(r)`.
pub fn annotation_color(r: f64) -> Color32 {
    if r.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_indicator_colors() {
        let colors = IndicatorColors::new(["A", "B"]);
        assert_ne!(colors.color_for("A"), colors.color_for("B"));
        assert_eq!(colors.color_for("missing"), Color32::LIGHT_BLUE);
    }

    #[test]
    fn test_correlation_scale_ends() {
        let warm = correlation_color(1.0);
        let cool = correlation_color(-1.0);
        let mid = correlation_color(0.0);
        assert!(warm.r() > warm.b());
        assert!(cool.b() > cool.r());
        assert!(mid.r().abs_diff(mid.b()) < 3);
        assert_eq!(correlation_color(5.0), warm);
    }
}
