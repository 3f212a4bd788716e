use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
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

/// Sequential blue scale: `t = 0` is near white, `t = 1` deep blue.
/// `t` is clamped to `[0, 1]`.
pub fn blues(t: f64) -> Color32 {
    let light: LinSrgb = Srgb::new(0.87f32, 0.92, 0.97).into_linear();
    let dark: LinSrgb = Srgb::new(0.03f32, 0.19, 0.42).into_linear();
    let mixed = light.mix(dark, t.clamp(0.0, 1.0) as f32);
    to_color32(Srgb::from_linear(mixed))
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (e.g. remote-work modes) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the labels, in the given order.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn blues_darken_with_value() {
        let lo = blues(0.0);
        let hi = blues(1.0);
        assert!(lo.r() > hi.r());
        assert!(lo.b() > hi.b());
        assert_eq!(blues(-3.0), lo);
        assert_eq!(blues(7.0), hi);
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let cm = ColorMap::new(["Remote", "Hybrid"]);
        assert_ne!(cm.color_for("Remote"), cm.color_for("Hybrid"));
        assert_eq!(cm.color_for("Onsite"), Color32::GRAY);
    }
}
