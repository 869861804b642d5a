use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsl, IntoColor, Lighten, Srgb};

use crate::data::model::Diagnosis;

// ---------------------------------------------------------------------------
// Shade helpers
// ---------------------------------------------------------------------------

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Lighten `color` in HSL space by `amount` (0.0 ‥ 1.0).
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let rgb: Srgb = Srgb::new(color.r(), color.g(), color.b()).into_format();
    let hsl: Hsl = rgb.into_color();
    to_color32(Srgb::from_color(hsl.lighten(amount)))
}

// ---------------------------------------------------------------------------
// Color mapping: diagnosis → Color32
// ---------------------------------------------------------------------------

/// Steel blue / tomato, the dashboard's two chart colours.
const BENIGN_RGB: (u8, u8, u8) = (0x46, 0x82, 0xB4);
const MALIGNANT_RGB: (u8, u8, u8) = (0xFF, 0x63, 0x47);

/// Maps each diagnosis to a fixed series colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Diagnosis, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        let mapping = Diagnosis::ALL
            .iter()
            .map(|&d| {
                let (r, g, b) = match d {
                    Diagnosis::Benign => BENIGN_RGB,
                    Diagnosis::Malignant => MALIGNANT_RGB,
                };
                (d, Color32::from_rgb(r, g, b))
            })
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl ColorMap {
    /// Series colour for lines, points and pie slices.
    pub fn color_for(&self, diagnosis: Diagnosis) -> Color32 {
        self.mapping
            .get(&diagnosis)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Softer variant for filled bars.
    pub fn fill_for(&self, diagnosis: Diagnosis) -> Color32 {
        lighten(self.color_for(diagnosis), 0.15)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(d, c)| (d.label().to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnoses_get_distinct_colours() {
        let cm = ColorMap::default();
        assert_ne!(
            cm.color_for(Diagnosis::Benign),
            cm.color_for(Diagnosis::Malignant)
        );
        assert_eq!(cm.legend_entries().len(), 2);
        assert_eq!(cm.legend_entries()[0].0, "Benign");
    }

    #[test]
    fn lighten_raises_every_channel() {
        let base = Color32::from_rgb(0x46, 0x82, 0xB4);
        let light = lighten(base, 0.2);
        assert!(light.r() >= base.r());
        assert!(light.g() >= base.g());
        assert!(light.b() >= base.b());
        assert_ne!(light, base);
    }
}
