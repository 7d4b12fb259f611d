use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Series colours for the male/female comparison.
pub const MALE_COLOR: Color32 = Color32::from_rgb(66, 133, 244);
pub const FEMALE_COLOR: Color32 = Color32::from_rgb(234, 67, 53);

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: TaxonClass → Color32
// ---------------------------------------------------------------------------

/// Maps each taxon class to a distinct colour. Records without a class
/// get the default colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the given classes, in order.
    pub fn new(classes: &[String]) -> Self {
        let mapping = classes
            .iter()
            .cloned()
            .zip(generate_palette(classes.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a class.
    pub fn color_for(&self, class: Option<&str>) -> Color32 {
        class
            .and_then(|c| self.mapping.get(c))
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_and_missing_classes_use_default() {
        let map = ColorMap::new(&["Aves".to_string(), "Mammalia".to_string()]);
        assert_ne!(map.color_for(Some("Aves")), map.color_for(Some("Mammalia")));
        assert_eq!(map.color_for(None), Color32::GRAY);
        assert_eq!(map.color_for(Some("Reptilia")), Color32::GRAY);
    }
}
