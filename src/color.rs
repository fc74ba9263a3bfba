use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::FieldValue;

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
// Color mapping: grouping-field value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of the grouping field to distinct colours, so a
/// group keeps its colour across every chart that frame.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<FieldValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted distinct group values.
    pub fn new<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a FieldValue>,
    {
        let values: Vec<&FieldValue> = values.into_iter().collect();
        let palette = generate_palette(values.len());
        let mapping: BTreeMap<FieldValue, Color32> = values
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a group value; ungrouped series get the
    /// default.
    pub fn color_for(&self, value: Option<&FieldValue>) -> Color32 {
        match value {
            Some(v) => self.mapping.get(v).copied().unwrap_or(self.default_color),
            None => Color32::LIGHT_BLUE,
        }
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_yields_distinct_colors() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_values_fall_back_to_the_default() {
        let values = [
            FieldValue::Str("male".into()),
            FieldValue::Str("female".into()),
        ];
        let map = ColorMap::new(values.iter());
        let known = map.color_for(Some(&values[0]));
        let unknown = map.color_for(Some(&FieldValue::Str("other".into())));
        assert_ne!(known, unknown);
        assert_eq!(unknown, Color32::GRAY);
    }
}
