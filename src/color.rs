use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.6);
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
// Grade → colour
// ---------------------------------------------------------------------------

/// Fixed colour per grade label, so a grade keeps its colour across charts
/// and filter changes.
#[derive(Debug, Clone, Default)]
pub struct GradeColors {
    mapping: BTreeMap<String, Color32>,
}

impl GradeColors {
    pub fn new(grades: &[String]) -> Self {
        let mapping = grades
            .iter()
            .cloned()
            .zip(generate_palette(grades.len()))
            .collect();
        GradeColors { mapping }
    }

    pub fn color_for(&self, grade: &str) -> Color32 {
        self.mapping.get(grade).copied().unwrap_or(Color32::GRAY)
    }
}
