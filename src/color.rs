use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// High-contrast palette
// ---------------------------------------------------------------------------

/// Generates `n` maximally saturated colours with evenly spaced hues.
///
/// Used by the high-contrast mode, which replaces the dataset's display
/// colours with hues that stand out against the dark theme.
pub fn high_contrast_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 1.0, 0.6);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Pick a series colour, honouring the high-contrast override.
pub fn series_color(base: Color32, index: usize, override_palette: Option<&[Color32]>) -> Color32 {
    match override_palette {
        Some(palette) if !palette.is_empty() => palette[index % palette.len()],
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(high_contrast_palette(0).is_empty());
        assert_eq!(high_contrast_palette(5).len(), 5);
    }

    #[test]
    fn palette_colors_are_distinct() {
        let palette = high_contrast_palette(6);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn series_color_prefers_the_override() {
        let palette = [Color32::YELLOW, Color32::LIGHT_BLUE];
        assert_eq!(
            series_color(Color32::RED, 0, Some(&palette)),
            Color32::YELLOW
        );
        assert_eq!(
            series_color(Color32::RED, 3, Some(&palette)),
            Color32::LIGHT_BLUE
        );
        assert_eq!(series_color(Color32::RED, 0, None), Color32::RED);
    }
}
