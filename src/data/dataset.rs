use eframe::egui::Color32;

use super::model::{CountrySeries, Dataset};

/// Colour of the group-average overlay line.
pub const MEAN_COLOR: Color32 = Color32::from_rgb(0x99, 0x0F, 0x02);

/// The embedded table: gross domestic expenditure on R&D as a share of
/// GDP for the BRICS countries, 2003-2020 (UNESCO/World Bank figures,
/// rounded to two decimals).
///
/// Immutable and built once at startup. Vec order is the canonical
/// display order and the ranking tie-break order.
pub fn builtin() -> Dataset {
    Dataset {
        years: (2003..=2020).collect(),
        countries: vec![
            CountrySeries::new(
                "BRA",
                "Brazil",
                Color32::from_rgb(0x2C, 0xA0, 0x2C),
                vec![
                    0.96, 0.90, 0.97, 0.99, 1.08, 1.13, 1.12, 1.16, 1.14, 1.13, 1.20, 1.27,
                    1.37, 1.28, 1.12, 1.17, 1.21, 1.14,
                ],
            ),
            CountrySeries::new(
                "RUS",
                "Russia",
                Color32::from_rgb(0xE3, 0x77, 0xC2),
                vec![
                    1.29, 1.15, 1.07, 1.07, 1.12, 1.04, 1.25, 1.13, 1.01, 1.03, 1.03, 1.07,
                    1.10, 1.10, 1.11, 0.99, 1.04, 1.10,
                ],
            ),
            CountrySeries::new(
                "IND",
                "India",
                Color32::from_rgb(0xFF, 0x7F, 0x0E),
                vec![
                    0.71, 0.74, 0.79, 0.80, 0.79, 0.84, 0.82, 0.79, 0.75, 0.71, 0.71, 0.70,
                    0.69, 0.67, 0.67, 0.66, 0.66, 0.65,
                ],
            ),
            CountrySeries::new(
                "CHN",
                "China",
                Color32::from_rgb(0x1F, 0x77, 0xB4),
                vec![
                    1.13, 1.22, 1.31, 1.37, 1.37, 1.44, 1.66, 1.71, 1.78, 1.91, 1.99, 2.02,
                    2.06, 2.10, 2.12, 2.14, 2.24, 2.40,
                ],
            ),
            CountrySeries::new(
                "ZAF",
                "South Africa",
                Color32::from_rgb(0x17, 0xBE, 0xCF),
                vec![
                    0.76, 0.81, 0.86, 0.90, 0.88, 0.89, 0.84, 0.74, 0.73, 0.73, 0.72, 0.77,
                    0.80, 0.82, 0.83, 0.75, 0.62, 0.61,
                ],
            ),
        ],
    }
}
