use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::ColorImage;
use serde::Serialize;

use crate::data::model::FilteredView;

/// Title written into JSON exports.
pub const EXPORT_TITLE: &str = "R&D investment - BRICS";

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Serialize a filtered view as CSV.
///
/// Header row is `Year,<label1>,<label2>,...`; one row per year with the
/// values in header order. Whole numbers keep a trailing `.0` so the
/// column stays recognisably numeric in spreadsheet tools.
pub fn to_csv(view: &FilteredView) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Year".to_string()];
    header.extend(view.countries.iter().map(|c| c.label.clone()));
    writer.write_record(&header).context("writing CSV header")?;

    for (i, year) in view.years.iter().enumerate() {
        let mut row = vec![year.to_string()];
        row.extend(view.countries.iter().map(|c| format_value(c.values[i])));
        writer
            .write_record(&row)
            .with_context(|| format!("writing CSV row for {year}"))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// JSON export payload:
/// `{ "title", "period": "<start>-<end>", "countries": { "<year>": { "<label>": value } } }`.
/// Years serialize in order; labels sort alphabetically within a year.
#[derive(Debug, Serialize)]
struct JsonExport {
    title: String,
    period: String,
    countries: BTreeMap<i32, BTreeMap<String, f64>>,
}

/// Serialize a filtered view as pretty-printed JSON.
pub fn to_json(view: &FilteredView) -> Result<String> {
    let mut countries: BTreeMap<i32, BTreeMap<String, f64>> = BTreeMap::new();
    for (i, &year) in view.years.iter().enumerate() {
        let per_year = countries.entry(year).or_default();
        for c in &view.countries {
            per_year.insert(c.label.clone(), c.values[i]);
        }
    }

    let payload = JsonExport {
        title: EXPORT_TITLE.to_string(),
        period: view.period(),
        countries,
    };
    serde_json::to_string_pretty(&payload).context("serializing JSON export")
}

// ---------------------------------------------------------------------------
// PNG
// ---------------------------------------------------------------------------

/// Write a captured frame to `path` as PNG.
pub fn save_png(path: &Path, shot: &ColorImage) -> Result<()> {
    let [width, height] = shot.size;
    let mut bytes = Vec::with_capacity(width * height * 4);
    for pixel in &shot.pixels {
        bytes.extend_from_slice(&pixel.to_array());
    }
    image::save_buffer(
        path,
        &bytes,
        width as u32,
        height as u32,
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("encoding PNG to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CountrySeries;
    use eframe::egui::Color32;

    fn two_country_view() -> FilteredView {
        FilteredView {
            years: vec![2004, 2005],
            countries: vec![
                CountrySeries::new("A", "A", Color32::RED, vec![2.0, 3.0]),
                CountrySeries::new("B", "B", Color32::BLUE, vec![2.0, 1.0]),
            ],
        }
    }

    #[test]
    fn csv_matches_the_documented_layout() {
        let csv = to_csv(&two_country_view()).unwrap();
        assert_eq!(csv, "Year,A,B\n2004,2.0,2.0\n2005,3.0,1.0\n");
    }

    #[test]
    fn csv_uses_labels_not_keys() {
        let mut view = two_country_view();
        view.countries[0].label = "Alpha".to_string();
        let csv = to_csv(&view).unwrap();
        assert!(csv.starts_with("Year,Alpha,B\n"));
    }

    #[test]
    fn format_value_keeps_whole_numbers_decimal() {
        assert_eq!(format_value(2.0), "2.0");
        assert_eq!(format_value(0.85), "0.85");
        assert_eq!(format_value(1.37), "1.37");
    }

    #[test]
    fn json_has_title_period_and_year_maps() {
        let json = to_json(&two_country_view()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], EXPORT_TITLE);
        assert_eq!(value["period"], "2004-2005");
        assert_eq!(value["countries"]["2004"]["A"], 2.0);
        assert_eq!(value["countries"]["2004"]["B"], 2.0);
        assert_eq!(value["countries"]["2005"]["A"], 3.0);
        assert_eq!(value["countries"]["2005"]["B"], 1.0);
    }

    #[test]
    fn empty_selection_still_exports_headers_and_years() {
        let view = FilteredView {
            years: vec![2003],
            countries: Vec::new(),
        };
        assert_eq!(to_csv(&view).unwrap(), "Year\n2003\n");
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&view).unwrap()).unwrap();
        assert!(value["countries"]["2003"].as_object().unwrap().is_empty());
    }
}
