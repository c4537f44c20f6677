use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// CountrySeries – one country's time series
// ---------------------------------------------------------------------------

/// A single country's R&D investment series (% of GDP), positionally
/// aligned with the year axis of the [`Dataset`] it belongs to.
#[derive(Debug, Clone)]
pub struct CountrySeries {
    /// Stable identifier (ISO 3166-1 alpha-3 code).
    pub key: String,
    /// Display name.
    pub label: String,
    /// Display colour.
    pub color: Color32,
    /// One value per year on the owning axis.
    pub values: Vec<f64>,
}

impl CountrySeries {
    pub fn new(key: &str, label: &str, color: Color32, values: Vec<f64>) -> Self {
        CountrySeries {
            key: key.to_string(),
            label: label.to_string(),
            color,
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the full embedded table
// ---------------------------------------------------------------------------

/// The complete table: a strictly increasing year axis plus one series per
/// country. Vec order is the canonical display order and the ranking
/// tie-break order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub years: Vec<i32>,
    pub countries: Vec<CountrySeries>,
}

impl Dataset {
    /// Look up a series by country key.
    pub fn series(&self, key: &str) -> Option<&CountrySeries> {
        self.countries.iter().find(|c| c.key == key)
    }

    /// Position of a year on the axis, if present.
    pub fn year_index(&self, year: i32) -> Option<usize> {
        self.years.iter().position(|&y| y == year)
    }

    /// First and last year on the axis.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        match (self.years.first(), self.years.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the dataset restricted to a country subset and year range
// ---------------------------------------------------------------------------

/// The dataset sliced to a user-chosen country subset and inclusive year
/// sub-range. Ephemeral: built by [`crate::data::filter::filtered_view`]
/// for each render or export, never stored.
#[derive(Debug, Clone)]
pub struct FilteredView {
    /// Contiguous sub-sequence of the dataset's year axis.
    pub years: Vec<i32>,
    /// Selected series, in dataset order, each sliced to `years`.
    pub countries: Vec<CountrySeries>,
}

impl FilteredView {
    pub fn series(&self, key: &str) -> Option<&CountrySeries> {
        self.countries.iter().find(|c| c.key == key)
    }

    /// Covered period as `"start-end"`, e.g. `"2003-2020"`.
    pub fn period(&self) -> String {
        match (self.years.first(), self.years.last()) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => String::new(),
        }
    }
}
