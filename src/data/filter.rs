use std::collections::BTreeSet;

use super::error::DeriveError;
use super::model::{CountrySeries, Dataset, FilteredView};

// ---------------------------------------------------------------------------
// FilterState – which countries and which year range are active
// ---------------------------------------------------------------------------

/// The active filter: a set of country keys plus an inclusive year range.
///
/// Mutated only through the validated apply path in the UI; the derivation
/// functions receive it read-only. A state that fails validation is never
/// committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub selected: BTreeSet<String>,
    pub year_start: i32,
    pub year_end: i32,
}

impl FilterState {
    /// Initial state: every country selected, full year range.
    pub fn full(dataset: &Dataset) -> Self {
        let (year_start, year_end) = dataset.year_bounds().unwrap_or((0, 0));
        FilterState {
            selected: dataset.countries.iter().map(|c| c.key.clone()).collect(),
            year_start,
            year_end,
        }
    }
}

// ---------------------------------------------------------------------------
// filtered_view – (Dataset, FilterState) → FilteredView
// ---------------------------------------------------------------------------

/// Slice the dataset down to the selected countries and year range.
///
/// Validates before deriving, never clamps: an inverted range or a bound
/// that is not on the year axis fails, so the caller gets a clear signal
/// to re-prompt the user. Selected keys absent from the dataset are
/// silently skipped. Dataset order is preserved, which keeps the ranking
/// tie-break deterministic.
pub fn filtered_view(dataset: &Dataset, state: &FilterState) -> Result<FilteredView, DeriveError> {
    if state.year_start > state.year_end {
        return Err(DeriveError::InvalidYearRange {
            start: state.year_start,
            end: state.year_end,
        });
    }

    let (min, max) = dataset.year_bounds().unwrap_or((0, 0));
    let start = dataset
        .year_index(state.year_start)
        .ok_or(DeriveError::YearOutOfBounds {
            year: state.year_start,
            min,
            max,
        })?;
    let end = dataset
        .year_index(state.year_end)
        .ok_or(DeriveError::YearOutOfBounds {
            year: state.year_end,
            min,
            max,
        })?;

    let countries = dataset
        .countries
        .iter()
        .filter(|c| state.selected.contains(&c.key))
        .map(|c| CountrySeries {
            key: c.key.clone(),
            label: c.label.clone(),
            color: c.color,
            values: c.values[start..=end].to_vec(),
        })
        .collect();

    Ok(FilteredView {
        years: dataset.years[start..=end].to_vec(),
        countries,
    })
}
