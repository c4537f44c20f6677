use eframe::egui::Color32;

use super::dataset::MEAN_COLOR;
use super::error::DeriveError;
use super::model::FilteredView;

/// Bin count used for the per-country histogram charts.
pub const HISTOGRAM_BINS: usize = 6;

// ---------------------------------------------------------------------------
// Statistical derivations
// ---------------------------------------------------------------------------

/// Per-year arithmetic mean across the selected countries.
///
/// The result has one entry per year of the view.
pub fn mean_series(view: &FilteredView) -> Result<Vec<f64>, DeriveError> {
    if view.countries.is_empty() {
        return Err(DeriveError::EmptySeries);
    }
    let n = view.countries.len() as f64;
    Ok((0..view.years.len())
        .map(|i| view.countries.iter().map(|c| c.values[i]).sum::<f64>() / n)
        .collect())
}

/// Per-year rank of `key` among the selected countries, descending by
/// value: rank 1 is the highest investment.
///
/// Ties resolve by dataset order, earlier series ranking higher. That
/// makes the result a permutation of 1..=n for every year and reproducible
/// across runs given the same input order.
pub fn ranking(view: &FilteredView, key: &str) -> Result<Vec<usize>, DeriveError> {
    let target = view
        .countries
        .iter()
        .position(|c| c.key == key)
        .ok_or_else(|| DeriveError::UnknownCountry(key.to_string()))?;

    Ok((0..view.years.len())
        .map(|i| {
            let value = view.countries[target].values[i];
            let ahead = view
                .countries
                .iter()
                .enumerate()
                .filter(|(ci, c)| {
                    c.values[i] > value || (c.values[i] == value && *ci < target)
                })
                .count();
            ahead + 1
        })
        .collect())
}

/// Equal-width histogram of a value series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `(start, end)` per bin, in order.
    pub edges: Vec<(f64, f64)>,
    /// Number of values falling in each bin.
    pub counts: Vec<usize>,
}

/// Partition `[min, max]` into `bin_count` equal-width bins and count
/// membership.
///
/// Bins are half-open except the last, whose upper bound is pinned to the
/// observed maximum and inclusive, so no value can be dropped by a
/// floating-point boundary. When every value is identical the bin width is
/// zero and everything lands in bin 0.
pub fn histogram(series: &[f64], bin_count: usize) -> Result<Histogram, DeriveError> {
    if series.is_empty() {
        return Err(DeriveError::EmptySeries);
    }
    let bin_count = bin_count.max(1);

    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bin_count as f64;

    let edges: Vec<(f64, f64)> = (0..bin_count)
        .map(|i| {
            let start = min + i as f64 * width;
            let end = if i == bin_count - 1 {
                max
            } else {
                min + (i + 1) as f64 * width
            };
            (start, end)
        })
        .collect();

    let mut counts = vec![0usize; bin_count];
    if width == 0.0 {
        // Degenerate series: every boundary collapses to `min`.
        counts[0] = series.len();
        return Ok(Histogram { edges, counts });
    }

    for &value in series {
        for (i, &(start, end)) in edges.iter().enumerate() {
            let last = i == bin_count - 1;
            let below_end = if last { value <= end } else { value < end };
            if value >= start && below_end {
                counts[i] += 1;
                break;
            }
        }
    }

    Ok(Histogram { edges, counts })
}

/// Five-number summary plus outliers, the basis of a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Values beyond 1.5×IQR from Q1/Q3.
    pub outliers: Vec<f64>,
}

/// Compute the five-number summary of a series.
///
/// Quartiles use linear interpolation between closest ranks (the R-7
/// method: `h = (n-1)·p`), so exports and charts reproduce identically.
pub fn boxplot_summary(series: &[f64]) -> Result<BoxplotSummary, DeriveError> {
    if series.is_empty() {
        return Err(DeriveError::EmptySeries);
    }
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    Ok(BoxplotSummary {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        outliers: sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect(),
    })
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

// ---------------------------------------------------------------------------
// ChartKind / ChartView – typed per-chart derivations
// ---------------------------------------------------------------------------

/// The available chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Evolution,
    Ranking,
    Comparison,
    Histogram,
    Boxplot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Evolution,
        ChartKind::Ranking,
        ChartKind::Comparison,
        ChartKind::Histogram,
        ChartKind::Boxplot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Evolution => "Evolution",
            ChartKind::Ranking => "Ranking",
            ChartKind::Comparison => "Comparison with average",
            ChartKind::Histogram => "Histogram",
            ChartKind::Boxplot => "Box plot",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChartKind::Evolution => "Investment over time, one line per country",
            ChartKind::Ranking => "Yearly position among the selected countries",
            ChartKind::Comparison => "Evolution with the group average overlaid",
            ChartKind::Histogram => "Value distribution per country",
            ChartKind::Boxplot => "Five-number summary per country",
        }
    }
}

/// One renderable line.
#[derive(Debug, Clone)]
pub struct LineSeries {
    pub label: String,
    pub color: Color32,
    pub values: Vec<f64>,
}

/// A per-country histogram, ready for a bar chart.
#[derive(Debug, Clone)]
pub struct CountryHistogram {
    pub label: String,
    pub color: Color32,
    pub histogram: Histogram,
}

/// A per-country five-number summary, ready for a box plot.
#[derive(Debug, Clone)]
pub struct CountryBox {
    pub label: String,
    pub color: Color32,
    pub summary: BoxplotSummary,
}

/// Everything the renderer needs for one chart, shaped per chart type so
/// the expected structure is enforced by the type system instead of
/// runtime guards.
#[derive(Debug, Clone)]
pub enum ChartView {
    Lines {
        years: Vec<i32>,
        series: Vec<LineSeries>,
    },
    Rankings {
        years: Vec<i32>,
        series: Vec<LineSeries>,
        max_rank: usize,
    },
    Histograms(Vec<CountryHistogram>),
    Boxes(Vec<CountryBox>),
}

/// Derive the typed view for a chart type from a filtered view.
pub fn chart_view(kind: ChartKind, view: &FilteredView) -> Result<ChartView, DeriveError> {
    match kind {
        ChartKind::Evolution => Ok(ChartView::Lines {
            years: view.years.clone(),
            series: line_series(view),
        }),
        ChartKind::Comparison => {
            let mut series = line_series(view);
            series.push(LineSeries {
                label: "BRICS average".to_string(),
                color: MEAN_COLOR,
                values: mean_series(view)?,
            });
            Ok(ChartView::Lines {
                years: view.years.clone(),
                series,
            })
        }
        ChartKind::Ranking => {
            let series = view
                .countries
                .iter()
                .map(|c| {
                    Ok(LineSeries {
                        label: c.label.clone(),
                        color: c.color,
                        values: ranking(view, &c.key)?
                            .into_iter()
                            .map(|r| r as f64)
                            .collect(),
                    })
                })
                .collect::<Result<Vec<_>, DeriveError>>()?;
            Ok(ChartView::Rankings {
                years: view.years.clone(),
                series,
                max_rank: view.countries.len(),
            })
        }
        ChartKind::Histogram => {
            let charts = view
                .countries
                .iter()
                .map(|c| {
                    Ok(CountryHistogram {
                        label: c.label.clone(),
                        color: c.color,
                        histogram: histogram(&c.values, HISTOGRAM_BINS)?,
                    })
                })
                .collect::<Result<Vec<_>, DeriveError>>()?;
            Ok(ChartView::Histograms(charts))
        }
        ChartKind::Boxplot => {
            let boxes = view
                .countries
                .iter()
                .map(|c| {
                    Ok(CountryBox {
                        label: c.label.clone(),
                        color: c.color,
                        summary: boxplot_summary(&c.values)?,
                    })
                })
                .collect::<Result<Vec<_>, DeriveError>>()?;
            Ok(ChartView::Boxes(boxes))
        }
    }
}

fn line_series(view: &FilteredView) -> Vec<LineSeries> {
    view.countries
        .iter()
        .map(|c| LineSeries {
            label: c.label.clone(),
            color: c.color,
            values: c.values.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CountrySeries, Dataset};

    fn view(countries: Vec<(&str, Vec<f64>)>, years: Vec<i32>) -> FilteredView {
        FilteredView {
            years,
            countries: countries
                .into_iter()
                .map(|(key, values)| CountrySeries::new(key, key, Color32::GRAY, values))
                .collect(),
        }
    }

    #[test]
    fn mean_series_matches_hand_computation() {
        let v = view(
            vec![("A", vec![2.0, 3.0]), ("B", vec![2.0, 1.0])],
            vec![2004, 2005],
        );
        assert_eq!(mean_series(&v).unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn mean_series_rejects_empty_selection() {
        let v = view(vec![], vec![2003]);
        assert_eq!(mean_series(&v).unwrap_err(), DeriveError::EmptySeries);
    }

    #[test]
    fn ranking_orders_descending_by_value() {
        let v = view(
            vec![("A", vec![1.0, 3.0]), ("B", vec![3.0, 1.0])],
            vec![2003, 2004],
        );
        assert_eq!(ranking(&v, "A").unwrap(), vec![2, 1]);
        assert_eq!(ranking(&v, "B").unwrap(), vec![1, 2]);
    }

    #[test]
    fn ranking_breaks_ties_by_insertion_order() {
        // At 2004 both countries sit at 2.0; A was inserted first, so A
        // ranks 1 and B ranks 2.
        let v = view(
            vec![("A", vec![2.0, 3.0]), ("B", vec![2.0, 1.0])],
            vec![2004, 2005],
        );
        assert_eq!(ranking(&v, "A").unwrap(), vec![1, 1]);
        assert_eq!(ranking(&v, "B").unwrap(), vec![2, 2]);
    }

    #[test]
    fn ranking_is_a_permutation_per_year() {
        let v = view(
            vec![
                ("A", vec![1.0, 2.0, 2.0]),
                ("B", vec![1.0, 2.0, 1.0]),
                ("C", vec![1.0, 0.5, 3.0]),
            ],
            vec![2003, 2004, 2005],
        );
        for year_idx in 0..3 {
            let mut ranks: Vec<usize> = ["A", "B", "C"]
                .iter()
                .map(|k| ranking(&v, k).unwrap()[year_idx])
                .collect();
            ranks.sort_unstable();
            assert_eq!(ranks, vec![1, 2, 3], "year index {year_idx}");
        }
    }

    #[test]
    fn ranking_rejects_unknown_key() {
        let v = view(vec![("A", vec![1.0])], vec![2003]);
        assert_eq!(
            ranking(&v, "ZZZ").unwrap_err(),
            DeriveError::UnknownCountry("ZZZ".to_string())
        );
    }

    #[test]
    fn histogram_counts_sum_to_series_length() {
        let series = [0.6, 0.9, 1.1, 1.1, 1.4, 2.0, 2.4];
        for bins in 1..=8 {
            let h = histogram(&series, bins).unwrap();
            assert_eq!(h.counts.iter().sum::<usize>(), series.len(), "{bins} bins");
            assert_eq!(h.edges.len(), bins);
        }
    }

    #[test]
    fn histogram_max_lands_in_last_bin() {
        let series = [0.0, 0.5, 1.0, 1.5, 3.0];
        let h = histogram(&series, 3).unwrap();
        assert_eq!(h.counts.last(), Some(&1));
        assert_eq!(h.edges.last().map(|e| e.1), Some(3.0));
    }

    #[test]
    fn histogram_interior_boundary_belongs_to_upper_bin() {
        // Edges at 0, 1, 2: the value 1.0 goes to the second bin.
        let series = [0.0, 1.0, 2.0];
        let h = histogram(&series, 2).unwrap();
        assert_eq!(h.counts, vec![1, 2]);
    }

    #[test]
    fn histogram_degenerate_series_fills_bin_zero() {
        let series = [1.5; 4];
        let h = histogram(&series, 6).unwrap();
        assert_eq!(h.counts[0], 4);
        assert_eq!(h.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn histogram_rejects_empty_series() {
        assert_eq!(histogram(&[], 6).unwrap_err(), DeriveError::EmptySeries);
    }

    #[test]
    fn boxplot_five_numbers_are_ordered() {
        let s = boxplot_summary(&[1.3, 0.7, 2.2, 1.1, 0.9, 1.8]).unwrap();
        assert!(s.min <= s.q1);
        assert!(s.q1 <= s.median);
        assert!(s.median <= s.q3);
        assert!(s.q3 <= s.max);
    }

    #[test]
    fn boxplot_quartiles_interpolate_linearly() {
        // n = 4: h = 0.75 for Q1, 1.5 for the median, 2.25 for Q3.
        let s = boxplot_summary(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
        assert_eq!((s.min, s.max), (1.0, 4.0));
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn boxplot_flags_values_beyond_the_fences() {
        let s = boxplot_summary(&[1.0, 1.1, 1.2, 1.3, 1.4, 9.0]).unwrap();
        assert_eq!(s.outliers, vec![9.0]);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn boxplot_rejects_empty_series() {
        assert_eq!(boxplot_summary(&[]).unwrap_err(), DeriveError::EmptySeries);
    }

    #[test]
    fn filter_rank_average_end_to_end() {
        use crate::data::filter::{filtered_view, FilterState};

        let ds = Dataset {
            years: vec![2003, 2004, 2005],
            countries: vec![
                CountrySeries::new("A", "A", Color32::RED, vec![1.0, 2.0, 3.0]),
                CountrySeries::new("B", "B", Color32::BLUE, vec![3.0, 2.0, 1.0]),
            ],
        };
        let st = FilterState {
            selected: ["A", "B"].iter().map(|k| k.to_string()).collect(),
            year_start: 2004,
            year_end: 2005,
        };
        let v = filtered_view(&ds, &st).unwrap();
        assert_eq!(v.years, vec![2004, 2005]);
        // Tie at 2004 resolves in favour of A (inserted first).
        assert_eq!(ranking(&v, "A").unwrap(), vec![1, 1]);
        assert_eq!(mean_series(&v).unwrap()[1], 2.0);
    }

    #[test]
    fn comparison_view_appends_the_mean_overlay() {
        let v = view(
            vec![("A", vec![2.0, 3.0]), ("B", vec![2.0, 1.0])],
            vec![2004, 2005],
        );
        match chart_view(ChartKind::Comparison, &v).unwrap() {
            ChartView::Lines { series, .. } => {
                assert_eq!(series.len(), 3);
                assert_eq!(series[2].label, "BRICS average");
                assert_eq!(series[2].values, vec![2.0, 2.0]);
            }
            other => panic!("expected Lines, got {other:?}"),
        }
    }

    #[test]
    fn ranking_view_carries_the_rank_ceiling() {
        let v = view(
            vec![("A", vec![1.0]), ("B", vec![2.0]), ("C", vec![3.0])],
            vec![2003],
        );
        match chart_view(ChartKind::Ranking, &v).unwrap() {
            ChartView::Rankings {
                series, max_rank, ..
            } => {
                assert_eq!(max_rank, 3);
                assert_eq!(series.len(), 3);
                assert_eq!(series[2].values, vec![1.0]);
            }
            other => panic!("expected Rankings, got {other:?}"),
        }
    }

    #[test]
    fn histogram_view_produces_one_chart_per_country() {
        let v = view(
            vec![("A", vec![1.0, 2.0, 3.0]), ("B", vec![2.0, 2.0, 2.0])],
            vec![2003, 2004, 2005],
        );
        match chart_view(ChartKind::Histogram, &v).unwrap() {
            ChartView::Histograms(charts) => {
                assert_eq!(charts.len(), 2);
                for c in &charts {
                    assert_eq!(c.histogram.counts.iter().sum::<usize>(), 3);
                }
            }
            other => panic!("expected Histograms, got {other:?}"),
        }
    }
}
