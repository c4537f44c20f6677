use eframe::egui::{Color32, ScrollArea, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points,
};

use crate::color;
use crate::data::derive::{self, ChartKind, ChartView, CountryBox, CountryHistogram, LineSeries};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – chart rendering
// ---------------------------------------------------------------------------

/// Render the active chart in the central panel.
///
/// Each frame derives the filtered view and the typed chart view from
/// scratch; egui's immediate mode rebuilds the whole scene, so there is no
/// retained chart object to destroy before switching chart types.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let view = match state.current_view() {
        Ok(view) => view,
        Err(e) => {
            centered_message(ui, &format!("Cannot derive view: {e}"));
            return;
        }
    };

    if view.countries.is_empty() {
        centered_message(ui, "No countries selected. Open the filter to choose some.");
        return;
    }

    let chart = match derive::chart_view(state.chart, &view) {
        Ok(chart) => chart,
        Err(e) => {
            centered_message(ui, &format!("Cannot render chart: {e}"));
            return;
        }
    };

    ui.strong(chart_title(state.chart, &view.period()));
    ui.add_space(4.0);

    let overrides = state
        .access
        .high_contrast
        .then(|| color::high_contrast_palette(view.countries.len().max(1) + 1));
    let overrides = overrides.as_deref();

    match chart {
        ChartView::Lines { years, series } => {
            line_chart(ui, state.chart, &years, &series, overrides);
        }
        ChartView::Rankings {
            years,
            series,
            max_rank,
        } => {
            ranking_chart(ui, &years, &series, max_rank, overrides);
        }
        ChartView::Histograms(charts) => {
            histogram_grid(ui, &charts, overrides);
        }
        ChartView::Boxes(boxes) => {
            boxplot_chart(ui, &boxes, overrides);
        }
    }
}

fn centered_message(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
}

fn chart_title(kind: ChartKind, period: &str) -> String {
    let base = match kind {
        ChartKind::Evolution => "R&D investment evolution (% of GDP)",
        ChartKind::Ranking => "R&D investment ranking",
        ChartKind::Comparison => "R&D investment vs. BRICS average (% of GDP)",
        ChartKind::Histogram => "R&D investment distribution per country",
        ChartKind::Boxplot => "R&D investment spread per country",
    };
    format!("{base} ({period})")
}

// ---------------------------------------------------------------------------
// Line charts (evolution, comparison)
// ---------------------------------------------------------------------------

fn line_chart(
    ui: &mut Ui,
    kind: ChartKind,
    years: &[i32],
    series: &[LineSeries],
    overrides: Option<&[Color32]>,
) {
    let id = match kind {
        ChartKind::Comparison => "comparison_plot",
        _ => "evolution_plot",
    };

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Investment (% of GDP)")
        .x_axis_formatter(whole_number_formatter)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, s) in series.iter().enumerate() {
                let points: PlotPoints = years
                    .iter()
                    .zip(&s.values)
                    .map(|(&year, &value)| [year as f64, value])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&s.label)
                        .color(color::series_color(s.color, i, overrides))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Ranking chart
// ---------------------------------------------------------------------------

/// Rank lines with rank 1 on top. egui_plot has no reversed axis, so ranks
/// are plotted negated and the axis labels show the absolute value.
fn ranking_chart(
    ui: &mut Ui,
    years: &[i32],
    series: &[LineSeries],
    max_rank: usize,
    overrides: Option<&[Color32]>,
) {
    Plot::new("ranking_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Rank")
        .x_axis_formatter(whole_number_formatter)
        .y_axis_formatter(|mark: egui_plot::GridMark, _range: &std::ops::RangeInclusive<f64>| {
            let rank = -mark.value;
            if rank >= 1.0 && rank.fract() == 0.0 {
                format!("{rank:.0}")
            } else {
                String::new()
            }
        })
        .include_y(0.0)
        .include_y(-(max_rank as f64 + 1.0))
        .show(ui, |plot_ui| {
            for (i, s) in series.iter().enumerate() {
                let points: PlotPoints = years
                    .iter()
                    .zip(&s.values)
                    .map(|(&year, &rank)| [year as f64, -rank])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&s.label)
                        .color(color::series_color(s.color, i, overrides))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Histogram grid
// ---------------------------------------------------------------------------

const HISTOGRAM_COLUMNS: usize = 3;

fn histogram_grid(ui: &mut Ui, charts: &[CountryHistogram], overrides: Option<&[Color32]>) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (row_idx, row) in charts.chunks(HISTOGRAM_COLUMNS).enumerate() {
                ui.columns(HISTOGRAM_COLUMNS, |cols: &mut [Ui]| {
                    for (col_idx, chart) in row.iter().enumerate() {
                        let i = row_idx * HISTOGRAM_COLUMNS + col_idx;
                        let color = color::series_color(chart.color, i, overrides);
                        single_histogram(&mut cols[col_idx], chart, color);
                    }
                });
                ui.add_space(8.0);
            }
        });
}

fn single_histogram(ui: &mut Ui, chart: &CountryHistogram, color: Color32) {
    ui.vertical(|ui: &mut Ui| {
        ui.strong(&chart.label);

        let bars: Vec<Bar> = chart
            .histogram
            .edges
            .iter()
            .zip(&chart.histogram.counts)
            .map(|(&(start, end), &count)| {
                let width = end - start;
                // A degenerate series has zero-width bins; give the bar a
                // nominal width so it stays visible.
                let bar_width = if width > 0.0 { width * 0.9 } else { 0.05 };
                Bar::new((start + end) / 2.0, count as f64)
                    .width(bar_width)
                    .fill(color.gamma_multiply(0.8))
                    .stroke(Stroke::new(1.0, color))
            })
            .collect();

        Plot::new(format!("hist_{}", chart.label))
            .height(220.0)
            .x_axis_label("Investment (% of GDP)")
            .y_axis_label("Frequency")
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&chart.label));
            });
    });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

fn boxplot_chart(ui: &mut Ui, boxes: &[CountryBox], overrides: Option<&[Color32]>) {
    let labels: Vec<String> = boxes.iter().map(|b| b.label.clone()).collect();

    Plot::new("boxplot_plot")
        .x_axis_label("Country")
        .y_axis_label("Investment (% of GDP)")
        .x_axis_formatter(move |mark: egui_plot::GridMark, _range: &std::ops::RangeInclusive<f64>| {
            if mark.value.fract() != 0.0 || mark.value < 0.0 {
                return String::new();
            }
            labels
                .get(mark.value as usize)
                .cloned()
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let mut elems = Vec::with_capacity(boxes.len());
            for (i, b) in boxes.iter().enumerate() {
                let color = color::series_color(b.color, i, overrides);
                let s = &b.summary;
                elems.push(
                    BoxElem::new(i as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                        .name(&b.label)
                        .fill(color.gamma_multiply(0.5))
                        .stroke(Stroke::new(2.0, color))
                        .box_width(0.5)
                        .whisker_width(0.35),
                );
            }
            plot_ui.box_plot(BoxPlot::new(elems).name("R&D investment"));

            for (i, b) in boxes.iter().enumerate() {
                if b.summary.outliers.is_empty() {
                    continue;
                }
                let color = color::series_color(b.color, i, overrides);
                let points: PlotPoints = b
                    .summary
                    .outliers
                    .iter()
                    .map(|&v| [i as f64, v])
                    .collect();
                plot_ui.points(Points::new(points).radius(3.0).color(color).name(&b.label));
            }
        });
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

fn whole_number_formatter(
    mark: egui_plot::GridMark,
    _range: &std::ops::RangeInclusive<f64>,
) -> String {
    if mark.value.fract() == 0.0 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}
