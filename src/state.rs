use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::data::dataset;
use crate::data::derive::ChartKind;
use crate::data::error::DeriveError;
use crate::data::filter::{filtered_view, FilterState};
use crate::data::model::{Dataset, FilteredView};

// ---------------------------------------------------------------------------
// Accessibility state
// ---------------------------------------------------------------------------

const TRANSCRIPT_CAP: usize = 50;

/// Accessibility toggles plus the narration transcript.
///
/// The transcript is the adapter seam for narration: user-visible actions
/// append a line here while narration is active, and a host integration
/// (or the user's own screen reader) takes it from there.
pub struct AccessState {
    pub narration: bool,
    /// 0..=3, mapping to 100/110/120/130 % UI scale.
    pub zoom_level: u8,
    pub high_contrast: bool,
    pub transcript: Vec<String>,
}

impl Default for AccessState {
    fn default() -> Self {
        Self {
            narration: false,
            zoom_level: 0,
            high_contrast: false,
            transcript: Vec::new(),
        }
    }
}

impl AccessState {
    /// Record an announcement, but only while narration is active.
    pub fn announce(&mut self, text: impl Into<String>) {
        if self.narration {
            self.record(text.into());
        }
    }

    fn record(&mut self, text: String) {
        log::info!("narration: {text}");
        self.transcript.push(text);
        if self.transcript.len() > TRANSCRIPT_CAP {
            self.transcript.remove(0);
        }
    }

    pub fn zoom_factor(&self) -> f32 {
        1.0 + 0.1 * self.zoom_level as f32
    }

    pub fn zoom_percent(&self) -> u32 {
        100 + 10 * self.zoom_level as u32
    }
}

// ---------------------------------------------------------------------------
// Filter dialog draft
// ---------------------------------------------------------------------------

/// What the filter dialog edits. Kept separate from [`FilterState`] so a
/// rejected apply never leaves a half-mutated filter behind: the draft is
/// validated as a whole and committed atomically or not at all.
#[derive(Debug, Clone)]
pub struct FilterDraft {
    pub selected: BTreeSet<String>,
    pub year_start: String,
    pub year_end: String,
}

impl FilterDraft {
    fn from_state(state: &FilterState) -> Self {
        FilterDraft {
            selected: state.selected.clone(),
            year_start: state.year_start.to_string(),
            year_end: state.year_end.to_string(),
        }
    }

    fn parse(&self) -> Result<FilterState, String> {
        let year_start = self
            .year_start
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("'{}' is not a valid year", self.year_start))?;
        let year_end = self
            .year_end
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("'{}' is not a valid year", self.year_end))?;
        Ok(FilterState {
            selected: self.selected.clone(),
            year_start,
            year_end,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. No ambient globals: every
/// operation receives this struct explicitly.
pub struct AppState {
    /// The embedded dataset, immutable after startup.
    pub dataset: Dataset,

    /// Active filter, mutated only through the validated apply path.
    pub filters: FilterState,

    /// Which chart type is shown.
    pub chart: ChartKind,

    /// Accessibility toggles and transcript.
    pub access: AccessState,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Draft being edited in the filter dialog (Some = dialog open).
    pub filter_draft: Option<FilterDraft>,

    /// Whether the export chooser is open.
    pub export_dialog: bool,

    /// Destination for a requested chart screenshot, consumed when the
    /// frame arrives.
    pub pending_screenshot: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(dataset::builtin())
    }
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let filters = FilterState::full(&dataset);
        AppState {
            dataset,
            filters,
            chart: ChartKind::Evolution,
            access: AccessState::default(),
            status_message: None,
            filter_draft: None,
            export_dialog: false,
            pending_screenshot: None,
        }
    }

    /// Derive the filtered view for the current filters. Rebuilt on every
    /// call; the filters are validated on commit, so an error here means a
    /// bug and is surfaced by the caller.
    pub fn current_view(&self) -> Result<FilteredView, DeriveError> {
        filtered_view(&self.dataset, &self.filters)
    }

    pub fn select_chart(&mut self, kind: ChartKind) {
        self.chart = kind;
        self.access.announce(format!("Showing {}", kind.label()));
    }

    // ---- filter dialog ----

    pub fn open_filter_dialog(&mut self) {
        self.filter_draft = Some(FilterDraft::from_state(&self.filters));
        self.access.announce("Filter dialog opened");
    }

    pub fn cancel_filter_dialog(&mut self) {
        self.filter_draft = None;
        self.access.announce("Filter dialog closed");
    }

    /// Validate the draft and commit it atomically. On failure the dialog
    /// stays open, the previous filters stay active and the error is shown
    /// in the status line.
    pub fn apply_filter_draft(&mut self) {
        let Some(draft) = &self.filter_draft else {
            return;
        };

        let candidate = match draft.parse() {
            Ok(candidate) => candidate,
            Err(message) => {
                self.status_message = Some(message);
                return;
            }
        };

        match filtered_view(&self.dataset, &candidate) {
            Ok(_) => {
                let n = candidate.selected.len();
                let (start, end) = (candidate.year_start, candidate.year_end);
                self.filters = candidate;
                self.filter_draft = None;
                self.status_message = None;
                log::info!("filters applied: {n} countries, {start}-{end}");
                self.access.announce(format!(
                    "Filters applied: {n} countries selected, {start} to {end}"
                ));
            }
            Err(e) => {
                log::warn!("rejected filter: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    // ---- accessibility ----

    pub fn toggle_narration(&mut self) {
        self.access.narration = !self.access.narration;
        let message = if self.access.narration {
            "Narration enabled. Actions will be transcribed here."
        } else {
            "Narration disabled."
        };
        // The toggle itself is always transcribed so the user can see the
        // feature switch off.
        self.access.record(message.to_string());
    }

    /// Advance the zoom level and return the new UI scale factor.
    pub fn cycle_zoom(&mut self) -> f32 {
        self.access.zoom_level = (self.access.zoom_level + 1) % 4;
        self.access
            .announce(format!("Zoom {}%", self.access.zoom_percent()));
        self.access.zoom_factor()
    }

    pub fn toggle_high_contrast(&mut self) {
        self.access.high_contrast = !self.access.high_contrast;
        self.access.announce(if self.access.high_contrast {
            "High contrast enabled"
        } else {
            "High contrast disabled"
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CountrySeries;
    use eframe::egui::Color32;

    fn test_state() -> AppState {
        AppState::new(Dataset {
            years: vec![2003, 2004, 2005],
            countries: vec![
                CountrySeries::new("A", "Alpha", Color32::RED, vec![1.0, 2.0, 3.0]),
                CountrySeries::new("B", "Beta", Color32::BLUE, vec![3.0, 2.0, 1.0]),
            ],
        })
    }

    fn draft(state: &mut AppState, start: &str, end: &str) {
        state.open_filter_dialog();
        let d = state.filter_draft.as_mut().unwrap();
        d.year_start = start.to_string();
        d.year_end = end.to_string();
    }

    #[test]
    fn starts_with_everything_selected() {
        let state = test_state();
        assert_eq!(state.filters.selected.len(), 2);
        assert_eq!(state.chart, ChartKind::Evolution);
        assert!(state.current_view().is_ok());
    }

    #[test]
    fn valid_draft_commits_and_closes_the_dialog() {
        let mut state = test_state();
        draft(&mut state, "2004", "2005");
        state.apply_filter_draft();
        assert!(state.filter_draft.is_none());
        assert_eq!((state.filters.year_start, state.filters.year_end), (2004, 2005));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn inverted_range_is_rejected_and_state_is_untouched() {
        let mut state = test_state();
        let before = state.filters.clone();
        draft(&mut state, "2005", "2003");
        state.apply_filter_draft();
        assert_eq!(state.filters, before);
        assert!(state.filter_draft.is_some(), "dialog stays open");
        assert!(state.status_message.is_some());
    }

    #[test]
    fn out_of_bounds_year_is_rejected_and_state_is_untouched() {
        let mut state = test_state();
        let before = state.filters.clone();
        draft(&mut state, "1999", "2005");
        state.apply_filter_draft();
        assert_eq!(state.filters, before);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn unparsable_year_is_rejected_with_a_message() {
        let mut state = test_state();
        let before = state.filters.clone();
        draft(&mut state, "20x3", "2005");
        state.apply_filter_draft();
        assert_eq!(state.filters, before);
        assert!(state.status_message.unwrap().contains("20x3"));
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut state = test_state();
        draft(&mut state, "2004", "2004");
        state.cancel_filter_dialog();
        assert!(state.filter_draft.is_none());
        assert_eq!((state.filters.year_start, state.filters.year_end), (2003, 2005));
    }

    #[test]
    fn zoom_cycles_through_four_levels() {
        let mut state = test_state();
        assert_eq!(state.access.zoom_factor(), 1.0);
        let percents: Vec<u32> = (0..5)
            .map(|_| {
                state.cycle_zoom();
                state.access.zoom_percent()
            })
            .collect();
        assert_eq!(percents, vec![110, 120, 130, 100, 110]);
        assert_eq!(state.access.zoom_factor(), 1.0 + 0.1);
    }

    #[test]
    fn transcript_only_records_while_narration_is_active() {
        let mut state = test_state();
        state.select_chart(ChartKind::Boxplot);
        assert!(state.access.transcript.is_empty());

        state.toggle_narration();
        state.select_chart(ChartKind::Ranking);
        assert_eq!(state.access.transcript.len(), 2);
        assert!(state.access.transcript[1].contains("Ranking"));

        state.toggle_narration();
        state.select_chart(ChartKind::Histogram);
        // The disable message is recorded, the later action is not.
        assert_eq!(state.access.transcript.len(), 3);
    }

    #[test]
    fn transcript_is_capped() {
        let mut state = test_state();
        state.toggle_narration();
        for _ in 0..200 {
            state.access.announce("tick");
        }
        assert_eq!(state.access.transcript.len(), TRANSCRIPT_CAP);
    }
}
