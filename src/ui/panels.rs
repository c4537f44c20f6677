use anyhow::Context as _;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::derive::ChartKind;
use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Export", |ui: &mut Ui| {
            if ui.button("Data as CSV…").clicked() {
                export_csv(state);
                ui.close_menu();
            }
            if ui.button("Data as JSON…").clicked() {
                export_json(state);
                ui.close_menu();
            }
            if ui.button("Chart as PNG…").clicked() {
                request_png_export(ui.ctx(), state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} of {} countries, {}-{}",
            state.filters.selected.len(),
            state.dataset.countries.len(),
            state.filters.year_start,
            state.filters.year_end
        ));

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            accessibility_buttons(ui, state);
        });
    });
}

fn accessibility_buttons(ui: &mut Ui, state: &mut AppState) {
    if ui
        .button("🌐")
        .on_hover_text("Open translator (Alt+D)")
        .clicked()
    {
        open_translator(ui.ctx(), state);
    }
    if ui
        .selectable_label(state.access.high_contrast, "◑")
        .on_hover_text("High contrast (Alt+C)")
        .clicked()
    {
        state.toggle_high_contrast();
        apply_visuals(ui.ctx(), state.access.high_contrast);
    }
    if ui
        .button(format!("🔍 {}%", state.access.zoom_percent()))
        .on_hover_text("Cycle zoom (Alt+Z)")
        .clicked()
    {
        let factor = state.cycle_zoom();
        ui.ctx().set_zoom_factor(factor);
    }
    if ui
        .selectable_label(state.access.narration, "🔊")
        .on_hover_text("Narration transcript (Alt+T)")
        .clicked()
    {
        state.toggle_narration();
    }
}

/// Swap the whole theme when high contrast toggles.
pub fn apply_visuals(ctx: &egui::Context, high_contrast: bool) {
    let visuals = if high_contrast {
        let mut v = egui::Visuals::dark();
        v.override_text_color = Some(Color32::WHITE);
        v
    } else {
        egui::Visuals::default()
    };
    ctx.set_visuals(visuals);
}

/// Hand a translator URL to the system browser. Translation itself happens
/// in the browser; nothing comes back.
pub fn open_translator(ctx: &egui::Context, state: &mut AppState) {
    const TRANSLATOR_URL: &str = "https://translate.google.com/?sl=en&tl=pt&op=translate";
    ctx.open_url(egui::OpenUrl::new_tab(TRANSLATOR_URL));
    log::info!("opening translator in the browser");
    state.access.announce("Opening translator in the browser");
}

// ---------------------------------------------------------------------------
// Left side panel – chart selector, filter, accessibility
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut clicked = None;
            for kind in ChartKind::ALL {
                let response = ui
                    .selectable_label(state.chart == kind, kind.label())
                    .on_hover_text(kind.description());
                if response.clicked() {
                    clicked = Some(kind);
                }
            }
            if let Some(kind) = clicked {
                state.select_chart(kind);
            }

            ui.separator();
            ui.strong("Filter");
            if ui.button("Filter data…").clicked() {
                state.open_filter_dialog();
            }

            ui.separator();
            ui.strong("Export");
            if ui.button("Export…").clicked() {
                state.export_dialog = true;
            }

            if state.access.narration {
                ui.separator();
                egui::CollapsingHeader::new(RichText::new("Narration transcript").strong())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        for line in state.access.transcript.iter().rev().take(10) {
                            ui.label(line);
                        }
                    });
            }

            ui.separator();
            ui.small("1-5 chart type · Ctrl+F filter · Ctrl+E export");
            ui.small("Alt+T narration · Alt+Z zoom · Alt+C contrast · Alt+D translate");
        });
}

// ---------------------------------------------------------------------------
// Filter dialog
// ---------------------------------------------------------------------------

/// Modal-style window editing a [`crate::state::FilterDraft`]. Apply
/// validates through the derivation engine and commits atomically; Cancel
/// (or closing the window) discards the draft.
pub fn filter_dialog(ctx: &egui::Context, state: &mut AppState) {
    if state.filter_draft.is_none() {
        return;
    }

    let mut open = true;
    let mut apply_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("Filter data")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            let dataset = &state.dataset;
            let Some(draft) = state.filter_draft.as_mut() else {
                return;
            };

            ui.strong("Countries");
            for country in &dataset.countries {
                let mut checked = draft.selected.contains(&country.key);
                let text = RichText::new(&country.label).color(country.color);
                if ui.checkbox(&mut checked, text).changed() {
                    if checked {
                        draft.selected.insert(country.key.clone());
                    } else {
                        draft.selected.remove(&country.key);
                    }
                }
            }

            ui.separator();
            ui.strong("Years");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                ui.add(egui::TextEdit::singleline(&mut draft.year_start).desired_width(60.0));
                ui.label("to");
                ui.add(egui::TextEdit::singleline(&mut draft.year_end).desired_width(60.0));
            });

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply").clicked() {
                    apply_clicked = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if apply_clicked {
        state.apply_filter_draft();
    } else if cancel_clicked || !open {
        state.cancel_filter_dialog();
    }
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

/// Small chooser mirroring the top-bar export menu, reachable via Ctrl+E.
pub fn export_dialog(ctx: &egui::Context, state: &mut AppState) {
    if !state.export_dialog {
        return;
    }

    let mut open = true;
    let mut done = false;

    egui::Window::new("Export")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label("Choose an export format:");
            if ui.button("Data as CSV…").clicked() {
                export_csv(state);
                done = true;
            }
            if ui.button("Data as JSON…").clicked() {
                export_json(state);
                done = true;
            }
            if ui.button("Chart as PNG…").clicked() {
                request_png_export(ui.ctx(), state);
                done = true;
            }
        });

    if done || !open {
        state.export_dialog = false;
    }
}

// ---------------------------------------------------------------------------
// Export glue – dialogs and file writing
// ---------------------------------------------------------------------------

pub fn export_csv(state: &mut AppState) {
    let Some(view) = exportable_view(state) else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export data as CSV")
        .set_file_name("brics_rd_investment.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let result = export::to_csv(&view)
        .and_then(|csv| std::fs::write(&path, csv).context("writing CSV file"));
    match result {
        Ok(()) => {
            log::info!("exported CSV to {}", path.display());
            state.access.announce("Data exported as CSV");
            state.status_message = None;
        }
        Err(e) => {
            log::error!("CSV export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_json(state: &mut AppState) {
    let Some(view) = exportable_view(state) else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export data as JSON")
        .set_file_name("brics_rd_investment.json")
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };

    let result = export::to_json(&view)
        .and_then(|json| std::fs::write(&path, json).context("writing JSON file"));
    match result {
        Ok(()) => {
            log::info!("exported JSON to {}", path.display());
            state.access.announce("Data exported as JSON");
            state.status_message = None;
        }
        Err(e) => {
            log::error!("JSON export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

/// Ask the host for a frame capture; the app encodes and saves it when the
/// screenshot event arrives.
pub fn request_png_export(ctx: &egui::Context, state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export chart as PNG")
        .set_file_name("brics_rd_chart.png")
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        return;
    };

    state.pending_screenshot = Some(path);
    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
}

fn exportable_view(state: &mut AppState) -> Option<crate::data::model::FilteredView> {
    match state.current_view() {
        Ok(view) => Some(view),
        Err(e) => {
            log::error!("export aborted, cannot derive view: {e}");
            state.status_message = Some(e.to_string());
            None
        }
    }
}
