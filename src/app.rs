use eframe::egui;

use crate::data::derive::ChartKind;
use crate::export;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BricsDashApp {
    pub state: AppState,
}

impl Default for BricsDashApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for BricsDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.handle_screenshots(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: chart selector and controls ----
        egui::SidePanel::left("control_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the active chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_panel(ui, &self.state);
        });

        // ---- Floating dialogs ----
        panels::filter_dialog(ctx, &mut self.state);
        panels::export_dialog(ctx, &mut self.state);
    }
}

impl BricsDashApp {
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, Modifiers};

        let state = &mut self.state;

        if ctx.input_mut(|i| i.consume_key(Modifiers::ALT, Key::T)) {
            state.toggle_narration();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::ALT, Key::Z)) {
            let factor = state.cycle_zoom();
            ctx.set_zoom_factor(factor);
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::ALT, Key::C)) {
            state.toggle_high_contrast();
            panels::apply_visuals(ctx, state.access.high_contrast);
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::ALT, Key::D)) {
            panels::open_translator(ctx, state);
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::F)) {
            state.open_filter_dialog();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::E)) {
            state.export_dialog = true;
        }

        // Bare digits switch charts, but not while a text field has focus
        // (the filter dialog's year inputs take digits).
        if ctx.memory(|m| m.focused().is_none()) {
            const CHART_KEYS: [(Key, ChartKind); 5] = [
                (Key::Num1, ChartKind::Evolution),
                (Key::Num2, ChartKind::Ranking),
                (Key::Num3, ChartKind::Comparison),
                (Key::Num4, ChartKind::Histogram),
                (Key::Num5, ChartKind::Boxplot),
            ];
            for (key, kind) in CHART_KEYS {
                if ctx.input_mut(|i| i.consume_key(Modifiers::NONE, key)) {
                    state.select_chart(kind);
                }
            }
        }
    }

    /// Save a requested frame capture once the host delivers it.
    fn handle_screenshots(&mut self, ctx: &egui::Context) {
        let shot = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        let Some(image) = shot else {
            return;
        };
        let Some(path) = self.state.pending_screenshot.take() else {
            return;
        };

        match export::save_png(&path, &image) {
            Ok(()) => {
                log::info!("exported chart PNG to {}", path.display());
                self.state.access.announce("Chart exported as PNG image");
                self.state.status_message = None;
            }
            Err(e) => {
                log::error!("PNG export failed: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
