use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::loader::LoadError;
use crate::data::model::{Diagnosis, FieldBounds, Measure};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Copy what we need so we can mutate state inside the loop.
    let categories: Vec<Diagnosis> = dataset.categories().iter().copied().collect();
    let bounds: Vec<(Measure, FieldBounds)> = Measure::ALL
        .iter()
        .filter_map(|&m| dataset.bounds(m).map(|b| (m, b)))
        .collect();

    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Diagnosis multiselect ----
            let n_selected = state.selection.diagnoses.len();
            ui.strong(format!(
                "Tumor type  ({n_selected}/{})",
                categories.len()
            ));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });
            for &diagnosis in &categories {
                let mut checked = state.selection.diagnoses.contains(&diagnosis);
                let text = RichText::new(format!("{} ({})", diagnosis.label(), diagnosis.code()))
                    .color(state.color_map.color_for(diagnosis));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_diagnosis(diagnosis);
                }
            }
            ui.separator();

            // ---- Range sliders, one pair per measure ----
            for &(measure, b) in &bounds {
                let (mut lower, mut upper) = state
                    .selection
                    .ranges
                    .get(&measure)
                    .copied()
                    .unwrap_or((b.min, b.max));

                ui.strong(measure.label());
                let lower_changed = ui
                    .add(Slider::new(&mut lower, b.min..=b.max).text("min").max_decimals(4))
                    .changed();
                let upper_changed = ui
                    .add(Slider::new(&mut upper, b.min..=b.max).text("max").max_decimals(4))
                    .changed();

                if lower_changed || upper_changed {
                    // Dragging one handle past the other pushes it along.
                    if lower > upper {
                        if lower_changed {
                            upper = lower;
                        } else {
                            lower = upper;
                        }
                    }
                    state.set_range(measure, lower, upper);
                }
                ui.add_space(4.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Breast Cancer Dataset");
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} tumors loaded, {} visible",
                ds.len(),
                state.filtered.len()
            ));
        }

        match &state.load_error {
            Some(LoadError::SourceNotFound { path }) => {
                ui.label(
                    RichText::new(format!("Missing {}", path.display())).color(Color32::RED),
                );
            }
            Some(_) => {
                ui.label(RichText::new("Failed to load data").color(Color32::RED));
            }
            None => {}
        }

        for (label, color) in state.color_map.legend_entries() {
            ui.separator();
            ui.label(RichText::new(label).color(color));
        }
    });
}
