use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartKind;
use crate::data::model::Field;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – feature selectors and filters
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select Features");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            feature_selectors(ui, state);
            ui.separator();

            ui.heading("Filters");
            age_sliders(ui, state);
            ui.add_space(4.0);
            class_checklist(ui, state);
        });
}

fn feature_selectors(ui: &mut Ui, state: &mut AppState) {
    ui.strong("X axis");
    field_combo(ui, "x_feature", &mut state.controls.x_field);

    ui.strong("Y axis");
    field_combo(ui, "y_feature", &mut state.controls.y_field);

    ui.strong("Color by");
    let current = state.controls.group_field;
    let current_text = current.map_or("none", Field::key);
    egui::ComboBox::from_id_salt("color_feature")
        .selected_text(current_text)
        .show_ui(ui, |ui: &mut Ui| {
            for field in Field::ALL {
                if ui
                    .selectable_label(current == Some(field), field.key())
                    .clicked()
                {
                    state.set_group_field(Some(field));
                }
            }
            if ui.selectable_label(current.is_none(), "none").clicked() {
                state.set_group_field(None);
            }
        });

    ui.strong("Chart type");
    let kind = &mut state.controls.chart_kind;
    egui::ComboBox::from_id_salt("chart_type")
        .selected_text(kind.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in ChartKind::ALL {
                ui.selectable_value(kind, option, option.label());
            }
        });
}

fn field_combo(ui: &mut Ui, id: &str, selected: &mut Field) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.key())
        .show_ui(ui, |ui: &mut Ui| {
            for field in Field::ALL {
                ui.selectable_value(selected, field, field.key());
            }
        });
}

fn age_sliders(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Age");
    let lo_changed = ui
        .add(egui::Slider::new(&mut state.controls.filters.age_range[0], 0..=80).text("Min"))
        .changed();
    if lo_changed {
        state.age_lo_changed();
    }
    let hi_changed = ui
        .add(egui::Slider::new(&mut state.controls.filters.age_range[1], 0..=80).text("Max"))
        .changed();
    if hi_changed {
        state.age_hi_changed();
    }
    ui.label(state.controls.age_range_label());
}

fn class_checklist(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let labels = ds.class_labels.clone();
    let n_selected = state.controls.filters.classes.len();

    ui.strong(format!("Class  ({n_selected}/{})", labels.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_classes();
        }
        if ui.small_button("None").clicked() {
            state.select_no_classes();
        }
    });

    for label in &labels {
        let mut checked = state.controls.filters.classes.contains(label);
        if ui.checkbox(&mut checked, label).changed() {
            state.toggle_class(label);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(RichText::new("Titanic Dataset Explorer").strong());

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} passengers loaded, {} match filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open passenger data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} passengers with classes {:?}",
                    dataset.len(),
                    dataset.class_labels
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
