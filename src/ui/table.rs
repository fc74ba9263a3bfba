use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::summary::{self, PREVIEW_COLUMNS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bottom panel – preview table
// ---------------------------------------------------------------------------

/// First rows of the filtered view, fixed six columns in fixed order.
pub fn preview_table(ui: &mut Ui, state: &AppState) {
    ui.strong("Data Table");

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let rows = summary::preview_rows(dataset, &state.visible_indices);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder().at_least(220.0)) // name
        .columns(Column::auto().at_least(60.0), PREVIEW_COLUMNS.len() - 1)
        .header(20.0, |mut header| {
            for title in PREVIEW_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in &rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui: &mut Ui| {
                        ui.label(&row.name);
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(row.age.map(|a| a.to_string()).unwrap_or_default());
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(&row.sex);
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(&row.class);
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(row.fare.to_string());
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(if row.survived { "1" } else { "0" });
                    });
                });
            }
        });
}
