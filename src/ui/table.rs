use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Measure, TumorRecord};

/// Compact cell text for a measurement.
pub fn format_cell(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0');
    text.trim_end_matches('.').to_string()
}

/// Scrollable table of tumor records.  `id_salt` keeps several tables apart.
pub fn record_table(ui: &mut Ui, id_salt: &str, rows: &[TumorRecord], max_height: f32) {
    ui.push_id(id_salt, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(max_height)
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(60.0))
            .columns(Column::auto().at_least(80.0), Measure::COUNT)
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("id");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("diagnosis");
                });
                for measure in Measure::ALL {
                    header.col(|ui: &mut Ui| {
                        ui.strong(measure.column());
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let record = &rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(record.id.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(record.diagnosis.code());
                    });
                    for measure in Measure::ALL {
                        row.col(|ui: &mut Ui| {
                            ui.label(format_cell(record.value(measure)));
                        });
                    }
                });
            });
    });
}
