use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Record, RowSet};

use super::format;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Position / headcount table
// ---------------------------------------------------------------------------

/// Two-column table of position titles and employee counts.
pub fn headcount_table(ui: &mut Ui, id: &str, records: &[&Record]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder().at_least(200.0))
            .column(Column::auto().at_least(140.0))
            .header(HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("Position Title");
                });
                header.col(|ui| {
                    ui.strong("Number of Employees");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let r = records[row.index()];
                    row.col(|ui| {
                        ui.label(&r.position_title);
                    });
                    row.col(|ui| {
                        ui.label(format::count(r.number_of_employees));
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Full record table (filtered data view)
// ---------------------------------------------------------------------------

/// All five columns of every row in `rows`, scrollable.
pub fn record_table(ui: &mut Ui, rows: &RowSet<'_>) {
    let records: Vec<&Record> = rows.iter().collect();

    ui.push_id("record_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(360.0)
            .column(Column::remainder().at_least(200.0))
            .columns(Column::auto().at_least(90.0), 4)
            .header(HEADER_HEIGHT, |mut header| {
                for name in Record::COLUMN_NAMES {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let r = records[row.index()];
                    row.col(|ui| {
                        ui.label(&r.position_title);
                    });
                    row.col(|ui| {
                        ui.label(&r.position_class_code);
                    });
                    row.col(|ui| {
                        ui.label(&r.grade);
                    });
                    row.col(|ui| {
                        ui.label(format::currency(r.average_salary));
                    });
                    row.col(|ui| {
                        ui.label(format::count(r.number_of_employees));
                    });
                });
            });
    });
}
