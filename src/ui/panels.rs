use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{EXPORT_FILE_NAME, MAX_SELECTED_GRADES};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Salary range ----
    ui.strong("Select Salary Range:");
    let limits = state.salary_limits;
    let mut lo = state.criteria.salary_range.min;
    let mut hi = state.criteria.salary_range.max;
    let lo_changed = ui
        .add(
            egui::Slider::new(&mut lo, limits.min..=limits.max)
                .step_by(1.0)
                .prefix("$")
                .text("min"),
        )
        .changed();
    let hi_changed = ui
        .add(
            egui::Slider::new(&mut hi, limits.min..=limits.max)
                .step_by(1.0)
                .prefix("$")
                .text("max"),
        )
        .changed();
    if lo_changed || hi_changed {
        state.set_salary_range(lo, hi);
    }
    ui.separator();

    // ---- Title search (table view only) ----
    ui.strong("Search for Position Title:");
    let mut search = state.criteria.title_search.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut search).hint_text("e.g. engineer"))
        .changed()
    {
        state.set_title_search(&search);
    }
    ui.separator();

    // ---- Grades ----
    let n_selected = state.criteria.selected_grades().len();
    ui.strong(format!(
        "Select up to {MAX_SELECTED_GRADES} Job Grades  ({n_selected}/{MAX_SELECTED_GRADES})"
    ));
    if ui.small_button("Clear").clicked() {
        state.clear_grades();
    }

    let grades = state.grades.clone();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for grade in &grades {
                let mut checked = state.criteria.is_grade_selected(grade);
                let text = RichText::new(grade).color(state.colors.color_for(grade));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_grade(grade);
                }
            }
        });
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

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} in visuals, {} in table",
                ds.len(),
                state.visuals_indices.len(),
                state.table_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

/// Ask where to save the table view, then write it.
pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data as CSV")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_table_view(&path);
    }
}
