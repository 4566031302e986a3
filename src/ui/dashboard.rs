use eframe::egui::{RichText, ScrollArea, Ui};

use crate::config::{FILLED_POSITIONS, RANKED_GRADES, TOP_POSITIONS, WINDOW_TITLE};
use crate::data::aggregate::{compute_filtered_kpis, compute_global_kpis, top_n_by_headcount};
use crate::state::AppState;

use super::{panels, plot, tables};

/// Render the central panel: KPIs, charts, rankings and the filtered table.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let mut export_requested = false;

    {
        let (Some(table), Some(visuals), Some(table_view)) =
            (state.dataset.as_ref(), state.visuals_view(), state.table_view())
        else {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a salary file to begin  (File → Open…)");
            });
            return;
        };
        let grades_selected = !state.criteria.selected_grades().is_empty();
        let full = table.all();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                ui.heading(RichText::new(WINDOW_TITLE).size(28.0));
                ui.add_space(8.0);

                ui.heading("Overall KPIs");
                plot::kpi_row(
                    ui,
                    ["Total Positions", "Total Employees", "Mean Average Salary"],
                    &compute_global_kpis(table),
                );
                ui.heading("Filtered KPIs");
                plot::kpi_row(
                    ui,
                    ["Filtered Positions", "Filtered Employees", "Filtered Mean Salary"],
                    &compute_filtered_kpis(&visuals),
                );
                ui.separator();

                ui.heading(format!("Top {TOP_POSITIONS} Positions by Average Salary (Filtered)"));
                plot::top_positions_chart(ui, &visuals);
                ui.separator();

                ui.heading("Average Salary Distribution by Job Grade");
                match plot::grade_chart_placeholder(grades_selected, &visuals) {
                    Some(msg) => plot::info(ui, msg),
                    None => plot::salary_box_plot(ui, &visuals, &state.colors),
                }
                ui.separator();

                ui.heading("Employee Distribution by Job Grade");
                match plot::grade_chart_placeholder(grades_selected, &visuals) {
                    Some(msg) => plot::info(ui, msg),
                    None => plot::employee_distribution(ui, &visuals, &state.colors),
                }
                ui.separator();

                ui.heading("Distribution of Average Salary (Full Dataset)");
                plot::salary_histogram_chart(ui, &full);
                ui.separator();

                ui.heading(format!("Most Filled Positions (Top {FILLED_POSITIONS})"));
                tables::headcount_table(
                    ui,
                    "most_filled",
                    &top_n_by_headcount(&full, FILLED_POSITIONS, true),
                );
                ui.separator();

                ui.heading(format!("Least Filled Positions (Bottom {FILLED_POSITIONS})"));
                tables::headcount_table(
                    ui,
                    "least_filled",
                    &top_n_by_headcount(&full, FILLED_POSITIONS, false),
                );
                ui.separator();

                ui.heading(format!("Top {RANKED_GRADES} Paid Job Grades"));
                plot::grade_ranking_chart(ui, &full, true);
                ui.separator();

                ui.heading(format!("Bottom {RANKED_GRADES} Paid Job Grades"));
                plot::grade_ranking_chart(ui, &full, false);
                ui.separator();

                ui.heading("Filtered Data Table");
                if table_view.is_empty() {
                    plot::info(ui, "No data available for the selected filters.");
                } else {
                    tables::record_table(ui, &table_view);
                    if ui.button("Download filtered data as CSV").clicked() {
                        export_requested = true;
                    }
                }
            });
    }

    if export_requested {
        panels::export_file_dialog(state);
    }
}
