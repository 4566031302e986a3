use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot};

use crate::color::GradeColors;
use crate::config::{HISTOGRAM_BINS, RANKED_GRADES, TOP_POSITIONS};
use crate::data::aggregate::{
    grade_employee_shares, grade_employee_totals, grade_salary_ranking, grade_salary_spread,
    salary_histogram, top_n_by_salary,
};
use crate::data::model::{Kpis, RowSet};

use super::format;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(66, 133, 244);
const TOP_GRADE_COLOR: Color32 = Color32::from_rgb(52, 168, 83);
const BOTTOM_GRADE_COLOR: Color32 = Color32::from_rgb(219, 68, 55);

pub const SELECT_GRADES_HINT: &str = "Kindly select grades in the left pane to view visuals.";
pub const NO_VISUAL_DATA: &str = "No data available for the selected grades and salary range.";

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

/// Three KPI cards side by side.
pub fn kpi_row(ui: &mut Ui, labels: [&str; 3], kpis: &Kpis) {
    let values = [
        format::count(kpis.distinct_position_count as u64),
        format::count(kpis.total_employees),
        format::mean(kpis.mean_salary),
    ];
    ui.columns(3, |cols: &mut [Ui]| {
        for ((col, label), value) in cols.iter_mut().zip(labels).zip(values) {
            col.label(RichText::new(label).weak());
            col.label(RichText::new(value).size(24.0).strong());
        }
    });
}

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

/// Message to show instead of a grade-dependent chart, if any.
pub fn grade_chart_placeholder(grades_selected: bool, visuals: &RowSet<'_>) -> Option<&'static str> {
    if !grades_selected {
        Some(SELECT_GRADES_HINT)
    } else if visuals.is_empty() {
        Some(NO_VISUAL_DATA)
    } else {
        None
    }
}

pub fn info(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(format!("ℹ {message}")).color(Color32::from_rgb(70, 130, 180)));
}

// ---------------------------------------------------------------------------
// Horizontal bar charts with named categories
// ---------------------------------------------------------------------------

/// One bar per entry, first entry drawn on top. Category names become the
/// y-axis tick labels.
fn ranked_bars(ui: &mut Ui, id: &str, x_label: &str, entries: Vec<(String, f64, Color32)>) {
    let n = entries.len();
    let names: Vec<String> = entries.iter().map(|(name, _, _)| name.clone()).collect();

    let bars: Vec<Bar> = entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, value, color))| {
            Bar::new((n - 1 - i) as f64, value)
                .name(format!("{name}: {}", format::currency(value)))
                .fill(color)
                .width(0.7)
        })
        .collect();

    let height = (n as f32 * 22.0).clamp(120.0, CHART_HEIGHT * 2.0);
    Plot::new(id)
        .height(height)
        .x_axis_label(x_label)
        .y_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 || v >= n as f64 {
                return String::new();
            }
            names
                .get(n - 1 - v as usize)
                .cloned()
                .unwrap_or_default()
        })
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Top positions by average salary over the visuals view.
pub fn top_positions_chart(ui: &mut Ui, visuals: &RowSet<'_>) {
    if visuals.is_empty() {
        info(ui, NO_VISUAL_DATA);
        return;
    }
    let entries = top_n_by_salary(visuals, TOP_POSITIONS, true)
        .into_iter()
        .map(|r| (r.position_title.clone(), r.average_salary, BAR_COLOR))
        .collect();
    ranked_bars(ui, "top_positions", "Average Salary", entries);
}

/// Highest or lowest paid grades by mean salary.
pub fn grade_ranking_chart(ui: &mut Ui, rows: &RowSet<'_>, descending: bool) {
    let (id, color) = if descending {
        ("top_grades", TOP_GRADE_COLOR)
    } else {
        ("bottom_grades", BOTTOM_GRADE_COLOR)
    };
    let entries = grade_salary_ranking(rows, RANKED_GRADES, descending)
        .into_iter()
        .map(|g| (g.grade, g.mean_salary, color))
        .collect();
    ranked_bars(ui, id, "Mean Average Salary", entries);
}

// ---------------------------------------------------------------------------
// Per-grade distribution charts
// ---------------------------------------------------------------------------

/// Salary box plot per grade over the visuals view.
pub fn salary_box_plot(ui: &mut Ui, visuals: &RowSet<'_>, colors: &GradeColors) {
    let spreads = grade_salary_spread(visuals);
    let names: Vec<String> = spreads.keys().cloned().collect();

    let boxes: Vec<BoxElem> = spreads
        .iter()
        .enumerate()
        .map(|(i, (grade, s))| {
            let color = colors.color_for(grade);
            BoxElem::new(i as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                .name(format!("{grade} ({} positions)", s.count))
                .fill(color.linear_multiply(0.4))
                .stroke(Stroke::new(1.5, color))
                .box_width(0.6)
        })
        .collect();

    Plot::new("salary_box_plot")
        .height(CHART_HEIGHT)
        .y_axis_label("Average Salary")
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 {
                return String::new();
            }
            names.get(v as usize).cloned().unwrap_or_default()
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

/// Share of employees per grade over the visuals view.
pub fn employee_distribution(ui: &mut Ui, visuals: &RowSet<'_>, colors: &GradeColors) {
    let totals = grade_employee_totals(visuals);
    let shares = grade_employee_shares(visuals);
    if shares.is_empty() {
        info(ui, NO_VISUAL_DATA);
        return;
    }

    let bars: Vec<Bar> = shares
        .iter()
        .enumerate()
        .map(|(i, (grade, share))| {
            let employees = totals.get(grade).copied().unwrap_or(0);
            Bar::new(i as f64, share * 100.0)
                .name(format!(
                    "{grade}: {:.1}% ({} employees)",
                    share * 100.0,
                    format::count(employees)
                ))
                .fill(colors.color_for(grade))
                .width(0.8)
        })
        .collect();

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (grade, share) in &shares {
            ui.label(
                RichText::new(format!("■ {grade} {:.1}%", share * 100.0))
                    .color(colors.color_for(grade)),
            );
        }
    });

    Plot::new("employee_distribution")
        .height(CHART_HEIGHT * 0.75)
        .y_axis_label("% of employees")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Salary histogram over the full table.
pub fn salary_histogram_chart(ui: &mut Ui, rows: &RowSet<'_>) {
    let bars: Vec<Bar> = salary_histogram(rows, HISTOGRAM_BINS)
        .into_iter()
        .map(|bin| {
            let width = (bin.upper - bin.lower).max(1.0);
            Bar::new((bin.lower + bin.upper) / 2.0, bin.count as f64)
                .width(width)
                .name(format!(
                    "{} – {}: {} positions",
                    format::currency(bin.lower),
                    format::currency(bin.upper),
                    bin.count
                ))
                .fill(Color32::from_rgb(135, 206, 235))
        })
        .collect();

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Average Salary")
        .y_axis_label("Positions")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
