use std::path::Path;

use crate::color::GradeColors;
use crate::config::DEFAULT_GRADES;
use crate::data::export::write_csv;
use crate::data::filter::{apply_table_filter, apply_visuals_filter, FilterCriteria};
use crate::data::loader;
use crate::data::model::{RowSet, SalaryRange, SalaryTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Canonical table (None until a file loads successfully).
    pub dataset: Option<SalaryTable>,

    /// Sorted grade labels offered by the grade filter.
    pub grades: Vec<String>,

    /// Slider limits: the whole-dollar range covering the table.
    pub salary_limits: SalaryRange,

    /// Current user selections.
    pub criteria: FilterCriteria,

    /// Rows of the visuals view (cached).
    pub visuals_indices: Vec<usize>,

    /// Rows of the table view (cached).
    pub table_indices: Vec<usize>,

    pub colors: GradeColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let empty = SalaryRange::new(0.0, 0.0);
        Self {
            dataset: None,
            grades: Vec::new(),
            salary_limits: empty,
            criteria: FilterCriteria::new(empty),
            visuals_indices: Vec::new(),
            table_indices: Vec::new(),
            colors: GradeColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a file, replacing the current dataset. A failed load leaves no
    /// dataset behind so nothing is rendered from stale or partial data.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load(path) {
            Ok(table) => self.set_dataset(table),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                *self = AppState {
                    status_message: Some(format!("Error loading {}: {e}", path.display())),
                    ..AppState::default()
                };
            }
        }
    }

    /// Ingest a newly loaded table, initialise filters and colours.
    pub fn set_dataset(&mut self, table: SalaryTable) {
        self.grades = table.grades();
        self.salary_limits = SalaryRange::covering(&table);
        self.criteria = FilterCriteria::for_table(&table, &DEFAULT_GRADES);
        self.colors = GradeColors::new(&self.grades);
        self.dataset = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute both views after a criteria change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.dataset else {
            return;
        };
        self.visuals_indices = apply_visuals_filter(table, &self.criteria).into_indices();
        self.table_indices = apply_table_filter(table, &self.criteria).into_indices();
        log::debug!(
            "Refiltered: {} visual rows, {} table rows",
            self.visuals_indices.len(),
            self.table_indices.len()
        );
    }

    pub fn visuals_view(&self) -> Option<RowSet<'_>> {
        self.dataset.as_ref().map(|t| t.select(&self.visuals_indices))
    }

    pub fn table_view(&self) -> Option<RowSet<'_>> {
        self.dataset.as_ref().map(|t| t.select(&self.table_indices))
    }

    /// Toggle a grade in the selection. Selecting beyond the limit is
    /// refused and reported in the status line.
    pub fn toggle_grade(&mut self, grade: &str) {
        if self.criteria.is_grade_selected(grade) {
            self.criteria.deselect_grade(grade);
            self.status_message = None;
        } else if let Err(e) = self.criteria.select_grade(grade) {
            log::warn!("Grade selection refused: {e}");
            self.status_message = Some(e.to_string());
            return;
        }
        self.refilter();
    }

    pub fn clear_grades(&mut self) {
        self.criteria.clear_grades();
        self.status_message = None;
        self.refilter();
    }

    /// Set the salary range, clamped to the slider limits and kept ordered.
    pub fn set_salary_range(&mut self, min: f64, max: f64) {
        let lo = min.clamp(self.salary_limits.min, self.salary_limits.max);
        let hi = max.clamp(self.salary_limits.min, self.salary_limits.max);
        self.criteria.salary_range = SalaryRange::new(lo.min(hi), lo.max(hi));
        self.refilter();
    }

    pub fn set_title_search(&mut self, search: &str) {
        if self.criteria.title_search != search {
            self.criteria.title_search = search.to_string();
            self.refilter();
        }
    }

    /// Write the table view to `path`. Failures go to the log and the
    /// status line.
    pub fn export_table_view(&mut self, path: &Path) {
        let Some(rows) = self.table_view() else {
            return;
        };
        match write_csv(path, &rows) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Export to {} failed: {e}", path.display());
                self.status_message = Some(format!("Export failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn loaded_state() -> AppState {
        let mut records = vec![
            record("Clerk", "Grade 10", 30000.0, 4),
            record("Analyst", "Grade 12", 55000.5, 2),
            record("Director", "Grade 40", 150000.0, 1),
        ];
        for g in 20..32 {
            records.push(record(&format!("Role {g}"), &format!("Grade {g}"), 40000.0, 1));
        }
        let mut state = AppState::default();
        state.set_dataset(SalaryTable::from_records(records));
        state
    }

    #[test]
    fn set_dataset_selects_present_defaults() {
        let state = loaded_state();
        let selected: Vec<_> = state.criteria.selected_grades().iter().cloned().collect();
        assert_eq!(selected, vec!["Grade 10", "Grade 12"]);
        assert_eq!(state.salary_limits, SalaryRange::new(30000.0, 150000.0));
        assert_eq!(state.visuals_indices, vec![0, 1]);
        assert_eq!(state.table_indices, vec![0, 1]);
    }

    #[test]
    fn clearing_grades_shows_everything_in_visuals() {
        let mut state = loaded_state();
        state.set_salary_range(30000.0, 35000.0);
        state.clear_grades();

        let total = state.dataset.as_ref().unwrap().len();
        assert_eq!(state.visuals_indices.len(), total);
        assert_eq!(state.table_indices, vec![0]);
    }

    #[test]
    fn eleventh_grade_is_refused() {
        let mut state = loaded_state();
        for g in 20..28 {
            state.toggle_grade(&format!("Grade {g}"));
        }
        assert_eq!(state.criteria.selected_grades().len(), 10);
        assert!(state.status_message.is_none());

        state.toggle_grade("Grade 40");
        assert_eq!(state.criteria.selected_grades().len(), 10);
        assert!(!state.criteria.is_grade_selected("Grade 40"));
        assert!(state.status_message.is_some());

        state.toggle_grade("Grade 10");
        state.toggle_grade("Grade 40");
        assert!(state.criteria.is_grade_selected("Grade 40"));
    }

    #[test]
    fn salary_range_is_clamped_and_ordered() {
        let mut state = loaded_state();
        state.set_salary_range(200000.0, 0.0);
        assert_eq!(state.criteria.salary_range, SalaryRange::new(30000.0, 150000.0));
    }

    #[test]
    fn title_search_narrows_table_view_only() {
        let mut state = loaded_state();
        state.set_title_search("ANAL");
        assert_eq!(state.table_indices, vec![1]);
        assert_eq!(state.visuals_indices, vec![0, 1]);
    }

    #[test]
    fn failed_load_clears_dataset() {
        let mut state = loaded_state();
        state.load_path(Path::new("missing/salaries.csv"));
        assert!(state.dataset.is_none());
        assert!(state.visuals_view().is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("not found")));
    }

    #[test]
    fn failed_export_is_reported_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("filtered_data.csv");
        let mut state = loaded_state();

        state.export_table_view(&path);
        assert!(!path.exists());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Export failed")));
    }

    #[test]
    fn export_writes_table_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_data.csv");
        let mut state = loaded_state();
        state.set_title_search("clerk");

        state.export_table_view(&path);
        assert!(state.status_message.is_none());
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Clerk,Clerk-code,Grade 10,30000.0,4"));
    }
}
