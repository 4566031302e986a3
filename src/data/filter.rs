use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{RowSet, SalaryRange, SalaryTable};
use crate::config::MAX_SELECTED_GRADES;

// ---------------------------------------------------------------------------
// Filter criteria supplied by the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("at most {max} grades can be selected, got {selected}")]
    TooManyGrades { selected: usize, max: usize },
}

/// User selections for one evaluation of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    selected_grades: BTreeSet<String>,
    pub salary_range: SalaryRange,
    /// Case-insensitive substring on the position title; empty means no constraint.
    pub title_search: String,
}

impl FilterCriteria {
    /// No grades selected, the given salary range, no title search.
    pub fn new(salary_range: SalaryRange) -> Self {
        FilterCriteria {
            selected_grades: BTreeSet::new(),
            salary_range,
            title_search: String::new(),
        }
    }

    /// Criteria for a freshly loaded table: the full salary range and the
    /// default grades that actually occur in the table.
    pub fn for_table(table: &SalaryTable, default_grades: &[&str]) -> Self {
        let present = table.grades();
        let mut criteria = FilterCriteria::new(SalaryRange::covering(table));
        criteria.selected_grades = default_grades
            .iter()
            .filter(|g| present.iter().any(|p| p.as_str() == **g))
            .take(MAX_SELECTED_GRADES)
            .map(|g| g.to_string())
            .collect();
        criteria
    }

    pub fn with_grades<I, S>(mut self, grades: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let grades: BTreeSet<String> = grades.into_iter().map(Into::into).collect();
        if grades.len() > MAX_SELECTED_GRADES {
            return Err(CriteriaError::TooManyGrades {
                selected: grades.len(),
                max: MAX_SELECTED_GRADES,
            });
        }
        self.selected_grades = grades;
        Ok(self)
    }

    pub fn with_title_search(mut self, search: impl Into<String>) -> Self {
        self.title_search = search.into();
        self
    }

    pub fn selected_grades(&self) -> &BTreeSet<String> {
        &self.selected_grades
    }

    pub fn is_grade_selected(&self, grade: &str) -> bool {
        self.selected_grades.contains(grade)
    }

    /// Add a grade to the selection, refusing once the limit is reached.
    pub fn select_grade(&mut self, grade: &str) -> Result<(), CriteriaError> {
        if self.selected_grades.contains(grade) {
            return Ok(());
        }
        if self.selected_grades.len() >= MAX_SELECTED_GRADES {
            return Err(CriteriaError::TooManyGrades {
                selected: self.selected_grades.len() + 1,
                max: MAX_SELECTED_GRADES,
            });
        }
        self.selected_grades.insert(grade.to_string());
        Ok(())
    }

    pub fn deselect_grade(&mut self, grade: &str) {
        self.selected_grades.remove(grade);
    }

    pub fn clear_grades(&mut self) {
        self.selected_grades.clear();
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Rows feeding the charts and filtered KPIs.
///
/// With no grade selected the whole table is returned and the salary range
/// is *not* applied. With at least one grade selected, rows must match a
/// selected grade and lie inside the salary range.
pub fn apply_visuals_filter<'a>(table: &'a SalaryTable, criteria: &FilterCriteria) -> RowSet<'a> {
    let rows = table.all();
    if criteria.selected_grades.is_empty() {
        return rows;
    }
    rows.retain(|r| {
        criteria.selected_grades.contains(&r.grade) && criteria.salary_range.contains(r.average_salary)
    })
}

/// Rows for the downloadable table.
///
/// Stages, in order: title search (if non-empty), grade membership (if any
/// grade is selected), salary range (always).
pub fn apply_table_filter<'a>(table: &'a SalaryTable, criteria: &FilterCriteria) -> RowSet<'a> {
    let mut rows = table.all();

    if !criteria.title_search.is_empty() {
        let needle = criteria.title_search.to_lowercase();
        rows = rows.retain(|r| r.position_title.to_lowercase().contains(&needle));
    }

    if !criteria.selected_grades.is_empty() {
        rows = rows.retain(|r| criteria.selected_grades.contains(&r.grade));
    }

    rows.retain(|r| criteria.salary_range.contains(r.average_salary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, two_row_table};

    fn titles(rows: &RowSet<'_>) -> Vec<String> {
        rows.iter().map(|r| r.position_title.clone()).collect()
    }

    #[test]
    fn table_filter_applies_grade_and_range() {
        let table = two_row_table();
        let criteria = FilterCriteria::new(SalaryRange::new(55000.0, 65000.0))
            .with_grades(["Grade 11"])
            .unwrap();

        let rows = apply_table_filter(&table, &criteria);
        assert_eq!(rows.indices(), &[1]);
        assert_eq!(titles(&rows), vec!["B"]);
    }

    #[test]
    fn visuals_filter_ignores_range_without_grades() {
        let table = two_row_table();
        let criteria = FilterCriteria::new(SalaryRange::new(0.0, 1000.0));

        let visuals = apply_visuals_filter(&table, &criteria);
        assert_eq!(visuals.indices(), &[0, 1]);

        // The table view always honours the range.
        let table_view = apply_table_filter(&table, &criteria);
        assert!(table_view.is_empty());
    }

    #[test]
    fn visuals_filter_applies_range_with_grades() {
        let table = two_row_table();
        let criteria = FilterCriteria::new(SalaryRange::new(0.0, 55000.0))
            .with_grades(["Grade 10", "Grade 11"])
            .unwrap();

        let visuals = apply_visuals_filter(&table, &criteria);
        assert_eq!(titles(&visuals), vec!["A"]);
    }

    #[test]
    fn salary_range_is_inclusive_on_both_ends() {
        let table = two_row_table();
        let criteria = FilterCriteria::new(SalaryRange::new(50000.0, 60000.0));
        assert_eq!(apply_table_filter(&table, &criteria).len(), 2);
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let table = SalaryTable::from_records(vec![
            record("Senior Accountant", "Grade 20", 80000.0, 2),
            record("Bus Operator", "Grade 13", 45000.0, 90),
            record("ACCOUNTING CLERK", "Grade 12", 40000.0, 5),
        ]);
        let criteria = FilterCriteria::new(SalaryRange::covering(&table)).with_title_search("accOUNT");

        let rows = apply_table_filter(&table, &criteria);
        assert_eq!(titles(&rows), vec!["Senior Accountant", "ACCOUNTING CLERK"]);
    }

    #[test]
    fn table_filter_is_idempotent_subset() {
        let table = SalaryTable::from_records(vec![
            record("Clerk", "Grade 10", 30000.0, 4),
            record("Engineer", "Grade 20", 90000.0, 7),
            record("Clerk II", "Grade 11", 35000.0, 2),
            record("Analyst", "Grade 15", 60000.0, 3),
        ]);
        let criteria = FilterCriteria::new(SalaryRange::new(30000.0, 70000.0))
            .with_grades(["Grade 10", "Grade 15", "Grade 20"])
            .unwrap()
            .with_title_search("l");

        let first = apply_table_filter(&table, &criteria);
        let second = apply_table_filter(&table, &criteria);
        assert_eq!(first.indices(), second.indices());
        assert!(first.indices().iter().all(|&i| i < table.len()));
        assert!(first.indices().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(titles(&first), vec!["Clerk", "Analyst"]);
    }

    #[test]
    fn grade_selection_is_capped() {
        let grades: Vec<String> = (1..=11).map(|g| format!("Grade {g}")).collect();
        let err = FilterCriteria::new(SalaryRange::new(0.0, 1.0))
            .with_grades(grades.clone())
            .unwrap_err();
        assert_eq!(err, CriteriaError::TooManyGrades { selected: 11, max: 10 });

        let mut criteria = FilterCriteria::new(SalaryRange::new(0.0, 1.0))
            .with_grades(grades[..10].to_vec())
            .unwrap();
        assert!(criteria.select_grade(&grades[10]).is_err());
        // Re-selecting an already selected grade is not an error.
        assert!(criteria.select_grade(&grades[0]).is_ok());
        criteria.deselect_grade(&grades[0]);
        assert!(criteria.select_grade(&grades[10]).is_ok());
        assert_eq!(criteria.selected_grades().len(), 10);
    }

    #[test]
    fn defaults_keep_only_present_grades() {
        let table = SalaryTable::from_records(vec![
            record("A", "Grade 11", 10.0, 1),
            record("B", "Grade 14", 20.0, 1),
            record("C", "Grade 30", 30.0, 1),
        ]);
        let criteria = FilterCriteria::for_table(&table, &["Grade 10", "Grade 11", "Grade 14"]);
        let selected: Vec<_> = criteria.selected_grades().iter().cloned().collect();
        assert_eq!(selected, vec!["Grade 11", "Grade 14"]);
        assert_eq!(criteria.salary_range, SalaryRange::new(10.0, 30.0));
        assert!(criteria.title_search.is_empty());
    }
}
