use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one row of the canonical table
// ---------------------------------------------------------------------------

/// A single job classification row after normalisation.
///
/// Field order matches the fixed five-column schema; the serde names are the
/// header labels written on export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "Position Title")]
    pub position_title: String,
    #[serde(rename = "Position Class Code")]
    pub position_class_code: String,
    /// Always of the form `"Grade <raw code>"`.
    #[serde(rename = "Grade")]
    pub grade: String,
    #[serde(rename = "Average Salary")]
    pub average_salary: f64,
    #[serde(rename = "Number of Employees")]
    pub number_of_employees: u64,
}

impl Record {
    /// Canonical column names, in source order.
    pub const COLUMN_NAMES: [&'static str; 5] = [
        "Position Title",
        "Position Class Code",
        "Grade",
        "Average Salary",
        "Number of Employees",
    ];
}

// ---------------------------------------------------------------------------
// SalaryTable – the canonical, immutable dataset
// ---------------------------------------------------------------------------

/// The full normalised dataset. Built once by the loader and never mutated;
/// every view over it is a [`RowSet`].
#[derive(Debug, Clone, Default)]
pub struct SalaryTable {
    records: Vec<Record>,
}

impl SalaryTable {
    pub fn from_records(records: Vec<Record>) -> Self {
        SalaryTable { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A view containing every row, in source order.
    pub fn all(&self) -> RowSet<'_> {
        RowSet {
            table: self,
            indices: (0..self.records.len()).collect(),
        }
    }

    /// Rebuild a view from cached row indices. Out-of-range indices are ignored.
    pub fn select(&self, indices: &[usize]) -> RowSet<'_> {
        RowSet {
            table: self,
            indices: indices
                .iter()
                .copied()
                .filter(|&i| i < self.records.len())
                .collect(),
        }
    }

    /// Sorted distinct grade labels.
    pub fn grades(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.grade.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Smallest and largest salary, `None` when there are no rows.
    pub fn salary_bounds(&self) -> Option<(f64, f64)> {
        let mut salaries = self.records.iter().map(|r| r.average_salary);
        let first = salaries.next()?;
        Some(salaries.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s))))
    }
}

// ---------------------------------------------------------------------------
// RowSet – a subset of the table by row identity
// ---------------------------------------------------------------------------

/// An ordered subset of a [`SalaryTable`]. Rows are referenced by their index
/// in the table, so two views can be compared by row identity.
#[derive(Debug, Clone)]
pub struct RowSet<'a> {
    table: &'a SalaryTable,
    indices: Vec<usize>,
}

impl<'a> RowSet<'a> {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Records in view order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Keep only the rows matching `keep`, preserving order.
    pub fn retain<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let records = self.table.records();
        self.indices.retain(|&i| keep(&records[i]));
        self
    }
}

// ---------------------------------------------------------------------------
// SalaryRange – inclusive salary bounds
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` salary bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    pub fn new(min: f64, max: f64) -> Self {
        SalaryRange { min, max }
    }

    /// Whole-dollar range covering every salary in the table.
    /// An empty table gets `[0, 0]`.
    pub fn covering(table: &SalaryTable) -> Self {
        match table.salary_bounds() {
            Some((lo, hi)) => SalaryRange::new(lo.floor(), hi.ceil()),
            None => SalaryRange::new(0.0, 0.0),
        }
    }

    pub fn contains(&self, salary: f64) -> bool {
        salary >= self.min && salary <= self.max
    }
}

// ---------------------------------------------------------------------------
// Kpis – headline figures for a view
// ---------------------------------------------------------------------------

/// Headline figures for a set of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    /// Distinct `position_title` values.
    pub distinct_position_count: usize,
    pub total_employees: u64,
    /// Mean of `average_salary`; `None` when the rows are empty.
    pub mean_salary: Option<f64>,
}
