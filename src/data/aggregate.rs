use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::model::{Kpis, Record, RowSet, SalaryTable};

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// Headline figures over the whole, unfiltered table.
pub fn compute_global_kpis(table: &SalaryTable) -> Kpis {
    compute_filtered_kpis(&table.all())
}

/// Headline figures over an arbitrary subset. The mean is `None` for an
/// empty subset rather than NaN or zero.
pub fn compute_filtered_kpis(rows: &RowSet<'_>) -> Kpis {
    let mut titles = BTreeSet::new();
    let mut total_employees = 0u64;
    let mut salary_sum = 0.0;

    for r in rows.iter() {
        titles.insert(r.position_title.as_str());
        total_employees += r.number_of_employees;
        salary_sum += r.average_salary;
    }

    Kpis {
        distinct_position_count: titles.len(),
        total_employees,
        mean_salary: (!rows.is_empty()).then(|| salary_sum / rows.len() as f64),
    }
}

// ---------------------------------------------------------------------------
// Row rankings
// ---------------------------------------------------------------------------

/// Stable sort by `cmp` (reversed when `descending`) and keep the first `n`.
/// Ties keep their view order.
fn ranked<'a, F>(rows: &RowSet<'a>, n: usize, descending: bool, cmp: F) -> Vec<&'a Record>
where
    F: Fn(&Record, &Record) -> Ordering,
{
    let mut sorted: Vec<&'a Record> = rows.iter().collect();
    if descending {
        sorted.sort_by(|a, b| cmp(b, a));
    } else {
        sorted.sort_by(|a, b| cmp(a, b));
    }
    sorted.truncate(n);
    sorted
}

/// The `n` best (or worst) paid positions.
pub fn top_n_by_salary<'a>(rows: &RowSet<'a>, n: usize, descending: bool) -> Vec<&'a Record> {
    ranked(rows, n, descending, |a, b| {
        a.average_salary.total_cmp(&b.average_salary)
    })
}

/// The `n` most (or least) filled positions.
pub fn top_n_by_headcount<'a>(rows: &RowSet<'a>, n: usize, descending: bool) -> Vec<&'a Record> {
    ranked(rows, n, descending, |a, b| {
        a.number_of_employees.cmp(&b.number_of_employees)
    })
}

// ---------------------------------------------------------------------------
// Per-grade aggregates
// ---------------------------------------------------------------------------

/// Mean salary of one grade.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeMean {
    pub grade: String,
    pub mean_salary: f64,
}

fn salaries_by_grade<'a>(rows: &RowSet<'a>) -> BTreeMap<&'a str, Vec<f64>> {
    let mut groups: BTreeMap<&'a str, Vec<f64>> = BTreeMap::new();
    for r in rows.iter() {
        groups
            .entry(r.grade.as_str())
            .or_default()
            .push(r.average_salary);
    }
    groups
}

/// Group by grade, average the salaries, and return the first `n` groups
/// ordered by that mean. Groups start in grade-label order, so equal means
/// stay alphabetical.
pub fn grade_salary_ranking(rows: &RowSet<'_>, n: usize, descending: bool) -> Vec<GradeMean> {
    let mut means: Vec<GradeMean> = salaries_by_grade(rows)
        .into_iter()
        .map(|(grade, salaries)| GradeMean {
            grade: grade.to_string(),
            mean_salary: salaries.iter().sum::<f64>() / salaries.len() as f64,
        })
        .collect();

    if descending {
        means.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    } else {
        means.sort_by(|a, b| a.mean_salary.total_cmp(&b.mean_salary));
    }
    means.truncate(n);
    means
}

/// Total employees per grade. Empty rows give an empty map.
pub fn grade_employee_totals(rows: &RowSet<'_>) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for r in rows.iter() {
        *totals.entry(r.grade.clone()).or_insert(0) += r.number_of_employees;
    }
    totals
}

/// Each grade's fraction of all employees in `rows`, in grade order.
/// Empty when there are no employees to share out.
pub fn grade_employee_shares(rows: &RowSet<'_>) -> Vec<(String, f64)> {
    let totals = grade_employee_totals(rows);
    let all: u64 = totals.values().sum();
    if all == 0 {
        return Vec::new();
    }
    totals
        .into_iter()
        .map(|(grade, count)| (grade, count as f64 / all as f64))
        .collect()
}

/// Five-number summary of salaries within a grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalarySpread {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl SalarySpread {
    /// `None` for an empty slice.
    fn from_salaries(mut salaries: Vec<f64>) -> Option<Self> {
        if salaries.is_empty() {
            return None;
        }
        salaries.sort_by(f64::total_cmp);
        Some(SalarySpread {
            min: salaries[0],
            q1: quantile(&salaries, 0.25),
            median: quantile(&salaries, 0.5),
            q3: quantile(&salaries, 0.75),
            max: salaries[salaries.len() - 1],
            count: salaries.len(),
        })
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Salary distribution per grade, for the box plot.
pub fn grade_salary_spread(rows: &RowSet<'_>) -> BTreeMap<String, SalarySpread> {
    salaries_by_grade(rows)
        .into_iter()
        .filter_map(|(grade, salaries)| {
            SalarySpread::from_salaries(salaries).map(|s| (grade.to_string(), s))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width salary histogram over the range of `rows`.
///
/// The last bin is closed on the right. If every salary is the same a single
/// bin holds all rows.
pub fn salary_histogram(rows: &RowSet<'_>, bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || rows.is_empty() {
        return Vec::new();
    }

    let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.average_salary), hi.max(r.average_salary))
    });

    if hi <= lo {
        return vec![HistogramBin {
            lower: lo,
            upper: hi,
            count: rows.len(),
        }];
    }

    let width = (hi - lo) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for r in rows.iter() {
        let idx = (((r.average_salary - lo) / width).floor() as usize).min(bins - 1);
        histogram[idx].count += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_table_filter, FilterCriteria};
    use crate::data::model::tests::{record, two_row_table};
    use crate::data::model::SalaryRange;

    fn sample_table() -> SalaryTable {
        SalaryTable::from_records(vec![
            record("Clerk", "Grade 10", 30000.0, 40),
            record("Engineer", "Grade 20", 90000.0, 7),
            record("Clerk", "Grade 11", 35000.0, 12),
            record("Analyst", "Grade 15", 60000.0, 3),
            record("Manager", "Grade 20", 90000.0, 2),
            record("Driver", "Grade 10", 34000.0, 12),
        ])
    }

    fn titles(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.position_title.clone()).collect()
    }

    #[test]
    fn filtered_example_kpis() {
        let table = two_row_table();
        let criteria = FilterCriteria::new(SalaryRange::new(55000.0, 65000.0))
            .with_grades(["Grade 11"])
            .unwrap();

        let kpis = compute_filtered_kpis(&apply_table_filter(&table, &criteria));
        assert_eq!(
            kpis,
            Kpis {
                distinct_position_count: 1,
                total_employees: 1,
                mean_salary: Some(60000.0),
            }
        );
    }

    #[test]
    fn global_kpis_match_filtered_kpis_over_full_table() {
        let table = sample_table();
        let global = compute_global_kpis(&table);
        assert_eq!(global, compute_filtered_kpis(&table.all()));
        assert_eq!(global.distinct_position_count, 5);
        assert_eq!(global.total_employees, 76);
        assert_eq!(global.mean_salary, Some(339000.0 / 6.0));
    }

    #[test]
    fn empty_subset_has_no_mean() {
        let table = sample_table();
        let kpis = compute_filtered_kpis(&table.select(&[]));
        assert_eq!(kpis.distinct_position_count, 0);
        assert_eq!(kpis.total_employees, 0);
        assert_eq!(kpis.mean_salary, None);
    }

    #[test]
    fn top_salary_is_non_increasing_and_stable() {
        let table = sample_table();
        let top = top_n_by_salary(&table.all(), 3, true);
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|w| w[0].average_salary >= w[1].average_salary));
        // Equal salaries keep source order.
        assert_eq!(titles(&top), vec!["Engineer", "Manager", "Analyst"]);
    }

    #[test]
    fn ranking_length_is_capped_by_rows() {
        let table = sample_table();
        assert_eq!(top_n_by_salary(&table.all(), 50, true).len(), table.len());
        assert!(top_n_by_salary(&table.select(&[]), 5, true).is_empty());
    }

    #[test]
    fn bottom_salary_ascends() {
        let table = sample_table();
        let bottom = top_n_by_salary(&table.all(), 2, false);
        assert_eq!(titles(&bottom), vec!["Clerk", "Driver"]);
    }

    #[test]
    fn headcount_rankings_both_ways() {
        let table = sample_table();
        let most = top_n_by_headcount(&table.all(), 3, true);
        assert_eq!(
            most.iter().map(|r| r.number_of_employees).collect::<Vec<_>>(),
            vec![40, 12, 12]
        );
        // The two rows with 12 employees keep source order.
        assert_eq!(most[1].grade, "Grade 11");
        assert_eq!(most[2].position_title, "Driver");

        let least = top_n_by_headcount(&table.all(), 2, false);
        assert_eq!(titles(&least), vec!["Manager", "Analyst"]);
    }

    #[test]
    fn grade_ranking_uses_group_means() {
        let table = sample_table();
        let top = grade_salary_ranking(&table.all(), 2, true);
        assert_eq!(
            top,
            vec![
                GradeMean { grade: "Grade 20".into(), mean_salary: 90000.0 },
                GradeMean { grade: "Grade 15".into(), mean_salary: 60000.0 },
            ]
        );

        let bottom = grade_salary_ranking(&table.all(), 10, false);
        assert_eq!(bottom.len(), 4);
        assert_eq!(bottom[0], GradeMean { grade: "Grade 10".into(), mean_salary: 32000.0 });
        assert!(bottom.windows(2).all(|w| w[0].mean_salary <= w[1].mean_salary));
    }

    #[test]
    fn employee_totals_and_shares_per_grade() {
        let table = sample_table();
        let totals = grade_employee_totals(&table.all());
        assert_eq!(totals.get("Grade 10"), Some(&52));
        assert_eq!(totals.get("Grade 20"), Some(&9));
        assert_eq!(totals.values().sum::<u64>(), 76);

        let shares = grade_employee_shares(&table.all());
        let sum: f64 = shares.iter().map(|(_, s)| s).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(shares[0].0, "Grade 10");

        assert!(grade_employee_totals(&table.select(&[])).is_empty());
        assert!(grade_employee_shares(&table.select(&[])).is_empty());
    }

    #[test]
    fn spread_interpolates_quartiles() {
        let table = SalaryTable::from_records(vec![
            record("A", "Grade 1", 40.0, 1),
            record("B", "Grade 1", 10.0, 1),
            record("C", "Grade 1", 30.0, 1),
            record("D", "Grade 1", 20.0, 1),
            record("E", "Grade 2", 5.0, 1),
        ]);
        let spread = grade_salary_spread(&table.all());

        let g1 = spread["Grade 1"];
        assert_eq!(g1.min, 10.0);
        assert_eq!(g1.q1, 17.5);
        assert_eq!(g1.median, 25.0);
        assert_eq!(g1.q3, 32.5);
        assert_eq!(g1.max, 40.0);
        assert_eq!(g1.count, 4);

        let g2 = spread["Grade 2"];
        assert_eq!((g2.min, g2.median, g2.max), (5.0, 5.0, 5.0));
    }

    #[test]
    fn histogram_covers_every_row() {
        let table = sample_table();
        let bins = salary_histogram(&table.all(), 6);
        assert_eq!(bins.len(), 6);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), table.len());
        assert_eq!(bins[0].lower, 30000.0);
        assert_eq!(bins[5].upper, 90000.0);
        // 30000, 34000, 35000 fall in the first 10k-wide bin; both maxima in the last.
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[5].count, 2);
    }

    #[test]
    fn histogram_edge_cases() {
        let table = two_row_table();
        assert!(salary_histogram(&table.all(), 0).is_empty());
        assert!(salary_histogram(&table.select(&[]), 10).is_empty());

        let flat = SalaryTable::from_records(vec![
            record("A", "Grade 1", 7.0, 1),
            record("B", "Grade 1", 7.0, 1),
        ]);
        let bins = salary_histogram(&flat.all(), 30);
        assert_eq!(bins, vec![HistogramBin { lower: 7.0, upper: 7.0, count: 2 }]);
    }
}
