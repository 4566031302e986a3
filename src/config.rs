use std::path::PathBuf;

use clap::Parser;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

pub const WINDOW_TITLE: &str = "Montgomery County Job Dashboard";
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 900.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 500.0];

/// Grades pre-selected after a load, when present in the data.
pub const DEFAULT_GRADES: [&str; 5] = ["Grade 10", "Grade 11", "Grade 12", "Grade 13", "Grade 14"];
pub const MAX_SELECTED_GRADES: usize = 10;

pub const TOP_POSITIONS: usize = 20;
pub const FILLED_POSITIONS: usize = 10;
pub const RANKED_GRADES: usize = 10;
pub const HISTOGRAM_BINS: usize = 30;

pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";
pub const DEFAULT_DATA_FILE: &str = "Average_Salary_by_Job_Classification.csv";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "salary-dashboard", version)]
#[command(about = "Job classification salary dashboard")]
pub struct Args {
    /// Salary dataset to open at start-up (.csv or .parquet)
    #[arg(env = "SALARY_DASHBOARD_DATA")]
    pub data: Option<PathBuf>,
}

impl Args {
    /// The given dataset, else [`DEFAULT_DATA_FILE`] if it exists in the
    /// working directory.
    pub fn data_path(self) -> Option<PathBuf> {
        self.data.or_else(|| {
            let fallback = PathBuf::from(DEFAULT_DATA_FILE);
            fallback.exists().then_some(fallback)
        })
    }
}
