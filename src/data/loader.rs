use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use thiserror::Error;

use super::model::{Record, SalaryTable};

/// Number of columns every source must carry, in the order
/// title, class code, grade, salary, employee count.
pub const EXPECTED_COLUMNS: usize = Record::COLUMN_NAMES.len();

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a source file into a
/// [`SalaryTable`]. Row numbers count data rows from 1, header excluded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source not found: {}: {source}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("expected 5 columns, found {found}")]
    SchemaMismatch { found: usize },

    #[error("row {row}: expected 5 fields, found {found}")]
    RaggedRow { row: usize, found: usize },

    #[error("row {row}: malformed salary '{value}'")]
    MalformedSalary { row: usize, value: String },

    #[error("row {row}: malformed employee count '{value}'")]
    MalformedEmployeeCount { row: usize, value: String },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("reading data source: {0}")]
    Io(#[from] io::Error),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] ParquetError),

    #[error("decoding arrow data: {0}")]
    Arrow(#[from] ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalise a salary table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by five positional columns
/// * `.parquet` – five positional columns of any printable type
pub fn load(path: &Path) -> Result<SalaryTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(open_source(path)?)?,
        "parquet" | "pq" => read_parquet(open_source(path)?)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };

    log::info!(
        "Loaded {} rows ({} grades) from {}",
        table.len(),
        table.grades().len(),
        path.display()
    );
    Ok(table)
}

/// Read a CSV stream. The header row is skipped; its text is ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<SalaryTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let found = reader.headers()?.len();
    if found != EXPECTED_COLUMNS {
        return Err(LoadError::SchemaMismatch { found });
    }

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let fields = result?;
        if fields.len() != EXPECTED_COLUMNS {
            return Err(LoadError::RaggedRow {
                row,
                found: fields.len(),
            });
        }
        let cells: Vec<&str> = fields.iter().collect();
        records.push(normalize_row(row, &cells)?);
    }

    Ok(SalaryTable::from_records(records))
}

/// Any failure to open the file means the source is unavailable.
fn open_source(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Every cell is rendered to text and cleaned with the CSV rules, so a
/// numeric salary column and a `"$1,234.00"` string column both load.
fn read_parquet(file: File) -> Result<SalaryTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let found = builder.schema().fields().len();
    if found != EXPECTED_COLUMNS {
        return Err(LoadError::SchemaMismatch { found });
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row_in_batch in 0..batch.num_rows() {
            let row = records.len() + 1;
            let cells = batch
                .columns()
                .iter()
                .map(|col| array_value_to_string(col, row_in_batch))
                .collect::<Result<Vec<String>, ArrowError>>()?;
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            records.push(normalize_row(row, &cells)?);
        }
    }

    Ok(SalaryTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Turn five positional cells into a [`Record`].
fn normalize_row(row: usize, cells: &[&str]) -> Result<Record, LoadError> {
    let [title, class_code, grade, salary, employees] = cells else {
        return Err(LoadError::RaggedRow {
            row,
            found: cells.len(),
        });
    };

    let average_salary = clean_salary(salary).ok_or_else(|| LoadError::MalformedSalary {
        row,
        value: salary.to_string(),
    })?;

    let number_of_employees = employees.trim().parse::<u64>().map_err(|_| {
        LoadError::MalformedEmployeeCount {
            row,
            value: employees.to_string(),
        }
    })?;

    Ok(Record {
        position_title: title.to_string(),
        position_class_code: class_code.to_string(),
        grade: grade_label(grade),
        average_salary,
        number_of_employees,
    })
}

/// Strip every `$` and `,` from a currency string and parse what is left.
/// Returns `None` unless the result is a finite, non-negative number.
pub fn clean_salary(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    digits
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Human-readable grade label for a raw grade code.
pub fn grade_label(raw: &str) -> String {
    format!("Grade {raw}")
}
