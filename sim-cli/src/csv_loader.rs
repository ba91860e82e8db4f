//! CSV loader for batch form evaluation.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Every
//! column is optional and an empty cell leaves the field unset. Cells use
//! the same syntax the interactive prompt accepts.
//!
//! | Column             | Type    | Notes                                     |
//! |--------------------|---------|-------------------------------------------|
//! | `postal_code`      | string  | 7 digits, hyphen allowed (`100-0001`)     |
//! | `company`          | string  | One of: `tepco`, `kepco`, `other`         |
//! | `plan`             | string  | One of: `juryoA`, `juryoB`, `juryoC`      |
//! | `capacity`         | integer | Unit suffix allowed (`30A`, `12kVA`)      |
//! | `electricity_bill` | decimal | Yen, comma separators allowed (`"5,000"`) |
//! | `email`            | string  |                                           |
//!
//! The area is never read from the file; it is derived from the postal code.
//!
//! ### Example
//!
//! ```csv
//! postal_code,company,plan,capacity,electricity_bill,email
//! 1000001,tepco,juryoB,30,5000,test@example.com
//! 5300001,kepco,juryoC,12,12000,kansai@example.com
//! ```

use std::path::Path;

use serde::Deserialize;
use sim_core::engine::detect_area;
use sim_core::{FieldInput, FieldName, FormData, InputParseError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    postal_code: Option<String>,
    company: Option<String>,
    plan: Option<String>,
    capacity: Option<String>,
    electricity_bill: Option<String>,
    email: Option<String>,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV structure is invalid (ragged rows, bad quoting, ...).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A cell could not be parsed for its column. `row` is 1-based
    /// (header = row 0).
    #[error("row {row}, column {field}: {source}")]
    InvalidCell {
        row: usize,
        field: FieldName,
        #[source]
        source: InputParseError,
    },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<FormData, CsvLoadError> {
    let cells = [
        (FieldName::PostalCode, row.postal_code),
        (FieldName::Company, row.company),
        (FieldName::Plan, row.plan),
        (FieldName::Capacity, row.capacity),
        (FieldName::ElectricityBill, row.electricity_bill),
        (FieldName::Email, row.email),
    ];

    let mut data = FormData::default();
    for (field, cell) in cells {
        let Some(text) = cell else { continue };
        let input =
            FieldInput::parse(field, &text).map_err(|source| CsvLoadError::InvalidCell {
                row: row_number,
                field,
                source,
            })?;
        match input {
            FieldInput::PostalCode(postal_code) if !postal_code.is_empty() => {
                data.area = Some(detect_area(&postal_code).area);
                data.postal_code = Some(postal_code);
            }
            FieldInput::PostalCode(_) => {}
            FieldInput::Company(company) => data.company = company,
            FieldInput::Plan(plan) => data.plan = plan,
            FieldInput::Capacity(capacity) => data.capacity = capacity,
            FieldInput::ElectricityBill(bill) => data.electricity_bill = bill,
            FieldInput::Email(email) => data.email = Some(email).filter(|e| !e.is_empty()),
        }
    }

    Ok(data)
}

/// Parses CSV text and returns one [`FormData`] per row, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid.
/// * [`CsvLoadError::InvalidCell`] if a cell cannot be parsed for its column.
pub fn load_from_str(input: &str) -> Result<Vec<FormData>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads `path` and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<FormData>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}
