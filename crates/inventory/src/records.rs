//! Delimited-record codec for the pantry and unit files.
//!
//! Both files are plain CSV. The pantry file carries a header row; the unit
//! file does not. Writers overwrite the target in full.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use pantry_core::{
    format_date, parse_date, parse_quantity, PantryError, PantryResult, ParseError, StorageError,
};

pub(crate) const PANTRY_HEADER: [&str; 4] = ["Name", "Quantity", "Expiration Date", "Unit"];

/// One decoded pantry row, before unit resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PantryRecord {
    pub name: String,
    pub quantity: f64,
    pub expiration_date: NaiveDate,
    pub unit: Option<String>,
}

/// Open `path` for reading; a missing file is a cold start, not an error.
fn open_if_exists(path: &Path) -> Result<Option<File>, StorageError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// IO failures stay storage errors; everything else is bad data.
fn map_csv_error(path: &Path, err: csv::Error) -> PantryError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    if err.is_io_error() {
        return match err.into_kind() {
            csv::ErrorKind::Io(io) => StorageError::io(path, io).into(),
            other => StorageError::csv(path, format!("{other:?}")).into(),
        };
    }
    ParseError::malformed(line, err.to_string()).into()
}

fn writer_error(path: &Path, err: csv::Error) -> PantryError {
    StorageError::csv(path, err.to_string()).into()
}

fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

pub(crate) fn read_pantry(path: &Path) -> PantryResult<Option<Vec<PantryRecord>>> {
    let Some(file) = open_if_exists(path)? else {
        return Ok(None);
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| map_csv_error(path, e))?;
        rows.push(decode_pantry_record(&record)?);
    }
    Ok(Some(rows))
}

fn decode_pantry_record(record: &csv::StringRecord) -> Result<PantryRecord, ParseError> {
    let line = record_line(record);

    // Older files were written without the unit column.
    if record.len() != 3 && record.len() != 4 {
        return Err(ParseError::malformed(
            line,
            format!("expected 3 or 4 fields, found {}", record.len()),
        ));
    }

    let name = record[0].to_string();
    if name.trim().is_empty() {
        return Err(ParseError::malformed(line, "item name is empty"));
    }
    let quantity =
        parse_quantity(&record[1]).map_err(|e| ParseError::malformed(line, e.to_string()))?;
    let expiration_date =
        parse_date(&record[2]).map_err(|e| ParseError::malformed(line, e.to_string()))?;
    let unit = record
        .get(3)
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    Ok(PantryRecord {
        name,
        quantity,
        expiration_date,
        unit,
    })
}

pub(crate) fn write_pantry<'a, I>(path: &Path, rows: I) -> PantryResult<()>
where
    I: IntoIterator<Item = (&'a str, f64, NaiveDate, Option<&'a str>)>,
{
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| writer_error(path, e))?;
    writer
        .write_record(PANTRY_HEADER)
        .map_err(|e| writer_error(path, e))?;

    for (name, quantity, expiration_date, unit) in rows {
        let quantity = quantity.to_string();
        let date = format_date(expiration_date);
        writer
            .write_record([name, quantity.as_str(), date.as_str(), unit.unwrap_or("")])
            .map_err(|e| writer_error(path, e))?;
    }

    writer.flush().map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

pub(crate) fn read_units(path: &Path) -> PantryResult<Option<Vec<(String, String)>>> {
    let Some(file) = open_if_exists(path)? else {
        return Ok(None);
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut pairs = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| map_csv_error(path, e))?;
        if record.len() != 2 {
            return Err(ParseError::malformed(
                record_line(&record),
                format!("expected 2 fields, found {}", record.len()),
            )
            .into());
        }
        pairs.push((record[0].to_string(), record[1].trim().to_string()));
    }
    Ok(Some(pairs))
}

pub(crate) fn write_units<'a, I>(path: &Path, pairs: I) -> PantryResult<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    ensure_parent_dir(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| writer_error(path, e))?;

    for (name, unit) in pairs {
        writer
            .write_record([name, unit])
            .map_err(|e| writer_error(path, e))?;
    }

    writer.flush().map_err(|e| StorageError::io(path, e))?;
    Ok(())
}
