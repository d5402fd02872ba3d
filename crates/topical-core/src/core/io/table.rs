use crate::core::models::evidence::{DevNote, EvidenceItem, ExperimentRecord};
use crate::core::models::features::{CandidatePool, FeatureVector};
use crate::core::models::proposal::ProposalRecord;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row {row}: feature '{column}' is not a finite number")]
    NonFiniteFeature { row: usize, column: &'static str },
    #[error("Row {row}: '{column}' is not a finite number")]
    NonFiniteValue { row: usize, column: &'static str },
    #[error("Row {row}: qc_fail must be 0 or 1, got {value}")]
    InvalidQcFlag { row: usize, value: u8 },
}

fn create_file(path: &Path) -> Result<File, TableError> {
    File::create(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn open_file(path: &Path) -> Result<File, TableError> {
    File::open(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn write_rows<'a, W, T, I>(rows: I, writer: W) -> Result<(), TableError>
where
    W: Write,
    T: serde::Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes proposal rows as CSV with a header line of record field names.
pub fn write_records<'a, W, I>(records: I, writer: W) -> Result<(), TableError>
where
    W: Write,
    I: IntoIterator<Item = &'a ProposalRecord>,
{
    write_rows(records, writer)
}

pub fn write_records_to_path<'a, I>(records: I, path: &Path) -> Result<(), TableError>
where
    I: IntoIterator<Item = &'a ProposalRecord>,
{
    write_records(records, create_file(path)?)
}

/// Writes a candidate pool as CSV with the eight feature columns.
pub fn write_pool<W: Write>(pool: &CandidatePool, writer: W) -> Result<(), TableError> {
    write_rows(pool, writer)
}

pub fn write_pool_to_path(pool: &CandidatePool, path: &Path) -> Result<(), TableError> {
    write_pool(pool, create_file(path)?)
}

/// Reads a candidate pool from CSV. Columns are matched by header name; extra columns are
/// ignored and every feature must be a finite number.
pub fn read_pool<R: Read>(reader: R) -> Result<CandidatePool, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut candidates = Vec::new();
    for (row, result) in csv_reader.deserialize::<FeatureVector>().enumerate() {
        let fv = result?;
        if let Some(name) = fv.first_non_finite() {
            return Err(TableError::NonFiniteFeature {
                row: row + 1,
                column: name.as_str(),
            });
        }
        candidates.push(fv);
    }
    Ok(CandidatePool::new(candidates))
}

pub fn read_pool_from_path(path: &Path) -> Result<CandidatePool, TableError> {
    read_pool(open_file(path)?)
}

/// Reads experiment records from a formulation table. Only `exp_id`, `stability_days`,
/// `irritation_risk` and `qc_fail` are required; other columns are ignored.
pub fn read_experiments<R: Read>(reader: R) -> Result<Vec<ExperimentRecord>, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize::<ExperimentRecord>().enumerate() {
        let record = result?;
        let row = index + 1;
        if !record.stability_days.is_finite() {
            return Err(TableError::NonFiniteValue {
                row,
                column: "stability_days",
            });
        }
        if !record.irritation_risk.is_finite() {
            return Err(TableError::NonFiniteValue {
                row,
                column: "irritation_risk",
            });
        }
        if record.qc_fail > 1 {
            return Err(TableError::InvalidQcFlag {
                row,
                value: record.qc_fail,
            });
        }
        records.push(record);
    }
    Ok(records)
}

pub fn read_experiments_from_path(path: &Path) -> Result<Vec<ExperimentRecord>, TableError> {
    read_experiments(open_file(path)?)
}

/// Reads development notes; only the `exp_id` and `observation` columns are used.
pub fn read_notes<R: Read>(reader: R) -> Result<Vec<DevNote>, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<DevNote>()
        .map(|result| result.map_err(TableError::from))
        .collect()
}

pub fn read_notes_from_path(path: &Path) -> Result<Vec<DevNote>, TableError> {
    read_notes(open_file(path)?)
}

/// Writes an evidence pack as CSV, one row per item in pack order.
pub fn write_evidence<W: Write>(pack: &[EvidenceItem], writer: W) -> Result<(), TableError> {
    write_rows(pack, writer)
}

pub fn write_evidence_to_path(pack: &[EvidenceItem], path: &Path) -> Result<(), TableError> {
    write_evidence(pack, create_file(path)?)
}
