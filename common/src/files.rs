//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

extern crate csv;

use std::path::Path;

/// Errors raised while reading or writing element and index files
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: `{value}` is not a hex string")]
    Hex { line: usize, value: String },
    #[error("bad shape: {0}")]
    Shape(String),
}

/// Reads a file with one hex encoded element per line
///
/// Blank lines are skipped, surrounding whitespace is trimmed.
pub fn read_hex_lines<T>(filename: T) -> Result<Vec<Vec<u8>>, FileError>
where
    T: AsRef<Path>,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(false)
        .has_headers(false)
        .from_path(filename)?;

    let mut res: Vec<Vec<u8>> = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let value = row.get(0).map(str::trim).unwrap_or_default();
        if value.is_empty() {
            continue;
        }
        let bytes = hex::decode(value).map_err(|_| FileError::Hex {
            line: i + 1,
            value: String::from(value),
        })?;
        res.push(bytes);
    }
    Ok(res)
}

/// Writes every element as one upper case hex line
pub fn write_hex_lines<T, B>(elements: &[B], path: T) -> Result<(), FileError>
where
    T: AsRef<Path>,
    B: AsRef<[u8]>,
{
    let mut wr = csv::WriterBuilder::new()
        .buffer_capacity(1024)
        .from_path(path)?;
    for e in elements.iter() {
        wr.write_record(&[hex::encode_upper(e.as_ref())])?;
    }
    wr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Transposes equally long index columns into rows
fn index_rows(columns: &[Vec<usize>]) -> Result<Vec<Vec<String>>, FileError> {
    let l = columns.first().map(|c| c.len()).unwrap_or(0);
    if columns.iter().any(|c| c.len() != l) {
        return Err(FileError::Shape(String::from(
            "index columns should have the same length",
        )));
    }
    Ok((0..l)
        .map(|i| {
            columns
                .iter()
                .map(|c| c[i].to_string())
                .collect::<Vec<String>>()
        })
        .collect::<Vec<Vec<String>>>())
}

/// Writes index columns (e.g. the two sides of an association table)
/// to a CSV file, one row per position
pub fn write_indices_to_csv<T>(columns: &[Vec<usize>], path: T) -> Result<(), FileError>
where
    T: AsRef<Path>,
{
    let rows = index_rows(columns)?;
    let mut wr = csv::WriterBuilder::new()
        .buffer_capacity(1024)
        .from_path(path)?;
    for line in rows.iter() {
        wr.write_record(line)?;
    }
    wr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Prints at most `limit` rows of index columns to stdout
pub fn write_indices_to_stdout(columns: &[Vec<usize>], limit: usize) -> Result<(), FileError> {
    let rows = index_rows(columns)?;
    if rows.len() > limit {
        warn!(
            "View size {} is bigger than stdout limit {} view will be truncated",
            rows.len(),
            limit
        );
    }

    println!("-----BEGIN FULL VIEW-----");
    for line in rows.iter().take(limit) {
        println!("{}", line.join(","));
    }
    println!("-----END FULL VIEW-----");
    Ok(())
}
