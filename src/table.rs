// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
 * The per-channel result table and its CSV export.
 */

use std::path::Path;

use ndarray::Array2;
use thiserror::Error;

use crate::baseline::Baseline;

#[derive(Error, Debug)]
pub enum TableError {
    /// A baseline's profile doesn't have one value per table row.
    #[error("Baseline column {baseline} has {got} values for {expected} table rows")]
    ColumnMismatch {
        baseline: String,
        got: usize,
        expected: usize,
    },

    /// A column index with no corresponding baseline.
    #[error("No baseline column {0}")]
    NoSuchColumn(usize),

    /// An error from the CSV writer.
    #[error("{0}")]
    Csv(#[from] csv::Error),

    /// An IO error.
    #[error("{0}")]
    IO(#[from] std::io::Error),
}

/// One row per frequency channel; column 0 is the frequency [GHz], column
/// i + 1 is baseline i's flag fraction. The baseline list fixes the column
/// order for the combined plot and the CSV export.
#[derive(Debug, Clone)]
pub struct FlagTable {
    pub baselines: Vec<Baseline>,
    pub data: Array2<f64>,
}

impl FlagTable {
    /// An all-zero table for the given channel frequencies [Hz] and ordered
    /// baselines, with the frequency column already filled (in GHz).
    pub fn new(freqs_hz: &[f64], baselines: Vec<Baseline>) -> FlagTable {
        let mut data = Array2::zeros((freqs_hz.len(), baselines.len() + 1));
        for (row, &freq) in freqs_hz.iter().enumerate() {
            data[[row, 0]] = freq / 1e9;
        }
        FlagTable { baselines, data }
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// The shared frequency axis [GHz].
    pub fn freqs_ghz(&self) -> Vec<f64> {
        self.data.column(0).to_vec()
    }

    /// Baseline i's flag fractions.
    pub fn fractions(&self, i: usize) -> Result<Vec<f64>, TableError> {
        if i >= self.baselines.len() {
            return Err(TableError::NoSuchColumn(i));
        }
        Ok(self.data.column(i + 1).to_vec())
    }

    /// Fill baseline i's column. The profile must have one value per channel
    /// row.
    pub fn set_column(&mut self, i: usize, fractions: &[f64]) -> Result<(), TableError> {
        let bsl = self
            .baselines
            .get(i)
            .ok_or(TableError::NoSuchColumn(i))?
            .clone();
        if fractions.len() != self.n_rows() {
            return Err(TableError::ColumnMismatch {
                baseline: bsl.name(),
                got: fractions.len(),
                expected: self.n_rows(),
            });
        }
        for (row, &f) in fractions.iter().enumerate() {
            self.data[[row, i + 1]] = f;
        }
        Ok(())
    }

    /// Write the table as comma-delimited text with a `freq,<bsl>,...` header
    /// and 4-decimal fixed-point values, overwriting `path` if it exists.
    pub fn write_csv(&self, path: &Path) -> Result<(), TableError> {
        let mut wtr = csv::Writer::from_path(path)?;
        let mut header = vec!["freq".to_string()];
        header.extend(self.baselines.iter().map(|b| b.name()));
        wtr.write_record(&header)?;
        for row in self.data.outer_iter() {
            wtr.write_record(row.iter().map(|v| format!("{:.4}", v)))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
