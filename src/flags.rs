// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
 * Reading flags and collapsing them to per-channel fractions.
 */

use std::path::Path;

use itertools::izip;
use ndarray::Array2;
use rubbl_casatables::TableOpenMode;
use thiserror::Error;

use crate::baseline::Baseline;
use crate::ms::{table_open, Spw};
use crate::selection::Selection;

/// A selection matched no rows of the main table. This aborts the run rather
/// than skipping the baseline: a missing or zero-filled column would silently
/// misalign the exported table.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("No rows matched spectral window {data_desc_id} for baseline {baseline}")]
pub struct EmptySelection {
    pub data_desc_id: i32,
    pub baseline: String,
}

/// A FLAG cell disagrees with the SPECTRAL_WINDOW table about the number of
/// channels.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("A row has {got} flag channels where spectral window {spw_id} has {expected}")]
pub struct ChannelMismatch {
    pub spw_id: i32,
    pub expected: usize,
    pub got: usize,
}

/// One baseline's flag fraction as a function of frequency, spanning all
/// spectral windows in enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagProfile {
    /// Channel centre frequencies [Hz].
    pub freqs: Vec<f64>,

    /// Fraction of flagged (time, polarisation) samples per channel, each in
    /// [0, 1].
    pub fractions: Vec<f64>,
}

/// Average the FLAG column over time and polarisation for the rows matching
/// `sel`, leaving one fraction per channel. Returns the fractions along with
/// the window's channel frequencies [Hz].
pub fn avg_flags_spw(ms: &Path, spw: &Spw, sel: &Selection) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
    let mut table = table_open(ms, None, TableOpenMode::Read)?;
    let data_desc_ids: Vec<i32> = table.get_col_as_vec("DATA_DESC_ID")?;
    let ant1s: Vec<i32> = table.get_col_as_vec("ANTENNA1")?;
    let ant2s: Vec<i32> = table.get_col_as_vec("ANTENNA2")?;
    let scans: Vec<i32> = table.get_col_as_vec("SCAN_NUMBER")?;
    let fields: Vec<i32> = table.get_col_as_vec("FIELD_ID")?;

    // Only the matching rows' FLAG cells are read; each is (channel,
    // polarisation).
    let mut cells: Vec<Array2<bool>> = vec![];
    for (row, (&ddid, &ant1, &ant2, &scan, &field)) in
        izip!(&data_desc_ids, &ant1s, &ant2s, &scans, &fields).enumerate()
    {
        if !sel.matches(ddid, ant1, ant2, scan, field) {
            continue;
        }
        let flags: Array2<bool> = table.get_cell("FLAG", row as u64)?;
        if flags.nrows() != spw.chan_freqs.len() {
            return Err(ChannelMismatch {
                spw_id: spw.spw_id,
                expected: spw.chan_freqs.len(),
                got: flags.nrows(),
            }
            .into());
        }
        cells.push(flags);
    }

    if cells.is_empty() {
        return Err(EmptySelection {
            data_desc_id: sel.data_desc_id,
            baseline: format!("{}-{}", sel.ant1, sel.ant2),
        }
        .into());
    }

    Ok((average_flag_cells(&cells), spw.chan_freqs.clone()))
}

/// The mean of boolean flag cells over rows and polarisation, per channel.
/// Every cell is (channel, polarisation) and all cells must share one channel
/// count; `avg_flags_spw` guarantees both before calling.
pub fn average_flag_cells(cells: &[Array2<bool>]) -> Vec<f64> {
    let n_chans = cells.first().map_or(0, |c| c.nrows());
    let mut flagged = vec![0u64; n_chans];
    let mut n_samples = 0u64;
    for cell in cells {
        for (chan, pols) in cell.outer_iter().enumerate() {
            flagged[chan] += pols.iter().filter(|&&f| f).count() as u64;
        }
        n_samples += cell.ncols() as u64;
    }
    flagged
        .into_iter()
        .map(|f| f as f64 / n_samples as f64)
        .collect()
}

/// The concatenated flag profile of one baseline, reading each spectral
/// window in the order `spws` is given.
///
/// Every baseline of a run must be read with the same `spws` slice; the
/// windows are never re-sorted here, so all profiles (and hence all table
/// columns) line up row-for-row.
pub fn read_flags(
    ms: &Path,
    spws: &[Spw],
    bsl: &Baseline,
    scan: Option<i32>,
    field: Option<i32>,
) -> anyhow::Result<FlagProfile> {
    let mut freqs = vec![];
    let mut fractions = vec![];
    for spw in spws {
        let mut sel = Selection::baseline(spw.data_desc_id, bsl);
        sel.scan = scan;
        sel.field = field;
        let (flags_spw, freqs_spw) = avg_flags_spw(ms, spw, &sel)?;
        fractions.extend(flags_spw);
        freqs.extend(freqs_spw);
    }
    Ok(FlagProfile { freqs, fractions })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn average_of_known_cube() {
        // 4 channels, 2 polarisations, 2 rows (times): 4 samples per channel.
        // Flagged counts per channel: 0, 1, 4, 2.
        let t0 = Array2::from_shape_vec(
            (4, 2),
            vec![false, false, true, false, true, true, true, false],
        )
        .unwrap();
        let t1 = Array2::from_shape_vec(
            (4, 2),
            vec![false, false, false, false, true, true, false, true],
        )
        .unwrap();

        let fractions = average_flag_cells(&[t0, t1]);
        assert_eq!(fractions.len(), 4);
        for (&got, &exp) in fractions.iter().zip([0.0, 0.25, 1.0, 0.5].iter()) {
            assert_abs_diff_eq!(got, exp);
        }
    }

    #[test]
    fn fractions_stay_in_unit_interval() {
        let cell = Array2::from_shape_fn((16, 4), |(chan, pol)| (chan * 3 + pol) % 5 == 0);
        let fractions = average_flag_cells(&[cell.clone(), cell]);
        for f in fractions {
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn all_flagged_averages_to_one() {
        let cell = Array2::from_elem((3, 4), true);
        let fractions = average_flag_cells(&[cell]);
        for f in fractions {
            assert_abs_diff_eq!(f, 1.0);
        }
    }

    #[test]
    fn no_cells_no_channels() {
        assert!(average_flag_cells(&[]).is_empty());
    }

    #[test]
    fn empty_selection_names_the_culprits() {
        let err = EmptySelection {
            data_desc_id: 3,
            baseline: "0-2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No rows matched spectral window 3 for baseline 0-2"
        );
    }
}
