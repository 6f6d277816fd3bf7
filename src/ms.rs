// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
 * Helper functions for measurement sets.
 */

use std::path::Path;

use rubbl_casatables::{Table, TableOpenMode};

/// Open a measurement set table. If `table` is `None`, then open the base
/// table. The table is closed when the returned handle is dropped.
pub fn table_open(
    ms: &Path,
    table: Option<&str>,
    open_mode: TableOpenMode,
) -> anyhow::Result<Table> {
    let t = Table::open(
        &format!("{}/{}", ms.display(), table.unwrap_or("")),
        open_mode,
    )?;
    Ok(t)
}

/// The antenna names out of a measurement set's ANTENNA table, in row order.
/// The row number of a name is its antenna index everywhere else in the set.
pub fn get_antenna_names(ms: &Path) -> anyhow::Result<Vec<String>> {
    let mut t = table_open(ms, Some("ANTENNA"), TableOpenMode::Read)?;
    let names: Vec<String> = t.get_col_as_vec("NAME")?;
    Ok(names)
}

/// One spectral window of a measurement set.
#[derive(Debug, Clone, PartialEq)]
pub struct Spw {
    /// The DATA_DESC_ID value that selects this window's rows in the main
    /// table.
    pub data_desc_id: i32,

    /// The row of the SPECTRAL_WINDOW table this window refers to.
    pub spw_id: i32,

    /// Channel centre frequencies [Hz], in channel order.
    pub chan_freqs: Vec<f64>,
}

/// List the spectral windows of a measurement set along with their channel
/// frequencies.
///
/// The returned order is the DATA_DESCRIPTION table's row order, which is not
/// necessarily numeric-ascending; callers must use this order everywhere so
/// that per-baseline results line up row-for-row.
pub fn get_spws(ms: &Path) -> anyhow::Result<Vec<Spw>> {
    let spw_ids: Vec<i32> = {
        let mut t = table_open(ms, Some("DATA_DESCRIPTION"), TableOpenMode::Read)?;
        t.get_col_as_vec("SPECTRAL_WINDOW_ID")?
    };

    let mut t = table_open(ms, Some("SPECTRAL_WINDOW"), TableOpenMode::Read)?;
    let mut spws = Vec::with_capacity(spw_ids.len());
    for (data_desc_id, spw_id) in spw_ids.into_iter().enumerate() {
        let chan_freqs: Vec<f64> = t.get_cell_as_vec("CHAN_FREQ", spw_id as u64)?;
        spws.push(Spw {
            data_desc_id: data_desc_id as i32,
            spw_id,
            chan_freqs,
        });
    }
    Ok(spws)
}

/// All channel frequencies [Hz] concatenated in spectral-window order. No
/// sorting, no deduplication across windows.
pub fn all_freqs(spws: &[Spw]) -> Vec<f64> {
    spws.iter()
        .flat_map(|s| s.chan_freqs.iter().copied())
        .collect()
}

/// The total channel count across all spectral windows.
pub fn total_chans(spws: &[Spw]) -> usize {
    spws.iter().map(|s| s.chan_freqs.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_spws() -> Vec<Spw> {
        vec![
            Spw {
                data_desc_id: 0,
                spw_id: 1,
                chan_freqs: vec![1.4e9, 1.5e9],
            },
            Spw {
                data_desc_id: 1,
                spw_id: 0,
                chan_freqs: vec![1.0e9, 1.1e9, 1.2e9],
            },
        ]
    }

    #[test]
    fn all_freqs_preserves_window_order() {
        // The second window is lower in frequency than the first; the
        // concatenation must not sort it into place.
        let freqs = all_freqs(&test_spws());
        assert_eq!(freqs, &[1.4e9, 1.5e9, 1.0e9, 1.1e9, 1.2e9]);
    }

    #[test]
    fn all_freqs_is_deterministic() {
        let spws = test_spws();
        assert_eq!(all_freqs(&spws), all_freqs(&spws));
    }

    #[test]
    fn total_chans_sums_windows() {
        assert_eq!(total_chans(&test_spws()), 5);
        assert_eq!(total_chans(&[]), 0);
    }
}
