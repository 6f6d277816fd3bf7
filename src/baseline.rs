// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
 * Baseline enumeration.
 */

use std::fmt;

use itertools::Itertools;

/// An unordered pair of antennas. Holds both the antenna names and their rows
/// in the ANTENNA table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub ant1: String,
    pub ant2: String,
    pub ant1_idx: usize,
    pub ant2_idx: usize,
}

impl Baseline {
    /// The display form, e.g. "Mk2-Pi". Used in plot titles, output filenames
    /// and the CSV header.
    pub fn name(&self) -> String {
        format!("{}-{}", self.ant1, self.ant2)
    }

    /// The numeric-index form, e.g. "1-4".
    pub fn id(&self) -> String {
        format!("{}-{}", self.ant1_idx, self.ant2_idx)
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.ant1, self.ant2)
    }
}

/// Every unordered pair of antennas, self-pairs excluded: exactly n(n-1)/2
/// baselines for n antennas, in ascending first index then ascending second.
/// This order fixes the column order of all downstream outputs.
///
/// The stored indices are re-derived by name lookup rather than taken from
/// the loop counters; a duplicated antenna name resolves to its first
/// occurrence. The ANTENNA table is expected to keep names unique, and no
/// deduplication is attempted here.
pub fn get_baselines(antenna_names: &[String]) -> Vec<Baseline> {
    antenna_names
        .iter()
        .tuple_combinations()
        .map(|(a, b)| Baseline {
            ant1: a.clone(),
            ant2: b.clone(),
            ant1_idx: antenna_index(antenna_names, a),
            ant2_idx: antenna_index(antenna_names, b),
        })
        .collect()
}

/// The row of the first antenna called `name`.
fn antenna_index(antenna_names: &[String], name: &str) -> usize {
    antenna_names
        .iter()
        .position(|n| n == name)
        .expect("name was taken from this list")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn pair_count_is_n_choose_2() {
        for n in 0usize..8 {
            let antennas: Vec<String> = (0..n).map(|i| format!("ant{}", i)).collect();
            let baselines = get_baselines(&antennas);
            assert_eq!(baselines.len(), n * n.saturating_sub(1) / 2);
        }
    }

    #[test]
    fn order_and_contents() {
        let baselines = get_baselines(&names(&["Mk2", "Kn", "Pi"]));
        let expected = ["Mk2-Kn", "Mk2-Pi", "Kn-Pi"];
        assert_eq!(baselines.len(), expected.len());
        for (bsl, exp) in baselines.iter().zip(expected.iter()) {
            assert_eq!(&bsl.name(), exp);
        }
        assert_eq!(baselines[0].id(), "0-1");
        assert_eq!(baselines[1].id(), "0-2");
        assert_eq!(baselines[2].id(), "1-2");
    }

    #[test]
    fn no_self_pairs_or_reversed_duplicates() {
        let baselines = get_baselines(&names(&["a", "b", "c", "d"]));
        for bsl in &baselines {
            assert!(bsl.ant1_idx < bsl.ant2_idx);
        }
        let seen: std::collections::HashSet<String> =
            baselines.iter().map(|b| b.name()).collect();
        assert_eq!(seen.len(), baselines.len());
    }

    #[test]
    fn two_antennas_single_baseline() {
        let baselines = get_baselines(&names(&["A", "B"]));
        assert_eq!(baselines.len(), 1);
        assert_eq!(baselines[0].name(), "A-B");
        assert_eq!(baselines[0].to_string(), "A-B");
    }

    #[test]
    fn duplicate_names_resolve_to_first_row() {
        // Not expected from a real ANTENNA table, but the lookup is by name
        // and must behave like a first-match search.
        let baselines = get_baselines(&names(&["x", "x"]));
        assert_eq!(baselines.len(), 1);
        assert_eq!(baselines[0].id(), "0-0");
    }
}
