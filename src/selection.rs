// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
 * Row selection for the main table of a measurement set.
 */

use crate::baseline::Baseline;

/// Which main-table rows contribute to a flag profile: one spectral window,
/// one baseline, optionally narrowed to a scan and a field.
///
/// This is the only place where a selection is compared against row values;
/// keep any new selection dimensions inside [`Selection::matches`].
#[derive(Debug, Clone)]
pub struct Selection {
    /// The DATA_DESC_ID of the spectral window.
    pub data_desc_id: i32,

    /// Antenna indices of the baseline. The pair is unordered; rows recorded
    /// as (b, a) match a selection of (a, b).
    pub ant1: i32,
    pub ant2: i32,

    /// If set, only rows with this SCAN_NUMBER.
    pub scan: Option<i32>,

    /// If set, only rows with this FIELD_ID.
    pub field: Option<i32>,
}

impl Selection {
    /// A selection of every row of `bsl` within one spectral window.
    pub fn baseline(data_desc_id: i32, bsl: &Baseline) -> Selection {
        Selection {
            data_desc_id,
            ant1: bsl.ant1_idx as i32,
            ant2: bsl.ant2_idx as i32,
            scan: None,
            field: None,
        }
    }

    /// Whether a main-table row falls inside this selection.
    pub fn matches(&self, data_desc_id: i32, ant1: i32, ant2: i32, scan: i32, field: i32) -> bool {
        if data_desc_id != self.data_desc_id {
            return false;
        }
        let pair_matches = (ant1 == self.ant1 && ant2 == self.ant2)
            || (ant1 == self.ant2 && ant2 == self.ant1);
        if !pair_matches {
            return false;
        }
        if self.scan.map_or(false, |s| s != scan) {
            return false;
        }
        if self.field.map_or(false, |f| f != field) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel() -> Selection {
        Selection {
            data_desc_id: 2,
            ant1: 0,
            ant2: 3,
            scan: None,
            field: None,
        }
    }

    #[test]
    fn matches_either_antenna_order() {
        let s = sel();
        assert!(s.matches(2, 0, 3, 7, 1));
        assert!(s.matches(2, 3, 0, 7, 1));
        assert!(!s.matches(2, 0, 2, 7, 1));
        assert!(!s.matches(2, 3, 3, 7, 1));
    }

    #[test]
    fn spectral_window_must_match() {
        let s = sel();
        assert!(!s.matches(1, 0, 3, 7, 1));
    }

    #[test]
    fn unset_scan_and_field_match_everything() {
        let s = sel();
        assert!(s.matches(2, 0, 3, 0, 0));
        assert!(s.matches(2, 0, 3, 99, 42));
    }

    #[test]
    fn set_scan_and_field_narrow_the_selection() {
        let mut s = sel();
        s.scan = Some(7);
        s.field = Some(1);
        assert!(s.matches(2, 0, 3, 7, 1));
        assert!(!s.matches(2, 0, 3, 8, 1));
        assert!(!s.matches(2, 0, 3, 7, 2));
    }

    #[test]
    fn from_baseline() {
        let bsl = crate::baseline::Baseline {
            ant1: "A".to_string(),
            ant2: "B".to_string(),
            ant1_idx: 1,
            ant2_idx: 4,
        };
        let s = Selection::baseline(0, &bsl);
        assert!(s.matches(0, 1, 4, 0, 0));
        assert!(s.matches(0, 4, 1, 5, 5));
        assert!(!s.matches(1, 1, 4, 0, 0));
    }
}
