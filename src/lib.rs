// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
 * Per-baseline flag occupancy from a measurement set: read the FLAG column,
 * average it over time and polarisation, and plot or tabulate the result per
 * frequency channel.
 */

pub mod baseline;
pub mod flags;
pub mod ms;
pub mod plot;
pub mod selection;
pub mod table;
