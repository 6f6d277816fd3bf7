// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
 * Rendering flag profiles to image files.
 */

use std::path::PathBuf;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::table::FlagTable;

/// The number of X pixels on the plots.
const X_PIXELS: u32 = 1400;
/// The number of Y pixels on a single-baseline plot.
const Y_PIXELS: u32 = 600;
/// The number of Y pixels of one panel in the combined plot.
const PANEL_Y_PIXELS: u32 = 200;

/// Mid-grey for the filled profile.
const FILL: RGBColor = RGBColor(128, 128, 128);

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Nothing to plot: no baselines")]
    NoBaselines,

    #[error("No channels to plot for {0}")]
    Empty(String),

    #[error("While plotting flags: {0}")]
    Draw(String),

    #[error("Error from the plotters library: {0}")]
    Plotters(Box<dyn std::error::Error + Send + Sync>),
}

/// The image file a baseline's plot goes to, in the current directory.
pub fn plot_filename(bsl_name: &str) -> PathBuf {
    PathBuf::from(format!("flags_{}.png", bsl_name))
}

/// The pixel height of the combined figure, which grows with the number of
/// stacked panels.
pub fn combined_height(n_baselines: usize) -> u32 {
    PANEL_Y_PIXELS * n_baselines as u32
}

/// Plot one baseline's flag fraction against frequency [GHz] and save it as
/// `flags_<baseline>.png`, overwriting any existing file. Returns the file
/// written.
pub fn plot_flags(
    freqs_ghz: &[f64],
    fractions: &[f64],
    bsl_name: &str,
) -> Result<PathBuf, DrawError> {
    let filename = plot_filename(bsl_name);
    let root = BitMapBackend::new(&filename, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    draw_panel(&root, freqs_ghz, fractions, bsl_name)?;
    root.present()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    drop(root);
    Ok(filename)
}

/// Plot every baseline of the table as stacked panels sharing the frequency
/// axis and save the figure as `flags_all.png`. Returns the file written.
pub fn plot_all_flags(table: &FlagTable) -> Result<PathBuf, DrawError> {
    let n = table.baselines.len();
    if n == 0 {
        return Err(DrawError::NoBaselines);
    }

    let filename = plot_filename("all");
    let root =
        BitMapBackend::new(&filename, (X_PIXELS, combined_height(n))).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    let freqs_ghz = table.freqs_ghz();
    let panels = root.split_evenly((n, 1));
    for (i, (bsl, panel)) in table.baselines.iter().zip(panels.iter()).enumerate() {
        let fractions = table
            .fractions(i)
            .map_err(|e| DrawError::Draw(e.to_string()))?;
        draw_panel(panel, &freqs_ghz, &fractions, &bsl.name())?;
    }

    root.present()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    drop(panels);
    drop(root);
    Ok(filename)
}

/// One panel: the filled profile, titled by baseline, frequency limits tight
/// to the data, fraction limits from the data minimum up to 1.
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    freqs_ghz: &[f64],
    fractions: &[f64],
    title: &str,
) -> Result<(), DrawError> {
    if freqs_ghz.is_empty() {
        return Err(DrawError::Empty(title.to_string()));
    }

    let (x_min, x_max) = axis_limits(freqs_ghz);
    let (y_min, _) = axis_limits(fractions);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(25)
        .y_label_area_size(45)
        .build_cartesian_2d(x_min..x_max, y_min..1.0)
        .map_err(|e| DrawError::Draw(e.to_string()))?;

    // Major and minor gridlines on the frequency axis only.
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(9)
        .x_max_light_lines(4)
        .bold_line_style(&BLACK.mix(0.2))
        .light_line_style(&BLACK.mix(0.2))
        .draw()
        .map_err(|e| DrawError::Draw(e.to_string()))?;

    chart
        .draw_series(
            AreaSeries::new(
                freqs_ghz.iter().copied().zip(fractions.iter().copied()),
                y_min,
                &FILL,
            )
            .border_style(&FILL),
        )
        .map_err(|e| DrawError::Draw(e.to_string()))?;

    Ok(())
}

/// The (min, max) of a data axis.
fn axis_limits(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        })
}
