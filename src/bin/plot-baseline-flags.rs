// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use structopt::StructOpt;

use flagplot::baseline::get_baselines;
use flagplot::flags::read_flags;
use flagplot::ms::{all_freqs, get_antenna_names, get_spws};
use flagplot::plot::{plot_all_flags, plot_flags};
use flagplot::table::FlagTable;

/// Used when the given measurement set doesn't exist.
const DEFAULT_MS: &str =
    "/home/jmoldon/processing/emerlin/TS8004_C_001_20190801/TS8004_C_001_20190801_avg.ms";

/// For each baseline in the measurement set, plot its flag occupancy against
/// frequency, then write one combined figure and a CSV table of the same
/// numbers into the current directory.
#[derive(StructOpt, Debug)]
#[structopt(name = "plot-baseline-flags")]
struct Opts {
    /// The measurement set to inspect.
    #[structopt(name = "MEASUREMENT_SET", parse(from_str))]
    ms: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let opts = Opts::from_args();
    let ms = match opts.ms {
        Some(ms) if ms.exists() => ms,
        given => {
            match given {
                Some(ms) => warn!("No data found at '{}'", ms.display()),
                None => warn!("No measurement set given"),
            }
            info!("Falling back to '{}'", DEFAULT_MS);
            PathBuf::from(DEFAULT_MS)
        }
    };

    let antennas = get_antenna_names(&ms)?;
    let baselines = get_baselines(&antennas);
    let spws = get_spws(&ms)?;
    info!(
        "{}: {} antennas, {} baselines, {} spectral windows",
        ms.display(),
        antennas.len(),
        baselines.len(),
        spws.len()
    );

    // One row per channel across all spectral windows; the frequency order
    // fixed here is reused for every baseline below.
    let freqs_ms = all_freqs(&spws);
    let mut table = FlagTable::new(&freqs_ms, baselines.clone());

    let pb = ProgressBar::new(baselines.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:34.cyan/blue}] {pos}/{len} baselines [{elapsed_precise}<{eta_precise}]")
            .progress_chars("#>-"),
    );
    for (i, bsl) in baselines.iter().enumerate() {
        pb.set_message(&bsl.name());
        let profile = read_flags(&ms, &spws, bsl, None, None)?;
        let freqs_ghz: Vec<f64> = profile.freqs.iter().map(|f| f / 1e9).collect();
        plot_flags(&freqs_ghz, &profile.fractions, &bsl.name())?;
        table.set_column(i, &profile.fractions)?;
        pb.inc(1);
    }
    pb.finish();

    plot_all_flags(&table)?;
    table.write_csv(Path::new("flags.csv"))?;
    info!("Wrote flags_<baseline>.png, flags_all.png and flags.csv");

    Ok(())
}
