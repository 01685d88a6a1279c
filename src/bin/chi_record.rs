use chi_plots::record::{append_sample, init_datfile, parse_cli_record};
use chi_plots::PlotError;
use log::{debug, error, warn};
use std::path::Path;

fn record(datfile: &Path, init: bool, sample: Option<(f64, f64)>) -> Result<(), PlotError> {
    if init {
        init_datfile(datfile)?;
    }
    match sample {
        Some((t, v)) => {
            append_sample(datfile, t, v)?;
            debug!("wrote {} {} to {}", t, v, datfile.display());
        }
        None if !init => warn!("no --time/--value given, nothing recorded"),
        None => {}
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let (datfile, init, sample) = parse_cli_record();
    if let Err(e) = record(&datfile, init, sample) {
        error!("{}", e);
        std::process::exit(1);
    }
}
