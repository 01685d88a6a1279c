use chi_plots::plot::parse_cli;
use chi_plots::TimeValue;
use log::{error, info, warn};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let (datin, pngout) = parse_cli();
    if datin == pngout {
        warn!("{} has no .dat in its name, the png overwrites it", datin.display());
    }
    info!(
        "read data from {} and plot to {}",
        datin.display(),
        pngout.display()
    );
    let plotted = TimeValue::from_dat(&datin).and_then(|tv| tv.plot_png(&pngout));
    if let Err(e) = plotted {
        error!("could not plot {}: {}", datin.display(), e);
        std::process::exit(1);
    }
}
