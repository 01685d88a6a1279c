use super::{png_path_for, VERSION};
use clap::{App, AppSettings, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the time series.
pub fn parse_cli() -> (PathBuf, PathBuf) {
    parse_cli_from(std::env::args_os())
}

/// Only the last data file is plotted, earlier ones are tolerated and ignored.
/// The png goes next to it, with the first ".dat" replaced by ".png".
pub fn parse_cli_from<I, T>(args: I) -> (PathBuf, PathBuf)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_datin = Arg::with_name("input_datfile")
        .help("name of the dat file, two whitespace separated columns: time value")
        .multiple(true)
        .required(true);
    let cli_args = App::new("chi_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot the last four minutes of a time series to png")
        .setting(AppSettings::AllowLeadingHyphen)
        .arg(arg_datin)
        .get_matches_from(args);
    let datin = cli_args
        .values_of("input_datfile")
        .and_then(|v| v.last())
        .unwrap_or_default();
    let pngout = PathBuf::from(png_path_for(datin));
    (PathBuf::from(datin), pngout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file() {
        let (datin, pngout) = parse_cli_from(vec!["chi_plot", "plots/edges.dat"]);
        assert_eq!(datin, PathBuf::from("plots/edges.dat"));
        assert_eq!(pngout, PathBuf::from("plots/edges.png"));
    }

    #[test]
    fn last_file_wins() {
        let (datin, pngout) = parse_cli_from(vec!["chi_plot", "first.dat", "updates.dat"]);
        assert_eq!(datin, PathBuf::from("updates.dat"));
        assert_eq!(pngout, PathBuf::from("updates.png"));
    }

    #[test]
    fn leading_hyphen_arguments_are_ignored() {
        let (datin, pngout) = parse_cli_from(vec!["chi_plot", "-x", "--plotdir", "edges.dat"]);
        assert_eq!(datin, PathBuf::from("edges.dat"));
        assert_eq!(pngout, PathBuf::from("edges.png"));
    }

    #[test]
    fn no_dat_suffix_keeps_name() {
        let (datin, pngout) = parse_cli_from(vec!["chi_plot", "nofext"]);
        assert_eq!(datin, pngout);
    }
}
