use super::{PlotError, VERSION};
use clap::{App, Arg};
use log::info;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

fn is_number(s: String) -> Result<(), String> {
    s.parse::<f64>()
        .map(|_| ())
        .map_err(|e| format!("{} is not a number: {}", s, e))
}

/// Takes the CLI arguments to record one sample into a dat file.
/// Returns the dat file, whether to truncate it first, and the (time, value) to append.
pub fn parse_cli_record() -> (PathBuf, bool, Option<(f64, f64)>) {
    parse_cli_record_from(std::env::args_os())
}

pub fn parse_cli_record_from<I, T>(args: I) -> (PathBuf, bool, Option<(f64, f64)>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_datfile = Arg::with_name("datfile")
        .help("name for the dat file")
        .short("f")
        .long("file")
        .takes_value(true)
        .required(true);
    let arg_init = Arg::with_name("init")
        .help("truncate the dat file before recording")
        .long("init")
        .takes_value(false);
    let arg_time = Arg::with_name("time")
        .help("sample time, in seconds since the start of the run")
        .short("t")
        .long("time")
        .takes_value(true)
        .allow_hyphen_values(true)
        .requires("value")
        .validator(is_number);
    let arg_value = Arg::with_name("value")
        .help("sample value")
        .short("v")
        .long("value")
        .takes_value(true)
        .allow_hyphen_values(true)
        .requires("time")
        .validator(is_number);
    let cli_args = App::new("chi_record")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to append time value samples to a dat file")
        .arg(arg_datfile)
        .arg(arg_init)
        .arg(arg_time)
        .arg(arg_value)
        .get_matches_from(args);
    let datfile = PathBuf::from(cli_args.value_of("datfile").unwrap_or_default());
    let init = cli_args.is_present("init");
    let time = cli_args.value_of("time").and_then(|s| s.parse::<f64>().ok());
    let value = cli_args.value_of("value").and_then(|s| s.parse::<f64>().ok());
    let sample = match (time, value) {
        (Some(t), Some(v)) => Some((t, v)),
        _ => None,
    };
    (datfile, init, sample)
}

/// one dat row, both columns with six decimals
pub fn format_sample(time: f64, value: f64) -> String {
    format!("{:.6} {:.6}\n", time, value)
}

/// creates the dat file, or empties it if it already exists
pub fn init_datfile(fout: &Path) -> Result<(), PlotError> {
    std::fs::File::create(fout).map_err(|e| PlotError::write(fout, e))?;
    info!("initiated datfile {}", fout.display());
    Ok(())
}

/// appends one sample, creating the dat file if needed
pub fn append_sample(fout: &Path, time: f64, value: f64) -> Result<(), PlotError> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(fout)
        .map_err(|e| PlotError::write(fout, e))?;
    file.write_all(format_sample(time, value).as_bytes())
        .map_err(|e| PlotError::write(fout, e))?;
    Ok(())
}
