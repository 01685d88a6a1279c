use log::debug;
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
pub mod error;
pub mod plot;
pub mod record;
pub mod ticks;

pub use error::PlotError;
use ticks::{label_precision, nonsingular, MaxTicks};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// trailing time window that is plotted, in seconds
pub const LASTSECS: f64 = 240.;

pub const FIG_WIDTH_IN: f64 = 3.5;
pub const FIG_HEIGHT_IN: f64 = 2.0;
pub const DPI: f64 = 100.;

/// max number of tick intervals on each axis
pub const NBINS: usize = 7;

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// The time window [start, end] shown on the horizontal axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

/// The main struct for the (time, value) series read from a .dat file
#[derive(Debug, Clone, Default)]
pub struct TimeValue {
    pub time: Vec<f64>,
    pub value: Vec<f64>,
}

impl TimeValue {
    pub fn new(capacity: usize) -> TimeValue {
        TimeValue {
            time: Vec::with_capacity(capacity),
            value: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Init a TimeValue from a whitespace separated .dat file, one `<time> <value>` per line.
    /// Anything after `#` is a comment and blank lines are skipped,
    /// any other line must hold exactly two numbers and a finite time.
    /// Times are expected to be non-decreasing but this is not checked.
    pub fn from_dat(fin: &Path) -> Result<TimeValue, PlotError> {
        let not_found = |source| PlotError::FileNotFound {
            path: fin.to_path_buf(),
            source,
        };
        let file = File::open(fin).map_err(not_found)?;
        let buf = BufReader::new(file);
        let mut timevalue = TimeValue::new(1024);
        for (i, bytes) in buf.split(b'\n').enumerate() {
            let l = String::from_utf8(bytes.map_err(not_found)?).map_err(|e| PlotError::Parse {
                line: i + 1,
                content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            })?;
            let data = l.split('#').next().unwrap_or_default().trim();
            if data.is_empty() {
                continue;
            }
            let (t, v) = parse_row(data).ok_or_else(|| PlotError::Parse {
                line: i + 1,
                content: l.clone(),
            })?;
            timevalue.time.push(t);
            timevalue.value.push(v);
        }
        debug!("read {} samples from {}", timevalue.len(), fin.display());
        Ok(timevalue)
    }

    pub fn last_time(&self) -> Result<f64, PlotError> {
        min_and_max(&self.time[..])
            .map(|(_, max)| max)
            .ok_or(PlotError::EmptyDataset)
    }

    /// the window of length `lastsecs` that ends at the last time
    pub fn window(&self, lastsecs: f64) -> Result<Window, PlotError> {
        let lastt = self.last_time()?;
        Ok(Window {
            start: lastt - lastsecs,
            end: lastt,
        })
    }

    /// keeps the samples with time > window.start, in their original order
    pub fn select(&self, window: &Window) -> TimeValue {
        let mut timevalue = TimeValue::new(self.len());
        for (&t, &v) in self.time.iter().zip(self.value.iter()) {
            if t > window.start {
                timevalue.time.push(t);
                timevalue.value.push(v);
            }
        }
        timevalue
    }

    /// splits the series at NAN values into runs of drawable points
    pub fn finite_runs(&self) -> Vec<Vec<(f64, f64)>> {
        self.value
            .split(|v| !v.is_finite())
            .scan(0usize, |start, chunk| {
                let first = *start;
                *start += chunk.len() + 1;
                Some((first, chunk))
            })
            .filter(|(_, chunk)| !chunk.is_empty())
            .map(|(first, chunk)| {
                self.time[first..first + chunk.len()]
                    .iter()
                    .cloned()
                    .zip(chunk.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// plots the last LASTSECS of the series as a png line chart
    pub fn plot_png(&self, fout: &Path) -> Result<(), PlotError> {
        let window = self.window(LASTSECS)?;
        let recent = self.select(&window);
        debug!(
            "plotting {} of {} samples in [{}, {}]",
            recent.len(),
            self.len(),
            window.start,
            window.end
        );

        let locator = MaxTicks::default();
        let xaxis = locator.axis(window.start, window.end);
        let (ymin, ymax) = autoscale(&recent.value[..]);
        let yaxis = locator.axis(ymin, ymax);
        let xprec = label_precision(xaxis.ticks());
        let yprec = label_precision(yaxis.ticks());

        let size = (
            (FIG_WIDTH_IN * DPI).round() as u32,
            (FIG_HEIGHT_IN * DPI).round() as u32,
        );
        let root = BitMapBackend::new(fout, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| PlotError::write(fout, e))?;
        let mut chart = ChartBuilder::on(&root)
            .margin(8)
            .x_label_area_size(20)
            .y_label_area_size(40)
            .build_cartesian_2d(xaxis, yaxis)
            .map_err(|e| PlotError::write(fout, e))?;
        chart
            .configure_mesh()
            .disable_mesh()
            .set_all_tick_mark_size(3)
            .label_style(("sans-serif", 10))
            .x_labels(NBINS + 1)
            .y_labels(NBINS + 1)
            .x_label_formatter(&|x: &f64| format!("{:.*}", xprec, x))
            .y_label_formatter(&|y: &f64| format!("{:.*}", yprec, y))
            .draw()
            .map_err(|e| PlotError::write(fout, e))?;

        for run in recent.finite_runs() {
            chart
                .draw_series(LineSeries::new(run, LINE_COLOR.stroke_width(2)))
                .map_err(|e| PlotError::write(fout, e))?;
        }
        root.present().map_err(|e| PlotError::write(fout, e))?;
        Ok(())
    }
}

fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut fields = line.split_whitespace();
    let t: f64 = fields.next()?.parse().ok()?;
    let v: f64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() || !t.is_finite() {
        return None;
    }
    Some((t, v))
}

/// value range of the finite values, widened by 5% on both sides
fn autoscale(values: &[f64]) -> (f64, f64) {
    let finite: Vec<f64> = values.iter().cloned().filter(|v| v.is_finite()).collect();
    let (vmin, vmax) = match min_and_max(&finite[..]) {
        Some(mm) => nonsingular(mm.0, mm.1, 0.05, 1e-15),
        None => return (0., 1.),
    };
    let margin = (vmax - vmin) * 0.05;
    (vmin - margin, vmax + margin)
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// png path for a .dat path: the first ".dat" becomes ".png", anywhere in the string.
/// A path without ".dat" comes back unchanged.
pub fn png_path_for(datin: &str) -> String {
    datin.replacen(".dat", ".png", 1)
}
