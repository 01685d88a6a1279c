use super::NBINS;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use std::ops::Range;

/// Nice step multipliers within one decade.
const STEPS: [f64; 5] = [1., 2., 2.5, 5., 10.];

/// Which end of the generated ticks gets dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prune {
    None,
    Lower,
    Upper,
}

/// Tick locator that places at most `nbins` intervals on nice numbers
/// (multiples of 1, 2, 2.5, 5 and 10 of the current decade).
#[derive(Debug, Clone)]
pub struct MaxTicks {
    pub nbins: usize,
    pub prune: Prune,
    pub min_ticks: usize,
}

impl Default for MaxTicks {
    fn default() -> Self {
        MaxTicks {
            nbins: NBINS,
            prune: Prune::Lower,
            min_ticks: 2,
        }
    }
}

impl MaxTicks {
    pub fn new(nbins: usize, prune: Prune) -> Self {
        MaxTicks {
            nbins,
            prune,
            ..MaxTicks::default()
        }
    }

    /// All ticks generated for the view [vmin, vmax], after pruning.
    /// The outermost ticks may fall just outside the view.
    pub fn tick_values(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let (vmin, vmax) = nonsingular(vmin, vmax, 1e-13, 1e-14);
        let mut locs = self.raw_ticks(vmin, vmax);
        match self.prune {
            Prune::Lower if !locs.is_empty() => {
                locs.remove(0);
            }
            Prune::Upper => {
                locs.pop();
            }
            _ => {}
        }
        locs
    }

    /// The ticks that land inside [vmin, vmax], i.e. the labelled ones.
    pub fn visible_ticks(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let (vmin, vmax) = nonsingular(vmin, vmax, 1e-13, 1e-14);
        let tol = (vmax - vmin).abs() * 1e-10;
        self.tick_values(vmin, vmax)
            .into_iter()
            .filter(|&t| t >= vmin - tol && t <= vmax + tol)
            .collect()
    }

    /// An axis over exactly [vmin, vmax] labelled at the visible ticks.
    pub fn axis(&self, vmin: f64, vmax: f64) -> LocatedAxis {
        LocatedAxis {
            range: vmin..vmax,
            ticks: self.visible_ticks(vmin, vmax),
        }
    }

    fn raw_ticks(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let nbins = self.nbins.max(1) as f64;
        let (scale, offset) = scale_range(vmin, vmax, nbins);
        let lo = vmin - offset;
        let hi = vmax - offset;
        let steps: Vec<f64> = extended_steps().iter().map(|s| s * scale).collect();
        let raw_step = (hi - lo) / nbins;
        let istep = steps
            .iter()
            .position(|&s| s >= raw_step)
            .unwrap_or(steps.len() - 1);

        let mut ticks: Vec<f64> = Vec::new();
        for &step in steps[..=istep].iter().rev() {
            let best_vmin = (lo / step).floor() * step;
            let edge = Edge::new(step, offset);
            let low = edge.le(lo - best_vmin);
            let high = edge.ge(hi - best_vmin);
            ticks = TickSteps::new(best_vmin, step, low, high).collect();
            let inside = ticks.iter().filter(|&&t| t >= lo && t <= hi).count();
            if inside >= self.min_ticks {
                break;
            }
        }
        ticks.into_iter().map(|t| t + offset).collect()
    }
}

/// Linear f64 axis whose bold key points are fixed ticks; no light points.
#[derive(Debug, Clone)]
pub struct LocatedAxis {
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl LocatedAxis {
    pub fn ticks(&self) -> &[f64] {
        &self.ticks[..]
    }
}

impl Ranged for LocatedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        RangedCoordf64::from(self.range.clone()).map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

/// [0.1, 0.2, 0.25, 0.5, 1, 2, 2.5, 5, 10, 20]
fn extended_steps() -> Vec<f64> {
    let mut steps: Vec<f64> = STEPS[..STEPS.len() - 1].iter().map(|s| s * 0.1).collect();
    steps.extend_from_slice(&STEPS);
    steps.push(STEPS[1] * 10.);
    steps
}

/// Decade of the raw step and, for views far from zero, the decade offset
/// subtracted before locating.
fn scale_range(vmin: f64, vmax: f64, n: f64) -> (f64, f64) {
    let dv = (vmax - vmin).abs();
    let meanv = (vmax + vmin) / 2.;
    let offset = if meanv.abs() / dv < 100. {
        0.
    } else {
        10f64.powf(meanv.abs().log10().floor()).copysign(meanv)
    };
    let scale = 10f64.powf((dv / n).log10().floor());
    (scale, offset)
}

/// Widens a (near) zero-width interval so that it can be located or scaled.
pub fn nonsingular(vmin: f64, vmax: f64, expander: f64, tiny: f64) -> (f64, f64) {
    let (mut vmin, mut vmax) = if vmax < vmin { (vmax, vmin) } else { (vmin, vmax) };
    let maxabs = vmin.abs().max(vmax.abs());
    if maxabs < (1e6 / tiny) * f64::MIN_POSITIVE {
        return (-expander, expander);
    }
    if vmax - vmin <= maxabs * tiny {
        if vmax == 0. && vmin == 0. {
            return (-expander, expander);
        }
        vmin -= expander * vmin.abs();
        vmax += expander * vmax.abs();
    }
    (vmin, vmax)
}

/// Integer step counts with a tolerance that grows with the offset,
/// so that float noise does not add or drop an edge tick.
struct Edge {
    step: f64,
    tol: f64,
}

impl Edge {
    fn new(step: f64, offset: f64) -> Self {
        let tol = if offset > 0. {
            let digits = (offset / step).log10();
            1e-10f64.max(10f64.powf(digits - 12.)).min(0.4999)
        } else {
            1e-10
        };
        Edge { step, tol }
    }

    fn closeto(&self, ms: f64, edge: f64) -> bool {
        (ms - edge).abs() < self.tol
    }

    fn divmod(&self, x: f64) -> (i64, f64) {
        let d = (x / self.step).floor();
        (d as i64, x - d * self.step)
    }

    /// largest n with n*step <= x
    fn le(&self, x: f64) -> i64 {
        let (d, m) = self.divmod(x);
        if self.closeto(m / self.step, 1.) {
            d + 1
        } else {
            d
        }
    }

    /// smallest n with n*step >= x
    fn ge(&self, x: f64) -> i64 {
        let (d, m) = self.divmod(x);
        if self.closeto(m / self.step, 0.) {
            d
        } else {
            d + 1
        }
    }
}

/// produces: [ base + i * step | i <- low..=high ]
#[derive(Clone, Debug)]
struct TickSteps {
    current: i64,
    last: i64,
    base: f64,
    step: f64,
}

impl TickSteps {
    fn new(base: f64, step: f64, low: i64, high: i64) -> Self {
        TickSteps {
            current: low,
            last: high,
            base,
            step,
        }
    }
}

impl Iterator for TickSteps {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.last {
            return None;
        }
        let result = self.base + self.current as f64 * self.step;
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = (self.last - self.current + 1).max(0) as usize;
        (l, Some(l))
    }
}

impl ExactSizeIterator for TickSteps {}

/// Fewest decimals (up to 10) that print every tick without loss.
pub fn label_precision(ticks: &[f64]) -> usize {
    (0..=10)
        .find(|&d| {
            let p = 10f64.powi(d as i32);
            ticks
                .iter()
                .all(|t| ((t * p).round() / p - t).abs() <= 1e-9 * t.abs().max(1.))
        })
        .unwrap_or(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ticks(got: &[f64], expected: &[f64]) {
        assert_eq!(got.len(), expected.len(), "{:?} vs {:?}", got, expected);
        for (g, e) in got.iter().zip(expected.iter()) {
            assert!((g - e).abs() < 1e-9, "{:?} vs {:?}", got, expected);
        }
    }

    #[test]
    fn trailing_window_ticks() {
        let locator = MaxTicks::default();
        assert_ticks(
            &locator.visible_ticks(60., 300.),
            &[100., 150., 200., 250., 300.],
        );
    }

    #[test]
    fn prune_lower_drops_visible_origin() {
        let locator = MaxTicks::default();
        assert_ticks(&locator.visible_ticks(0., 240.), &[50., 100., 150., 200.]);
        let unpruned = MaxTicks::new(7, Prune::None);
        assert_ticks(
            &unpruned.tick_values(0., 240.),
            &[0., 50., 100., 150., 200., 250.],
        );
    }

    #[test]
    fn prune_upper_drops_last() {
        let locator = MaxTicks::new(7, Prune::Upper);
        assert_ticks(&locator.tick_values(0., 240.), &[0., 50., 100., 150., 200.]);
    }

    #[test]
    fn never_more_than_nbins_intervals() {
        let locator = MaxTicks::new(7, Prune::None);
        for &(lo, hi) in &[(0., 1.), (-3.2, 17.9), (60., 300.), (1e-3, 7e-3), (12., 13.)] {
            let ticks = locator.visible_ticks(lo, hi);
            assert!(ticks.len() <= 8, "{:?}", ticks);
            assert!(ticks.len() >= 2, "{:?}", ticks);
        }
    }

    #[test]
    fn smallest_step_covering_the_range() {
        let locator = MaxTicks::default();
        assert_ticks(
            &locator.visible_ticks(1.5, 8.4),
            &[2., 3., 4., 5., 6., 7., 8.],
        );
    }

    #[test]
    fn axis_is_labelled_at_visible_ticks() {
        use plotters::coord::ranged1d::{BoldPoints, LightPoints};
        let axis = MaxTicks::default().axis(60., 300.);
        assert_eq!(axis.range(), 60.0..300.0);
        assert_ticks(&axis.key_points(BoldPoints(8)), &[100., 150., 200., 250., 300.]);
        assert_ticks(axis.ticks(), &[100., 150., 200., 250., 300.]);
        assert!(axis.key_points(LightPoints::new(8, 20)).is_empty());
        assert_eq!(axis.map(&60., (0, 240)), 0);
        assert_eq!(axis.map(&180., (0, 240)), 120);
    }

    #[test]
    fn unit_interval() {
        let locator = MaxTicks::default();
        let ticks = locator.visible_ticks(0., 1.);
        assert_ticks(&ticks, &[0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(label_precision(&ticks), 1);
    }

    #[test]
    fn large_offset() {
        let locator = MaxTicks::default();
        assert_ticks(
            &locator.visible_ticks(1_000_000., 1_000_240.),
            &[1_000_050., 1_000_100., 1_000_150., 1_000_200.],
        );
    }

    #[test]
    fn degenerate_interval_is_widened() {
        assert_eq!(nonsingular(0., 0., 0.05, 1e-15), (-0.05, 0.05));
        let (lo, hi) = nonsingular(2., 2., 0.05, 1e-15);
        assert!((lo - 1.9).abs() < 1e-12 && (hi - 2.1).abs() < 1e-12);
        assert_eq!(nonsingular(3., 1., 0.05, 1e-15), (1., 3.));
        let ticks = MaxTicks::default().visible_ticks(5., 5.);
        assert!(!ticks.is_empty());
    }

    #[test]
    fn precision() {
        assert_eq!(label_precision(&[100., 150., 200.]), 0);
        assert_eq!(label_precision(&[0.25, 0.5, 0.75]), 2);
        assert_eq!(label_precision(&[]), 0);
    }

    #[test]
    fn tick_steps_len() {
        let steps = TickSteps::new(10., 5., -1, 2);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps.collect::<Vec<f64>>(), vec![5., 10., 15., 20.]);
    }
}
