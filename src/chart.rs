//! ASCII EPI trend chart.
//!
//! The backend does not ship an EPI history, so the chart synthesizes a short
//! drifting series that ends near the current reading. The jitter source is
//! injected so the output can be pinned down in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_POINTS: usize = 10;
/// One year of daily points. Longer requests are cut to this length.
pub const MAX_POINTS: usize = 365;
pub const LEVELS: [f64; 8] = [0.85, 0.80, 0.75, 0.70, 0.65, 0.60, 0.55, 0.50];
pub const FLOOR: f64 = 0.50;
pub const CEILING: f64 = 0.85;
const STEP: f64 = 0.01;
const JITTER_SPAN: f64 = 0.05;
const MARKER_BAND: f64 = 0.025;

const CELL_MARK: &str = "●───";
const CELL_ABOVE: &str = "    ";
const CELL_BELOW: &str = "────";

/// Uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next(&mut self) -> f64;
}

/// Always returns the same sample. A value of 0.5 removes all jitter.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub f64);

impl RandomSource for ConstantSource {
    fn next(&mut self) -> f64 {
        self.0
    }
}

/// `rand`-backed source.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Series of `points` values (at most `MAX_POINTS`), oldest first, clamped
/// to the chart range.
pub fn synthesize_series(epi_current: f64, points: usize, rng: &mut dyn RandomSource) -> Vec<f64> {
    let points = points.min(MAX_POINTS);
    (0..points)
        .map(|i| {
            let jitter = (rng.next() - 0.5) * JITTER_SPAN;
            let back = (points - i - 1) as f64;
            (epi_current - back * STEP + jitter).clamp(FLOOR, CEILING)
        })
        .collect()
}

/// Glyph cell for `value` on the row for `level`.
pub fn cell(value: f64, level: f64) -> &'static str {
    if (value - level).abs() < MARKER_BAND {
        CELL_MARK
    } else if value > level {
        CELL_ABOVE
    } else {
        CELL_BELOW
    }
}

/// Draw an already generated series.
pub fn render_series(series: &[f64]) -> String {
    let points = series.len();
    let mut chart = String::new();
    for level in LEVELS {
        chart.push_str(&format!("{:.2} │", level));
        for value in series {
            chart.push_str(cell(*value, level));
        }
        chart.push('\n');
    }

    chart.push_str("     └");
    chart.push_str(&"─".repeat(points * CELL_ABOVE.len()));
    chart.push('\n');

    chart.push_str("      ");
    for i in 0..points {
        if i % 2 == 0 {
            chart.push_str(&format!("{:<4}", format!("{}d", points - i)));
        } else {
            chart.push_str(CELL_ABOVE);
        }
    }
    chart
}

pub fn render(epi_current: f64, points: usize, rng: &mut dyn RandomSource) -> String {
    render_series(&synthesize_series(epi_current, points, rng))
}
