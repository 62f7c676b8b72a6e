use std::path::PathBuf;

use crate::chart::{DEFAULT_POINTS, MAX_POINTS};
use crate::policy::PositionSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" | "txt" => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub chart_points: usize,
    /// Fixed jitter seed; entropy-seeded when absent.
    pub chart_seed: Option<u64>,
    /// Advisory only: logged for the external poller that reruns this
    /// binary. Nothing in this crate sleeps or loops on it.
    pub poll_secs: u64,
    pub output: OutputFormat,
    /// When set, the recommendation is recomputed for this open position
    /// instead of trusting the one in the snapshot.
    pub position: Option<PositionSide>,
}

/// `CHART_POINTS` value, falling back to the default when it is missing,
/// unparsable, zero, or above `MAX_POINTS`.
pub fn parse_chart_points(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| (1..=MAX_POINTS).contains(n))
        .unwrap_or(DEFAULT_POINTS)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            snapshot_path: std::env::var("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("snapshot.json")),
            chart_points: parse_chart_points(std::env::var("CHART_POINTS").ok().as_deref()),
            chart_seed: std::env::var("CHART_SEED").ok().and_then(|v| v.parse().ok()),
            poll_secs: std::env::var("POLL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(30),
            output: std::env::var("OUTPUT").map(|v| OutputFormat::parse(&v)).unwrap_or(OutputFormat::Json),
            position: std::env::var("POSITION").ok().and_then(|v| PositionSide::parse(&v)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("snapshot.json"),
            chart_points: DEFAULT_POINTS,
            chart_seed: None,
            poll_secs: 30,
            output: OutputFormat::Json,
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_parse() {
        assert_eq!(OutputFormat::parse("TEXT"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Json);
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.chart_points, 10);
        assert_eq!(cfg.poll_secs, 30);
        assert!(cfg.chart_seed.is_none());
        assert!(cfg.position.is_none());
    }

    #[test]
    fn test_chart_points_bounded() {
        assert_eq!(parse_chart_points(None), DEFAULT_POINTS);
        assert_eq!(parse_chart_points(Some("30")), 30);
        assert_eq!(parse_chart_points(Some("365")), MAX_POINTS);
        assert_eq!(parse_chart_points(Some("366")), DEFAULT_POINTS);
        assert_eq!(parse_chart_points(Some("18446744073709551615")), DEFAULT_POINTS);
        assert_eq!(parse_chart_points(Some("0")), DEFAULT_POINTS);
        assert_eq!(parse_chart_points(Some("abc")), DEFAULT_POINTS);
    }
}
