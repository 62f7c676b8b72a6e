//! Threshold classification of the three EAR indicators.
//!
//! Every indicator maps onto a small ladder of labels through descending
//! breakpoints. The ladders are plain data so the same `classify` routine
//! serves all three.

use serde::{Deserialize, Serialize};

/// Resolve `value` against breakpoints given in descending threshold order.
///
/// Returns the label of the first breakpoint whose threshold is strictly
/// below `value`, or `fallback` when none is. NaN never matches.
pub fn classify<L: Copy>(value: f64, breakpoints: &[(f64, L)], fallback: L) -> L {
    breakpoints
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(fallback)
}

/// Labels that can be ranked from calm to alarming.
pub trait Severity {
    /// 0 = least severe. Rises with the indicator value along its ladder.
    fn severity(&self) -> u8;
    fn as_str(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersistenceState {
    Ranging,
    Transition,
    Trending,
    TrendingStrong,
}

pub const PERSISTENCE_LADDER: [(f64, PersistenceState); 3] = [
    (0.75, PersistenceState::TrendingStrong),
    (0.65, PersistenceState::Trending),
    (0.55, PersistenceState::Transition),
];

impl PersistenceState {
    pub fn from_epi(epi: f64) -> Self {
        classify(epi, &PERSISTENCE_LADDER, PersistenceState::Ranging)
    }
}

impl Severity for PersistenceState {
    fn severity(&self) -> u8 {
        match self {
            Self::Ranging => 0,
            Self::Transition => 1,
            Self::Trending => 2,
            Self::TrendingStrong => 3,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Ranging => "RANGING",
            Self::Transition => "TRANSITION",
            Self::Trending => "TRENDING",
            Self::TrendingStrong => "TRENDING_STRONG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriticalityState {
    Stable,
    Warning,
    Critical,
}

pub const CRITICALITY_LADDER: [(f64, CriticalityState); 2] = [
    (0.8, CriticalityState::Critical),
    (0.6, CriticalityState::Warning),
];

impl CriticalityState {
    pub fn from_eci(eci: f64) -> Self {
        classify(eci, &CRITICALITY_LADDER, CriticalityState::Stable)
    }
}

impl Severity for CriticalityState {
    fn severity(&self) -> u8 {
        match self {
            Self::Stable => 0,
            Self::Warning => 1,
            Self::Critical => 2,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Structural health. Higher `etb` is healthier, so severity here ranks
/// Degraded < Moderate < Healthy along the rising value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopologyState {
    Degraded,
    Moderate,
    Healthy,
}

pub const TOPOLOGY_LADDER: [(f64, TopologyState); 2] = [
    (0.6, TopologyState::Healthy),
    (0.4, TopologyState::Moderate),
];

impl TopologyState {
    pub fn from_etb(etb: f64) -> Self {
        classify(etb, &TOPOLOGY_LADDER, TopologyState::Degraded)
    }
}

impl Severity for TopologyState {
    fn severity(&self) -> u8 {
        match self {
            Self::Degraded => 0,
            Self::Moderate => 1,
            Self::Healthy => 2,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Degraded => "DEGRADED",
            Self::Moderate => "MODERATE",
            Self::Healthy => "HEALTHY",
        }
    }
}

/// One bar of the indicator panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorStatus {
    pub name: &'static str,
    pub value: f64,
    pub status: &'static str,
    /// Bar width, `value * 100`.
    pub fill_percent: f64,
}

impl IndicatorStatus {
    fn new<S: Severity>(name: &'static str, value: f64, state: S) -> Self {
        Self {
            name,
            value,
            status: state.as_str(),
            fill_percent: value * 100.0,
        }
    }

    pub fn persistence(epi: f64) -> Self {
        Self::new("EPI", epi, PersistenceState::from_epi(epi))
    }

    pub fn criticality(eci: f64) -> Self {
        Self::new("ECI", eci, CriticalityState::from_eci(eci))
    }

    pub fn topology(etb: f64) -> Self {
        Self::new("ETB", etb, TopologyState::from_etb(etb))
    }
}

/// Panel rows in display order: EPI, ECI, ETB.
pub fn indicator_statuses(epi: f64, eci: f64, etb: f64) -> Vec<IndicatorStatus> {
    vec![
        IndicatorStatus::persistence(epi),
        IndicatorStatus::criticality(eci),
        IndicatorStatus::topology(etb),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> impl Iterator<Item = f64> {
        (0..=100).map(|i| i as f64 / 100.0)
    }

    #[test]
    fn test_classify_strict_threshold() {
        assert_eq!(PersistenceState::from_epi(0.75), PersistenceState::Trending);
        assert_eq!(PersistenceState::from_epi(0.7501), PersistenceState::TrendingStrong);
        assert_eq!(PersistenceState::from_epi(0.55), PersistenceState::Ranging);
        assert_eq!(CriticalityState::from_eci(0.8), CriticalityState::Warning);
        assert_eq!(TopologyState::from_etb(0.4), TopologyState::Degraded);
    }

    #[test]
    fn test_strong_trend_fill() {
        let status = IndicatorStatus::persistence(0.78);
        assert_eq!(status.status, "TRENDING_STRONG");
        assert!((status.fill_percent - 78.0).abs() < 1e-9);
    }

    #[test]
    fn test_middle_bands() {
        assert_eq!(CriticalityState::from_eci(0.65), CriticalityState::Warning);
        assert_eq!(TopologyState::from_etb(0.5), TopologyState::Moderate);
        assert_eq!(PersistenceState::from_epi(0.6), PersistenceState::Transition);
    }

    #[test]
    fn test_label_always_from_ladder_or_fallback() {
        fn check<L: Copy + PartialEq + std::fmt::Debug>(ladder: &[(f64, L)], fallback: L) {
            for v in sweep().chain([-1.0, 2.0, f64::NAN]) {
                let label = classify(v, ladder, fallback);
                let known = ladder.iter().any(|(_, l)| *l == label);
                assert!(known || label == fallback, "{:?} at {}", label, v);
            }
        }
        check(&PERSISTENCE_LADDER, PersistenceState::Ranging);
        check(&CRITICALITY_LADDER, CriticalityState::Stable);
        check(&TOPOLOGY_LADDER, TopologyState::Degraded);
    }

    #[test]
    fn test_severity_monotone() {
        let mut prev = (0, 0, 0);
        for v in sweep() {
            let cur = (
                PersistenceState::from_epi(v).severity(),
                CriticalityState::from_eci(v).severity(),
                TopologyState::from_etb(v).severity(),
            );
            assert!(cur.0 >= prev.0 && cur.1 >= prev.1 && cur.2 >= prev.2, "dropped at {}", v);
            prev = cur;
        }
    }

    #[test]
    fn test_out_of_range_resolves() {
        assert_eq!(PersistenceState::from_epi(1.5), PersistenceState::TrendingStrong);
        assert_eq!(CriticalityState::from_eci(-0.2), CriticalityState::Stable);
        assert_eq!(TopologyState::from_etb(f64::NAN), TopologyState::Degraded);
    }

    #[test]
    fn test_panel_order() {
        let names: Vec<_> = indicator_statuses(0.5, 0.5, 0.5).iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["EPI", "ECI", "ETB"]);
    }
}
