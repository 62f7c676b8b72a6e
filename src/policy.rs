//! Regime and recommendation rules applied to computed indicators.
//!
//! These mirror what the market backend sends alongside each snapshot. The
//! indicators themselves come from elsewhere.

use crate::catalog::{ActionCode, RegimeCode};
use crate::snapshot::{Confidence, IndicatorSnapshot, Recommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSide {
    Long,
}

impl PositionSide {
    /// `None` for anything other than a long position ("flat", "", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "long" => Some(PositionSide::Long),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Long => "long",
        }
    }
}

/// First matching rule wins.
pub fn classify_regime(epi: f64, eci: f64, etb: f64) -> RegimeCode {
    if (epi > 0.75 && eci < 0.6) || (epi > 0.65 && eci < 0.5) {
        RegimeCode::Spiral
    } else if epi > 0.75 && eci > 0.75 {
        RegimeCode::Expansion
    } else if epi < 0.55 {
        RegimeCode::Continuity
    } else if eci > 0.75 {
        RegimeCode::Event
    } else if epi > 0.6 && eci < 0.5 {
        RegimeCode::Advance
    } else if etb < 0.4 {
        RegimeCode::Dissolution
    } else {
        RegimeCode::Transition
    }
}

fn rec(action: ActionCode, confidence: Confidence, rationale: Vec<String>) -> Recommendation {
    Recommendation { action, confidence, rationale }
}

pub fn recommend(
    epi: f64,
    eci: f64,
    etb: f64,
    regime: RegimeCode,
    position: Option<PositionSide>,
) -> Recommendation {
    match position {
        None => {
            let trending = matches!(regime, RegimeCode::Spiral | RegimeCode::Advance);
            if trending && eci < 0.6 && etb > 0.5 {
                rec(
                    ActionCode::EnterLong,
                    Confidence::High,
                    vec![
                        format!("EPI={:.2} confirms persistence", epi),
                        format!("ECI={:.2} safe from threshold", eci),
                        format!("ETB={:.2} structure healthy", etb),
                    ],
                )
            } else if regime == RegimeCode::Event && eci > 0.75 {
                rec(
                    ActionCode::PrepareBreakout,
                    Confidence::Medium,
                    vec![
                        format!("ECI={:.2} near threshold", eci),
                        "Breakout imminent (direction uncertain)".to_string(),
                    ],
                )
            } else {
                rec(
                    ActionCode::Wait,
                    Confidence::High,
                    vec![format!("Regime {} not favorable for entry", regime.code())],
                )
            }
        }
        Some(PositionSide::Long) => {
            if epi > 0.85 || eci > 0.8 {
                // Blank slots are intentional; the display drops them.
                let exhaustion = if epi > 0.85 {
                    format!("EPI={:.2} exhaustion zone", epi)
                } else {
                    String::new()
                };
                let threshold = if eci > 0.8 {
                    format!("ECI={:.2} threshold approaching", eci)
                } else {
                    String::new()
                };
                rec(ActionCode::Exit, Confidence::High, vec![exhaustion, threshold])
            } else if etb < 0.4 {
                rec(
                    ActionCode::ReduceHalf,
                    Confidence::Medium,
                    vec![format!("ETB={:.2} structure degrading", etb)],
                )
            } else {
                rec(
                    ActionCode::Hold,
                    Confidence::High,
                    vec![
                        format!("EPI={:.2} trend intact", epi),
                        format!("ECI={:.2} stable", eci),
                        format!("ETB={:.2} healthy", etb),
                    ],
                )
            }
        }
    }
}

/// Recompute the recommendation from the snapshot's own indicators.
pub fn reassess(snapshot: &IndicatorSnapshot, position: Option<PositionSide>) -> Recommendation {
    let (epi, eci, etb) = (snapshot.epi, snapshot.eci, snapshot.etb);
    recommend(epi, eci, etb, classify_regime(epi, eci, etb), position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::snapshot;

    #[test]
    fn test_regime_ladder() {
        assert_eq!(classify_regime(0.80, 0.50, 0.6), RegimeCode::Spiral);
        assert_eq!(classify_regime(0.70, 0.45, 0.6), RegimeCode::Spiral);
        assert_eq!(classify_regime(0.80, 0.80, 0.6), RegimeCode::Expansion);
        assert_eq!(classify_regime(0.50, 0.90, 0.2), RegimeCode::Continuity);
        assert_eq!(classify_regime(0.60, 0.80, 0.6), RegimeCode::Event);
        assert_eq!(classify_regime(0.62, 0.40, 0.6), RegimeCode::Advance);
        assert_eq!(classify_regime(0.60, 0.55, 0.3), RegimeCode::Dissolution);
        assert_eq!(classify_regime(0.60, 0.55, 0.5), RegimeCode::Transition);
    }

    #[test]
    fn test_flat_entry() {
        let r = recommend(0.80, 0.40, 0.70, RegimeCode::Spiral, None);
        assert_eq!(r.action, ActionCode::EnterLong);
        assert_eq!(r.confidence, Confidence::High);
        assert_eq!(r.rationale[0], "EPI=0.80 confirms persistence");
    }

    #[test]
    fn test_flat_breakout_and_wait() {
        let r = recommend(0.60, 0.80, 0.50, RegimeCode::Event, None);
        assert_eq!(r.action, ActionCode::PrepareBreakout);
        let w = recommend(0.60, 0.55, 0.50, RegimeCode::Transition, None);
        assert_eq!(w.action, ActionCode::Wait);
        assert_eq!(w.rationale, vec!["Regime Σ₁₂₃₊ not favorable for entry"]);
    }

    #[test]
    fn test_long_exit_blank_rationale() {
        let r = recommend(0.90, 0.50, 0.50, RegimeCode::Spiral, Some(PositionSide::Long));
        assert_eq!(r.action, ActionCode::Exit);
        assert_eq!(r.rationale.len(), 2);
        assert!(r.rationale[1].is_empty());
    }

    #[test]
    fn test_long_reduce_and_hold() {
        let r = recommend(0.70, 0.50, 0.30, RegimeCode::Dissolution, Some(PositionSide::Long));
        assert_eq!(r.action, ActionCode::ReduceHalf);
        let h = recommend(0.70, 0.50, 0.60, RegimeCode::Spiral, Some(PositionSide::Long));
        assert_eq!(h.action, ActionCode::Hold);
    }

    #[test]
    fn test_position_parse() {
        assert_eq!(PositionSide::parse("LONG"), Some(PositionSide::Long));
        assert_eq!(PositionSide::parse(" long "), Some(PositionSide::Long));
        assert_eq!(PositionSide::parse("flat"), None);
        assert_eq!(PositionSide::parse(""), None);
    }

    #[test]
    fn test_reassess_uses_snapshot_indicators() {
        // Snapshot ships WAIT; a long position at EPI 0.90 must exit.
        let snap = snapshot(0.90, 0.50, 0.50);
        let r = reassess(&snap, Some(PositionSide::Long));
        assert_eq!(r.action, ActionCode::Exit);
        assert_eq!(r.rationale[0], "EPI=0.90 exhaustion zone");

        let flat = reassess(&snapshot(0.80, 0.40, 0.70), None);
        assert_eq!(flat.action, ActionCode::EnterLong);
    }
}
