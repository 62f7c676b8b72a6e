//! Indicator snapshots as delivered by the market-data backend.
//!
//! A snapshot is decoded and validated here, at the ingestion boundary.
//! Everything downstream assumes `validate` has passed.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::ActionCode;
use crate::logging::log_snapshot_rejected;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }

    /// Style class used by the recommendation badge.
    pub fn css_class(&self) -> String {
        format!("confidence-{}", self.as_str().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: ActionCode,
    pub confidence: Confidence,
    /// May contain empty entries; they are dropped on display.
    #[serde(default)]
    pub rationale: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub symbol: String,
    pub current_price: f64,
    /// Persistence (Hurst-style), in [0, 1].
    pub epi: f64,
    /// Criticality, in [0, 1].
    pub eci: f64,
    /// Topology balance, in [0, 1].
    pub etb: f64,
    /// Regime code; unknown codes are carried as-is.
    pub regime: String,
    pub recommendation: Recommendation,
    /// Chronological, oldest first.
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    IndicatorOutOfRange { name: &'static str, value: f64 },
    InvalidPrice { value: f64 },
    InvalidHistoryPrice { index: usize, value: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::IndicatorOutOfRange { name, value } => {
                write!(f, "{} must be within [0, 1], got {}", name, value)
            }
            ValidationError::InvalidPrice { value } => {
                write!(f, "current_price must be positive and finite, got {}", value)
            }
            ValidationError::InvalidHistoryPrice { index, value } => {
                write!(f, "price_history[{}] must be non-negative and finite, got {}", index, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl IndicatorSnapshot {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [("epi", self.epi), ("eci", self.eci), ("etb", self.etb)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::IndicatorOutOfRange { name, value });
            }
        }
        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            return Err(ValidationError::InvalidPrice { value: self.current_price });
        }
        if let Some((index, p)) = self
            .price_history
            .iter()
            .enumerate()
            .find(|(_, p)| !p.price.is_finite() || p.price < 0.0)
        {
            return Err(ValidationError::InvalidHistoryPrice { index, value: p.price });
        }
        Ok(())
    }

    /// Percent change from the oldest history point to the current price.
    ///
    /// Zero when there is fewer than two points or the base price is zero.
    pub fn price_delta(&self) -> f64 {
        match self.price_history.first() {
            Some(first) if self.price_history.len() > 1 && first.price > 0.0 => {
                (self.current_price - first.price) / first.price * 100.0
            }
            _ => 0.0,
        }
    }
}

/// Decode a backend market payload and validate it.
pub fn parse_snapshot(json: &str) -> Result<IndicatorSnapshot> {
    let snapshot: IndicatorSnapshot =
        serde_json::from_str(json).context("decoding indicator snapshot")?;
    if let Err(err) = snapshot.validate() {
        log_snapshot_rejected(&snapshot.symbol, &err);
        return Err(err).with_context(|| format!("rejecting snapshot for {}", snapshot.symbol));
    }
    Ok(snapshot)
}

pub fn load_snapshot(path: &Path) -> Result<IndicatorSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    parse_snapshot(&content).with_context(|| format!("loading snapshot {}", path.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn snapshot(epi: f64, eci: f64, etb: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            symbol: "BTC".into(),
            current_price: 42150.0,
            epi,
            eci,
            etb,
            regime: "Σ₁₂₃₊".into(),
            recommendation: Recommendation {
                action: ActionCode::Wait,
                confidence: Confidence::High,
                rationale: vec!["Regime Σ₁₂₃₊ not favorable for entry".into()],
            },
            price_history: Vec::new(),
        }
    }

    fn point(price: f64) -> PricePoint {
        PricePoint { timestamp: "2024-01-01T00:00:00".into(), price }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(snapshot(0.0, 1.0, 0.5).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_indicator() {
        let err = snapshot(0.5, 1.2, 0.5).validate().unwrap_err();
        assert_eq!(err, ValidationError::IndicatorOutOfRange { name: "eci", value: 1.2 });
        assert!(snapshot(f64::NAN, 0.5, 0.5).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_price() {
        let mut s = snapshot(0.5, 0.5, 0.5);
        s.current_price = 0.0;
        assert!(matches!(s.validate(), Err(ValidationError::InvalidPrice { .. })));

        let mut s = snapshot(0.5, 0.5, 0.5);
        s.price_history = vec![point(100.0), point(-1.0)];
        assert!(matches!(
            s.validate(),
            Err(ValidationError::InvalidHistoryPrice { index: 1, .. })
        ));
    }

    #[test]
    fn test_price_delta() {
        let mut s = snapshot(0.5, 0.5, 0.5);
        assert_eq!(s.price_delta(), 0.0);
        s.price_history = vec![point(40000.0)];
        assert_eq!(s.price_delta(), 0.0);
        s.price_history.push(point(41000.0));
        s.current_price = 42000.0;
        assert!((s.price_delta() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_class() {
        assert_eq!(Confidence::Medium.css_class(), "confidence-medium");
    }

    #[test]
    fn test_parse_backend_payload() {
        let json = r#"{
            "symbol": "ETH",
            "current_price": 2240.0,
            "epi": 0.712,
            "eci": 0.41,
            "etb": 0.66,
            "regime": "Σ₂₃₂₊",
            "recommendation": {
                "action": "ENTER_LONG",
                "confidence": "HIGH",
                "rationale": ["EPI=0.71 confirms persistence", ""]
            }
        }"#;
        let s = parse_snapshot(json).unwrap();
        assert_eq!(s.recommendation.action, ActionCode::EnterLong);
        assert!(s.price_history.is_empty());
        assert_eq!(s.recommendation.rationale.len(), 2);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let json = r#"{"symbol":"X","current_price":1.0,"epi":2.0,"eci":0.1,"etb":0.1,
            "regime":"?","recommendation":{"action":"WAIT","confidence":"LOW","rationale":[]}}"#;
        let err = parse_snapshot(json).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }
}
