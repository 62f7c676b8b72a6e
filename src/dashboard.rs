//! Dashboard view-model assembly.
//!
//! One snapshot in, one view model out. Each panel is computed independently
//! from the snapshot; nothing is cached between calls.

use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::advisory::{advise, Advisory};
use crate::analysis::{analyze, DeepAnalysis};
use crate::catalog::{ActionCatalog, RegimeCatalog};
use crate::chart::{render_series, synthesize_series, RandomSource};
use crate::classify::{indicator_statuses, IndicatorStatus};
use crate::logging::{log_audit, log_chart, log_view_built};
use crate::snapshot::IndicatorSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeDisplay {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryDisplay {
    pub confirmations: Vec<String>,
    pub warnings: Vec<String>,
    /// Glyph-prefixed panel lines, or the single empty-state line.
    pub checklist: Vec<String>,
}

impl From<&Advisory> for AdvisoryDisplay {
    fn from(adv: &Advisory) -> Self {
        Self {
            confirmations: adv.confirmation_texts(),
            warnings: adv.warning_texts(),
            checklist: adv.lines(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationDisplay {
    pub label: String,
    pub confidence_class: String,
    pub rationale: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViewModel {
    pub symbol: String,
    pub current_price: f64,
    pub price_delta: f64,
    pub indicator_statuses: Vec<IndicatorStatus>,
    pub regime_display: RegimeDisplay,
    pub advisory: AdvisoryDisplay,
    pub analysis: DeepAnalysis,
    pub recommendation_display: RecommendationDisplay,
    pub chart: String,
}

pub fn recommendation_display(snapshot: &IndicatorSnapshot) -> RecommendationDisplay {
    let rec = &snapshot.recommendation;
    RecommendationDisplay {
        label: ActionCatalog::display(rec.action.code()).to_string(),
        confidence_class: rec.confidence.css_class(),
        rationale: rec.rationale.iter().filter(|r| !r.is_empty()).cloned().collect(),
    }
}

pub fn build(
    snapshot: &IndicatorSnapshot,
    chart_points: usize,
    rng: &mut dyn RandomSource,
) -> DashboardViewModel {
    let advisory = advise(snapshot);
    let series = synthesize_series(snapshot.epi, chart_points, rng);
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        log_chart(series.len(), *first, *last);
    }

    let view = DashboardViewModel {
        symbol: snapshot.symbol.clone(),
        current_price: snapshot.current_price,
        price_delta: snapshot.price_delta(),
        indicator_statuses: indicator_statuses(snapshot.epi, snapshot.eci, snapshot.etb),
        regime_display: RegimeDisplay {
            code: snapshot.regime.clone(),
            name: RegimeCatalog::display(&snapshot.regime).to_string(),
        },
        advisory: AdvisoryDisplay::from(&advisory),
        analysis: analyze(snapshot),
        recommendation_display: recommendation_display(snapshot),
        chart: render_series(&series),
    };
    log_view_built(
        &view.symbol,
        &view.regime_display.code,
        advisory.confirmations.len(),
        advisory.warnings.len(),
        view.price_delta,
    );
    view
}

fn sha256_json<T: Serialize>(value: &T) -> Result<String> {
    let bytes = serde_json::to_vec(value).context("serializing for digest")?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

impl DashboardViewModel {
    /// SHA-256 of the JSON encoding.
    pub fn digest(&self) -> Result<String> {
        sha256_json(self)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing view model")
    }
}

/// Build and record input/output fingerprints in the audit log.
pub fn build_audited(
    snapshot: &IndicatorSnapshot,
    chart_points: usize,
    rng: &mut dyn RandomSource,
) -> Result<DashboardViewModel> {
    let view = build(snapshot, chart_points, rng);
    log_audit(&view.symbol, &sha256_json(snapshot)?, &view.digest()?);
    Ok(view)
}

impl fmt::Display for DashboardViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.price_delta >= 0.0 { "+" } else { "" };
        writeln!(f, "{}  ${:.2}  {}{:.2}%", self.symbol, self.current_price, sign, self.price_delta)?;
        writeln!(f)?;
        for s in &self.indicator_statuses {
            writeln!(f, "{:<4}{:.3}  {:>5.1}%  {}", s.name, s.value, s.fill_percent, s.status)?;
        }
        writeln!(f, "Regime {}  {}", self.regime_display.code, self.regime_display.name)?;
        writeln!(f)?;
        let rec = &self.recommendation_display;
        writeln!(f, "{}  [{}]", rec.label, rec.confidence_class)?;
        for line in &rec.rationale {
            writeln!(f, "  - {}", line)?;
        }
        writeln!(f)?;
        for line in &self.advisory.checklist {
            writeln!(f, "{}", line)?;
        }
        for alert in self.analysis.alerts() {
            writeln!(f, "! {}", alert)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.chart)
    }
}
