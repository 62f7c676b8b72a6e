//! Trade assistant checklist.
//!
//! Each indicator contributes exactly one verdict. Criticality's middle band
//! counts as a warning while the middle bands of persistence and topology
//! balance count as confirmations; downstream displays depend on this split.

use std::fmt;

use serde::Serialize;

use crate::snapshot::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Confirm,
    Neutral,
    Warn,
}

impl Marker {
    pub fn glyph(&self) -> &'static str {
        match self {
            Marker::Confirm => "✓",
            Marker::Neutral => "○",
            Marker::Warn => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub marker: Marker,
    pub indicator: &'static str,
    pub value: f64,
    pub phrase: &'static str,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.2} {}", self.indicator, self.value, self.phrase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Verdict {
    Confirmation(Annotation),
    Warning(Annotation),
}

impl Verdict {
    pub fn annotation(&self) -> &Annotation {
        match self {
            Verdict::Confirmation(a) | Verdict::Warning(a) => a,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Verdict::Warning(_))
    }
}

fn confirm(indicator: &'static str, value: f64, phrase: &'static str) -> Verdict {
    Verdict::Confirmation(Annotation { marker: Marker::Confirm, indicator, value, phrase })
}

fn neutral(indicator: &'static str, value: f64, phrase: &'static str) -> Verdict {
    Verdict::Confirmation(Annotation { marker: Marker::Neutral, indicator, value, phrase })
}

fn warn(indicator: &'static str, value: f64, marker: Marker, phrase: &'static str) -> Verdict {
    Verdict::Warning(Annotation { marker, indicator, value, phrase })
}

pub fn persistence_verdict(epi: f64) -> Verdict {
    if epi > 0.70 {
        confirm("EPI", epi, "confirms trend")
    } else if epi < 0.55 {
        warn("EPI", epi, Marker::Warn, "(ranging, no trend)")
    } else {
        neutral("EPI", epi, "(moderate)")
    }
}

pub fn criticality_verdict(eci: f64) -> Verdict {
    if eci < 0.60 {
        confirm("ECI", eci, "far from threshold")
    } else if eci > 0.75 {
        warn("ECI", eci, Marker::Warn, "(threshold imminent)")
    } else {
        warn("ECI", eci, Marker::Neutral, "(caution)")
    }
}

pub fn topology_verdict(etb: f64) -> Verdict {
    if etb > 0.60 {
        confirm("ETB", etb, "healthy structure")
    } else if etb < 0.40 {
        warn("ETB", etb, Marker::Warn, "(degraded structure)")
    } else {
        neutral("ETB", etb, "(moderate)")
    }
}

/// Checklist split into confirmations and warnings, each in indicator order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Advisory {
    pub confirmations: Vec<Verdict>,
    pub warnings: Vec<Verdict>,
}

/// What the assistant panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Checklist<'a> {
    Items(Vec<&'a Verdict>),
    Empty,
}

pub const EMPTY_CHECKLIST: &str = "No information available";

impl Advisory {
    pub fn from_verdicts(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        let (warnings, confirmations) = verdicts.into_iter().partition(Verdict::is_warning);
        Self { confirmations, warnings }
    }

    pub fn len(&self) -> usize {
        self.confirmations.len() + self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Confirmations first, then warnings.
    pub fn checklist(&self) -> Checklist<'_> {
        if self.is_empty() {
            return Checklist::Empty;
        }
        Checklist::Items(self.confirmations.iter().chain(self.warnings.iter()).collect())
    }

    /// Panel lines with their glyph, or the empty-state line.
    pub fn lines(&self) -> Vec<String> {
        match self.checklist() {
            Checklist::Empty => vec![EMPTY_CHECKLIST.to_string()],
            Checklist::Items(items) => items
                .into_iter()
                .map(|v| {
                    let a = v.annotation();
                    format!("{} {}", a.marker.glyph(), a)
                })
                .collect(),
        }
    }

    pub fn confirmation_texts(&self) -> Vec<String> {
        self.confirmations.iter().map(|v| v.annotation().to_string()).collect()
    }

    pub fn warning_texts(&self) -> Vec<String> {
        self.warnings.iter().map(|v| v.annotation().to_string()).collect()
    }
}

pub fn advise(snapshot: &IndicatorSnapshot) -> Advisory {
    Advisory::from_verdicts([
        persistence_verdict(snapshot.epi),
        criticality_verdict(snapshot.eci),
        topology_verdict(snapshot.etb),
    ])
}
