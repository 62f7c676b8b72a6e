//! Deep-analysis panel verdicts.

use serde::Serialize;

use crate::snapshot::IndicatorSnapshot;

pub const EXHAUSTION_EPI: f64 = 0.82;
pub const CRITICAL_THRESHOLD: f64 = 0.80;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalityReport {
    pub current: f64,
    pub threshold: f64,
    /// Positive while below the critical threshold.
    pub distance: f64,
    pub distance_favorable: bool,
    pub near_threshold: bool,
}

/// Indicative composition of the price network, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopologyMix {
    pub tree: f64,
    pub lattice: f64,
    pub loops: f64,
}

pub const INDICATIVE_MIX: TopologyMix = TopologyMix { tree: 35.0, lattice: 38.0, loops: 27.0 };

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub balanced: bool,
    pub mix: TopologyMix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepAnalysis {
    pub exhaustion_alert: bool,
    pub criticality: CriticalityReport,
    pub structure: StructureReport,
}

impl DeepAnalysis {
    pub fn alerts(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.exhaustion_alert {
            out.push("EPI near exhaustion zone (0.85)");
        }
        out.push(if self.criticality.near_threshold {
            "System close to critical threshold"
        } else {
            "System stable, far from threshold"
        });
        out.push(if self.structure.balanced {
            "Balanced structure supports trend"
        } else {
            "Structure not optimal"
        });
        out
    }
}

pub fn analyze(snapshot: &IndicatorSnapshot) -> DeepAnalysis {
    let eci = snapshot.eci;
    DeepAnalysis {
        exhaustion_alert: snapshot.epi > EXHAUSTION_EPI,
        criticality: CriticalityReport {
            current: eci,
            threshold: CRITICAL_THRESHOLD,
            distance: CRITICAL_THRESHOLD - eci,
            distance_favorable: eci < 0.6,
            near_threshold: eci > 0.75,
        },
        structure: StructureReport { balanced: snapshot.etb > 0.6, mix: INDICATIVE_MIX },
    }
}
