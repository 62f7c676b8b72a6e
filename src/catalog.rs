//! Display catalogs for regime and action codes.
//!
//! Both tables fall back to the code itself on a miss so that codes added
//! upstream still reach the screen.

use serde::{Deserialize, Serialize};

/// Known market regimes, in the order the regime policy checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegimeCode {
    Spiral,
    Advance,
    Expansion,
    Continuity,
    Event,
    Dissolution,
    Transition,
}

impl RegimeCode {
    pub const ALL: [RegimeCode; 7] = [
        RegimeCode::Spiral,
        RegimeCode::Advance,
        RegimeCode::Expansion,
        RegimeCode::Continuity,
        RegimeCode::Event,
        RegimeCode::Dissolution,
        RegimeCode::Transition,
    ];

    /// Symbolic code as sent over the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Spiral => "Σ₂₃₂₊",
            Self::Advance => "Σ₁₃₁₊",
            Self::Expansion => "Σ₃₃₁₊",
            Self::Continuity => "Σ₁₁₁₋",
            Self::Event => "Σ₄₁₃₊",
            Self::Dissolution => "Σ₃₃₃₋",
            Self::Transition => "Σ₁₂₃₊",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spiral => "Spiral (persistent trend)",
            Self::Advance => "Advance (early trend)",
            Self::Expansion => "Expansion (exhaustion)",
            Self::Continuity => "Continuity (ranging)",
            Self::Event => "Event (pre-breakout)",
            Self::Dissolution => "Dissolution (breakdown)",
            Self::Transition => "Transition (uncertain)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }
}

pub struct RegimeCatalog;

impl RegimeCatalog {
    pub fn display(code: &str) -> &str {
        match RegimeCode::from_code(code) {
            Some(regime) => regime.name(),
            None => code,
        }
    }
}

/// Recommended trading action. Unknown wire codes are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionCode {
    EnterLong,
    Exit,
    Hold,
    Wait,
    ReduceHalf,
    PrepareBreakout,
    Other(String),
}

impl ActionCode {
    pub fn code(&self) -> &str {
        match self {
            Self::EnterLong => "ENTER_LONG",
            Self::Exit => "EXIT",
            Self::Hold => "HOLD",
            Self::Wait => "WAIT",
            Self::ReduceHalf => "REDUCE_50%",
            Self::PrepareBreakout => "PREPARE_BREAKOUT",
            Self::Other(code) => code.as_str(),
        }
    }

    pub fn parse(code: &str) -> Self {
        match code {
            "ENTER_LONG" => Self::EnterLong,
            "EXIT" => Self::Exit,
            "HOLD" => Self::Hold,
            "WAIT" => Self::Wait,
            "REDUCE_50%" => Self::ReduceHalf,
            "PREPARE_BREAKOUT" => Self::PrepareBreakout,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ActionCode {
    fn from(code: String) -> Self {
        match Self::parse(&code) {
            Self::Other(_) => Self::Other(code),
            known => known,
        }
    }
}

impl From<ActionCode> for String {
    fn from(action: ActionCode) -> Self {
        action.code().to_string()
    }
}

pub struct ActionCatalog;

impl ActionCatalog {
    pub fn display(code: &str) -> &str {
        Self::label(&ActionCode::parse(code)).unwrap_or(code)
    }

    /// Display label, or `None` for codes outside the table.
    pub fn label(action: &ActionCode) -> Option<&'static str> {
        let label = match action {
            ActionCode::EnterLong => "🟢 ENTER LONG",
            ActionCode::Exit => "🔴 EXIT",
            ActionCode::Hold => "⏸️ HOLD",
            ActionCode::Wait => "⏳ WAIT",
            ActionCode::ReduceHalf => "⚠️ REDUCE 50%",
            ActionCode::PrepareBreakout => "⚡ PREPARE BREAKOUT",
            ActionCode::Other(_) => return None,
        };
        Some(label)
    }
}
