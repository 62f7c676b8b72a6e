//! EAR indicator advisory core.
//!
//! Turns one indicator snapshot (persistence, criticality, topology balance,
//! regime and recommendation) into the panels of the trading dashboard:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Snapshot   │────►│  Classifier  │────►│              │
//! │  (validated) │──┬─►│  Advisory    │────►│  View model  │
//! └──────────────┘  ├─►│  Catalogs    │────►│   (serde)    │
//!                   └─►│  Trend chart │────►│              │
//!                      └──────────────┘     └──────────────┘
//! ```
//!
//! Every stage is a pure function of the snapshot. The trend chart takes its
//! jitter from an injected [`chart::RandomSource`].

pub mod advisory;
pub mod analysis;
pub mod catalog;
pub mod chart;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod policy;
pub mod snapshot;
