//! Structured JSON-lines logging.
//!
//! Records are written to stderr, one object per line, so that stdout stays
//! free for the view-model output. Filtering is driven by `LOG_LEVEL` and
//! `LOG_DOMAINS` (comma-separated, or "all").

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::snapshot::ValidationError;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| Level::parse(&v))
            .unwrap_or(Level::Info)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Ingest,   // Snapshot decoding and validation
    Advisory, // Classification, checklist, analysis
    Chart,    // Trend chart synthesis
    System,   // Startup, configuration
    Audit,    // View-model fingerprints
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Ingest => "ingest",
            Domain::Advisory => "advisory",
            Domain::Chart => "chart",
            Domain::System => "system",
            Domain::Audit => "audit",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    let line = record(level, domain, event, fields).to_string();
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle, "{}", line);
}

fn record(level: Level, domain: Domain, event: &str, mut fields: Map<String, Value>) -> Value {
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    if let Some(symbol) = fields.remove("symbol") {
        entry.insert("symbol".to_string(), symbol);
    }
    entry.insert("data".to_string(), Value::Object(fields));
    Value::Object(entry)
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_snapshot_rejected(symbol: &str, err: &ValidationError) {
    log(
        Level::Warn,
        Domain::Ingest,
        "snapshot_rejected",
        obj(&[("symbol", v_str(symbol)), ("reason", v_str(&err.to_string()))]),
    );
}

pub fn log_config(fields: &[(&str, Value)]) {
    log(Level::Info, Domain::System, "config", obj(fields));
}

pub fn log_view_built(
    symbol: &str,
    regime: &str,
    confirmations: usize,
    warnings: usize,
    price_delta: f64,
) {
    log(
        Level::Debug,
        Domain::Advisory,
        "view_built",
        obj(&[
            ("symbol", v_str(symbol)),
            ("regime", v_str(regime)),
            ("confirmations", json!(confirmations)),
            ("warnings", json!(warnings)),
            ("price_delta", v_num(price_delta)),
        ]),
    );
}

pub fn log_chart(points: usize, first: f64, last: f64) {
    log(
        Level::Trace,
        Domain::Chart,
        "series",
        obj(&[
            ("points", json!(points)),
            ("first", v_num(first)),
            ("last", v_num(last)),
        ]),
    );
}

/// Log a view-model fingerprint for replay comparison
pub fn log_audit(symbol: &str, input_hash: &str, output_hash: &str) {
    log(
        Level::Info,
        Domain::Audit,
        "view_digest",
        obj(&[
            ("symbol", v_str(symbol)),
            ("input_hash", v_str(input_hash)),
            ("output_hash", v_str(output_hash)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("warn"), Some(Level::Warn));
        assert_eq!(Level::parse("loud"), None);
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(42.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42.0);
    }

    #[test]
    fn test_record_shape() {
        let rec = record(
            Level::Warn,
            Domain::Ingest,
            "snapshot_rejected",
            obj(&[("symbol", v_str("BTC")), ("reason", v_str("bad"))]),
        );
        assert_eq!(rec["lvl"], "WARN");
        assert_eq!(rec["component"], "ingest");
        assert_eq!(rec["symbol"], "BTC");
        assert_eq!(rec["data"]["reason"], "bad");
        assert!(rec["data"].get("symbol").is_none());
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }
}
