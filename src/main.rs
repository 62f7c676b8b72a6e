use std::path::PathBuf;

use anyhow::Result;
use eartrader::chart::RngSource;
use eartrader::config::{Config, OutputFormat};
use eartrader::dashboard::build_audited;
use eartrader::logging::{log_config, v_num, v_str};
use eartrader::policy::reassess;
use eartrader::snapshot::load_snapshot;
use serde_json::json;

fn main() -> Result<()> {
    let mut cfg = Config::from_env();
    if let Some(path) = std::env::args().nth(1) {
        cfg.snapshot_path = PathBuf::from(path);
    }
    log_config(&[
        ("snapshot_path", v_str(&cfg.snapshot_path.to_string_lossy())),
        ("chart_points", json!(cfg.chart_points)),
        ("chart_seed", cfg.chart_seed.map(|s| json!(s)).unwrap_or(serde_json::Value::Null)),
        ("poll_secs", v_num(cfg.poll_secs as f64)),
        ("output", v_str(cfg.output.as_str())),
        ("position", v_str(cfg.position.map(|p| p.as_str()).unwrap_or("flat"))),
    ]);

    let mut snapshot = load_snapshot(&cfg.snapshot_path)?;
    if let Some(position) = cfg.position {
        snapshot.recommendation = reassess(&snapshot, Some(position));
    }
    let mut rng = match cfg.chart_seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let view = build_audited(&snapshot, cfg.chart_points, &mut rng)?;

    match cfg.output {
        OutputFormat::Json => println!("{}", view.to_json()?),
        OutputFormat::Text => println!("{}", view),
    }
    Ok(())
}
