//! ODDS APEX — Over/Under 2.5 fair-price model and back/lay advisor.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! then either serves the dashboard form or evaluates one request read
//! from a JSON file (first argument) or stdin.

use anyhow::{Context, Result};
use std::io::Read;
use std::sync::Arc;
use tracing::info;

use odds_apex::config::{self, AppConfig};
use odds_apex::dashboard::{self, routes::DashboardState};
use odds_apex::engine::input::CalculationRequest;
use odds_apex::engine::{report, Calculator};

const BANNER: &str = r#"
  ___  ____  ____  ____       _    ____  _______  __
 / _ \|  _ \|  _ \/ ___|     / \  |  _ \| ____\ \/ /
| | | | | | | | | \___ \    / _ \ | |_) |  _|  \  /
| |_| | |_| | |_| |___) |  / ___ \|  __/| |___ /  \
 \___/|____/|____/|____/  /_/   \_\_|   |_____/_/\_\

  Over/Under fair price · back/lay advisor
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path =
        std::env::var("ODDS_APEX_CONFIG").unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = AppConfig::load_or_default(&config_path)?;

    init_logging(&cfg);

    let calculator = Calculator::new(cfg.model.clone(), cfg.strategy.clone());

    // One-shot mode: evaluate a request file and exit.
    if let Some(path) = std::env::args().nth(1) {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request file: {path}"))?;
        return run_once(&calculator, &raw);
    }

    if !cfg.dashboard.enabled {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read request from stdin")?;
        return run_once(&calculator, &raw);
    }

    println!("{BANNER}");
    info!(
        name = %cfg.service.name,
        market = %cfg.model.market_label(),
        commission = cfg.strategy.commission,
        edge_threshold = cfg.strategy.edge_threshold,
        ev_threshold = cfg.strategy.ev_threshold,
        "ODDS APEX starting up"
    );

    let state = Arc::new(DashboardState::new(cfg.service.name.clone(), calculator));
    dashboard::serve_dashboard(state, cfg.dashboard.port).await?;

    info!("ODDS APEX shut down cleanly.");
    Ok(())
}

/// Evaluate one JSON request and print the report.
fn run_once(calculator: &Calculator, raw: &str) -> Result<()> {
    let request: CalculationRequest =
        serde_json::from_str(raw).context("Failed to parse calculation request JSON")?;
    let result = calculator.calculate(&request);
    println!("{}", report::to_text(&report::render_result(&result)));
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging(cfg: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("odds_apex=info"));

    let json_logging = cfg.service.log_json || std::env::var("ODDS_APEX_LOG_JSON").is_ok();

    // Logs go to stderr so one-shot reports on stdout stay clean.
    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
