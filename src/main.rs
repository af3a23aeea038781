//! CallRate command-line pricer
//!
//! Prices a single call against the configured rate:
//!
//! ```text
//! callrate 2017-12-12T21:57:13Z 2017-12-13T22:10:56Z
//! ```
//!
//! The rate is read from `config/default`, `config/{RUN_MODE}` and
//! `CALLRATE__*` environment variables. The itemized cost is printed as JSON.

use anyhow::{bail, Context};
use callrate_core::{models::CallSpan, AppConfig};
use callrate_services::CallCostCalculator;
use chrono::{DateTime, Utc};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing(config: &AppConfig) {
    let log_level = &config.logging.level;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "callrate={},callrate_core={},callrate_services={}",
            log_level, log_level, log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so stdout carries only the JSON result
    if config.logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn parse_timestamp(name: &str, value: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("{} must be an RFC 3339 timestamp, got '{}'", name, value))?;
    Ok(parsed.with_timezone(&Utc))
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    info!("Starting CallRate v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = env::args().skip(1).collect();
    let (start, end) = match args.as_slice() {
        [start, end] => (
            parse_timestamp("start", start)?,
            parse_timestamp("end", end)?,
        ),
        _ => bail!("usage: callrate <start> <end>"),
    };

    let rate = config
        .rate_definition()
        .context("Configured rate was rejected")?;
    info!(
        "Using rate: standard {} / reduced {}",
        rate.standard_window(),
        rate.reduced_window()
    );

    let span = CallSpan::new(start, end)?;
    let breakdown = CallCostCalculator::new().breakdown(&span, &rate)?;

    info!(
        "Priced call {} -> {}: {}",
        start.to_rfc3339(),
        end.to_rfc3339(),
        breakdown.total
    );

    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
