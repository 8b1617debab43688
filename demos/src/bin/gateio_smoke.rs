//! Gate.io futures smoke test
//!
//! Hits a handful of public endpoints, then the account endpoints when
//! `GATE_API_KEY` / `GATE_API_SECRET` are set (read from `.env.local` too).
//!
//! Run: cargo run --bin gateio_smoke

use std::time::Duration;

use chrono::{TimeZone, Utc};
use colored::*;
use perp_gateio::{CandleQuery, GateClient, RestResult};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONTRACT: &str = "BTC_USDT";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::from_filename(".env.local");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  GATE.IO FUTURES SMOKE TEST".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    match tokio::time::timeout(Duration::from_secs(45), run()).await {
        Ok(Ok(())) => println!("\n{} Done", "✓".green()),
        Ok(Err(e)) => {
            warn!(error = %e, retryable = e.is_retryable(), "Smoke test failed");
            println!("\n{} {}", "✗".red(), e);
        }
        Err(_) => {
            warn!("Smoke test timed out");
            println!("\n{} Gave up after 45s", "✗".red());
        }
    }

    Ok(())
}

async fn run() -> RestResult<()> {
    info!(contract = CONTRACT, "Running public calls");
    let public = GateClient::new()?;

    let tickers = public.get_tickers(Some(CONTRACT)).await?;
    if let Some(ticker) = tickers.first() {
        println!(
            "  {:<12} last {:>12} mark {:>12} funding {:>10}",
            ticker.contract.cyan(),
            ticker.last,
            ticker.mark_price,
            ticker.funding_rate
        );
    }

    let book = public.get_order_book(CONTRACT, Some(5)).await?;
    println!(
        "  {:<12} bid {:>12} ask {:>12} spread {}",
        CONTRACT.cyan(),
        fmt_opt(book.best_bid()),
        fmt_opt(book.best_ask()),
        fmt_opt(book.spread())
    );

    let candles = public
        .market()
        .candlesticks(CONTRACT, &CandleQuery::new().interval("1h").limit(3))
        .await?;
    for candle in &candles {
        let time = Utc
            .timestamp_opt(candle.t, 0)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {} close {}", time.white(), candle.c);
    }

    let client = match GateClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            info!(reason = %e, "Skipping private calls");
            println!("\n  {} No credentials, skipping private calls", "•".yellow());
            return Ok(());
        }
    };

    info!("Running private calls");
    println!();
    let account = client.get_account().await?;
    println!(
        "  {} total {} available {}",
        account.currency.cyan(),
        account.total,
        account.available
    );

    for position in client.get_positions().await? {
        if position.is_flat() {
            continue;
        }
        println!(
            "  {:<12} size {:>8} entry {:>12} liq {:>12}",
            position.contract.cyan(),
            position.size,
            fmt_opt(position.entry()),
            fmt_opt(position.liquidation())
        );
    }

    Ok(())
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
