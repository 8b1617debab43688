//! XT.com futures smoke test
//!
//! Hits a handful of public endpoints, then the account endpoints when
//! `XT_API_KEY` / `XT_API_SECRET` are set (read from `.env.local` too).
//!
//! Run: cargo run --bin xt_smoke

use std::time::Duration;

use chrono::{TimeZone, Utc};
use colored::*;
use perp_xt::{KlineQuery, RestResult, XtClient};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SYMBOL: &str = "btc_usdt";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::from_filename(".env.local");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  XT.COM FUTURES SMOKE TEST".cyan().bold());
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
    info!(symbol = SYMBOL, "Running public calls");
    let public = XtClient::new()?;
    let market = public.market();

    let server_time = market.server_time().await?;
    println!("  server time {}", server_time.to_string().white());

    let ticker = public.get_ticker(SYMBOL).await?;
    println!(
        "  {:<12} last {:>12} 24h {:>8.2}%",
        ticker.symbol.cyan(),
        ticker.close,
        ticker.change * Decimal::ONE_HUNDRED
    );

    let depth = public.get_depth(SYMBOL, 5).await?;
    println!(
        "  {:<12} bid {:>12} ask {:>12} spread {}",
        SYMBOL.cyan(),
        fmt_opt(depth.best_bid()),
        fmt_opt(depth.best_ask()),
        fmt_opt(depth.spread())
    );

    let funding = market.funding_rate(SYMBOL).await?;
    println!("  {:<12} funding {}", SYMBOL.cyan(), funding.funding_rate);

    for kline in market.klines(SYMBOL, &KlineQuery::new("1h").limit(3)).await? {
        let time = Utc
            .timestamp_millis_opt(kline.time)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {} close {}", time.white(), kline.close);
    }

    let client = match XtClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            info!(reason = %e, "Skipping private calls");
            println!("\n  {} No credentials, skipping private calls", "•".yellow());
            return Ok(());
        }
    };

    info!("Running private calls");
    println!();
    for balance in client.get_balances().await? {
        println!(
            "  {:<8} wallet {:>14} available {:>14}",
            balance.coin.cyan(),
            balance.wallet_balance,
            balance.available_balance
        );
    }

    for position in client.get_positions().await? {
        if position.is_flat() {
            continue;
        }
        println!(
            "  {:<12} {:<5} size {:>8} entry {:>12} liq {:>12}",
            position.symbol.cyan(),
            position.position_side,
            position.position_size,
            position.entry_price,
            fmt_opt(position.liquidation())
        );
    }

    Ok(())
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
