//! Holder board — prints the compiled-in holdings of 皖能电力 valued at the
//! live price. The quote comes from the Tencent script endpoint and falls back
//! to Sina when Tencent has nothing usable.
//!
//! Usage example (CLI):
//! ```bash
//! waneng_board --symbol sz000543 --watch 10
//! ```
//!
//! Without `--watch` the board is printed once. With it the board refreshes on
//! the given interval until Ctrl+C. Each refresh is bounded by `--timeout-ms`;
//! a refresh that times out or finds no quote still prints the cost side.
#![warn(missing_docs)]
mod args;
mod board;

use crate::args::Args;
use clap::Parser;
use log::{info, warn};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{MissedTickBehavior, interval, timeout};
use waneng_common::holders::HoldingsTable;
use waneng_common::{BoardError, Result};
use waneng_feed::{QuoteFeed, ScriptLoader, SourcedQuote};

/// Fetch once and print the board (or the JSON quote).
async fn refresh(feed: &QuoteFeed, table: &HoldingsTable, args: &Args) -> Result<(), BoardError> {
    let limit = Duration::from_millis(args.timeout_ms);
    let quote: Option<SourcedQuote> = match timeout(limit, feed.quote(&args.symbol)).await {
        Ok(quote) => quote,
        Err(_) => {
            warn!("Quote for {} timed out after {:?}", args.symbol, limit);
            None
        }
    };

    if args.json {
        println!("{}", board::render_json(quote.as_ref())?);
    } else {
        println!("{}\n", board::render(table, &args.symbol, quote.as_ref()));
    }
    Ok(())
}

/// Refresh every `secs` seconds until Ctrl+C.
async fn watch(
    feed: &QuoteFeed,
    table: &HoldingsTable,
    args: &Args,
    secs: u64,
) -> Result<(), BoardError> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let wake = Arc::new(Notify::new());
    {
        let shutdown = shutdown.clone();
        let wake = wake.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Stopping the board...");
            shutdown.store(true, Ordering::SeqCst);
            wake.notify_one();
        })
        .map_err(|e| BoardError::Signal(e.to_string()))?;
    }

    let mut ticker = interval(Duration::from_secs(secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("Refreshing {} every {}s. Press Ctrl+C to exit.", args.symbol, secs.max(1));

    while !shutdown.load(Ordering::Relaxed) {
        tokio::select! {
            _ = ticker.tick() => refresh(feed, table, args).await?,
            _ = wake.notified() => break,
        }
    }
    info!("Board stopped.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoardError> {
    init_logger();
    let args = Args::parse();
    let sources = args.source.sources();
    info!("Symbol {} from {:?}", args.symbol, sources);

    let feed = QuoteFeed::new(ScriptLoader::new(&args.user_agent)?, &sources);
    let table = HoldingsTable::builtin();

    match args.watch {
        Some(secs) => watch(&feed, &table, &args, secs).await,
        None => refresh(&feed, &table, &args).await,
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
