//! Command-line arguments for the holder board.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use waneng_common::Symbol;
use waneng_feed::QuoteSource;

/// Sent when the caller does not provide one; some vendors drop requests
/// without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; waneng-board/0.1)";

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Vendor symbol: exchange prefix plus six digit code.
    #[clap(long, default_value = "sz000543")]
    pub symbol: Symbol,

    /// Which vendor to ask. `auto` tries Tencent, then Sina.
    #[clap(long, value_enum, default_value_t = SourceChoice::Auto)]
    pub source: SourceChoice,

    /// Refresh every N seconds until Ctrl+C. Runs once when omitted.
    #[clap(long)]
    pub watch: Option<u64>,

    /// Give up on a refresh after this many milliseconds.
    #[clap(long, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Print the quote as JSON instead of the holder table.
    #[clap(long)]
    pub json: bool,

    /// User agent sent to the vendors.
    #[clap(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Source selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum SourceChoice {
    /// Tencent first, Sina as fallback.
    Auto,
    /// Sina only.
    Sina,
    /// Tencent only.
    Tencent,
}

impl SourceChoice {
    /// Sources to ask, in order.
    pub fn sources(&self) -> Vec<QuoteSource> {
        match self {
            SourceChoice::Auto => QuoteSource::FALLBACK_ORDER.to_vec(),
            SourceChoice::Sina => vec![QuoteSource::Sina],
            SourceChoice::Tencent => vec![QuoteSource::Tencent],
        }
    }
}
