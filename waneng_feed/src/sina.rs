//! Vendor A (Sina) quotes.
//!
//! The script assigns a comma separated record to `hq_str_<symbol>`:
//! `皖能电力,8.65,8.70,8.72,8.75,8.62,...,2026-01-21,15:00:03,00`.
//! Field 0 is the name, field 3 the last price, fields 30 and 31 the date and
//! time of the last trade.
use log::warn;
use waneng_common::net::Endpoint;
use waneng_common::quote::parse_price;
use waneng_common::{Quote, Symbol};

use crate::script::ScriptLoader;

/// Shorter records are truncated or not a quote at all.
const MIN_FIELDS: usize = 32;
const NAME: usize = 0;
const PRICE: usize = 3;
const DATE: usize = 30;
const TIME: usize = 31;

/// Parse a vendor A record.
pub fn parse(raw: &str) -> Option<Quote> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() < MIN_FIELDS {
        return None;
    }
    let field = |i: usize| parts.get(i).copied().unwrap_or_default().to_string();
    let now = parse_price(parts[PRICE])?;

    Some(Quote {
        raw: raw.to_string(),
        name: field(NAME),
        now,
        date: field(DATE),
        time: field(TIME),
    })
}

/// Fetch `symbol` from a vendor A compatible `endpoint`.
pub async fn fetch_from(
    loader: &ScriptLoader,
    endpoint: &Endpoint,
    symbol: &Symbol,
) -> Option<Quote> {
    let raw = loader.load(endpoint, symbol).await?;
    let quote = parse(&raw);
    if quote.is_none() {
        warn!("Unparseable Sina record for {}: {}", symbol, raw);
    }
    quote
}
