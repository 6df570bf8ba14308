//! Vendor B (Tencent) quotes.
//!
//! The script assigns a tilde separated record to `v_<symbol>`:
//! `51~皖能电力~000543~8.72~8.70~8.71~...~20260121150003~...`.
//! Name and price sit at fields 1 and 3. The trade timestamp has moved between
//! format revisions, so it is located by shape (the first field of exactly 14
//! digits) rather than by index.
use log::warn;
use waneng_common::net::Endpoint;
use waneng_common::quote::parse_price;
use waneng_common::{Quote, Symbol};

use crate::script::ScriptLoader;

const MIN_FIELDS: usize = 6;
const NAME: usize = 1;
const PRICE: usize = 3;
/// `YYYYMMDDHHMMSS`
const STAMP_LEN: usize = 14;

/// Parse a vendor B record.
pub fn parse(raw: &str) -> Option<Quote> {
    let parts: Vec<&str> = raw.split('~').collect();
    if parts.len() < MIN_FIELDS {
        return None;
    }
    let now = parse_price(parts[PRICE])?;
    let (date, time) = parts
        .iter()
        .find_map(|p| split_stamp(p))
        .unwrap_or_default();

    Some(Quote {
        raw: raw.to_string(),
        name: parts[NAME].to_string(),
        now,
        date,
        time,
    })
}

/// `20260121150003` -> (`2026-01-21`, `15:00:03`); anything else -> `None`.
pub fn split_stamp(field: &str) -> Option<(String, String)> {
    if field.len() != STAMP_LEN || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = format!("{}-{}-{}", &field[0..4], &field[4..6], &field[6..8]);
    let time = format!("{}:{}:{}", &field[8..10], &field[10..12], &field[12..14]);
    Some((date, time))
}

/// Fetch `symbol` from a vendor B compatible `endpoint`.
pub async fn fetch_from(
    loader: &ScriptLoader,
    endpoint: &Endpoint,
    symbol: &Symbol,
) -> Option<Quote> {
    let raw = loader.load(endpoint, symbol).await?;
    let quote = parse(&raw);
    if quote.is_none() {
        warn!("Unparseable Tencent record for {}: {}", symbol, raw);
    }
    quote
}
