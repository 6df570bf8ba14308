//! Text rendering of the holder board.
//!
//! Gains print red and losses green, the A-share convention. Without a quote
//! only the cost side of each position is shown.
use colored::{ColoredString, Colorize};
use waneng_common::{BoardError, Symbol};
use waneng_common::holders::{Holder, HoldingsTable};
use waneng_feed::SourcedQuote;

/// Render the whole board.
pub fn render(table: &HoldingsTable, symbol: &Symbol, quote: Option<&SourcedQuote>) -> String {
    let now = quote.map(|q| q.quote.now);
    let mut lines = vec![header(symbol, quote), "-".repeat(48)];

    for holder in table.holders() {
        lines.extend(holder_block(holder, now));
    }

    lines.push("-".repeat(48));
    lines.push(totals(table, now));
    lines.join("\n")
}

/// The quote as one JSON line; `null` when no source answered.
pub fn render_json(quote: Option<&SourcedQuote>) -> Result<String, BoardError> {
    Ok(serde_json::to_string(&quote)?)
}

fn header(symbol: &Symbol, quote: Option<&SourcedQuote>) -> String {
    match quote {
        Some(sourced) => {
            let q = &sourced.quote;
            let mut line = format!("{} ({})  {:.2}", q.name, symbol, q.now);
            let stamp = q.stamp();
            if !stamp.is_empty() {
                line.push_str(&format!("  {}", stamp));
            }
            line.push_str(&format!("  [{}]", sourced.source));
            line
        }
        None => format!("{}  no quote available", symbol),
    }
}

fn holder_block(holder: &Holder, now: Option<f64>) -> Vec<String> {
    let mut lines = Vec::new();
    let average = holder
        .average_cost()
        .map(|c| format!("{:.4}", c))
        .unwrap_or_else(|| "-".to_string());

    match now {
        Some(now) => {
            let mood = holder.mood(now);
            let mut title = format!("{}  {}", holder.name, mood);
            if let Some(avatar) = holder.avatar_for(mood) {
                title.push_str(&format!("  {}", avatar));
            }
            lines.push(title);
            let ratio = holder
                .profit_ratio(now)
                .map(|r| format!(" ({})", signed(r * 100.0, "%")))
                .unwrap_or_default();
            lines.push(format!(
                "  shares {}  avg {}  value {:.2}  p/l {}{}",
                holder.total_shares(),
                average,
                holder.market_value(now),
                signed(holder.profit(now), ""),
                ratio
            ));
        }
        None => {
            lines.push(holder.name.to_string());
            lines.push(format!(
                "  shares {}  avg {}  cost {:.2}",
                holder.total_shares(),
                average,
                holder.cost_basis()
            ));
        }
    }

    let trades = holder.trade_summary();
    if !trades.is_empty() {
        lines.push(format!("  trades: {}", trades.join(" | ")));
    }
    lines
}

fn totals(table: &HoldingsTable, now: Option<f64>) -> String {
    match now {
        Some(now) => format!(
            "total shares {}  cost {:.2}  p/l {}",
            table.total_shares(),
            table.cost_basis(),
            signed(table.profit(now), "")
        ),
        None => format!(
            "total shares {}  cost {:.2}",
            table.total_shares(),
            table.cost_basis()
        ),
    }
}

fn signed(value: f64, suffix: &str) -> ColoredString {
    let text = format!("{:+.2}{}", value, suffix);
    if value > 0.0 {
        text.red()
    } else if value < 0.0 {
        text.green()
    } else {
        text.normal()
    }
}
