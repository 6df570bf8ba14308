//! Live quotes for the holder board.
//!
//! Two vendors publish the current price of an A-share only as a script that
//! assigns a string to a global (`hq_str_<symbol>` for Sina, `v_<symbol>` for
//! Tencent). This crate wires together:
//!
//! - `script` — `ScriptLoader` fetches a vendor script and evaluates its string
//!   assignments into a per-call `BindingScope`.
//! - `sina` / `tencent` — pure, total parsers for each vendor's record format
//!   plus thin fetch helpers.
//! - `source` — `QuoteSource` and `QuoteFeed`, which asks the vendors in order.
//!
//! Every fetch resolves to `Option<Quote>`: transport failures and malformed
//! payloads are logged and come back as `None`. Nothing is retried and no
//! timeout is applied here; callers drive refresh and cancellation.
#![warn(missing_docs)]
pub mod script;
pub mod sina;
pub mod source;
pub mod tencent;

#[cfg(test)]
mod test_server;

pub use script::ScriptLoader;
pub use source::{QuoteFeed, QuoteSource, SourcedQuote};
