//!
//! Common types and utilities shared by the quote feed and the holder board.
//!
//! This crate aggregates:
//! - `error` — unified error type `BoardError` used across the workspace.
//! - `result` — handy `Result<T, BoardError>` alias.
//! - `symbol` — exchange-prefixed vendor symbols.
//! - `quote` — the `Quote` snapshot both vendors parse into.
//! - `holders` — the compiled-in holdings table and position arithmetic.
//! - `net` — vendor endpoints and request helpers.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod symbol;
pub mod quote;
pub mod holders;
pub mod net;

pub use error::BoardError;
pub use result::Result;
pub use quote::Quote;
pub use symbol::Symbol;
