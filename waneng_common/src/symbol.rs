//! Vendor ticker symbols shared by the feed and the board.
//!
//! Both vendors address a security by exchange prefix plus a six digit code,
//! e.g. `sz000543`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::BoardError;

/// Length of the numeric security code.
const CODE_LEN: usize = 6;

/// Mainland exchanges understood by the quote vendors.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, Hash, Eq, PartialEq,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Exchange {
    /// Shanghai.
    Sh,
    /// Shenzhen.
    Sz,
    /// Beijing.
    Bj,
}

/// Exchange-prefixed security code as the vendors expect it.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Symbol {
    /// Listing exchange.
    pub exchange: Exchange,
    /// Six digit code, e.g. `000543`.
    pub code: String,
}

impl Symbol {
    /// Name of the global binding a vendor script assigns for this symbol.
    pub fn binding_key(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.exchange, self.code)
    }
}

impl FromStr for Symbol {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.is_ascii() || trimmed.len() != 2 + CODE_LEN {
            return Err(BoardError::InvalidSymbol(s.to_string()));
        }
        let (prefix, code) = trimmed.split_at(2);
        let exchange = prefix
            .parse::<Exchange>()
            .map_err(|_| BoardError::InvalidSymbol(s.to_string()))?;
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BoardError::InvalidSymbol(s.to_string()));
        }
        Ok(Symbol {
            exchange,
            code: code.to_string(),
        })
    }
}
