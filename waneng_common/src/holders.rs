//! Hand-maintained holdings table.
//!
//! Current positions are exactly what each holder's `lots` state. The `trades`
//! list annotates the display and is never folded into a position: lots are
//! edited offline after a trade settles.

use serde::Serialize;
use strum_macros::Display;

/// One purchase that still makes up the current position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuyLot {
    /// Price paid per share.
    pub price: f64,
    /// Shares still held from this purchase.
    pub shares: u64,
}

/// Direction of a recorded trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Side {
    /// Shares bought.
    Buy,
    /// Shares sold.
    Sell,
}

/// A display-only trade record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trade {
    /// Buy or sell.
    pub side: Side,
    /// Execution price per share.
    pub price: f64,
    /// Shares traded.
    pub shares: u64,
}

/// How a holder is doing at a given price; picks the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Mood {
    /// In profit.
    Laugh,
    /// Under water.
    Cry,
    /// Exactly at cost, or nothing held.
    Calm,
}

/// A person and their position.
#[derive(Debug, Clone, Serialize)]
pub struct Holder {
    /// Display name.
    pub name: &'static str,
    /// Default avatar.
    pub avatar: Option<&'static str>,
    /// Avatar shown while losing money.
    pub cry_avatar: Option<&'static str>,
    /// Avatar shown while making money.
    pub laugh_avatar: Option<&'static str>,
    /// Authoritative position.
    pub lots: &'static [BuyLot],
    /// Trade history for annotation only.
    pub trades: &'static [Trade],
}

impl Holder {
    /// Shares currently held, from lots only.
    pub fn total_shares(&self) -> u64 {
        self.lots.iter().map(|lot| lot.shares).sum()
    }

    /// Amount paid for the current position.
    pub fn cost_basis(&self) -> f64 {
        self.lots
            .iter()
            .map(|lot| lot.price * lot.shares as f64)
            .sum()
    }

    /// Weighted average price paid, `None` when nothing is held.
    pub fn average_cost(&self) -> Option<f64> {
        let shares = self.total_shares();
        if shares == 0 {
            return None;
        }
        Some(self.cost_basis() / shares as f64)
    }

    /// Value of the position at `now`.
    pub fn market_value(&self, now: f64) -> f64 {
        self.total_shares() as f64 * now
    }

    /// Unrealised profit (negative for a loss) at `now`.
    pub fn profit(&self, now: f64) -> f64 {
        self.market_value(now) - self.cost_basis()
    }

    /// Profit relative to cost basis, `None` when the basis is zero.
    pub fn profit_ratio(&self, now: f64) -> Option<f64> {
        let basis = self.cost_basis();
        if basis == 0.0 {
            return None;
        }
        Some(self.profit(now) / basis)
    }

    /// Mood at `now`.
    pub fn mood(&self, now: f64) -> Mood {
        let profit = self.profit(now);
        if profit > 0.0 {
            Mood::Laugh
        } else if profit < 0.0 {
            Mood::Cry
        } else {
            Mood::Calm
        }
    }

    /// Avatar for `mood`, falling back to the default one.
    pub fn avatar_for(&self, mood: Mood) -> Option<&'static str> {
        let special = match mood {
            Mood::Laugh => self.laugh_avatar,
            Mood::Cry => self.cry_avatar,
            Mood::Calm => None,
        };
        special.or(self.avatar)
    }

    /// One annotation line per recorded trade, e.g. `SELL 2050 @ 8.06`.
    pub fn trade_summary(&self) -> Vec<String> {
        self.trades
            .iter()
            .map(|t| format!("{} {} @ {}", t.side, t.shares, t.price))
            .collect()
    }
}

/// Ordered list of holders.
#[derive(Debug, Clone, Copy)]
pub struct HoldingsTable {
    holders: &'static [Holder],
}

impl HoldingsTable {
    /// Wrap a holder list.
    pub const fn new(holders: &'static [Holder]) -> Self {
        HoldingsTable { holders }
    }

    /// The compiled-in table.
    pub const fn builtin() -> Self {
        HoldingsTable::new(HOLDERS)
    }

    /// Holders in display order.
    pub fn holders(&self) -> &'static [Holder] {
        self.holders
    }

    /// Shares held across all holders.
    pub fn total_shares(&self) -> u64 {
        self.holders.iter().map(Holder::total_shares).sum()
    }

    /// Combined cost basis.
    pub fn cost_basis(&self) -> f64 {
        self.holders.iter().map(Holder::cost_basis).sum()
    }

    /// Combined profit at `now`.
    pub fn profit(&self, now: f64) -> f64 {
        self.holders.iter().map(|h| h.profit(now)).sum()
    }
}

/// Positions after the latest offline edit. Lots already reflect the listed
/// trades (sell matched FIFO against the oldest lot, buy added as a new lot).
pub static HOLDERS: &[Holder] = &[
    Holder {
        name: "邓锐",
        avatar: Some("/deng.jpg"),
        cry_avatar: Some("/deng-cry.jpg"),
        laugh_avatar: Some("/deng-laugh.jpg"),
        lots: &[
            BuyLot { price: 8.72, shares: 1350 },
            BuyLot { price: 8.66, shares: 1200 },
            BuyLot { price: 7.95, shares: 2100 },
        ],
        trades: &[
            Trade { side: Side::Sell, price: 8.06, shares: 2050 },
            Trade { side: Side::Buy, price: 7.95, shares: 2100 },
        ],
    },
    Holder {
        name: "汤银海",
        avatar: Some("/tang.jpg"),
        cry_avatar: Some("/tang-cry.jpg"),
        laugh_avatar: Some("/tang-laugh.jpg"),
        lots: &[
            BuyLot { price: 8.7, shares: 1550 },
            BuyLot { price: 7.95, shares: 2100 },
        ],
        trades: &[
            Trade { side: Side::Sell, price: 8.06, shares: 2050 },
            Trade { side: Side::Buy, price: 7.95, shares: 2100 },
        ],
    },
    Holder {
        name: "张伟",
        avatar: Some("/zhangwei.jpg"),
        cry_avatar: Some("/zhangwei-cry.jpg"),
        laugh_avatar: Some("/zhangwei-laugh.jpg"),
        lots: &[BuyLot { price: 8.5945, shares: 49200 }],
        trades: &[],
    },
    Holder {
        name: "舒海林",
        avatar: Some("/shu.jpg"),
        cry_avatar: Some("/shu-cry.jpg"),
        laugh_avatar: Some("/shu-laugh.jpg"),
        lots: &[BuyLot { price: 8.677, shares: 3500 }],
        trades: &[],
    },
    Holder {
        name: "彭宇",
        avatar: Some("/peng.jpg"),
        cry_avatar: Some("/peng-cry.jpg"),
        laugh_avatar: Some("/peng-laugh.jpg"),
        lots: &[BuyLot { price: 8.692, shares: 23000 }],
        trades: &[],
    },
];
